use crate::builtin::{Cd, Exit, HistoryList, Quit, ShowPids};
use crate::command::CommandFactory;
use crate::external::ExternalCommand;
use crate::lexer;
use crate::state::{ShellConfig, ShellState};
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};

/// Prompt written before each read.
pub const PROMPT: &str = "msh> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — builtins and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The shell's read-tokenize-dispatch-execute loop.
///
/// One input line is clipped to the configured length, split into tokens,
/// and dispatched: `!n` references are substituted from command history and
/// re-enter the same path as fresh input, builtins run in-process, anything
/// else is resolved through PATH and spawned as a child the shell waits on.
/// The interpreter owns the session state — the two bounded history buffers —
/// for the lifetime of the process.
pub struct Interpreter {
    config: ShellConfig,
    state: ShellState,
    builtins: Vec<Box<dyn CommandFactory>>,
    external: Box<dyn CommandFactory>,
}

impl Interpreter {
    pub fn new(config: ShellConfig) -> Self {
        let builtins: Vec<Box<dyn CommandFactory>> = vec![
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Quit>::default()),
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<ShowPids>::default()),
            Box::new(Factory::<HistoryList>::default()),
        ];
        let state = ShellState::new(&config);
        Self {
            config,
            state,
            builtins,
            external: Box::new(Factory::<ExternalCommand>::default()),
        }
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// The interactive loop: prompt, read, process, repeat.
    ///
    /// Interrupting the read re-prompts; end of input ends the session.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    self.run_line(&line, &mut stdout, &mut stderr)?;
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Process one raw input line to completion.
    ///
    /// Listings and the history-recall failure message go to `out`; the
    /// command-not-found report goes to `err`. An `Err` from this method is
    /// fatal to the shell (resource exhaustion while spawning).
    pub fn run_line(&mut self, input: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let line = lexer::clip_line(input, self.config.max_line_len);
        let tokens = lexer::split_into_tokens(line, self.config.max_tokens);
        let Some(first) = tokens.first() else {
            // Blank line: nothing runs, nothing is recorded.
            return Ok(());
        };

        if let Some(reference) = first.strip_prefix('!') {
            let Some(recalled) = self.resolve_recall(reference) else {
                writeln!(out, "Command not in history.")?;
                return Ok(());
            };
            // Recorded lines are never blank and never start with '!', so a
            // single substitution suffices.
            let tokens = lexer::split_into_tokens(&recalled, self.config.max_tokens);
            return self.dispatch(&recalled, &tokens, out, err);
        }

        self.dispatch(line, &tokens, out, err)
    }

    /// Look up a `!n` reference. `None` for anything that is not an index
    /// into the current command history.
    fn resolve_recall(&self, reference: &str) -> Option<String> {
        let index = reference.parse::<i64>().ok()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.state.commands.get(i))
            .cloned()
    }

    fn dispatch(
        &mut self,
        line: &str,
        tokens: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let Some(name) = tokens.first().map(String::as_str) else {
            return Ok(());
        };
        let args: Vec<&str> = tokens[1..].iter().map(String::as_str).collect();
        let Self {
            builtins,
            external,
            state,
            ..
        } = self;

        for factory in builtins.iter() {
            if let Some(cmd) = factory.try_create(state, name, &args) {
                // Recorded up front so `history` lists its own invocation;
                // exit/quit terminate before the entry could be observed.
                state.record_command(line);
                cmd.execute(out, state)?;
                return Ok(());
            }
        }

        match external.try_create(state, name, &args) {
            Some(cmd) => {
                let outcome = cmd.execute(out, state)?;
                // A failed wait carries no pid and leaves no trace; only a
                // child that was waited on ends up in pid history.
                if let Some(pid) = outcome.pid {
                    state.record_pid(pid);
                    state.record_command(line);
                }
            }
            None => {
                // The line was still processed: it stays recallable even
                // though no child existed to contribute a pid.
                state.record_command(line);
                writeln!(err, "{}: Command not found.", name)?;
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}
