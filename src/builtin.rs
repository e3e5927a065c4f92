use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Outcome};
use crate::interpreter::Factory;
use crate::state::ShellState;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "showpids".
    fn name() -> &'static str;

    /// Executes the command against the shell state, writing any listing to
    /// `stdout`. Returns 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, state: &mut ShellState) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, state: &mut ShellState) -> Result<Outcome> {
        match T::execute(*self, stdout, state) {
            Ok(code) => Ok(Outcome::in_process(code)),
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                Ok(Outcome::in_process(1))
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _state: &mut ShellState,
    ) -> Result<Outcome> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(Outcome::in_process(if self.is_error { 1 } else { 0 }))
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _state: &ShellState,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Terminate the shell immediately with status 0.
pub struct Exit {
    #[argh(positional, greedy)]
    /// hack to ignore any trailing arguments
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, _state: &mut ShellState) -> Result<ExitCode> {
        std::process::exit(0)
    }
}

#[derive(FromArgs)]
/// Terminate the shell immediately with status 0.
pub struct Quit {
    #[argh(positional, greedy)]
    /// hack to ignore any trailing arguments
    pub _args: Vec<String>,
}

impl BuiltinCommand for Quit {
    fn name() -> &'static str {
        "quit"
    }

    fn execute(self, _stdout: &mut dyn Write, _state: &mut ShellState) -> Result<ExitCode> {
        std::process::exit(0)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
/// Without a target, changes to the directory named by the HOME environment variable.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; defaults to $HOME when omitted
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, _state: &mut ShellState) -> Result<ExitCode> {
        let target = match self.target {
            Some(t) => PathBuf::from(t),
            None => match env::var_os("HOME") {
                Some(home) => PathBuf::from(home),
                // Bare `cd` with no HOME has nowhere to go.
                None => return Ok(0),
            },
        };
        // A failed chdir is absorbed without a report; the invocation is
        // still recorded in command history by the dispatcher.
        let _ = env::set_current_dir(&target);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List the pids of processes this shell has spawned, oldest first.
pub struct ShowPids {}

impl BuiltinCommand for ShowPids {
    fn name() -> &'static str {
        "showpids"
    }

    fn execute(self, stdout: &mut dyn Write, state: &mut ShellState) -> Result<ExitCode> {
        if state.pids.is_empty() {
            writeln!(stdout, "No pid history yet.")?;
            return Ok(0);
        }
        for (index, pid) in state.pids.iter().enumerate() {
            writeln!(stdout, "{}: {}", index, pid)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List the most recent command lines, oldest first.
pub struct HistoryList {}

impl BuiltinCommand for HistoryList {
    fn name() -> &'static str {
        "history"
    }

    fn execute(self, stdout: &mut dyn Write, state: &mut ShellState) -> Result<ExitCode> {
        for (index, line) in state.commands.iter().enumerate() {
            writeln!(stdout, "{}: {}", index, line)?;
        }
        Ok(0)
    }
}
