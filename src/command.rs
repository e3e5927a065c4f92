use crate::state::ShellState;
use anyhow::Result;
use std::io::Write;

pub type ExitCode = i32;

/// Result of running one command to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub code: ExitCode,
    /// Pid of the child that was spawned and waited on. `None` for builtins,
    /// which run in-process, and for children whose wait failed.
    pub pid: Option<u32>,
}

impl Outcome {
    pub fn in_process(code: ExitCode) -> Self {
        Self { code, pid: None }
    }
}

/// A command instance ready to run exactly once.
pub trait ExecutableCommand {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, state: &mut ShellState) -> Result<Outcome>;
}

/// Creates [`ExecutableCommand`] instances by name.
///
/// Returns `None` when the name is not recognized by this factory, letting
/// the interpreter try the next one.
pub trait CommandFactory {
    fn try_create(
        &self,
        state: &ShellState,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
