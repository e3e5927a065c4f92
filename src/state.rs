//! Shell configuration and the mutable state owned by the interpreter.

use crate::history::BoundedHistory;

/// Default capacity of both history stores.
pub const DEFAULT_HISTORY_CAPACITY: usize = 15;
/// Default cap on tokens parsed from one line (command plus arguments).
pub const DEFAULT_MAX_TOKENS: usize = 12;
/// Default cap on the length of one raw input line, in characters.
pub const DEFAULT_MAX_LINE_LEN: usize = 254;

/// Tunable limits of the shell. All of them are soft caps: exceeding input is
/// truncated, never rejected.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub history_capacity: usize,
    pub max_tokens: usize,
    pub max_line_len: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

/// The shell's session state: both history buffers.
///
/// Created empty at startup, owned by the interpreter for the lifetime of the
/// process, and never persisted. The current working directory is process
/// state and lives outside this struct.
#[derive(Debug)]
pub struct ShellState {
    pub commands: BoundedHistory<String>,
    pub pids: BoundedHistory<u32>,
}

impl ShellState {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            commands: BoundedHistory::new(config.history_capacity),
            pids: BoundedHistory::new(config.history_capacity),
        }
    }

    /// Record a raw command line. Blank lines are never recorded.
    pub fn record_command(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.commands.push(line.to_owned());
    }

    /// Record the pid of a child that has been waited on.
    pub fn record_pid(&mut self, pid: u32) {
        self.pids.push(pid);
    }
}
