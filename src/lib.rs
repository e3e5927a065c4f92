//! msh — a tiny interactive command shell.
//!
//! This crate implements a single-threaded read-tokenize-dispatch-execute
//! loop: each input line is split into whitespace-delimited tokens and either
//! handled by a builtin (`exit`, `quit`, `cd`, `showpids`, `history`) or
//! resolved through PATH and run as a child process the shell waits on. Two
//! bounded FIFO buffers record the session: recently run command lines and
//! the pids of spawned children, with `!n` re-running a stored line through
//! the same dispatch path as fresh input.
//!
//! The main entry point is [`Interpreter`], which owns the session state and
//! drives both the interactive loop and single-line execution. The public
//! modules [`command`], [`history`] and [`state`] expose the traits and types
//! for implementing additional commands and inspecting shell state.

mod builtin;
pub mod command;
mod external;
pub mod history;
mod interpreter;
pub mod lexer;
pub mod state;

/// Convenient re-export of the interactive command runner.
pub use interpreter::{Interpreter, PROMPT};
pub use state::{ShellConfig, ShellState};
