use argh::FromArgs;
use msh::{Interpreter, ShellConfig};

#[derive(FromArgs)]
/// msh — a minimal interactive command shell with bounded history.
struct Options {
    /// number of entries kept in the command and pid histories
    #[argh(option, default = "msh::state::DEFAULT_HISTORY_CAPACITY")]
    history_size: usize,

    /// maximum number of tokens parsed from one input line
    #[argh(option, default = "msh::state::DEFAULT_MAX_TOKENS")]
    max_tokens: usize,
}

fn main() {
    let options: Options = argh::from_env();
    let config = ShellConfig {
        history_capacity: options.history_size,
        max_tokens: options.max_tokens,
        ..ShellConfig::default()
    };

    let mut shell = Interpreter::new(config);
    if let Err(err) = shell.repl() {
        // Spawn failure or a broken terminal; nothing left to retry.
        eprintln!("msh: {err:#}");
        std::process::exit(255);
    }
}
