use crate::command::{CommandFactory, ExecutableCommand, Outcome};
use crate::interpreter::Factory;
use crate::state::ShellState;
use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// A command resolved to an executable outside the shell.
///
/// The child inherits the shell's stdin/stdout/stderr and environment; the
/// shell blocks until it terminates.
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: PathBuf, args: Vec<OsString>) -> Self {
        Self { program, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        _state: &ShellState,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = std::env::var_os("PATH")?;
        let program = find_command_path(&search_paths, Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            program,
            args.iter().map(|a| a.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        _state: &mut ShellState,
    ) -> Result<Outcome> {
        // Spawn failure after successful resolution is the resource
        // exhaustion case; it propagates and terminates the shell.
        let mut child = std::process::Command::new(&self.program)
            .args(&self.args)
            .spawn()?;
        let pid = child.id();
        let status = match child.wait() {
            Ok(status) => status,
            // The child is gone but was never waited on; report no pid so
            // nothing gets recorded for this invocation.
            Err(_) => return Ok(Outcome { code: -1, pid: None }),
        };
        let code = status.code().unwrap_or_else(|| terminated_by_signal(status));
        Ok(Outcome {
            code,
            pid: Some(pid),
        })
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match ExitStatusExt::signal(&status) {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command name to an executable path.
///
/// Absolute paths and paths with more than one component are taken as-is
/// when they name an executable file. A bare name is searched through the
/// directories of `search_paths` (PATH); the first match wins. Returns
/// `None` when nothing executable is found.
pub fn find_command_path(search_paths: &OsStr, name: &Path) -> Option<PathBuf> {
    if name.as_os_str().is_empty() {
        return None;
    }
    if name.is_absolute() || name.components().count() > 1 {
        return is_executable(name).then(|| name.to_path_buf());
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ShellConfig, ShellState};
    use std::fs;
    use std::fs::File;

    #[test]
    #[cfg(unix)]
    fn absolute_executable_resolves_to_itself() {
        let path = Path::new("/bin/sh");
        let found = find_command_path(OsStr::new("/bin"), path).expect("resolve /bin/sh");
        assert_eq!(found, path);
    }

    #[test]
    #[cfg(unix)]
    fn absolute_missing_does_not_resolve() {
        assert!(find_command_path(OsStr::new("/bin"), Path::new("/bin/nonexisting")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn bare_name_is_searched_through_path() {
        let found = find_command_path(OsStr::new("/bin:/usr/bin"), Path::new("sh"))
            .expect("find sh in PATH");
        assert!(found.ends_with("sh"));
    }

    #[test]
    #[cfg(unix)]
    fn bare_name_missing_everywhere_is_none() {
        assert!(find_command_path(OsStr::new("/bin"), Path::new("nonexisting")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn non_executable_files_are_skipped() {
        let dir = std::env::temp_dir().join(format!("msh_ext_test_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join("plainfile")).unwrap();

        let res = find_command_path(dir.as_os_str(), Path::new("plainfile"));
        assert!(res.is_none(), "file without exec bit must not resolve");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn empty_name_is_none() {
        assert!(find_command_path(OsStr::new("/bin"), Path::new("")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn spawn_and_wait_reports_pid_and_code() {
        let mut state = ShellState::new(&ShellConfig::default());
        let cmd = Box::new(ExternalCommand::new(PathBuf::from("/bin/sh"), vec![
            OsString::from("-c"),
            OsString::from("exit 3"),
        ]));
        let outcome = cmd.execute(&mut Vec::new(), &mut state).unwrap();
        assert_eq!(outcome.code, 3);
        assert!(outcome.pid.is_some());
        assert!(outcome.pid.unwrap() > 0);
    }
}
