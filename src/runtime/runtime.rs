use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::runtime::error::RuntimeError;

/// Captured result of a finished engine invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CommandOutput {
    pub(crate) success: bool,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl CommandOutput {
    pub(crate) fn trimmed_stdout(&self) -> &str {
        self.stdout.trim()
    }
}

/// Gateway to the engine's command-line program.
///
/// `output` waits for the process and must give up after `limit`; `spawn` starts the
/// process detached and returns as soon as it is started.
#[async_trait]
pub(crate) trait EngineCommand: Send + Sync {
    async fn output(&self, program: &Path, args: &[String], limit: Duration) -> Result<CommandOutput, RuntimeError>;
    async fn spawn(&self, program: &Path, args: &[String]) -> Result<(), RuntimeError>;
}

pub(crate) struct ProcessRunner;

#[cfg(windows)]
fn hide_console(command: &mut Command) {
    // CREATE_NO_WINDOW
    command.creation_flags(0x0800_0000);
}

#[cfg(not(windows))]
fn hide_console(_command: &mut Command) {}

#[async_trait]
impl EngineCommand for ProcessRunner {
    async fn output(&self, program: &Path, args: &[String], limit: Duration) -> Result<CommandOutput, RuntimeError> {
        debug!("exec {} {}", program.display(), args.join(" "));

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        hide_console(&mut command);

        match timeout(limit, command.output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(e)) => Err(RuntimeError::EngineOperation(format!("{}: {}", program.display(), e))),
            Err(_) => Err(RuntimeError::EngineOperation(format!(
                "{} {} timed out after {}s",
                program.display(),
                args.first().map(String::as_str).unwrap_or_default(),
                limit.as_secs()
            ))),
        }
    }

    async fn spawn(&self, program: &Path, args: &[String]) -> Result<(), RuntimeError> {
        // arguments may carry a credentialed URI, only the subcommand is logged
        debug!("spawn {} {}", program.display(), args.first().map(String::as_str).unwrap_or_default());

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        hide_console(&mut command);

        command
            .spawn()
            .map(|_child| ())
            .map_err(|e| RuntimeError::EngineOperation(format!("{}: {}", program.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_trimmed_stdout() {
        let output = CommandOutput {
            success: true,
            stdout: "  25.0.3\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.trimmed_stdout(), "25.0.3");
    }

    #[tokio::test]
    async fn test_missing_program_is_an_operation_error() {
        let program = PathBuf::from("/nonexistent/omniboard-launcher/docker");
        let result = ProcessRunner
            .output(&program, &["version".to_string()], Duration::from_secs(1))
            .await;

        assert!(matches!(result, Err(RuntimeError::EngineOperation(_))));
    }

    #[tokio::test]
    async fn test_spawn_missing_program_fails() {
        let program = PathBuf::from("/nonexistent/omniboard-launcher/docker");
        let result = ProcessRunner.spawn(&program, &["run".to_string()]).await;

        assert!(result.is_err());
    }
}
