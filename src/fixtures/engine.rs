use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::PortAllocator;
use crate::runtime::docker::{DockerRuntime, DockerSettings, Platform};
use crate::runtime::error::RuntimeError;
use crate::runtime::runtime::{CommandOutput, EngineCommand};

const VERSION: &str = "25.0.3";

#[derive(Default)]
struct State {
    version: Option<String>,
    info: Option<String>,
    missing: bool,
    managed: Vec<String>,
    published: Vec<u16>,
    failing_removals: Vec<String>,
    calls: Vec<Vec<String>>,
    spawned: Vec<Vec<String>>,
    delay: Option<Duration>,
}

/// Records every docker invocation and answers from a script.
#[derive(Clone, Default)]
pub(crate) struct ScriptedEngine {
    state: Arc<Mutex<State>>,
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

impl ScriptedEngine {
    fn with_state(version: Option<&str>, info: Option<&str>, missing: bool) -> Self {
        let engine = ScriptedEngine::default();
        {
            let mut state = engine.state.lock().unwrap();
            state.version = version.map(str::to_string);
            state.info = info.map(str::to_string);
            state.missing = missing;
        }
        engine
    }

    pub(crate) fn running() -> Self {
        ScriptedEngine::with_state(Some(VERSION), Some(VERSION), false)
    }

    pub(crate) fn info_only() -> Self {
        ScriptedEngine::with_state(None, Some(VERSION), false)
    }

    pub(crate) fn stopped() -> Self {
        ScriptedEngine::with_state(None, None, false)
    }

    pub(crate) fn missing() -> Self {
        ScriptedEngine::with_state(None, None, true)
    }

    pub(crate) fn with_managed(self, ids: &[&str]) -> Self {
        self.state.lock().unwrap().managed = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub(crate) fn with_published(self, port: u16) -> Self {
        self.state.lock().unwrap().published.push(port);
        self
    }

    pub(crate) fn failing_removal(self, id: &str) -> Self {
        self.state.lock().unwrap().failing_removals.push(id.to_string());
        self
    }

    /// Makes every answered command take `delay` before returning.
    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = Some(delay);
        self
    }

    fn answer(state: &State, args: &[String]) -> Result<CommandOutput, RuntimeError> {
        if state.missing {
            return Err(RuntimeError::EngineOperation("docker: No such file or directory".to_string()));
        }

        let daemon_down = "Cannot connect to the Docker daemon";
        let output = match args.first().map(String::as_str) {
            Some("version") => state.version.as_deref().map(ok).unwrap_or_else(|| failed(daemon_down)),
            Some("info") => state.info.as_deref().map(ok).unwrap_or_else(|| failed(daemon_down)),
            Some("ps") if args.iter().any(|arg| arg == "-a") => ok(&state.managed.join("\n")),
            Some("ps") => {
                let published = args
                    .iter()
                    .filter_map(|arg| arg.strip_prefix("publish="))
                    .filter_map(|port| port.parse::<u16>().ok())
                    .any(|port| state.published.contains(&port));
                if published { ok("deadbeef0001\n") } else { ok("") }
            }
            Some("rm") => {
                let target = args.last().cloned().unwrap_or_default();
                if state.failing_removals.contains(&target) {
                    failed("Error response from daemon: removal in progress")
                } else {
                    ok(&target)
                }
            }
            _ => failed("unknown command"),
        };

        Ok(output)
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn spawned(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().spawned.clone()
    }

    pub(crate) fn invoked(&self, subcommand: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .calls
            .iter()
            .chain(state.spawned.iter())
            .any(|args| args.first().map(String::as_str) == Some(subcommand))
    }
}

#[async_trait]
impl EngineCommand for ScriptedEngine {
    async fn output(&self, _program: &Path, args: &[String], _limit: Duration) -> Result<CommandOutput, RuntimeError> {
        let (output, delay) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(args.to_vec());
            (ScriptedEngine::answer(&state, args), state.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        output
    }

    async fn spawn(&self, _program: &Path, args: &[String]) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        if state.missing {
            return Err(RuntimeError::EngineOperation("docker: No such file or directory".to_string()));
        }
        state.spawned.push(args.to_vec());
        Ok(())
    }
}

pub(crate) fn docker_runtime(engine: ScriptedEngine, platform: Platform) -> DockerRuntime {
    DockerRuntime::new(Arc::new(engine), platform, DockerSettings::default(), PortAllocator::default())
}
