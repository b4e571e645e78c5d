#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use selsync_core::{ConfigManager, Error, Result, TransferCommand, TransferRunner};
use selsync_fs::NormalizedPath;
use selsync_test_utils::TestProject;

/// Load the global and project configuration a [`TestProject`] wrote.
pub fn load_manager(project: &TestProject) -> ConfigManager {
    project.write_configs();
    let manager = ConfigManager::new(NormalizedPath::new(project.config_dir()));
    manager.load_global().unwrap();
    if !manager.handle().selected_project().is_empty() {
        manager.load_project().unwrap();
    }
    manager
}

enum Reply {
    Output(String),
    Fail(String),
}

struct Rule {
    needle: String,
    delay: Option<Duration>,
    reply: Option<Reply>,
}

/// In-memory [`TransferRunner`] with per-folder scripted behaviour.
///
/// A rule applies when any argument contains its needle; the first match
/// wins. Unmatched commands succeed and echo their command line.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<TransferCommand>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, needle: &str, output: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            delay: None,
            reply: Some(Reply::Output(output.to_string())),
        });
        self
    }

    pub fn fail(mut self, needle: &str, output: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            delay: None,
            reply: Some(Reply::Fail(output.to_string())),
        });
        self
    }

    pub fn delay(mut self, needle: &str, delay: Duration) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            delay: Some(delay),
            reply: None,
        });
        self
    }

    /// Commands received so far, in arrival order
    pub fn calls(&self) -> Vec<TransferCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn invocations(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Highest number of commands that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransferRunner for ScriptedRunner {
    async fn run(&self, command: &TransferCommand) -> Result<String> {
        self.calls.lock().unwrap().push(command.clone());
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let rule = self
            .rules
            .iter()
            .find(|rule| command.args.iter().any(|arg| arg.contains(&rule.needle)));

        if let Some(delay) = rule.and_then(|rule| rule.delay) {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match rule.and_then(|rule| rule.reply.as_ref()) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::Fail(output)) => Err(Error::CommandFailed {
                code: 1,
                output: output.clone(),
            }),
            None => Ok(command.to_string()),
        }
    }
}
