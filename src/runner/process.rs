use crate::models::Step;
use crate::traits::PipelineRunner;
use anyhow::{Context, bail};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Number of stderr lines from a captured step kept in its error.
const STDERR_TAIL: usize = 20;

/// Runs steps as child processes with the parent environment.
///
/// By default the child inherits stdio. In captured mode its output is
/// collected instead, a spinner is shown while it runs, and the end of its
/// stderr is attached to the error when it fails.
pub struct ProcessRunner {
    working_dir: PathBuf,
    capture: bool,
}

impl ProcessRunner {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            capture: false,
        }
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    fn spinner(step: &Step) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")
        {
            pb.set_style(style);
        }
        pb.set_message(step.label.clone());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }

    async fn run_captured(
        &self,
        step: &Step,
        mut cmd: Command,
    ) -> anyhow::Result<(ExitStatus, String)> {
        let pb = Self::spinner(step);
        let output = cmd.output().await;
        pb.finish_and_clear();
        let output =
            output.with_context(|| format!("failed to spawn '{}'", step.program.display()))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!("[{}] {}", step.label, line);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            debug!("[{}] {}", step.label, line);
        }

        let lines: Vec<&str> = stderr.lines().collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL)..].join("\n");
        Ok((output.status, tail))
    }
}

#[async_trait]
impl PipelineRunner for ProcessRunner {
    async fn run(&self, step: &Step) -> anyhow::Result<()> {
        info!("{}", step.label);
        debug!("$ {}", step);

        let started = Instant::now();
        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args)
            .envs(&step.env)
            .current_dir(&self.working_dir);

        let (status, stderr) = if self.capture {
            self.run_captured(step, cmd).await?
        } else {
            let status = cmd
                .status()
                .await
                .with_context(|| format!("failed to spawn '{}'", step.program.display()))?;
            (status, String::new())
        };

        if !status.success() {
            let reason = status
                .code()
                .map(|c| format!("exit code {}", c))
                .unwrap_or_else(|| "killed by signal".to_string());
            if stderr.is_empty() {
                bail!("❌ {} failed ({}): {}", step.label, reason, step);
            }
            bail!("❌ {} failed ({}): {}\n{}", step.label, reason, step, stderr);
        }

        println!(
            "✅ {} ({:.1}s)",
            step.label,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
