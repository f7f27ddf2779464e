use crate::models::Step;
use async_trait::async_trait;

/// Executes the external commands of an analysis run. Injected so the run
/// sequencing can be exercised without spawning processes.
#[async_trait]
pub trait PipelineRunner: Send + Sync {
    async fn run(&self, step: &Step) -> anyhow::Result<()>;
}
