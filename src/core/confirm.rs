use crate::domain::error::HotloadResult;
use async_trait::async_trait;

/// Yes/no gate in front of destructive operations
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask the user to approve `prompt`; `false` cancels the operation
    async fn confirm(&self, prompt: &str) -> HotloadResult<bool>;
}

/// Approves everything; backs `--yes`
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> HotloadResult<bool> {
        tracing::debug!(prompt, "Confirmation skipped");
        Ok(true)
    }
}

/// Outcome of passing a destructive operation through the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Cancelled,
}

/// Ask `confirmer` and translate the answer into a gate decision
pub async fn gate(confirmer: &dyn Confirmer, prompt: &str) -> HotloadResult<Gate> {
    if confirmer.confirm(prompt).await? {
        Ok(Gate::Proceed)
    } else {
        tracing::info!(prompt, "Operation declined");
        Ok(Gate::Cancelled)
    }
}
