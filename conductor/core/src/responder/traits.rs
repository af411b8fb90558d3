//! Responder Trait
//!
//! The seam between the conversation state machine and whatever produces
//! replies. The scripted selector never fails, but the trait is fallible so a
//! different responder can be dropped in without touching the state machine.

use async_trait::async_trait;

/// Produces a reply for the most recent user text
#[async_trait]
pub trait Responder: Send + Sync {
    /// Short name for logs (e.g., "scripted")
    fn name(&self) -> &str;

    /// Compute the reply to `prompt`
    ///
    /// Errors are recovered by the caller; they never reach the user.
    async fn respond(&self, prompt: &str) -> anyhow::Result<String>;
}
