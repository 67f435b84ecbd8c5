//! Operator interrupt.
//!
//! The workflow listens for an interrupt from before the first read until the
//! confirmation gate closes. Once deletion has started the listener is dropped
//! and the batch runs to completion.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Resolves when the operator asks the run to stop.
#[async_trait]
pub trait InterruptSignal: Send + Sync {
    async fn interrupted(&self);
}

/// SIGINT / Ctrl-C delivered to the process.
///
/// The handler is installed on first poll and stays installed for the rest of
/// the process, so a later Ctrl-C no longer kills a running deletion.
#[derive(Debug, Default)]
pub struct CtrlC;

#[async_trait]
impl InterruptSignal for CtrlC {
    async fn interrupted(&self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

/// Never fires.
#[derive(Debug, Default)]
pub struct NoInterrupt;

#[async_trait]
impl InterruptSignal for NoInterrupt {
    async fn interrupted(&self) {
        std::future::pending::<()>().await;
    }
}

/// Fires once a fixed delay has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct InterruptAfter(pub Duration);

#[async_trait]
impl InterruptSignal for InterruptAfter {
    async fn interrupted(&self) {
        tokio::time::sleep(self.0).await;
    }
}
