//! Confirmation gate.
//!
//! Destructive work only starts after the operator types the exact phrase
//! [`CONFIRMATION_PHRASE`]. Surrounding whitespace is ignored; everything else is
//! compared byte for byte.

use crate::error::ResetError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// The only input that authorizes deletion.
pub const CONFIRMATION_PHRASE: &str = "DELETE";

pub const CONFIRMATION_PROMPT: &str = "Type 'DELETE' to confirm or anything else to cancel";

/// What the operator did at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    Answer(String),
    Interrupted,
}

/// Decision taken by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Confirmed,
    Declined,
    Interrupted,
}

/// Source of operator input
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<PromptReply, ResetError>;
}

/// True only for the exact phrase, ignoring surrounding whitespace.
pub fn is_confirmation(input: &str) -> bool {
    input.trim() == CONFIRMATION_PHRASE
}

/// Ask once and turn the reply into a decision. There is no re-prompt.
pub async fn confirm_deletion(prompt: &dyn ConfirmationPrompt) -> Result<GateDecision, ResetError> {
    let decision = match prompt.ask(CONFIRMATION_PROMPT).await? {
        PromptReply::Answer(input) if is_confirmation(&input) => GateDecision::Confirmed,
        PromptReply::Answer(input) => {
            debug!(input_len = input.len(), "Confirmation phrase did not match");
            GateDecision::Declined
        }
        PromptReply::Interrupted => GateDecision::Interrupted,
    };
    info!(decision = ?decision, "Confirmation gate closed");
    Ok(decision)
}

/// Interactive terminal prompt.
///
/// The blocking read runs on a blocking thread. Ctrl-C while the terminal is
/// in raw mode arrives as an interrupted read; a process-level SIGINT is
/// handled by the workflow's [`InterruptSignal`](crate::interrupt::InterruptSignal).
#[derive(Debug, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl ConfirmationPrompt for TerminalPrompt {
    async fn ask(&self, prompt: &str) -> Result<PromptReply, ResetError> {
        use dialoguer::Input;

        let prompt = prompt.to_string();
        let joined = tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await;

        match joined {
            Ok(Ok(input)) => Ok(PromptReply::Answer(input)),
            Ok(Err(dialoguer::Error::IO(e))) if e.kind() == ErrorKind::Interrupted => {
                Ok(PromptReply::Interrupted)
            }
            Ok(Err(e)) => Err(ResetError::PromptError(e.to_string())),
            Err(e) => Err(ResetError::PromptError(format!("Prompt task failed: {}", e))),
        }
    }
}

/// Prompt that replays canned replies and counts how often it was asked.
///
/// Running out of replies is a prompt failure.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    replies: Mutex<VecDeque<PromptReply>>,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn new(replies: Vec<PromptReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn answering(input: &str) -> Self {
        Self::new(vec![PromptReply::Answer(input.to_string())])
    }

    /// A prompt that must never be reached.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedPrompt {
    async fn ask(&self, _prompt: &str) -> Result<PromptReply, ResetError> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or_else(|| ResetError::PromptError("no scripted reply left".to_string()))
    }
}
