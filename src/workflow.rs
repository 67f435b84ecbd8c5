//! Reset workflow: inventory, confirmation gate, destructive executor, summary.
//!
//! ```text
//! Start -> Inventoried -> NothingToDelete
//!                      -> AwaitingConfirmation -> Declined | Interrupted
//!                                              -> Confirmed -> Executing -> Done
//! ```
//!
//! Every terminal state ends the run; there is no retry state. An operator
//! interrupt before the gate closes ends the run as `Interrupted`.

use crate::confirm::{confirm_deletion, ConfirmationPrompt, GateDecision};
use crate::error::ResetError;
use crate::executor::{execute_reset, CollectionOutcome, ResetReport};
use crate::interrupt::{InterruptSignal, NoInterrupt};
use crate::inventory::{take_inventory, Inventory};
use crate::report::{self, Theme};
use crate::store::RemoteStore;
use std::io::Write;
use tracing::{info, warn};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToDelete { inventory: Inventory },
    Declined { inventory: Inventory },
    /// Stopped before any delete; the inventory is empty if it was cut short.
    Interrupted { inventory: Inventory },
    Completed { inventory: Inventory, report: ResetReport },
}

impl RunOutcome {
    pub fn inventory(&self) -> &Inventory {
        match self {
            RunOutcome::NothingToDelete { inventory }
            | RunOutcome::Declined { inventory }
            | RunOutcome::Interrupted { inventory }
            | RunOutcome::Completed { inventory, .. } => inventory,
        }
    }

    pub fn report(&self) -> Option<&ResetReport> {
        match self {
            RunOutcome::Completed { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::NothingToDelete { .. } => "nothing_to_delete",
            RunOutcome::Declined { .. } => "declined",
            RunOutcome::Interrupted { .. } => "interrupted",
            RunOutcome::Completed { .. } => "completed",
        }
    }
}

/// One reset run against a store, driven by a prompt, writing to an output sink.
pub struct ResetWorkflow<'a> {
    store: &'a dyn RemoteStore,
    prompt: &'a dyn ConfirmationPrompt,
    collections: &'a [String],
    interrupt: &'a dyn InterruptSignal,
    theme: Theme,
}

static NO_INTERRUPT: NoInterrupt = NoInterrupt;

impl<'a> ResetWorkflow<'a> {
    pub fn new(
        store: &'a dyn RemoteStore,
        prompt: &'a dyn ConfirmationPrompt,
        collections: &'a [String],
    ) -> Self {
        Self {
            store,
            prompt,
            collections,
            interrupt: &NO_INTERRUPT,
            theme: Theme::default(),
        }
    }

    pub fn with_interrupt(mut self, interrupt: &'a dyn InterruptSignal) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub async fn run(&self, out: &mut dyn Write) -> Result<RunOutcome, ResetError> {
        let theme = self.theme;

        // One listener covers inventory and prompt, so no interrupt is lost in between.
        let interrupt = self.interrupt.interrupted();
        tokio::pin!(interrupt);

        let inventory = tokio::select! {
            inventory = take_inventory(self.store, self.collections) => inventory,
            _ = &mut interrupt => {
                info!("Interrupted during inventory");
                writeln!(out, "{}", report::interrupted(theme))?;
                return Ok(RunOutcome::Interrupted {
                    inventory: Inventory::default(),
                });
            }
        };
        for entry in inventory.read_failures() {
            if let Some(line) = report::read_warning_line(entry, theme) {
                writeln!(out, "{}", line)?;
            }
        }
        writeln!(out, "{}", report::render_inventory(&inventory, theme))?;
        info!(total = inventory.total(), "Inventory complete");

        if inventory.is_empty_store() {
            writeln!(out, "{}", report::nothing_to_delete(theme))?;
            return Ok(RunOutcome::NothingToDelete { inventory });
        }

        writeln!(out, "{}", report::deletion_warning(theme))?;
        writeln!(out)?;
        out.flush()?;

        let decision = tokio::select! {
            decision = confirm_deletion(self.prompt) => decision?,
            _ = &mut interrupt => GateDecision::Interrupted,
        };
        match decision {
            GateDecision::Confirmed => {}
            GateDecision::Declined => {
                writeln!(out, "{}", report::declined(theme))?;
                return Ok(RunOutcome::Declined { inventory });
            }
            GateDecision::Interrupted => {
                writeln!(out, "{}", report::interrupted(theme))?;
                return Ok(RunOutcome::Interrupted { inventory });
            }
        }

        writeln!(out, "{}", report::reset_started())?;
        // From here on the batch runs to completion; output failures are only logged.
        let reset_report = {
            let mut emit = |outcome: &CollectionOutcome| {
                let line = report::outcome_line(outcome, theme);
                if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                    warn!(error = %e, collection = %outcome.name, "Failed to write progress line");
                }
            };
            execute_reset(self.store, &inventory, &mut emit).await
        };

        if let Err(e) = writeln!(out, "{}", report::render_summary(&reset_report, theme)) {
            warn!(error = %e, "Failed to write summary");
        }
        info!(
            total_deleted = reset_report.total_deleted(),
            failed = reset_report.failed().count(),
            "Reset finished"
        );
        if let Ok(json) = serde_json::to_string(&reset_report) {
            tracing::debug!(report = %json, "Reset report");
        }

        Ok(RunOutcome::Completed {
            inventory,
            report: reset_report,
        })
    }
}
