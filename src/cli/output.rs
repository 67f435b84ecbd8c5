//! CLI output: error mapping and process exit codes.

use crate::error::ResetError;
use crate::workflow::RunOutcome;

/// Exit status for completion, decline, interrupt.
pub const EXIT_OK: i32 = 0;
/// Exit status for any error escaping the workflow.
pub const EXIT_FAILURE: i32 = 1;

/// Map errors to the line printed before exiting.
pub fn map_error(e: &ResetError) -> String {
    format!("\n❌ Unexpected error: {}", e)
}

/// Every terminal state of a run is a normal exit; failed deletes are reported, not fatal.
pub fn exit_code(result: &Result<RunOutcome, ResetError>) -> i32 {
    match result {
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_FAILURE,
    }
}
