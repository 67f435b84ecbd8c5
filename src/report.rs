//! Operator-facing rendering: banner, inventory table, progress lines and the
//! final summary. Everything returns `String`; the workflow decides where it goes.

use crate::executor::{CollectionOutcome, DeletionOutcome, ResetReport};
use crate::inventory::{CollectionCount, Inventory};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 60;

/// Colour switch for terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn good(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn bad(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

pub fn banner() -> String {
    [
        "╔══════════════════════════════════════════════════════════════╗",
        "║                                                              ║",
        "║                     Demo Database Reset                      ║",
        "║                 (Firebase Realtime Database)                 ║",
        "║                                                              ║",
        "╚══════════════════════════════════════════════════════════════╝",
    ]
    .join("\n")
}

pub fn connecting_line(base_url: &str) -> String {
    format!("✅ Connecting to {}...", base_url)
}

pub fn read_warning_line(entry: &CollectionCount, theme: Theme) -> Option<String> {
    entry.read_error.as_ref().map(|e| {
        theme.warn(&format!(
            "⚠️  Warning: Could not get count for {}: {}",
            entry.name, e
        ))
    })
}

/// Inventory table: one row per collection plus a total row.
pub fn render_inventory(inventory: &Inventory, theme: Theme) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if !theme.color {
        table.force_no_tty();
    }
    table.set_header(vec!["", "Collection", "Items", "Status"]);

    for entry in inventory.entries() {
        let (icon, status) = if entry.has_data() {
            ("📦", Cell::new("has data").fg(Color::Yellow))
        } else if entry.read_error.is_some() {
            ("⚠️", Cell::new("unreadable").fg(Color::Red))
        } else {
            ("📭", Cell::new("empty").fg(Color::DarkGrey))
        };
        table.add_row(vec![
            Cell::new(icon),
            Cell::new(&entry.name),
            Cell::new(entry.count),
            status,
        ]);
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new("TOTAL DATA ITEMS"),
        Cell::new(inventory.total()),
        Cell::new(""),
    ]);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    format!(
        "\n{}\n📊 CURRENT DATABASE STATUS\n{}\n{}",
        rule('='),
        rule('='),
        table
    )
}

pub fn nothing_to_delete(theme: Theme) -> String {
    theme.good("\n✨ Database is already empty. Nothing to delete!")
}

pub fn deletion_warning(theme: Theme) -> String {
    format!(
        "\n{}\nAll data in the collections above will be permanently deleted.",
        theme.warn("⚠️  WARNING: This action cannot be undone!")
    )
}

pub fn declined(theme: Theme) -> String {
    format!("\n{}\nNo data was deleted.", theme.bad("❌ Database reset cancelled."))
}

pub fn interrupted(theme: Theme) -> String {
    format!(
        "\n\n{}\nNo data was deleted.",
        theme.warn("⚠️  Operation cancelled by user.")
    )
}

pub fn reset_started() -> String {
    "\n🗑️  Starting database reset...\n".to_string()
}

pub fn outcome_line(outcome: &CollectionOutcome, theme: Theme) -> String {
    match &outcome.outcome {
        DeletionOutcome::Deleted { count } => {
            theme.good(&format!("✅ Deleted {}: {} items", outcome.name, count))
        }
        DeletionOutcome::Failed { error } => {
            theme.bad(&format!("❌ Failed to delete {}: {}", outcome.name, error))
        }
        DeletionOutcome::SkippedEmpty => theme.muted(&format!(
            "⏭️  Skipped {}: already empty",
            outcome.name
        )),
    }
}

/// Final accounting. Only collections that were actually deleted are itemized.
pub fn render_summary(report: &ResetReport, theme: Theme) -> String {
    let mut lines = vec![
        String::new(),
        rule('='),
        theme.strong("🎉 DATABASE RESET COMPLETE"),
        rule('='),
        String::new(),
        format!("📊 Total items deleted: {}", report.total_deleted()),
    ];
    for (name, count) in report.deleted() {
        lines.push(format!("   - {}: {} items", name, count));
    }

    let failed: Vec<&str> = report.failed().map(|o| o.name.as_str()).collect();
    if failed.is_empty() {
        lines.push(String::new());
        lines.push(theme.good("✨ The database is now clean and ready for a new demo!"));
    } else {
        lines.push(String::new());
        lines.push(theme.bad(&format!(
            "⚠️  {} collection(s) could not be deleted: {}. Run the reset again to retry.",
            failed.len(),
            failed.join(", ")
        )));
    }
    lines.push(rule('='));
    lines.join("\n")
}
