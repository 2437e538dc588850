//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod diff;
mod merge;
mod view;

pub use diff::run_diff;
pub use merge::run_merge;
pub use view::run_view;

// Re-export config types used by handlers
pub use crate::config::{DiffConfig, MergeConfig, ViewConfig};

use crate::config::Validatable;

/// Fail with every validation problem listed, one per line
fn ensure_valid(config: &impl Validatable) -> anyhow::Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
    anyhow::bail!("invalid arguments:\n{}", listed.join("\n"))
}
