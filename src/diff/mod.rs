//! Key-based diff engine for port collections.
//!
//! Both sides are indexed by `(owner, name)`. Every key present on either
//! side yields exactly one [`DiffEntry`]:
//!
//! - candidate only: `ADDED`
//! - base only: `REMOVED`
//! - both, compared payload fields equal: `UNCHANGED`
//! - both, some compared field differs: `MODIFIED`, listing each field
//!
//! # Example
//!
//! ```ignore
//! use swc_port_tools::diff::DiffEngine;
//!
//! let report = DiffEngine::new()
//!     .compare_source_id(false)
//!     .diff(&base, &candidate)?;
//! for entry in report.entries_of_kind(ChangeKind::Added) {
//!     println!("new port {}/{}", entry.owner, entry.name);
//! }
//! ```

mod consistency;
mod engine;
mod result;

pub use consistency::check_comparable;
pub use engine::DiffEngine;
pub use result::{ChangeKind, DiffEntry, DiffReport, DiffSummary, OwnerBreakdown};

use crate::error::SwcDiffError;
use crate::model::PortCollection;

/// Compare two collections with default engine settings.
pub fn diff(base: &PortCollection, candidate: &PortCollection) -> Result<DiffReport, SwcDiffError> {
    DiffEngine::new().diff(base, candidate)
}
