//! **Merge and diff AUTOSAR software-component port declarations.**
//!
//! `swc-port-tools` reads the ports each SWC (software component) declares,
//! as exported from AUTOSAR port-mapping XML, merges several exports into one
//! collection and compares two collections port by port. It powers both a
//! command-line interface and a Rust library for use in build and review
//! tooling.
//!
//! ## Key Features
//!
//! - **Identity by SWC and port name**: two records describe the same port iff
//!   their owning SWC and port name match; direction and item ID are payload.
//! - **Merging**: union of collections with last-writer-wins on conflicting
//!   payloads, every conflict reported.
//! - **Diffing**: every port is classified as added, removed, modified (with
//!   per-field before/after values) or unchanged, in a deterministic order.
//! - **Reporting**: the diff is flattened into rows with per-kind summary
//!   rows and rendered as CSV, JSON, a summary or a terminal table.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`PortRecord`], [`PortKey`] and the immutable
//!   [`PortCollection`].
//! - **[`parsers`]**: AUTOSAR port-mapping XML and JSON snapshot readers.
//! - **[`merge`]**: [`merge`](merge::merge) and [`merge_all`](merge::merge_all).
//! - **[`diff`]**: the [`DiffEngine`] and [`DiffReport`].
//! - **[`reports`]**: the row assembler and renderers.
//! - **[`pipeline`]**: parse → merge → diff → report orchestration used by the CLI.
//!
//! ## Diffing two exports
//!
//! ```no_run
//! use std::path::Path;
//! use swc_port_tools::{parse_port_file, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = parse_port_file(Path::new("release-1/dids.xml"))?;
//!     let candidate = parse_port_file(Path::new("release-2/dids.xml"))?;
//!
//!     let report = DiffEngine::new().diff(&base, &candidate)?;
//!     println!("{} ports added", report.summary.added);
//!     for entry in report.entries.iter().filter(|e| e.kind.is_change()) {
//!         println!("  {} {}/{}", entry.kind, entry.owner, entry.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Merging several exports
//!
//! ```no_run
//! use std::path::Path;
//! use swc_port_tools::{merge_all, parse_port_file};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dids = parse_port_file(Path::new("xml/dids.xml"))?;
//!     let rids = parse_port_file(Path::new("xml/rids.xml"))?;
//!
//!     let outcome = merge_all([&dids, &rids]);
//!     for conflict in &outcome.conflicts {
//!         eprintln!("{conflict}");
//!     }
//!     for port in outcome.collection.ports_of("Diag") {
//!         println!("{}", port.name());
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod merge;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use config::{DiffConfig, DiffConfigBuilder, MergeConfig, OutputConfig, ViewConfig};
pub use diff::{ChangeKind, DiffEngine, DiffEntry, DiffReport, DiffSummary};
pub use error::{
    ErrorContext, IncomparableInputError, MalformedRecordError, OptionContext, Result,
    SwcDiffError,
};
pub use merge::{merge, merge_all, ConflictLog, MergeConflict, MergeOutcome};
pub use model::{
    FieldChange, PortCollection, PortCollectionBuilder, PortDirection, PortKey, PortRecord,
    RawPortRecord, SwcIdentifier,
};
pub use parsers::{parse_port_file, parse_port_str, ParseOptions, PortParser};
pub use reports::{assemble, AssembleOptions, ReportFormat, ReportGenerator, ReportRow};
