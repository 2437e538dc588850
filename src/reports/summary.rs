//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use super::assembler::{assemble, ReportRow};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffReport;
use crate::model::PortCollection;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 {
        "port"
    } else {
        "ports"
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        report
            .check_well_formed()
            .map_err(ReportError::MalformedReport)?;

        let summary = &report.summary;
        let mut lines = Vec::new();

        lines.push(self.color(
            config.title.as_deref().unwrap_or("SWC Port Diff Summary"),
            "bold",
        ));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} → {}",
            self.color("Inputs:", "cyan"),
            report.base_label,
            report.candidate_label
        ));
        lines.push(format!(
            "{}  {} → {} ports",
            self.color("Size:", "cyan"),
            summary.removed + summary.modified + summary.unchanged,
            summary.added + summary.modified + summary.unchanged
        ));

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));
        if summary.added > 0 {
            lines.push(format!(
                "  {} {} added",
                self.color(&format!("+{}", summary.added), "green"),
                plural(summary.added)
            ));
        }
        if summary.removed > 0 {
            lines.push(format!(
                "  {} {} removed",
                self.color(&format!("-{}", summary.removed), "red"),
                plural(summary.removed)
            ));
        }
        if summary.modified > 0 {
            lines.push(format!(
                "  {} {} modified",
                self.color(&format!("~{}", summary.modified), "yellow"),
                plural(summary.modified)
            ));
        }
        if !report.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }
        lines.push(format!(
            "  {} unchanged",
            self.color(&summary.unchanged.to_string(), "dim")
        ));

        let changed_owners: Vec<_> = report
            .owner_breakdown()
            .into_iter()
            .filter(|o| o.counts.changes() > 0)
            .collect();
        if !changed_owners.is_empty() {
            let width = changed_owners
                .iter()
                .map(|o| o.owner.as_str().chars().count())
                .max()
                .unwrap_or(0);
            lines.push(String::new());
            lines.push(self.color("Changes per SWC:", "bold"));
            for owner in changed_owners {
                lines.push(format!(
                    "  {:<width$}  {} {} {}",
                    owner.owner.as_str(),
                    self.color(&format!("+{}", owner.counts.added), "green"),
                    self.color(&format!("-{}", owner.counts.removed), "red"),
                    self.color(&format!("~{}", owner.counts.modified), "yellow"),
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn generate_collection_report(
        &self,
        collection: &PortCollection,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color(
            config.title.as_deref().unwrap_or("SWC Port Summary"),
            "bold",
        ));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!("{}  {}", self.color("Source:", "cyan"), collection.label()));
        lines.push(format!(
            "{}  {}",
            self.color("Ports:", "cyan"),
            collection.len()
        ));
        let owners = collection.owners();
        lines.push(format!("{}  {}", self.color("SWCs:", "cyan"), owners.len()));
        if collection.duplicate_count() > 0 {
            lines.push(format!(
                "{}  {}",
                self.color("Duplicates collapsed:", "yellow"),
                collection.duplicate_count()
            ));
        }

        if !owners.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Ports per SWC:", "bold"));
            for owner in owners {
                lines.push(format!(
                    "  {}  {}",
                    owner,
                    collection.ports_of(owner.as_str()).len()
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for terminal output with aligned columns
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn kind_color(kind: &str) -> &'static str {
        match kind {
            "ADDED" => "green",
            "REMOVED" => "red",
            "MODIFIED" => "yellow",
            "SUMMARY" => "cyan",
            _ => "dim",
        }
    }

    /// Render rows with every column padded to its widest cell.
    ///
    /// Cells are padded before coloring so escape codes do not skew widths.
    fn render<const N: usize>(
        &self,
        headers: [&str; N],
        rows: &[[&str; N]],
        color_column: Option<usize>,
    ) -> Vec<String> {
        let mut widths = headers.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let pad = |cell: &str, width: usize| format!("{cell:<width$}");
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(
            headers
                .iter()
                .zip(widths.iter())
                .map(|(h, w)| ansi_color(&pad(&h.to_uppercase(), *w), "bold", self.colored))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string(),
        );
        let total: usize = widths.iter().sum::<usize>() + 2 * N.saturating_sub(1);
        lines.push("─".repeat(total));

        for row in rows {
            let line = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (cell, w))| {
                    let padded = pad(cell, *w);
                    if color_column == Some(i) {
                        ansi_color(&padded, Self::kind_color(cell), self.colored)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_diff_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let rows: Vec<ReportRow> = assemble(report, &config.assemble_options())?;
        let cells: Vec<[&str; 6]> = rows.iter().map(ReportRow::cells).collect();
        let lines = self.render(
            ["owner", "port", "change", "field", "old", "new"],
            &cells,
            Some(2),
        );
        Ok(lines.join("\n"))
    }

    fn generate_collection_report(
        &self,
        collection: &PortCollection,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let records = collection.sorted_records();
        let cells: Vec<[&str; 4]> = records
            .iter()
            .map(|r| {
                [
                    r.owner().as_str(),
                    r.name(),
                    r.direction().as_str(),
                    r.source_id().unwrap_or("-"),
                ]
            })
            .collect();
        let mut lines = self.render(["swc", "port", "direction", "item id"], &cells, None);
        lines.push(String::new());
        lines.push(format!(
            "Total: {} ports in {} SWCs",
            collection.len(),
            collection.owners().len()
        ));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}
