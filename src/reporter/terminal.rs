use crate::checks::{CheckOutcome, CheckReport};
use crate::discovery::FileList;
use crate::reporter::Reporter;
use crate::version::VersionRange;
use colored::Colorize;

/// Human-readable output.
///
/// Target lists stay plain, one path per line, so they can be piped into
/// other tools. Check summaries are colored.
pub struct TerminalReporter {
    show_reports: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_reports: true }
    }

    /// Whether failed checks print the analyzer report below the summary line.
    pub fn with_reports(mut self, show: bool) -> Self {
        self.show_reports = show;
        self
    }

    fn status_label(&self, outcome: &CheckOutcome) -> colored::ColoredString {
        match outcome {
            CheckOutcome::Passed => "PASS".green().bold(),
            CheckOutcome::Failed { .. } => "FAIL".red().bold(),
            CheckOutcome::Skipped { .. } => "SKIP".yellow(),
        }
    }

    fn format_check(&self, report: &CheckReport) -> String {
        let mut output = format!(
            "{} {} ({} target{})",
            self.status_label(&report.outcome),
            report.name.bold(),
            report.targets,
            if report.targets == 1 { "" } else { "s" }
        );

        match &report.outcome {
            CheckOutcome::Passed => {}
            CheckOutcome::Skipped { reason } => {
                output.push_str(&format!(": {}", reason.dimmed()));
            }
            CheckOutcome::Failed { exit_code, report } => {
                output.push_str(&format!(": exit code {exit_code}"));
                if self.show_reports && !report.trim().is_empty() {
                    for line in report.trim_end().lines() {
                        output.push_str("\n    ");
                        output.push_str(line);
                    }
                }
            }
        }
        output
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TerminalReporter {
    fn report_targets(&self, targets: &FileList) -> String {
        targets
            .iter()
            .map(|path| format!("{}\n", path.display()))
            .collect()
    }

    fn report_versions(&self, range: &VersionRange) -> String {
        format!("{}\n", range.test_version())
    }

    fn report_checks(&self, reports: &[CheckReport]) -> String {
        let mut output = String::new();
        for report in reports {
            output.push_str(&self.format_check(report));
            output.push('\n');
        }

        let failed = reports.iter().filter(|r| r.outcome.is_failure()).count();
        let skipped = reports
            .iter()
            .filter(|r| matches!(r.outcome, CheckOutcome::Skipped { .. }))
            .count();
        let passed = reports.len() - failed - skipped;

        let summary = format!("{passed} passed, {failed} failed, {skipped} skipped");
        if failed > 0 {
            output.push_str(&summary.red().bold().to_string());
        } else {
            output.push_str(&summary.green().to_string());
        }
        output.push('\n');
        output
    }
}
