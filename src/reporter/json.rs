use crate::checks::CheckReport;
use crate::discovery::FileList;
use crate::reporter::Reporter;
use crate::version::VersionRange;
use serde::Serialize;

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize + ?Sized>(value: &T) -> String {
        let mut output = serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize result: {}"}}"#, e));
        output.push('\n');
        output
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct VersionsOutput<'a> {
    #[serde(flatten)]
    range: &'a VersionRange,
    test_version: String,
}

#[derive(Serialize)]
struct ChecksOutput<'a> {
    passed: bool,
    checks: &'a [CheckReport],
}

impl Reporter for JsonReporter {
    fn report_targets(&self, targets: &FileList) -> String {
        Self::render(targets)
    }

    fn report_versions(&self, range: &VersionRange) -> String {
        Self::render(&VersionsOutput {
            range,
            test_version: range.test_version(),
        })
    }

    fn report_checks(&self, reports: &[CheckReport]) -> String {
        Self::render(&ChecksOutput {
            passed: !reports.iter().any(|r| r.outcome.is_failure()),
            checks: reports,
        })
    }
}
