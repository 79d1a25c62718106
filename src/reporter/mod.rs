pub mod json;
pub mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::checks::CheckReport;
use crate::discovery::FileList;
use crate::version::VersionRange;

pub trait Reporter {
    /// One line per selected target.
    fn report_targets(&self, targets: &FileList) -> String;

    fn report_versions(&self, range: &VersionRange) -> String;

    fn report_checks(&self, reports: &[CheckReport]) -> String;
}
