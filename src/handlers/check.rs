//! Check execution handlers.

use super::{HandlerResult, fail, load_context};
use crate::checks::{CheckReport, CheckRunner, STRICT_TYPES_CHECK};
use crate::cli::{Cli, FormatArgs, RunArgs};
use crate::config::{CheckConfig, ConfigError};
use crate::context::SuiteContext;
use crate::discovery::GitDiff;
use crate::error::{LiveCheckError, Result};
use tracing::info;

/// Handle `strict-types`.
pub fn handle_strict_types(cli: &Cli, args: &FormatArgs) -> HandlerResult {
    let context = match load_context(cli, false) {
        Ok(context) => context,
        Err(e) => return fail(e),
    };

    let runner = CheckRunner::new(&context, GitDiff::new(context.project_root()));
    match runner.run_strict_types() {
        Ok(report) => finish(args, &[report]),
        Err(e) => fail(e),
    }
}

/// Handle `run`: every configured check, or the named ones in the given
/// order. Naming `strict-types` runs the built-in check unless the
/// configuration defines a check of that name.
pub fn handle_run(cli: &Cli, args: &RunArgs) -> HandlerResult {
    let context = match load_context(cli, args.full_scan) {
        Ok(context) => context,
        Err(e) => return fail(e),
    };

    match run_checks(&context, &args.names) {
        Ok(reports) => finish(&args.output, &reports),
        Err(e) => fail(e),
    }
}

enum Planned<'a> {
    Configured(&'a CheckConfig),
    StrictTypes,
}

fn plan<'a>(context: &'a SuiteContext, names: &[String]) -> Result<Vec<Planned<'a>>> {
    let config = context.config();
    if names.is_empty() {
        return Ok(config.checks.iter().map(Planned::Configured).collect());
    }

    names
        .iter()
        .map(|name| match config.check(name) {
            Some(check) => Ok(Planned::Configured(check)),
            None if name == STRICT_TYPES_CHECK => Ok(Planned::StrictTypes),
            None => Err(LiveCheckError::from(ConfigError::UnknownCheck(name.clone()))),
        })
        .collect()
}

fn run_checks(context: &SuiteContext, names: &[String]) -> Result<Vec<CheckReport>> {
    let planned = plan(context, names)?;
    let runner = CheckRunner::new(context, GitDiff::new(context.project_root()));

    let mut reports = Vec::with_capacity(planned.len());
    for check in planned {
        let report = match check {
            Planned::Configured(check) => runner.run(check)?,
            Planned::StrictTypes => runner.run_strict_types()?,
        };
        info!(check = %report.name, targets = report.targets, "Check finished");
        reports.push(report);
    }
    Ok(reports)
}

fn finish(args: &FormatArgs, reports: &[CheckReport]) -> HandlerResult {
    print!("{}", args.format.reporter().report_checks(reports));
    if reports.iter().any(|r| r.outcome.is_failure()) {
        HandlerResult::FAILED
    } else {
        HandlerResult::Success
    }
}
