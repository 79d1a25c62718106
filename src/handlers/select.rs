//! Target selection and version handlers.

use super::{HandlerResult, fail, load_context};
use crate::cli::{AddedArgs, Cli, TargetsArgs, VersionsArgs};
use crate::discovery::{GitDiff, ScanMode, TargetSetBuilder};
use crate::version::VersionRange;
use tracing::info;

/// Handle `targets`.
pub fn handle_targets(cli: &Cli, args: &TargetsArgs) -> HandlerResult {
    let context = match load_context(cli, args.full_scan) {
        Ok(context) => context,
        Err(e) => return fail(e),
    };

    let builder = TargetSetBuilder::new(&context, GitDiff::new(context.project_root()));
    let whitelist = args
        .whitelist
        .as_deref()
        .unwrap_or(&context.config().whitelist);
    let mode = ScanMode::from_full_scan(context.is_full_scan());
    info!(?mode, whitelist, "Selecting targets");

    match builder.build(mode, &args.types, whitelist) {
        Ok(targets) => {
            print!("{}", args.output.format.reporter().report_targets(&targets));
            HandlerResult::Success
        }
        Err(e) => fail(e),
    }
}

/// Handle `added`.
pub fn handle_added(cli: &Cli, args: &AddedArgs) -> HandlerResult {
    let context = match load_context(cli, false) {
        Ok(context) => context,
        Err(e) => return fail(e),
    };

    let builder = TargetSetBuilder::new(&context, GitDiff::new(context.project_root()));
    match builder.build_added(&args.types, args.blacklist.as_deref()) {
        Ok(targets) => {
            print!("{}", args.output.format.reporter().report_targets(&targets));
            HandlerResult::Success
        }
        Err(e) => fail(e),
    }
}

/// Handle `versions`. A manifest without a constraint is an error.
pub fn handle_versions(cli: &Cli, args: &VersionsArgs) -> HandlerResult {
    let context = match load_context(cli, false) {
        Ok(context) => context,
        Err(e) => return fail(e),
    };

    let manifest = args
        .manifest
        .as_ref()
        .map_or_else(|| context.manifest_path(), |m| context.project_root().join(m));
    let runtime = args.runtime.as_deref().unwrap_or(&context.config().runtime);

    match VersionRange::from_manifest(&manifest, runtime) {
        Ok(range) => {
            print!("{}", args.output.format.reporter().report_versions(&range));
            HandlerResult::Success
        }
        Err(e) => fail(e),
    }
}
