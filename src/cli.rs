use crate::reporter::{JsonReporter, Reporter, TerminalReporter};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            Self::Text => Box::new(TerminalReporter::new()),
            Self::Json => Box::new(JsonReporter::new()),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "livecheck",
    version,
    about = "Select target files for static analysis and run the configured checks",
    long_about = "livecheck works out which files of a project a static-analysis run should \
cover: the changed files inside whitelisted locations, the whole whitelist in full-scan mode, \
or newly added files minus a blacklist. It then hands them to the configured analyzers."
)]
pub struct Cli {
    /// Project root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to .livecheck.{yaml,yml,json,toml} in the root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the files a whitelist-scoped check would run against
    Targets(TargetsArgs),

    /// Print newly added files minus a blacklist
    Added(AddedArgs),

    /// Print the target runtime version range from the manifest
    Versions(VersionsArgs),

    /// Check that newly added files declare strict types
    StrictTypes(FormatArgs),

    /// Run configured checks
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Accepted file extensions, comma separated
    #[arg(short = 't', long, value_delimiter = ',', default_value = "php")]
    pub types: Vec<String>,

    /// Select the whole whitelist instead of changed files
    #[arg(long)]
    pub full_scan: bool,

    /// Whitelist location relative to the suite directory
    #[arg(long)]
    pub whitelist: Option<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args, Debug)]
pub struct AddedArgs {
    /// Accepted file extensions, comma separated
    #[arg(short = 't', long, value_delimiter = ',', default_value = "php")]
    pub types: Vec<String>,

    /// Blacklist location relative to the suite directory
    #[arg(long)]
    pub blacklist: Option<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Manifest path relative to the project root
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Runtime package whose constraint is read
    #[arg(long)]
    pub runtime: Option<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Checks to run (all configured checks when omitted)
    pub names: Vec<String>,

    /// Run against the whole whitelist instead of changed files
    #[arg(long)]
    pub full_scan: bool,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_targets_defaults() {
        let cli = Cli::try_parse_from(["livecheck", "targets"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        match cli.command {
            Command::Targets(args) => {
                assert_eq!(args.types, vec!["php"]);
                assert!(!args.full_scan);
                assert!(args.whitelist.is_none());
                assert_eq!(args.output.format, OutputFormat::Text);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_comma_separated_types() {
        let cli = Cli::try_parse_from(["livecheck", "targets", "--types", "php,phtml,js"]).unwrap();
        let Command::Targets(args) = cli.command else {
            panic!("expected targets");
        };
        assert_eq!(args.types, vec!["php", "phtml", "js"]);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "livecheck",
            "added",
            "--root",
            "/srv/shop",
            "-v",
            "--blacklist",
            "_files/blacklist/strict_type.txt",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("/srv/shop"));
        assert!(cli.verbose);
        let Command::Added(args) = cli.command else {
            panic!("expected added");
        };
        assert_eq!(args.blacklist.as_deref(), Some("_files/blacklist/strict_type.txt"));
        assert_eq!(args.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_versions() {
        let cli = Cli::try_parse_from([
            "livecheck",
            "versions",
            "--manifest",
            "sub/composer.json",
            "--runtime",
            "php",
        ])
        .unwrap();
        let Command::Versions(args) = cli.command else {
            panic!("expected versions");
        };
        assert_eq!(args.manifest, Some(PathBuf::from("sub/composer.json")));
        assert_eq!(args.runtime.as_deref(), Some("php"));
    }

    #[test]
    fn test_parse_run_with_names() {
        let cli =
            Cli::try_parse_from(["livecheck", "run", "phpcs", "phpmd", "--full-scan"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.names, vec!["phpcs", "phpmd"]);
        assert!(args.full_scan);
    }

    #[test]
    fn test_parse_strict_types() {
        let cli = Cli::try_parse_from(["livecheck", "strict-types"]).unwrap();
        assert!(matches!(cli.command, Command::StrictTypes(_)));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["livecheck"]).is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Cli::try_parse_from(["livecheck", "targets", "--format", "sarif"]).is_err());
    }
}
