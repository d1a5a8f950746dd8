mod config;
mod error;
mod logging;
mod output;
mod pipeline;
mod services;
mod theme;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config::{Overrides, Settings};

/// Convert jj's terminal color scheme into Zed semantic token rules.
#[derive(Debug, Parser)]
#[command(name = "jjcolors", version, about)]
struct Cli {
    /// Settings file (default: <config dir>/jjcolors/settings.json if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory to write colors.json and semantic_token_rules.json into
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Repository to read repo-level color overrides from
    #[arg(long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// jj executable
    #[arg(long, value_name = "PROGRAM")]
    jj: Option<String>,

    /// Config table to read colors from
    #[arg(long, value_name = "NAME")]
    namespace: Option<String>,

    /// Print the raw color map to stdout
    #[arg(long)]
    print_colors: bool,

    /// Build everything but do not write any file
    #[arg(long)]
    dry_run: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> error::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?.apply(Overrides {
        jj_program: cli.jj,
        namespace: cli.namespace,
        repo: cli.repo,
        output_dir: cli.out_dir,
    });

    let summary = pipeline::run(&settings, cli.dry_run)?;

    if cli.print_colors {
        println!("{}", summary.rendered.colors);
    }
    if cli.dry_run {
        println!(
            "Would write {} token rules from {} scopes to {}",
            summary.rendered.rule_count,
            summary.scope_count,
            summary.paths.rules.display()
        );
    } else {
        println!(
            "Wrote {} token rules to {}",
            summary.rendered.rule_count,
            summary.paths.rules.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(category = err.category(), "conversion failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
