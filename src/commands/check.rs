//! Check every package below a path

use licheck::adapters::{BuiltinCatalog, HeuristicScanner};
use licheck::config::Config;
use licheck::core::services::evaluate;
use licheck::output::{OutputMode, RunReport};
use licheck::package::find_packages;
use licheck::pipeline::{PackageReport, Pipeline};

use crate::cli::Cli;

/// Run all checks and print the report, returning the exit code
pub fn check(cli: &Cli, mode: OutputMode) -> anyhow::Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let policy = config.policy(cli.policy());

    let packages = find_packages(&cli.path)?;
    log::info!("Found {} package(s) in {}", packages.len(), cli.path.display());

    let scanner = HeuristicScanner::new();
    let catalog = BuiltinCatalog::new();
    log::debug!("Using SPDX license list {}", BuiltinCatalog::list_version());
    let pipeline = Pipeline::new(&scanner, &catalog, config.scan.ignore.clone());

    let reports = packages
        .iter()
        .map(|p| pipeline.check(p, cli.generate_copyright_file))
        .collect::<Result<Vec<PackageReport>, _>>()?;

    let verdict = evaluate(reports.iter().flat_map(|r| &r.results), policy);
    RunReport::new(reports, policy, verdict).render(mode, cli.verbosity());

    Ok(verdict.exit_code)
}
