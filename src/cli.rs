use crate::analysis::{City, ScoreComparison, compare, run_comparison, run_modular};
use crate::config::Config;
use crate::geometry::{get_bbox, srid_for_extent};
use crate::runner::ProcessRunner;
use crate::utils::summary::{print_comparison_summary, print_srid_summary};
use anyhow::bail;
use clap::{Parser, Subcommand};
use log::warn;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "modular-bna",
    version,
    about = "Run the modular BNA and compare it against the reference analyzer"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding `scripts/` and `tests/samples/`
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer the UTM SRID of a shapefile
    Srid {
        path: PathBuf,
        /// Print `NB_OUTPUT_SRID=<srid>` only, for shell `eval`
        #[arg(long)]
        export: bool,
    },
    /// Run an analysis with the modular BNA
    Run {
        city: String,
        state: String,
        country: String,
        city_fips: String,
        /// Prepare input files with the reference analyzer first
        #[arg(long)]
        prepare: bool,
    },
    /// Run the reference analyzer and the modular BNA, then compare their scores
    Validate {
        city: String,
        state: String,
        country: String,
        city_fips: String,
        /// Largest accepted delta, in hundredths of a percent
        #[arg(long)]
        tolerance: Option<i64>,
    },
    /// Compare modular scores against the reference analyzer output
    Compare {
        city: String,
        state: String,
        /// Largest accepted delta, in hundredths of a percent
        #[arg(long)]
        tolerance: Option<i64>,
    },
}

impl Cli {
    pub fn config(&self) -> Config {
        let config = Config {
            root: self.root.clone(),
            verbosity: self.verbose,
            ..Default::default()
        };
        Config {
            root: config.root_dir(),
            ..config
        }
    }
}

/// Scripts write to the terminal unless a spinner can replace them.
fn process_runner(config: &Config) -> ProcessRunner {
    let runner = ProcessRunner::new(config.root.clone());
    if std::io::stderr().is_terminal() && !config.debug() {
        runner.captured()
    } else {
        runner
    }
}

fn report(comparison: &ScoreComparison, tolerance: i64) -> anyhow::Result<()> {
    print_comparison_summary(comparison, tolerance);
    if comparison.rows.is_empty() {
        bail!("no common scores between the two analyses");
    }
    if !comparison.within(tolerance) {
        bail!(
            "{} of {} scores differ by more than {}",
            comparison.outliers(tolerance).len(),
            comparison.rows.len(),
            tolerance
        );
    }
    Ok(())
}

pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();

    match cli.command {
        Commands::Srid { path, export } => {
            let bbox = get_bbox(&path)?;
            let srid = srid_for_extent(&bbox)?;
            if export {
                println!("NB_OUTPUT_SRID={}", srid);
                return Ok(());
            }
            let projected = match bbox.project(&srid) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("cannot project extent into {}: {}", srid.to_epsg(), e);
                    None
                }
            };
            print_srid_summary(&bbox, &srid, projected.as_ref());
            println!("{}", srid);
        }
        Commands::Run {
            city,
            state,
            country,
            city_fips,
            prepare,
        } => {
            let city = City::new(&city, &state, &country, &city_fips);
            run_modular(&config, &process_runner(&config), &city, prepare).await?;
            println!("🚲 Modular BNA completed for {}", city.normalized_name());
        }
        Commands::Validate {
            city,
            state,
            country,
            city_fips,
            tolerance,
        } => {
            let city = City::new(&city, &state, &country, &city_fips);
            let comparison = run_comparison(&config, &process_runner(&config), &city).await?;
            report(&comparison, tolerance.unwrap_or(config.delta_tolerance))?;
        }
        Commands::Compare {
            city,
            state,
            tolerance,
        } => {
            let comparison = compare(&config, &city, &state)?;
            report(&comparison, tolerance.unwrap_or(config.delta_tolerance))?;
        }
    }
    Ok(())
}
