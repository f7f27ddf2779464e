use super::compare::{ScoreComparison, compare};
use super::environment::{BnaEnv, City, derive_state_info, prepare_environment};
use crate::config::Config;
use crate::geometry::utm::get_srid;
use crate::models::{Srid, Step};
use crate::traits::PipelineRunner;
use anyhow::Context;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// SRID the input OSM/census data is declared in.
const NB_INPUT_SRID: &str = "4236";
const STATE_DEFAULT: &str = "30";

/// Files and environment of one modular BNA run.
#[derive(Debug, Clone)]
pub struct ModularPlan {
    pub city_dir: PathBuf,
    pub boundary_file: PathBuf,
    pub osm_file: PathBuf,
    pub output_dir: PathBuf,
    pub run_import_jobs: bool,
    pub env: BnaEnv,
}

impl ModularPlan {
    pub fn new(config: &Config, city: &City) -> Self {
        let city_dir = config.city_dir(&city.name, &city.state);
        let data_file = city_dir.join(city.normalized_name());
        let boundary_file = data_file.with_extension("shp");
        let osm_file = data_file.with_extension("osm");
        let output_dir = config.modular_output_dir(&city.name, &city.state);

        let state = derive_state_info(city.region());
        let mut env = prepare_environment(city, &state);
        let extra = [
            ("CENSUS_YEAR", config.census_year.to_string()),
            ("CITY_DEFAULT", "NULL".to_string()),
            ("NB_INPUT_SRID", NB_INPUT_SRID.to_string()),
            ("STATE_DEFAULT", STATE_DEFAULT.to_string()),
            ("PFB_DEBUG", if config.debug() { "1" } else { "0" }.to_string()),
            ("NB_BOUNDARY_FILE", boundary_file.display().to_string()),
            ("NB_TEMPDIR", city_dir.display().to_string()),
        ];
        env.extend(extra.into_iter().map(|(k, v)| (k.to_string(), v)));

        ModularPlan {
            city_dir,
            boundary_file,
            osm_file,
            output_dir,
            run_import_jobs: state.run_import_jobs,
            env,
        }
    }

    pub fn with_output_srid(mut self, srid: &Srid) -> Self {
        self.env.insert("NB_OUTPUT_SRID".to_string(), srid.to_string());
        self
    }

    /// Import and compute scripts, in execution order.
    pub fn compute_steps(&self, config: &Config) -> Vec<Step> {
        let step =
            |label: &str, script: &str| Step::new(label, config.script(script)).envs(&self.env);

        let mut steps = vec![
            step("Setup database", "01-setup_database.sh"),
            step("Import neighborhood", "21-import_neighborhood.sh"),
        ];
        if self.run_import_jobs {
            steps.push(step("Import jobs", "22-import_jobs.sh"));
        }
        steps.push(
            step("Import OSM", "23-import_osm.sh").arg(self.osm_file.display().to_string()),
        );
        steps.push(step("Compute features", "30-compute-features.sh"));
        steps.push(step("Compute stress", "31-compute-stress.sh"));
        steps.push(step("Compute connectivity", "32-compute-run-connectivity.sh"));
        steps
    }

    pub fn export_step(&self, config: &Config) -> Step {
        Step::new("Export connectivity", config.script("40-export-export_connectivity.sh"))
            .envs(&self.env)
            .arg(self.output_dir.display().to_string())
    }
}

/// Invocation of the reference analyzer CLI with the analysis settings.
fn analyzer_step(label: &str, command: &str, config: &Config) -> Step {
    Step::new(label, "bna")
        .arg(command)
        .arg("--speed-limit")
        .arg(config.speed_limit.to_string())
        .arg("--block-size")
        .arg(config.block_size.to_string())
        .arg("--block-population")
        .arg(config.block_population.to_string())
}

fn with_city(step: Step, city: &City, city_dir: &Path) -> Step {
    step.arg(&city.country)
        .arg(&city.state)
        .arg(&city.name)
        .arg(city_dir.display().to_string())
}

/// Download and prepare the input files with the reference analyzer CLI.
pub fn prepare_step(config: &Config, city: &City, city_dir: &Path) -> Step {
    with_city(analyzer_step("Prepare input files", "prepare", config), city, city_dir)
}

/// Run the full reference analysis in its container. It downloads the same
/// input files the modular scripts read, and writes its scores into a
/// `local-analysis-*` folder of `city_dir`.
pub fn reference_step(config: &Config, city: &City, city_dir: &Path) -> Step {
    let step = analyzer_step("Run reference analyzer", "run", config)
        .arg("--docker-image")
        .arg(&config.docker_image)
        .arg("--container-name")
        .arg(&config.container_name);
    with_city(step, city, city_dir)
}

/// Run the modular BNA for a city. Returns the SRID the scores were computed in.
pub async fn run_modular(
    config: &Config,
    runner: &dyn PipelineRunner,
    city: &City,
    prepare: bool,
) -> anyhow::Result<Srid> {
    let plan = ModularPlan::new(config, city);
    info!("Running modular BNA for {}", city.normalized_name());

    if prepare {
        runner.run(&prepare_step(config, city, &plan.city_dir)).await?;
    }

    let srid = get_srid(&plan.boundary_file).with_context(|| {
        format!(
            "cannot infer output SRID from {}",
            plan.boundary_file.display()
        )
    })?;
    println!("🧭 Output SRID: {}", srid);
    let plan = plan.with_output_srid(&srid);
    debug!("BNA environment: {:?}", plan.env);

    for step in plan.compute_steps(config) {
        runner.run(&step).await?;
    }

    if plan.output_dir.exists() {
        std::fs::remove_dir_all(&plan.output_dir)
            .with_context(|| format!("cannot clear {}", plan.output_dir.display()))?;
    }
    std::fs::create_dir_all(&plan.output_dir)
        .with_context(|| format!("cannot create {}", plan.output_dir.display()))?;
    runner.run(&plan.export_step(config)).await?;

    Ok(srid)
}

/// Run the reference analyzer, then the modular BNA on the inputs it
/// downloaded, and compare their scores. The city folder starts empty.
pub async fn run_comparison(
    config: &Config,
    runner: &dyn PipelineRunner,
    city: &City,
) -> anyhow::Result<ScoreComparison> {
    let city_dir = config.city_dir(&city.name, &city.state);
    if city_dir.exists() {
        std::fs::remove_dir_all(&city_dir)
            .with_context(|| format!("cannot clear {}", city_dir.display()))?;
    }
    let output_dir = config.modular_output_dir(&city.name, &city.state);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    runner.run(&reference_step(config, city, &city_dir)).await?;
    run_modular(config, runner, city, false).await?;
    compare(config, &city.name, &city.state)
}
