use std::path::PathBuf;

/// Runtime settings, built once in `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub script_dir: PathBuf,
    pub sample_dir: PathBuf,
    /// Number of `-v` flags: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub verbosity: u8,
    pub census_year: u16,
    /// Largest accepted score delta, in hundredths of a percent.
    pub delta_tolerance: i64,
    pub docker_image: String,
    pub container_name: String,
    pub speed_limit: u32,
    pub block_size: u32,
    pub block_population: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: PathBuf::from("."),
            script_dir: PathBuf::from("scripts"),
            sample_dir: PathBuf::from("tests/samples"),
            verbosity: 0,
            census_year: 2019,
            delta_tolerance: 10,
            docker_image: "azavea/pfb-network-connectivity:0.18.0".to_string(),
            container_name: "brokenspoke_analyzer".to_string(),
            speed_limit: 50,
            block_size: 500,
            block_population: 100,
        }
    }
}

impl Config {
    /// `root` resolved against the current directory. Child processes run
    /// with `root` as their working directory, so every path handed to them
    /// must be absolute.
    pub fn root_dir(&self) -> PathBuf {
        std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone())
    }

    pub fn script(&self, name: &str) -> PathBuf {
        self.root_dir().join(&self.script_dir).join(name)
    }

    pub fn city_dir(&self, city: &str, state: &str) -> PathBuf {
        self.root_dir()
            .join(&self.sample_dir)
            .join(format!("{}-{}", city, state))
    }

    pub fn modular_output_dir(&self, city: &str, state: &str) -> PathBuf {
        self.city_dir(city, state).join("modular-bna")
    }

    pub fn debug(&self) -> bool {
        self.verbosity > 0
    }
}
