use super::environment::sanitize_value;
use crate::config::Config;
use crate::models::{ScoreDelta, ScoreRecord};
use anyhow::{Context, anyhow};
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SCORES_FILE: &str = "neighborhood_overall_scores.csv";

/// Mileage totals are not validated yet.
const SKIPPED_SCORES: &[&str] = &["total_miles_low_stress", "total_miles_high_stress"];

/// Scores of both pipelines joined on `score_id`, in modular file order.
#[derive(Debug, Clone, Default)]
pub struct ScoreComparison {
    pub rows: Vec<ScoreDelta>,
}

impl ScoreComparison {
    pub fn from_records(modular: Vec<ScoreRecord>, original: Vec<ScoreRecord>) -> Self {
        let original: HashMap<String, Option<f64>> = original
            .into_iter()
            .map(|r| (r.score_id, r.score_normalized))
            .collect();

        let rows = modular
            .into_iter()
            .filter(|r| !SKIPPED_SCORES.contains(&r.score_id.as_str()))
            .filter_map(|r| {
                let modular = r.score_normalized?;
                let original = (*original.get(&r.score_id)?)?;
                Some(ScoreDelta::new(r.score_id, modular, original))
            })
            .collect();

        ScoreComparison { rows }
    }

    pub fn outliers(&self, tolerance: i64) -> Vec<&ScoreDelta> {
        self.rows.iter().filter(|r| !r.is_within(tolerance)).collect()
    }

    pub fn within(&self, tolerance: i64) -> bool {
        self.rows.iter().all(|r| r.is_within(tolerance))
    }

    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut wtr = WriterBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("cannot write {}", path.display()))?;
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

pub fn read_scores(path: &Path) -> anyhow::Result<Vec<ScoreRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let records = rdr
        .deserialize::<ScoreRecord>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("malformed scores in {}", path.display()))?;
    debug!("{} scores read from {}", records.len(), path.display());
    Ok(records)
}

/// The reference analyzer writes into a timestamped `local-analysis-*` folder;
/// pick the first one (by name) that holds a scores file.
pub fn find_original_scores(city_dir: &Path) -> anyhow::Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(city_dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_name() == SCORES_FILE)
        .filter(|e| {
            e.path()
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                .map(|name| name.starts_with("local-analysis-"))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    if candidates.len() > 1 {
        warn!(
            "⚠️ {} reference analyses found in {}, using the first",
            candidates.len(),
            city_dir.display()
        );
    }
    if candidates.is_empty() {
        return Err(anyhow!(
            "no local-analysis-*/{} under {}",
            SCORES_FILE,
            city_dir.display()
        ));
    }
    Ok(candidates.swap_remove(0))
}

/// Compare the scores of both pipelines for a city and export the deltas to
/// `compare-<city>-<state>.csv` next to the inputs, with both names sanitized.
pub fn compare(config: &Config, city: &str, state: &str) -> anyhow::Result<ScoreComparison> {
    let city_dir = config.city_dir(city, state);
    let modular = read_scores(&config.modular_output_dir(city, state).join(SCORES_FILE))?;
    let original = read_scores(&find_original_scores(&city_dir)?)?;

    let comparison = ScoreComparison::from_records(modular, original);
    let export = city_dir.join(format!(
        "compare-{}-{}.csv",
        sanitize_value(city),
        sanitize_value(state)
    ));
    comparison.write_csv(&export)?;
    println!("📄 Deltas written to {}", export.display());

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MODULAR: &str = "\
score_id,score_original,score_normalized,human_explanation
people,0.5,0.4512,
opportunity,0.3,0.3000,
total_miles_low_stress,12.5,12.5,
total_miles_high_stress,30.1,30.1,
recreation,,,
overall_score,0.4,0.4021,
";

    const ORIGINAL: &str = "\
score_id,score_original,score_normalized,human_explanation
overall_score,0.4,0.3987,
people,0.5,0.4420,
opportunity,0.3,0.2905,
recreation,0.1,0.1000,
total_miles_low_stress,10.0,10.0,
";

    fn write_samples(config: &Config) {
        let out = config.modular_output_dir("crested butte", "colorado");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join(SCORES_FILE), MODULAR).unwrap();

        let reference = config
            .city_dir("crested butte", "colorado")
            .join("local-analysis-2024-01-01");
        fs::create_dir_all(&reference).unwrap();
        fs::write(reference.join(SCORES_FILE), ORIGINAL).unwrap();
    }

    #[test]
    fn test_join_on_score_id() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        write_samples(&config);

        let comparison = compare(&config, "crested butte", "colorado").unwrap();
        let ids: Vec<_> = comparison.rows.iter().map(|r| r.score_id.as_str()).collect();
        assert_eq!(ids, ["people", "opportunity", "overall_score"]);

        let deltas: Vec<_> = comparison.rows.iter().map(|r| r.delta).collect();
        assert_eq!(deltas, [1, 1, 1]);
        assert!(comparison.within(config.delta_tolerance));

        let export = config
            .city_dir("crested butte", "colorado")
            .join("compare-crested-butte-colorado.csv");
        let written = fs::read_to_string(export).unwrap();
        assert!(written.starts_with("score_id,modular,original,delta\n"));
        assert!(written.contains("people,0.4512,0.442,1\n"));
    }

    #[test]
    fn test_outliers() {
        let comparison = ScoreComparison {
            rows: vec![
                ScoreDelta::new("people", 0.50, 0.45),
                ScoreDelta::new("transit", 0.20, 0.45),
            ],
        };
        assert!(!comparison.within(10));
        let outliers = comparison.outliers(10);
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].score_id, "transit");
        assert_eq!(outliers[0].delta, -25);
    }

    #[test]
    fn test_missing_reference_analysis() {
        let dir = TempDir::new().unwrap();
        let err = find_original_scores(dir.path()).unwrap_err();
        assert!(err.to_string().contains("local-analysis-"));
    }

    #[test]
    fn test_other_folders_are_ignored() {
        let dir = TempDir::new().unwrap();
        let modular = dir.path().join("modular-bna");
        fs::create_dir_all(&modular).unwrap();
        fs::write(modular.join(SCORES_FILE), MODULAR).unwrap();
        let reference = dir.path().join("local-analysis-b");
        fs::create_dir_all(&reference).unwrap();
        fs::write(reference.join(SCORES_FILE), ORIGINAL).unwrap();

        assert_eq!(
            find_original_scores(dir.path()).unwrap(),
            reference.join(SCORES_FILE)
        );
    }
}
