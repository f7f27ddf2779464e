use super::states::{self, NON_US_STATE_ABBREV, NON_US_STATE_FIPS};
use std::collections::BTreeMap;
use unicode_normalization::UnicodeNormalization;

/// Variables handed to the BNA scripts, sorted by name.
pub type BnaEnv = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInfo {
    pub abbrev: String,
    pub fips: String,
    /// Jobs data only exists for US states.
    pub run_import_jobs: bool,
}

/// Resolve a US state (or fall back to the non-US placeholders for anything
/// else, such as a country name).
pub fn derive_state_info(state: &str) -> StateInfo {
    match states::lookup(state) {
        Some((abbrev, fips)) => StateInfo {
            abbrev: abbrev.to_string(),
            fips: fips.to_string(),
            run_import_jobs: true,
        },
        None => StateInfo {
            abbrev: NON_US_STATE_ABBREV.to_string(),
            fips: NON_US_STATE_FIPS.to_string(),
            run_import_jobs: false,
        },
    }
}

/// Identity of the city being analyzed.
#[derive(Debug, Clone)]
pub struct City {
    pub name: String,
    pub state: String,
    pub country: String,
    pub fips: String,
}

impl City {
    pub fn new(name: &str, state: &str, country: &str, fips: &str) -> Self {
        City {
            name: name.to_string(),
            state: state.to_string(),
            country: country.to_string(),
            fips: fips.to_string(),
        }
    }

    /// Non-US cities are looked up by country.
    pub fn region(&self) -> &str {
        if self.state.is_empty() {
            &self.country
        } else {
            &self.state
        }
    }

    /// `<city>-<state>-<country>` with spaces dashed and dots dropped.
    pub fn normalized_name(&self) -> String {
        sanitize_name(&format!("{}-{}-{}", self.name, self.state, self.country))
    }
}

/// Base environment the modular scripts read their city settings from.
pub fn prepare_environment(city: &City, state: &StateInfo) -> BnaEnv {
    let city_fips = format!("{:0>7}", city.fips);
    let short_state = state.abbrev.to_lowercase();
    let run_import_jobs = if state.run_import_jobs { "1" } else { "0" };

    [
        ("BNA_CITY", city.name.as_str()),
        ("BNA_FULL_STATE", city.state.as_str()),
        ("BNA_CITY_FIPS", city_fips.as_str()),
        ("BNA_COUNTRY", city.country.as_str()),
        ("BNA_SHORT_STATE", short_state.as_str()),
        ("BNA_STATE_FIPS", state.fips.as_str()),
        ("RUN_IMPORT_JOBS", run_import_jobs),
        ("NB_COUNTRY", city.country.as_str()),
        ("PFB_CITY_FIPS", city_fips.as_str()),
        ("PFB_STATE_FIPS", state.fips.as_str()),
        ("PFB_STATE", short_state.as_str()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn to_ascii(value: &str) -> String {
    value.nfkd().filter(char::is_ascii).collect()
}

/// Make a place name safe for file names while keeping its case.
pub fn sanitize_name(value: &str) -> String {
    to_ascii(value).replace(' ', "-").replace('.', "")
}

/// Lowercased [`sanitize_name`], as the BNA scripts expect for values.
pub fn sanitize_value(value: &str) -> String {
    sanitize_name(value).to_lowercase()
}
