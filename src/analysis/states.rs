/// `(name, abbreviation, FIPS)` for the US states, DC and Puerto Rico.
const US_STATES: &[(&str, &str, &str)] = &[
    ("alabama", "AL", "01"),
    ("alaska", "AK", "02"),
    ("arizona", "AZ", "04"),
    ("arkansas", "AR", "05"),
    ("california", "CA", "06"),
    ("colorado", "CO", "08"),
    ("connecticut", "CT", "09"),
    ("delaware", "DE", "10"),
    ("district of columbia", "DC", "11"),
    ("florida", "FL", "12"),
    ("georgia", "GA", "13"),
    ("hawaii", "HI", "15"),
    ("idaho", "ID", "16"),
    ("illinois", "IL", "17"),
    ("indiana", "IN", "18"),
    ("iowa", "IA", "19"),
    ("kansas", "KS", "20"),
    ("kentucky", "KY", "21"),
    ("louisiana", "LA", "22"),
    ("maine", "ME", "23"),
    ("maryland", "MD", "24"),
    ("massachusetts", "MA", "25"),
    ("michigan", "MI", "26"),
    ("minnesota", "MN", "27"),
    ("mississippi", "MS", "28"),
    ("missouri", "MO", "29"),
    ("montana", "MT", "30"),
    ("nebraska", "NE", "31"),
    ("nevada", "NV", "32"),
    ("new hampshire", "NH", "33"),
    ("new jersey", "NJ", "34"),
    ("new mexico", "NM", "35"),
    ("new york", "NY", "36"),
    ("north carolina", "NC", "37"),
    ("north dakota", "ND", "38"),
    ("ohio", "OH", "39"),
    ("oklahoma", "OK", "40"),
    ("oregon", "OR", "41"),
    ("pennsylvania", "PA", "42"),
    ("rhode island", "RI", "44"),
    ("south carolina", "SC", "45"),
    ("south dakota", "SD", "46"),
    ("tennessee", "TN", "47"),
    ("texas", "TX", "48"),
    ("utah", "UT", "49"),
    ("vermont", "VT", "50"),
    ("virginia", "VA", "51"),
    ("washington", "WA", "53"),
    ("west virginia", "WV", "54"),
    ("wisconsin", "WI", "55"),
    ("wyoming", "WY", "56"),
    ("puerto rico", "PR", "72"),
];

pub const NON_US_STATE_ABBREV: &str = "ZZ";
pub const NON_US_STATE_FIPS: &str = "0";

/// Look up a US state by full name or postal abbreviation, case-insensitively.
pub fn lookup(state: &str) -> Option<(&'static str, &'static str)> {
    let needle = state.trim().to_lowercase();
    US_STATES
        .iter()
        .find(|(name, abbrev, _)| *name == needle || abbrev.eq_ignore_ascii_case(&needle))
        .map(|(_, abbrev, fips)| (*abbrev, *fips))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_abbreviation() {
        assert_eq!(lookup("texas"), Some(("TX", "48")));
        assert_eq!(lookup("Texas"), Some(("TX", "48")));
        assert_eq!(lookup("tx"), Some(("TX", "48")));
        assert_eq!(lookup("District of Columbia"), Some(("DC", "11")));
        assert_eq!(lookup("colorado"), Some(("CO", "08")));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup("spain"), None);
        assert_eq!(lookup(""), None);
    }
}
