//! Categorical recoding tables
//!
//! Every lookup trims the raw code and compares it case-insensitively. Codes
//! outside a table resolve to [`NOT_AVAILABLE`], except for countries, where an
//! unrecognized but present value is kept as-is after trimming.

use crate::domain::NOT_AVAILABLE;

const MARITAL_STATUS: &[(&str, &str)] = &[("S", "Single"), ("M", "Married")];

const GENDER: &[(&str, &str)] = &[("F", "Female"), ("M", "Male")];

const GENDER_WITH_LONG_FORM: &[(&str, &str)] = &[
    ("F", "Female"),
    ("FEMALE", "Female"),
    ("M", "Male"),
    ("MALE", "Male"),
];

const PRODUCT_LINE: &[(&str, &str)] = &[
    ("M", "Mountain"),
    ("R", "Road"),
    ("S", "Other Sales"),
    ("T", "Touring"),
];

fn recode(table: &[(&str, &'static str)], raw: Option<&str>) -> &'static str {
    let Some(code) = raw.map(str::trim) else {
        return NOT_AVAILABLE;
    };
    table
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(code))
        .map(|(_, to)| *to)
        .unwrap_or(NOT_AVAILABLE)
}

/// `S` → `Single`, `M` → `Married`
pub fn marital_status(raw: Option<&str>) -> &'static str {
    recode(MARITAL_STATUS, raw)
}

/// `F` → `Female`, `M` → `Male`
pub fn gender(raw: Option<&str>) -> &'static str {
    recode(GENDER, raw)
}

/// Like [`gender`], also accepting `FEMALE` and `MALE`
pub fn gender_with_long_form(raw: Option<&str>) -> &'static str {
    recode(GENDER_WITH_LONG_FORM, raw)
}

/// `M` → `Mountain`, `R` → `Road`, `S` → `Other Sales`, `T` → `Touring`
pub fn product_line(raw: Option<&str>) -> &'static str {
    recode(PRODUCT_LINE, raw)
}

/// Country names: `DE` → `Germany`, `US`/`USA` → `United States`.
///
/// Matching is exact on the trimmed value. Empty or missing values become
/// [`NOT_AVAILABLE`]; anything else is preserved trimmed.
pub fn country(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some("DE") => "Germany".to_string(),
        Some("US") | Some("USA") => "United States".to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("S"), "Single" ; "upper single")]
    #[test_case(Some("s"), "Single" ; "lower single")]
    #[test_case(Some(" s "), "Single" ; "padded single")]
    #[test_case(Some("M"), "Married" ; "married")]
    #[test_case(Some("D"), "n/a" ; "divorced is unknown")]
    #[test_case(Some(""), "n/a" ; "empty")]
    #[test_case(None, "n/a" ; "missing")]
    fn test_marital_status(raw: Option<&str>, expected: &str) {
        assert_eq!(marital_status(raw), expected);
    }

    #[test_case(Some("F"), "Female" ; "female")]
    #[test_case(Some(" m"), "Male" ; "padded male")]
    #[test_case(Some("Female"), "n/a" ; "long form not accepted")]
    #[test_case(None, "n/a" ; "missing")]
    fn test_gender(raw: Option<&str>, expected: &str) {
        assert_eq!(gender(raw), expected);
    }

    #[test_case(Some("Female"), "Female" ; "long female")]
    #[test_case(Some(" MALE "), "Male" ; "long male padded")]
    #[test_case(Some("f"), "Female" ; "short female")]
    #[test_case(Some("X"), "n/a" ; "unknown")]
    fn test_gender_with_long_form(raw: Option<&str>, expected: &str) {
        assert_eq!(gender_with_long_form(raw), expected);
    }

    #[test_case(Some("M"), "Mountain" ; "mountain")]
    #[test_case(Some("r "), "Road" ; "road")]
    #[test_case(Some("S"), "Other Sales" ; "other sales")]
    #[test_case(Some("T"), "Touring" ; "touring")]
    #[test_case(Some("X"), "n/a" ; "unknown")]
    #[test_case(None, "n/a" ; "missing")]
    fn test_product_line(raw: Option<&str>, expected: &str) {
        assert_eq!(product_line(raw), expected);
    }

    #[test_case(Some("DE"), "Germany" ; "germany")]
    #[test_case(Some(" US"), "United States" ; "us")]
    #[test_case(Some("USA "), "United States" ; "usa")]
    #[test_case(Some("   "), "n/a" ; "blank")]
    #[test_case(None, "n/a" ; "missing")]
    #[test_case(Some(" Australia "), "Australia" ; "preserved trimmed")]
    #[test_case(Some("de"), "de" ; "exact match only")]
    fn test_country(raw: Option<&str>, expected: &str) {
        assert_eq!(country(raw), expected);
    }
}
