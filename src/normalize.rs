// 🧹 Name/Date Normalizer
// Canonical forms for free-text names, dates and coordinates.
//
// Every function here is pure and never fails: a value that cannot be
// normalized comes back as None and the caller decides what "absent" means.

use chrono::NaiveDate;

// ============================================================================
// NULL MARKERS
// ============================================================================

/// Exact (lower-cased) values the source uses to say "no value"
const NULL_MARKERS: &[&str] = &["", "none", "null", "nan", "0001-01-01", "0000-00-00"];

/// Substrings that mark a placeholder anywhere in the text
const PLACEHOLDER_FRAGMENTS: &[&str] = &["undetermined", "sin determinar"];

/// Names that are syntactically fine but never identify anyone
const BANNED_NAMES: &[&str] = &[
    "anónimo",
    "anonimo",
    "anonymous",
    "desconocido",
    "desconocida",
    "unknown",
    "varios",
    "varias",
    "various",
    "various artists",
    "otros",
    "others",
    "n/a",
    "n/d",
    "s/n",
    "sin nombre",
    "sin título",
    "sin titulo",
    "untitled",
    "-",
    "--",
    "?",
    "x",
];

/// Date format used by every date column of the snapshot
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// True when the raw value is one of the null markers
pub fn is_null_marker(raw: &str) -> bool {
    let lower = raw.trim().to_lowercase();
    NULL_MARKERS.contains(&lower.as_str())
        || PLACEHOLDER_FRAGMENTS.iter().any(|f| lower.contains(f))
}

// ============================================================================
// TEXT
// ============================================================================

/// Trim and collapse internal whitespace. None for null markers.
pub fn clean_text(raw: &str) -> Option<String> {
    if is_null_marker(raw) {
        return None;
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Canonical name: trimmed, whitespace-collapsed, title-cased.
///
/// `" ada   LOVELACE "` and `"Ada Lovelace"` both become `"Ada Lovelace"`.
pub fn clean_name(raw: &str) -> Option<String> {
    let text = clean_text(raw)?;
    Some(
        text.split(' ')
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn title_case_word(word: &str) -> String {
    word.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// True when a cleaned name is on the static banned list
pub fn is_banned(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    BANNED_NAMES.contains(&lower.as_str())
}

/// The name gate used for every primary entity: clean, then reject banned names.
pub fn valid_name(raw: &str) -> Option<String> {
    clean_name(raw).filter(|name| !is_banned(name))
}

// ============================================================================
// DATES & COORDINATES
// ============================================================================

/// Outcome of reading a date column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    /// Null marker or sentinel, with or without a time part
    Absent,
    /// Something was there but it is not a date
    Invalid,
    Valid(NaiveDate),
}

/// Read a `YYYY-MM-DD` date. A trailing time part (`" 00:00:00"` or
/// `"T00:00:00"`) is ignored, also when deciding whether it is a sentinel.
pub fn read_date(raw: &str) -> DateValue {
    let trimmed = raw.trim();
    if is_null_marker(trimmed) {
        return DateValue::Absent;
    }

    let date_part = trimmed
        .split(|c| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);

    if is_null_marker(date_part) {
        return DateValue::Absent;
    }

    match NaiveDate::parse_from_str(date_part, DATE_FORMAT) {
        Ok(date) => DateValue::Valid(date),
        Err(_) => DateValue::Invalid,
    }
}

/// The parsed date, if any. Sentinels and garbage give None.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    match read_date(raw) {
        DateValue::Valid(date) => Some(date),
        DateValue::Absent | DateValue::Invalid => None,
    }
}

/// Parse `"lat, lon"` (comma or semicolon separated) into a checked pair
pub fn parse_coordinates(raw: &str) -> Option<(f64, f64)> {
    if is_null_marker(raw) {
        return None;
    }

    let mut parts = raw.split(|c| c == ',' || c == ';').map(str::trim);
    let lat: f64 = parts.next()?.parse().ok()?;
    let lon: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_collapses_and_title_cases() {
        assert_eq!(clean_name(" Ada   Lovelace "), Some("Ada Lovelace".to_string()));
        assert_eq!(clean_name("ada lovelace"), Some("Ada Lovelace".to_string()));
        assert_eq!(clean_name("MUSEO DEL PRADO"), Some("Museo Del Prado".to_string()));
    }

    #[test]
    fn test_clean_name_handles_accents_and_hyphens() {
        assert_eq!(clean_name("ÁNGELES  santos"), Some("Ángeles Santos".to_string()));
        assert_eq!(clean_name("jean-paul riopelle"), Some("Jean-Paul Riopelle".to_string()));
    }

    #[test]
    fn test_null_markers_rejected() {
        assert_eq!(clean_name(""), None);
        assert_eq!(clean_name("   "), None);
        assert_eq!(clean_name("None"), None);
        assert_eq!(clean_name("Sin determinar"), None);
        assert_eq!(clean_name("Place undetermined"), None);
        assert_eq!(clean_name("0001-01-01"), None);
    }

    #[test]
    fn test_banned_names() {
        assert!(is_banned("Anónimo"));
        assert!(is_banned("VARIOS"));
        assert!(!is_banned("Ada Lovelace"));

        assert_eq!(valid_name("desconocido"), None);
        assert_eq!(valid_name("Maruja Mallo"), Some("Maruja Mallo".to_string()));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1980-06-15"), NaiveDate::from_ymd_opt(1980, 6, 15));
        assert_eq!(
            parse_date("1980-06-15 00:00:00"),
            NaiveDate::from_ymd_opt(1980, 6, 15)
        );
        assert_eq!(
            parse_date("1980-06-15T12:30:00"),
            NaiveDate::from_ymd_opt(1980, 6, 15)
        );
        assert_eq!(parse_date("0001-01-01"), None);
        assert_eq!(parse_date("15/06/1980"), None);
        assert_eq!(parse_date("1980-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("40.4138, -3.6921"), Some((40.4138, -3.6921)));
        assert_eq!(parse_coordinates("40.4138;-3.6921"), Some((40.4138, -3.6921)));
        assert_eq!(parse_coordinates("95.0, 10.0"), None);
        assert_eq!(parse_coordinates("north, west"), None);
        assert_eq!(parse_coordinates("1, 2, 3"), None);
        assert_eq!(parse_coordinates("none"), None);
    }

    #[test]
    fn test_read_date_separates_sentinel_from_garbage() {
        assert_eq!(read_date("0001-01-01 00:00:00"), DateValue::Absent);
        assert_eq!(read_date("0000-00-00T00:00:00"), DateValue::Absent);
        assert_eq!(read_date("  "), DateValue::Absent);
        assert_eq!(read_date("sometime in May"), DateValue::Invalid);
        assert_eq!(read_date("1980-13-45"), DateValue::Invalid);
        assert_eq!(
            read_date("1980-06-15 00:00:00"),
            DateValue::Valid(NaiveDate::from_ymd_opt(1980, 6, 15).unwrap())
        );
    }
}
