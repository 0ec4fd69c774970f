use crate::config::KeeperConfig;
use crate::error::{KeeperError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// The state a book is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookState {
    Reading,
    Finished,
    Dropped,
    /// No longer being read, but the reader might return to it
    Suspended,
    #[serde(rename = "re-reading")]
    Rereading,
}

impl BookState {
    pub const ALL: [BookState; 5] = [
        BookState::Reading,
        BookState::Finished,
        BookState::Dropped,
        BookState::Suspended,
        BookState::Rereading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookState::Reading => "reading",
            BookState::Finished => "finished",
            BookState::Dropped => "dropped",
            BookState::Suspended => "suspended",
            BookState::Rereading => "re-reading",
        }
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookState {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self> {
        BookState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| KeeperError::InvalidState(s.to_string()))
    }
}

/// Case-sensitive membership check against the known states.
pub fn validate_state(s: &str) -> Result<BookState> {
    s.parse()
}

/// A single book with everything we track about it.
///
/// `id` belongs to the store: it is assigned when the entry is added and any
/// value set beforehand is overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub state: BookState,
}

impl BookEntry {
    pub fn new(title: impl Into<String>, author: impl Into<String>, state: BookState) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            date_start: None,
            date_end: None,
            state,
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }
}

/// Result of reading a date from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// The user typed the unspecified token
    Unspecified,
    Date(NaiveDate),
}

impl DateInput {
    pub fn into_option(self) -> Option<NaiveDate> {
        match self {
            DateInput::Unspecified => None,
            DateInput::Date(d) => Some(d),
        }
    }
}

/// Parses a date typed by the user.
///
/// - starts with the unspecified token → [`DateInput::Unspecified`]
/// - empty → `today`
/// - anything else must match `config.date_format` exactly
pub fn parse_date_input(raw: &str, today: NaiveDate, config: &KeeperConfig) -> Result<DateInput> {
    let raw = raw.trim();

    if raw.starts_with(config.unspecified_token.as_str()) {
        return Ok(DateInput::Unspecified);
    }
    if raw.is_empty() {
        return Ok(DateInput::Date(today));
    }

    let date = NaiveDate::parse_from_str(raw, &config.date_format)
        .map_err(|_| KeeperError::InvalidDateFormat(raw.to_string()))?;

    // chrono accepts unpadded fields; require the input to be in canonical form
    if format_date(date, &config.date_format).as_deref() != Some(raw) {
        return Err(KeeperError::InvalidDateFormat(raw.to_string()));
    }

    Ok(DateInput::Date(date))
}

/// Formats `date`, or `None` if `format` is not a valid chrono format string.
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Trimmed, non-empty text.
pub fn parse_required_text(raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(KeeperError::InvalidInput("This field cannot be empty".into()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn parse(raw: &str) -> Result<DateInput> {
        parse_date_input(raw, today(), &KeeperConfig::default())
    }

    #[test]
    fn sentinel_prefix_is_unspecified() {
        assert_eq!(parse("???").unwrap(), DateInput::Unspecified);
        assert_eq!(parse("???x").unwrap(), DateInput::Unspecified);
        assert_eq!(parse("  ???  ").unwrap(), DateInput::Unspecified);
    }

    #[test]
    fn empty_is_today() {
        assert_eq!(parse("").unwrap(), DateInput::Date(today()));
        assert_eq!(parse("   ").unwrap(), DateInput::Date(today()));
    }

    #[test]
    fn valid_date_parses() {
        assert_eq!(
            parse("31-01-2020").unwrap(),
            DateInput::Date(NaiveDate::from_ymd_opt(2020, 1, 31).unwrap())
        );
        assert_eq!(
            parse("29-02-2020").unwrap(),
            DateInput::Date(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap())
        );
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        assert!(matches!(
            parse("31-02-2020"),
            Err(KeeperError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            parse("29-02-2021"),
            Err(KeeperError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn non_canonical_dates_are_rejected() {
        for raw in ["1-2-2020", "01-2-2020", "2020-01-31", "01/02/2020", "31-01-20", "soon"] {
            assert!(
                matches!(parse(raw), Err(KeeperError::InvalidDateFormat(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn sentinel_follows_config() {
        let config = KeeperConfig {
            unspecified_token: "-".to_string(),
            ..KeeperConfig::default()
        };
        assert_eq!(
            parse_date_input("-", today(), &config).unwrap(),
            DateInput::Unspecified
        );
        assert!(parse_date_input("???", today(), &config).is_err());
    }

    #[test]
    fn state_validation() {
        assert_eq!(validate_state("reading").unwrap(), BookState::Reading);
        assert_eq!(validate_state("re-reading").unwrap(), BookState::Rereading);
        assert!(matches!(
            validate_state("rdng"),
            Err(KeeperError::InvalidState(_))
        ));
        assert!(validate_state("Reading").is_err());
        assert!(validate_state(" reading").is_err());
    }

    #[test]
    fn state_serializes_as_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookState::Rereading).unwrap(),
            "\"re-reading\""
        );
        for state in BookState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }

    #[test]
    fn required_text() {
        assert_eq!(parse_required_text("  Dune ").unwrap(), "Dune");
        assert!(matches!(
            parse_required_text("   "),
            Err(KeeperError::InvalidInput(_))
        ));
    }

    #[test]
    fn unspecified_dates_serialize_as_null() {
        let book = BookEntry::new("Dune", "Herbert", BookState::Reading);
        let json = serde_json::to_value(&book).unwrap();
        assert!(json["date_start"].is_null());
        assert_eq!(json["state"], "reading");
    }
}
