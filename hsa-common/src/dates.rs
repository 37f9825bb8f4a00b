//! Date token recognition and display formatting
//!
//! Traceability logs carry dates as `dd/mm/yyyy` or `dd/mm/yy`. Only these two
//! grammars are recognized. Tokens are not range-checked, so `31/13/2024` is a
//! valid token that later fails calendar parsing.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized date grammars, tried in order at each text position.
pub const DATE_GRAMMARS: &[&str] = &[
    r"[0-9]{2}/[0-9]{2}/[0-9]{4}",
    r"[0-9]{2}/[0-9]{2}/[0-9]{2}",
];

/// Century prefix for two-digit years (every `yy` maps into 2000-2099)
pub const TWO_DIGIT_YEAR_PREFIX: &str = "20";

const CANONICAL_FORMAT: &str = "%d/%m/%Y";
const SHORT_FORMAT: &str = "%d/%m/%y";

/// Cell date layouts accepted by [`format_cell_date`], in priority order
const CELL_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%d/%m/%Y"];

static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&DATE_GRAMMARS.join("|")).expect("built-in date grammars compile"));

/// A date token found in a text span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken {
    /// Byte offset of the match in the searched text
    pub start: usize,
    /// Byte length of the match as it appears in the source
    pub len: usize,
    /// Normalized `dd/mm/yyyy` form
    pub canonical: String,
}

impl DateToken {
    /// Byte offset just past the matched span
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Find the first date token in `text` and normalize it.
///
/// # Examples
///
/// ```
/// use hsa_common::dates::find_date_token;
///
/// let token = find_date_token("RADICADO 14/05/24 - reparto").unwrap();
/// assert_eq!(token.start, 9);
/// assert_eq!(token.len, 8);
/// assert_eq!(token.canonical, "14/05/2024");
///
/// assert!(find_date_token("sin fecha").is_none());
/// ```
pub fn find_date_token(text: &str) -> Option<DateToken> {
    let m = DATE_TOKEN.find(text)?;
    Some(DateToken {
        start: m.start(),
        len: m.len(),
        canonical: canonicalize(m.as_str()),
    })
}

/// Rewrite a `dd/mm/yy` token to `dd/mm/yyyy`; four-digit years pass through.
pub fn canonicalize(token: &str) -> String {
    let mut parts = token.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year)) if year.len() == 2 => {
            format!("{}/{}/{}{}", day, month, TWO_DIGIT_YEAR_PREFIX, year)
        }
        _ => token.to_string(),
    }
}

/// Parse a canonical `dd/mm/yyyy` string as a calendar date.
///
/// Returns `None` for impossible dates (`31/02/2024`, month 13, year 0).
pub fn parse_calendar_date(canonical: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(canonical, CANONICAL_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
}

/// Short `dd/mm/yy` display form of a canonical date.
///
/// Strings that are not valid calendar dates are returned unchanged.
///
/// ```
/// use hsa_common::dates::short_display;
///
/// assert_eq!(short_display("14/05/2024"), "14/05/24");
/// assert_eq!(short_display("31/13/2024"), "31/13/2024");
/// ```
pub fn short_display(canonical: &str) -> String {
    match parse_calendar_date(canonical) {
        Some(date) => date.format(SHORT_FORMAT).to_string(),
        None => canonical.to_string(),
    }
}

/// Normalize a spreadsheet date cell to `dd/mm/yyyy`.
///
/// Cells exported as `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` or `DD/MM/YYYY` are
/// reformatted. Anything else, including the "not available" placeholder, is
/// returned as-is.
pub fn format_cell_date(value: &str) -> String {
    CELL_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .map(|date| date.format(CANONICAL_FORMAT).to_string())
        .unwrap_or_else(|| value.to_string())
}
