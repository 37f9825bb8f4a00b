//! Traceability log parsing
//!
//! A traceability cell is free text with one dated status entry per line, e.g.
//!
//! ```text
//! 14/05/2024 REPARTO (5 FOLIOS)
//! 20/06/24 - AL DESPACHO PARA FALLO
//! ```
//!
//! Parsing runs the [`AnomalyCorrector`], expands escaped `\n` sequences into
//! real line breaks, and turns every line that carries a date token into a
//! [`TraceEvent`]. Events come back newest first. Lines without a date token
//! are dropped; the result counts them in `dropped_lines`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, warn};

use crate::anomaly::AnomalyCorrector;
use crate::dates::{find_date_token, parse_calendar_date, short_display};
use crate::record::NOT_AVAILABLE;

/// Characters stripped between a date token and its description, besides whitespace
pub const SEPARATOR_CHARS: &[char] = &['-', '\u{2013}', '\u{2014}'];

/// Literal two-character escape some exports use instead of a line break
pub const ESCAPED_NEWLINE: &str = "\\n";

/// Sort key of events whose date is not a real calendar date
pub const SENTINEL_MIN_DATE: NaiveDate = NaiveDate::MIN;

static DEFAULT_PARSER: Lazy<TraceabilityParser> = Lazy::new(TraceabilityParser::default);

/// One dated entry of a traceability log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    /// Canonical `dd/mm/yyyy` date as written (after year normalization)
    pub display_date: String,
    /// Calendar date, or [`SENTINEL_MIN_DATE`]
    #[serde(skip)]
    pub sort_key: NaiveDate,
    pub description: String,
}

impl TraceEvent {
    /// Whether `display_date` is a real calendar date
    pub fn has_calendar_date(&self) -> bool {
        self.sort_key != SENTINEL_MIN_DATE
    }

    /// `dd/mm/yy` variant of the display date
    pub fn short_date(&self) -> String {
        short_display(&self.display_date)
    }
}

/// What the parser found in its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Field absent, blank, or the "not available" placeholder
    NoInput,
    /// Text present but no line carried a date token
    NoDatedLines,
    /// At least one event was produced
    Events,
}

/// Events of one traceability field, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceabilityResult {
    pub events: Vec<TraceEvent>,
    pub outcome: ParseOutcome,
    /// Non-blank lines skipped for lacking a date token
    pub dropped_lines: usize,
}

impl TraceabilityResult {
    fn no_input() -> Self {
        Self {
            events: Vec::new(),
            outcome: ParseOutcome::NoInput,
            dropped_lines: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Parser holding the correction table applied before line splitting
#[derive(Debug, Clone)]
pub struct TraceabilityParser {
    corrector: AnomalyCorrector,
}

impl Default for TraceabilityParser {
    fn default() -> Self {
        Self::new(AnomalyCorrector::builtin())
    }
}

impl TraceabilityParser {
    pub fn new(corrector: AnomalyCorrector) -> Self {
        Self { corrector }
    }

    pub fn corrector(&self) -> &AnomalyCorrector {
        &self.corrector
    }

    /// Parse a traceability field. Never fails: bad input yields fewer events.
    pub fn parse(&self, raw: Option<&str>) -> TraceabilityResult {
        let text = match raw {
            Some(text) if !is_placeholder(text) => text,
            _ => return TraceabilityResult::no_input(),
        };

        let corrected = self.corrector.correct(text);
        let normalized = corrected.replace(ESCAPED_NEWLINE, "\n");

        let mut events = Vec::new();
        let mut dropped_lines = 0;
        for line in normalized.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            match parse_line(line) {
                Some(event) => events.push(event),
                None => {
                    dropped_lines += 1;
                    debug!("Traceability line without date dropped: {:?}", line);
                }
            }
        }

        // Stable: equal dates keep their order of appearance
        events.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));

        let outcome = if events.is_empty() {
            ParseOutcome::NoDatedLines
        } else {
            ParseOutcome::Events
        };

        TraceabilityResult {
            events,
            outcome,
            dropped_lines,
        }
    }
}

/// Parse with the built-in correction table
pub fn parse_traceability(raw: Option<&str>) -> TraceabilityResult {
    DEFAULT_PARSER.parse(raw)
}

/// Build an event from one trimmed line, using its first date token
pub fn parse_line(line: &str) -> Option<TraceEvent> {
    let token = find_date_token(line)?;

    let description = line[token.end()..]
        .trim_start_matches(|c: char| c.is_whitespace() || SEPARATOR_CHARS.contains(&c))
        .trim_end()
        .to_string();

    let sort_key = match parse_calendar_date(&token.canonical) {
        Some(date) => date,
        None => {
            warn!(
                "Traceability date '{}' is not a calendar date, sorting as oldest",
                token.canonical
            );
            SENTINEL_MIN_DATE
        }
    };

    Some(TraceEvent {
        display_date: token.canonical,
        sort_key,
        description,
    })
}

fn is_placeholder(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == NOT_AVAILABLE
}
