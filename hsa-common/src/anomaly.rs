//! Correction table for known data-entry defects in traceability logs
//!
//! The upstream workbook has a handful of recurring entry mistakes that would
//! otherwise render wrong. Each one is registered here as an exact-match rewrite
//! rule. Rules run in table order over the whole raw text, before it is split
//! into lines. Only registered rules fire.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::Result;

/// Static description of a correction rule
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    /// Stable rule identifier, used in logs
    pub name: &'static str,
    /// Trigger pattern (matched case-insensitively)
    pub pattern: &'static str,
    /// Replacement text; `${1}` etc. refer to capture groups of `pattern`
    pub replacement: &'static str,
    /// Rule only fires when this pattern occurs nowhere in the text
    pub unless_present: Option<&'static str>,
}

/// Registered anomalies.
///
/// The 14/05/2024 reparto entry was recorded without its `REPARTO` keyword
/// between the date and the page-count marker.
///
/// The year group is `(?:20)?24` so the short `14/05/24` form is caught too;
/// a bare `20?24` would accept `14/05/224` and miss `14/05/24`.
pub const KNOWN_ANOMALIES: &[RuleSpec] = &[
    RuleSpec {
        name: "reparto-folios",
        pattern: r"(14/05/(?:20)?24)\s*\(?5 FOLIOS\)?",
        replacement: "${1} REPARTO (5 FOLIOS)",
        unless_present: None,
    },
    RuleSpec {
        name: "reparto-folios-spacing",
        pattern: r"(14/05/(?:20)?24)(\s*)\(?5 FOLIOS\)?",
        replacement: "${1} REPARTO (5 FOLIOS)",
        unless_present: Some(r"REPARTO"),
    },
];

static BUILTIN: Lazy<AnomalyCorrector> = Lazy::new(|| {
    AnomalyCorrector::from_specs(KNOWN_ANOMALIES).expect("built-in anomaly rules compile")
});

fn case_insensitive(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// One compiled rewrite rule
#[derive(Debug, Clone)]
pub struct CorrectionRule {
    name: String,
    pattern: Regex,
    replacement: String,
    unless_present: Option<Regex>,
}

impl CorrectionRule {
    /// Compile a rule. Patterns are always case-insensitive.
    pub fn new(name: &str, pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            pattern: case_insensitive(pattern)?,
            replacement: replacement.to_string(),
            unless_present: None,
        })
    }

    /// Restrict the rule to texts where `guard` does not occur anywhere
    pub fn unless_present(mut self, guard: &str) -> Result<Self> {
        self.unless_present = Some(case_insensitive(guard)?);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the rule, borrowing the input when nothing changes
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if let Some(guard) = &self.unless_present {
            if guard.is_match(text) {
                return Cow::Borrowed(text);
            }
        }
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

impl TryFrom<&RuleSpec> for CorrectionRule {
    type Error = crate::Error;

    fn try_from(spec: &RuleSpec) -> Result<Self> {
        let rule = CorrectionRule::new(spec.name, spec.pattern, spec.replacement)?;
        match spec.unless_present {
            Some(guard) => rule.unless_present(guard),
            None => Ok(rule),
        }
    }
}

/// Ordered table of correction rules
#[derive(Debug, Clone, Default)]
pub struct AnomalyCorrector {
    rules: Vec<CorrectionRule>,
}

impl AnomalyCorrector {
    pub fn new(rules: Vec<CorrectionRule>) -> Self {
        Self { rules }
    }

    /// Compile a rule table
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(CorrectionRule::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Corrector loaded with [`KNOWN_ANOMALIES`]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }

    /// Run every rule in order over `text`.
    ///
    /// ```
    /// use hsa_common::anomaly::AnomalyCorrector;
    ///
    /// let corrector = AnomalyCorrector::builtin();
    /// assert_eq!(
    ///     corrector.correct("14/05/2024 (5 FOLIOS)"),
    ///     "14/05/2024 REPARTO (5 FOLIOS)"
    /// );
    /// ```
    pub fn correct<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);
        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = rewritten {
                debug!("Correction rule '{}' applied", rule.name());
                current = Cow::Owned(s);
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_missing_keyword() {
        let corrector = AnomalyCorrector::builtin();
        let text = "20/06/2024 AL DESPACHO\n14/05/2024 (5 FOLIOS)";
        assert_eq!(
            corrector.correct(text),
            "20/06/2024 AL DESPACHO\n14/05/2024 REPARTO (5 FOLIOS)"
        );
    }

    #[test]
    fn test_irregular_spacing_and_missing_parens() {
        let corrector = AnomalyCorrector::builtin();
        assert_eq!(
            corrector.correct("14/05/2024   5 folios"),
            "14/05/2024 REPARTO (5 FOLIOS)"
        );
        assert_eq!(
            corrector.correct("14/05/2024(5 FOLIOS)"),
            "14/05/2024 REPARTO (5 FOLIOS)"
        );
    }

    #[test]
    fn test_two_digit_year_variant() {
        let corrector = AnomalyCorrector::builtin();
        assert_eq!(
            corrector.correct("14/05/24 (5 FOLIOS)"),
            "14/05/24 REPARTO (5 FOLIOS)"
        );
    }

    #[test]
    fn test_three_digit_year_not_a_trigger() {
        let corrector = AnomalyCorrector::builtin();
        let text = "14/05/224 (5 FOLIOS)";
        assert_eq!(corrector.correct(text), text);
    }

    #[test]
    fn test_already_correct_text_is_borrowed() {
        let corrector = AnomalyCorrector::builtin();
        let text = "14/05/2024 REPARTO (5 FOLIOS)";
        assert!(matches!(corrector.correct(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_other_dates_untouched() {
        let corrector = AnomalyCorrector::builtin();
        let text = "15/05/2024 (5 FOLIOS)";
        assert_eq!(corrector.correct(text), text);
    }

    #[test]
    fn test_guard_blocks_rule() {
        let rule = CorrectionRule::new("x", r"foo", "bar")
            .unwrap()
            .unless_present(r"keep")
            .unwrap();
        assert_eq!(rule.apply("foo"), "bar");
        assert_eq!(rule.apply("foo KEEP"), "foo KEEP");
    }

    #[test]
    fn test_rules_run_in_order() {
        let corrector = AnomalyCorrector::new(vec![
            CorrectionRule::new("a", "alpha", "beta").unwrap(),
            CorrectionRule::new("b", "beta", "gamma").unwrap(),
        ]);
        assert_eq!(corrector.correct("ALPHA"), "gamma");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = CorrectionRule::new("broken", r"(unclosed", "x");
        assert!(matches!(result, Err(crate::Error::InvalidPattern(_))));
    }

    #[test]
    fn test_empty_table_is_identity() {
        let corrector = AnomalyCorrector::default();
        assert_eq!(corrector.correct("14/05/2024 (5 FOLIOS)"), "14/05/2024 (5 FOLIOS)");
    }
}
