//! Named, ordered cleaning rules for product labels and numeric cells.
//!
//! Each dataset quirk is a separate [`TextRule`] so a new quirk is a new entry
//! in a [`RuleChain`], not a change to the parsing code.

use std::borrow::Cow;

use regex::Regex;

use super::string_ops;
use crate::{
    config::DashboardConfig,
    error::{PipelineError, PipelineResult},
};

/// Cell contents treated as "no value" in addition to empty cells. Matching
/// is exact: whitespace-only or padded cells are ordinary values.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    value.is_empty() || NULL_TOKENS.contains(&value)
}

#[derive(Debug, Clone)]
pub enum TextRule {
    /// Replaces empty or null-token cells with `fallback`.
    FillMissing { fallback: String },
    RegexReplace { regex: Regex, replacement: String },
    /// Drops everything except ASCII digits, `,` and `.`.
    RetainNumericChars,
    /// Removes thousands separators, leaving at most one decimal separator.
    DropGroupSeparators,
    ReplaceChar { from: char, to: char },
}

impl TextRule {
    pub fn regex_replace(pattern: &str, replacement: &str) -> PipelineResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| PipelineError::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(TextRule::RegexReplace {
            regex,
            replacement: replacement.to_string(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextRule::FillMissing { .. } => "fill-missing",
            TextRule::RegexReplace { .. } => "regex-replace",
            TextRule::RetainNumericChars => "retain-numeric-chars",
            TextRule::DropGroupSeparators => "drop-group-separators",
            TextRule::ReplaceChar { .. } => "replace-char",
        }
    }

    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            TextRule::FillMissing { fallback } => {
                if is_missing(value) {
                    Cow::Owned(fallback.clone())
                } else {
                    Cow::Borrowed(value)
                }
            }
            TextRule::RegexReplace { regex, replacement } => {
                string_ops::regex_replace(value, regex, replacement)
            }
            TextRule::RetainNumericChars => {
                string_ops::retain_chars(value, |ch| ch.is_ascii_digit() || ch == ',' || ch == '.')
            }
            TextRule::DropGroupSeparators => drop_group_separators(value),
            TextRule::ReplaceChar { from, to } => string_ops::replace_char(value, *from, *to),
        }
    }
}

/// With both `,` and `.` present the later one is the decimal mark and the
/// other is grouping. A single kind occurring more than once is grouping.
fn drop_group_separators(value: &str) -> Cow<'_, str> {
    let last_comma = value.rfind(',');
    let last_period = value.rfind('.');
    let grouping = match (last_comma, last_period) {
        (Some(comma), Some(period)) => Some(if comma > period { '.' } else { ',' }),
        (Some(_), None) if value.matches(',').count() > 1 => Some(','),
        (None, Some(_)) if value.matches('.').count() > 1 => Some('.'),
        _ => None,
    };
    match grouping {
        Some(separator) => string_ops::retain_chars(value, |ch| ch != separator),
        None => Cow::Borrowed(value),
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<TextRule>,
}

impl RuleChain {
    pub fn new(rules: Vec<TextRule>) -> Self {
        Self { rules }
    }

    pub fn with(mut self, rule: TextRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[TextRule] {
        &self.rules
    }

    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(value);
        for rule in &self.rules {
            let next = match rule.apply(&current) {
                Cow::Borrowed(unchanged) if unchanged.len() == current.len() => continue,
                changed => changed.into_owned(),
            };
            current = Cow::Owned(next);
        }
        current
    }
}

/// Fallback fill followed by the configured label rewrites, in order.
pub fn product_label_rules(config: &DashboardConfig) -> PipelineResult<RuleChain> {
    let mut chain = RuleChain::default().with(TextRule::FillMissing {
        fallback: config.unknown_product.clone(),
    });
    for spec in &config.label_rules {
        chain = chain.with(TextRule::regex_replace(&spec.pattern, &spec.replacement)?);
    }
    Ok(chain)
}

pub fn numeric_rules() -> RuleChain {
    RuleChain::new(vec![
        TextRule::RetainNumericChars,
        TextRule::DropGroupSeparators,
        TextRule::ReplaceChar { from: ',', to: '.' },
    ])
}
