//! Token-level classification.
//!
//! A [`Word`] describes the numeric shape of one whitespace-delimited token:
//! plain numbers, currency, percentages, years, ranges, dates and measures.
//! Every flag is defined for every input, including the empty string.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lexicon;

/// Integer or decimal numeral, optionally with correctly grouped thousands.
static NUMERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}(?:,\d{3})+|\d+)?(?:\.(\d+))?$").unwrap());

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let month = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";
    Regex::new(&format!(
        r"(?i)^(?:{month}[-/.]\d{{1,2}}[-/.]\d{{2,4}}|\d{{1,2}}[-/.]{month}[-/.]\d{{2,4}}|{month}[-/']\d{{2,4}}|\d{{1,2}}/\d{{1,2}}/\d{{2,4}}|\d{{1,2}}-\d{{1,2}}-\d{{2,4}}|\d{{4}}-\d{{1,2}}-\d{{1,2}})$"
    ))
    .unwrap()
});

static MEASURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d[\d,]*(?:\.\d+)?(?:sf|sq\.?ft\.?|ft|in|cm|km|kg|lbs?|oz|acres?|x)$").unwrap()
});

/// Earliest and latest values accepted as a calendar year.
const YEAR_RANGE: std::ops::RangeInclusive<u32> = 1000..=2999;

/// Characters removed from the end of a token before shape checks.
const TRAILING_PUNCT: &[char] = &[
    ',', ';', ':', '.', '!', '?', '"', '\'', '\u{201D}', '\u{2019}',
];

/// Characters removed from the start of a token before shape checks.
const LEADING_PUNCT: &[char] = &['"', '\'', '\u{201C}', '\u{2018}'];

/// A classified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The token as it appeared in the line
    pub text: String,
    /// The token without surrounding punctuation and quotes
    pub text_without_punct: String,
    /// Numeral after removing currency, sign, percent and grouping
    pub is_number: bool,
    /// Carries a `$` prefix or suffix
    pub is_dollar: bool,
    /// Carries a trailing `%`
    pub is_percent: bool,
    /// Numeral with an `m`/`mm` shorthand suffix
    pub is_million: bool,
    /// Bare four digit numeral in the calendar range
    pub is_year: bool,
    /// Two numerals joined by a hyphen
    pub is_number_range: bool,
    /// Wrapped in parentheses or led by a minus sign
    pub is_negative: bool,
    /// Date-shaped token ("Feb-17-2019", "02/17/19")
    pub is_date: bool,
    /// Numeral glued to a unit ("1,200sf", "10ft")
    pub is_measure: bool,
    /// Common English stop word
    pub is_stop_word: bool,
    /// Digits of the rounded magnitude for numbers, digit characters otherwise
    pub num_digits: usize,
}

impl Word {
    /// Classify a single token.
    pub fn new(token: &str) -> Self {
        let text_without_punct = strip_punct(token).to_string();
        let core = trim_sentence_punct(token);

        let is_date = DATE_RE.is_match(core);
        let is_measure = MEASURE_RE.is_match(core);

        let shape = NumericShape::parse(core);
        let is_number = shape.magnitude.is_some();
        let is_year = is_number
            && !shape.dollar
            && !shape.percent
            && !shape.negative
            && !shape.million
            && core.len() == 4
            && core.bytes().all(|b| b.is_ascii_digit())
            && core.parse::<u32>().map_or(false, |y| YEAR_RANGE.contains(&y));

        let num_digits = match &shape.magnitude {
            Some((int_part, frac_part)) => magnitude_digits(int_part, frac_part),
            None => token.chars().filter(|c| c.is_ascii_digit()).count(),
        };

        let is_stop_word =
            !text_without_punct.is_empty() && lexicon::is_stop_word(&text_without_punct);

        Self {
            text: token.to_string(),
            text_without_punct,
            is_number,
            is_dollar: shape.dollar,
            is_percent: shape.percent,
            is_million: shape.million,
            is_year,
            is_number_range: shape.range,
            is_negative: shape.negative && (is_number || shape.range),
            is_date,
            is_measure,
            is_stop_word,
            num_digits,
        }
    }

    /// Whether the token counts towards a line's numeric density.
    pub fn is_numeric(&self) -> bool {
        self.is_number || self.is_number_range || self.is_date || self.is_measure
    }

    /// Numeric tokens that rarely appear inside prose: money, percentages,
    /// grouped or decimal amounts, negatives, dates and measures.
    pub fn is_financial(&self) -> bool {
        if !self.is_numeric() {
            return false;
        }
        self.is_dollar
            || self.is_percent
            || self.is_million
            || self.is_negative
            || self.is_date
            || self.is_measure
            || (self.is_number
                && !self.is_year
                && self.text_without_punct.contains(&[',', '.'][..]))
    }

    /// Whether the token contains at least one letter.
    pub fn has_letters(&self) -> bool {
        self.text.chars().any(char::is_alphabetic)
    }

    /// Whether the token is a word (letters, no digits).
    pub fn is_alphabetic(&self) -> bool {
        self.has_letters() && !self.text.chars().any(|c| c.is_ascii_digit())
    }

    /// First letter upper case ("Vacancies", "LLC", "O'Neil").
    pub fn is_title(&self) -> bool {
        self.text_without_punct
            .chars()
            .find(|c| c.is_alphabetic())
            .map_or(false, char::is_uppercase)
            && self
                .text_without_punct
                .chars()
                .next()
                .map_or(false, |c| !c.is_lowercase())
    }

    /// A lone letter such as the pieces of "E x e c u t i v e".
    pub fn is_single_letter(&self) -> bool {
        let mut chars = self.text.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    }
}

/// Result of peeling currency, sign and percent markers off a token.
#[derive(Debug, Default)]
struct NumericShape {
    dollar: bool,
    percent: bool,
    negative: bool,
    million: bool,
    range: bool,
    /// Integer digits (grouping removed) and fraction digits
    magnitude: Option<(String, String)>,
}

impl NumericShape {
    fn parse(core: &str) -> Self {
        let mut shape = NumericShape::default();
        let mut s = core;

        loop {
            let before = s;
            if let Some(rest) = s.strip_prefix('$') {
                shape.dollar = true;
                s = rest;
            } else if let Some(rest) = s.strip_suffix('$') {
                shape.dollar = true;
                s = rest;
            } else if let Some(rest) = s.strip_suffix('%') {
                shape.percent = true;
                s = rest;
            } else if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
                shape.negative = true;
                s = &s[1..s.len() - 1];
            } else if let Some(rest) = s
                .strip_prefix('-')
                .filter(|r| r.starts_with(|c: char| c.is_ascii_digit() || c == '$' || c == '.'))
            {
                shape.negative = true;
                s = rest;
            }
            if s == before {
                break;
            }
        }

        if let Some(magnitude) = numeral(s) {
            shape.magnitude = Some(magnitude);
            return shape;
        }

        let lower = s.to_ascii_lowercase();
        let stem = lower
            .strip_suffix("mm")
            .or_else(|| lower.strip_suffix('m'))
            .unwrap_or("");
        if let Some(magnitude) = numeral(stem) {
            shape.million = true;
            shape.magnitude = Some(magnitude);
            return shape;
        }

        let mut parts = s.split('-');
        if let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) {
            shape.range = numeral(low).is_some() && numeral(high).is_some();
        }
        shape
    }
}

/// Split a numeral into integer digits (without grouping) and fraction digits.
fn numeral(s: &str) -> Option<(String, String)> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    let caps = NUMERAL_RE.captures(s)?;
    let int_part = caps
        .get(1)
        .map(|m| m.as_str().replace(',', ""))
        .unwrap_or_default();
    let frac_part = caps
        .get(2)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Some((int_part, frac_part))
}

/// Number of digits in the rounded magnitude ("10.34" -> 2, "9.6" -> 2).
fn magnitude_digits(int_part: &str, frac_part: &str) -> usize {
    let significant = int_part.trim_start_matches('0');
    let rounds_up = frac_part.chars().next().map_or(false, |c| c >= '5');
    if significant.is_empty() {
        return 1;
    }
    let carry = rounds_up && significant.chars().all(|c| c == '9');
    significant.len() + usize::from(carry)
}

/// Strip leading and trailing punctuation and quotes, keeping at least one
/// character.
pub(crate) fn strip_punct(token: &str) -> &str {
    let is_punct = |c: char| c.is_ascii_punctuation() || "\u{201C}\u{201D}\u{2018}\u{2019}".contains(c);
    let mut s = token;
    while s.chars().count() > 1 && s.chars().last().map_or(false, is_punct) {
        let last = s.chars().last().map_or(0, char::len_utf8);
        s = &s[..s.len() - last];
    }
    while s.chars().count() > 1 && s.chars().next().map_or(false, is_punct) {
        let first = s.chars().next().map_or(0, char::len_utf8);
        s = &s[first..];
    }
    s
}

/// Strip sentence punctuation and quotes that are not part of a number.
fn trim_sentence_punct(token: &str) -> &str {
    let s = token.trim_start_matches(LEADING_PUNCT);
    let trimmed = s.trim_end_matches(TRAILING_PUNCT);
    if trimmed.is_empty() {
        s
    } else {
        trimmed
    }
}
