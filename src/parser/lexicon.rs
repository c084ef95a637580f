//! Shared word lists and patterns used by the classifiers.
//!
//! Everything here is built once on first use and never mutated afterwards,
//! so lookups from parallel region builders need no locking.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

const STOP_WORD_LIST: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "per", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours", "yourself", "&", "-", "–", "—",
];

const ABBREVIATION_LIST: &[&str] = &[
    // titles
    "mr.", "mrs.", "ms.", "dr.", "prof.", "rev.", "hon.", "sen.", "rep.", "gov.", "gen.",
    "col.", "capt.", "lt.", "sgt.", "jr.", "sr.", "esq.", "st.",
    // corporate suffixes
    "inc.", "corp.", "co.", "ltd.", "llc.", "llp.", "l.l.c.", "l.p.", "n.a.", "plc.", "bros.",
    "assn.", "assoc.", "dept.", "univ.",
    // references
    "no.", "nos.", "vol.", "fig.", "sec.", "secs.", "art.", "para.", "p.", "pp.", "ch.",
    "approx.", "e.g.", "i.e.", "cf.", "vs.", "v.", "viz.", "al.", "ex.",
    // addresses
    "ave.", "blvd.", "rd.", "ste.", "fl.", "apt.", "bldg.", "hwy.", "mt.", "ft.", "p.o.",
    "u.s.", "u.k.",
    // months
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.",
    "dec.",
];

const CONJUNCTION_LIST: &[&str] = &[
    "and", "or", "but", "nor", "yet", "&", "and/or", "plus", "whereas", "including",
];

const HEADING_KEYWORD_LIST: &[&str] = &[
    "section", "article", "item", "part", "chapter", "schedule", "exhibit", "note", "appendix",
    "annex",
];

/// Common English stop words, lowercase.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORD_LIST.iter().copied().collect());

/// Abbreviations that end with a period without ending a sentence, lowercase.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABBREVIATION_LIST.iter().copied().collect());

/// Tokens that, at the start of a line, continue the previous line.
pub static CONJUNCTIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CONJUNCTION_LIST.iter().copied().collect());

/// Words that introduce numbered headings ("Section 3.").
pub static HEADING_KEYWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HEADING_KEYWORD_LIST.iter().copied().collect());

/// A well-formed roman numeral up to 4999, either case.
pub static ROMAN_NUMERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^m{0,4}(cm|cd|d?c{0,3})(xc|xl|l?x{0,3})(ix|iv|v?i{0,3})$").unwrap()
});

/// "P.O. Box 123" at the start of a line.
pub static PO_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^p\.?\s*o\.?\s*box\s+\d+").unwrap());

/// A whole line of the form "City Name, ST 12345[-6789]".
pub static CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z.'\-]*(?:\s+[A-Z][A-Za-z.'\-]*)*,\s*[A-Z]{2}\.?\s+\d{5}(?:-\d{4})?$")
        .unwrap()
});

/// "Section 3.", "Article IV:", "Item 1A." style headings.
pub static SECTION_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z]+\s+(\d+(\.\d+)*[a-z]?|[ivxlcdm]+|[a-z])[.:]?$").unwrap()
});

/// Check whether a lowercase token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token.to_lowercase().as_str())
}

/// Check whether a token is a known abbreviation or an initialism such as
/// "U.S." or "H.".
pub fn is_abbreviation(token: &str) -> bool {
    let lower = token.to_lowercase();
    if ABBREVIATIONS.contains(lower.as_str()) {
        return true;
    }
    if !lower.ends_with('.') {
        return false;
    }
    let stem = &lower[..lower.len() - 1];
    if stem.is_empty() {
        return false;
    }

    // Dotted initialism: every part a single letter ("u.s", "l.l.c")
    if stem.contains('.')
        && stem
            .split('.')
            .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
    {
        return true;
    }

    let letters = stem.chars().count();
    if !stem.chars().all(char::is_alphabetic) {
        return false;
    }
    match letters {
        1 => true,
        2 => !STOP_WORDS.contains(stem),
        _ => false,
    }
}

/// Check whether a token is a line-leading conjunction.
pub fn is_conjunction(token: &str) -> bool {
    CONJUNCTIONS.contains(token)
}

/// Check whether a token is a valid roman numeral (non-empty).
pub fn is_roman_numeral(token: &str) -> bool {
    !token.is_empty() && ROMAN_NUMERAL_RE.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("The"));
        assert!(is_stop_word("of"));
        assert!(!is_stop_word("Vacancies"));
    }

    #[test]
    fn test_abbreviations() {
        assert!(is_abbreviation("Inc."));
        assert!(is_abbreviation("H."));
        assert!(is_abbreviation("U.S."));
        assert!(is_abbreviation("L.P."));
        assert!(is_abbreviation("Mr."));
        assert!(!is_abbreviation("is."));
        assert!(!is_abbreviation("Manhattan."));
        assert!(!is_abbreviation("H"));
        assert!(!is_abbreviation("."));
    }

    #[test]
    fn test_roman_numerals() {
        assert!(is_roman_numeral("iv"));
        assert!(is_roman_numeral("XII"));
        assert!(is_roman_numeral("mcmxc"));
        assert!(!is_roman_numeral(""));
        assert!(!is_roman_numeral("iiii"));
        assert!(!is_roman_numeral("abc"));
    }

    #[test]
    fn test_patterns() {
        assert!(PO_BOX_RE.is_match("P.o. Box 81226"));
        assert!(PO_BOX_RE.is_match("PO Box 12"));
        assert!(CITY_STATE_ZIP_RE.is_match("Sioux Falls, SD 57104"));
        assert!(CITY_STATE_ZIP_RE.is_match("New York, NY 10001-2345"));
        assert!(!CITY_STATE_ZIP_RE.is_match("of 101 North Phillips Avenue, Sioux Falls, SD 57104"));
        assert!(SECTION_HEADING_RE.is_match("Section 3."));
        assert!(SECTION_HEADING_RE.is_match("Item 1A."));
    }
}
