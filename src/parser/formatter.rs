//! Typography repair for extracted lines.
//!
//! Layout extractors frequently emit letter-spaced headings
//! ("E x e c u t i v e  S u m m a r y") and tokens with broken casing
//! ("GoAT", "HEllo"). These helpers undo both. They are used by the line
//! classifier (to see through letter spacing) and by the renderers.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Two or more whitespace characters: the word gap in letter-spaced text.
static WORD_GAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Shortest run of lone letters rewritten inside an otherwise normal group.
const MIN_SPACED_RUN: usize = 3;

/// Collapse letter-spaced words.
///
/// Groups separated by two or more spaces are words; inside a group, lone
/// letters separated by single spaces are glued together. Digits and
/// symbols are never joined.
pub fn despace(text: &str) -> String {
    WORD_GAP_RE
        .split(text.trim())
        .map(despace_group)
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn despace_group(group: &str) -> String {
    let tokens: Vec<&str> = group.split_whitespace().collect();
    let is_lone = |t: &&str| {
        let mut chars = t.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    };

    if tokens.len() >= 2 && tokens.iter().all(is_lone) {
        return tokens.concat();
    }

    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut run: Vec<&str> = Vec::new();
    for token in tokens {
        if is_lone(&token) {
            run.push(token);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(token.to_string());
    }
    flush_run(&mut out, &mut run);
    out.join(" ")
}

fn flush_run(out: &mut Vec<String>, run: &mut Vec<&str>) {
    if run.len() >= MIN_SPACED_RUN {
        out.push(run.concat());
    } else {
        out.extend(run.iter().map(|t| t.to_string()));
    }
    run.clear();
}

/// Repair irregular capitalization inside a token.
///
/// Each alphabetic run is handled on its own, so "O'Neil" and "L.P." are
/// untouched. Regular runs (lower, Title, UPPER) are kept. An irregular run
/// becomes lower case when it starts lower case ("heLLo" -> "hello"), upper
/// case when an upper case prefix of two or more letters is followed by a
/// lower case tail ("HEllo" -> "HELLO"), and Title case otherwise
/// ("GoAT" -> "Goat").
pub fn fix_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut run = String::new();
    for c in token.chars() {
        if c.is_alphabetic() {
            run.push(c);
        } else {
            out.push_str(&fix_run_case(&run));
            run.clear();
            out.push(c);
        }
    }
    out.push_str(&fix_run_case(&run));
    out
}

/// Apply [`fix_case`] to every whitespace-separated token, joining with a
/// single space.
pub fn fix_line_case(text: &str) -> String {
    text.split_whitespace()
        .map(fix_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode NFKC normalization plus whitespace collapse.
///
/// NFKC folds ligatures ("ﬁ" -> "fi") and full-width forms.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fix_run_case(run: &str) -> String {
    let mut chars = run.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: Vec<char> = chars.collect();

    let all_lower = run.chars().all(char::is_lowercase);
    let all_upper = run.chars().all(char::is_uppercase);
    let title = first.is_uppercase() && rest.iter().all(|c| c.is_lowercase());
    if all_lower || all_upper || title {
        return run.to_string();
    }

    if first.is_lowercase() {
        return run.to_lowercase();
    }

    let upper_prefix = run.chars().take_while(|c| c.is_uppercase()).count();
    let tail_lower = run
        .chars()
        .skip(upper_prefix)
        .all(char::is_lowercase);
    if upper_prefix >= 2 && tail_lower {
        return run.to_uppercase();
    }

    let mut titled: String = first.to_uppercase().collect();
    titled.extend(rest.iter().flat_map(|c| c.to_lowercase()));
    titled
}
