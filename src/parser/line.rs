//! Line-level classification.
//!
//! [`Line::new`] tokenizes one raw line into [`Word`]s and derives every
//! feature the block builder needs in a single pass. A `Line` is an
//! immutable record: the same text always produces the same fields.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::formatter;
use super::lexicon;
use super::word::Word;

/// Dotted decimal marker core ("1", "10.12", "1.3.4").
static INTEGER_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:\.\d{1,3})*$").unwrap());

/// Characters that open a bulleted line.
const BULLETS: &[char] = &[
    '\u{2022}', '\u{25CF}', '\u{25CB}', '\u{25A0}', '\u{25AA}', '\u{25E6}', '-', '*', '\u{2013}',
];

/// Closing characters ignored when looking at how a line ends.
const CLOSERS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']'];

/// Words that turn a leading decimal into a quantity ("3.5 million").
const QUANTITY_WORDS: &[&str] = &[
    "million", "billion", "thousand", "trillion", "percent", "%", "x", "times", "years", "months",
    "days", "acres", "sf",
];

/// Most effective (non stop) words a header may carry.
const MAX_HEADER_EFF_WORDS: usize = 10;

/// Most tokens a header may carry.
const MAX_HEADER_TOKENS: usize = 15;

/// Share of capitalized content words required for a title-case header.
const HEADER_TITLE_RATIO: f32 = 0.75;

/// Most alphabetic words a line may have and still be a table row on the
/// strength of a single money/percent/date token.
const MAX_TABLE_ROW_ALPHA_WORDS: usize = 4;

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    /// A heading
    Header,
    /// Running text
    Para,
    /// A row of a table
    TableRow,
    /// An item of a numbered list
    NumberedListItem,
}

impl LineType {
    /// The snake_case name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Header => "header",
            LineType::Para => "para",
            LineType::TableRow => "table_row",
            LineType::NumberedListItem => "numbered_list_item",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified raw line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// The raw line with surrounding whitespace removed
    pub text: String,
    /// Tokens of the line (of the de-spaced text when letter-spaced)
    pub words: Vec<Word>,

    /// The line does not finish its sentence
    pub incomplete_line: bool,
    /// The last token is an abbreviation ("Inc.", "H.")
    pub ends_with_abbreviation: bool,
    /// The line opens with a conjunction and continues a previous line
    pub continuing_line: bool,
    /// Starts with "1.", "10.12", "(3)"
    pub integer_numbered_line: bool,
    /// Starts with "iv)", "(II)", "xi."
    pub roman_numbered_line: bool,
    /// Starts with "(a)", "B.", "aa)"
    pub letter_numbered_line: bool,
    /// Any of the three numbered forms
    pub numbered_line: bool,
    /// Starts with a bullet glyph
    pub bullet_line: bool,
    /// Numeric density or shape of a table row
    pub is_table_row: bool,
    /// Reads as a heading
    pub is_header: bool,
    /// "City, ST 12345" or "P.O. Box 123"
    pub is_zipcode_or_po: bool,
    /// Letter-spaced typography ("E x e c u t i v e")
    pub has_spaced_characters: bool,

    /// Number of tokens
    pub word_count: usize,
    /// Number of stop-word tokens
    pub stop_word_count: usize,
    /// `word_count - stop_word_count`
    pub eff_word_count: usize,
    /// Tokens starting with an upper case letter
    pub title_word_count: usize,
    /// Tokens that are numbers
    pub number_count: usize,

    /// Leading numbering marker without its punctuation
    pub start_number: Option<String>,
    /// The line without its numbering or bullet marker
    pub line_without_number: String,

    /// Runs of capitalized tokens, first occurrence order
    pub noun_chunks: Vec<String>,
    /// Text inside matching quote pairs, left to right
    pub quoted_words: Vec<String>,

    /// Resolved classification
    pub line_type: LineType,
}

impl Line {
    /// Classify one raw line.
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_string();

        let raw_words: Vec<Word> = text.split_whitespace().map(Word::new).collect();
        let has_spaced_characters = is_letter_spaced(&raw_words);
        let analysed: Cow<'_, str> = if has_spaced_characters {
            Cow::Owned(formatter::despace(&text))
        } else {
            Cow::Borrowed(text.as_str())
        };

        let words: Vec<Word> = analysed.split_whitespace().map(Word::new).collect();

        let marker = Marker::detect(&analysed);
        let bullet_rest = if marker.is_none() {
            bullet_remainder(&analysed)
        } else {
            None
        };
        let bullet_line = bullet_rest.is_some();

        let (integer_numbered_line, roman_numbered_line, letter_numbered_line) = marker
            .as_ref()
            .map_or((false, false, false), |m| (m.integer, m.roman, m.letter));
        let numbered_line = marker.is_some();

        let (start_number, line_without_number) = match (&marker, bullet_rest) {
            (Some(m), _) => (Some(m.start_number.clone()), m.rest.clone()),
            (None, Some(rest)) => (None, rest),
            (None, None) => (None, analysed.to_string()),
        };

        // Numbering and bullet markers never count as content.
        let body: &[Word] = if (numbered_line || bullet_line) && !words.is_empty() {
            &words[1..]
        } else {
            &words
        };

        let word_count = words.len();
        let stop_word_count = words.iter().filter(|w| w.is_stop_word).count();
        let eff_word_count = word_count - stop_word_count;
        let title_word_count = words.iter().filter(|w| w.is_title()).count();
        let number_count = words.iter().filter(|w| w.is_number).count();

        let section_heading = is_section_heading(&text);

        // The marker of "Section A." is a label, not an initial.
        let ends_with_abbreviation = !section_heading
            && words
                .last()
                .map(|w| lexicon::is_abbreviation(w.text.trim_end_matches(CLOSERS)))
                .unwrap_or(false);

        let continuing_line = words
            .first()
            .map(|w| lexicon::is_conjunction(&w.text))
            .unwrap_or(false);

        let is_zipcode_or_po =
            lexicon::PO_BOX_RE.is_match(&text) || lexicon::CITY_STATE_ZIP_RE.is_match(&text);

        let last_char = last_significant_char(&text);
        let ends_sentence = matches!(last_char, Some('.' | '!' | '?'));

        let is_table_row =
            !is_zipcode_or_po && !section_heading && looks_like_table_row(body, ends_sentence);

        let is_header = !is_table_row
            && !is_zipcode_or_po
            && !continuing_line
            && (section_heading || looks_like_header(&line_without_number, body));

        let incomplete_line = !text.is_empty()
            && (ends_with_abbreviation
                || (!matches!(last_char, Some('.' | '!' | '?' | ':'))
                    && !is_table_row
                    && !is_header));

        let line_type = if is_header {
            LineType::Header
        } else if is_table_row {
            LineType::TableRow
        } else if numbered_line {
            LineType::NumberedListItem
        } else {
            LineType::Para
        };

        let noun_chunks = noun_chunks(&words);
        let quoted_words = quoted_words(&text);

        Self {
            text,
            words,
            incomplete_line,
            ends_with_abbreviation,
            continuing_line,
            integer_numbered_line,
            roman_numbered_line,
            letter_numbered_line,
            numbered_line,
            bullet_line,
            is_table_row,
            is_header,
            is_zipcode_or_po,
            has_spaced_characters,
            word_count,
            stop_word_count,
            eff_word_count,
            title_word_count,
            number_count,
            start_number,
            line_without_number,
            noun_chunks,
            quoted_words,
            line_type,
        }
    }

    /// Whether the line has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A recognised numbering marker at the start of a line.
#[derive(Debug, Clone)]
struct Marker {
    integer: bool,
    roman: bool,
    letter: bool,
    start_number: String,
    rest: String,
}

impl Marker {
    fn detect(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let token = text.split_whitespace().next()?;
        let rest = text[token.len()..].trim_start();
        if rest.is_empty() {
            return None;
        }

        let mut core = token;
        let opened = core.starts_with('(');
        if opened {
            core = &core[1..];
        }
        let mut closed = false;
        let mut dotted = false;
        loop {
            if let Some(c) = core.strip_suffix(')') {
                closed = true;
                core = c;
            } else if let Some(c) = core.strip_suffix('.') {
                dotted = true;
                core = c;
            } else {
                break;
            }
        }
        if core.is_empty() {
            return None;
        }
        let decorated = opened || closed || dotted;

        let next_word = rest
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let integer = INTEGER_MARKER_RE.is_match(core)
            && (decorated || core.contains('.'))
            && !QUANTITY_WORDS.contains(&next_word.trim_end_matches([',', '.']));

        let roman = lexicon::is_roman_numeral(core)
            && (decorated
                || (core.chars().count() >= 2
                    && core.chars().all(|c| matches!(c.to_ascii_lowercase(), 'i' | 'v' | 'x'))));

        let letter = is_letter_marker(core, opened, closed, dotted);

        if !(integer || roman || letter) {
            return None;
        }
        Some(Self {
            integer,
            roman,
            letter,
            start_number: core.to_string(),
            rest: rest.to_string(),
        })
    }
}

fn is_letter_marker(core: &str, opened: bool, closed: bool, dotted: bool) -> bool {
    let letters: Vec<char> = core.chars().collect();
    if letters.is_empty() || letters.len() > 2 || !letters.iter().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    let decorated = opened || closed || dotted;
    match letters.as_slice() {
        [c] => {
            decorated || (c.is_ascii_lowercase() && !matches!(*c, 'a' | 'i'))
        }
        [a, b] => {
            let doubled = a.eq_ignore_ascii_case(b);
            let acronym = a.is_ascii_uppercase() && b.is_ascii_uppercase() && !opened;
            doubled && decorated && !acronym && !lexicon::is_stop_word(core)
        }
        _ => false,
    }
}

fn bullet_remainder(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    if !BULLETS.contains(&first) {
        return None;
    }
    let after = chars.as_str();
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = after.trim_start();
    (!rest.is_empty()).then(|| rest.to_string())
}

fn is_letter_spaced(tokens: &[Word]) -> bool {
    if tokens.len() < 3 {
        return false;
    }
    let single = tokens.iter().filter(|w| w.is_single_letter()).count();
    single * 2 > tokens.len()
}

/// "Section 3.", "Article IV:" and friends.
fn is_section_heading(text: &str) -> bool {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(_)) => {
            lexicon::HEADING_KEYWORDS.contains(first.to_lowercase().as_str())
                && lexicon::SECTION_HEADING_RE.is_match(text)
        }
        _ => false,
    }
}

fn last_significant_char(text: &str) -> Option<char> {
    text.trim_end_matches(CLOSERS).chars().last()
}

fn looks_like_table_row(body: &[Word], ends_sentence: bool) -> bool {
    let numeric = body.iter().filter(|w| w.is_numeric()).count();
    if numeric == 0 {
        return false;
    }
    let content = body
        .iter()
        .filter(|w| w.is_numeric() || w.has_letters())
        .count();
    let alpha = body
        .iter()
        .filter(|w| w.is_alphabetic() && !w.is_numeric())
        .count();

    if ends_sentence && alpha > MAX_TABLE_ROW_ALPHA_WORDS {
        return false;
    }

    let dense = numeric >= 2 && numeric * 2 > content;
    let financial = body.iter().any(Word::is_financial) && alpha <= MAX_TABLE_ROW_ALPHA_WORDS;

    // A capitalized label followed by its value ("Ambika 20").
    let labeled = !ends_sentence
        && numeric * 2 >= content
        && alpha <= MAX_TABLE_ROW_ALPHA_WORDS
        && body
            .iter()
            .find(|w| w.has_letters())
            .map_or(false, Word::is_title);

    dense || financial || labeled
}

fn looks_like_header(body_text: &str, body: &[Word]) -> bool {
    if body.is_empty() || body.len() > MAX_HEADER_TOKENS {
        return false;
    }
    if !body.iter().any(Word::is_alphabetic) {
        return false;
    }

    let eff = body.iter().filter(|w| !w.is_stop_word).count();
    if eff == 0 || eff > MAX_HEADER_EFF_WORDS {
        return false;
    }

    let starts_lower = body[0]
        .text_without_punct
        .chars()
        .next()
        .map_or(false, char::is_lowercase);
    if starts_lower {
        return false;
    }

    if matches!(
        last_significant_char(body_text),
        Some('.' | '!' | '?' | ';' | ',')
    ) {
        return false;
    }

    let numeric = body.iter().filter(|w| w.is_numeric()).count();
    if numeric * 2 >= body.len() {
        return false;
    }

    let letters: Vec<char> = body_text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        return true;
    }

    let content: Vec<&Word> = body
        .iter()
        .filter(|w| w.is_alphabetic() && !w.is_stop_word)
        .collect();
    if content.is_empty() {
        return false;
    }
    let titled = content.iter().filter(|w| w.is_title()).count();
    titled as f32 / content.len() as f32 >= HEADER_TITLE_RATIO
}

/// Clean a token for noun-chunk use; the flag reports whether trailing
/// punctuation ended the chunk.
fn chunk_token(word: &Word) -> (String, bool) {
    let text = word
        .text
        .trim_start_matches(['"', '\'', '(', '[', '\u{201C}', '\u{2018}']);
    if lexicon::is_abbreviation(text) {
        return (text.to_string(), false);
    }
    let trimmed = text.trim_end_matches([
        ',', ';', ':', '.', '!', '?', '"', '\'', ')', ']', '\u{201D}', '\u{2019}',
    ]);
    (trimmed.to_string(), trimmed.len() != text.len())
}

fn noun_chunks(words: &[Word]) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut connector: Option<String> = None;

    fn flush(chunks: &mut Vec<String>, current: &mut Vec<String>, connector: &mut Option<String>) {
        *connector = None;
        if current.is_empty() {
            return;
        }
        let single_stop = current.len() == 1 && lexicon::is_stop_word(&current[0]);
        let chunk = current.join(" ");
        current.clear();
        if !single_stop && !chunks.contains(&chunk) {
            chunks.push(chunk);
        }
    }

    for word in words {
        let (token, breaks) = chunk_token(word);
        if token == "&" && !current.is_empty() && connector.is_none() {
            connector = Some(token);
            continue;
        }
        let capitalized = token
            .chars()
            .next()
            .map_or(false, |c| c.is_alphabetic() && c.is_uppercase());
        if !capitalized {
            flush(&mut chunks, &mut current, &mut connector);
            continue;
        }
        if let Some(c) = connector.take() {
            current.push(c);
        }
        current.push(token);
        if breaks {
            flush(&mut chunks, &mut current, &mut connector);
        }
    }
    flush(&mut chunks, &mut current, &mut connector);
    chunks
}

fn quoted_words(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let boundary_before =
        |i: usize| i == 0 || matches!(chars[i - 1].1, c if c.is_whitespace() || c == '(' || c == '[');
    let boundary_after = |j: usize| chars.get(j + 1).map_or(true, |&(_, c)| !c.is_alphanumeric());

    let mut found = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (start, open) = chars[i];
        let (close, single) = match open {
            '"' => ('"', false),
            '\u{201C}' => ('\u{201D}', false),
            '\u{2018}' => ('\u{2019}', true),
            '\'' if boundary_before(i) => ('\'', true),
            _ => {
                i += 1;
                continue;
            }
        };

        let end = (i + 1..chars.len())
            .find(|&j| chars[j].1 == close && (!single || boundary_after(j)));
        match end {
            Some(j) => {
                let inner = text[start + open.len_utf8()..chars[j].0].trim();
                if !inner.is_empty() {
                    found.push(inner.to_string());
                }
                i = j + 1;
            }
            None => i += 1,
        }
    }
    found
}
