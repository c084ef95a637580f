//! Sentence segmentation for block text.
//!
//! Boundaries come from the Unicode sentence rules (UAX #29). A boundary is
//! dropped again when the segment before it ends in an abbreviation or is a
//! lone list marker, or when the segment after it starts lower case.

use unicode_segmentation::UnicodeSegmentation;

use super::lexicon;

/// Closing quotes and brackets that may trail the terminal punctuation.
const CLOSERS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']'];

/// Split block text into sentences.
///
/// Whitespace inside each sentence is collapsed to single spaces. Text
/// without any boundary yields a single sentence; blank text yields none.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut open = false;

    for segment in text.split_sentence_bounds() {
        let sentence = segment.split_whitespace().collect::<Vec<_>>().join(" ");
        if sentence.is_empty() {
            continue;
        }
        match sentences.last_mut() {
            Some(prev) if open || starts_lowercase(&sentence) => {
                prev.push(' ');
                prev.push_str(&sentence);
            }
            _ => sentences.push(sentence),
        }
        open = sentences.last().map_or(false, |s| keeps_open(s));
    }
    sentences
}

/// Whether a boundary after `sentence` is spurious.
fn keeps_open(sentence: &str) -> bool {
    let mut tokens = sentence.split_whitespace();
    let Some(last) = tokens.next_back() else {
        return false;
    };
    if lexicon::is_abbreviation(last.trim_end_matches(CLOSERS)) {
        return true;
    }
    tokens.next().is_none() && is_list_marker(last)
}

fn is_list_marker(token: &str) -> bool {
    let core = token.trim_start_matches('(').trim_end_matches(['.', ')']);
    !core.is_empty()
        && (core.chars().all(|c| c.is_ascii_digit() || c == '.')
            || lexicon::is_roman_numeral(core))
}

fn starts_lowercase(sentence: &str) -> bool {
    sentence.chars().next().map_or(false, char::is_lowercase)
}
