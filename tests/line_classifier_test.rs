//! Integration tests for token and line classification.

use unlines::parser::formatter::{despace, fix_line_case};
use unlines::parser::split_sentences;
use unlines::{classify_line, Line, LineType, Word};

// ==================== Word Tests ====================

#[test]
fn test_word_number_kinds() {
    let cases: &[(&str, bool, bool, bool, bool)] = &[
        // token, number, dollar, percent, negative
        ("10,000", true, false, false, false),
        ("(685,365,480)$", true, true, false, true),
        ("12.5%", true, false, true, false),
        ("-42", true, false, false, true),
        ("1,00", false, false, false, false),
        ("Manhattan", false, false, false, false),
    ];
    for &(token, number, dollar, percent, negative) in cases {
        let w = Word::new(token);
        assert_eq!(w.is_number, number, "{token}");
        assert_eq!(w.is_dollar, dollar, "{token}");
        assert_eq!(w.is_percent, percent, "{token}");
        assert_eq!(w.is_negative, negative, "{token}");
    }
}

#[test]
fn test_word_digit_counts() {
    assert_eq!(Word::new("$10,000,000").num_digits, 8);
    assert_eq!(Word::new("10.34%").num_digits, 2);
    assert_eq!(Word::new("0.25").num_digits, 1);
}

#[test]
fn test_word_year_range_and_date() {
    assert!(Word::new("2019.").is_year);
    assert!(!Word::new("$2020").is_year);
    assert!(Word::new("10-20").is_number_range);
    assert!(!Word::new("well-known").is_number_range);
    assert!(Word::new("Feb-17-2019").is_date);
    assert!(Word::new("1,200sf").is_measure);
}

#[test]
fn test_word_text_without_punct() {
    let w = Word::new("\u{201C}Lender\u{201D},");
    assert_eq!(w.text, "\u{201C}Lender\u{201D},");
    assert_eq!(w.text_without_punct, "Lender");
    assert!(w.is_title());
}

// ==================== Line Type Tests ====================

#[test]
fn test_line_types() {
    let cases = [
        ("EXECUTIVE SUMMARY", LineType::Header),
        ("3.15 Vacancies", LineType::Header),
        ("Name Value", LineType::Header),
        ("Ambika 20", LineType::TableRow),
        ("Revenue 2019 2020", LineType::TableRow),
        ("Net Debt (685,365,480)$ ... ", LineType::TableRow),
        ("(b) the Borrower shall deliver", LineType::NumberedListItem),
        ("line one", LineType::Para),
        ("Manhattan.", LineType::Para),
    ];
    for (raw, expected) in cases {
        assert_eq!(classify_line(raw).line_type, expected, "{raw:?}");
    }
}

#[test]
fn test_line_type_flags_agree() {
    for raw in ["EXECUTIVE SUMMARY", "Ambika 20", "iv) Testing", "line one"] {
        let line = Line::new(raw);
        assert_eq!(line.is_header, line.line_type == LineType::Header, "{raw:?}");
        assert_eq!(line.is_table_row, line.line_type == LineType::TableRow, "{raw:?}");
        assert!(!(line.is_header && line.is_table_row), "{raw:?}");
    }
}

#[test]
fn test_line_type_serializes_snake_case() {
    let json = serde_json::to_string(&LineType::NumberedListItem).unwrap();
    assert_eq!(json, "\"numbered_list_item\"");
    assert_eq!(LineType::TableRow.to_string(), "table_row");
}

// ==================== Numbering Tests ====================

#[test]
fn test_numbered_markers() {
    let line = Line::new("10.12 Testing");
    assert!(line.integer_numbered_line);
    assert_eq!(line.start_number.as_deref(), Some("10.12"));
    assert_eq!(line.line_without_number, "Testing");

    let line = Line::new("iv) Testing");
    assert!(line.roman_numbered_line);
    assert_eq!(line.start_number.as_deref(), Some("iv"));

    let line = Line::new("(b) the Borrower shall deliver");
    assert!(line.letter_numbered_line);
    assert_eq!(line.start_number.as_deref(), Some("b"));
}

#[test]
fn test_numbers_that_are_not_markers() {
    for raw in ["1.", "2019 was a year", "a good plan", "I think so", "US. markets"] {
        let line = Line::new(raw);
        assert!(!line.numbered_line, "{raw:?}");
        assert!(line.start_number.is_none(), "{raw:?}");
    }
}

// ==================== Feature Tests ====================

#[test]
fn test_address_lines() {
    assert!(Line::new("P.o. Box 81226").is_zipcode_or_po);
    assert!(Line::new("Sioux Falls, SD 57104").is_zipcode_or_po);
    assert!(!Line::new("Sioux Falls, SD 57104").is_table_row);
}

#[test]
fn test_line_continuation_flags() {
    let line = Line::new("The agreement was signed by Leslie H.");
    assert!(line.ends_with_abbreviation);
    assert!(line.incomplete_line);

    assert!(Line::new("and the other parties").continuing_line);
    assert!(!Line::new("The agreement was signed.").incomplete_line);
}

#[test]
fn test_spaced_heading() {
    let line = Line::new("E x e c u t i v e  S u m m a r y");
    assert!(line.has_spaced_characters);
    assert!(line.is_header);
    assert_eq!(despace(&line.text), "Executive Summary");
}

#[test]
fn test_quotes_and_noun_chunks() {
    let line = Line::new("the \u{201C}Borrower\u{201D} and the 'Lender' under the Borrower's \"Agreement\"");
    assert_eq!(line.quoted_words, vec!["Borrower", "Lender", "Agreement"]);

    let line = Line::new("The Wells Fargo Bank & Trust signed with Acme Corp, and Acme Corp paid.");
    assert_eq!(line.noun_chunks, vec!["The Wells Fargo Bank & Trust", "Acme Corp"]);
}

#[test]
fn test_line_serializes_features() {
    let value = serde_json::to_value(Line::new("3.15 Vacancies")).unwrap();
    assert_eq!(value["line_type"], "header");
    assert_eq!(value["start_number"], "3.15");
    assert_eq!(value["integer_numbered_line"], true);
}

// ==================== Formatter and Sentence Tests ====================

#[test]
fn test_case_repair() {
    assert_eq!(fix_line_case("the GoAT  and HEllo"), "the Goat and HELLO");
}

#[test]
fn test_sentence_split() {
    assert_eq!(
        split_sentences("The loan closed in May. It matures in 2030."),
        vec!["The loan closed in May.", "It matures in 2030."]
    );
    assert_eq!(split_sentences("no boundary here"), vec!["no boundary here"]);
}
