use docuchat::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_text_with_ligatures_when_sanitizing_then_decomposes_them() {
    assert_eq!(
        sanitize_extracted_text("ﬁnding a ﬂood in the ﬁle"),
        "finding a flood in the file"
    );
}

#[test]
fn given_excessive_blank_lines_when_sanitizing_then_keeps_one_paragraph_break() {
    assert_eq!(
        sanitize_extracted_text("paragraph one\n\n\n\n\nparagraph two"),
        "paragraph one\n\nparagraph two"
    );
}

#[test]
fn given_runs_of_spaces_when_sanitizing_then_collapses_them() {
    assert_eq!(sanitize_extracted_text("hello    world \t test"), "hello world test");
}

#[test]
fn given_empty_or_blank_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(""), "");
    assert_eq!(sanitize_extracted_text("   \n\n  "), "");
}

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_rejoins_word() {
    assert_eq!(
        sanitize_extracted_text("This is a process-\ning step"),
        "This is a processing step"
    );
}

#[test]
fn given_intentional_hyphen_when_sanitizing_then_keeps_it() {
    assert_eq!(sanitize_extracted_text("This is well-known"), "This is well-known");
}

#[test]
fn given_control_characters_when_sanitizing_then_drops_them() {
    assert_eq!(sanitize_extracted_text("bell\u{0007} and\u{0000} null"), "bell and null");
}
