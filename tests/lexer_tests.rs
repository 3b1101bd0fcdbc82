use scriptcloak::lexer::{declared_identifiers, rewrite_string_literals, string_literals};

#[test]
fn finds_declarations_in_source_order() {
    let src = "var alpha = 1;\nlet beta = 2;\nconst gamma_3 = alpha + beta;";
    assert_eq!(declared_identifiers(src), vec!["alpha", "beta", "gamma_3"]);
}

#[test]
fn records_first_occurrence_per_distinct_name() {
    let src = "var x = 1; var y = 2; var x = 3;";
    assert_eq!(declared_identifiers(src), vec!["x", "y"]);
}

#[test]
fn accepts_dollar_and_underscore_identifiers() {
    let src = "let $el = 1; const _private = 2; var a$b_c = 3;";
    assert_eq!(declared_identifiers(src), vec!["$el", "_private", "a$b_c"]);
}

#[test]
fn ignores_names_starting_with_a_digit() {
    // "var 9lives" is not a declaration; nothing should match it
    assert!(declared_identifiers("var 9lives = 1;").is_empty());
}

#[test]
fn matches_all_three_delimiters() {
    let src = r#"f('one', "two", `three`);"#;
    let lits = string_literals(src);
    assert_eq!(lits.len(), 3);
    assert_eq!(lits[0].delimiter, '\'');
    assert_eq!(lits[0].inner, "one");
    assert_eq!(lits[1].delimiter, '"');
    assert_eq!(lits[1].inner, "two");
    assert_eq!(lits[2].delimiter, '`');
    assert_eq!(lits[2].inner, "three");
}

#[test]
fn escaped_delimiter_does_not_terminate_literal() {
    let src = r"var s = 'it\'s fine';";
    let lits = string_literals(src);
    assert_eq!(lits.len(), 1);
    assert_eq!(lits[0].inner, r"it\'s fine");
}

#[test]
fn backtick_literal_may_span_lines() {
    let src = "let t = `line one\nline two`;";
    let lits = string_literals(src);
    assert_eq!(lits.len(), 1);
    assert_eq!(lits[0].inner, "line one\nline two");
}

#[test]
fn rewrite_replaces_only_the_literals() {
    let src = "call('a') + call(\"b\")";
    let out = rewrite_string_literals(src, |lit| format!("<{}>", lit.inner));
    assert_eq!(out, "call(<a>) + call(<b>)");
}

#[test]
fn declaration_keyword_inside_identifier_is_not_a_declaration() {
    // "outlet" contains "let" but declares nothing
    assert!(declared_identifiers("outlet = 1;").is_empty());
}
