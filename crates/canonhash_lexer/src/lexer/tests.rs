use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    match lex(source) {
        Ok(list) => list.tokens.into_iter().map(|t| t.kind).collect(),
        Err(err) => panic!("lex failed for {source:?}: {err}"),
    }
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_owned())
}

#[test]
fn lex_function_header() {
    assert_eq!(
        kinds("function (a, b) { return a }"),
        vec![
            TokenKind::Function,
            TokenKind::LParen,
            ident("a"),
            TokenKind::Comma,
            ident("b"),
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Return,
            ident("a"),
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_dropped() {
    let with_comments = kinds("function (a, b) { // no type of comment\n /* at all */ return a }");
    let without = kinds("function (a, b) { return a }");
    assert_eq!(with_comments, without);
}

#[test]
fn newline_flag_tracks_line_breaks() {
    let Ok(list) = lex("a\nb c /* x\n */ d") else {
        panic!("lex failed");
    };
    let flags: Vec<bool> = list.tokens.iter().map(|t| t.newline_before).collect();
    // a, b, c, d, EOF
    assert_eq!(flags, vec![false, true, false, true, false]);
}

#[test]
fn longest_operator_wins() {
    assert_eq!(
        kinds("a >>>= b === c ?? d ... e"),
        vec![
            ident("a"),
            TokenKind::UShrEq,
            ident("b"),
            TokenKind::EqEqEq,
            ident("c"),
            TokenKind::QuestionQuestion,
            ident("d"),
            TokenKind::Ellipsis,
            ident("e"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_versus_identifiers() {
    assert_eq!(
        kinds("in inner async of $x _y"),
        vec![
            TokenKind::In,
            ident("inner"),
            ident("async"),
            ident("of"),
            ident("$x"),
            ident("_y"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn number_forms() {
    assert_eq!(
        kinds("1 1.0 .5 2e3 0x1F 0o17 0b101"),
        vec![
            TokenKind::Number(1.0),
            TokenKind::Number(1.0),
            TokenKind::Number(0.5),
            TokenKind::Number(2000.0),
            TokenKind::Number(31.0),
            TokenKind::Number(15.0),
            TokenKind::Number(5.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn string_escapes() {
    assert_eq!(
        kinds(r#""a\nb" 'it\'s' "\x41B\u{43}" "\q""#),
        vec![
            TokenKind::Str("a\nb".into()),
            TokenKind::Str("it's".into()),
            TokenKind::Str("ABC".into()),
            TokenKind::Str("q".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn surrogate_pair_escape() {
    assert_eq!(
        kinds(r#""\uD83D\uDE00""#),
        vec![TokenKind::Str("\u{1F600}".into()), TokenKind::Eof]
    );
}

#[test]
fn line_continuation_in_string() {
    assert_eq!(
        kinds("\"ab\\\ncd\""),
        vec![TokenKind::Str("abcd".into()), TokenKind::Eof]
    );
}

#[test]
fn unterminated_string_is_an_error() {
    let err = lex("function () { return \"abc }");
    assert!(matches!(
        err,
        Err(LexError {
            kind: LexErrorKind::UnterminatedString,
            ..
        })
    ));
}

#[test]
fn unterminated_comment_is_an_error() {
    let err = lex("function () { /* never closed }");
    assert!(matches!(
        err,
        Err(LexError {
            kind: LexErrorKind::UnterminatedComment,
            ..
        })
    ));
}

#[test]
fn unexpected_character_reports_span() {
    let Err(err) = lex("a # b") else {
        panic!("expected an error");
    };
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('#'));
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn bad_hex_escape_is_an_error() {
    let err = lex(r#""\xZZ""#);
    assert!(matches!(
        err,
        Err(LexError {
            kind: LexErrorKind::InvalidEscape(_),
            ..
        })
    ));
}

#[test]
fn eof_span_sits_at_end() {
    let Ok(list) = lex("ab") else {
        panic!("lex failed");
    };
    assert_eq!(list.len(), 2);
    assert_eq!(list.tokens[1].span, Span::new(2, 2));
}

#[test]
fn empty_source_yields_only_eof() {
    assert_eq!(kinds("  \n\t "), vec![TokenKind::Eof]);
}

fn chunk(cooked: &str, raw: &str) -> TemplateChunk {
    TemplateChunk {
        cooked: cooked.to_owned(),
        raw: raw.to_owned(),
    }
}

fn lex_error(source: &str) -> LexErrorKind {
    match lex(source) {
        Ok(list) => panic!("expected an error for {source:?}, got {:?}", list.tokens),
        Err(err) => err.kind,
    }
}

#[test]
fn template_without_substitutions() {
    assert_eq!(
        kinds("`plain`"),
        vec![TokenKind::Template(chunk("plain", "plain")), TokenKind::Eof]
    );
}

#[test]
fn template_substitutions_split_the_text() {
    assert_eq!(
        kinds("`a${x}b${ {c: 1} }d`"),
        vec![
            TokenKind::TemplateHead(chunk("a", "a")),
            ident("x"),
            TokenKind::TemplateMiddle(chunk("b", "b")),
            TokenKind::LBrace,
            ident("c"),
            TokenKind::Colon,
            TokenKind::Number(1.0),
            TokenKind::RBrace,
            TokenKind::TemplateTail(chunk("d", "d")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn nested_templates() {
    assert_eq!(
        kinds("`a${`b${c}`}d`"),
        vec![
            TokenKind::TemplateHead(chunk("a", "a")),
            TokenKind::TemplateHead(chunk("b", "b")),
            ident("c"),
            TokenKind::TemplateTail(chunk("", "")),
            TokenKind::TemplateTail(chunk("d", "d")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn template_escapes_and_line_endings() {
    assert_eq!(
        kinds("`\\x41\r\nz\\`\\${`"),
        vec![
            TokenKind::Template(chunk("A\nz`${", "\\x41\nz\\`\\${")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_templates() {
    assert_eq!(lex_error("`abc"), LexErrorKind::UnterminatedTemplate);
    assert_eq!(lex_error("`a${b"), LexErrorKind::UnterminatedTemplate);
    assert_eq!(lex_error("`a${b}c"), LexErrorKind::UnterminatedTemplate);
}

#[test]
fn regex_after_operator() {
    assert_eq!(
        kinds(r"return /a[/]b\//gi.test(x)"),
        vec![
            TokenKind::Return,
            TokenKind::Regex {
                pattern: r"a[/]b\/".into(),
                flags: "gi".into(),
            },
            TokenKind::Dot,
            ident("test"),
            TokenKind::LParen,
            ident("x"),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("x = /=/"),
        vec![
            ident("x"),
            TokenKind::Eq,
            TokenKind::Regex {
                pattern: "=".into(),
                flags: String::new(),
            },
            TokenKind::Eof,
        ]
    );
}

#[test]
fn slash_after_operand_is_division() {
    assert_eq!(
        kinds("a / b /= (c) / 2"),
        vec![
            ident("a"),
            TokenKind::Slash,
            ident("b"),
            TokenKind::SlashEq,
            TokenKind::LParen,
            ident("c"),
            TokenKind::RParen,
            TokenKind::Slash,
            TokenKind::Number(2.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn malformed_regexes() {
    assert_eq!(lex_error("/a/gg"), LexErrorKind::InvalidRegexFlags("gg".into()));
    assert_eq!(lex_error("/a/x"), LexErrorKind::InvalidRegexFlags("x".into()));
    assert_eq!(lex_error("/abc\n/"), LexErrorKind::UnterminatedRegex);
    assert_eq!(lex_error("(/[/)"), LexErrorKind::UnterminatedRegex);
}

#[test]
fn optional_chaining_versus_conditional() {
    assert_eq!(
        kinds("a?.b ?.5:c"),
        vec![
            ident("a"),
            TokenKind::QuestionDot,
            ident("b"),
            TokenKind::Question,
            TokenKind::Number(0.5),
            TokenKind::Colon,
            ident("c"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn bigint_literals_normalize_to_decimal() {
    assert_eq!(
        kinds("10n 0x1Fn 0o17n 0b101n 007n 0n"),
        vec![
            TokenKind::BigInt("10".into()),
            TokenKind::BigInt("31".into()),
            TokenKind::BigInt("15".into()),
            TokenKind::BigInt("5".into()),
            TokenKind::BigInt("7".into()),
            TokenKind::BigInt("0".into()),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFn"),
        vec![
            TokenKind::BigInt("340282366920938463463374607431768211455".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unpaired_surrogates_are_rejected() {
    for source in [r#""\uD800""#, r#""\uD800x""#, r#""\uDC00""#, r#""\u{D800}""#] {
        assert_eq!(lex_error(source), LexErrorKind::InvalidEscape("\\u".into()));
    }
}

#[test]
fn unicode_whitespace_is_trivia() {
    assert_eq!(
        kinds("a\u{A0}b\u{FEFF}c\u{3000}d\u{2003}e"),
        vec![ident("a"), ident("b"), ident("c"), ident("d"), ident("e"), TokenKind::Eof]
    );
    assert_eq!(kinds("é\u{2028}"), vec![ident("é"), TokenKind::Eof]);
}

#[test]
fn unicode_line_separators_end_lines() {
    let Ok(list) = lex("a\u{2028}b\u{2029}c // note\u{2028}d") else {
        panic!("lex failed");
    };
    let flags: Vec<bool> = list.tokens.iter().map(|t| t.newline_before).collect();
    // a, b, c, d, EOF
    assert_eq!(flags, vec![false, true, true, true, false]);
    assert_eq!(
        kinds("\"a\\\u{2028}b\""),
        vec![TokenKind::Str("ab".into()), TokenKind::Eof]
    );
}
