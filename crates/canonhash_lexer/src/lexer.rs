//! Logos-driven lexer for callable source.
//!
//! Whitespace and comments never become tokens. Line terminators are
//! folded into the `newline_before` flag of the following token.
//!
//! Logos handles the regular part of the grammar. Template literals and
//! regular expression literals are context dependent, so `lex` scans them
//! by hand from the remainder and bumps the logos cursor past them.

use canonhash_ir::Span;
use logos::Logos;

use crate::error::{LexError, LexErrorKind};
use crate::token::{TemplateChunk, Token, TokenKind, TokenList};

/// Raw token from logos (before escape processing).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\x0B\x0C\x{A0}\x{1680}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}\x{FEFF}]+")]
enum RawToken {
    // === Trivia ===
    #[regex(r"\r\n|\n|\r|\x{2028}|\x{2029}")]
    Newline,

    #[regex(r"//[^\r\n\x{2028}\x{2029}]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Shorter than any complete block comment, so it only wins when `*/` is missing.
    #[token("/*")]
    UnterminatedComment,

    // === Keywords ===
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("throw")]
    Throw,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("new")]
    New,
    #[token("delete")]
    Delete,
    #[token("typeof")]
    TypeOf,
    #[token("void")]
    Void,
    #[token("instanceof")]
    InstanceOf,
    #[token("this")]
    This,
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("await")]
    Await,
    #[token("yield")]
    Yield,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("`")]
    Backtick,
    #[token("=>")]
    FatArrow,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NotEqEq,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,

    // === Assignment ===
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("**=")]
    StarStarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token(">>>=")]
    UShrEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("&&=")]
    AmpAmpEq,
    #[token("||=")]
    PipePipeEq,
    #[token("??=")]
    QuestionQuestionEq,

    // === Literals ===
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Decimal,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    Hex,

    #[regex(r"0[oO][0-7]+")]
    Octal,

    #[regex(r"0[bB][01]+")]
    Binary,

    #[regex(r"[0-9]+n")]
    #[regex(r"0[xX][0-9a-fA-F]+n")]
    #[regex(r"0[oO][0-7]+n")]
    #[regex(r"0[bB][01]+n")]
    BigInt,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n]|\\\r\n|\\\n|\\\r)*""#)]
    #[regex(r"'([^'\\\r\n]|\\[^\r\n]|\\\r\n|\\\n|\\\r)*'")]
    Str,

    // Shorter than the matching complete literal, so it only wins without a closing quote.
    #[regex(r#""([^"\\\r\n]|\\[^\r\n]|\\\r\n|\\\n|\\\r)*"#)]
    #[regex(r"'([^'\\\r\n]|\\[^\r\n]|\\\r\n|\\\n|\\\r)*")]
    UnterminatedStr,

    // Non-ASCII letters minus the Unicode space separators, BOM and U+2028/U+2029.
    #[regex(
        r"[a-zA-Z_$\x{A1}-\x{167F}\x{1681}-\x{1FFF}\x{200B}-\x{2027}\x{202A}-\x{202E}\x{2030}-\x{205E}\x{2060}-\x{2FFF}\x{3001}-\x{FEFE}\x{FF00}-\x{10FFFF}][a-zA-Z0-9_$\x{A1}-\x{167F}\x{1681}-\x{1FFF}\x{200B}-\x{2027}\x{202A}-\x{202E}\x{2030}-\x{205E}\x{2060}-\x{2FFF}\x{3001}-\x{FEFE}\x{FF00}-\x{10FFFF}]*"
    )]
    Ident,
}

/// Lex `source` into a token list ending in `Eof`.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut list = TokenList::new();
    let mut raw = RawToken::lexer(source);
    let mut newline_before = false;
    // Brace depth inside each open template substitution, innermost last.
    let mut template_depth: Vec<u32> = Vec::new();

    while let Some(result) = raw.next() {
        let start = raw.span().start;
        let span = Span::from_range(raw.span());
        let slice = raw.slice();
        let to_end = || Span::from_range(start..source.len());

        let Ok(token) = result else {
            let found = slice.chars().next().unwrap_or('\0');
            return Err(LexError::new(LexErrorKind::UnexpectedChar(found), span));
        };

        let kind = match token {
            RawToken::Newline => {
                newline_before = true;
                continue;
            }
            RawToken::LineComment => continue,
            RawToken::BlockComment => {
                if slice.contains(is_line_terminator) {
                    newline_before = true;
                }
                continue;
            }
            RawToken::UnterminatedComment => {
                return Err(LexError::new(LexErrorKind::UnterminatedComment, span));
            }
            RawToken::UnterminatedStr => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, span));
            }
            RawToken::Backtick => {
                let (len, kind) = scan_template(raw.remainder(), true)
                    .map_err(|kind| LexError::new(kind, to_end()))?;
                raw.bump(len);
                if matches!(kind, TokenKind::TemplateHead(_)) {
                    template_depth.push(0);
                }
                kind
            }
            RawToken::LBrace => {
                if let Some(depth) = template_depth.last_mut() {
                    *depth += 1;
                }
                TokenKind::LBrace
            }
            RawToken::RBrace if template_depth.last() == Some(&0) => {
                // Closes a substitution: the template text continues here.
                template_depth.pop();
                let (len, kind) = scan_template(raw.remainder(), false)
                    .map_err(|kind| LexError::new(kind, to_end()))?;
                raw.bump(len);
                if matches!(kind, TokenKind::TemplateMiddle(_)) {
                    template_depth.push(0);
                }
                kind
            }
            RawToken::RBrace => {
                if let Some(depth) = template_depth.last_mut() {
                    *depth -= 1;
                }
                TokenKind::RBrace
            }
            RawToken::Slash | RawToken::SlashEq
                if regex_allowed(list.tokens.last().map(|t| &t.kind)) =>
            {
                let (len, kind) = scan_regex(&source[start + 1..])
                    .map_err(|kind| LexError::new(kind, to_end()))?;
                raw.bump(1 + len - slice.len());
                kind
            }
            RawToken::Question if optional_chain_follows(raw.remainder()) => {
                raw.bump(1);
                TokenKind::QuestionDot
            }
            other => cook(other, slice, span)?,
        };

        let span = Span::from_range(raw.span());
        list.tokens.push(Token::new(kind, span, newline_before));
        newline_before = false;
    }

    if !template_depth.is_empty() {
        let end = Span::from_range(source.len()..source.len());
        return Err(LexError::new(LexErrorKind::UnterminatedTemplate, end));
    }

    let end = Span::from_range(source.len()..source.len());
    list.tokens.push(Token::new(TokenKind::Eof, end, newline_before));
    Ok(list)
}

/// Convert a non-trivia raw token into its cooked kind.
fn cook(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Decimal => TokenKind::Number(parse_decimal(slice, span)?),
        RawToken::Hex => TokenKind::Number(parse_radix(&slice[2..], 16, span)?),
        RawToken::Octal => TokenKind::Number(parse_radix(&slice[2..], 8, span)?),
        RawToken::Binary => TokenKind::Number(parse_radix(&slice[2..], 2, span)?),
        RawToken::BigInt => TokenKind::BigInt(parse_bigint(&slice[..slice.len() - 1])),
        RawToken::Str => {
            let body = &slice[1..slice.len() - 1];
            TokenKind::Str(unescape(body).map_err(|kind| LexError::new(kind, span))?)
        }
        RawToken::Ident => TokenKind::Ident(slice.to_owned()),

        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::Var => TokenKind::Var,
        RawToken::Let => TokenKind::Let,
        RawToken::Const => TokenKind::Const,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Finally => TokenKind::Finally,
        RawToken::Switch => TokenKind::Switch,
        RawToken::Case => TokenKind::Case,
        RawToken::Default => TokenKind::Default,
        RawToken::New => TokenKind::New,
        RawToken::Delete => TokenKind::Delete,
        RawToken::TypeOf => TokenKind::TypeOf,
        RawToken::Void => TokenKind::Void,
        RawToken::InstanceOf => TokenKind::InstanceOf,
        RawToken::This => TokenKind::This,
        RawToken::Null => TokenKind::Null,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Await => TokenKind::Await,
        RawToken::Yield => TokenKind::Yield,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::FatArrow => TokenKind::FatArrow,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::UShr => TokenKind::UShr,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::EqEqEq => TokenKind::EqEqEq,
        RawToken::NotEqEq => TokenKind::NotEqEq,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::QuestionQuestion => TokenKind::QuestionQuestion,

        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::StarStarEq => TokenKind::StarStarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::ShlEq => TokenKind::ShlEq,
        RawToken::ShrEq => TokenKind::ShrEq,
        RawToken::UShrEq => TokenKind::UShrEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::AmpAmpEq => TokenKind::AmpAmpEq,
        RawToken::PipePipeEq => TokenKind::PipePipeEq,
        RawToken::QuestionQuestionEq => TokenKind::QuestionQuestionEq,

        RawToken::Newline
        | RawToken::LineComment
        | RawToken::BlockComment
        | RawToken::UnterminatedComment
        | RawToken::UnterminatedStr
        | RawToken::Backtick
        | RawToken::LBrace
        | RawToken::RBrace => unreachable!("trivia, braces and templates are handled by lex()"),
    };
    Ok(kind)
}

fn parse_decimal(text: &str, span: Span) -> Result<f64, LexError> {
    text.parse::<f64>()
        .map_err(|_| LexError::new(LexErrorKind::InvalidNumber(text.to_owned()), span))
}

/// Parse a prefixed integer literal. Values beyond `u128` are rejected.
#[expect(
    clippy::cast_precision_loss,
    reason = "numbers are f64; large integers round to the nearest representable value"
)]
fn parse_radix(digits: &str, radix: u32, span: Span) -> Result<f64, LexError> {
    u128::from_str_radix(digits, radix)
        .map(|value| value as f64)
        .map_err(|_| LexError::new(LexErrorKind::InvalidNumber(digits.to_owned()), span))
}

/// Decimal digits of a BigInt literal written in any radix.
///
/// Leading zeros are dropped, so `0x10n`, `0o20n` and `16n` agree.
fn parse_bigint(text: &str) -> String {
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0o" | "0O") => (&text[2..], 8),
        Some("0b" | "0B") => (&text[2..], 2),
        _ => (text, 10),
    };
    // Little-endian base-10 digits; literals have no size limit.
    let mut decimal: Vec<u32> = vec![0];
    for c in digits.chars() {
        let mut carry = c.to_digit(radix).unwrap_or_default();
        for digit in &mut decimal {
            let value = *digit * radix + carry;
            *digit = value % 10;
            carry = value / 10;
        }
        while carry > 0 {
            decimal.push(carry % 10);
            carry /= 10;
        }
    }
    while decimal.len() > 1 && decimal.last() == Some(&0) {
        decimal.pop();
    }
    decimal
        .iter()
        .rev()
        .filter_map(|&digit| char::from_digit(digit, 10))
        .collect()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whether a `/` after `prev` starts a regular expression rather than a
/// division. Division follows anything that ends an operand.
fn regex_allowed(prev: Option<&TokenKind>) -> bool {
    !matches!(
        prev,
        Some(
            TokenKind::Number(_)
                | TokenKind::BigInt(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::Regex { .. }
                | TokenKind::Template(_)
                | TokenKind::TemplateTail(_)
                | TokenKind::This
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    )
}

/// `?.` is optional chaining unless a digit follows (`a ?.5 : b`).
fn optional_chain_follows(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('.') && !chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Scan template text after a `` ` `` (`opening`) or after the `}` closing a
/// substitution, up to and including the closing `` ` `` or the next `${`.
///
/// Returns the consumed length and the token.
fn scan_template(rest: &str, opening: bool) -> Result<(usize, TokenKind), LexErrorKind> {
    let mut chars = rest.char_indices();
    let (end, substitution) = loop {
        match chars.next() {
            Some((_, '\\')) => {
                chars.next();
            }
            Some((idx, '`')) => break (idx, false),
            Some((idx, '$')) if rest[idx + 1..].starts_with('{') => break (idx, true),
            Some(_) => {}
            None => return Err(LexErrorKind::UnterminatedTemplate),
        }
    };

    let raw = rest[..end].replace("\r\n", "\n").replace('\r', "\n");
    let cooked = unescape(&raw)?;
    let chunk = TemplateChunk { cooked, raw };
    let kind = match (opening, substitution) {
        (true, false) => TokenKind::Template(chunk),
        (true, true) => TokenKind::TemplateHead(chunk),
        (false, true) => TokenKind::TemplateMiddle(chunk),
        (false, false) => TokenKind::TemplateTail(chunk),
    };
    let len = end + if substitution { 2 } else { 1 };
    Ok((len, kind))
}

const REGEX_FLAGS: &str = "dgimsuvy";

/// Scan a regular expression literal after its opening `/`.
///
/// A `/` inside a class (`[/]`) or after a backslash does not close the
/// body. Returns the consumed length (body, closing `/`, flags) and the token.
fn scan_regex(rest: &str) -> Result<(usize, TokenKind), LexErrorKind> {
    let mut chars = rest.char_indices();
    let mut in_class = false;
    let end = loop {
        match chars.next() {
            Some((_, '\\')) => match chars.next() {
                Some((_, c)) if !is_line_terminator(c) => {}
                _ => return Err(LexErrorKind::UnterminatedRegex),
            },
            Some((_, '[')) => in_class = true,
            Some((_, ']')) => in_class = false,
            Some((idx, '/')) if !in_class => break idx,
            Some((_, c)) if is_line_terminator(c) => return Err(LexErrorKind::UnterminatedRegex),
            Some(_) => {}
            None => return Err(LexErrorKind::UnterminatedRegex),
        }
    };

    let tail = &rest[end + 1..];
    let flags_len = tail
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(tail.len());
    let flags = &tail[..flags_len];
    let mut seen = String::new();
    for flag in flags.chars() {
        if !REGEX_FLAGS.contains(flag) || seen.contains(flag) {
            return Err(LexErrorKind::InvalidRegexFlags(flags.to_owned()));
        }
        seen.push(flag);
    }

    let kind = TokenKind::Regex {
        pattern: rest[..end].to_owned(),
        flags: flags.to_owned(),
    };
    Ok((end + 1 + flags_len, kind))
}

/// Process escape sequences of a string literal body.
///
/// Unknown escapes yield the escaped character itself, and an escaped line
/// terminator is a line continuation that contributes nothing.
pub(crate) fn unescape(body: &str) -> Result<String, LexErrorKind> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            return Err(LexErrorKind::InvalidEscape("\\".to_owned()));
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let code = take_hex(&mut chars, 2).ok_or_else(|| invalid_escape("\\x"))?;
                out.push(char::from_u32(code).ok_or_else(|| invalid_escape("\\x"))?);
            }
            'u' => {
                let code = read_unicode_escape(&mut chars)?;
                out.push(decode_utf16_escape(code, &mut chars)?);
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn invalid_escape(text: &str) -> LexErrorKind {
    LexErrorKind::InvalidEscape(text.to_owned())
}

/// Read exactly `count` hex digits.
fn take_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, count: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    Some(value)
}

/// Read the code unit after `\u`: either `XXXX` or `{X...}`.
fn read_unicode_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<u32, LexErrorKind> {
    if chars.peek() != Some(&'{') {
        return take_hex(chars, 4).ok_or_else(|| invalid_escape("\\u"));
    }
    chars.next();
    let mut value = 0u32;
    let mut digits = 0usize;
    loop {
        match chars.next() {
            Some('}') if digits > 0 => return Ok(value),
            Some(c) => {
                let digit = c.to_digit(16).ok_or_else(|| invalid_escape("\\u{"))?;
                value = value
                    .checked_mul(16)
                    .and_then(|v| v.checked_add(digit))
                    .filter(|v| *v <= 0x10_FFFF)
                    .ok_or_else(|| invalid_escape("\\u{"))?;
                digits += 1;
            }
            None => return Err(invalid_escape("\\u{")),
        }
    }
}

/// Turn a `\u` code unit into a char, pairing a high surrogate with a
/// following `\uXXXX` low surrogate. Unpaired surrogates cannot be
/// represented in a Rust string and are rejected.
fn decode_utf16_escape(
    code: u32,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<char, LexErrorKind> {
    if !(0xD800..=0xDBFF).contains(&code) {
        return char::from_u32(code).ok_or_else(|| invalid_escape("\\u"));
    }
    let mut lookahead = chars.clone();
    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
        if let Some(low) = take_hex(&mut lookahead, 4) {
            if (0xDC00..=0xDFFF).contains(&low) {
                *chars = lookahead;
                let combined = 0x1_0000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined).ok_or_else(|| invalid_escape("\\u"));
            }
        }
    }
    Err(invalid_escape("\\u"))
}

#[cfg(test)]
mod tests;
