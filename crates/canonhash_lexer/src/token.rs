//! Cooked tokens handed to the parser.

use std::fmt;

use canonhash_ir::Span;

/// Text of one template piece.
///
/// `raw` is the source text with line endings normalized to `\n`; `cooked`
/// has its escapes processed as well. Tagged templates see `raw`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateChunk {
    pub cooked: String,
    pub raw: String,
}

/// Token kinds after escape processing and keyword recognition.
///
/// `async` and `of` are contextual and stay identifiers; the parser checks
/// their text where they matter.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    /// Decimal digits, without the `n` suffix.
    BigInt(String),
    Str(String),
    Regex {
        pattern: String,
        flags: String,
    },
    Ident(String),

    // Templates: `` `a` `` is `Template`; `` `a${x}b${y}c` `` is
    // `TemplateHead("a")`, `x`, `TemplateMiddle("b")`, `y`, `TemplateTail("c")`.
    Template(TemplateChunk),
    TemplateHead(TemplateChunk),
    TemplateMiddle(TemplateChunk),
    TemplateTail(TemplateChunk),

    // Keywords
    Function,
    Return,
    Var,
    Let,
    Const,
    If,
    Else,
    While,
    Do,
    For,
    In,
    Break,
    Continue,
    Throw,
    Try,
    Catch,
    Finally,
    Switch,
    Case,
    Default,
    New,
    Delete,
    TypeOf,
    Void,
    InstanceOf,
    This,
    Null,
    True,
    False,
    Await,
    Yield,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Ellipsis,
    Colon,
    Question,
    QuestionDot,
    FatArrow,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Shl,
    Shr,
    UShr,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Amp,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    QuestionQuestion,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    StarStarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    UShrEq,
    AmpEq,
    PipeEq,
    CaretEq,
    AmpAmpEq,
    PipePipeEq,
    QuestionQuestionEq,

    Eof,
}

impl TokenKind {
    /// Source spelling for fixed tokens; `None` for literals, identifiers and EOF.
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::Str(_)
            | TokenKind::Regex { .. }
            | TokenKind::Ident(_)
            | TokenKind::Template(_)
            | TokenKind::TemplateHead(_)
            | TokenKind::TemplateMiddle(_)
            | TokenKind::TemplateTail(_)
            | TokenKind::Eof => {
                return None;
            }
            TokenKind::Function => "function",
            TokenKind::Return => "return",
            TokenKind::Var => "var",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Throw => "throw",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::New => "new",
            TokenKind::Delete => "delete",
            TokenKind::TypeOf => "typeof",
            TokenKind::Void => "void",
            TokenKind::InstanceOf => "instanceof",
            TokenKind::This => "this",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Await => "await",
            TokenKind::Yield => "yield",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::QuestionDot => "?.",
            TokenKind::FatArrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::UShr => ">>>",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::EqEqEq => "===",
            TokenKind::NotEqEq => "!==",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::QuestionQuestion => "??",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::StarStarEq => "**=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::UShrEq => ">>>=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::AmpAmpEq => "&&=",
            TokenKind::PipePipeEq => "||=",
            TokenKind::QuestionQuestionEq => "??=",
        };
        Some(text)
    }

    /// Whether this is the identifier `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, TokenKind::Ident(text) if text == name)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number `{n}`"),
            TokenKind::BigInt(digits) => write!(f, "bigint `{digits}n`"),
            TokenKind::Str(_) => write!(f, "string literal"),
            TokenKind::Regex { pattern, flags } => write!(f, "regular expression `/{pattern}/{flags}`"),
            TokenKind::Template(_) | TokenKind::TemplateHead(_) => write!(f, "template literal"),
            TokenKind::TemplateMiddle(_) | TokenKind::TemplateTail(_) => {
                write!(f, "template continuation")
            }
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Eof => write!(f, "end of input"),
            other => write!(f, "`{}`", other.spelling().unwrap_or_default()),
        }
    }
}

/// A token with its span.
///
/// `newline_before` records whether a line terminator (including one inside
/// a block comment) separates this token from the previous one; the parser
/// uses it for semicolon insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, newline_before: bool) -> Self {
        Token {
            kind,
            span,
            newline_before,
        }
    }
}

/// Lexer output, always terminated by a single `Eof` token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> {
        self.tokens.iter().map(|t| &t.kind)
    }
}
