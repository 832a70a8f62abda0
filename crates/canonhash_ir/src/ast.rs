//! Structural AST of callable source.
//!
//! This is the position-free form of a callable: node kinds and their
//! semantically relevant children only. There are no spans, no comments and no
//! raw literal text, so two callables whose source differs only in layout or
//! comments produce equal trees, while any change to names, parameters,
//! operators, literals or statement structure produces a different tree.
//!
//! Parentheses used for grouping leave no trace; the tree shape already
//! encodes precedence.

/// Root of a normalized callable.
#[derive(Clone, Debug, PartialEq)]
pub enum StructuralAst {
    Function(Function),
    Arrow(ArrowFunction),
}

/// `function [*] [name](params) { body }`, optionally `async`.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
}

/// `(params) => body`, optionally `async`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Param>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

/// A formal parameter. `rest` marks `...target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub target: Pattern,
    pub default: Option<Expr>,
    pub rest: bool,
}

/// Binding or assignment target.
///
/// Shorthand object entries (`{ a }`, `{ a = 1 }`) are stored in their long
/// form (`{ a: a }`, `{ a: a = 1 }`), which binds identically.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Ident(String),
    /// `{ key: target, ...rest }`
    Object(Vec<PatternProp>),
    /// `[a, , b, ...rest]`; `None` is a hole.
    Array(Vec<Option<Pattern>>),
    /// `target = default` nested inside a pattern.
    Default {
        target: Box<Pattern>,
        default: Box<Expr>,
    },
    /// `...target`
    Rest(Box<Pattern>),
    /// Member or index target; only reachable from assignments and
    /// `for (... in/of ...)` heads.
    Expr(Box<Expr>),
}

impl Pattern {
    /// Name of a plain identifier target.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Pattern::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PatternProp {
    Entry { key: PropKey, value: Pattern },
    Rest(Pattern),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
    pub target: Pattern,
    pub init: Option<Expr>,
}

/// Initializer slot of a classic `for (init; test; update)` loop.
#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Decl(VarDecl),
    Expr(Expr),
}

/// Left-hand side of `for (x in e)` / `for (x of e)`.
#[derive(Clone, Debug, PartialEq)]
pub enum ForHead {
    Decl(VarKind, Pattern),
    Target(Pattern),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pattern>,
    pub body: Vec<Stmt>,
}

/// `case test:` or `default:` (no test) with its statements.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    VarDecl(VarDecl),
    FunctionDecl(Function),
    Return(Option<Expr>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    Block(Vec<Stmt>),
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    For {
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForIn {
        head: ForHead,
        object: Expr,
        body: Box<Stmt>,
    },
    ForOf {
        head: ForHead,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Throw(Expr),
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Empty,
}

/// Object literal key.
///
/// Identifier and string keys name the same property, so both become `Named`.
#[derive(Clone, Debug, PartialEq)]
pub enum PropKey {
    Named(String),
    Number(f64),
    Computed(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    /// `key: value`
    Init { key: PropKey, value: Expr },
    /// `{ name }`
    Shorthand(String),
    /// `key(params) { body }`, possibly `async` or a generator.
    Method { key: PropKey, function: Function },
    /// `get key() { body }`
    Getter { key: PropKey, function: Function },
    /// `set key(value) { body }`
    Setter { key: PropKey, function: Function },
    /// `...expr`
    Spread(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Decimal digits of a BigInt literal, without the `n` suffix.
    BigInt(String),
    /// `/pattern/flags`
    Regex {
        pattern: String,
        flags: String,
    },
    /// Untagged template; `quasis` holds the cooked text around each
    /// substitution, so it is one longer than `exprs`.
    Template {
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },
    /// Tagged template; the tag sees the raw text.
    TaggedTemplate {
        tag: Box<Expr>,
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },
    Ident(String),
    This,
    /// `None` is a hole (`[1, , 2]`).
    Array(Vec<Option<Expr>>),
    Object(Vec<Property>),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        target: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Pattern>,
        value: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        optional: bool,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: String,
        optional: bool,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        optional: bool,
    },
    /// A member/call chain containing at least one `?.` link. The whole
    /// chain short-circuits, so `a?.b.c` and `(a?.b).c` differ.
    Chain(Box<Expr>),
    Sequence(Vec<Expr>),
    Spread(Box<Expr>),
    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },
}

impl Expr {
    /// Whether this expression may appear on the left of a plain or
    /// compound assignment, or as the operand of `++`/`--`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Expr::Ident(_)
                | Expr::Member {
                    optional: false,
                    ..
                }
                | Expr::Index {
                    optional: false,
                    ..
                }
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    BitNot,
    TypeOf,
    Void,
    Delete,
    Await,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::BitNot => "~",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
            UnaryOp::Await => "await",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

/// Binary and logical operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    UShr,
    Lt,
    Gt,
    LtEq,
    GtEq,
    InstanceOf,
    In,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    Coalesce,
}

impl BinaryOp {
    /// Binding power; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Coalesce | BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::BitOr => 3,
            BinaryOp::BitXor => 4,
            BinaryOp::BitAnd => 5,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::StrictEq | BinaryOp::StrictNotEq => 6,
            BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq
            | BinaryOp::InstanceOf
            | BinaryOp::In => 7,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => 8,
            BinaryOp::Add | BinaryOp::Sub => 9,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 10,
            BinaryOp::Exp => 11,
        }
    }

    /// `**` is the only right-associative binary operator.
    pub fn is_right_assoc(self) -> bool {
        matches!(self, BinaryOp::Exp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Exp => "**",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::In => "in",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Coalesce => "??",
        }
    }
}

/// Plain and compound assignment operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    Coalesce,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Exp => "**=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::UShr => ">>>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitXor => "^=",
            AssignOp::BitOr => "|=",
            AssignOp::And => "&&=",
            AssignOp::Or => "||=",
            AssignOp::Coalesce => "??=",
        }
    }
}
