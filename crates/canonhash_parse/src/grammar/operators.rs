//! Operator matching helpers.

use canonhash_ir::ast::{AssignOp, BinaryOp, UnaryOp, UpdateOp, VarKind};
use canonhash_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// Binary operator at the current token. `in` is skipped when `no_in` is set.
    pub(crate) fn match_binary_op(&self, no_in: bool) -> Option<BinaryOp> {
        let op = match self.cursor.current_kind() {
            TokenKind::StarStar => BinaryOp::Exp,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Shl => BinaryOp::Shl,
            TokenKind::Shr => BinaryOp::Shr,
            TokenKind::UShr => BinaryOp::UShr,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::InstanceOf => BinaryOp::InstanceOf,
            TokenKind::In if !no_in => BinaryOp::In,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::EqEqEq => BinaryOp::StrictEq,
            TokenKind::NotEqEq => BinaryOp::StrictNotEq,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::QuestionQuestion => BinaryOp::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub(crate) fn match_assign_op(&self) -> Option<AssignOp> {
        let op = match self.cursor.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::StarStarEq => AssignOp::Exp,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Mod,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::ShlEq => AssignOp::Shl,
            TokenKind::ShrEq => AssignOp::Shr,
            TokenKind::UShrEq => AssignOp::UShr,
            TokenKind::AmpEq => AssignOp::BitAnd,
            TokenKind::CaretEq => AssignOp::BitXor,
            TokenKind::PipeEq => AssignOp::BitOr,
            TokenKind::AmpAmpEq => AssignOp::And,
            TokenKind::PipePipeEq => AssignOp::Or,
            TokenKind::QuestionQuestionEq => AssignOp::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        let op = match self.cursor.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::TypeOf => UnaryOp::TypeOf,
            TokenKind::Void => UnaryOp::Void,
            TokenKind::Delete => UnaryOp::Delete,
            TokenKind::Await => UnaryOp::Await,
            _ => return None,
        };
        Some(op)
    }

    pub(crate) fn match_update_op(&self) -> Option<UpdateOp> {
        match self.cursor.current_kind() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    pub(crate) fn match_var_kind(&self) -> Option<VarKind> {
        match self.cursor.current_kind() {
            TokenKind::Var => Some(VarKind::Var),
            TokenKind::Let => Some(VarKind::Let),
            TokenKind::Const => Some(VarKind::Const),
            _ => None,
        }
    }
}

/// Name usable after `.` or as an object key: an identifier or any keyword.
pub(crate) fn property_name(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Ident(name) => Some(name.clone()),
        other => other
            .spelling()
            .filter(|text| text.starts_with(|c: char| c.is_ascii_alphabetic()))
            .map(str::to_owned),
    }
}
