//! Grammar productions, split by syntactic category.

mod expr;
mod function;
mod operators;
mod pattern;
mod stmt;
