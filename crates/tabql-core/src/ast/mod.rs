//! Abstract Syntax Tree (AST) types for SELECT statements.

mod expression;
mod statement;

pub use crate::parser::Number;
pub use expression::{ColumnName, ColumnRef, CompareOp, Condition, Operand, Separator};
pub use statement::{
    Join, JoinKey, JoinKind, OrderBy, OrderDirection, SelectStatement, TableRef,
};
