use crate::common::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("undefined variable {0:?}")]
    UndefinedVariable(String),
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("too many dice: {requested} requested, limit is {limit}")]
    TooManyDice { requested: UInt, limit: UInt },
    #[error("operator '{0}' cannot be narrated")]
    UnsupportedNarration(BinaryOperator),
    #[error("conditionals cannot be narrated")]
    NarratedConditional,
}
