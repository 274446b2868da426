use thiserror::Error;

use crate::interp::EvalError;
use crate::parse::ParseError;

/// Any failure from the public entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
