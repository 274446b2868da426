//! Dice-notation expression interpreter for tabletop-RPG mechanics.
//!
//! Evaluates expressions like `(3d6 + 6) * 5` either by rolling real dice
//! or deterministically in average mode, and runs multi-line stat
//! declaration scripts whose later lines may reference earlier variables:
//!
//! ```text
//! STR: (3d6 + 6) * 5
//! CON: (2d6 + 6) * 5
//! FOO: (CON + STR) / 10
//! ```
//!
//! [`parse_and_evaluate`] yields a total plus a narration of each die's
//! contribution, [`parse_and_run_script`] yields the final variable
//! environment, and [`roll_command`] handles bare `3d6+2`-style quick
//! rolls. A dice literal asking for more than [`DICE_LIMIT`] dice is
//! refused with [`Outcome::TooManyDice`] instead of an error.

pub mod character;
pub mod common;
pub mod dice;
mod error;
pub mod interp;
pub mod parse;

pub use character::{Stat, StatBlock};
pub use dice::{roll_command, roll_command_with, CommandRoll, DieGroup, GroupRoll};
pub use error::Error;
pub use interp::{
    DefaultRoller, Environment, EvalError, Evaluator, Narrator, Number, Roller, DICE_LIMIT,
};
pub use parse::{parse, parse_script, ParseError};

use crate::common::UInt;

/// A successful single-expression evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rolled {
    pub total: Number,
    pub narration: String,
}

/// How an evaluation ended: a result, or the friendly dice-cap refusal.
/// The refusal is deliberately not an [`Error`] so callers can report it
/// without treating the whole input as faulty.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Value(T),
    TooManyDice { requested: UInt, limit: UInt },
}

impl<T> Outcome<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::TooManyDice { .. } => None,
        }
    }

    pub fn is_too_many_dice(&self) -> bool {
        matches!(self, Self::TooManyDice { .. })
    }
}

fn intercept<T>(result: Result<T, EvalError>) -> Result<Outcome<T>, Error> {
    match result {
        Ok(value) => Ok(Outcome::Value(value)),
        Err(EvalError::TooManyDice { requested, limit }) => {
            Ok(Outcome::TooManyDice { requested, limit })
        }
        Err(err) => Err(err.into()),
    }
}

/// Evaluate a single expression, returning its total and a narration of
/// each die's contribution.
pub fn parse_and_evaluate(text: &str, average: bool) -> Result<Outcome<Rolled>, Error> {
    let ast = parse::parse(text)?;
    let mut narrator = Narrator::new(average);
    intercept(
        narrator
            .narrate(&ast)
            .map(|(total, narration)| Rolled { total, narration }),
    )
}

/// Run a declaration script, returning the final variable environment.
pub fn parse_and_run_script(text: &str, average: bool) -> Result<Outcome<Environment>, Error> {
    let script = parse::parse_script(text)?;
    let mut evaluator = Evaluator::new(average);
    intercept(
        evaluator
            .run_script(&script)
            .map(|()| evaluator.into_env()),
    )
}

/// Shorthand for [`parse_and_evaluate`].
pub fn roll(text: &str, average: bool) -> Result<Outcome<Rolled>, Error> {
    parse_and_evaluate(text, average)
}
