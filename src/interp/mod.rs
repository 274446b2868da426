mod env;
mod error;
mod eval;
mod narrate;
mod num;
mod roller;

use crate::common::*;
use crate::parse::ast::Dice;

pub use env::Environment;
pub use error::EvalError;
pub use eval::Evaluator;
pub use narrate::Narrator;
pub use num::Number;
pub use roller::{DefaultRoller, Roller};

#[cfg(test)]
pub(crate) use roller::StepRoller;

/// Most individual dice a single literal may request.
pub const DICE_LIMIT: UInt = 100;

fn check_dice_limit(dice: &Dice, limit: UInt) -> Result<(), EvalError> {
    let requested = dice.count();
    if requested > limit {
        Err(EvalError::TooManyDice { requested, limit })
    } else {
        Ok(())
    }
}

fn roll_dice<R: Roller>(roller: &mut R, dice: &Dice) -> Vec<UInt> {
    let rolls: Vec<UInt> = (0..dice.count()).map(|_| roller.roll(dice.sides)).collect();
    tracing::trace!(%dice, ?rolls, "rolled");
    rolls
}
