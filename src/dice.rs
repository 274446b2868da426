//! Quick rolls over whitespace-separated die groups (`3d6+2 1d20`), the
//! command grammar accepted ahead of the full expression language.

use crate::common::*;
use crate::interp::{Roller, DICE_LIMIT};
use crate::Outcome;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

lazy_static! {
    static ref DIE_GROUP: Regex = Regex::new(r"^(\d+)?[dD](\d+)([+-]\d+)?$").unwrap();
}

/// One die group: `[count]D<sides>[(+|-)<modifier>]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DieGroup {
    pub count: UInt,
    pub sides: NonZeroUInt,
    pub modifier: Int,
}

impl DieGroup {
    pub fn new(count: UInt, sides: NonZeroUInt, modifier: Int) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    pub fn roll<R: Roller>(&self, roller: &mut R) -> GroupRoll {
        let rolls = (0..self.count).map(|_| roller.roll(self.sides)).collect();
        GroupRoll {
            rolls,
            modifier: self.modifier,
        }
    }
}

impl fmt::Display for DieGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

impl FromStr for DieGroup {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DIE_GROUP.captures(s).ok_or(ParseGroupError::NotDice)?;
        let count = caps
            .get(1)
            .map_or(Ok(1), |m| m.as_str().parse())
            .map_err(ParseGroupError::InvalidCount)?;
        let sides = caps[2].parse().map_err(ParseGroupError::InvalidSides)?;
        let modifier = caps
            .get(3)
            .map_or(Ok(0), |m| m.as_str().parse())
            .map_err(ParseGroupError::InvalidModifier)?;
        Ok(Self::new(count, sides, modifier))
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseGroupError {
    #[error("not a die group")]
    NotDice,
    #[error("invalid count: {0}")]
    InvalidCount(ParseIntError),
    #[error("invalid sides: {0}")]
    InvalidSides(ParseIntError),
    #[error("invalid modifier: {0}")]
    InvalidModifier(ParseIntError),
}

/// The realized rolls of one die group.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GroupRoll {
    pub rolls: Vec<UInt>,
    pub modifier: Int,
}

impl GroupRoll {
    pub fn total(&self) -> Int {
        self.rolls.iter().copied().map(Int::from).sum::<Int>() + self.modifier
    }
}

impl fmt::Display for GroupRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifier = match self.modifier {
            0 => String::new(),
            m if m > 0 => format!(" + {}", m),
            m => format!(" - {}", -m),
        };
        match self.rolls.as_slice() {
            [] => write!(f, "{}", self.total()),
            [single] if self.modifier != 0 => {
                write!(f, "{}{} = {}", single, modifier, self.total())
            }
            [single] => write!(f, "{}", single),
            rolls => {
                let joined = rolls
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" + ");
                write!(f, "({}){} = {}", joined, modifier, self.total())
            }
        }
    }
}

/// A full quick-roll command: each recognized group with its result.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommandRoll {
    pub groups: Vec<(DieGroup, GroupRoll)>,
}

impl CommandRoll {
    pub fn total(&self) -> Int {
        self.groups.iter().map(|(_, roll)| roll.total()).sum()
    }
}

impl fmt::Display for CommandRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dice = self
            .groups
            .iter()
            .map(|(group, _)| group.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let results = self
            .groups
            .iter()
            .map(|(_, roll)| roll.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} giving {}", dice, results)
    }
}

/// Roll every die group named in `command`. Words that are not die groups
/// (including the historical `+`/`-` advantage markers) are ignored; a
/// command naming no dice rolls a single percentile die.
pub fn roll_command(command: &str) -> Outcome<CommandRoll> {
    roll_command_with(command, &mut rand::thread_rng())
}

pub fn roll_command_with<R: Roller>(command: &str, roller: &mut R) -> Outcome<CommandRoll> {
    let mut groups = Vec::new();
    for word in command.split_whitespace() {
        let group: DieGroup = match word.parse() {
            Ok(group) => group,
            Err(err) => {
                tracing::trace!(word, %err, "skipping word");
                continue;
            }
        };
        if group.count > DICE_LIMIT {
            return Outcome::TooManyDice {
                requested: group.count,
                limit: DICE_LIMIT,
            };
        }
        let roll = group.roll(roller);
        groups.push((group, roll));
    }

    if groups.is_empty() {
        tracing::debug!("no dice named, rolling percentile");
        let group = DieGroup::new(1, NonZeroUInt::new(100).unwrap(), 0);
        let roll = group.roll(roller);
        groups.push((group, roll));
    }

    Outcome::Value(CommandRoll { groups })
}
