use crate::common::*;
use std::fmt::{self, Write};
use std::num::ParseIntError;
use std::str::FromStr;

/// A dice literal. `num` is `None` when the count was implicit (`d20`),
/// so the literal re-renders exactly as its normalized notation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dice {
    pub num: Option<UInt>,
    pub sides: NonZeroUInt,
}

impl Dice {
    pub fn new(num: impl Into<Option<UInt>>, sides: NonZeroUInt) -> Self {
        Self {
            num: num.into(),
            sides,
        }
    }

    pub fn count(&self) -> UInt {
        self.num.unwrap_or(1)
    }

    /// Expected total of the literal: `count * (sides + 1) / 2`.
    pub fn average(&self) -> Float {
        self.count() as Float * (self.sides.get() as Float + 1.0) / 2.0
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(num) = self.num {
            write!(f, "{}", num)?;
        }
        f.write_char('D')?;
        write!(f, "{}", self.sides)
    }
}

impl FromStr for Dice {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, sides) = s
            .split_once(&['d', 'D'][..])
            .ok_or(ParseDiceError::NoDelimiter)?;
        let num = if num.is_empty() {
            None
        } else {
            Some(num.parse().map_err(ParseDiceError::InvalidCount)?)
        };
        let sides = sides.parse().map_err(ParseDiceError::InvalidSides)?;
        Ok(Self::new(num, sides))
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without a 'd' separator")]
    NoDelimiter,
    #[error("invalid dice count: {0}")]
    InvalidCount(ParseIntError),
    #[error("invalid dice sides: {0}")]
    InvalidSides(ParseIntError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Number(Int),
    DiceRoll(Dice),
    Variable(&'a str),
    Unary(UnaryOperator, Box<Node<'a>>),
    Binary(Box<Node<'a>>, BinaryOperator, Box<Node<'a>>),
    /// condition, then-branch, else-branch
    Conditional(Box<Node<'a>>, Box<Node<'a>>, Box<Node<'a>>),
}

impl<'a> Node<'a> {
    pub fn number(x: Int) -> Self {
        Self::Number(x)
    }

    pub fn dice(dice: Dice) -> Self {
        Self::DiceRoll(dice)
    }

    pub fn variable(name: &'a str) -> Self {
        Self::Variable(name)
    }

    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::Unary(op, Box::new(operand))
    }

    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::Binary(Box::new(left), op, Box::new(right))
    }

    pub fn conditional(condition: Self, then_expr: Self, else_expr: Self) -> Self {
        Self::Conditional(Box::new(condition), Box::new(then_expr), Box::new(else_expr))
    }
}

/// One `NAME: expression` line of a declaration script.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub value: Node<'a>,
}

impl<'a> Declaration<'a> {
    pub fn new(name: &'a str, value: Node<'a>) -> Self {
        Self { name, value }
    }
}

pub type Script<'a> = Vec<Declaration<'a>>;
