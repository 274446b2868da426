use super::env::Environment;
use super::error::EvalError;
use super::num::Number;
use super::roller::{DefaultRoller, Roller};
use super::{check_dice_limit, roll_dice, DICE_LIMIT};
use crate::common::*;
use crate::parse::ast::{Dice, Node};
use crate::parse::visit::{Accept, AstVisitor};

type NResult = Result<(Number, String), EvalError>;

/// Evaluator variant that pairs every value with a breakdown of how it was
/// reached, e.g. `(3D6 [4 + 2 + 6] + 6) * 5`.
///
/// The narration is display-only and not meant to be re-parsed. Only `+`
/// and `*` have a narrated form; the remaining binary operators and
/// conditionals are reported as unsupported rather than silently
/// miscomputed.
pub struct Narrator<R = DefaultRoller> {
    average: bool,
    dice_limit: UInt,
    roller: R,
    env: Environment,
}

impl Narrator {
    pub fn new(average: bool) -> Self {
        Self::with_roller(average, rand::thread_rng())
    }
}

impl<R: Roller> Narrator<R> {
    pub fn with_roller(average: bool, roller: R) -> Self {
        Self {
            average,
            dice_limit: DICE_LIMIT,
            roller,
            env: Environment::new(),
        }
    }

    pub fn dice_limit(mut self, limit: UInt) -> Self {
        self.dice_limit = limit;
        self
    }

    /// Evaluate an expression tree to its value and narration.
    pub fn narrate(&mut self, node: &Node<'_>) -> NResult {
        node.accept(self)
    }
}

impl<'a, R: Roller> AstVisitor<'a> for Narrator<R> {
    type Output = NResult;

    fn visit_number(&mut self, x: Int) -> Self::Output {
        Ok((Number::Int(x), x.to_string()))
    }

    fn visit_dice(&mut self, dice: &Dice) -> Self::Output {
        check_dice_limit(dice, self.dice_limit)?;
        if self.average {
            let average = Number::Float(dice.average());
            Ok((average, format!("{} [{}]", dice, average)))
        } else {
            let rolls = roll_dice(&mut self.roller, dice);
            let total = rolls.iter().copied().map(Int::from).sum();
            let parts = rolls
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" + ");
            Ok((Number::Int(total), format!("{} [{}]", dice, parts)))
        }
    }

    fn visit_variable(&mut self, name: &'a str) -> Self::Output {
        let value = self
            .env
            .get(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_owned()))?;
        Ok((value, value.to_string()))
    }

    fn visit_unary(&mut self, op: UnaryOperator, operand: &Node<'a>) -> Self::Output {
        let (value, text) = operand.accept(self)?;
        Ok(match op {
            UnaryOperator::Pos => (value, text),
            UnaryOperator::Neg => (-value, format!("-{}", text)),
        })
    }

    fn visit_binary(
        &mut self,
        left: &Node<'a>,
        op: BinaryOperator,
        right: &Node<'a>,
    ) -> Self::Output {
        match op {
            BinaryOperator::Add => {
                let (left_value, left_text) = left.accept(self)?;
                let (right_value, right_text) = right.accept(self)?;
                Ok((left_value + right_value, format!("{} + {}", left_text, right_text)))
            }
            BinaryOperator::Mul => {
                let (left_value, mut left_text) = left.accept(self)?;
                let (right_value, right_text) = right.accept(self)?;
                // an additive left operand keeps its parentheses in the
                // narration
                if matches!(left, Node::Binary(_, BinaryOperator::Add, _)) {
                    left_text = format!("({})", left_text);
                }
                Ok((left_value * right_value, format!("{} * {}", left_text, right_text)))
            }
            op => Err(EvalError::UnsupportedNarration(op)),
        }
    }

    fn visit_conditional(
        &mut self,
        _condition: &Node<'a>,
        _then_expr: &Node<'a>,
        _else_expr: &Node<'a>,
    ) -> Self::Output {
        Err(EvalError::NarratedConditional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::roller::StepRoller;
    use crate::parse::parse;

    fn mock_roller() -> StepRoller {
        StepRoller::new(10, 1)
    }

    fn check(s: &str, average: bool, expected_value: impl Into<Number>, expected_text: &str) {
        let ast = parse(s).unwrap();
        let mut narrator = Narrator::with_roller(average, mock_roller());
        let (value, text) = narrator.narrate(&ast).unwrap();
        assert_eq!(value, expected_value.into());
        assert_eq!(text, expected_text);
    }

    fn check_err(s: &str, expected: EvalError) {
        let ast = parse(s).unwrap();
        let mut narrator = Narrator::with_roller(false, mock_roller());
        assert_eq!(narrator.narrate(&ast).unwrap_err(), expected);
    }

    #[test]
    fn test_narrate_number() {
        check("13", false, 13, "13");
    }

    #[test]
    fn test_narrate_dice() {
        check("3d6", false, 15, "3D6 [4 + 5 + 6]");
        check("d20", false, 10, "D20 [10]");
    }

    #[test]
    fn test_narrate_dice_average() {
        check("3d6", true, 10.5, "3D6 [10.5]");
        check("2d6", true, 7.0, "2D6 [7.0]");
        check("d20", true, 10.5, "D20 [10.5]");
    }

    #[test]
    fn test_narrate_addition() {
        check("3d6 + 6", false, 21, "3D6 [4 + 5 + 6] + 6");
    }

    #[test]
    fn test_narrate_multiplication_parenthesizes_additive_left() {
        check(
            "(3d6 + 6) * 5",
            false,
            105,
            "(3D6 [4 + 5 + 6] + 6) * 5",
        );
        check("(3d6 + 6) * 5", true, 82.5, "(3D6 [10.5] + 6) * 5");
        // a non-additive left operand stays bare
        check("2 * 3", false, 6, "2 * 3");
    }

    #[test]
    fn test_narrate_unary() {
        check("-d20", false, -10, "-D20 [10]");
        check("+3", false, 3, "3");
        check("3d6 + - -10", false, 25, "3D6 [4 + 5 + 6] + --10");
    }

    #[test]
    fn test_narrate_average_consumes_no_randomness() {
        let ast = parse("(3d6 + 6) * 5").unwrap();
        let mut narrator = Narrator::with_roller(true, mock_roller());
        let first = narrator.narrate(&ast).unwrap();
        let second = narrator.narrate(&ast).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_narrate_unsupported_operators() {
        check_err(
            "2 - 3",
            EvalError::UnsupportedNarration(BinaryOperator::Sub),
        );
        check_err(
            "6 / 2",
            EvalError::UnsupportedNarration(BinaryOperator::Div),
        );
        check_err(
            "1 < 2",
            EvalError::UnsupportedNarration(BinaryOperator::Lt),
        );
        check_err("1 > 2 ? 1 : 2", EvalError::NarratedConditional);
    }

    #[test]
    fn test_narrate_undefined_variable() {
        check_err("STR + 1", EvalError::UndefinedVariable("STR".to_owned()));
    }

    #[test]
    fn test_narrate_too_many_dice() {
        check_err(
            "101d4",
            EvalError::TooManyDice {
                requested: 101,
                limit: 100,
            },
        );
    }

    #[test]
    fn test_narrate_custom_dice_limit() {
        let ast = parse("4d6").unwrap();
        let mut narrator = Narrator::with_roller(false, mock_roller()).dice_limit(3);
        assert_eq!(
            narrator.narrate(&ast).unwrap_err(),
            EvalError::TooManyDice {
                requested: 4,
                limit: 3,
            },
        );
    }
}
