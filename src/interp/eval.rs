use super::env::Environment;
use super::error::EvalError;
use super::num::Number;
use super::roller::{DefaultRoller, Roller};
use super::{check_dice_limit, roll_dice, DICE_LIMIT};
use crate::common::*;
use crate::parse::ast::{Declaration, Dice, Node};
use crate::parse::visit::{Accept, AstVisitor};

type EResult<T = Number> = Result<T, EvalError>;

/// Tree-walking evaluator producing plain numeric results.
///
/// In average mode every dice literal evaluates to its expected value and
/// no randomness is consumed.
pub struct Evaluator<R = DefaultRoller> {
    average: bool,
    dice_limit: UInt,
    roller: R,
    env: Environment,
}

impl Evaluator {
    pub fn new(average: bool) -> Self {
        Self::with_roller(average, rand::thread_rng())
    }
}

impl<R: Roller> Evaluator<R> {
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

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    /// Evaluate a single expression tree to its value.
    pub fn eval(&mut self, node: &Node<'_>) -> EResult {
        node.accept(self)
    }

    /// Run a declaration script, assigning each variable in order into the
    /// shared environment. Assignments themselves produce no value.
    pub fn run_script(&mut self, script: &[Declaration<'_>]) -> EResult<()> {
        for decl in script {
            let value = self.eval(&decl.value)?;
            tracing::debug!(name = decl.name, %value, "assigned");
            self.env.set(decl.name, value);
        }
        Ok(())
    }
}

impl<'a, R: Roller> AstVisitor<'a> for Evaluator<R> {
    type Output = EResult;

    fn visit_number(&mut self, x: Int) -> Self::Output {
        Ok(Number::Int(x))
    }

    fn visit_dice(&mut self, dice: &Dice) -> Self::Output {
        check_dice_limit(dice, self.dice_limit)?;
        if self.average {
            Ok(Number::Float(dice.average()))
        } else {
            let total = roll_dice(&mut self.roller, dice)
                .into_iter()
                .map(Int::from)
                .sum();
            Ok(Number::Int(total))
        }
    }

    fn visit_variable(&mut self, name: &'a str) -> Self::Output {
        self.env
            .get(name)
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_owned()))
    }

    fn visit_unary(&mut self, op: UnaryOperator, operand: &Node<'a>) -> Self::Output {
        let value = operand.accept(self)?;
        Ok(match op {
            UnaryOperator::Pos => value,
            UnaryOperator::Neg => -value,
        })
    }

    fn visit_binary(
        &mut self,
        left: &Node<'a>,
        op: BinaryOperator,
        right: &Node<'a>,
    ) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(match op {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => {
                if right.is_zero() {
                    return Err(EvalError::DivisionByZero);
                }
                left.div_trunc(right)
            }
            BinaryOperator::Lt => Number::Int((left < right) as Int),
            BinaryOperator::Gt => Number::Int((left > right) as Int),
        })
    }

    fn visit_conditional(
        &mut self,
        condition: &Node<'a>,
        then_expr: &Node<'a>,
        else_expr: &Node<'a>,
    ) -> Self::Output {
        if condition.accept(self)?.is_truthy() {
            then_expr.accept(self)
        } else {
            else_expr.accept(self)
        }
    }
}
