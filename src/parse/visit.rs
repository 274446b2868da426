use crate::common::*;
use crate::parse::ast::{Dice, Node};

/// Tree-walking dispatch over [`Node`]. Evaluators implement this once and
/// get compile-time coverage of every variant from the exhaustive match in
/// [`Accept`].
pub trait AstVisitor<'a> {
    type Output;

    fn visit_number(&mut self, x: Int) -> Self::Output;

    fn visit_dice(&mut self, dice: &Dice) -> Self::Output;

    fn visit_variable(&mut self, name: &'a str) -> Self::Output;

    fn visit_unary(&mut self, op: UnaryOperator, operand: &Node<'a>) -> Self::Output;

    fn visit_binary(
        &mut self,
        left: &Node<'a>,
        op: BinaryOperator,
        right: &Node<'a>,
    ) -> Self::Output;

    fn visit_conditional(
        &mut self,
        condition: &Node<'a>,
        then_expr: &Node<'a>,
        else_expr: &Node<'a>,
    ) -> Self::Output;
}

pub trait Accept<'a, V: AstVisitor<'a> + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<'a, V: AstVisitor<'a> + ?Sized> Accept<'a, V> for Node<'a> {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Number(x) => v.visit_number(*x),
            Self::DiceRoll(dice) => v.visit_dice(dice),
            Self::Variable(name) => v.visit_variable(name),
            Self::Unary(op, operand) => v.visit_unary(*op, operand),
            Self::Binary(left, op, right) => v.visit_binary(left, *op, right),
            Self::Conditional(condition, then_expr, else_expr) => {
                v.visit_conditional(condition, then_expr, else_expr)
            }
        }
    }
}
