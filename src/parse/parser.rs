use super::{ast::*, lexer::*};
use crate::common::*;
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;

type PResult<'a, T = Node<'a>> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: TokenKind,
        expected: NonEmpty<TokenKind>,
    },
    TokenUnderrun {
        expected: NonEmpty<TokenKind>,
    },
    TrailingInput {
        found: TokenKind,
    },
    InvalidCharacter,
    InvalidInteger,
    InvalidDice(ParseDiceError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::TokenUnderrun { expected } => {
                write!(f, "token underrun: expected ")?;
                fmt_expected(expected, f)
            }
            Self::TrailingInput { found } => {
                write!(f, "trailing input after expression: found {}", found)
            }
            Self::InvalidCharacter => write!(f, "unrecognized character"),
            Self::InvalidInteger => write!(f, "integer literal out of range"),
            Self::InvalidDice(err) => write!(f, "invalid dice literal: {}", err),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => f.write_str(a.as_str()),
        [a, b] => write!(f, "{} or {}", a, b),
        _ => {
            let len = expected.len();
            for exp in &expected[..len - 1] {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", expected[len - 1])
        }
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    const COMPARISON_OPS: &'static [TokenKind] = &[TokenKind::LessThan, TokenKind::GreaterThan];

    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const MULTIPLICATION_OPS: &'static [TokenKind] = &[TokenKind::Star, TokenKind::Slash];

    pub fn new(s: &'a str) -> Self {
        Self { lexer: lexer(s) }
    }

    /// Parse a single expression; surrounding newlines are tolerated, any
    /// other trailing input is an error.
    pub fn parse(mut self) -> PResult<'a> {
        self.skip_newlines();
        let node = self.parse_conditional()?;
        self.skip_newlines();
        self.expect_end()?;
        Ok(node)
    }

    /// Parse zero or more `NAME: expression` lines; blank lines are skipped.
    pub fn parse_script(mut self) -> PResult<'a, Script<'a>> {
        let mut script = Vec::new();
        loop {
            self.skip_newlines();
            if !self.matches(TokenKind::Ident) {
                break;
            }
            script.push(self.parse_declaration()?);
        }
        self.expect_end()?;
        Ok(script)
    }

    fn parse_declaration(&mut self) -> PResult<'a, Declaration<'a>> {
        let name = self.consume_slice(TokenKind::Ident)?;
        tracing::trace!(name, "declaration");
        self.consume(TokenKind::Colon)?;
        let value = self.parse_conditional()?;
        // the final declaration may be terminated by end-of-input
        if self.lexer.peek().is_some() {
            self.consume(TokenKind::Newline)?;
        }
        Ok(Declaration::new(name, value))
    }

    fn parse_conditional(&mut self) -> PResult<'a> {
        let node = self.parse_condition()?;

        if self.matches(TokenKind::Question) {
            self.lexer.next();
            let then_expr = self.parse_expr()?;
            self.consume(TokenKind::Colon)?;
            let else_expr = self.parse_expr()?;
            return Ok(Node::conditional(node, then_expr, else_expr));
        }

        Ok(node)
    }

    fn parse_condition(&mut self) -> PResult<'a> {
        let lhs = self.parse_expr()?;

        if let Some(op) = self.peek_operator(Self::COMPARISON_OPS) {
            self.lexer.next();
            let rhs = self.parse_expr()?;
            return Ok(Node::binary(lhs, op, rhs));
        }

        Ok(lhs)
    }

    fn parse_expr(&mut self) -> PResult<'a> {
        let mut node = self.parse_term()?;

        while let Some(op) = self.peek_operator(Self::ADDITION_OPS) {
            self.lexer.next();
            let rhs = self.parse_term()?;
            node = Node::binary(node, op, rhs);
        }

        Ok(node)
    }

    fn parse_term(&mut self) -> PResult<'a> {
        let mut node = self.parse_factor()?;

        while let Some(op) = self.peek_operator(Self::MULTIPLICATION_OPS) {
            self.lexer.next();
            let rhs = self.parse_factor()?;
            node = Node::binary(node, op, rhs);
        }

        Ok(node)
    }

    fn parse_factor(&mut self) -> PResult<'a> {
        match self.lexer.peek().copied() {
            Some(TokenKind::Plus) => {
                self.lexer.next();
                Ok(Node::unary(UnaryOperator::Pos, self.parse_factor()?))
            }
            Some(TokenKind::Minus) => {
                self.lexer.next();
                Ok(Node::unary(UnaryOperator::Neg, self.parse_factor()?))
            }
            Some(TokenKind::Integer) => self.parse_integer(),
            Some(TokenKind::Dice) => self.parse_dice(),
            Some(TokenKind::LeftParen) => {
                self.lexer.next();
                let node = self.parse_expr()?;
                self.consume(TokenKind::RightParen)?;
                Ok(node)
            }
            Some(TokenKind::Ident) => self.parse_variable(),
            _ => self.unexpected_token(vec1![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Integer,
                TokenKind::Dice,
                TokenKind::LeftParen,
                TokenKind::Ident,
            ]),
        }
    }

    fn parse_integer(&mut self) -> PResult<'a> {
        let slice = self.consume_slice(TokenKind::Integer)?;
        match slice.parse() {
            Ok(x) => Ok(Node::number(x)),
            Err(_) => self.error(ParseErrorKind::InvalidInteger),
        }
    }

    fn parse_dice(&mut self) -> PResult<'a> {
        let slice = self.consume_slice(TokenKind::Dice)?;
        match slice.parse() {
            Ok(dice) => Ok(Node::dice(dice)),
            Err(err) => self.error(ParseErrorKind::InvalidDice(err)),
        }
    }

    fn parse_variable(&mut self) -> PResult<'a> {
        let name = self.consume_slice(TokenKind::Ident)?;
        Ok(Node::variable(name))
    }

    fn skip_newlines(&mut self) {
        while self.matches(TokenKind::Newline) {
            self.lexer.next();
        }
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn peek_operator(&mut self, options: &[TokenKind]) -> Option<BinaryOperator> {
        self.lexer
            .peek()
            .copied()
            .filter(|tok| options.contains(tok))
            .and_then(|tok| tok.as_binary_op())
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<'a, ()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec1![expected])
        }
    }

    fn consume_slice(&mut self, expected: TokenKind) -> PResult<'a, &'a str> {
        self.consume(expected)?;
        Ok(self.lexer.slice())
    }

    fn expect_end(&mut self) -> PResult<'a, ()> {
        match self.lexer.next() {
            None => Ok(()),
            Some(TokenKind::Error) => self.error(ParseErrorKind::InvalidCharacter),
            Some(found) => self.error(ParseErrorKind::TrailingInput { found }),
        }
    }

    fn unexpected_token<T>(&mut self, expected: NonEmpty<TokenKind>) -> PResult<'a, T> {
        match self.lexer.next() {
            None => self.error(ParseErrorKind::TokenUnderrun { expected }),
            Some(TokenKind::Error) => self.error(ParseErrorKind::InvalidCharacter),
            Some(found) => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<'a, T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use BinaryOperator::*;
    use UnaryOperator::*;

    fn dice(num: impl Into<Option<UInt>>, sides: UInt) -> Node<'static> {
        Node::dice(Dice::new(num, NonZeroUInt::new(sides).unwrap()))
    }

    fn check(s: &str, expected: Node) {
        assert_eq!(Parser::new(s).parse().unwrap(), expected);
    }

    fn check_err(s: &str, expected: ParseErrorKind) {
        assert_eq!(Parser::new(s).parse().unwrap_err().kind, expected);
    }

    #[test]
    fn test_parse_atoms() {
        check("32", Node::number(32));
        check("3d6", dice(3, 6));
        check("d20", dice(None, 20));
        check("STR", Node::variable("STR"));
    }

    #[test]
    fn test_parse_unary() {
        check("-2", Node::unary(Neg, Node::number(2)));
        check("+2", Node::unary(Pos, Node::number(2)));
        check(
            "- -2",
            Node::unary(Neg, Node::unary(Neg, Node::number(2))),
        );
        check("-d20", Node::unary(Neg, dice(None, 20)));
    }

    #[test]
    fn test_parse_precedence() {
        check(
            "1 + 2 * 3",
            Node::binary(
                Node::number(1),
                Add,
                Node::binary(Node::number(2), Mul, Node::number(3)),
            ),
        );
        check(
            "(3d6 + 6) * 5",
            Node::binary(
                Node::binary(dice(3, 6), Add, Node::number(6)),
                Mul,
                Node::number(5),
            ),
        );
    }

    #[test]
    fn test_parse_left_associativity() {
        check(
            "1 - 2 - 3",
            Node::binary(
                Node::binary(Node::number(1), Sub, Node::number(2)),
                Sub,
                Node::number(3),
            ),
        );
        check(
            "8 / 2 / 2",
            Node::binary(
                Node::binary(Node::number(8), Div, Node::number(2)),
                Div,
                Node::number(2),
            ),
        );
    }

    #[test]
    fn test_parse_comparison() {
        check(
            "B > A",
            Node::binary(Node::variable("B"), Gt, Node::variable("A")),
        );
        check(
            "B < A",
            Node::binary(Node::variable("B"), Lt, Node::variable("A")),
        );
    }

    #[test]
    fn test_parse_conditional() {
        check(
            "B > A ? B : A",
            Node::conditional(
                Node::binary(Node::variable("B"), Gt, Node::variable("A")),
                Node::variable("B"),
                Node::variable("A"),
            ),
        );
    }

    #[test]
    fn test_parse_script() {
        let script = Parser::new("STR: (3d6 + 6) * 5").parse_script().unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].name, "STR");

        let script = Parser::new("STR: (3d6 + 6) * 5\nCON: (2d6 + 6) * 5")
            .parse_script()
            .unwrap();
        assert_eq!(script.len(), 2);

        let script = Parser::new("STR: (3d6 + 6) * 5\nCON: (2d6 + 6) * 5\nFOO: (CON + STR) / 10")
            .parse_script()
            .unwrap();
        assert_eq!(script.len(), 3);
        assert_eq!(script[2].name, "FOO");
    }

    #[test]
    fn test_parse_script_blank_lines_and_trailing_newline() {
        let script = Parser::new("A: 1\n\nB: 2\n").parse_script().unwrap();
        assert_eq!(script.len(), 2);

        assert_eq!(Parser::new("").parse_script().unwrap(), vec![]);
        assert_eq!(Parser::new("\n\n").parse_script().unwrap(), vec![]);
    }

    #[test]
    fn test_parse_script_errors() {
        let err = Parser::new("A: 1 B: 2").parse_script().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::Ident,
                expected: vec1![TokenKind::Newline],
            },
        );

        let err = Parser::new("3 + 4").parse_script().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::TrailingInput {
                found: TokenKind::Integer,
            },
        );
    }

    #[test]
    fn test_parse_errors() {
        check_err(
            "2 +",
            ParseErrorKind::TokenUnderrun {
                expected: vec1![
                    TokenKind::Plus,
                    TokenKind::Minus,
                    TokenKind::Integer,
                    TokenKind::Dice,
                    TokenKind::LeftParen,
                    TokenKind::Ident,
                ],
            },
        );
        check_err(
            "(2",
            ParseErrorKind::TokenUnderrun {
                expected: vec1![TokenKind::RightParen],
            },
        );
        check_err("1 $ 2", ParseErrorKind::InvalidCharacter);
        check_err(
            "2 4",
            ParseErrorKind::TrailingInput {
                found: TokenKind::Integer,
            },
        );
        check_err("99999999999999999999", ParseErrorKind::InvalidInteger);
    }

    #[test]
    fn test_parse_zero_sided_dice() {
        let err = Parser::new("3d0").parse().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidDice(_)));
        assert_eq!(err.slice, "3d0");
    }

    #[test]
    fn test_error_display() {
        let err = Parser::new("2 ) 3").parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "error at position 2 (\")\"): trailing input after expression: found ')'",
        );
    }
}
