use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,
    // `3d6`, `d20`. Beats Integer and Ident by match length, so `d20foo`
    // lexes as a dice literal followed by an identifier.
    #[regex(r"[0-9]*[dD][0-9]+")]
    Dice,
    #[regex(r"[a-zA-Z]+")]
    Ident,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("?")]
    Question,
    // serves both as the assignment separator and the ternary else-arm
    #[token(":")]
    Colon,

    // statement separator in declaration scripts
    #[token("\n")]
    Newline,

    #[regex(r"[ \t\f\r]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Dice => "<dice>",
            Ident => "<identifier>",
            LeftParen => "'('",
            RightParen => "')'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            LessThan => "'<'",
            GreaterThan => "'>'",
            Question => "'?'",
            Colon => "':'",
            Newline => "<newline>",
            Error => "<error>",
        }
    }

    pub fn as_binary_op(&self) -> Option<crate::common::BinaryOperator> {
        use crate::common::BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            Self::LessThan => Lt,
            Self::GreaterThan => Gt,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
