use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("for", TokenKind::For);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Colon,      // `:` and, followed by `=`, the first half of `:=`
    Comma,
    Arrow,
    Semicolon,
    Dot,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Less,
    Greater,
    Not,
    Tilde,

    // Reserved
    Let,
    Function,
    If,
    Switch,
    Case,
    Default,
    For,
    Break,
    Continue,
    True,
    False,
}

impl TokenKind {
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// How the kind is named on the "Expected ..." side of a parser error.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::EOF => String::from("end of source"),
            TokenKind::Number => String::from("number"),
            TokenKind::String => String::from("string"),
            TokenKind::Identifier => String::from("identifier"),
            TokenKind::OpenBracket => String::from("'['"),
            TokenKind::CloseBracket => String::from("']'"),
            TokenKind::OpenCurly => String::from("'{'"),
            TokenKind::CloseCurly => String::from("'}'"),
            TokenKind::OpenParen => String::from("'('"),
            TokenKind::CloseParen => String::from("')'"),
            TokenKind::Assignment => String::from("'='"),
            TokenKind::Colon => String::from("':'"),
            TokenKind::Comma => String::from("','"),
            TokenKind::Arrow => String::from("'->'"),
            TokenKind::Semicolon => String::from("';'"),
            TokenKind::Dot => String::from("'.'"),
            TokenKind::Plus => String::from("'+'"),
            TokenKind::Dash => String::from("'-'"),
            TokenKind::Slash => String::from("'/'"),
            TokenKind::Star => String::from("'*'"),
            TokenKind::Percent => String::from("'%'"),
            TokenKind::Less => String::from("'<'"),
            TokenKind::Greater => String::from("'>'"),
            TokenKind::Not => String::from("'!'"),
            TokenKind::Tilde => String::from("'~'"),
            reserved => format!("'{}'", reserved.keyword().unwrap_or_default()),
        }
    }

    pub fn keyword(&self) -> Option<&'static str> {
        RESERVED_LOOKUP
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(word, _)| *word)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// How the token is named on the "... but got" side of a parser error.
    pub fn describe(&self) -> String {
        if self.kind == TokenKind::EOF {
            String::from("end of source")
        } else if self.kind.is_reserved() {
            format!("reserved keyword '{}'", self.value)
        } else if self.kind == TokenKind::String {
            format!("'\"{}\"'", self.value)
        } else {
            format!("'{}'", self.value)
        }
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
