use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Every pattern is anchored so a failed attempt never scans ahead.
        regex: Regex::new(&format!("^(?:{})", regex)).expect("lexer pattern must compile"),
        handler,
    }
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("[a-zA-Z_$][a-zA-Z0-9_$.]*", symbol_handler),
        // `1e5`, `.1` and `67.235` stay single number tokens for the parser to reject.
        pattern("\\.?[0-9](?:[eE][-+]?[0-9]|[0-9a-zA-Z_.])*", number_handler),
        pattern("\\s+", skip_handler),
        pattern("\"(?:[^\"\\\\\\n]|\\\\.)*\"", string_handler),
        pattern("//[^\\n]*", skip_handler),
        pattern("/\\*(?s:.)*?\\*/", skip_handler),
        pattern("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|x| x.as_str().to_string())
            .unwrap_or_default()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

/// Keeps the body between the quotes as written; see [`unescape_string`].
fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    let body = matched[1..matched.len() - 1].to_string();

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, body, span));
}

/// Decodes the escapes of a string literal body into the bytes it denotes.
///
/// `\xN` and `\xNN` give a single byte. Unknown escapes and a `\x` without
/// hex digits stay as written.
pub fn unescape_string(body: &str) -> Vec<u8> {
    let raw = body.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        if raw[i] != b'\\' || i + 1 == raw.len() {
            bytes.push(raw[i]);
            i += 1;
            continue;
        }

        let escaped = raw[i + 1];
        i += 2;
        match escaped {
            b'n' => bytes.push(b'\n'),
            b't' => bytes.push(b'\t'),
            b'r' => bytes.push(b'\r'),
            b'\\' | b'"' | b'\'' => bytes.push(escaped),
            b'x' => {
                let hex = &raw[i..raw.len().min(i + 2)];
                let len = hex.iter().take_while(|x| x.is_ascii_hexdigit()).count();
                let byte = std::str::from_utf8(&hex[..len])
                    .ok()
                    .and_then(|x| u8::from_str_radix(x, 16).ok());
                match byte {
                    Some(byte) => {
                        bytes.push(byte);
                        i += len;
                    }
                    None => bytes.extend_from_slice(b"\\x"),
                }
            }
            other => bytes.extend_from_slice(&[b'\\', other]),
        }
    }

    bytes
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
}

/// Splits source text into positioned tokens, terminated by an `EOF` token.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let handler = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match handler {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    let end = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), end));
    tracing::trace!(token_count = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
