//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the public entry points.
//! Statement and expression parsing live in [`super::stmt`] and
//! [`super::expr`]; dispatch goes through the lookup tables built by
//! [`super::lookups::create_token_lookups`].
//!
//! Parsing is fatal-on-first-error: every parse function returns
//! `Result<_, Error>` and the first `Err` travels up with `?` to [`parse`],
//! which reports it and returns `None`.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{ast::NodeId, statements::BlockStmt},
    dialect::dialect::Dialect,
    errors::{
        errors::{Error, ErrorImpl},
        reporter::ErrorReporter,
    },
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{create_token_lookups, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
    stmt::parse_block,
};

/// Default bound on nested blocks and call arguments.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 256;

/// Knobs of a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Nesting depth of blocks and call arguments at which parsing aborts.
    pub max_recursion_depth: usize,
    /// Keep going after a statement-level error, resynchronizing at the next
    /// statement. The result is still `None` if anything was reported.
    pub error_recovery: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            error_recovery: false,
        }
    }
}

/// Which part of a `for` statement is currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForLoopComponent {
    None,
    ForLoopPre,
    ForLoopPost,
    ForLoopBody,
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and lookup tables for statements and
/// expression starts. It tracks the current position in the token stream,
/// the recursion depth and the enclosing `for` component.
pub struct Parser<'a> {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source being parsed
    file: Rc<String>,
    /// Builtins and grammar flavour
    dialect: &'a Dialect,
    config: ParserConfig,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for handlers of tokens that can start an expression
    nud_lookup: NUDLookup,
    /// Counter for generating node ids
    current_id: NodeId,
    /// Current nesting of blocks and call arguments
    depth: usize,
    for_loop_component: ForLoopComponent,
    /// Statement-level errors collected in recovery mode
    recovered_errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance with empty lookup tables.
    ///
    /// A stream that does not end in `EOF` gets one appended after its last
    /// token.
    pub fn new(mut tokens: Vec<Token>, dialect: &'a Dialect, config: ParserConfig) -> Self {
        let file = tokens
            .first()
            .map(|x| Rc::clone(&x.span.start.1))
            .unwrap_or_else(|| Rc::new(String::from("<null>")));

        if tokens.last().map(|x| x.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|x| x.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            file,
            dialect,
            config,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            current_id: 0,
            depth: 0,
            for_loop_component: ForLoopComponent::None,
            recovered_errors: vec![],
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Past the end of the stream this keeps returning the trailing `EOF`.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.peek_kind(0)
    }

    /// Returns the kind of the token `offset` positions ahead.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|x| x.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Builds the generic "Expected X but got Y" error for the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
            },
            token.span.start.clone(),
        )
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(&mut self, expected_kind: TokenKind, error: Option<Error>) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(&expected_kind.describe())),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with the default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Whether the cursor sits on `:` immediately followed by `=`.
    pub fn at_assign(&self) -> bool {
        self.current_token_kind() == TokenKind::Colon && self.peek_kind(1) == TokenKind::Assignment
    }

    /// Consumes the two tokens of `:=`.
    pub fn expect_assign(&mut self) -> Result<(), Error> {
        self.expect(TokenKind::Colon)?;
        self.expect(TokenKind::Assignment)?;
        Ok(())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the expression-start lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a handler for a token that can start an expression.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        id
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// End of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|x| self.tokens.get(x)) {
            Some(token) => token.span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }

    /// Enters one level of block/argument nesting.
    pub fn enter_recursion(&mut self) -> Result<(), Error> {
        if self.depth >= self.config.max_recursion_depth {
            return Err(Error::new(ErrorImpl::RecursionDepthExceeded, self.get_position()));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn for_loop_component(&self) -> ForLoopComponent {
        self.for_loop_component
    }

    /// Sets the current `for` component and returns the previous one.
    pub fn set_for_loop_component(&mut self, component: ForLoopComponent) -> ForLoopComponent {
        std::mem::replace(&mut self.for_loop_component, component)
    }

    pub fn record_recovered(&mut self, error: Error) {
        tracing::debug!(offset = error.get_position().0, "recovering from: {}", error);
        self.recovered_errors.push(error);
    }

    /// Skips ahead to the next plausible statement start of the current block.
    ///
    /// Stops before a statement keyword or the `}` closing the current block,
    /// stepping over any nested braces on the way.
    pub fn synchronize(&mut self, statement_start: usize) {
        if self.pos == statement_start {
            self.advance();
        }

        let mut nesting = 0usize;
        loop {
            match self.current_token_kind() {
                TokenKind::EOF => return,
                TokenKind::OpenCurly => nesting += 1,
                TokenKind::CloseCurly => {
                    if nesting == 0 {
                        return;
                    }
                    nesting -= 1;
                }
                TokenKind::Let
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Switch
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                    if nesting == 0 =>
                {
                    return
                }
                _ => {}
            }
            self.advance();
        }
    }

    pub fn position_index(&self) -> usize {
        self.pos
    }
}

/// Parses a token stream into an AST using the default configuration.
///
/// The root of a program is a single block. On the first grammar violation
/// the error is reported to `reporter` and `None` is returned; no partial
/// tree is ever produced.
pub fn parse(tokens: Vec<Token>, dialect: &Dialect, reporter: &mut ErrorReporter) -> Option<BlockStmt> {
    parse_with_config(tokens, dialect, ParserConfig::default(), reporter)
}

/// Parses a token stream into an AST with an explicit configuration.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), max_depth = config.max_recursion_depth))]
pub fn parse_with_config(
    tokens: Vec<Token>,
    dialect: &Dialect,
    config: ParserConfig,
    reporter: &mut ErrorReporter,
) -> Option<BlockStmt> {
    let mut parser = Parser::new(tokens, dialect, config);
    create_token_lookups(&mut parser);

    let result = parse_block(&mut parser).and_then(|block| {
        parser.expect(TokenKind::EOF)?;
        Ok(block)
    });

    for error in std::mem::take(&mut parser.recovered_errors) {
        reporter.report(error);
    }

    match result {
        Ok(block) if !reporter.has_errors() => Some(block),
        Ok(_) => None,
        Err(error) => {
            reporter.report(error);
            None
        }
    }
}
