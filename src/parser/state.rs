//! # Parser State Management
//!
//! Core infrastructure for the parser combinators:
//! - **ParseState**: token stream position, backtracking, and error tracking
//! - **ParseError**: structured error type for parse failures
//! - **Parser trait**: generic interface for all parsers
//!
//! ## Backtracking
//!
//! Combinators try alternative parses and fall back when they fail:
//!
//! ```text
//! let pos = state.position();     // Save current position
//! match parser.parse(state) {
//!     Ok(result) => result,
//!     Err(_) => {
//!         state.restore(pos);     // Restore and try next alternative
//!         alternative.parse(state)
//!     }
//! }
//! ```
//!
//! ## Furthest-error tracking
//!
//! When alternatives fail, the error worth reporting is usually the one at
//! the furthest position the parser reached before giving up. `ParseState`
//! records that error (merging `expected` lists for failures at the same
//! position) so the entry points in [`crate::parser::grammar`] can surface
//! it instead of whichever alternative happened to fail last.
//!
//! ## ParseError Design
//!
//! `ParseError` captures:
//!
//! - **message**: Human-readable error description
//! - **span**: Source location for error reporting
//! - **expected**: List of expected tokens/constructs
//! - **found**: What was actually found (if available)
//!
//! This enables error messages like:
//!
//! ```text
//! expected identifier or '(', found '123'
//! ```

use lachs::Span;

use crate::lexer::Token;

/// Structured parse error with context information.
///
/// Captures detailed information about why parsing failed, enabling rich
/// error messages with source location and helpful suggestions.
///
/// # Fields
///
/// * `message` - Human-readable error description
/// * `span` - Optional source location for error reporting
/// * `expected` - List of what tokens/constructs were expected
/// * `found` - What was actually found (if available)
///
/// # Example
///
/// ```text
/// ParseError {
///     message: "unexpected token",
///     expected: vec!["identifier", "'('"],
///     found: Some("integer '123'"),
///     span: Some(10:5)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Option<Box<Span>>,
    pub expected: Vec<String>,
    pub found: Option<String>,
}

impl ParseError {
    /// Create a new parse error with a message.
    ///
    /// # Arguments
    ///
    /// * `msg` - Error message (anything that can be converted to String)
    ///
    /// # Returns
    ///
    /// A new `ParseError` with the given message and no other context
    ///
    /// # Example
    ///
    /// ```text
    /// let err = ParseError::new("expected end of input");
    /// ```
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            span: None,
            expected: vec![],
            found: None,
        }
    }

    /// Add an expected token/construct to this error.
    ///
    /// Used to build up error messages like "expected A, B, or C".
    ///
    /// # Arguments
    ///
    /// * `what` - Description of what was expected
    ///
    /// # Returns
    ///
    /// Self for method chaining
    ///
    /// # Example
    ///
    /// ```text
    /// ParseError::new("unexpected token")
    ///     .expected("identifier")
    ///     .expected("'('")
    /// ```
    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    /// Set what was actually found.
    ///
    /// # Arguments
    ///
    /// * `what` - Description of what was found (e.g., a token description)
    ///
    /// # Returns
    ///
    /// Self for method chaining
    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    /// Set source location for this error.
    ///
    /// # Arguments
    ///
    /// * `span` - Source span (line/column information)
    ///
    /// # Returns
    ///
    /// Self for method chaining
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(Box::new(span));
        self
    }

    /// Merge expected tokens from another error.
    ///
    /// Used when combining alternative parsers - if both alternatives fail,
    /// we merge their "expected" lists to show all possibilities.
    ///
    /// # Arguments
    ///
    /// * `other` - The error whose expected list is merged into this one
    ///
    /// # Returns
    ///
    /// Self with the union of both expected lists
    ///
    /// # Example
    ///
    /// ```text
    /// // Parser 1 fails: expected "integer"
    /// // Parser 2 fails: expected "string"
    /// // Merged: expected "integer" or "string"
    /// ```
    pub fn merge_expected(mut self, other: &ParseError) -> Self {
        for exp in &other.expected {
            if !self.expected.contains(exp) {
                self.expected.push(exp.clone());
            }
        }
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = if !self.expected.is_empty() {
            let expected_str = if self.expected.len() == 1 {
                self.expected[0].clone()
            } else {
                let (last, rest) = self.expected.split_last().unwrap();
                format!("{} or {}", rest.join(", "), last)
            };
            match &self.found {
                Some(found) => format!("expected {}, found {}", expected_str, found),
                None => format!("expected {}", expected_str),
            }
        } else {
            self.message.clone()
        };

        // If we have span info, render with source context
        if let Some(span) = &self.span {
            write!(f, "{}", span.to_string(&msg))
        } else {
            write!(f, "Parse error: {}", msg)
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type for parse operations.
///
/// A convenience alias for `Result<T, ParseError>` used throughout
/// the parser combinator library.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parser state: token stream, position, and error tracking.
///
/// `ParseState` is a mutable context that all parsers operate on.
/// It maintains the current position in the token stream, supports
/// backtracking, and tracks the furthest parse error.
///
/// # Fields
///
/// * `tokens` - The complete token stream being parsed
/// * `index` - Current position in the token stream (next token to consume)
/// * `furthest_error` - Error at the furthest position reached (for error reporting)
///
/// # Example Usage
///
/// ```text
/// let mut state = ParseState::new(tokens);
///
/// let pos = state.position();  // Save position for backtracking
/// match parser.parse(&mut state) {
///     Ok(result) => result,
///     Err(_) => {
///         state.restore(pos);  // Restore and try alternative
///         alternative.parse(&mut state)
///     }
/// }
/// ```
pub struct ParseState {
    /// The complete token stream being parsed
    tokens: Vec<Token>,

    /// Current position in the token stream (index of next token to read)
    index: usize,

    /// Error at the furthest position reached during parsing
    ///
    /// We track the furthest error because the "real" parse error is
    /// usually at the furthest point the parser was able to read before
    /// failing completely.
    furthest_error: Option<(usize, ParseError)>,
}

impl ParseState {
    /// Create a new parse state from a token stream.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Complete token stream from the lexer
    ///
    /// # Returns
    ///
    /// A new `ParseState` initialized to parse from the beginning of the stream
    ///
    /// # Example
    ///
    /// ```text
    /// let tokens = Token::lex("let x = 42 in x")?;
    /// let mut state = ParseState::new(tokens);
    /// ```
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            furthest_error: None,
        }
    }

    /// Consume and return the next token.
    ///
    /// Advances the position in the token stream by one and returns
    /// the token that was consumed.
    ///
    /// # Returns
    ///
    /// `Some(token)` if there are more tokens to consume
    /// `None` if at the end of the token stream
    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    /// Peek at the next token without consuming it.
    ///
    /// # Returns
    ///
    /// `Some(&token)` - Reference to the next token (if any remain)
    /// `None` - If at the end of the token stream
    ///
    /// # Example
    ///
    /// ```text
    /// if let Some(Token::Ident(_)) = state.peek() {
    ///     // Next token is an identifier, but we haven't consumed it yet
    /// }
    /// ```
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Check if there are more tokens to consume.
    ///
    /// # Returns
    ///
    /// `true` if there are tokens remaining, `false` otherwise
    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Get the current position in the token stream.
    ///
    /// # Returns
    ///
    /// Current index (position of next token to consume)
    ///
    /// # Usage
    ///
    /// Used with `restore()` to implement backtracking:
    ///
    /// ```text
    /// let pos = state.position();
    /// // ... attempt to parse ...
    /// state.restore(pos);  // Backtrack to saved position
    /// ```
    pub fn position(&self) -> usize {
        self.index
    }

    /// Restore the parser to a previous position.
    ///
    /// Used for backtracking - if a parser fails, we restore
    /// the state to allow an alternative parser to try from
    /// the same position.
    ///
    /// # Arguments
    ///
    /// * `position` - Position to restore to (from `position()`)
    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Record an error, keeping track of the furthest position reached.
    ///
    /// Callers record errors at the position of the failing token, so the
    /// current index must still point at that token when this is called.
    ///
    /// # Arguments
    ///
    /// * `error` - The parse error to record
    ///
    /// # Furthest Error Logic
    ///
    /// ```text
    /// state.record_error(err1)  // At position 5
    /// state.record_error(err2)  // At position 10 - becomes new furthest
    /// state.record_error(err3)  // At position 10 - merged with err2
    /// state.record_error(err4)  // At position 3 - ignored (not furthest)
    ///
    /// // Final furthest error is at position 10 (merged err2 and err3)
    /// ```
    pub fn record_error(&mut self, error: ParseError) {
        match &self.furthest_error {
            Some((pos, _)) if *pos > self.index => {
                // Keep the existing error if it's further along
            }
            Some((pos, existing)) if *pos == self.index => {
                let merged = existing.clone().merge_expected(&error);
                self.furthest_error = Some((self.index, merged));
            }
            _ => {
                self.furthest_error = Some((self.index, error));
            }
        }
    }

    /// Get the furthest error encountered during parsing.
    ///
    /// # Returns
    ///
    /// `Some(&error)` - The error at the furthest position
    /// `None` - If no errors were recorded
    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest_error.as_ref().map(|(_, e)| e)
    }

    /// Create an error at the current position with span info.
    ///
    /// Convenience function that creates a `ParseError` with
    /// source location information automatically attached.
    ///
    /// # Arguments
    ///
    /// * `message` - Error message
    ///
    /// # Returns
    ///
    /// A new `ParseError` positioned at the current token with appropriate
    /// `found` information
    pub fn error_here(&self, message: impl Into<String>) -> ParseError {
        let msg = message.into();
        match self.peek() {
            Some(tok) => ParseError::new(&msg).at(tok.pos()).found(tok.describe()),
            None => ParseError::new(msg).found("end of input".to_string()),
        }
    }
}

/// Generic parser trait.
///
/// All parsers implement this trait, enabling a unified interface
/// for parser combinators. The trait is implemented for:
/// - Functions that take `&mut ParseState` and return `ParseResult<T>`
/// - Structs that wrap such functions
///
/// # Type Parameter
///
/// * `T` - The type of value produced by the parser (e.g., `Expression`)
pub trait Parser<T>: Sized {
    /// Parse from the given state.
    ///
    /// # Arguments
    ///
    /// * `state` - Mutable reference to the parse state
    ///
    /// # Returns
    ///
    /// `Ok(value)` if parsing succeeded
    /// `Err(ParseError)` if parsing failed
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

/// Auto-implement Parser for functions matching the expected signature.
///
/// This enables any function that takes `&mut ParseState` and returns
/// `ParseResult<T>` to be used as a parser without explicit wrapping.
impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
