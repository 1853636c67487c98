use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Literal, Spanned, Token};
use crate::error::LexError;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("Invalid number regex"));

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

/// Tokenizes a whole expression. The returned sequence always ends with
/// [`Token::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(input).tokenize()
}

/// Whether the lexer reads `word` as a number, a boolean or `in` rather
/// than as a field path.
pub(crate) fn is_reserved_word(word: &str) -> bool {
    NUMBER.is_match(word)
        || word.eq_ignore_ascii_case("true")
        || word.eq_ignore_ascii_case("false")
        || word == "in"
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, position: usize, message: impl Into<String>) -> LexError {
        let character = self.input.get(position).copied().unwrap_or('\0');
        LexError::new(position, character, message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t') = self.current_char() {
            self.advance();
        }
    }

    /// Reads a dotted run such as `config.model.depth` or `12.5`.
    ///
    /// A dot is only consumed when another word character follows it.
    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else if ch == '.'
                && !result.is_empty()
                && self.peek_char(1).is_some_and(is_word_char)
            {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a quoted string ending before `limit`. No escape processing.
    fn read_string(&mut self, quote: char, limit: usize) -> Result<String, LexError> {
        let start = self.position;
        self.advance(); // Consume opening quote

        let mut result = String::new();
        while self.position < limit {
            match self.current_char() {
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
                None => break,
            }
        }

        Err(self.error(start, "unterminated string literal"))
    }

    fn classify_number(&self, text: &str, start: usize) -> Result<Literal, LexError> {
        if text.contains('.') {
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Literal::Float(n)),
                Ok(_) => Err(self.error(start, "float literal out of range")),
                Err(_) => Err(self.error(start, "invalid float literal")),
            }
        } else {
            text.parse::<i64>()
                .map(Literal::Integer)
                .map_err(|_| self.error(start, "integer literal out of range"))
        }
    }

    /// Reads a word and decides between number, boolean, `in` and identifier.
    fn read_word_token(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let word = self.read_word();

        if NUMBER.is_match(&word) {
            return self.classify_number(&word, start).map(Token::Scalar);
        }
        if word.eq_ignore_ascii_case("true") {
            return Ok(Token::Scalar(Literal::Boolean(true)));
        }
        if word.eq_ignore_ascii_case("false") {
            return Ok(Token::Scalar(Literal::Boolean(false)));
        }
        if word == "in" {
            return Ok(Token::In);
        }
        Ok(Token::Identifier(word))
    }

    /// Reads `+12`, `-0.5`: a sign must be followed by a number.
    fn read_signed_number(&mut self) -> Result<Literal, LexError> {
        let start = self.position;
        let mut text = String::new();
        if let Some(sign) = self.current_char() {
            text.push(sign);
        }
        self.advance();
        text.push_str(&self.read_word());

        if NUMBER.is_match(&text) {
            self.classify_number(&text, start)
        } else {
            Err(self.error(start, "sign must be followed by a number"))
        }
    }

    /// Reads one scalar literal; `limit` bounds quoted strings.
    fn read_literal(&mut self, limit: usize) -> Result<Literal, LexError> {
        let start = self.position;
        match self.current_char() {
            Some(q @ ('\'' | '"')) => self.read_string(q, limit).map(Literal::String),
            Some('+' | '-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_signed_number()
            }
            Some(ch) if is_word_char(ch) => match self.read_word_token()? {
                Token::Scalar(lit) => Ok(lit),
                _ => Err(self.error(start, "expected a literal")),
            },
            Some('[') => Err(self.error(start, "nested lists are not supported")),
            _ => Err(self.error(start, "expected a literal")),
        }
    }

    /// Reads `[ ... ]` up to the first `]` and decodes its elements.
    fn read_list(&mut self) -> Result<Vec<Literal>, LexError> {
        let start = self.position;
        let end = (start + 1..self.input.len())
            .find(|&i| self.input[i] == ']')
            .ok_or_else(|| self.error(start, "unterminated list literal"))?;
        self.advance(); // Consume '['

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.position >= end {
                break;
            }
            items.push(self.read_literal(end)?);

            self.skip_whitespace();
            if self.position >= end {
                break;
            }
            if self.current_char() != Some(',') {
                return Err(self.error(self.position, "expected ',' between list elements"));
            }
            self.advance(); // Consume ','
        }

        self.position = end + 1;
        Ok(items)
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_spanned().map(|spanned| spanned.token)
    }

    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('[') => Token::List(self.read_list()?),
            Some('\'' | '"') => Token::Scalar(self.read_literal(self.input.len())?),
            Some('+' | '-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                Token::Scalar(self.read_signed_number()?)
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::EqEq
                } else {
                    return Err(self.error(start, "unexpected '=' (did you mean '=='?)"));
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::NotEq
                } else {
                    return Err(self.error(start, "unexpected '!' (use '~' for negation)"));
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::LtEq
                } else {
                    self.advance();
                    Token::Lt
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::GtEq
                } else {
                    self.advance();
                    Token::Gt
                }
            }
            Some('&') => {
                self.advance();
                Token::Ampersand
            }
            Some('|') => {
                self.advance();
                Token::Pipe
            }
            Some('~') => {
                self.advance();
                Token::Tilde
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(ch) if is_word_char(ch) => self.read_word_token()?,
            Some(_) => return Err(self.error(start, "unrecognized character")),
        };

        Ok(Spanned::new(token, start))
    }

    /// Consumes the lexer, collecting every token up to and including `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_spanned()?;
            trace!(token = %spanned.token, position = spanned.position, "lexed token");
            let is_eof = spanned.token == Token::Eof;
            tokens.push(spanned);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}
