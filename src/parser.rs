use std::mem;

use crate::{
    ast::{CompareOp, Expr, FieldPath, Spanned, Token},
    error::ParseError,
    lexer,
};

/// Default limit on expression nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a token sequence.
///
/// Binding strength, loosest first: `|`, `&`, `~`, then the comparison and
/// membership leaves. Parentheses reset precedence.
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

/// Parses a token sequence produced by [`lexer::tokenize`].
pub fn parse(tokens: Vec<Spanned>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses in one step.
pub fn parse_str(input: &str) -> Result<Expr, crate::FilterError> {
    let tokens = lexer::tokenize(input)?;
    Ok(parse(tokens)?)
}

impl Parser {
    pub fn new(mut tokens: Vec<Spanned>) -> Self {
        let terminated = tokens.last().is_some_and(|t| t.token == Token::Eof);
        if !terminated {
            let end = tokens.last().map_or(0, |t| t.position + 1);
            tokens.push(Spanned::new(Token::Eof, end));
        }
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn current(&self) -> &Spanned {
        // `new` guarantees a trailing Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current().token) == mem::discriminant(token)
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Takes ownership of the current token and moves past it.
    fn take(&mut self) -> Spanned {
        let position = self.current().position;
        let token = mem::replace(&mut self.tokens[self.pos].token, Token::Eof);
        self.advance();
        Spanned::new(token, position)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.current().position, message)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        self.error(format!(
            "expected {}, got {}",
            expected,
            self.current().token
        ))
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&format!("'{expected}'")));
        }
        self.advance();
        Ok(())
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(format!(
                "expression nested deeper than {} levels",
                self.max_depth
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parse a leaf: `path op scalar` or `path in [list]`
    fn parse_leaf(&mut self) -> Result<Expr, ParseError> {
        let Spanned { token, position } = self.take();
        let name = match token {
            Token::Identifier(name) => name,
            other => {
                return Err(ParseError::new(
                    position,
                    format!("expected a field name, got {other}"),
                ));
            }
        };
        let field = FieldPath::parse(&name).ok_or_else(|| {
            ParseError::new(position, format!("invalid field path '{name}'"))
        })?;

        let op = match &self.current().token {
            Token::EqEq => CompareOp::Equal,
            Token::NotEq => CompareOp::NotEqual,
            Token::Lt => CompareOp::LessThan,
            Token::Gt => CompareOp::GreaterThan,
            Token::LtEq => CompareOp::LessEqual,
            Token::GtEq => CompareOp::GreaterEqual,
            Token::In => {
                self.advance();
                return match self.take() {
                    Spanned {
                        token: Token::List(values),
                        ..
                    } => Ok(Expr::membership(field, values)),
                    Spanned { token, position } => Err(ParseError::new(
                        position,
                        format!("expected a list literal after 'in', got {token}"),
                    )),
                };
            }
            _ => return Err(self.unexpected("a comparison operator or 'in'")),
        };
        self.advance();

        match self.take() {
            Spanned {
                token: Token::Scalar(value),
                ..
            } => Ok(Expr::comparison(field, op, value)),
            Spanned { token, position } => Err(ParseError::new(
                position,
                format!("expected a literal after '{op}', got {token}"),
            )),
        }
    }

    /// Rejects a subtree taller than `max_depth` before it is built.
    fn check_height(&self, height: usize, position: usize) -> Result<(), ParseError> {
        if height > self.max_depth {
            return Err(ParseError::new(
                position,
                format!("expression nested deeper than {} levels", self.max_depth),
            ));
        }
        Ok(())
    }

    /// Parse a group or a leaf
    fn parse_primary(&mut self) -> Result<(Expr, usize), ParseError> {
        if self.check(&Token::LParen) {
            self.advance();
            self.enter()?;
            let inner = self.parse_or()?;
            self.leave();
            self.expect(Token::RParen)?;
            return Ok(inner);
        }
        Ok((self.parse_leaf()?, 1))
    }

    /// `~` binds tighter than `&` and `|` but looser than comparisons.
    fn parse_not(&mut self) -> Result<(Expr, usize), ParseError> {
        if self.check(&Token::Tilde) {
            let position = self.current().position;
            self.advance();
            self.enter()?;
            let (operand, height) = self.parse_not()?;
            self.leave();
            self.check_height(height + 1, position)?;
            return Ok((Expr::not(operand), height + 1));
        }
        self.parse_primary()
    }

    // Chains fold left without recursing, so the tree height is tracked here
    // rather than by `enter`.
    fn parse_and(&mut self) -> Result<(Expr, usize), ParseError> {
        let (mut left, mut height) = self.parse_not()?;

        while self.check(&Token::Ampersand) {
            let position = self.current().position;
            self.advance();
            let (right, right_height) = self.parse_not()?;
            height = height.max(right_height) + 1;
            self.check_height(height, position)?;
            left = Expr::and(left, right);
        }
        Ok((left, height))
    }

    fn parse_or(&mut self) -> Result<(Expr, usize), ParseError> {
        let (mut left, mut height) = self.parse_and()?;

        while self.check(&Token::Pipe) {
            let position = self.current().position;
            self.advance();
            let (right, right_height) = self.parse_and()?;
            height = height.max(right_height) + 1;
            self.check_height(height, position)?;
            left = Expr::or(left, right);
        }
        Ok((left, height))
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or().map(|(expr, _)| expr)
    }

    /// Parses a complete expression; leftover tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.check(&Token::Eof) {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }
}
