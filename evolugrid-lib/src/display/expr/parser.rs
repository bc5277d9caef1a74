use serde_json::Value;

use super::BinaryOp;
use super::ExprError;
use super::Node;
use super::UnaryOp;
use super::eval::number;
use super::lexer::Token;
use super::lexer::TokenKind;

/// Deepest syntax tree the parser builds; also bounds evaluation depth.
pub(super) const MAX_DEPTH: usize = 64;

/// Recursive-descent parser, one method per precedence level.
pub(super) struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> Result<Node, ExprError> {
        let node = self.conditional()?;
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(ExprError::new(token.pos, "expected end of expression"));
        }
        Ok(node)
    }

    fn peek(&self) -> &Token {
        // tokenize always terminates the stream with Eof
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), ExprError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(ExprError::new(self.peek().pos, format!("expected {what}")))
        }
    }

    /// Counts one level of nesting, failing past [`MAX_DEPTH`].
    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::new(self.peek().pos, "expression nested too deeply"));
        }
        Ok(())
    }

    fn nested(&mut self, level: fn(&mut Self) -> Result<Node, ExprError>) -> Result<Node, ExprError> {
        self.enter()?;
        let node = level(self)?;
        self.depth -= 1;
        Ok(node)
    }

    fn conditional(&mut self) -> Result<Node, ExprError> {
        self.nested(Self::conditional_level)
    }

    fn conditional_level(&mut self) -> Result<Node, ExprError> {
        let condition = self.or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }
        let then = self.conditional()?;
        self.expect(&TokenKind::Colon, "':'")?;
        let otherwise = self.conditional()?;
        Ok(Node::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn or(&mut self) -> Result<Node, ExprError> {
        let mut left = self.and()?;
        let entered = self.depth;
        while self.eat(&TokenKind::OrOr) {
            self.enter()?;
            let right = self.and()?;
            left = Node::Or(Box::new(left), Box::new(right));
        }
        self.depth = entered;
        Ok(left)
    }

    fn and(&mut self) -> Result<Node, ExprError> {
        let mut left = self.equality()?;
        let entered = self.depth;
        while self.eat(&TokenKind::AndAnd) {
            self.enter()?;
            let right = self.equality()?;
            left = Node::And(Box::new(left), Box::new(right));
        }
        self.depth = entered;
        Ok(left)
    }

    fn equality(&mut self) -> Result<Node, ExprError> {
        self.binary_level(Self::comparison, |kind| match kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::Ne),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Node, ExprError> {
        self.binary_level(Self::additive, |kind| match kind {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Node, ExprError> {
        self.binary_level(Self::multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Node, ExprError> {
        self.binary_level(Self::unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    /// Left-associative chain of operators at one precedence level.
    fn binary_level(
        &mut self,
        operand: fn(&mut Self) -> Result<Node, ExprError>,
        operator: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> Result<Node, ExprError> {
        let mut left = operand(self)?;
        // Each operator deepens the left-leaning tree by one.
        let entered = self.depth;
        while let Some(op) = operator(&self.peek().kind) {
            self.enter()?;
            self.advance();
            let right = operand(self)?;
            left = Node::Binary(op, Box::new(left), Box::new(right));
        }
        self.depth = entered;
        Ok(left)
    }

    fn unary(&mut self) -> Result<Node, ExprError> {
        self.nested(Self::unary_level)
    }

    fn unary_level(&mut self) -> Result<Node, ExprError> {
        if self.eat(&TokenKind::Bang) {
            return Ok(Node::Unary(UnaryOp::Not, Box::new(self.unary()?)));
        }
        if self.eat(&TokenKind::Minus) {
            return Ok(Node::Unary(UnaryOp::Neg, Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(n) => Ok(Node::Literal(number(n))),
            TokenKind::Str(s) => Ok(Node::Literal(Value::String(s))),
            TokenKind::Ident(ident) => match ident.as_str() {
                "true" => Ok(Node::Literal(Value::Bool(true))),
                "false" => Ok(Node::Literal(Value::Bool(false))),
                "null" => Ok(Node::Literal(Value::Null)),
                _ => self.path(ident),
            },
            TokenKind::LParen => {
                let inner = self.conditional()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Eof => Err(ExprError::new(token.pos, "unexpected end of expression")),
            other => Err(ExprError::new(token.pos, format!("unexpected token {other:?}"))),
        }
    }

    fn path(&mut self, first: String) -> Result<Node, ExprError> {
        let mut segments = vec![first];
        while self.eat(&TokenKind::Dot) {
            let token = self.advance();
            match token.kind {
                TokenKind::Ident(segment) => segments.push(segment),
                _ => return Err(ExprError::new(token.pos, "expected field name after '.'")),
            }
        }
        if segments.len() > 1 && segments[0] == "row" {
            segments.remove(0);
        }
        Ok(Node::Field(segments))
    }
}
