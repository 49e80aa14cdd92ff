// Bang Parser
// Recursive descent over the token stream with one token of lookahead
//
// Program       := StatementList?
// StatementList := Statement (';' StatementList?)?
// Statement     := PRINT Expr
//                | LET ID '='? Expr
//                | IF Expr BEGIN StatementList END
//                | LOOP Expr BEGIN StatementList END
// Expr          := Term (('+' | '-') Term)*
// Term          := Factor (('*' | '/') Factor)*
// Factor        := '!' Factor | '(' Expr ')' | INT | STR | ID

use crate::ast::{BinaryOperator, Node, NodeKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use tracing::debug;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parse a whole program. The first lexical or syntax error aborts parsing.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let program = if self.at_statement_start()? {
            self.parse_statement_list()?
        } else {
            Node::empty_program(self.current.line, self.current.span)
        };
        self.expect(TokenKind::EndOfInput, "a statement or end of input")?;
        debug!(statements = program.statements().len(), "parsed program");
        Ok(program)
    }

    /// The lookahead token; an `Error` token surfaces here as a lexical error
    fn peek(&self) -> ParseResult<&Token> {
        if self.current.is(TokenKind::Error) {
            Err(ParseError::lexical(&self.current))
        } else {
            Ok(&self.current)
        }
    }

    fn check(&self, kind: TokenKind) -> ParseResult<bool> {
        Ok(self.peek()?.is(kind))
    }

    fn advance(&mut self) -> ParseResult<Token> {
        self.peek()?;
        let next = self.lexer.next_token();
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn eat(&mut self, kind: TokenKind) -> ParseResult<Option<Token>> {
        if self.check(kind)? {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind)? {
            self.advance()
        } else {
            Err(ParseError::unexpected(&self.current, expected))
        }
    }

    fn at_statement_start(&self) -> ParseResult<bool> {
        Ok(matches!(
            self.peek()?.kind,
            TokenKind::Print | TokenKind::Let | TokenKind::If | TokenKind::Loop
        ))
    }

    fn parse_statement_list(&mut self) -> ParseResult<Node> {
        let first = self.parse_statement()?;
        let mut rest = Vec::new();
        while self.eat(TokenKind::Semicolon)?.is_some() && self.at_statement_start()? {
            rest.push(self.parse_statement()?);
        }

        // a; b; c => List(a, List(b, List(c)))
        let tail = rest
            .into_iter()
            .rev()
            .fold(None, |tail, statement| {
                Some(Node::statement_list(statement, tail))
            });
        Ok(Node::statement_list(first, tail))
    }

    fn parse_statement(&mut self) -> ParseResult<Node> {
        let keyword = self.peek()?.clone();
        let statement = match keyword.kind {
            TokenKind::Print => {
                self.advance()?;
                let expression = self.parse_expression()?;
                let span = keyword.span.to(expression.span);
                Node::new(NodeKind::Print(Box::new(expression)), keyword.line, span)
            }
            TokenKind::Let => {
                self.advance()?;
                let identifier = self.expect(TokenKind::Identifier, "an identifier")?;
                self.eat(TokenKind::Assign)?;
                let expression = self.parse_expression()?;
                let span = keyword.span.to(expression.span);
                Node::new(
                    NodeKind::Let {
                        identifier: identifier.lexeme,
                        expression: Box::new(expression),
                    },
                    keyword.line,
                    span,
                )
            }
            TokenKind::If | TokenKind::Loop => {
                self.advance()?;
                let condition = Box::new(self.parse_expression()?);
                self.expect(TokenKind::Begin, "`begin`")?;
                let body = Box::new(self.parse_statement_list()?);
                let end = self.expect(TokenKind::End, "`end`")?;
                let kind = if keyword.is(TokenKind::If) {
                    NodeKind::If { condition, body }
                } else {
                    NodeKind::Loop { condition, body }
                };
                Node::new(kind, keyword.line, keyword.span.to(end.span))
            }
            _ => return Err(ParseError::unexpected(&keyword, "a statement")),
        };
        debug!(line = statement.line, "parsed {} statement", keyword.kind);
        Ok(statement)
    }

    fn parse_expression(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_term()?;
        while let Some(operator) = self.binary_operator(&[TokenKind::Plus, TokenKind::Minus])? {
            let token = self.advance()?;
            let right = self.parse_term()?;
            left = Node::binary(operator, left, right, token.line);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_factor()?;
        while let Some(operator) = self.binary_operator(&[TokenKind::Star, TokenKind::Slash])? {
            let token = self.advance()?;
            let right = self.parse_factor()?;
            left = Node::binary(operator, left, right, token.line);
        }
        Ok(left)
    }

    fn binary_operator(&self, accepted: &[TokenKind]) -> ParseResult<Option<BinaryOperator>> {
        let kind = self.peek()?.kind;
        if !accepted.contains(&kind) {
            return Ok(None);
        }
        Ok(match kind {
            TokenKind::Plus => Some(BinaryOperator::Plus),
            TokenKind::Minus => Some(BinaryOperator::Minus),
            TokenKind::Star => Some(BinaryOperator::Times),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            _ => None,
        })
    }

    fn parse_factor(&mut self) -> ParseResult<Node> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Bang => {
                let operand = self.parse_factor()?;
                let span = token.span.to(operand.span);
                Ok(Node::new(NodeKind::Bang(Box::new(operand)), token.line, span))
            }
            TokenKind::LeftParen => {
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "`)`")?;
                Ok(expression)
            }
            TokenKind::IntLiteral => {
                let value = token
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| ParseError::lexical(&token))?;
                Ok(Node::new(NodeKind::IntLiteral(value), token.line, token.span))
            }
            TokenKind::StringLiteral => Ok(Node::new(
                NodeKind::StringLiteral(token.lexeme),
                token.line,
                token.span,
            )),
            TokenKind::Identifier => Ok(Node::new(
                NodeKind::Identifier(token.lexeme),
                token.line,
                token.span,
            )),
            _ => Err(ParseError::unexpected(&token, "an expression")),
        }
    }
}
