use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::error::LoxError;
use crate::token::{Token, TokenType};

/// Shared cap for call arguments and function parameters.
const MAX_CALL_ARITY: usize = 255;

/// Recursive-descent parser with one token of lookahead.
///
/// Parse errors do not abort the whole parse: after each failed declaration
/// the parser resynchronizes at the next statement boundary and keeps going,
/// so one run reports every syntactic problem it can find.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_expr_id: ExprId,
    errors: Vec<LoxError>,
}

impl Parser {
    /// `first_expr_id` seeds node-identity numbering.  A fresh parse of an
    /// independent source starts at 0; an interpreter session feeding
    /// multiple sources through the same evaluator must thread the watermark
    /// returned by [`Parser::parse`] back in, so ids never collide.
    pub fn new(tokens: Vec<Token>, first_expr_id: ExprId) -> Self {
        info!("Initializing Parser with {} token(s)", tokens.len());
        Parser {
            tokens,
            current: 0,
            next_expr_id: first_expr_id,
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream into a statement list.
    ///
    /// On success also returns the next unused [`ExprId`].  On failure every
    /// accumulated parse error is returned.
    pub fn parse(mut self) -> Result<(Vec<Stmt>, ExprId), Vec<LoxError>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),

                Err(e) => {
                    debug!("Parse error, resynchronizing: {}", e);

                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok((statements, self.next_expr_id))
        } else {
            Err(self.errors)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Declarations and statements
    // ─────────────────────────────────────────────────────────────────────

    fn declaration(&mut self) -> Result<Stmt, LoxError> {
        if self.match_tokens(&[TokenType::FUN]) {
            return self.function_declaration();
        }

        if self.match_tokens(&[TokenType::VAR]) {
            return self.var_declaration();
        }

        self.statement()
    }

    fn function_declaration(&mut self) -> Result<Stmt, LoxError> {
        let name: Token = self.consume(&TokenType::IDENTIFIER, "Expected function name.")?;

        self.consume(&TokenType::LEFT_PAREN, "Expected '(' after function name.")?;

        let mut params: Vec<Token> = Vec::new();

        if !self.check(&TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_CALL_ARITY {
                    return Err(LoxError::parse(
                        self.peek().line,
                        "Can't have more than 255 parameters.",
                    ));
                }

                params.push(self.consume(&TokenType::IDENTIFIER, "Expected parameter name.")?);

                if !self.match_tokens(&[TokenType::COMMA]) {
                    break;
                }
            }
        }

        self.consume(&TokenType::RIGHT_PAREN, "Expected ')' after parameters.")?;
        self.consume(&TokenType::LEFT_BRACE, "Expected '{' before function body.")?;

        let body: Vec<Stmt> = self.block()?;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
    }

    fn var_declaration(&mut self) -> Result<Stmt, LoxError> {
        let name: Token = self.consume(&TokenType::IDENTIFIER, "Expected variable name.")?;

        let initializer: Option<Expr> = if self.match_tokens(&[TokenType::EQUAL]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            &TokenType::SEMICOLON,
            "Expected ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt, LoxError> {
        if self.match_tokens(&[TokenType::FOR]) {
            return self.for_statement();
        }

        if self.match_tokens(&[TokenType::IF]) {
            return self.if_statement();
        }

        if self.match_tokens(&[TokenType::WHILE]) {
            return self.while_statement();
        }

        if self.match_tokens(&[TokenType::PRINT]) {
            return self.print_statement();
        }

        if self.match_tokens(&[TokenType::RETURN]) {
            return self.return_statement();
        }

        if self.match_tokens(&[TokenType::LEFT_BRACE]) {
            return Ok(Stmt::Block(self.block()?));
        }

        self.expression_statement()
    }

    /// `for` has no AST node of its own: it desugars into the equivalent
    /// `{ init; while (cond) { body; inc; } }` built from existing nodes.
    fn for_statement(&mut self) -> Result<Stmt, LoxError> {
        self.consume(&TokenType::LEFT_PAREN, "Expected '(' after 'for'.")?;

        let initializer: Option<Stmt> = if self.match_tokens(&[TokenType::SEMICOLON]) {
            None
        } else if self.match_tokens(&[TokenType::VAR]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition: Option<Expr> = if !self.check(&TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(&TokenType::SEMICOLON, "Expected ';' after loop condition.")?;

        let increment: Option<Expr> = if !self.check(&TokenType::RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(&TokenType::RIGHT_PAREN, "Expected ')' after for clauses.")?;

        let mut body: Stmt = self.statement()?;

        if let Some(inc) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(inc)]);
        }

        body = Stmt::While {
            condition: condition.unwrap_or(Expr::Literal(LiteralValue::True)),
            body: Box::new(body),
        };

        if let Some(init) = initializer {
            body = Stmt::Block(vec![init, body]);
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> Result<Stmt, LoxError> {
        self.consume(&TokenType::LEFT_PAREN, "Expected '(' after 'if'.")?;

        let condition: Expr = self.expression()?;

        self.consume(&TokenType::RIGHT_PAREN, "Expected ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.match_tokens(&[TokenType::ELSE]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, LoxError> {
        self.consume(&TokenType::LEFT_PAREN, "Expected '(' after 'while'.")?;

        let condition: Expr = self.expression()?;

        self.consume(
            &TokenType::RIGHT_PAREN,
            "Expected ')' after while condition.",
        )?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn print_statement(&mut self) -> Result<Stmt, LoxError> {
        let value: Expr = self.expression()?;

        self.consume(&TokenType::SEMICOLON, "Expected ';' after value.")?;

        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> Result<Stmt, LoxError> {
        let keyword: Token = self.previous().clone();

        let value: Option<Expr> = if !self.check(&TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(&TokenType::SEMICOLON, "Expected ';' after return value.")?;

        Ok(Stmt::Return { keyword, value })
    }

    fn block(&mut self) -> Result<Vec<Stmt>, LoxError> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(&TokenType::RIGHT_BRACE) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        self.consume(&TokenType::RIGHT_BRACE, "Expected '}' after block.")?;

        Ok(statements)
    }

    fn expression_statement(&mut self) -> Result<Stmt, LoxError> {
        let expr: Expr = self.expression()?;

        self.consume(&TokenType::SEMICOLON, "Expected ';' after expression.")?;

        Ok(Stmt::Expression(expr))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expressions, lowest precedence first
    // ─────────────────────────────────────────────────────────────────────

    fn expression(&mut self) -> Result<Expr, LoxError> {
        self.assignment()
    }

    /// The l-value trick: parse the left side as a full expression, and only
    /// reinterpret it as an assignment target once '=' shows up.
    fn assignment(&mut self) -> Result<Expr, LoxError> {
        let expr: Expr = self.or()?;

        if self.match_tokens(&[TokenType::EQUAL]) {
            let equals: Token = self.previous().clone();
            let value: Expr = self.assignment()?;

            // The Variable node dissolves into the Assign node, which
            // inherits its identity.
            if let Expr::Variable { id, name } = expr {
                return Ok(Expr::Assign {
                    id,
                    name,
                    value: Box::new(value),
                });
            }

            return Err(LoxError::parse(
                equals.line,
                "Invalid assignment target for equals token",
            ));
        }

        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.and()?;

        while self.match_tokens(&[TokenType::OR]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.and()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.equality()?;

        while self.match_tokens(&[TokenType::AND]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.equality()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.comparison()?;

        while self.match_tokens(&[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.comparison()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.term()?;

        while self.match_tokens(&[
            TokenType::GREATER,
            TokenType::GREATER_EQUAL,
            TokenType::LESS,
            TokenType::LESS_EQUAL,
        ]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.term()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.factor()?;

        while self.match_tokens(&[TokenType::MINUS, TokenType::PLUS]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.factor()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.unary()?;

        while self.match_tokens(&[TokenType::SLASH, TokenType::STAR]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, LoxError> {
        if self.match_tokens(&[TokenType::BANG, TokenType::MINUS]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr, LoxError> {
        let mut expr: Expr = self.primary()?;

        while self.match_tokens(&[TokenType::LEFT_PAREN]) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, LoxError> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(&TokenType::RIGHT_PAREN) {
            loop {
                if arguments.len() >= MAX_CALL_ARITY {
                    return Err(LoxError::parse(
                        self.peek().line,
                        "Can't have more than 255 arguments.",
                    ));
                }

                arguments.push(self.expression()?);

                if !self.match_tokens(&[TokenType::COMMA]) {
                    break;
                }
            }
        }

        let paren: Token = self.consume(&TokenType::RIGHT_PAREN, "Expected ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr, LoxError> {
        if self.match_tokens(&[TokenType::FALSE]) {
            return Ok(Expr::Literal(LiteralValue::False));
        }

        if self.match_tokens(&[TokenType::TRUE]) {
            return Ok(Expr::Literal(LiteralValue::True));
        }

        if self.match_tokens(&[TokenType::NIL]) {
            return Ok(Expr::Literal(LiteralValue::Nil));
        }

        if self.match_tokens(&[TokenType::NUMBER(0.0), TokenType::STRING(String::new())]) {
            let literal: LiteralValue = match &self.previous().token_type {
                TokenType::NUMBER(n) => LiteralValue::Number(*n),
                TokenType::STRING(s) => LiteralValue::Str(s.clone()),
                _ => unreachable!("match_tokens only admits literal kinds here"),
            };

            return Ok(Expr::Literal(literal));
        }

        if self.match_tokens(&[TokenType::IDENTIFIER]) {
            let name: Token = self.previous().clone();

            return Ok(Expr::Variable {
                id: self.next_id(),
                name,
            });
        }

        if self.match_tokens(&[TokenType::LEFT_PAREN]) {
            let expr: Expr = self.expression()?;

            self.consume(&TokenType::RIGHT_PAREN, "Expected ')' after expression.")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        let actual: &Token = self.peek();

        Err(LoxError::parse(
            actual.line,
            format!(
                "Expected expression, but found '{}'",
                if actual.lexeme.is_empty() {
                    "end of input"
                } else {
                    actual.lexeme.as_str()
                }
            ),
        ))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Parsing support
    // ─────────────────────────────────────────────────────────────────────

    /// Discard tokens until a plausible statement boundary: just past a ';'
    /// or right before a keyword that can begin a declaration.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == TokenType::SEMICOLON {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN => return,

                _ => {
                    self.advance();
                }
            }
        }
    }

    fn next_id(&mut self) -> ExprId {
        let id: ExprId = self.next_expr_id;

        self.next_expr_id += 1;

        id
    }

    fn match_tokens(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();

                return true;
            }
        }

        false
    }

    fn consume(&mut self, token_type: &TokenType, message: &str) -> Result<Token, LoxError> {
        if self.check(token_type) {
            return Ok(self.advance().clone());
        }

        let actual: &Token = self.peek();

        Err(LoxError::parse(
            actual.line,
            format!("{} Got '{}'.", message, actual.lexeme),
        ))
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        &self.peek().token_type == token_type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }
}
