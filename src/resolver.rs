//! Static resolution pass.
//!
//! A single AST walk that:
//! 1. **Builds lexical scopes**: maintains a stack of `HashMap<&str, bool>`
//!    tracking declared (false) and fully defined (true) names in each nested
//!    block or function.
//! 2. **Enforces static rules**: redeclaration in the same scope, reading a
//!    variable in its own initializer, and `return` outside a function are
//!    all rejected before evaluation begins.
//! 3. **Records binding distances**: for every `Expr::Variable` and
//!    `Expr::Assign` occurrence, calls back into the interpreter to note the
//!    number of environment hops between the reference and its binding
//!    frame.  Names not found in any scope are left unresolved and treated
//!    as globals at runtime.
//!
//! Resolution halts on the first static error.

use std::collections::HashMap;
use std::io::Write;

use log::{debug, info};

use crate::ast::{Expr, ExprId, FunctionDecl, Stmt};
use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::token::Token;

/// Are we inside a user function?  Used to validate `return`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

/// Resolver: tracks scopes, enforces static rules, and *records* binding
/// distances (locals vs. globals) by calling back into the interpreter.
pub struct Resolver<'a, 'interp, W: Write> {
    interpreter: &'interp mut Interpreter<W>,
    scopes: Vec<HashMap<&'a str, bool>>, // false=declared, true=defined
    current_function: FunctionType,
}

impl<'a, 'interp, W: Write> Resolver<'a, 'interp, W> {
    /// Create a new resolver bound to the given interpreter.
    pub fn new(interpreter: &'interp mut Interpreter<W>) -> Self {
        info!("Resolver instantiated");
        Resolver {
            interpreter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
        }
    }

    /// Walk all top-level statements.
    pub fn resolve(&mut self, statements: &'a [Stmt]) -> Result<()> {
        info!(
            "Beginning resolve pass over {} statement(s)",
            statements.len()
        );
        for stmt in statements {
            self.resolve_stmt(stmt)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statement resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &'a Stmt) -> Result<()> {
        debug!("Resolving stmt: {:?}", stmt);

        match stmt {
            Stmt::Block(statements) => {
                self.begin_scope();

                let result: Result<()> =
                    statements.iter().try_for_each(|s| self.resolve_stmt(s));

                // The scope is popped even when a child failed.
                self.end_scope();

                result?;
            }

            Stmt::Var { name, initializer } => {
                // Declared but not yet defined: reads of the name inside its
                // own initializer are detectable.
                self.declare(name)?;

                if let Some(expr) = initializer {
                    self.resolve_expr(expr)?;
                }

                self.define(name);
            }

            Stmt::Function(declaration) => {
                // Declare and define eagerly so the body can recurse.
                self.declare(&declaration.name)?;
                self.define(&declaration.name);

                self.resolve_function(declaration)?;
            }

            Stmt::Expression(expr) | Stmt::Print(expr) => {
                self.resolve_expr(expr)?;
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                // Static analysis is conservative: both branches are
                // resolved, whatever the condition turns out to be.
                self.resolve_expr(condition)?;

                self.resolve_stmt(then_branch)?;

                if let Some(eb) = else_branch.as_deref() {
                    self.resolve_stmt(eb)?;
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition)?;

                self.resolve_stmt(body)?;
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    return Err(LoxError::resolve(
                        keyword.line,
                        "'return' used outside of function",
                    ));
                }

                if let Some(expr) = value {
                    self.resolve_expr(expr)?;
                }
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expression resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &'a Expr) -> Result<()> {
        match expr {
            Expr::Literal(_) => {
                // Literals have no sub-expressions.
            }

            Expr::Grouping(inner) => {
                self.resolve_expr(inner)?;
            }

            Expr::Unary { right, .. } => {
                self.resolve_expr(right)?;
            }

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left)?;
                self.resolve_expr(right)?;
            }

            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(name.lexeme.as_str()) == Some(&false) {
                        return Err(LoxError::resolve(
                            name.line,
                            "Can't read local variable in its own initializer.",
                        ));
                    }
                }

                self.resolve_local(*id, name);
            }

            Expr::Assign { id, name, value } => {
                // Right-hand side first, then bind the assignment target.
                self.resolve_expr(value)?;
                self.resolve_local(*id, name);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee)?;

                for arg in arguments {
                    self.resolve_expr(arg)?;
                }
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Function helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter a fresh scope for a function's parameters + body.
    fn resolve_function(&mut self, declaration: &'a FunctionDecl) -> Result<()> {
        let enclosing: FunctionType = self.current_function;

        self.current_function = FunctionType::Function;

        self.begin_scope();

        let result: Result<()> = (|| {
            for param in &declaration.params {
                self.declare(param)?;
                self.define(param);
            }

            for stmt in &declaration.body {
                self.resolve_stmt(stmt)?;
            }

            Ok(())
        })();

        self.end_scope();

        self.current_function = enclosing;

        result
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scope management
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &'a Token) -> Result<()> {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(name.lexeme.as_str()) {
                return Err(LoxError::resolve(
                    name.line,
                    format!("variable {} already exists in the scope", name.lexeme),
                ));
            }

            scope.insert(&name.lexeme, false);
        }
        Ok(())
    }

    fn define(&mut self, name: &'a Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(&name.lexeme, true);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Binding-distance helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Record this variable occurrence as either a local at some depth, or a
    /// global if not found in any scope.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name.lexeme.as_str()) {
                debug!("Resolved '{}' at depth {}", name.lexeme, depth);

                self.interpreter.resolve(id, depth);
                return;
            }
        }

        debug!("Resolved '{}' as global", name.lexeme);
    }
}
