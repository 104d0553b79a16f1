use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use crate::value::{LoxFunction, Value};

/// Outcome of executing one statement.
///
/// `Return` unwinds through enclosing blocks and loops until the nearest
/// function-call frame catches it; it is deliberately not an error, and must
/// never be conflated with one.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Tree-walking evaluator.
///
/// Owns the globals, the pointer to the current environment frame, the
/// resolver's depth side-table, and the output sink used by `print`.  A
/// single instance is not safe for concurrent use; tests construct a fresh
/// one per scenario.
pub struct Interpreter<W: Write> {
    writer: W,
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
}

impl<W: Write> Interpreter<W> {
    pub fn new(writer: W) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        globals.borrow_mut().define(
            "clock",
            Value::NativeFunction {
                arity: 0,
                func: clock_native,
            },
        );

        Interpreter {
            writer,
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Record the scope distance for a variable occurrence.  Called by the
    /// resolver; an id absent from the table means "global".
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        debug!("Recording local binding: id={}, depth={}", id, depth);

        self.locals.insert(id, depth);
    }

    /// Execute a top-level statement batch.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        info!("Interpreting {} statement(s)", statements.len());

        for stmt in statements {
            // The resolver rejects top-level 'return', so the flow out of a
            // top-level statement is always Normal.
            self.execute(stmt)?;
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;

                writeln!(self.writer, "{}", value)?;

                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let enclosing: Rc<RefCell<Environment>> = self.environment.clone();

                self.execute_block(
                    statements,
                    Rc::new(RefCell::new(Environment::with_enclosing(enclosing))),
                )
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                // Capture the environment where the declaration executes,
                // so the body sees its lexical surroundings at call time.
                let function = Value::Function(LoxFunction {
                    declaration: declaration.clone(),
                    closure: self.environment.clone(),
                });

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, function);

                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Ok(Flow::Return(value))
            }
        }
    }

    /// Run `statements` inside `environment`, restoring the previous frame
    /// on every exit path: fall-through, error, and return-unwind alike.
    fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Flow> {
        let previous: Rc<RefCell<Environment>> =
            std::mem::replace(&mut self.environment, environment);

        let mut flow: Flow = Flow::Normal;

        for stmt in statements {
            match self.execute(stmt) {
                Ok(Flow::Normal) => {}

                Ok(Flow::Return(value)) => {
                    flow = Flow::Return(value);
                    break;
                }

                Err(e) => {
                    self.environment = previous;
                    return Err(e);
                }
            }
        }

        self.environment = previous;

        Ok(flow)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, operator, right),

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        self.environment.borrow_mut().assign_at(
                            distance,
                            &name.lexeme,
                            value.clone(),
                            name.line,
                        )?;
                    }

                    // An unresolved target writes straight into the globals,
                    // creating the name if it does not exist yet.
                    None => {
                        self.globals
                            .borrow_mut()
                            .define(&name.lexeme, value.clone());
                    }
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.evaluate_call(callee, paren, arguments),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => self
                .environment
                .borrow()
                .get_at(distance, &name.lexeme, name.line),

            None => self.globals.borrow().get(&name.lexeme, name.line),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let value: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => {
                let n: f64 = check_number_operand(operator, &value)?;

                Ok(Value::Number(-n))
            }

            TokenType::BANG => Ok(Value::Bool(!is_truthy(&value))),

            _ => Err(LoxError::runtime(
                operator.line,
                format!("Invalid unary operator '{}'.", operator.lexeme),
            )),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left_val: Value = self.evaluate(left)?;
        let right_val: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (&left_val, &right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

                // If either operand is a string, the other is coerced via
                // stringification and the two are concatenated.
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", left_val, right_val)))
                }

                _ => Err(LoxError::runtime(
                    operator.line,
                    "Operands must be numbers, or at least one of them a string.",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                Ok(Value::Number(a * b))
            }

            TokenType::SLASH => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                if b == 0.0 {
                    if a == 0.0 {
                        // 0/0 is indeterminate, not an error.
                        return Ok(Value::Number(f64::NAN));
                    }

                    return Err(LoxError::runtime(operator.line, "Cannot divide by zero."));
                }

                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = check_number_operands(operator, &left_val, &right_val)?;

                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(is_equal(&left_val, &right_val))),

            TokenType::BANG_EQUAL => Ok(Value::Bool(!is_equal(&left_val, &right_val))),

            _ => Err(LoxError::runtime(
                operator.line,
                format!("Invalid binary operator '{}'.", operator.lexeme),
            )),
        }
    }

    fn evaluate_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left_val: Value = self.evaluate(left)?;

        match operator.token_type {
            TokenType::OR => {
                if is_truthy(&left_val) {
                    return Ok(left_val);
                }
            }

            _ => {
                if !is_truthy(&left_val) {
                    return Ok(left_val);
                }
            }
        }

        self.evaluate(right)
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> Result<Value> {
        let callee_val: Value = self.evaluate(callee)?;

        let arity: usize = match &callee_val {
            Value::NativeFunction { arity, .. } => *arity,

            Value::Function(function) => function.arity(),

            _ => {
                return Err(LoxError::runtime(
                    paren.line,
                    "Can only call functions and classes.",
                ))
            }
        };

        if arguments.len() != arity {
            return Err(LoxError::runtime(
                paren.line,
                format!(
                    "Expected {} arguments but got {}.",
                    arity,
                    arguments.len()
                ),
            ));
        }

        let mut args: Vec<Value> = Vec::with_capacity(arguments.len());

        for arg in arguments {
            args.push(self.evaluate(arg)?);
        }

        match callee_val {
            Value::NativeFunction { func, .. } => func(&args),

            Value::Function(function) => self.call_function(&function, args),

            _ => unreachable!("callable kinds are filtered above"),
        }
    }

    /// Invoke a user function: fresh frame parented to the captured closure
    /// environment, parameters bound positionally, body run under the block
    /// discipline.  A `Return` flow stops here and becomes the call's value;
    /// falling off the end of the body yields nil.
    fn call_function(&mut self, function: &LoxFunction, args: Vec<Value>) -> Result<Value> {
        debug!(
            "Calling function '{}' with {} argument(s)",
            function.declaration.name.lexeme,
            args.len()
        );

        let mut frame: Environment = Environment::with_enclosing(function.closure.clone());

        for (param, arg) in function.declaration.params.iter().zip(args) {
            frame.define(&param.lexeme, arg);
        }

        match self.execute_block(&function.declaration.body, Rc::new(RefCell::new(frame)))? {
            Flow::Return(value) => Ok(value),

            Flow::Normal => Ok(Value::Nil),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Value predicates and builtins
// ─────────────────────────────────────────────────────────────────────────

/// nil and false are falsey, everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,

        Value::Bool(b) => *b,

        _ => true,
    }
}

fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        // IEEE 754 says NaN is not equal to itself, but treating all NaNs as
        // equal keeps repeated evaluation of a pure expression consistent.
        (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,

        (Value::String(a), Value::String(b)) => a == b,

        (Value::Bool(a), Value::Bool(b)) => a == b,

        (Value::Nil, Value::Nil) => true,

        _ => false,
    }
}

fn check_number_operand(operator: &Token, operand: &Value) -> Result<f64> {
    match operand {
        Value::Number(n) => Ok(*n),

        _ => Err(LoxError::runtime(operator.line, "Operand must be a number.")),
    }
}

fn check_number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    Ok((
        check_number_operand(operator, left)?,
        check_number_operand(operator, right)?,
    ))
}

fn clock_native(_args: &[Value]) -> Result<Value> {
    let timestamp: f64 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LoxError::runtime(0, format!("Clock error: {}", e)))?
        .as_secs_f64();

    Ok(Value::Number(timestamp))
}
