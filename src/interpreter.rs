//! Tree-walking evaluator.
//!
//! Expressions evaluate to a [`Value`]; statements complete with a
//! [`Completion`]. A `return` travels back up as `Completion::Return`
//! through the `Ok` channel, so the `?` operator that carries runtime errors
//! can never swallow it. Only a function call unwraps it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use chrono::Utc;
use log::{debug, info};

use crate::class::LoxClass;
use crate::environment::{self, EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId};
use crate::function::LoxFunction;
use crate::resolver::Locals;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::{NativeFunction, Value};

/// Deepest chain of Lox calls before a runtime error is raised.
pub const MAX_CALL_DEPTH: usize = 4096;

/// Grow the native stack when less than this much remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each extra stack segment.
const STACK_GROWTH: usize = 1024 * 1024;

/// How a statement finished.
#[derive(Debug, PartialEq)]
pub enum Completion {
    Normal,
    Return(Value),
}

pub struct Interpreter<'out> {
    globals: EnvRef,
    environment: EnvRef,
    locals: Locals,
    call_depth: usize,
    out: &'out mut dyn Write,
}

impl<'out> Interpreter<'out> {
    /// Creates a new Interpreter printing to `out`, with `clock` defined.
    pub fn new(out: &'out mut dyn Write) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef = Rc::new(RefCell::new(Environment::new()));

        debug!("Defining native function 'clock'");

        globals.borrow_mut().define(
            "clock",
            Value::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                func: |_args: &[Value]| {
                    let micros: i64 = Utc::now().timestamp_micros();
                    Ok(Value::Number(micros as f64 / 1_000_000.0))
                },
            })),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            call_depth: 0,
            out,
        }
    }

    /// Record resolver output. Entries from earlier programs are kept.
    pub fn resolve(&mut self, locals: Locals) {
        debug!("Recording {} resolved locals", locals.len());

        self.locals.extend(locals);
    }

    /// Interprets a list of statements (a "program").
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        info!("Interpreting {} statements", statements.len());

        for stmt in statements {
            self.execute(stmt)?;
        }

        info!("Interpretation completed successfully");
        Ok(())
    }

    /// Run `statements` with `environment` as the current scope, restoring
    /// the previous scope however they finish.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> Result<Completion> {
        let previous: EnvRef = std::mem::replace(&mut self.environment, environment);

        let result: Result<Completion> = self.execute_all(statements);

        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Completion> {
        for stmt in statements {
            if let Completion::Return(value) = self.execute(stmt)? {
                return Ok(Completion::Return(value));
            }
        }

        Ok(Completion::Normal)
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Completion> {
        match stmt {
            Stmt::Block(statements) => {
                debug!("Entering block with {} statements", statements.len());
                let environment: EnvRef = Environment::child(&self.environment);
                self.execute_block(statements, environment)
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                debug!("Defining class '{}'", name.lexeme);
                self.execute_class(name, superclass.as_ref(), methods)?;
                Ok(Completion::Normal)
            }

            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Completion::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);
                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(Completion::Normal)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Completion::Normal)
                }
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(Completion::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                Ok(Completion::Return(value))
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Variable '{}' defined with value: {}", name.lexeme, value);
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Completion::Normal)
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Completion::Return(value) = self.execute(body)? {
                        return Ok(Completion::Return(value));
                    }
                }
                Ok(Completion::Normal)
            }
        }
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Result<()> {
        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let token: &Token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(LoxError::runtime(token, "Superclass must be a class."));
                }
            },
            None => None,
        };

        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Nil);

        // Methods of a subclass close over one extra frame holding `super`.
        let method_env: EnvRef = match &superclass {
            Some(superclass) => {
                let env: EnvRef = Environment::child(&self.environment);
                env.borrow_mut()
                    .define("super", Value::Class(Rc::clone(superclass)));
                env
            }
            None => Rc::clone(&self.environment),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|declaration| {
                let is_initializer: bool = declaration.name.lexeme == "init";
                let method = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&method_env),
                    is_initializer,
                );
                (declaration.name.lexeme.clone(), Rc::new(method))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);

        info!("Class '{}' defined", name.lexeme);

        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))
    }

    /// Evaluates an expression and returns a Value.
    ///
    /// Every nested evaluation, and so every Lox call, passes through here;
    /// the native stack is grown on demand before descending.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;
                let right: Value = self.evaluate(right)?;
                binary(operator, left, right)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                let Some(callable) = callee.as_callable() else {
                    return Err(LoxError::runtime(
                        paren,
                        "Can only call functions and classes.",
                    ));
                };

                if values.len() != callable.arity() {
                    return Err(LoxError::runtime(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            values.len()
                        ),
                    ));
                }

                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(LoxError::runtime(paren, "Stack overflow."));
                }

                debug!("Calling {} with {} arguments", callee, values.len());
                self.call_depth += 1;
                let result: Result<Value> = callable.call(self, paren, values);
                self.call_depth -= 1;
                result
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name),
                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;

                let decided: bool = match operator.token_type {
                    TokenType::OR => left.is_truthy(),
                    _ => !left.is_truthy(),
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(LoxError::runtime(name, "Only instances have fields."));
                };

                let value: Value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),

            Expr::This { id, keyword } => self.look_up_variable(keyword, *id),

            Expr::Unary { operator, right } => {
                let right: Value = self.evaluate(right)?;

                match (&operator.token_type, right) {
                    (TokenType::MINUS, Value::Number(n)) => Ok(Value::Number(-n)),
                    (TokenType::MINUS, _) => {
                        Err(LoxError::runtime(operator, "Operand must be a number."))
                    }
                    (_, right) => Ok(Value::Bool(!right.is_truthy())),
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(name, *id),
        }
    }

    /// `super` lives `distance` frames out; the bound `this` one frame closer.
    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = self
            .locals
            .get(&id)
            .copied()
            .ok_or_else(|| LoxError::runtime(keyword, "Can't use 'super' outside of a class."))?;

        let Value::Class(superclass) = environment::get_at(&self.environment, distance, keyword)?
        else {
            return Err(LoxError::runtime(keyword, "Superclass must be a class."));
        };

        let this = Token::new(TokenType::THIS, "this", keyword.line);
        let Value::Instance(object) =
            environment::get_at(&self.environment, distance.saturating_sub(1), &this)?
        else {
            return Err(LoxError::runtime(keyword, "Can't use 'this' outside of a class."));
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(object)))),
            None => Err(LoxError::runtime(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value> {
    match (&operator.token_type, left, right) {
        (TokenType::EQUAL_EQUAL, left, right) => Ok(Value::Bool(left == right)),
        (TokenType::BANG_EQUAL, left, right) => Ok(Value::Bool(left != right)),

        (TokenType::PLUS, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (TokenType::PLUS, Value::String(a), Value::String(b)) => {
            Ok(Value::String(Rc::from(format!("{}{}", a, b))))
        }
        (TokenType::PLUS, _, _) => Err(LoxError::runtime(
            operator,
            "Operands must be two numbers or two strings.",
        )),

        (TokenType::MINUS, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (TokenType::STAR, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
        (TokenType::SLASH, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
        (TokenType::GREATER, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),
        (TokenType::GREATER_EQUAL, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),
        (TokenType::LESS, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),
        (TokenType::LESS_EQUAL, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),

        _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
    }
}
