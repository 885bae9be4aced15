use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::class::LoxInstance;
use crate::environment::{self, EnvRef, Environment};
use crate::error::Result;
use crate::interpreter::{Completion, Interpreter};
use crate::stmt::FunctionDecl;
use crate::token::{Token, TokenType};
use crate::value::{Callable, Value};

/// A user-defined function or method, closed over its defining scope.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Self {
        LoxFunction {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// Rebuild this method with an extra frame binding `this` to `instance`.
    pub fn bind(&self, instance: Rc<LoxInstance>) -> LoxFunction {
        let environment: EnvRef = Environment::child(&self.closure);
        environment
            .borrow_mut()
            .define("this", Value::Instance(instance));

        LoxFunction::new(
            Rc::clone(&self.declaration),
            environment,
            self.is_initializer,
        )
    }

    /// The bound instance of an initializer sits in the closure frame itself.
    fn bound_this(&self) -> Result<Value> {
        let this = Token::new(TokenType::THIS, "this", self.declaration.name.line);

        environment::get_at(&self.closure, 0, &this)
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter<'_>,
        _paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        debug!("Calling user-defined function '{}'", self.name());

        let environment: EnvRef = Environment::child(&self.closure);

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, argument);
        }

        let completion: Completion = interpreter.execute_block(&self.declaration.body, environment)?;

        if self.is_initializer {
            return self.bound_this();
        }

        match completion {
            Completion::Return(value) => Ok(value),
            Completion::Normal => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}
