use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope frame. Closures clone it to keep the frame alive.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One scope frame: the bindings declared in it plus the frame it is nested in.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap a fresh child of `enclosing` in a shared handle.
    pub fn child(enclosing: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(enclosing))))
    }

    pub fn enclosing(&self) -> Option<EnvRef> {
        self.enclosing.clone()
    }

    /// Insert or overwrite a binding in this frame.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }
}

/// Walk exactly `distance` enclosing links from `env`.
///
/// The resolver computed `distance`, so a missing frame means the tree and
/// the environment chain disagree; that surfaces as `None`.
pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
    let mut frame: EnvRef = Rc::clone(env);

    for _ in 0..distance {
        let next: EnvRef = frame.borrow().enclosing()?;
        frame = next;
    }

    Some(frame)
}

/// Read `name` from the frame `distance` hops out, without searching.
pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value> {
    debug!("get_at distance={} name={}", distance, name.lexeme);

    ancestor(env, distance)
        .and_then(|frame| {
            let value: Option<Value> = frame.borrow().values.get(&name.lexeme).cloned();
            value
        })
        .ok_or_else(|| undefined(name))
}

/// Write `name` in the frame `distance` hops out, without searching.
pub fn assign_at(env: &EnvRef, distance: usize, name: &Token, value: Value) -> Result<()> {
    debug!("assign_at distance={} name={}", distance, name.lexeme);

    let frame: EnvRef = ancestor(env, distance).ok_or_else(|| undefined(name))?;
    frame.borrow_mut().define(&name.lexeme, value);

    Ok(())
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, name, 1)
    }

    #[test]
    fn get_searches_enclosing_frames() {
        let globals: EnvRef = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Number(1.0));

        let inner: EnvRef = Environment::child(&Environment::child(&globals));

        assert_eq!(inner.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn assign_mutates_defining_frame_only() {
        let globals: EnvRef = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Number(1.0));
        let inner: EnvRef = Environment::child(&globals);

        inner
            .borrow_mut()
            .assign(&ident("a"), Value::Number(2.0))
            .unwrap();

        assert_eq!(globals.borrow().get(&ident("a")).unwrap(), Value::Number(2.0));
        assert!(inner.borrow().values.is_empty());
    }

    #[test]
    fn undefined_lookup_and_assignment_fail() {
        let env: EnvRef = Rc::new(RefCell::new(Environment::new()));

        let err = env.borrow().get(&ident("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'missing'.\n[line 1]");

        assert!(env
            .borrow_mut()
            .assign(&ident("missing"), Value::Nil)
            .is_err());
    }

    #[test]
    fn at_distance_skips_shadowing_frames() {
        let outer: EnvRef = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().define("a", Value::Number(1.0));
        let inner: EnvRef = Environment::child(&outer);
        inner.borrow_mut().define("a", Value::Number(2.0));

        assert_eq!(get_at(&inner, 0, &ident("a")).unwrap(), Value::Number(2.0));
        assert_eq!(get_at(&inner, 1, &ident("a")).unwrap(), Value::Number(1.0));

        assign_at(&inner, 1, &ident("a"), Value::Number(3.0)).unwrap();
        assert_eq!(outer.borrow().get(&ident("a")).unwrap(), Value::Number(3.0));
        assert_eq!(get_at(&inner, 0, &ident("a")).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn redefinition_overwrites() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.define("a", Value::Bool(true));

        assert_eq!(env.get(&ident("a")).unwrap(), Value::Bool(true));
    }
}
