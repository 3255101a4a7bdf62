//! # Type Environment
//!
//! Maps identifiers to type schemes during the inference walk. A scheme
//! here is just an engine type whose generalized variables carry
//! `GENERIC_LEVEL`; looking a name up instantiates it at the use site.
//!
//! Scoping is strictly LIFO: every binder pushes onto a per-name stack
//! and every scope exit pops the most recent entry, so the innermost
//! binding always wins and shadowed bindings reappear when the shadow is
//! removed.

use std::collections::HashMap;
use std::rc::Rc;

use super::ty::Type;

/// Environment with last-in-first-out shadowing per name.
#[derive(Debug, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, Vec<Rc<Type>>>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    /// Push a binding, shadowing any previous binding of the same name.
    pub fn bind(&mut self, name: String, ty: Rc<Type>) {
        self.bindings.entry(name).or_default().push(ty);
    }

    /// Pop the most recent binding for `name`, re-exposing whatever it
    /// shadowed.
    pub fn unbind(&mut self, name: &str) {
        if let Some(stack) = self.bindings.get_mut(name) {
            stack.pop();
            if stack.is_empty() {
                self.bindings.remove(name);
            }
        }
    }

    /// Look up the innermost binding for `name`.
    pub fn lookup(&self, name: &str) -> Option<&Rc<Type>> {
        self.bindings.get(name).and_then(|stack| stack.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(name: &str) -> Rc<Type> {
        Rc::new(Type::Const(name.to_string()))
    }

    fn const_name(ty: &Rc<Type>) -> &str {
        match &**ty {
            Type::Const(name) => name,
            _ => panic!("expected a constant"),
        }
    }

    #[test]
    fn test_lookup_empty() {
        let env = TypeEnv::empty();
        assert!(env.lookup("x").is_none());
    }

    #[test]
    fn test_bind_and_lookup() {
        let mut env = TypeEnv::empty();
        env.bind("x".to_string(), constant("int"));
        assert_eq!(const_name(env.lookup("x").unwrap()), "int");
    }

    #[test]
    fn test_shadowing_is_lifo() {
        let mut env = TypeEnv::empty();
        env.bind("x".to_string(), constant("int"));
        env.bind("x".to_string(), constant("bool"));
        assert_eq!(const_name(env.lookup("x").unwrap()), "bool");

        env.unbind("x");
        assert_eq!(const_name(env.lookup("x").unwrap()), "int");

        env.unbind("x");
        assert!(env.lookup("x").is_none());
    }

    #[test]
    fn test_unbind_missing_name_is_harmless() {
        let mut env = TypeEnv::empty();
        env.unbind("x");
        assert!(env.lookup("x").is_none());
    }
}
