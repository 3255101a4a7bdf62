//! Canonical type printer
//!
//! Variables are renamed to `a`, `b`, `c`, ... in the order they are
//! first encountered (falling back to `t26`, `t27`, ... once the
//! alphabet runs out), so two alpha-equivalent types print identically.
//! If the type contains generic variables, the printed form is prefixed
//! with `forall[..]` listing their letters in sorted order.
//!
//! The printer follows links via `find` and assumes the type is acyclic;
//! the engine's final cycle check guarantees that for every type it
//! returns.

use std::collections::HashMap;
use std::rc::Rc;

use crate::types::ty::{find, Id, Type, TypeVar, GENERIC_LEVEL};

/// Assigns canonical letters to variables in first-encounter order.
struct NameEnv {
    count: usize,
    names: HashMap<Id, String>,
    generic: Vec<String>,
}

impl NameEnv {
    fn new() -> Self {
        NameEnv {
            count: 0,
            names: HashMap::new(),
            generic: Vec::new(),
        }
    }

    fn name_of(&mut self, id: Id) -> String {
        if let Some(name) = self.names.get(&id) {
            return name.clone();
        }
        let name = if self.count < 26 {
            ((b'a' + self.count as u8) as char).to_string()
        } else {
            format!("t{}", self.count)
        };
        self.count += 1;
        self.names.insert(id, name.clone());
        name
    }
}

/// Print a type in its canonical schematic form.
pub fn print_type(ty: &Rc<Type>) -> String {
    let mut names = NameEnv::new();
    let body = print(&mut names, ty);
    if names.generic.is_empty() {
        body
    } else {
        let mut vars = names.generic;
        vars.sort();
        format!("forall[{}] {}", vars.join(" "), body)
    }
}

fn print(names: &mut NameEnv, ty: &Rc<Type>) -> String {
    let ty = find(ty);
    match &*ty {
        Type::Const(name) => name.clone(),

        Type::Var(cell) => match &*cell.borrow() {
            TypeVar::Unbound(id, level) => {
                let name = names.name_of(*id);
                if *level == GENERIC_LEVEL && !names.generic.contains(&name) {
                    names.generic.push(name.clone());
                }
                name
            }
            TypeVar::Link(_) => unreachable!("find returned a link"),
        },

        Type::App(head, args, _) => {
            let head = print(names, head);
            let args: Vec<String> = args.iter().map(|arg| print(names, arg)).collect();
            format!("{}[{}]", head, args.join(", "))
        }

        Type::Arrow(params, ret, _) => {
            let single = params.len() == 1 && !matches!(&*find(&params[0]), Type::Arrow(..));
            let params: Vec<String> = params.iter().map(|param| print(names, param)).collect();
            let ret = print(names, ret);
            if single {
                format!("{} -> {}", params[0], ret)
            } else {
                format!("({}) -> {}", params.join(", "), ret)
            }
        }
    }
}
