//! # Type Inference
//!
//! The [`Infer`] engine owns the state the algorithm needs across one
//! top-level inference: the variable gensym, the current `let`-nesting
//! level, and the deferred level-adjustment queue. [`Infer::top_typeof`]
//! resets all three, so every top-level call sees a clean slate.
//!
//! Generalization and instantiation are level-driven: after a `let`'s
//! bound expression is inferred, every variable whose level is deeper
//! than the current one cannot escape and is retagged generic; each use
//! of the bound name then copies exactly the generic structure, sharing
//! everything else.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::expression::Expression;

use super::env::TypeEnv;
use super::error::TypeError;
use super::ty::{cycle_free, find, Id, Level, Levels, Type, TypeVar, GENERIC_LEVEL};

/// The inference engine.
pub struct Infer {
    next_id: Id,
    pub(crate) level: Level,
    pub(crate) adj_queue: Vec<Rc<Type>>,
}

impl Infer {
    pub fn new() -> Self {
        Infer {
            next_id: 0,
            level: 0,
            adj_queue: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.next_id = 0;
        self.level = 0;
        self.adj_queue.clear();
    }

    fn fresh_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn enter_level(&mut self) {
        self.level += 1;
    }

    pub(crate) fn leave_level(&mut self) {
        self.level -= 1;
    }

    /// Fresh unbound variable at the current level.
    pub fn new_var(&mut self) -> Rc<Type> {
        let var = TypeVar::Unbound(self.fresh_id(), self.level);
        Rc::new(Type::Var(Rc::new(RefCell::new(var))))
    }

    /// Arrow node stamped with the current level.
    pub fn new_arrow(&self, params: Vec<Rc<Type>>, ret: Rc<Type>) -> Rc<Type> {
        Rc::new(Type::Arrow(params, ret, Levels::new(self.level)))
    }

    /// Application node stamped with the current level.
    pub fn new_app(&self, head: Rc<Type>, args: Vec<Rc<Type>>) -> Rc<Type> {
        Rc::new(Type::App(head, args, Levels::new(self.level)))
    }

    /// Generalize `ty` at the current level: every unbound variable
    /// introduced deeper than the current level becomes generic.
    ///
    /// All deferred level adjustments are forced first; the walk below
    /// trusts the stored levels.
    pub fn gen(&mut self, ty: &Rc<Type>) -> Result<(), TypeError> {
        self.force_adj_queue()?;
        self.gen_walk(ty);
        Ok(())
    }

    fn gen_walk(&self, ty: &Rc<Type>) {
        let ty = find(ty);
        match &*ty {
            Type::Var(cell) => {
                let retag = match &*cell.borrow() {
                    TypeVar::Unbound(id, level) if *level > self.level => Some(*id),
                    _ => None,
                };
                if let Some(id) = retag {
                    *cell.borrow_mut() = TypeVar::Unbound(id, GENERIC_LEVEL);
                }
            }
            Type::Arrow(_, _, levels) | Type::App(_, _, levels)
                if levels.new.get() > self.level =>
            {
                let children = match ty.parts() {
                    Some((children, _)) => children,
                    None => unreachable!(),
                };
                // Generalize the children first, then record their level
                // maximum; a node containing a generic child becomes
                // generic itself.
                let mut max = 0;
                for child in children {
                    let child = find(child);
                    self.gen_walk(&child);
                    max = max.max(child.level());
                }
                levels.old.set(max);
                levels.new.set(max);
            }
            _ => {}
        }
    }

    /// Instantiate a scheme: produce a copy with every generic variable
    /// replaced by a fresh unbound one. Shared generic occurrences stay
    /// shared through the id map; non-generic structure is shared with
    /// the scheme, not copied.
    pub fn inst(&mut self, ty: &Rc<Type>) -> Rc<Type> {
        let mut fresh = HashMap::new();
        self.inst_walk(ty, &mut fresh)
    }

    fn inst_walk(&mut self, ty: &Rc<Type>, fresh: &mut HashMap<Id, Rc<Type>>) -> Rc<Type> {
        match &**ty {
            Type::Var(cell) => {
                let var = cell.borrow().clone();
                match var {
                    TypeVar::Unbound(id, level) if level == GENERIC_LEVEL => {
                        match fresh.get(&id) {
                            Some(instance) => instance.clone(),
                            None => {
                                let instance = self.new_var();
                                fresh.insert(id, instance.clone());
                                instance
                            }
                        }
                    }
                    TypeVar::Unbound(..) => ty.clone(),
                    TypeVar::Link(target) => self.inst_walk(&target, fresh),
                }
            }
            Type::Arrow(params, ret, levels) if levels.new.get() == GENERIC_LEVEL => {
                let params = params
                    .iter()
                    .map(|param| self.inst_walk(param, fresh))
                    .collect();
                let ret = self.inst_walk(ret, fresh);
                self.new_arrow(params, ret)
            }
            Type::App(head, args, levels) if levels.new.get() == GENERIC_LEVEL => {
                let head = self.inst_walk(head, fresh);
                let args = args.iter().map(|arg| self.inst_walk(arg, fresh)).collect();
                self.new_app(head, args)
            }
            _ => ty.clone(),
        }
    }

    /// Compute the type of an expression.
    pub fn infer_expr(
        &mut self,
        env: &mut TypeEnv,
        expr: &Expression,
    ) -> Result<Rc<Type>, TypeError> {
        match expr {
            Expression::Ident(ident) => match env.lookup(&ident.value) {
                Some(scheme) => {
                    let scheme = scheme.clone();
                    Ok(self.inst(&scheme))
                }
                None => Err(TypeError::unbound_variable(
                    ident.value.clone(),
                    ident.position.clone(),
                )),
            },

            Expression::Lambda(lambda) => {
                let params: Vec<Rc<Type>> =
                    lambda.params.iter().map(|_| self.new_var()).collect();
                for (param, ty) in lambda.params.iter().zip(&params) {
                    env.bind(param.value.clone(), ty.clone());
                }
                let body = self.infer_expr(env, &lambda.body);
                for param in lambda.params.iter().rev() {
                    env.unbind(&param.value);
                }
                Ok(self.new_arrow(params, body?))
            }

            Expression::FunctionCall(call) => {
                let func_ty = self.infer_expr(env, &call.func)?;
                let mut arg_tys = Vec::with_capacity(call.args.len());
                for arg in &call.args {
                    arg_tys.push(self.infer_expr(env, arg)?);
                }
                let ret_ty = self.new_var();
                let expected = self.new_arrow(arg_tys, ret_ty.clone());
                self.unify(&func_ty, &expected)?;
                Ok(ret_ty)
            }

            Expression::Let(binding) => {
                self.enter_level();
                let bound = self.infer_expr(env, &binding.value);
                self.leave_level();
                let bound = bound?;
                self.gen(&bound)?;

                env.bind(binding.name.value.clone(), bound);
                let body = self.infer_expr(env, &binding.body);
                env.unbind(&binding.name.value);
                body
            }
        }
    }

    /// Infer the principal type of a top-level expression.
    ///
    /// Resets the engine state, runs the walk one level deep, checks the
    /// result for cycles and generalizes it. The cycle check must come
    /// before generalization: `gen` does not terminate on a cyclic type.
    pub fn top_typeof(
        &mut self,
        env: &mut TypeEnv,
        expr: &Expression,
    ) -> Result<Rc<Type>, TypeError> {
        self.reset();
        self.enter_level();
        let ty = self.infer_expr(env, expr);
        self.leave_level();
        let ty = ty?;

        cycle_free(&ty)?;
        self.gen(&ty)?;
        Ok(ty)
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}
