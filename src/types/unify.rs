//! Structural unification with level propagation.
//!
//! Solving a variable is a single `Link` write into its shared cell,
//! after the variable's level has been pushed into the solution. When
//! two composites unify, the shallower of their levels wins and flows
//! into every child pair; both nodes stay gray-marked while their
//! children are being unified, which doubles as the occurs check for
//! variables linking back into a node under unification.

use std::rc::Rc;

use super::error::TypeError;
use super::infer::Infer;
use super::ty::{find, Level, Type, TypeVar, GRAY_LEVEL};

impl Infer {
    /// Make two types equal, or fail with `Cycle`, `Mismatch` or `Arity`.
    pub fn unify(&mut self, left: &Rc<Type>, right: &Rc<Type>) -> Result<(), TypeError> {
        if Rc::ptr_eq(left, right) {
            return Ok(());
        }
        let left = find(left);
        let right = find(right);
        if Rc::ptr_eq(&left, &right) {
            return Ok(());
        }

        match (&*left, &*right) {
            (Type::Const(a), Type::Const(b)) if a == b => Ok(()),

            (Type::Var(cell), _) => {
                let level = match &*cell.borrow() {
                    TypeVar::Unbound(_, level) => *level,
                    TypeVar::Link(_) => unreachable!("find returned a link"),
                };
                self.update_level(level, &right)?;
                *cell.borrow_mut() = TypeVar::Link(right.clone());
                Ok(())
            }
            (_, Type::Var(cell)) => {
                let level = match &*cell.borrow() {
                    TypeVar::Unbound(_, level) => *level,
                    TypeVar::Link(_) => unreachable!("find returned a link"),
                };
                self.update_level(level, &left)?;
                *cell.borrow_mut() = TypeVar::Link(left.clone());
                Ok(())
            }

            (
                Type::Arrow(params_l, ret_l, levels_l),
                Type::Arrow(params_r, ret_r, levels_r),
            ) => {
                if levels_l.new.get() == GRAY_LEVEL || levels_r.new.get() == GRAY_LEVEL {
                    return Err(TypeError::Cycle);
                }
                if params_l.len() != params_r.len() {
                    return Err(TypeError::arity(params_l.len(), params_r.len()));
                }

                let level = Level::min(levels_l.new.get(), levels_r.new.get());
                levels_l.new.set(GRAY_LEVEL);
                levels_r.new.set(GRAY_LEVEL);
                for (l, r) in params_l.iter().zip(params_r) {
                    self.unify_level(level, l, r)?;
                }
                self.unify_level(level, ret_l, ret_r)?;
                levels_l.new.set(level);
                levels_r.new.set(level);
                Ok(())
            }

            (Type::App(head_l, args_l, levels_l), Type::App(head_r, args_r, levels_r)) => {
                if levels_l.new.get() == GRAY_LEVEL || levels_r.new.get() == GRAY_LEVEL {
                    return Err(TypeError::Cycle);
                }
                if args_l.len() != args_r.len() {
                    return Err(TypeError::arity(args_l.len(), args_r.len()));
                }

                let level = Level::min(levels_l.new.get(), levels_r.new.get());
                levels_l.new.set(GRAY_LEVEL);
                levels_r.new.set(GRAY_LEVEL);
                self.unify_level(level, head_l, head_r)?;
                for (l, r) in args_l.iter().zip(args_r) {
                    self.unify_level(level, l, r)?;
                }
                levels_l.new.set(level);
                levels_r.new.set(level);
                Ok(())
            }

            _ => Err(TypeError::mismatch(&left, &right)),
        }
    }

    /// Constrain `left` to `level`, then unify. Pushes the shallower
    /// side's level into whichever side has not been constrained yet.
    fn unify_level(
        &mut self,
        level: Level,
        left: &Rc<Type>,
        right: &Rc<Type>,
    ) -> Result<(), TypeError> {
        let left = find(left);
        self.update_level(level, &left)?;
        self.unify(&left, right)
    }
}
