//! # Deferred Level Adjustment
//!
//! When unification constrains a composite type to a shallower level,
//! every unbound variable inside it must eventually be lowered too. Doing
//! that eagerly would re-traverse the whole node on every constraint, so
//! [`Infer::update_level`] only tightens the node's `new` level and
//! enqueues the node; the structural walk is deferred until
//! generalization actually needs accurate levels.
//!
//! [`Infer::force_adj_queue`] drains the queue exactly once per
//! generalization. A queued node whose `old` level does not exceed the
//! current level lies outside the scope being generalized and is kept
//! queued for a later, shallower generalization; the same buffering
//! applies to composite children met during the walk. That skip is what
//! makes generalization amortized in the size of the generalized region.
//!
//! Nodes are gray-marked while their children are on the stack. Meeting
//! a gray node here or in `update_level` means a variable was linked back
//! into a node containing it.

use std::rc::Rc;

use super::error::TypeError;
use super::infer::Infer;
use super::ty::{find, Level, Type, TypeVar, GRAY_LEVEL};

impl Infer {
    /// Constrain `t` to level `l` at most, deferring structural work.
    ///
    /// Unbound variables are lowered in place. Composite nodes only get
    /// their `new` level tightened; the node is enqueued the first time
    /// it becomes dirty (`new` drops below `old`). Children are not
    /// visited here.
    pub(crate) fn update_level(&mut self, l: Level, t: &Rc<Type>) -> Result<(), TypeError> {
        let t = find(t);
        match &*t {
            Type::Const(_) => Ok(()),
            Type::Var(cell) => {
                let mut var = cell.borrow_mut();
                match &mut *var {
                    TypeVar::Unbound(_, level) => {
                        if l < *level {
                            *level = l;
                        }
                        Ok(())
                    }
                    TypeVar::Link(_) => unreachable!("update_level on a solved variable"),
                }
            }
            Type::Arrow(_, _, levels) | Type::App(_, _, levels) => {
                if levels.new.get() == GRAY_LEVEL {
                    return Err(TypeError::Cycle);
                }
                if l < levels.new.get() {
                    if levels.new.get() == levels.old.get() {
                        self.adj_queue.push(t.clone());
                    }
                    levels.new.set(l);
                }
                Ok(())
            }
        }
    }

    /// Resolve all deferred level adjustments. Must run before `gen`
    /// inspects any level.
    pub(crate) fn force_adj_queue(&mut self) -> Result<(), TypeError> {
        let pending = std::mem::take(&mut self.adj_queue);
        for node in pending {
            self.adjust_node(&node)?;
        }
        Ok(())
    }

    /// Settle one queued composite: either keep it queued (outside the
    /// scope being generalized), drop it (already settled), or push its
    /// `new` level into the children.
    fn adjust_node(&mut self, t: &Rc<Type>) -> Result<(), TypeError> {
        let (children, levels) = match t.parts() {
            Some(parts) => parts,
            // the queue only ever holds composite nodes
            None => unreachable!("non-composite node on the adjustment queue"),
        };

        if levels.old.get() <= self.level {
            self.adj_queue.push(t.clone());
            return Ok(());
        }
        if levels.old.get() == levels.new.get() {
            return Ok(());
        }

        let target = levels.new.get();
        levels.new.set(GRAY_LEVEL);
        for child in children {
            self.adjust_child(target, child)?;
        }
        levels.new.set(target);
        levels.old.set(target);
        Ok(())
    }

    fn adjust_child(&mut self, level: Level, t: &Rc<Type>) -> Result<(), TypeError> {
        let t = find(t);
        match &*t {
            Type::Const(_) => Ok(()),
            Type::Var(cell) => {
                let mut var = cell.borrow_mut();
                match &mut *var {
                    TypeVar::Unbound(_, current) => {
                        if *current > level {
                            *current = level;
                        }
                        Ok(())
                    }
                    TypeVar::Link(_) => unreachable!("adjust_child on a solved variable"),
                }
            }
            Type::Arrow(_, _, levels) | Type::App(_, _, levels) => {
                if levels.new.get() == GRAY_LEVEL {
                    return Err(TypeError::Cycle);
                }
                if levels.new.get() > level {
                    levels.new.set(level);
                }
                self.adjust_node(&t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_level_lowers_unbound_var() {
        let mut infer = Infer::new();
        infer.enter_level();
        infer.enter_level();
        let v = infer.new_var();
        assert_eq!(v.level(), 2);

        infer.update_level(1, &v).unwrap();
        assert_eq!(v.level(), 1);

        // never raised
        infer.update_level(2, &v).unwrap();
        assert_eq!(v.level(), 1);
    }

    #[test]
    fn test_update_level_defers_composite_traversal() {
        let mut infer = Infer::new();
        infer.enter_level();
        infer.enter_level();
        let v = infer.new_var();
        let arrow = infer.new_arrow(vec![v.clone()], v.clone());

        infer.update_level(1, &arrow).unwrap();

        // the bound tightened, the child was not touched
        assert_eq!(arrow.level(), 1);
        assert_eq!(v.level(), 2);
        assert_eq!(infer.adj_queue.len(), 1);
    }

    #[test]
    fn test_update_level_enqueues_once() {
        let mut infer = Infer::new();
        infer.enter_level();
        infer.enter_level();
        infer.enter_level();
        let v = infer.new_var();
        let arrow = infer.new_arrow(vec![v.clone()], v);

        infer.update_level(2, &arrow).unwrap();
        infer.update_level(1, &arrow).unwrap();
        assert_eq!(infer.adj_queue.len(), 1);
        assert_eq!(arrow.level(), 1);
    }

    #[test]
    fn test_force_adj_queue_propagates_to_children() {
        let mut infer = Infer::new();
        infer.enter_level();
        infer.enter_level();
        let v = infer.new_var();
        let arrow = infer.new_arrow(vec![v.clone()], v.clone());
        infer.update_level(1, &arrow).unwrap();
        infer.leave_level();

        infer.force_adj_queue().unwrap();

        assert_eq!(v.level(), 1);
        assert_eq!(arrow.level(), 1);
        // settled: both levels agree and the queue is empty
        match arrow.parts() {
            Some((_, levels)) => assert_eq!(levels.old.get(), levels.new.get()),
            None => unreachable!(),
        }
        assert!(infer.adj_queue.is_empty());
    }

    #[test]
    fn test_force_adj_queue_keeps_out_of_scope_nodes() {
        let mut infer = Infer::new();
        infer.enter_level();
        let v = infer.new_var();
        let arrow = infer.new_arrow(vec![v.clone()], v.clone());
        infer.update_level(0, &arrow).unwrap();

        // still at the node's own level: the node survives the drain
        infer.force_adj_queue().unwrap();
        assert_eq!(infer.adj_queue.len(), 1);
        assert_eq!(v.level(), 1);

        // after leaving the scope it settles
        infer.leave_level();
        infer.force_adj_queue().unwrap();
        assert!(infer.adj_queue.is_empty());
        assert_eq!(v.level(), 0);
    }
}
