//! One user's working set: allocator, constraint system and tolerances.
//!
//! The session owns everything mutable; queries borrow the system and return
//! values, so nothing is shared across sessions.

use nalgebra::Vector2;

use crate::alloc::{Allocator, ConstraintId};
use crate::constraint::{parse, Constraint, ParseError};
use crate::feasibility::{check_feasibility, FeasibilityVerdict, SolverCfg};
use crate::system::ConstraintSystem;

#[derive(Clone, Debug, Default)]
pub struct Session {
    alloc: Allocator,
    system: ConstraintSystem,
    cfg: SolverCfg,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible ids and hues.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            alloc: Allocator::with_seed(seed),
            ..Self::default()
        }
    }

    pub fn with_cfg(mut self, cfg: SolverCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn cfg(&self) -> &SolverCfg {
        &self.cfg
    }
    #[inline]
    pub fn system(&self) -> &ConstraintSystem {
        &self.system
    }

    /// Parse `text` and append it. On error the system is unchanged.
    pub fn submit(&mut self, text: &str) -> Result<&Constraint, ParseError> {
        let constraint = parse(text, &mut self.alloc)?;
        tracing::debug!(id = %constraint.id(), display = constraint.display(), "constraint added");
        Ok(self.system.push(constraint))
    }

    pub fn remove(&mut self, id: &ConstraintId) -> Option<Constraint> {
        self.system.remove(id)
    }

    pub fn check(&self) -> FeasibilityVerdict {
        check_feasibility(&self.system, &self.cfg)
    }

    /// Does `p` satisfy every live constraint?
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.system.contains_point(p, self.cfg.eps_feas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn submit_check_remove_cycle() {
        let mut s = Session::with_seed(99);
        let first = s.submit("x-5>0").unwrap().id().clone();
        s.submit("x - 3 < 0").unwrap();
        let v = s.check();
        assert!(!v.feasible);
        assert!(v.witness.is_some());

        s.remove(&first).unwrap();
        let v = s.check();
        assert!(v.feasible);
        assert!(s.contains_point(v.point.unwrap()));
        assert!(s.contains_point(vector![0.0, 100.0]));
    }

    #[test]
    fn rejected_text_leaves_system_untouched() {
        let mut s = Session::with_seed(1);
        s.submit("y<0").unwrap();
        let err = s.submit("5<0").unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedForm { .. }));
        assert_eq!(s.system().len(), 1);
    }

    #[test]
    fn live_constraints_get_distinct_hues() {
        let mut s = Session::with_seed(4);
        for k in 0..50 {
            s.submit(&format!("x-{k}<=0")).unwrap();
        }
        let mut hues: Vec<_> = s.system().iter().map(|c| c.color()).collect();
        hues.sort();
        hues.dedup();
        assert_eq!(hues.len(), 50);
    }
}
