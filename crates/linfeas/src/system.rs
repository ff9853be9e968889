//! Ordered collection of constraints owned by a session.
//!
//! Insertion order is display order only; feasibility never depends on it.

use nalgebra::Vector2;

use crate::alloc::ConstraintId;
use crate::constraint::{Constraint, ConstraintRecord};

#[derive(Clone, Debug, Default)]
pub struct ConstraintSystem {
    constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append, preserving insertion order.
    pub fn push(&mut self, constraint: Constraint) -> &Constraint {
        self.constraints.push(constraint);
        &self.constraints[self.constraints.len() - 1]
    }

    /// Remove by id; `None` if no such constraint is live.
    pub fn remove(&mut self, id: &ConstraintId) -> Option<Constraint> {
        let idx = self.constraints.iter().position(|c| c.id() == id)?;
        Some(self.constraints.remove(idx))
    }

    pub fn get(&self, id: &ConstraintId) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
    #[inline]
    pub fn as_slice(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn ids(&self) -> Vec<ConstraintId> {
        self.constraints.iter().map(|c| c.id().clone()).collect()
    }

    pub fn records(&self) -> Vec<ConstraintRecord> {
        self.constraints.iter().map(Constraint::to_record).collect()
    }

    /// Constraints that `p` violates (strict relations compared exactly).
    pub fn violated_by(&self, p: Vector2<f64>, eps: f64) -> Vec<&Constraint> {
        self.constraints
            .iter()
            .filter(|c| !c.ineq().satisfied_by(p, eps))
            .collect()
    }

    #[inline]
    pub fn contains_point(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.constraints.iter().all(|c| c.ineq().satisfied_by(p, eps))
    }
}

impl<'a> IntoIterator for &'a ConstraintSystem {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

impl FromIterator<Constraint> for ConstraintSystem {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Allocator;
    use crate::constraint::parse;
    use nalgebra::vector;

    fn system(lines: &[&str], alloc: &mut Allocator) -> ConstraintSystem {
        lines.iter().map(|l| parse(l, alloc).unwrap()).collect()
    }

    #[test]
    fn push_remove_keep_order() {
        let mut alloc = Allocator::with_seed(2);
        let mut sys = system(&["x<0", "y<0", "x+y<0"], &mut alloc);
        let ids = sys.ids();
        let removed = sys.remove(&ids[1]).unwrap();
        assert_eq!(removed.display(), "y < 0");
        let shown: Vec<_> = sys.iter().map(|c| c.display().to_string()).collect();
        assert_eq!(shown, ["x < 0", "x + y < 0"]);
        assert!(sys.remove(&ids[1]).is_none());
        assert!(sys.get(&ids[2]).is_some());
    }

    #[test]
    fn point_membership() {
        let mut alloc = Allocator::with_seed(2);
        let sys = system(&["x+y-10<=0", "x-y+2>=0"], &mut alloc);
        assert!(sys.contains_point(vector![4.0, 6.0], 1e-9));
        let bad = sys.violated_by(vector![0.0, 5.0], 1e-9);
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].display(), "x - y + 2 ≥ 0");
    }
}
