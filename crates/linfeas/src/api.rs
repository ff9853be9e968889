//! Call surface consumed by presentation layers.
//!
//! Thin wrappers naming the four engine operations; `Session` bundles them for
//! callers that do not want to thread an allocator and config by hand.

pub use crate::feasibility::check_feasibility;
pub use crate::session::Session;

use crate::alloc::{Allocator, ConstraintId};
use crate::constraint::{Constraint, ParseError};
use crate::system::ConstraintSystem;

/// Text → constraint, drawing id and hue from `alloc`.
pub fn parse(text: &str, alloc: &mut Allocator) -> Result<Constraint, ParseError> {
    crate::constraint::parse(text, alloc)
}

/// Append, preserving insertion order.
pub fn add_constraint(mut system: ConstraintSystem, constraint: Constraint) -> ConstraintSystem {
    system.push(constraint);
    system
}

/// Drop the constraint with `id`; unknown ids leave the system as is.
pub fn remove_constraint(mut system: ConstraintSystem, id: &ConstraintId) -> ConstraintSystem {
    system.remove(id);
    system
}
