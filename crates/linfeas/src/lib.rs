//! Linear-inequality parsing and feasibility engine.
//!
//! Pipeline
//! - `constraint`: free-form text → canonical `a·x + b·y + c <op> 0`.
//! - `contradiction`: cheap O(n²) pre-filter for directly clashing pairs.
//! - `feasibility`: phase-one simplex deciding whether a system has a point.
//!
//! Ownership
//! - A `ConstraintSystem` is a plain value owned by the caller (usually a
//!   `Session`). Hue and id allocation live in an explicit `Allocator`, one per
//!   session; nothing in this crate is process-global.

#[macro_use]
mod macros;

pub mod alloc;
pub mod api;
pub mod constraint;
pub mod contradiction;
pub mod feasibility;
pub mod session;
pub mod system;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use alloc::{Allocator, ConstraintId, Hue};
pub use constraint::{parse, parse_ineq, Constraint, ConstraintRecord, Ineq, Operator, ParseError};
pub use contradiction::find_direct_contradiction;
pub use feasibility::{check_feasibility, is_feasible, FeasibilityVerdict, SolverAnomaly, SolverCfg};
pub use nalgebra::Vector2 as Vec2;
pub use session::Session;
pub use system::ConstraintSystem;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::alloc::{Allocator, ConstraintId, Hue};
    pub use crate::constraint::{parse, Constraint, Operator, ParseError};
    pub use crate::feasibility::{check_feasibility, FeasibilityVerdict, SolverCfg};
    pub use crate::session::Session;
    pub use crate::system::ConstraintSystem;
    pub use nalgebra::Vector2 as Vec2;
}
