//! Canonical linear constraints in two variables and their text parser.
//!
//! Canonical form
//! - Every constraint is stored as `a·x + b·y + c <op> 0` with finite `a, b, c`.
//! - The display string is derived from `(a, b, c, op)` and regenerated on
//!   every replacement; it is never authored by hand.
//!
//! Parsing
//! - Whitespace is stripped and sign runs collapsed before two anchored
//!   templates (single variable, then `x`-and-`y`) are tried in order.
//! - Only a literal `0` right-hand side is accepted; `5<0` is rejected.

mod parse;
mod render;
mod types;

pub use parse::{normalize, parse, parse_ineq, ParseError};
pub use types::{Constraint, ConstraintRecord, Ineq, Operator};

#[cfg(test)]
mod tests;
