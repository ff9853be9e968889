//! Feasibility of a constraint system.
//!
//! Purpose
//! - Decide whether all constraints hold at one common point `(x, y)`.
//! - `check_feasibility` runs the cheap pairwise contradiction check first and
//!   falls back to the phase-one simplex (`is_feasible`), which is the sole
//!   authority when the pre-check finds nothing.
//!
//! Conservativeness
//! - A verdict is `feasible` only when the artificial sum provably reached zero
//!   (within `eps_feas`). Iteration caps and pivot trouble yield `infeasible`
//!   with the anomaly recorded and logged; nothing here panics.
//! - Strict relations are tested with a relative margin (`eps_strict`), so the region
//!   examined is a closed polygon slightly inside the open one.

mod cfg;
mod rows;
mod simplex;
pub mod vertex;

pub use cfg::{SolverCfg, DET_EPS, FEAS_EPS, PIVOT_EPS, STRICT_EPS};
pub use rows::{build_rows, FalseConstant, Row, Sense};
pub use simplex::{phase_one, PhaseOne};

use nalgebra::Vector2;
use thiserror::Error;

use crate::alloc::ConstraintId;
use crate::constraint::Constraint;
use crate::contradiction::find_direct_contradiction;
use crate::system::ConstraintSystem;

/// Conditions under which the simplex run gives up. Always reported as infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverAnomaly {
    #[error("pivot limit reached after {pivots} pivots")]
    IterationLimitExceeded { pivots: usize },

    #[error("no pivot above tolerance in column {column}")]
    NumericalInstability { column: usize },
}

/// Outcome of a feasibility query.
#[derive(Clone, Debug, PartialEq)]
pub struct FeasibilityVerdict {
    pub feasible: bool,
    /// Directly contradictory pair, only from the pairwise pre-check.
    pub witness: Option<(ConstraintId, ConstraintId)>,
    /// A point satisfying every constraint, when feasible.
    pub point: Option<Vector2<f64>>,
    /// Set when the solver stopped on an anomaly instead of a proof.
    pub anomaly: Option<SolverAnomaly>,
}

impl FeasibilityVerdict {
    pub fn feasible_at(point: Vector2<f64>) -> Self {
        Self {
            feasible: true,
            witness: None,
            point: Some(point),
            anomaly: None,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            feasible: false,
            witness: None,
            point: None,
            anomaly: None,
        }
    }

    pub fn contradiction(first: &Constraint, second: &Constraint) -> Self {
        Self {
            witness: Some((first.id().clone(), second.id().clone())),
            ..Self::infeasible()
        }
    }

    pub fn anomalous(anomaly: SolverAnomaly) -> Self {
        Self {
            anomaly: Some(anomaly),
            ..Self::infeasible()
        }
    }
}

/// Full decision procedure (no pre-check).
pub fn is_feasible(constraints: &[Constraint], cfg: &SolverCfg) -> FeasibilityVerdict {
    if constraints.is_empty() {
        return FeasibilityVerdict::feasible_at(Vector2::zeros());
    }
    let rows = match build_rows(constraints.iter().map(|c| c.ineq()), cfg) {
        Ok(rows) => rows,
        Err(FalseConstant { index }) => {
            tracing::debug!(
                id = %constraints[index].id(),
                display = constraints[index].display(),
                "constant constraint is false"
            );
            return FeasibilityVerdict::infeasible();
        }
    };
    match phase_one(&rows, cfg) {
        PhaseOne::Feasible(p) => {
            tracing::debug!(x = p.x, y = p.y, rows = rows.len(), "feasible");
            FeasibilityVerdict::feasible_at(p)
        }
        PhaseOne::Infeasible { residual } => {
            tracing::debug!(residual, rows = rows.len(), "infeasible");
            FeasibilityVerdict::infeasible()
        }
        PhaseOne::Anomaly(anomaly) => {
            tracing::warn!(%anomaly, rows = rows.len(), "solver anomaly; reporting infeasible");
            FeasibilityVerdict::anomalous(anomaly)
        }
    }
}

/// Pre-check for a directly contradictory pair, then the simplex decision.
pub fn check_feasibility(system: &ConstraintSystem, cfg: &SolverCfg) -> FeasibilityVerdict {
    let constraints = system.as_slice();
    if let Some((first, second)) = find_direct_contradiction(constraints, cfg) {
        tracing::debug!(
            first = first.display(),
            second = second.display(),
            "direct contradiction"
        );
        return FeasibilityVerdict::contradiction(first, second);
    }
    is_feasible(constraints, cfg)
}
