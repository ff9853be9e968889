//! Solver tolerances.
//!
//! Policy
//! - Defaults are fixed constants; callers rarely need to change them. The CLI
//!   exposes `eps_feas` and `eps_strict` for experiments.
//! - The strict margin is relative: `eps_strict · max(|d|, 1)`, so it survives
//!   rounding at large offsets.
//! - Two opposite strict margins must together exceed `eps_feas`, otherwise
//!   `x < 0 ∧ x > 0` collapses to the feasible point `x = 0`.

/// Row pairs whose normal matrix has `|det|` at or below this are parallel.
pub const DET_EPS: f64 = 1e-12;
/// Residual (in unit-normal distance) accepted as zero.
pub const FEAS_EPS: f64 = 1e-9;
/// Relative margin applied on the open side of `<` and `>`.
pub const STRICT_EPS: f64 = 2e-9;
/// Tableau entries at or below this magnitude are never pivoted on.
pub const PIVOT_EPS: f64 = 1e-12;

/// Tolerances for row building and the simplex run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverCfg {
    pub eps_det: f64,
    pub eps_feas: f64,
    pub eps_strict: f64,
    pub eps_pivot: f64,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            eps_det: DET_EPS,
            eps_feas: FEAS_EPS,
            eps_strict: STRICT_EPS,
            eps_pivot: PIVOT_EPS,
        }
    }
}

impl SolverCfg {
    /// Margin pulled in from a strict row with unit-normal offset `d`.
    #[inline]
    pub fn strict_margin(&self, d: f64) -> f64 {
        self.eps_strict * d.abs().max(1.0)
    }
}
