//! Phase-one simplex on a dense tableau.
//!
//! Layout
//! - Columns: `x⁺, x⁻, y⁺, y⁻` (free variables split), one slack per `≤`/`≥`
//!   row, one artificial per `≥`/`=` row, then the right-hand side.
//! - Rows: one per constraint (oriented so `d ≥ 0`), then the reduced-cost row
//!   of `minimize Σ artificials`. The objective value is `-t[(m, rhs)]`.
//!
//! Pivoting follows Bland's rule: the smallest-index improving column enters
//! and ratio ties leave by smallest basic-variable index. Entries at or below
//! `eps_pivot` are never pivoted on.

use nalgebra::{DMatrix, Vector2};

use super::cfg::SolverCfg;
use super::rows::{Row, Sense};
use super::SolverAnomaly;

/// Number of structural columns (`x⁺, x⁻, y⁺, y⁻`).
const STRUCT: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum PhaseOne {
    /// Artificial sum reached zero; the basic solution as a point.
    Feasible(Vector2<f64>),
    /// Optimum stayed above `eps_feas`.
    Infeasible { residual: f64 },
    Anomaly(SolverAnomaly),
}

struct Tableau {
    t: DMatrix<f64>,
    basis: Vec<usize>,
    m: usize,
    rhs: usize,
}

impl Tableau {
    fn new(rows: &[Row]) -> Self {
        let m = rows.len();
        let n_slack = rows.iter().filter(|r| r.sense != Sense::Eq).count();
        let n_art = rows.iter().filter(|r| oriented(r).2 != Sense::Le).count();
        let art_start = STRUCT + n_slack;
        let rhs = art_start + n_art;

        let mut t = DMatrix::<f64>::zeros(m + 1, rhs + 1);
        let mut basis = Vec::with_capacity(m);
        let (mut s, mut a) = (STRUCT, art_start);
        for (i, row) in rows.iter().enumerate() {
            let (n, d, sense) = oriented(row);
            t[(i, 0)] = n.x;
            t[(i, 1)] = -n.x;
            t[(i, 2)] = n.y;
            t[(i, 3)] = -n.y;
            t[(i, rhs)] = d;
            match sense {
                Sense::Le => {
                    t[(i, s)] = 1.0;
                    basis.push(s);
                    s += 1;
                }
                Sense::Ge => {
                    t[(i, s)] = -1.0;
                    s += 1;
                    t[(i, a)] = 1.0;
                    basis.push(a);
                    a += 1;
                }
                Sense::Eq => {
                    t[(i, a)] = 1.0;
                    basis.push(a);
                    a += 1;
                }
            }
        }
        // Reduced costs of Σ artificials with every artificial basic.
        for i in 0..m {
            if basis[i] < art_start {
                continue;
            }
            for j in (0..art_start).chain(std::iter::once(rhs)) {
                let v = t[(i, j)];
                t[(m, j)] -= v;
            }
        }
        Self { t, basis, m, rhs }
    }

    #[inline]
    fn objective(&self) -> f64 {
        -self.t[(self.m, self.rhs)]
    }

    fn entering(&self, eps: f64) -> Option<usize> {
        (0..self.rhs).find(|&j| self.t[(self.m, j)] < -eps)
    }

    fn leaving(&self, col: usize, eps: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.m {
            let a = self.t[(i, col)];
            if a <= eps {
                continue;
            }
            let ratio = self.t[(i, self.rhs)] / a;
            best = match best {
                None => Some((i, ratio)),
                Some((bi, br)) => {
                    if ratio < br - eps || (ratio <= br + eps && self.basis[i] < self.basis[bi]) {
                        Some((i, ratio))
                    } else {
                        Some((bi, br))
                    }
                }
            };
        }
        best.map(|(i, _)| i)
    }

    fn pivot(&mut self, r: usize, col: usize) {
        let p = self.t[(r, col)];
        for j in 0..=self.rhs {
            self.t[(r, j)] /= p;
        }
        for i in 0..=self.m {
            if i == r {
                continue;
            }
            let f = self.t[(i, col)];
            if f == 0.0 {
                continue;
            }
            for j in 0..=self.rhs {
                let v = self.t[(r, j)];
                self.t[(i, j)] -= f * v;
            }
        }
        self.basis[r] = col;
    }

    /// Current basic solution mapped back to `(x, y)`.
    fn point(&self) -> Vector2<f64> {
        let mut v = [0.0; STRUCT];
        for (i, &b) in self.basis.iter().enumerate() {
            if b < STRUCT {
                v[b] = self.t[(i, self.rhs)];
            }
        }
        Vector2::new(v[0] - v[1], v[2] - v[3])
    }
}

/// Orientation with non-negative right-hand side.
#[inline]
fn oriented(row: &Row) -> (Vector2<f64>, f64, Sense) {
    if row.d < 0.0 {
        (-row.n, -row.d, row.sense.flipped())
    } else {
        (row.n, row.d, row.sense)
    }
}

/// Minimize the artificial sum over `rows`.
pub fn phase_one(rows: &[Row], cfg: &SolverCfg) -> PhaseOne {
    if rows.is_empty() {
        return PhaseOne::Feasible(Vector2::zeros());
    }
    let mut tab = Tableau::new(rows);
    let cap = 4 * (tab.m + tab.rhs);
    let mut pivots = 0usize;
    while let Some(col) = tab.entering(cfg.eps_pivot) {
        if pivots >= cap {
            return PhaseOne::Anomaly(SolverAnomaly::IterationLimitExceeded { pivots });
        }
        let Some(r) = tab.leaving(col, cfg.eps_pivot) else {
            // Σ artificials is bounded below by zero; a ray here is round-off.
            return PhaseOne::Anomaly(SolverAnomaly::NumericalInstability { column: col });
        };
        tab.pivot(r, col);
        pivots += 1;
    }
    let residual = tab.objective();
    if !residual.is_finite() {
        return PhaseOne::Anomaly(SolverAnomaly::NumericalInstability { column: tab.rhs });
    }
    tracing::trace!(pivots, residual, "phase one finished");
    if residual > cfg.eps_feas {
        PhaseOne::Infeasible { residual }
    } else {
        PhaseOne::Feasible(tab.point())
    }
}
