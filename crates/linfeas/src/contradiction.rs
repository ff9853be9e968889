//! Pairwise pre-check for directly contradictory constraints.
//!
//! Two constraints clash when their linear parts render identically
//! (`Ineq::expression_key`, a purely syntactic key: `x + y` and `y + x` differ,
//! as do `x + y` and `2x + 2y`) and their bounds on that expression leave no
//! overlap. Gaps are measured with the solver's own tolerances, so every pair
//! flagged here is also infeasible for the simplex run.
//!
//! `None` means "nothing found", not "feasible".

use crate::constraint::{Constraint, Ineq, Operator};
use crate::feasibility::SolverCfg;

/// Bound that one constraint places on its expression `E = a·x + b·y`.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Bound {
    Upper { k: f64, strict: bool },
    Lower { k: f64, strict: bool },
    Exact(f64),
}

impl Bound {
    /// `E + c <op> 0` read as `E <op> -c`.
    fn of(ineq: &Ineq) -> Self {
        let k = -ineq.c;
        match ineq.op {
            Operator::Lt => Bound::Upper { k, strict: true },
            Operator::Le => Bound::Upper { k, strict: false },
            Operator::Gt => Bound::Lower { k, strict: true },
            Operator::Ge => Bound::Lower { k, strict: false },
            Operator::Eq => Bound::Exact(k),
        }
    }
}

/// Whether two bounds on the same expression (with coefficient norm `norm`)
/// leave an empty interval. Offsets and strict margins match `build_rows`.
fn clash(p: Bound, q: Bound, norm: f64, cfg: &SolverCfg) -> bool {
    let margin = |k: f64, strict: bool| {
        if strict {
            cfg.strict_margin(k / norm)
        } else {
            0.0
        }
    };
    let gap = match (p, q) {
        (Bound::Upper { k: hi, strict: s1 }, Bound::Lower { k: lo, strict: s2 })
        | (Bound::Lower { k: lo, strict: s2 }, Bound::Upper { k: hi, strict: s1 }) => {
            (lo - hi) / norm + margin(hi, s1) + margin(lo, s2)
        }
        (Bound::Exact(k1), Bound::Exact(k2)) => (k1 - k2).abs() / norm,
        (Bound::Exact(k), Bound::Upper { k: hi, strict })
        | (Bound::Upper { k: hi, strict }, Bound::Exact(k)) => (k - hi) / norm + margin(hi, strict),
        (Bound::Exact(k), Bound::Lower { k: lo, strict })
        | (Bound::Lower { k: lo, strict }, Bound::Exact(k)) => (lo - k) / norm + margin(lo, strict),
        _ => return false,
    };
    gap > cfg.eps_feas
}

/// First directly contradictory pair in insertion order, if any. O(n²).
pub fn find_direct_contradiction<'a>(
    constraints: &'a [Constraint],
    cfg: &SolverCfg,
) -> Option<(&'a Constraint, &'a Constraint)> {
    let keys: Vec<String> = constraints.iter().map(|c| c.ineq().expression_key()).collect();
    for i in 0..constraints.len() {
        let p = constraints[i].ineq();
        // Constant rows are classified by the solver.
        if p.a == 0.0 && p.b == 0.0 {
            continue;
        }
        let norm = p.normal().norm();
        for j in (i + 1)..constraints.len() {
            if keys[i] != keys[j] {
                continue;
            }
            let q = constraints[j].ineq();
            if clash(Bound::of(p), Bound::of(q), norm, cfg) {
                return Some((&constraints[i], &constraints[j]));
            }
        }
    }
    None
}
