//! Closed rows `n·p <sense> d` built from canonical constraints.
//!
//! - `d = -c`; normals are scaled to unit length so tolerances are distances.
//! - `<` becomes `≤ d - m`, `>` becomes `≥ d + m` with `m = cfg.strict_margin(d)`.
//! - Constant rows (`a = b = 0` exactly) never reach the tableau: a true one is
//!   dropped, a false one makes the whole system infeasible. Any non-zero
//!   normal, however small, is a real bound and gets normalized.

use nalgebra::Vector2;

use super::cfg::SolverCfg;
use crate::constraint::{Ineq, Operator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

impl Sense {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Sense::Le => Sense::Ge,
            Sense::Ge => Sense::Le,
            Sense::Eq => Sense::Eq,
        }
    }
}

/// Closed row `n·p <sense> d`.
#[derive(Clone, Copy, Debug)]
pub struct Row {
    pub n: Vector2<f64>,
    pub d: f64,
    pub sense: Sense,
}

impl Row {
    #[inline]
    pub fn satisfies_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        let v = self.n.dot(&p);
        match self.sense {
            Sense::Le => v <= self.d + eps,
            Sense::Ge => v >= self.d - eps,
            Sense::Eq => (v - self.d).abs() <= eps,
        }
    }
}

/// A constant row whose comparison is false (e.g. `0x + 5 < 0`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FalseConstant {
    pub index: usize,
}

/// Convert constraints to unit-normal closed rows.
pub fn build_rows<'a, I>(ineqs: I, cfg: &SolverCfg) -> Result<Vec<Row>, FalseConstant>
where
    I: IntoIterator<Item = &'a Ineq>,
{
    let mut rows = Vec::new();
    for (index, ineq) in ineqs.into_iter().enumerate() {
        if ineq.a == 0.0 && ineq.b == 0.0 {
            if ineq.op.holds(ineq.c, cfg.eps_feas) {
                continue;
            }
            return Err(FalseConstant { index });
        }
        let n = ineq.normal();
        let norm = n.norm();
        let d = -ineq.c / norm;
        let n = n / norm;
        let row = match ineq.op {
            Operator::Lt => Row {
                n,
                d: d - cfg.strict_margin(d),
                sense: Sense::Le,
            },
            Operator::Le => Row {
                n,
                d,
                sense: Sense::Le,
            },
            Operator::Gt => Row {
                n,
                d: d + cfg.strict_margin(d),
                sense: Sense::Ge,
            },
            Operator::Ge => Row {
                n,
                d,
                sense: Sense::Ge,
            },
            Operator::Eq => Row {
                n,
                d,
                sense: Sense::Eq,
            },
        };
        rows.push(row);
    }
    Ok(rows)
}
