//! Brute-force feasibility by candidate enumeration (reference check).
//!
//! A non-empty closed polygon in the plane contains one of:
//! - the intersection of two row lines (it has a vertex), or
//! - the foot point `n·d` of some row line (all normals parallel), or
//! - the origin (no rows).
//!
//! O(m³); only meant for small systems, tests and benches.

use nalgebra::{Matrix2, Vector2};

use super::cfg::SolverCfg;
use super::rows::Row;

/// First candidate point satisfying every row within `cfg.eps_feas`, if any.
pub fn feasible_point_by_vertices(rows: &[Row], cfg: &SolverCfg) -> Option<Vector2<f64>> {
    let mut candidates = vec![Vector2::zeros()];
    candidates.extend(rows.iter().map(|r| r.n * r.d));
    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            if let Some(p) = line_intersection(&rows[i], &rows[j], cfg.eps_det) {
                candidates.push(p);
            }
        }
    }
    candidates
        .into_iter()
        .find(|&p| rows.iter().all(|r| r.satisfies_eps(p, cfg.eps_feas)))
}

fn line_intersection(r1: &Row, r2: &Row, eps_det: f64) -> Option<Vector2<f64>> {
    let a = Matrix2::new(r1.n.x, r1.n.y, r2.n.x, r2.n.y);
    if a.determinant().abs() <= eps_det {
        return None;
    }
    let inv = a.try_inverse()?;
    Some(inv * Vector2::new(r1.d, r2.d))
}
