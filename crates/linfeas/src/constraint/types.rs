//! Operator, canonical numeric form, and the session-level `Constraint`.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::parse::ParseError;
use super::render;
use crate::alloc::{Allocator, ConstraintId, Hue};

/// Relational operator of `a·x + b·y + c <op> 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "=")]
    Eq,
}

impl Operator {
    /// ASCII symbol, as accepted by the parser.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "=",
        }
    }

    /// Typeset symbol used in display strings.
    pub fn glyph(self) -> &'static str {
        match self {
            Operator::Le => "≤",
            Operator::Ge => "≥",
            other => other.symbol(),
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Operator::Lt),
            "<=" => Some(Operator::Le),
            ">" => Some(Operator::Gt),
            ">=" => Some(Operator::Ge),
            "=" => Some(Operator::Eq),
            _ => None,
        }
    }

    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self, Operator::Lt | Operator::Gt)
    }

    /// Evaluate `value <op> 0`. Strict operators compare exactly; `<=`, `>=`
    /// and `=` accept `eps` of slack.
    pub fn holds(self, value: f64, eps: f64) -> bool {
        match self {
            Operator::Lt => value < 0.0,
            Operator::Le => value <= eps,
            Operator::Gt => value > 0.0,
            Operator::Ge => value >= -eps,
            Operator::Eq => value.abs() <= eps,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Canonical numeric relation `a·x + b·y + c <op> 0`.
///
/// Invariants:
/// - `a`, `b`, `c` are finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ineq {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub op: Operator,
}

impl Ineq {
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, op: Operator) -> Self {
        Self { a, b, c, op }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }

    /// Coefficient vector `(a, b)`.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.a, self.b)
    }

    /// `a·x + b·y + c` at `p`.
    #[inline]
    pub fn evaluate(&self, p: Vector2<f64>) -> f64 {
        self.normal().dot(&p) + self.c
    }

    #[inline]
    pub fn satisfied_by(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.op.holds(self.evaluate(p), eps)
    }

    /// Rendered linear part (`2x + 3y`), used as a syntactic equivalence key.
    pub fn expression_key(&self) -> String {
        render::linear_part(self.a, self.b)
    }
}

impl fmt::Display for Ineq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::display(self))
    }
}

/// One constraint of a session: canonical form plus its derived display
/// string, hue and id.
///
/// Constraints are immutable. A change is expressed by `replaced`, which keeps
/// id and hue and re-derives the display string.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    ineq: Ineq,
    display: String,
    color: Hue,
    id: ConstraintId,
}

impl Constraint {
    /// Build a constraint, drawing id and hue from `alloc`.
    pub fn new(ineq: Ineq, alloc: &mut Allocator) -> Self {
        let id = alloc.allocate_id();
        let color = alloc.allocate_color();
        Self {
            display: render::display(&ineq),
            ineq,
            color,
            id,
        }
    }

    /// New value with a different relation; id and hue carry over.
    pub fn replaced(&self, ineq: Ineq) -> Self {
        Self {
            display: render::display(&ineq),
            ineq,
            color: self.color,
            id: self.id.clone(),
        }
    }

    #[inline]
    pub fn ineq(&self) -> &Ineq {
        &self.ineq
    }
    #[inline]
    pub fn a(&self) -> f64 {
        self.ineq.a
    }
    #[inline]
    pub fn b(&self) -> f64 {
        self.ineq.b
    }
    #[inline]
    pub fn c(&self) -> f64 {
        self.ineq.c
    }
    #[inline]
    pub fn op(&self) -> Operator {
        self.ineq.op
    }
    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }
    #[inline]
    pub fn color(&self) -> Hue {
        self.color
    }
    #[inline]
    pub fn id(&self) -> &ConstraintId {
        &self.id
    }

    pub fn to_record(&self) -> ConstraintRecord {
        ConstraintRecord {
            a: self.ineq.a,
            b: self.ineq.b,
            c: self.ineq.c,
            operator: self.ineq.op,
            display: self.display.clone(),
        }
    }

    /// Rebuild from a structural record. The display string is re-derived
    /// rather than trusted; id and hue are fresh.
    pub fn from_record(record: &ConstraintRecord, alloc: &mut Allocator) -> Result<Self, ParseError> {
        let ineq = Ineq::new(record.a, record.b, record.c, record.operator);
        if !ineq.is_finite() {
            return Err(ParseError::NonFinite {
                input: record.display.clone(),
            });
        }
        Ok(Self::new(ineq, alloc))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Structural form of a constraint: the five semantic fields only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub operator: Operator,
    pub display: String,
}
