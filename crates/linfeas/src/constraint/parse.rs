use thiserror::Error;

use super::types::{Constraint, Ineq, Operator};
use crate::alloc::Allocator;

/// Errors produced while turning text into a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text matches neither the single-variable nor the two-variable template.
    #[error("unrecognized form: {input:?}")]
    UnrecognizedForm { input: String },

    /// A numeral does not fit in a finite `f64`.
    #[error("coefficient out of range: {input:?}")]
    NonFinite { input: String },
}

const SIGN_RULES: [(&str, &str); 4] = [("--", "+"), ("+-", "-"), ("-+", "-"), ("++", "+")];

/// Strip whitespace, map typeset `≤`/`≥` to ASCII and collapse sign runs.
pub fn normalize(text: &str) -> String {
    let mut s: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    s = s.replace('≤', "<=").replace('≥', ">=");
    loop {
        let before = s.len();
        for (from, to) in SIGN_RULES {
            s = s.replace(from, to);
        }
        if s.len() == before {
            return s;
        }
    }
}

/// Parse into the canonical numeric form without allocating an id or hue.
pub fn parse_ineq(text: &str) -> Result<Ineq, ParseError> {
    let s = normalize(text);
    let unrecognized = || ParseError::UnrecognizedForm {
        input: text.to_string(),
    };

    let single = regex!(concat!(
        r"^([+-]?(?:\d+\.?\d*|\.\d+)?)([xy])",
        r"([+-](?:\d+\.?\d*|\.\d+))?",
        r"(<=|>=|<|>|=)0$"
    ));
    let double = regex!(concat!(
        r"^([+-]?(?:\d+\.?\d*|\.\d+)?)x",
        r"([+-](?:\d+\.?\d*|\.\d+)?)y",
        r"([+-](?:\d+\.?\d*|\.\d+))?",
        r"(<=|>=|<|>|=)0$"
    ));

    let (a, b, c, op) = if let Some(caps) = single.captures(&s) {
        let coef = coefficient(&caps[1]);
        let c = caps.get(3).map_or(Some(0.0), |m| number(m.as_str()));
        let (a, b) = if &caps[2] == "x" {
            (coef, Some(0.0))
        } else {
            (Some(0.0), coef)
        };
        (a, b, c, Operator::from_symbol(&caps[4]))
    } else if let Some(caps) = double.captures(&s) {
        let c = caps.get(3).map_or(Some(0.0), |m| number(m.as_str()));
        let op = Operator::from_symbol(&caps[4]);
        (coefficient(&caps[1]), coefficient(&caps[2]), c, op)
    } else {
        return Err(unrecognized());
    };

    let (a, b, c, op) = match (a, b, c, op) {
        (Some(a), Some(b), Some(c), Some(op)) => (a, b, c, op),
        _ => return Err(unrecognized()),
    };
    let ineq = Ineq::new(a, b, c, op);
    if !ineq.is_finite() {
        return Err(ParseError::NonFinite {
            input: text.to_string(),
        });
    }
    Ok(ineq)
}

/// Parse and allocate id and hue from the session allocator.
///
/// Nothing is allocated when parsing fails.
pub fn parse(text: &str, alloc: &mut Allocator) -> Result<Constraint, ParseError> {
    let ineq = parse_ineq(text)?;
    Ok(Constraint::new(ineq, alloc))
}

/// Coefficient text: empty or `+` means 1, `-` means -1.
fn coefficient(s: &str) -> Option<f64> {
    match s {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => number(s),
    }
}

#[inline]
fn number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}
