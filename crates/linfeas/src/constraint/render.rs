use super::types::Ineq;

/// Canonical display: `2x + 3y - 6 < 0`, `-x ≥ 0`, `y + 4 = 0`.
pub(super) fn display(ineq: &Ineq) -> String {
    let mut out = linear_part(ineq.a, ineq.b);
    if ineq.c != 0.0 {
        let sign = if ineq.c < 0.0 { '-' } else { '+' };
        out.push_str(&format!(" {sign} {}", ineq.c.abs()));
    }
    out.push(' ');
    out.push_str(ineq.op.glyph());
    out.push_str(" 0");
    out
}

/// Linear terms only. Zero terms are dropped; when both are zero the result is
/// `0x` so the display still parses.
pub(super) fn linear_part(a: f64, b: f64) -> String {
    let mut out = String::new();
    for (coef, var) in [(a, 'x'), (b, 'y')] {
        if coef == 0.0 {
            continue;
        }
        let negative = coef < 0.0;
        if out.is_empty() {
            if negative {
                out.push('-');
            }
        } else {
            out.push_str(if negative { " - " } else { " + " });
        }
        let mag = coef.abs();
        if mag != 1.0 {
            out.push_str(&mag.to_string());
        }
        out.push(var);
    }
    if out.is_empty() {
        out.push_str("0x");
    }
    out
}
