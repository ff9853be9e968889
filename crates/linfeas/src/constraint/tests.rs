use super::*;
use crate::alloc::Allocator;
use nalgebra::vector;
use proptest::prelude::*;

fn ineq(text: &str) -> Ineq {
    parse_ineq(text).unwrap_or_else(|e| panic!("{text}: {e}"))
}

#[test]
fn two_variable_scenario() {
    let mut alloc = Allocator::with_seed(3);
    let c = parse("2x+3y-6<0", &mut alloc).unwrap();
    assert_eq!((c.a(), c.b(), c.c(), c.op()), (2.0, 3.0, -6.0, Operator::Lt));
    assert_eq!(c.display(), "2x + 3y - 6 < 0");
}

#[test]
fn single_variable_forms() {
    assert_eq!(ineq("x<0"), Ineq::new(1.0, 0.0, 0.0, Operator::Lt));
    assert_eq!(ineq("-y>=0"), Ineq::new(0.0, -1.0, 0.0, Operator::Ge));
    assert_eq!(ineq("x-5>0"), Ineq::new(1.0, 0.0, -5.0, Operator::Gt));
    assert_eq!(ineq("2.5y+.5=0"), Ineq::new(0.0, 2.5, 0.5, Operator::Eq));
    assert_eq!(ineq("+3x<=0"), Ineq::new(3.0, 0.0, 0.0, Operator::Le));
}

#[test]
fn two_variable_implied_coefficients() {
    assert_eq!(ineq("x-y+2>=0"), Ineq::new(1.0, -1.0, 2.0, Operator::Ge));
    assert_eq!(ineq("-x+y<0"), Ineq::new(-1.0, 1.0, 0.0, Operator::Lt));
    assert_eq!(ineq("0x+y<0"), Ineq::new(0.0, 1.0, 0.0, Operator::Lt));
}

#[test]
fn sign_runs_collapse() {
    let expected = Ineq::new(1.0, 0.0, 3.0, Operator::Lt);
    assert_eq!(ineq("x--3<0"), expected);
    assert_eq!(ineq("x+3<0"), expected);
    assert_eq!(ineq("x + 3 < 0"), expected);
    assert_eq!(ineq("  x -+- 3 <0 "), expected);
    assert_eq!(normalize("x+-+-y<0"), "x+y<0");
}

#[test]
fn rejects_unsupported_forms() {
    for text in ["5<0", "", "x<1", "y+x<0", "x*y<0", "x^2<0", "2x+3y", "x<=>0", "z<0"] {
        assert!(
            matches!(parse_ineq(text), Err(ParseError::UnrecognizedForm { .. })),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn overflowing_numeral_is_rejected() {
    let text = format!("{}x<0", "9".repeat(400));
    assert!(matches!(
        parse_ineq(&text),
        Err(ParseError::NonFinite { .. })
    ));
}

#[test]
fn failed_parse_allocates_nothing() {
    let mut alloc = Allocator::with_seed(9);
    assert!(parse("5<0", &mut alloc).is_err());
    assert_eq!(alloc.issued_count(), 0);
}

#[test]
fn display_rules() {
    let cases = [
        ("0x+y<0", "y < 0"),
        ("x+y-10<=0", "x + y - 10 ≤ 0"),
        ("x-y+2>=0", "x - y + 2 ≥ 0"),
        ("-x-2y=0", "-x - 2y = 0"),
        ("1x+1y>0", "x + y > 0"),
        ("0x+0y+5<0", "0x + 5 < 0"),
        ("-0.5y+0.25>0", "-0.5y + 0.25 > 0"),
    ];
    for (text, shown) in cases {
        assert_eq!(ineq(text).to_string(), shown, "{text}");
    }
}

#[test]
fn display_reparses_including_glyphs() {
    for text in ["x+y-10<=0", "x-y+2>=0", "0x+0y+5<0", "0x-3y=0"] {
        let first = ineq(text);
        let again = ineq(&first.to_string());
        assert_eq!(first, again, "{text}");
    }
}

#[test]
fn replaced_keeps_identity_and_rerenders() {
    let mut alloc = Allocator::with_seed(11);
    let c = parse("x<0", &mut alloc).unwrap();
    let d = c.replaced(Ineq::new(2.0, -1.0, 4.0, Operator::Ge));
    assert_eq!(c.id(), d.id());
    assert_eq!(c.color(), d.color());
    assert_eq!(d.display(), "2x - y + 4 ≥ 0");
}

#[test]
fn record_roundtrip_through_json() {
    let mut alloc = Allocator::with_seed(5);
    let c = parse("2x + 3y - 6 < 0", &mut alloc).unwrap();
    let json = serde_json::to_string(&c.to_record()).unwrap();
    assert!(json.contains(r#""operator":"<""#));
    let record: ConstraintRecord = serde_json::from_str(&json).unwrap();
    let back = Constraint::from_record(&record, &mut alloc).unwrap();
    assert_eq!(back.ineq(), c.ineq());
    assert_eq!(back.display(), c.display());
    assert_ne!(back.id(), c.id());
}

#[test]
fn point_evaluation() {
    let c = ineq("x+y-10<=0");
    assert!(c.satisfied_by(vector![4.0, 6.0], 1e-9));
    assert!(!c.satisfied_by(vector![6.0, 6.0], 1e-9));
    let strict = ineq("x+y-10<0");
    assert!(!strict.satisfied_by(vector![4.0, 6.0], 1e-9));
}

fn coef() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(1.0),
        Just(-1.0),
        (-1000i32..1000).prop_map(|k| k as f64 / 8.0),
    ]
}

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Lt),
        Just(Operator::Le),
        Just(Operator::Gt),
        Just(Operator::Ge),
        Just(Operator::Eq),
    ]
}

proptest! {
    #[test]
    fn display_is_a_fixed_point(a in coef(), b in coef(), c in coef(), op in operator()) {
        let first = Ineq::new(a, b, c, op);
        let again = parse_ineq(&first.to_string()).unwrap();
        prop_assert_eq!(again, first);
    }

    #[test]
    fn whitespace_and_doubled_signs_do_not_matter(a in 1i32..50, k in 1i32..50, gap in 0usize..3) {
        let pad = " ".repeat(gap);
        let plain = format!("{a}x+{k}<0");
        let noisy = format!("{pad}{a}{pad}x{pad}--{pad}{k}{pad}<{pad}0{pad}");
        prop_assert_eq!(parse_ineq(&plain).unwrap(), parse_ineq(&noisy).unwrap());
    }
}
