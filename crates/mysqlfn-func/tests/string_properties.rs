//! Property and scenario tests driven through the registry, the way an
//! outer evaluator calls the catalog.

use mysqlfn_error::{ErrorKind, FuncError};
use mysqlfn_func::{FunctionRegistry, TrimDirection};
use mysqlfn_types::{Datum, EvalContext};
use proptest::prelude::*;

fn call(name: &str, args: &[Datum]) -> Result<Datum, FuncError> {
    thread_local! {
        static REGISTRY: FunctionRegistry = FunctionRegistry::with_builtins();
    }
    REGISTRY.with(|r| r.invoke(name, args, &EvalContext::new()))
}

fn text(d: Datum) -> String {
    match d {
        Datum::String(s) => s,
        other => panic!("expected string, got {other:?}"),
    }
}

fn s(v: &str) -> Datum {
    Datum::from(v)
}

fn i(v: i64) -> Datum {
    Datum::Int64(v)
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[test]
fn scenario_substring_index() {
    assert_eq!(
        call("substring_index", &[s("www.mysql.com"), s("."), i(2)]).unwrap(),
        s("www.mysql")
    );
    assert_eq!(
        call("substring_index", &[s("www.mysql.com"), s("."), i(-2)]).unwrap(),
        s("mysql.com")
    );
}

#[test]
fn scenario_locate_from_position() {
    assert_eq!(
        call("locate", &[s("bar"), s("foobarbar"), i(5)]).unwrap(),
        i(7)
    );
}

#[test]
fn scenario_rpad_repeating_pad() {
    assert_eq!(call("rpad", &[s("hi"), i(5), s("ab")]).unwrap(), s("hiaba"));
}

#[test]
fn scenario_hex_negative_float() {
    assert_eq!(
        call("hex", &[Datum::Float64(-12.5)]).unwrap(),
        s("FFFFFFFFFFFFFFF3")
    );
}

#[test]
fn scenario_trim_leading() {
    assert_eq!(
        call(
            "trim",
            &[s("xxxbarxxx"), s("x"), TrimDirection::Leading.into()]
        )
        .unwrap(),
        s("barxxx")
    );
}

#[test]
fn scenario_unknown_function() {
    let err = call("no_such_fn", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
    assert!(!err.is_retryable());
}

/// Non-NULL arguments for every required position of a builtin.
fn required_args(name: &str) -> Vec<Datum> {
    match name {
        "LENGTH" | "CHAR_LENGTH" | "ASCII" | "LOWER" | "UPPER" | "REVERSE" | "TRIM"
        | "LTRIM" | "RTRIM" | "HEX" | "CONCAT" => vec![s(" ab ")],
        "UNHEX" => vec![s("6162")],
        "SPACE" => vec![i(2)],
        "CONCAT_WS" => vec![s(","), s("a")],
        "LEFT" | "RIGHT" | "REPEAT" | "SUBSTRING" => vec![s("abc"), i(2)],
        "STRCMP" | "LOCATE" => vec![s("b"), s("abc")],
        "INSTR" => vec![s("abc"), s("b")],
        "CONVERT" => vec![s("abc"), s("utf8")],
        "REPLACE" | "SUBSTRING_INDEX" => vec![s("a.b"), s("."), s("-")],
        "RPAD" | "LPAD" => vec![s("ab"), i(4), s("x")],
        other => panic!("no sample arguments for {other}"),
    }
}

#[test]
fn scenario_null_in_any_required_argument() {
    let registry = FunctionRegistry::with_builtins();
    let cx = EvalContext::new();
    for name in registry.scalar_names() {
        // SUBSTRING_INDEX rejects NULL input; see below.
        if name == "SUBSTRING_INDEX" {
            continue;
        }
        let f = registry.find_scalar(name).unwrap();
        let args = required_args(name);
        assert_eq!(args.len(), f.arity().min, "{name}");
        assert!(!registry.invoke(name, &args, &cx).unwrap().is_null(), "{name}");
        for pos in 0..f.arity().min {
            // CONCAT_WS skips NULL elements; only its separator propagates.
            if name == "CONCAT_WS" && pos > 0 {
                continue;
            }
            let mut args = args.clone();
            args[pos] = Datum::Null;
            assert_eq!(
                registry.invoke(name, &args, &cx).unwrap(),
                Datum::Null,
                "{name} with NULL argument {}",
                pos + 1
            );
        }
    }
}

#[test]
fn scenario_null_in_optional_argument() {
    let cases: &[(&str, Vec<Datum>)] = &[
        ("substring", vec![s("abc"), i(1), Datum::Null]),
        ("locate", vec![s("a"), s("a"), Datum::Null]),
    ];
    for (name, args) in cases {
        assert_eq!(call(name, args).unwrap(), Datum::Null, "{name}({args:?})");
    }
    // Optional TRIM arguments fall back to their defaults instead.
    assert_eq!(call("trim", &[s(" a "), Datum::Null]).unwrap(), s("a"));
    assert_eq!(
        call("trim", &[s(" a "), Datum::Null, Datum::Null]).unwrap(),
        s("a")
    );
}

#[test]
fn scenario_substring_index_null_is_error() {
    for pos in 0..3 {
        let mut args = vec![s("a.b"), s("."), i(1)];
        args[pos] = Datum::Null;
        let err = call("substring_index", &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);
    }
}

// ── Properties ───────────────────────────────────────────────────────────

fn direction() -> impl Strategy<Value = TrimDirection> {
    prop_oneof![
        Just(TrimDirection::BothDefault),
        Just(TrimDirection::Both),
        Just(TrimDirection::Leading),
        Just(TrimDirection::Trailing),
    ]
}

proptest! {
    #[test]
    fn prop_trim_idempotent(input in "[ \tab]{0,12}", rem in "[ab]{0,2}", dir in direction()) {
        let once = text(call("trim", &[s(&input), s(&rem), dir.into()]).unwrap());
        let twice = text(call("trim", &[s(&once), s(&rem), dir.into()]).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_substring_to_end_matches_open_length(input in "\\PC{0,16}", pos in 1_i64..20) {
        let len = i64::try_from(input.chars().count()).unwrap();
        prop_assume!(pos <= len);
        let open = call("substring", &[s(&input), i(pos)]).unwrap();
        let closed = call("substring", &[s(&input), i(pos), i(len - pos + 1)]).unwrap();
        prop_assert_eq!(open, closed);
    }

    #[test]
    fn prop_repeat_char_length(input in "\\PC{0,6}", n in -5_i64..20) {
        let out = text(call("repeat", &[s(&input), i(n)]).unwrap());
        let expected = usize::try_from(n.max(0)).unwrap() * input.chars().count();
        prop_assert_eq!(out.chars().count(), expected);
        if n <= 0 {
            prop_assert!(out.is_empty());
        }
    }

    #[test]
    fn prop_space_length(n in 0_i64..4096) {
        prop_assert_eq!(
            call("length", &[call("space", &[i(n)]).unwrap()]).unwrap(),
            i(n)
        );
    }

    #[test]
    fn prop_unhex_inverts_hex(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let hex = call("hex", &[Datum::Bytes(bytes.clone())]).unwrap();
        prop_assert_eq!(call("unhex", &[hex]).unwrap(), Datum::Bytes(bytes));
    }

    #[test]
    fn prop_locate_agrees_with_instr(hay in "[ab]{0,10}", needle in "[ab]{0,3}") {
        prop_assert_eq!(
            call("locate", &[s(&needle), s(&hay)]).unwrap(),
            call("instr", &[s(&hay), s(&needle)]).unwrap()
        );
    }

    #[test]
    fn prop_strcmp_antisymmetric(a in "\\PC{0,8}", b in "\\PC{0,8}") {
        let ab = call("strcmp", &[s(&a), s(&b)]).unwrap();
        let ba = call("strcmp", &[s(&b), s(&a)]).unwrap();
        let (Datum::Int64(x), Datum::Int64(y)) = (ab, ba) else {
            return Err(TestCaseError::fail("strcmp must return integers"));
        };
        prop_assert_eq!(x, -y);
    }

    #[test]
    fn prop_rpad_exact_length(input in "[a-z]{0,8}", len in 0_i64..32, pad in "[xy你]{1,3}") {
        let out = text(call("rpad", &[s(&input), i(len), s(&pad)]).unwrap());
        prop_assert_eq!(out.chars().count(), usize::try_from(len).unwrap());
    }
}
