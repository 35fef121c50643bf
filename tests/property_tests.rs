//! Property-based tests for parser guarantees that hold for any input
//!
//! These complement the integration tests by checking determinism, the
//! `--` terminator and the equivalence of the attached and detached forms
//! over generated argument lists.

use argbind::{parse, ArgValue, ConversionType, OptionSpec, ParseOutcome, Specification, ValueSpec};
use proptest::prelude::*;

fn specs() -> Vec<Specification> {
    vec![
        OptionSpec::scalar('s', "str", ConversionType::String).into(),
        OptionSpec::sequence('i', "int-seq", ConversionType::long()).into(),
        OptionSpec::switch('x', "").into(),
        OptionSpec::counter('v', "verbose").into(),
        ValueSpec::sequence(0, ConversionType::String).into(),
    ]
}

fn arg() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "-x", "-v", "-vv", "--str", "-s", "--int-seq", "-i", "--", "-z", "--nope", "--help",
            "--str=", "--=x", "-", "-1",
        ])
        .prop_map(String::from),
        "[a-z0-9]{1,6}",
        any::<i32>().prop_map(|n| n.to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(args in prop::collection::vec(arg(), 0..12)) {
        let first = parse(&args, &specs()).unwrap();
        let second = parse(&args, &specs()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_never_fails_fatally(args in prop::collection::vec(arg(), 0..12)) {
        prop_assert!(parse(&args, &specs()).is_ok());
    }

    #[test]
    fn prop_double_dash_forces_values(tail in prop::collection::vec("\\PC{0,8}", 1..8)) {
        let mut args = vec!["-x".to_string(), "--str".to_string(), "s1".to_string(), "--".to_string()];
        args.extend(tail.iter().cloned());

        let outcome = parse(&args, &specs()).unwrap();
        let values = match &outcome {
            ParseOutcome::Parsed(values) => values,
            ParseOutcome::NotParsed(errors) => return Err(TestCaseError::fail(format!("{:?}", errors))),
        };
        let expected = ArgValue::Sequence(tail.iter().map(|t| ArgValue::from(t.as_str())).collect());
        prop_assert_eq!(values.value(0), Some(&expected));
        prop_assert_eq!(values.option("str"), Some(&ArgValue::from("s1")));
        prop_assert_eq!(values.option("v"), None);
    }

    #[test]
    fn prop_attached_and_detached_forms_agree(
        first in any::<i64>(),
        rest in prop::collection::vec(0i64..1_000_000, 0..6),
    ) {
        let rest: Vec<String> = rest.iter().map(|n| n.to_string()).collect();

        let mut detached = vec!["--int-seq".to_string(), first.to_string()];
        detached.extend(rest.iter().cloned());
        let mut attached = vec![format!("--int-seq={}", first)];
        attached.extend(rest.iter().cloned());
        let mut short = vec![format!("-i{}", first)];
        short.extend(rest.iter().cloned());

        let expected = parse(&detached, &specs()).unwrap();
        prop_assert!(expected.is_parsed());
        prop_assert_eq!(&parse(&attached, &specs()).unwrap(), &expected);
        prop_assert_eq!(&parse(&short, &specs()).unwrap(), &expected);
    }

    #[test]
    fn prop_counter_counts_every_flag(n in 1usize..20) {
        let args = vec![format!("-{}", "v".repeat(n))];
        let outcome = parse(&args, &specs()).unwrap();
        prop_assert_eq!(
            outcome.values().and_then(|v| v.option("verbose")).and_then(|v| v.as_u64()),
            Some(n as u64)
        );
    }
}
