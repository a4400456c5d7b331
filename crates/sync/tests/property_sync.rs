// Property-based tests for CSV export/import reconciliation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeMap;

use proptest::prelude::*;
use paramsync_engine::{Parameter, ParameterHost, ParameterStore};
use paramsync_sync::{export_csv, import_csv, plan_import};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_unit() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some("".to_string())),
        3 => prop_oneof![Just("mm"), Just("in"), Just("deg"), Just("mm^2")].prop_map(|u| Some(u.to_string())),
    ]
}

fn arb_expression() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[0-9]{1,4}(\.[0-9]{1,2})?( mm)?",
        1 => r"p_[a-z]{1,3} \* [0-9]",
        1 => r"'[a-zA-Z ,]{0,8}'",
    ]
}

/// Comments with commas, quotes and spaces; sometimes empty.
fn arb_comment() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just("".to_string()),
        4 => r#"[a-zA-Z0-9 ,"']{1,20}"#,
    ]
}

/// Parameters with unique names, in arbitrary enumeration order.
fn arb_params() -> impl Strategy<Value = Vec<Parameter>> {
    prop::collection::btree_map(
        r"p_[a-z]{1,6}",
        (arb_unit(), arb_expression(), arb_comment()),
        0..12,
    )
    .prop_map(|m: BTreeMap<String, (Option<String>, String, String)>| {
        m.into_iter()
            .map(|(name, (unit, expression, comment))| Parameter { name, unit, expression, comment })
            .collect()
    })
}

fn normalized(params: &[Parameter]) -> Vec<(String, String, String, String)> {
    let mut out: Vec<_> = params
        .iter()
        .map(|p| {
            let comment = if p.comment.is_empty() { " ".to_string() } else { p.comment.clone() };
            (p.name.clone(), p.unit().unwrap_or("").to_string(), p.expression.clone(), comment)
        })
        .collect();
    out.sort();
    out
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn round_trip_into_empty(params in arb_params()) {
        let text = export_csv(&params).unwrap();
        let mut empty = ParameterStore::new();
        let summary = import_csv(&mut empty, &text).unwrap();

        prop_assert_eq!(summary.created, params.len());
        prop_assert_eq!(normalized(&empty.enumerate_parameters()), normalized(&params));
    }

    #[test]
    fn reimport_produces_only_updates(params in arb_params()) {
        let text = export_csv(&params).unwrap();
        let plan = plan_import(&params, &text).unwrap();

        prop_assert_eq!(plan.creates().count(), 0);
        prop_assert_eq!(plan.updates().count(), params.len());
        for (m, p) in plan.mutations.iter().zip(&params) {
            prop_assert_eq!(m.name(), p.name.as_str());
            // Only an empty comment (rewritten to " ") makes an update non-trivial
            prop_assert_eq!(m.is_noop(), !p.comment.is_empty());
        }
    }

    #[test]
    fn blank_lines_do_not_matter(params in arb_params(), gaps in prop::collection::vec(0usize..3, 12)) {
        let text = export_csv(&params).unwrap();
        let mut spaced = String::new();
        for (i, line) in text.lines().enumerate() {
            spaced.push_str(&"\n".repeat(gaps[i % gaps.len()]));
            spaced.push_str(line);
            spaced.push('\n');
        }

        prop_assert_eq!(plan_import(&[], &text).unwrap(), plan_import(&[], &spaced).unwrap());
    }
}
