use std::collections::HashMap;

use pretty_assertions::assert_eq;
use querytree::ast::{BinOp, Expr, NullConditionalExpr};
use querytree::cli::{
    CliError, VisitOptions, WarningsOptions, execute_visit, execute_warnings, list_events,
    parse_param,
};
use querytree::{Value, WarningBehavior};

const TREE: &str = r#"{
    "binary": {
        "op": "greater_than",
        "left": { "member": { "object": { "query_source_ref": "c" }, "member": "Age" } },
        "right": {
            "binary": {
                "op": "add",
                "left": { "parameter": "base" },
                "right": { "constant": 3 }
            }
        }
    }
}"#;

#[test]
fn test_parse_param_values() {
    assert_eq!(parse_param("n=3").unwrap(), ("n".to_string(), Value::Integer(3)));
    assert_eq!(parse_param("f=2.5").unwrap(), ("f".to_string(), Value::Float(2.5)));
    assert_eq!(
        parse_param("s=abc").unwrap(),
        ("s".to_string(), Value::String("abc".to_string()))
    );
    assert!(matches!(parse_param("novalue"), Err(CliError::InvalidParam(_))));
    assert!(matches!(parse_param("=1"), Err(CliError::InvalidParam(_))));
}

#[test]
fn test_visit_inlines_and_folds() {
    let mut params = HashMap::new();
    params.insert("base".to_string(), Value::Integer(15));

    let result = execute_visit(&VisitOptions {
        input: Some(TREE.to_string()),
        params,
        no_fold: false,
    })
    .unwrap();

    assert_eq!(
        result.expr,
        Expr::binary(
            BinOp::GreaterThan,
            Expr::member(Expr::source("c"), "Age"),
            Expr::constant(18)
        )
    );
    assert!(result.unresolved.is_empty());
}

#[test]
fn test_visit_reports_unresolved_parameters() {
    let result = execute_visit(&VisitOptions {
        input: Some(TREE.to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(result.unresolved, vec!["base".to_string()]);
    assert_eq!(result.summary.inlined, 0);
}

#[test]
fn test_visit_reports_parameters_under_null_conditional() {
    let tree: Expr = NullConditionalExpr::member(Expr::parameter("p"), "Length").into();

    let result = execute_visit(&VisitOptions {
        input: Some(serde_json::to_string(&tree).unwrap()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(result.expr, tree);
    assert_eq!(result.unresolved, vec!["p".to_string()]);
}

#[test]
fn test_visit_without_input() {
    assert!(matches!(
        execute_visit(&VisitOptions::default()),
        Err(CliError::NoInput)
    ));
}

#[test]
fn test_visit_invalid_json() {
    let result = execute_visit(&VisitOptions {
        input: Some("{ not json".to_string()),
        ..Default::default()
    });
    assert!(matches!(result, Err(CliError::Json(_))));
}

#[test]
fn test_warnings_flags_override_settings() {
    let behaviors = execute_warnings(&WarningsOptions {
        settings: Some(r#"{ "ignore": ["ChangesSaved"] }"#.to_string()),
        throw_on: vec!["30001".to_string()],
        in_memory: Some("orders".to_string()),
        ..Default::default()
    })
    .unwrap();

    let by_name: HashMap<&str, (WarningBehavior, bool)> = behaviors
        .iter()
        .map(|b| (b.name, (b.behavior, b.explicit)))
        .collect();

    assert_eq!(by_name["ChangesSaved"], (WarningBehavior::Throw, true));
    assert_eq!(by_name["TransactionIgnoredWarning"], (WarningBehavior::Throw, true));
    assert_eq!(by_name["QueryExecutionPlanned"], (WarningBehavior::Log, false));
    assert_eq!(behaviors.len(), list_events().len());
}

#[test]
fn test_warnings_unknown_event() {
    let result = execute_warnings(&WarningsOptions {
        log_on: vec!["Bogus".to_string()],
        ..Default::default()
    });
    assert!(matches!(result, Err(CliError::Config(_))));
}
