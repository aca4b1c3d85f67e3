use std::collections::HashMap;

use pretty_assertions::assert_eq;
use querytree::ast::{BinOp, Expr, NullConditionalExpr, QueryModel, ResultOperator, SubQueryExpr, UnaryOp};
use querytree::rewrite::{
    ConstantFolder, ParameterCollector, ParameterInliner, RewriteOptions, RewriteSummary, Rewriter,
};
use querytree::{ExpressionVisitor, Value};

fn int(n: i64) -> Expr {
    Expr::Constant(Value::Integer(n))
}

fn float(n: f64) -> Expr {
    Expr::Constant(Value::Float(n))
}

fn string(s: &str) -> Expr {
    Expr::Constant(Value::String(s.to_string()))
}

fn boolean(b: bool) -> Expr {
    Expr::Constant(Value::Boolean(b))
}

fn fold(expr: Expr) -> Expr {
    ConstantFolder::new().visit(expr)
}

fn age_of(name: &str) -> Expr {
    Expr::member(Expr::source(name), "Age")
}

// ========================================================================
// Constant folding
// ========================================================================

#[test]
fn test_fold_integer_arithmetic() {
    let expr = Expr::binary(BinOp::Add, int(10), Expr::binary(BinOp::Multiply, int(4), int(5)));
    assert_eq!(fold(expr), int(30));
}

#[test]
fn test_fold_mixed_arithmetic_uses_decimal() {
    let expr = Expr::binary(BinOp::Multiply, int(100), float(1.1));
    assert_eq!(fold(expr), int(110));

    let expr = Expr::binary(BinOp::Add, float(0.1), int(1));
    assert_eq!(fold(expr), float(1.1));
}

#[test]
fn test_fold_string_concatenation() {
    let expr = Expr::binary(BinOp::Add, string("foo"), string("bar"));
    assert_eq!(fold(expr), string("foobar"));
}

#[test]
fn test_division_by_zero_left_alone() {
    let expr = Expr::binary(BinOp::Divide, int(1), int(0));
    assert_eq!(fold(expr.clone()), expr);
}

#[test]
fn test_overflow_left_alone() {
    let expr = Expr::binary(BinOp::Add, int(i64::MAX), int(1));
    assert_eq!(fold(expr.clone()), expr);
}

#[test]
fn test_float_overflow_left_alone() {
    let expr = Expr::binary(BinOp::Multiply, float(1e308), float(10.0));
    assert_eq!(fold(expr.clone()), expr);

    let expr = Expr::binary(BinOp::Subtract, float(-1e308), float(1e308));
    assert_eq!(fold(expr.clone()), expr);
}

#[test]
fn test_large_integer_comparisons_are_exact() {
    let big = 9_007_199_254_740_993;
    let below = 9_007_199_254_740_992;

    assert_eq!(fold(Expr::binary(BinOp::Equal, int(big), int(below))), boolean(false));
    assert_eq!(fold(Expr::binary(BinOp::NotEqual, int(big), int(below))), boolean(true));
    assert_eq!(fold(Expr::binary(BinOp::GreaterThan, int(big), int(below))), boolean(true));
    assert_eq!(fold(Expr::binary(BinOp::LessEqual, int(big), int(below))), boolean(false));
}

#[test]
fn test_mixed_comparisons() {
    assert_eq!(fold(Expr::binary(BinOp::LessThan, int(3), float(3.5))), boolean(true));
    assert_eq!(fold(Expr::binary(BinOp::Equal, float(2.0), int(2))), boolean(true));
    assert_eq!(fold(Expr::binary(BinOp::GreaterEqual, float(1.5), int(2))), boolean(false));
}

#[test]
fn test_boolean_simplification() {
    let predicate = Expr::binary(BinOp::GreaterThan, age_of("c"), int(18));

    let and_true = Expr::binary(BinOp::And, boolean(true), predicate.clone());
    assert_eq!(fold(and_true), predicate);

    let or_false = Expr::binary(BinOp::Or, predicate.clone(), boolean(false));
    assert_eq!(fold(or_false), predicate);

    let and_false = Expr::binary(BinOp::And, boolean(false), predicate.clone());
    assert_eq!(fold(and_false), boolean(false));
}

#[test]
fn test_coalesce_with_null_left() {
    let expr = Expr::binary(BinOp::Coalesce, Expr::Constant(Value::Null), age_of("c"));
    assert_eq!(fold(expr), age_of("c"));
}

#[test]
fn test_conditional_with_constant_test() {
    let expr = Expr::Conditional {
        test: Box::new(Expr::binary(BinOp::LessThan, int(1), float(1.5))),
        if_true: Box::new(string("yes")),
        if_false: Box::new(string("no")),
    };
    assert_eq!(fold(expr), string("yes"));
}

#[test]
fn test_unary_folding() {
    assert_eq!(fold(Expr::unary(UnaryOp::Not, boolean(false))), boolean(true));
    assert_eq!(fold(Expr::unary(UnaryOp::Negate, int(7))), int(-7));
}

#[test]
fn test_method_folding() {
    assert_eq!(fold(Expr::call(string("Mixed"), "upper", vec![])), string("MIXED"));
    assert_eq!(fold(Expr::call(string("  x "), "trim", vec![])), string("x"));
    assert_eq!(fold(Expr::call(string("héllo"), "length", vec![])), int(5));
    assert_eq!(
        fold(Expr::call(string("order-42"), "matches", vec![string(r"^order-\d+$")])),
        boolean(true)
    );
    assert_eq!(
        fold(Expr::call(
            Expr::Constant(Value::Array(vec![Value::Integer(1), Value::Integer(2)])),
            "contains",
            vec![float(2.0)]
        )),
        boolean(true)
    );
}

#[test]
fn test_invalid_regex_left_alone() {
    let expr = Expr::call(string("abc"), "matches", vec![string("(")]);
    assert_eq!(fold(expr.clone()), expr);
}

#[test]
fn test_folder_does_not_enter_null_conditional() {
    let opaque: Expr = NullConditionalExpr::new(
        string("abc"),
        Expr::call(string("abc"), "upper", vec![]),
    )
    .into();
    let mut folder = ConstantFolder::new();
    assert_eq!(folder.visit(opaque.clone()), opaque);
    assert_eq!(folder.folded(), 0);
}

// ========================================================================
// Parameter inlining
// ========================================================================

#[test]
fn test_inline_parameters() {
    let mut values = HashMap::new();
    values.insert("minAge".to_string(), Value::Integer(21));

    let expr = Expr::binary(BinOp::GreaterEqual, age_of("c"), Expr::parameter("minAge"));
    let mut inliner = ParameterInliner::new(values);
    let result = inliner.visit(expr);

    assert_eq!(result, Expr::binary(BinOp::GreaterEqual, age_of("c"), int(21)));
    assert_eq!(inliner.inlined(), 1);
}

#[test]
fn test_lambda_parameters_shadow_values() {
    let mut values = HashMap::new();
    values.insert("x".to_string(), Value::Integer(1));

    let lambda = Expr::lambda(&["x"], Expr::member(Expr::parameter("x"), "Total"));
    let expr = Expr::binary(BinOp::Add, Expr::parameter("x"), Expr::call(Expr::source("o"), "sum", vec![lambda.clone()]));

    let result = ParameterInliner::new(values).visit(expr);
    assert_eq!(
        result,
        Expr::binary(BinOp::Add, int(1), Expr::call(Expr::source("o"), "sum", vec![lambda]))
    );
}

#[test]
fn test_inline_reaches_sub_query() {
    let model = QueryModel::from_source("o", Expr::member(Expr::source("c"), "Orders"))
        .with_where(Expr::binary(
            BinOp::GreaterThan,
            Expr::member(Expr::source("o"), "Total"),
            Expr::parameter("threshold"),
        ))
        .with_result_operator(ResultOperator::Take(Expr::parameter("limit")));
    let expr: Expr = SubQueryExpr::new(model).into();

    let mut values = HashMap::new();
    values.insert("threshold".to_string(), Value::Float(99.5));
    values.insert("limit".to_string(), Value::Integer(3));

    let mut inliner = ParameterInliner::new(values);
    let result = inliner.visit(expr);

    assert_eq!(inliner.inlined(), 2);
    assert_eq!(ParameterCollector::collect(&result), Vec::<String>::new());
}

// ========================================================================
// Collector and pipeline
// ========================================================================

#[test]
fn test_collector_skips_bound_parameters() {
    let expr = Expr::binary(
        BinOp::And,
        Expr::parameter("b"),
        Expr::binary(
            BinOp::Or,
            Expr::lambda(&["x"], Expr::parameter("x")),
            Expr::binary(
                BinOp::Equal,
                NullConditionalExpr::member(Expr::parameter("hidden"), "Name").into(),
                Expr::parameter("a"),
            ),
        ),
    );
    assert_eq!(
        ParameterCollector::collect(&expr),
        vec!["a".to_string(), "b".to_string(), "hidden".to_string()]
    );
}

#[test]
fn test_rewriter_inlines_then_folds() {
    let mut parameters = HashMap::new();
    parameters.insert("base".to_string(), Value::Integer(10));

    let expr = Expr::binary(
        BinOp::GreaterThan,
        age_of("c"),
        Expr::binary(BinOp::Add, Expr::parameter("base"), int(8)),
    );

    let rewriter = Rewriter::new(RewriteOptions {
        parameters,
        skip_folding: false,
    });
    let (result, summary) = rewriter.rewrite(expr);

    assert_eq!(result, Expr::binary(BinOp::GreaterThan, age_of("c"), int(18)));
    assert_eq!(summary, RewriteSummary { inlined: 1, folded: 1 });
}
