//! Rewrite an expression tree read as JSON

use std::collections::HashMap;

use super::CliError;
use crate::rewrite::{ParameterCollector, RewriteOptions, RewriteSummary, Rewriter};
use crate::{Expr, Value};

/// Options for the visit command
#[derive(Debug, Clone, Default)]
pub struct VisitOptions {
    /// Expression tree as JSON
    pub input: Option<String>,
    /// Parameter values to inline
    pub params: HashMap<String, Value>,
    /// Skip constant folding
    pub no_fold: bool,
}

/// Result of a visit operation
#[derive(Debug)]
pub struct VisitResult {
    pub expr: Expr,
    pub summary: RewriteSummary,
    /// Parameters still free after inlining
    pub unresolved: Vec<String>,
}

/// Parse a `name=value` argument. The value is read as JSON when possible
/// and as a plain string otherwise, so `n=3` is an integer and `s=abc` a
/// string.
pub fn parse_param(raw: &str) -> Result<(String, Value), CliError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidParam(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidParam(raw.to_string()));
    }
    let value = serde_json::from_str::<Value>(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

/// Execute a visit operation
pub fn execute_visit(options: &VisitOptions) -> Result<VisitResult, CliError> {
    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let expr: Expr = serde_json::from_str(json).map_err(CliError::Json)?;

    let rewriter = Rewriter::new(RewriteOptions {
        parameters: options.params.clone(),
        skip_folding: options.no_fold,
    });
    let (expr, summary) = rewriter.rewrite(expr);
    let unresolved = ParameterCollector::collect(&expr);

    Ok(VisitResult {
        expr,
        summary,
        unresolved,
    })
}
