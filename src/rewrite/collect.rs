use std::collections::BTreeSet;

use crate::ast::{Expr, ExtensionExpr};
use crate::visitor::{ExpressionVisitor, walk_extension, walk_lambda};

/// Collects the names of free parameters, i.e. parameters not bound by an
/// enclosing lambda. Sub-query models and null-conditional nodes are
/// searched too.
#[derive(Debug, Default)]
pub struct ParameterCollector {
    names: BTreeSet<String>,
    bound: Vec<String>,
}

impl ParameterCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the free parameters of `expr`, sorted by name.
    pub fn collect(expr: &Expr) -> Vec<String> {
        let mut collector = ParameterCollector::new();
        collector.visit(expr.clone());
        collector.names.into_iter().collect()
    }
}

impl ExpressionVisitor for ParameterCollector {
    fn visit_parameter(&mut self, name: String) -> Expr {
        if !self.bound.contains(&name) {
            self.names.insert(name.clone());
        }
        Expr::Parameter(name)
    }

    fn visit_lambda(&mut self, params: Vec<String>, body: Box<Expr>) -> Expr {
        let depth = self.bound.len();
        self.bound.extend(params.iter().cloned());
        let result = walk_lambda(self, params, body);
        self.bound.truncate(depth);
        result
    }

    // Analysis only; the caller keeps the original tree.
    fn visit_extension(&mut self, node: ExtensionExpr) -> Expr {
        walk_extension(self, node)
    }
}
