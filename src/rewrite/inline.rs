use std::collections::HashMap;

use crate::ast::Expr;
use crate::value::Value;
use crate::visitor::{ExpressionVisitor, walk_lambda};

/// Replaces query parameters with constant values.
///
/// Lambda parameters shadow query parameters of the same name, so
/// `x => x.Age` is left alone even when a value for `x` is supplied.
#[derive(Debug, Default)]
pub struct ParameterInliner {
    values: HashMap<String, Value>,
    shadowed: Vec<String>,
    inlined: usize,
}

impl ParameterInliner {
    pub fn new(values: HashMap<String, Value>) -> Self {
        ParameterInliner {
            values,
            ..Default::default()
        }
    }

    /// Number of parameter nodes replaced so far
    pub fn inlined(&self) -> usize {
        self.inlined
    }
}

impl ExpressionVisitor for ParameterInliner {
    fn visit_parameter(&mut self, name: String) -> Expr {
        if self.shadowed.contains(&name) {
            return Expr::Parameter(name);
        }
        match self.values.get(&name) {
            Some(value) => {
                self.inlined += 1;
                tracing::trace!(parameter = %name, value = %value, "inlined parameter");
                Expr::Constant(value.clone())
            }
            None => Expr::Parameter(name),
        }
    }

    fn visit_lambda(&mut self, params: Vec<String>, body: Box<Expr>) -> Expr {
        let depth = self.shadowed.len();
        self.shadowed.extend(params.iter().cloned());
        let result = walk_lambda(self, params, body);
        self.shadowed.truncate(depth);
        result
    }
}
