//! Rewriting and analysis passes built on [`ExpressionVisitor`].
//!
//! - [`ParameterInliner`] - substitutes supplied parameter values
//! - [`ConstantFolder`] - evaluates constant sub-expressions
//! - [`ParameterCollector`] - lists free parameters
//!
//! [`Rewriter`] runs the two rewriting passes in order.

mod collect;
mod fold;
mod inline;

pub use collect::ParameterCollector;
pub use fold::{ConstantFolder, fold_binary};
pub use inline::ParameterInliner;

use std::collections::HashMap;

use crate::ast::Expr;
use crate::output::to_text;
use crate::value::Value;
use crate::visitor::ExpressionVisitor;

/// Options for a [`Rewriter`] run
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Parameter values to inline
    pub parameters: HashMap<String, Value>,
    /// Skip constant folding
    pub skip_folding: bool,
}

/// Counts reported by a [`Rewriter`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub inlined: usize,
    pub folded: usize,
}

/// Inline parameters, then fold constants.
#[derive(Debug, Default)]
pub struct Rewriter {
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Rewriter { options }
    }

    pub fn rewrite(&self, expr: Expr) -> (Expr, RewriteSummary) {
        tracing::debug!(input = %to_text(&expr), "rewriting expression");

        let mut inliner = ParameterInliner::new(self.options.parameters.clone());
        let expr = inliner.visit(expr);

        let mut summary = RewriteSummary {
            inlined: inliner.inlined(),
            folded: 0,
        };

        let expr = if self.options.skip_folding {
            expr
        } else {
            let mut folder = ConstantFolder::new();
            let expr = folder.visit(expr);
            summary.folded = folder.folded();
            expr
        };

        tracing::debug!(
            inlined = summary.inlined,
            folded = summary.folded,
            output = %to_text(&expr),
            "rewrite finished"
        );
        (expr, summary)
    }
}
