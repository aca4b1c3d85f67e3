//! Expression tree visitor infrastructure
//!
//! [`ExpressionVisitor`] is the base every rewriting or analysis pass builds
//! on. Each `visit_*` method has a default; override only the ones your pass
//! cares about and call the matching `walk_*` function inside the override
//! to keep the default recursion. Omitting the walk call prunes traversal at
//! that node.
//!
//! Two node kinds get special treatment by default:
//!
//! - **Null-conditional** extension nodes are returned as-is. Their shape is
//!   load-bearing for translation, so nothing below them is visited.
//! - **Sub-query** nodes first run the visitor over every expression of
//!   their owned [`QueryModel`](crate::ast::QueryModel), then finish with
//!   [`walk_sub_query`].
//!
//! ```
//! use querytree::ast::Expr;
//! use querytree::visitor::{ExpressionVisitor, walk_member};
//!
//! /// Renames every `Name` member access to `FullName`.
//! struct Rename;
//!
//! impl ExpressionVisitor for Rename {
//!     fn visit_member(&mut self, object: Box<Expr>, member: String) -> Expr {
//!         let member = if member == "Name" { "FullName".to_string() } else { member };
//!         walk_member(self, object, member)
//!     }
//! }
//!
//! let tree = Expr::member(Expr::source("c"), "Name");
//! assert_eq!(Rename.visit(tree), Expr::member(Expr::source("c"), "FullName"));
//! ```

use crate::ast::{BinOp, Expr, ExtensionExpr, NullConditionalExpr, SubQueryExpr, UnaryOp};
use crate::value::Value;

// ============================================================================
// Visitor Trait
// ============================================================================

/// Owned, rewriting expression visitor. Default implementations rebuild the
/// node from visited children.
pub trait ExpressionVisitor: Sized {
    /// Top-level entry point; dispatches on the node kind.
    fn visit(&mut self, expr: Expr) -> Expr {
        walk_expr(self, expr)
    }

    fn visit_constant(&mut self, value: Value) -> Expr {
        Expr::Constant(value)
    }

    fn visit_parameter(&mut self, name: String) -> Expr {
        Expr::Parameter(name)
    }

    fn visit_query_source_ref(&mut self, name: String) -> Expr {
        Expr::QuerySourceRef(name)
    }

    fn visit_member(&mut self, object: Box<Expr>, member: String) -> Expr {
        walk_member(self, object, member)
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: Box<Expr>) -> Expr {
        walk_unary(self, op, operand)
    }

    fn visit_binary(&mut self, op: BinOp, left: Box<Expr>, right: Box<Expr>) -> Expr {
        walk_binary(self, op, left, right)
    }

    fn visit_conditional(
        &mut self,
        test: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
    ) -> Expr {
        walk_conditional(self, test, if_true, if_false)
    }

    fn visit_method_call(
        &mut self,
        object: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    ) -> Expr {
        walk_method_call(self, object, method, args)
    }

    fn visit_lambda(&mut self, params: Vec<String>, body: Box<Expr>) -> Expr {
        walk_lambda(self, params, body)
    }

    fn visit_new(&mut self, members: Vec<(String, Expr)>) -> Expr {
        walk_new(self, members)
    }

    /// Null-conditional nodes are opaque: returned unchanged, children
    /// untouched. Every other extension gets the generic child traversal.
    fn visit_extension(&mut self, node: ExtensionExpr) -> Expr {
        match node {
            ExtensionExpr::NullConditional(_) => Expr::Extension(node),
            other => walk_extension(self, other),
        }
    }

    /// Runs this visitor over every expression of the owned query model,
    /// then applies the default sub-query traversal.
    ///
    /// The nested model is fully transformed before this call returns.
    fn visit_sub_query(&mut self, mut node: SubQueryExpr) -> Expr {
        node.query_model.transform_expressions(|expr| self.visit(expr));
        walk_sub_query(self, node)
    }
}

// ============================================================================
// Walk Functions
// ============================================================================

pub fn walk_expr<V: ExpressionVisitor>(v: &mut V, expr: Expr) -> Expr {
    match expr {
        Expr::Constant(value) => v.visit_constant(value),
        Expr::Parameter(name) => v.visit_parameter(name),
        Expr::QuerySourceRef(name) => v.visit_query_source_ref(name),
        Expr::Member { object, member } => v.visit_member(object, member),
        Expr::Unary { op, operand } => v.visit_unary(op, operand),
        Expr::Binary { op, left, right } => v.visit_binary(op, left, right),
        Expr::Conditional {
            test,
            if_true,
            if_false,
        } => v.visit_conditional(test, if_true, if_false),
        Expr::MethodCall {
            object,
            method,
            args,
        } => v.visit_method_call(object, method, args),
        Expr::Lambda { params, body } => v.visit_lambda(params, body),
        Expr::New(members) => v.visit_new(members),
        Expr::SubQuery(node) => v.visit_sub_query(node),
        Expr::Extension(node) => v.visit_extension(node),
    }
}

fn visit_boxed<V: ExpressionVisitor>(v: &mut V, expr: Box<Expr>) -> Box<Expr> {
    Box::new(v.visit(*expr))
}

pub fn walk_member<V: ExpressionVisitor>(v: &mut V, object: Box<Expr>, member: String) -> Expr {
    Expr::Member {
        object: visit_boxed(v, object),
        member,
    }
}

pub fn walk_unary<V: ExpressionVisitor>(v: &mut V, op: UnaryOp, operand: Box<Expr>) -> Expr {
    Expr::Unary {
        op,
        operand: visit_boxed(v, operand),
    }
}

pub fn walk_binary<V: ExpressionVisitor>(
    v: &mut V,
    op: BinOp,
    left: Box<Expr>,
    right: Box<Expr>,
) -> Expr {
    let left = visit_boxed(v, left);
    let right = visit_boxed(v, right);
    Expr::Binary { op, left, right }
}

pub fn walk_conditional<V: ExpressionVisitor>(
    v: &mut V,
    test: Box<Expr>,
    if_true: Box<Expr>,
    if_false: Box<Expr>,
) -> Expr {
    let test = visit_boxed(v, test);
    let if_true = visit_boxed(v, if_true);
    let if_false = visit_boxed(v, if_false);
    Expr::Conditional {
        test,
        if_true,
        if_false,
    }
}

pub fn walk_method_call<V: ExpressionVisitor>(
    v: &mut V,
    object: Option<Box<Expr>>,
    method: String,
    args: Vec<Expr>,
) -> Expr {
    let object = object.map(|o| visit_boxed(v, o));
    let args = args.into_iter().map(|arg| v.visit(arg)).collect();
    Expr::MethodCall {
        object,
        method,
        args,
    }
}

pub fn walk_lambda<V: ExpressionVisitor>(v: &mut V, params: Vec<String>, body: Box<Expr>) -> Expr {
    Expr::Lambda {
        params,
        body: visit_boxed(v, body),
    }
}

pub fn walk_new<V: ExpressionVisitor>(v: &mut V, members: Vec<(String, Expr)>) -> Expr {
    Expr::New(
        members
            .into_iter()
            .map(|(name, value)| (name, v.visit(value)))
            .collect(),
    )
}

/// Generic extension traversal: visit every child, rebuild the node.
///
/// This also descends into null-conditional nodes; it is the
/// [`ExpressionVisitor::visit_extension`] default that keeps them opaque.
pub fn walk_extension<V: ExpressionVisitor>(v: &mut V, node: ExtensionExpr) -> Expr {
    let node = match node {
        ExtensionExpr::NullConditional(NullConditionalExpr { caller, access }) => {
            ExtensionExpr::NullConditional(NullConditionalExpr {
                caller: visit_boxed(v, caller),
                access: visit_boxed(v, access),
            })
        }
        ExtensionExpr::Property { source, name } => ExtensionExpr::Property {
            source: visit_boxed(v, source),
            name,
        },
    };
    Expr::Extension(node)
}

/// Default sub-query traversal. The owned model is reached only through
/// [`QueryModel::transform_expressions`](crate::ast::QueryModel::transform_expressions),
/// so this does not descend again.
pub fn walk_sub_query<V: ExpressionVisitor>(_v: &mut V, node: SubQueryExpr) -> Expr {
    Expr::SubQuery(node)
}
