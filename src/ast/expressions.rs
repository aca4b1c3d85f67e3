use serde::{Deserialize, Serialize};

use crate::ast::{BinOp, ExtensionExpr, SubQueryExpr, UnaryOp};
use crate::value::Value;

/// One node of a query expression tree.
///
/// Trees are immutable values: a visitor that rewrites a tree builds new
/// nodes and leaves the input untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Constant value
    ///
    /// # Example
    /// ```text
    /// 42
    /// "hello"
    /// ```
    Constant(Value),

    /// Named parameter, either a captured query parameter or a lambda
    /// parameter bound by an enclosing [`Expr::Lambda`].
    Parameter(String),

    /// Reference to the item introduced by a from clause or join
    ///
    /// # Example
    /// ```text
    /// from c in Customers    // `c` is QuerySourceRef("c")
    /// ```
    QuerySourceRef(String),

    /// Member access
    ///
    /// # Example
    /// ```text
    /// c.Name
    /// ```
    Member { object: Box<Expr>, member: String },

    /// Unary operation
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation (arithmetic, comparison, logical, coalesce)
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Ternary conditional
    ///
    /// # Example
    /// ```text
    /// c.Age > 18 ? "adult" : "minor"
    /// ```
    Conditional {
        test: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
    },

    /// Method call; `object` is absent for static calls
    ///
    /// # Examples
    /// ```text
    /// c.Name.upper()
    /// concat(a, b)
    /// ```
    MethodCall {
        object: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },

    /// Lambda with named parameters
    ///
    /// # Example
    /// ```text
    /// o => o.Total
    /// ```
    Lambda { params: Vec<String>, body: Box<Expr> },

    /// Anonymous projection
    ///
    /// # Example
    /// ```text
    /// new { Name = c.Name, Total = c.Total }
    /// ```
    New(Vec<(String, Expr)>),

    /// Nested query wrapped as a single node
    SubQuery(SubQueryExpr),

    /// Framework-defined node kinds needing custom handling
    Extension(ExtensionExpr),
}

/// A null constant; used as the placeholder when an expression is moved
/// out of a clause during in-place transformation.
impl Default for Expr {
    fn default() -> Self {
        Expr::Constant(Value::Null)
    }
}

impl Expr {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Expr::Parameter(name.into())
    }

    pub fn source(name: impl Into<String>) -> Self {
        Expr::QuerySourceRef(name.into())
    }

    pub fn member(object: Expr, member: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            member: member.into(),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(object: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            object: Some(Box::new(object)),
            method: method.into(),
            args,
        }
    }

    pub fn lambda(params: &[&str], body: Expr) -> Self {
        Expr::Lambda {
            params: params.iter().map(|p| p.to_string()).collect(),
            body: Box::new(body),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }
}
