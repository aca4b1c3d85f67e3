use serde::{Deserialize, Serialize};

use crate::ast::{Expr, QueryModel};

/// Framework-defined expression kinds that are not part of the primitive
/// tree vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionExpr {
    /// Access evaluated only when the caller is non-null
    ///
    /// `access` is written in terms of `caller`; the pair must reach the
    /// translator in exactly this shape, so visitors never descend into it.
    ///
    /// # Example
    /// ```text
    /// c.Address?.City
    /// ```
    NullConditional(NullConditionalExpr),

    /// Property lookup by name on an entity-valued expression
    ///
    /// # Example
    /// ```text
    /// Property(c, "ShadowKey")
    /// ```
    Property { source: Box<Expr>, name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullConditionalExpr {
    pub caller: Box<Expr>,
    pub access: Box<Expr>,
}

impl NullConditionalExpr {
    pub fn new(caller: Expr, access: Expr) -> Self {
        NullConditionalExpr {
            caller: Box::new(caller),
            access: Box::new(access),
        }
    }

    /// `caller?.member`, the common case
    pub fn member(caller: Expr, member: &str) -> Self {
        let access = Expr::member(caller.clone(), member);
        NullConditionalExpr::new(caller, access)
    }
}

/// A whole nested query carried as one expression node.
///
/// The node is the sole owner of its query model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQueryExpr {
    pub query_model: Box<QueryModel>,
}

impl SubQueryExpr {
    pub fn new(query_model: QueryModel) -> Self {
        SubQueryExpr {
            query_model: Box::new(query_model),
        }
    }
}

impl From<NullConditionalExpr> for Expr {
    fn from(node: NullConditionalExpr) -> Self {
        Expr::Extension(ExtensionExpr::NullConditional(node))
    }
}

impl From<SubQueryExpr> for Expr {
    fn from(node: SubQueryExpr) -> Self {
        Expr::SubQuery(node)
    }
}
