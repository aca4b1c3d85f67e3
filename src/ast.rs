//! # Query Expression Tree
//!
//! This module defines the in-memory tree a query is represented as while it
//! is being translated.
//!
//! ## Architecture Overview
//!
//! - **[expressions]** - The [`Expr`] node enum (constants, parameters,
//!   member access, operators, calls, lambdas, projections)
//! - **[extension]** - Framework-defined node kinds: null-conditional access,
//!   by-name property lookup, and the sub-query node
//! - **[operators]** - Unary and binary operators
//! - **[query]** - The [`QueryModel`] owned by a sub-query node
//!
//! ## Example
//!
//! ```text
//! (from o in c.Orders where o.Total > 100 select o).Count()
//! ```
//!
//! is a `SubQuery` node whose model has a main from clause over
//! `c.Orders`, one `Where` body clause, a select of `o` and a `Count`
//! result operator.
//!
//! ## Immutability
//!
//! Nodes are plain owned values. Rewriting a tree consumes it and produces a
//! new one; the only in-place mutation is
//! [`QueryModel::transform_expressions`], performed by the sub-query node
//! that owns the model.
pub mod expressions;
pub mod extension;
pub mod operators;
pub mod query;

pub use expressions::Expr;
pub use extension::{ExtensionExpr, NullConditionalExpr, SubQueryExpr};
pub use operators::{BinOp, UnaryOp};
pub use query::{BodyClause, FromClause, Ordering, QueryModel, ResultOperator};
