pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod in_memory;
pub mod options;
pub mod output;
pub mod rewrite;
pub mod value;
pub mod visitor;

pub use ast::{BinOp, Expr, ExtensionExpr, NullConditionalExpr, QueryModel, SubQueryExpr, UnaryOp};
pub use diagnostics::{DiagnosticsLogger, EventId, WarningBehavior, WarningsConfiguration};
pub use error::{ConfigError, WarningError};
pub use options::{DbContextOptions, DbContextOptionsBuilder, WarningsConfigurationBuilder};
pub use output::{to_text, to_text_pretty};
pub use rewrite::{ConstantFolder, ParameterCollector, ParameterInliner, Rewriter};
pub use value::Value;
pub use visitor::ExpressionVisitor;
