//! Text rendering of expression trees.
//!
//! Produces a compact, query-like rendering for logs and the CLI. The output
//! is for humans; it is not parsed back.
//!
//! # Examples
//!
//! ```
//! use querytree::ast::{BinOp, Expr};
//! use querytree::output::to_text;
//!
//! let expr = Expr::binary(
//!     BinOp::GreaterThan,
//!     Expr::member(Expr::source("c"), "Age"),
//!     Expr::constant(18),
//! );
//! assert_eq!(to_text(&expr), "(c.Age > 18)");
//! ```

use crate::ast::{BodyClause, Expr, ExtensionExpr, NullConditionalExpr, QueryModel, ResultOperator};
use crate::value::Value;

pub struct ExpressionPrinter {
    pretty: bool,
}

impl ExpressionPrinter {
    pub fn new(pretty: bool) -> Self {
        ExpressionPrinter { pretty }
    }

    pub fn print(&self, expr: &Expr) -> String {
        self.print_expr(expr, 0)
    }

    fn print_expr(&self, expr: &Expr, indent: usize) -> String {
        match expr {
            Expr::Constant(value) => self.print_value(value),
            Expr::Parameter(name) => format!("@{}", name),
            Expr::QuerySourceRef(name) => name.clone(),
            Expr::Member { object, member } => {
                format!("{}.{}", self.print_expr(object, indent), member)
            }
            Expr::Unary { op, operand } => {
                format!("{}{}", op.symbol(), self.print_expr(operand, indent))
            }
            Expr::Binary { op, left, right } => format!(
                "({} {} {})",
                self.print_expr(left, indent),
                op.symbol(),
                self.print_expr(right, indent)
            ),
            Expr::Conditional {
                test,
                if_true,
                if_false,
            } => format!(
                "({} ? {} : {})",
                self.print_expr(test, indent),
                self.print_expr(if_true, indent),
                self.print_expr(if_false, indent)
            ),
            Expr::MethodCall {
                object,
                method,
                args,
            } => {
                let args = self.print_list(args, indent);
                match object {
                    Some(object) => {
                        format!("{}.{}({})", self.print_expr(object, indent), method, args)
                    }
                    None => format!("{}({})", method, args),
                }
            }
            Expr::Lambda { params, body } => {
                let params = if params.len() == 1 {
                    params[0].clone()
                } else {
                    format!("({})", params.join(", "))
                };
                format!("{} => {}", params, self.print_expr(body, indent))
            }
            Expr::New(members) => {
                let members: Vec<String> = members
                    .iter()
                    .map(|(name, value)| format!("{} = {}", name, self.print_expr(value, indent)))
                    .collect();
                format!("new {{ {} }}", members.join(", "))
            }
            Expr::SubQuery(node) => self.print_query(&node.query_model, indent),
            Expr::Extension(ExtensionExpr::NullConditional(node)) => {
                self.print_null_conditional(node, indent)
            }
            Expr::Extension(ExtensionExpr::Property { source, name }) => {
                format!("Property({}, \"{}\")", self.print_expr(source, indent), self.escape_string(name))
            }
        }
    }

    fn print_null_conditional(&self, node: &NullConditionalExpr, indent: usize) -> String {
        let caller = self.print_expr(&node.caller, indent);
        match node.access.as_ref() {
            Expr::Member { object, member } if object == &node.caller => {
                format!("{}?.{}", caller, member)
            }
            access => format!("{}?.[{}]", caller, self.print_expr(access, indent)),
        }
    }

    fn print_query(&self, model: &QueryModel, indent: usize) -> String {
        let inner = indent + 1;
        let mut clauses = vec![format!(
            "from {} in {}",
            model.main_from.item_name,
            self.print_expr(&model.main_from.source, inner)
        )];

        for clause in &model.body_clauses {
            clauses.push(match clause {
                BodyClause::Where(predicate) => {
                    format!("where {}", self.print_expr(predicate, inner))
                }
                BodyClause::OrderBy(orderings) => {
                    let items: Vec<String> = orderings
                        .iter()
                        .map(|o| {
                            let expr = self.print_expr(&o.expr, inner);
                            if o.descending {
                                format!("{} descending", expr)
                            } else {
                                expr
                            }
                        })
                        .collect();
                    format!("orderby {}", items.join(", "))
                }
                BodyClause::AdditionalFrom(from) => format!(
                    "from {} in {}",
                    from.item_name,
                    self.print_expr(&from.source, inner)
                ),
                BodyClause::Join {
                    item_name,
                    inner: sequence,
                    outer_key,
                    inner_key,
                } => format!(
                    "join {} in {} on {} equals {}",
                    item_name,
                    self.print_expr(sequence, inner),
                    self.print_expr(outer_key, inner),
                    self.print_expr(inner_key, inner)
                ),
            });
        }

        clauses.push(format!("select {}", self.print_expr(&model.select, inner)));

        let body = if self.pretty {
            let separator = format!("\n{}", self.indent(inner));
            format!(
                "(\n{}{}\n{})",
                self.indent(inner),
                clauses.join(separator.as_str()),
                self.indent(indent)
            )
        } else {
            format!("({})", clauses.join(" "))
        };

        let operators: String = model
            .result_operators
            .iter()
            .map(|op| match op {
                ResultOperator::Take(e) | ResultOperator::Skip(e) | ResultOperator::Contains(e) => {
                    format!(".{}({})", op.name(), self.print_expr(e, indent))
                }
                _ => format!(".{}()", op.name()),
            })
            .collect();

        format!("{}{}", body, operators)
    }

    fn print_list(&self, exprs: &[Expr], indent: usize) -> String {
        exprs
            .iter()
            .map(|e| self.print_expr(e, indent))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn print_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => format!("\"{}\"", self.escape_string(s)),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|v| self.print_value(v)).collect();
                format!("[{}]", items.join(", "))
            }
            other => other.to_string(),
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
                c => vec![c],
            })
            .collect()
    }
}

/// Renders an expression on a single line.
pub fn to_text(expr: &Expr) -> String {
    ExpressionPrinter::new(false).print(expr)
}

/// Renders an expression with one query clause per line.
pub fn to_text_pretty(expr: &Expr) -> String {
    ExpressionPrinter::new(true).print(expr)
}
