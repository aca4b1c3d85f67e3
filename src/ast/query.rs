use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// Structured form of one query: where rows come from, how they are
/// filtered and ordered, what is projected and how the result is reduced.
///
/// # Example
/// ```text
/// from c in Customers
/// where c.Age > 18
/// orderby c.Name
/// select c.Name
/// => Take(10)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryModel {
    pub main_from: FromClause,

    /// Body clauses, in source order
    #[serde(default)]
    pub body_clauses: Vec<BodyClause>,

    pub select: Expr,

    /// Result operators, applied in order after projection
    #[serde(default)]
    pub result_operators: Vec<ResultOperator>,
}

/// `from <item_name> in <source>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromClause {
    pub item_name: String,
    pub source: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyClause {
    /// `where <predicate>`
    Where(Expr),

    /// `orderby <expr> [descending], ...`
    OrderBy(Vec<Ordering>),

    /// A second `from` clause (cross join / flattening)
    AdditionalFrom(FromClause),

    /// `join <item_name> in <inner> on <outer_key> equals <inner_key>`
    Join {
        item_name: String,
        inner: Expr,
        outer_key: Expr,
        inner_key: Expr,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ordering {
    pub expr: Expr,
    #[serde(default)]
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOperator {
    Count,
    First,
    Single,
    Any,
    Distinct,
    Take(Expr),
    Skip(Expr),
    Contains(Expr),
}

impl ResultOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ResultOperator::Count => "Count",
            ResultOperator::First => "First",
            ResultOperator::Single => "Single",
            ResultOperator::Any => "Any",
            ResultOperator::Distinct => "Distinct",
            ResultOperator::Take(_) => "Take",
            ResultOperator::Skip(_) => "Skip",
            ResultOperator::Contains(_) => "Contains",
        }
    }
}

impl QueryModel {
    /// A model selecting the from-clause item unchanged.
    pub fn from_source(item_name: impl Into<String>, source: Expr) -> Self {
        let item_name = item_name.into();
        QueryModel {
            select: Expr::QuerySourceRef(item_name.clone()),
            main_from: FromClause { item_name, source },
            body_clauses: Vec::new(),
            result_operators: Vec::new(),
        }
    }

    pub fn with_where(mut self, predicate: Expr) -> Self {
        self.body_clauses.push(BodyClause::Where(predicate));
        self
    }

    pub fn with_select(mut self, selector: Expr) -> Self {
        self.select = selector;
        self
    }

    pub fn with_result_operator(mut self, operator: ResultOperator) -> Self {
        self.result_operators.push(operator);
        self
    }

    /// Replaces every expression owned by this model with
    /// `transformation(expr)`, in place.
    ///
    /// Each owned expression is passed exactly once, in clause order: main
    /// from source, body clauses, select, then result operator arguments.
    /// Expressions inside nested sub-queries are not reached directly; the
    /// transformation sees the sub-query node itself.
    pub fn transform_expressions<F>(&mut self, mut transformation: F)
    where
        F: FnMut(Expr) -> Expr,
    {
        replace_with(&mut self.main_from.source, &mut transformation);

        for clause in &mut self.body_clauses {
            match clause {
                BodyClause::Where(predicate) => replace_with(predicate, &mut transformation),
                BodyClause::OrderBy(orderings) => {
                    for ordering in orderings {
                        replace_with(&mut ordering.expr, &mut transformation);
                    }
                }
                BodyClause::AdditionalFrom(from) => {
                    replace_with(&mut from.source, &mut transformation)
                }
                BodyClause::Join {
                    inner,
                    outer_key,
                    inner_key,
                    ..
                } => {
                    replace_with(inner, &mut transformation);
                    replace_with(outer_key, &mut transformation);
                    replace_with(inner_key, &mut transformation);
                }
            }
        }

        replace_with(&mut self.select, &mut transformation);

        for operator in &mut self.result_operators {
            match operator {
                ResultOperator::Take(e) | ResultOperator::Skip(e) | ResultOperator::Contains(e) => {
                    replace_with(e, &mut transformation)
                }
                ResultOperator::Count
                | ResultOperator::First
                | ResultOperator::Single
                | ResultOperator::Any
                | ResultOperator::Distinct => {}
            }
        }
    }

    /// Number of expressions [`transform_expressions`](Self::transform_expressions) visits.
    pub fn expression_count(&self) -> usize {
        let body: usize = self
            .body_clauses
            .iter()
            .map(|clause| match clause {
                BodyClause::Where(_) | BodyClause::AdditionalFrom(_) => 1,
                BodyClause::OrderBy(orderings) => orderings.len(),
                BodyClause::Join { .. } => 3,
            })
            .sum();
        let operators = self
            .result_operators
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    ResultOperator::Take(_) | ResultOperator::Skip(_) | ResultOperator::Contains(_)
                )
            })
            .count();
        2 + body + operators
    }
}

fn replace_with<F>(slot: &mut Expr, transformation: &mut F)
where
    F: FnMut(Expr) -> Expr,
{
    let expr = std::mem::take(slot);
    *slot = transformation(expr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_visits_clauses_in_order() {
        let mut model = QueryModel::from_source("c", Expr::source("Customers"))
            .with_where(Expr::parameter("p0"))
            .with_result_operator(ResultOperator::Take(Expr::parameter("p1")))
            .with_result_operator(ResultOperator::Count);

        let mut seen = Vec::new();
        model.transform_expressions(|e| {
            seen.push(e.clone());
            e
        });

        assert_eq!(
            seen,
            vec![
                Expr::source("Customers"),
                Expr::parameter("p0"),
                Expr::source("c"),
                Expr::parameter("p1"),
            ]
        );
        assert_eq!(model.expression_count(), 4);
    }
}
