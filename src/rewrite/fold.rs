//! Constant folding.
//!
//! Evaluates operators and method calls whose operands are all constants at
//! translation time, so the translated query carries `30` instead of
//! `10 + 20`.
//!
//! # Rules
//!
//! - **Arithmetic**: integer operations stay integer (checked, overflow is
//!   left unfolded); mixed integer/float operations go through
//!   [`Decimal`] and produce an integer when the result is whole
//! - **Strings**: `"a" + "b"` → `"ab"`
//! - **Comparison**: numbers compare numerically across integer/float
//! - **Boolean simplification**: `true && x` → `x`, `false || x` → `x`,
//!   `false && x` → `false`, `true || x` → `true`
//! - **Coalesce**: `null ?? x` → `x`, `c ?? x` → `c` for non-null `c`
//! - **Conditionals** with a constant test collapse to one branch
//! - **Methods** on constant receivers: `upper`, `lower`, `trim`, `length`,
//!   `starts_with`, `ends_with`, `contains`, `matches`
//!
//! Division and modulo by zero are never folded; the database decides what
//! they mean.

use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};

use std::cmp::Ordering;

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::output::to_text;
use crate::value::Value;
use crate::visitor::ExpressionVisitor;

/// Folds constant sub-expressions bottom-up.
#[derive(Debug, Default)]
pub struct ConstantFolder {
    folded: usize,
}

impl ConstantFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes replaced so far
    pub fn folded(&self) -> usize {
        self.folded
    }

    fn replaced(&mut self, value: Value) -> Expr {
        self.folded += 1;
        tracing::trace!(value = %value, "folded constant");
        Expr::Constant(value)
    }

    fn simplified(&mut self, expr: Expr) -> Expr {
        self.folded += 1;
        tracing::trace!(expr = %to_text(&expr), "simplified expression");
        expr
    }
}

impl ExpressionVisitor for ConstantFolder {
    fn visit_unary(&mut self, op: UnaryOp, operand: Box<Expr>) -> Expr {
        let operand = self.visit(*operand);
        if let Expr::Constant(value) = &operand
            && let Some(result) = fold_unary(op, value)
        {
            return self.replaced(result);
        }
        Expr::unary(op, operand)
    }

    fn visit_binary(&mut self, op: BinOp, left: Box<Expr>, right: Box<Expr>) -> Expr {
        let left = self.visit(*left);
        let right = self.visit(*right);

        if let (Expr::Constant(a), Expr::Constant(b)) = (&left, &right)
            && let Some(result) = fold_binary(op, a, b)
        {
            return self.replaced(result);
        }

        let from_left = match &left {
            Expr::Constant(a) => simplify_with_constant_left(op, a),
            _ => None,
        };
        if let Some(simplified) = from_left {
            return match simplified {
                Simplified::Constant(value) => self.replaced(value),
                Simplified::Other => self.simplified(right),
            };
        }

        let from_right = match &right {
            Expr::Constant(b) => simplify_with_constant_right(op, b),
            _ => None,
        };
        if let Some(simplified) = from_right {
            return match simplified {
                Simplified::Constant(value) => self.replaced(value),
                Simplified::Other => self.simplified(left),
            };
        }

        Expr::binary(op, left, right)
    }

    fn visit_conditional(
        &mut self,
        test: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
    ) -> Expr {
        let test = self.visit(*test);
        match test {
            Expr::Constant(Value::Boolean(true)) => {
                let branch = self.visit(*if_true);
                self.simplified(branch)
            }
            Expr::Constant(Value::Boolean(false)) => {
                let branch = self.visit(*if_false);
                self.simplified(branch)
            }
            test => Expr::Conditional {
                test: Box::new(test),
                if_true: Box::new(self.visit(*if_true)),
                if_false: Box::new(self.visit(*if_false)),
            },
        }
    }

    fn visit_method_call(
        &mut self,
        object: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    ) -> Expr {
        let object = object.map(|o| Box::new(self.visit(*o)));
        let args: Vec<Expr> = args.into_iter().map(|arg| self.visit(arg)).collect();

        if let Some(Expr::Constant(receiver)) = object.as_deref() {
            let constant_args: Option<Vec<&Value>> = args
                .iter()
                .map(|arg| match arg {
                    Expr::Constant(v) => Some(v),
                    _ => None,
                })
                .collect();
            if let Some(constant_args) = constant_args
                && let Some(result) = fold_method(receiver, &method, &constant_args)
            {
                return self.replaced(result);
            }
        }

        Expr::MethodCall {
            object,
            method,
            args,
        }
    }
}

enum Simplified {
    Constant(Value),
    /// The non-constant operand
    Other,
}

fn simplify_with_constant_left(op: BinOp, a: &Value) -> Option<Simplified> {
    match (op, a) {
        (BinOp::And, Value::Boolean(true)) | (BinOp::Or, Value::Boolean(false)) => {
            Some(Simplified::Other)
        }
        (BinOp::And, Value::Boolean(false)) | (BinOp::Or, Value::Boolean(true)) => {
            Some(Simplified::Constant(a.clone()))
        }
        (BinOp::Coalesce, Value::Null) => Some(Simplified::Other),
        (BinOp::Coalesce, _) => Some(Simplified::Constant(a.clone())),
        _ => None,
    }
}

fn simplify_with_constant_right(op: BinOp, b: &Value) -> Option<Simplified> {
    match (op, b) {
        (BinOp::And, Value::Boolean(true)) | (BinOp::Or, Value::Boolean(false)) => {
            Some(Simplified::Other)
        }
        (BinOp::Coalesce, Value::Null) => Some(Simplified::Other),
        // `x && false` cannot drop `x` without changing null semantics
        _ => None,
    }
}

fn fold_unary(op: UnaryOp, value: &Value) -> Option<Value> {
    match (op, value) {
        (UnaryOp::Not, Value::Boolean(b)) => Some(Value::Boolean(!b)),
        (UnaryOp::Negate, Value::Integer(n)) => n.checked_neg().map(Value::Integer),
        (UnaryOp::Negate, Value::Float(n)) => finite(-n),
        _ => None,
    }
}

/// Folds `a op b` for two constants, or `None` when the operation is not
/// defined at translation time.
pub fn fold_binary(op: BinOp, a: &Value, b: &Value) -> Option<Value> {
    match op {
        BinOp::Add | BinOp::Subtract | BinOp::Multiply | BinOp::Divide | BinOp::Modulo => {
            fold_arithmetic(op, a, b)
        }
        BinOp::Equal => Some(Value::Boolean(values_equal(a, b))),
        BinOp::NotEqual => Some(Value::Boolean(!values_equal(a, b))),
        BinOp::LessThan | BinOp::GreaterThan | BinOp::LessEqual | BinOp::GreaterEqual => {
            let ordering = compare_values(a, b)?;
            let result = match op {
                BinOp::LessThan => ordering.is_lt(),
                BinOp::GreaterThan => ordering.is_gt(),
                BinOp::LessEqual => ordering.is_le(),
                _ => ordering.is_ge(),
            };
            Some(Value::Boolean(result))
        }
        BinOp::And => Some(Value::Boolean(a.as_bool()? && b.as_bool()?)),
        BinOp::Or => Some(Value::Boolean(a.as_bool()? || b.as_bool()?)),
        BinOp::Coalesce => Some(if a.is_null() { b.clone() } else { a.clone() }),
    }
}

fn fold_arithmetic(op: BinOp, a: &Value, b: &Value) -> Option<Value> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => {
            let result = match op {
                BinOp::Add => x.checked_add(*y),
                BinOp::Subtract => x.checked_sub(*y),
                BinOp::Multiply => x.checked_mul(*y),
                BinOp::Divide => x.checked_div(*y),
                BinOp::Modulo => x.checked_rem(*y),
                _ => None,
            };
            result.map(Value::Integer)
        }
        (Value::Float(x), Value::Float(y)) => {
            let result = match op {
                BinOp::Add => x + y,
                BinOp::Subtract => x - y,
                BinOp::Multiply => x * y,
                BinOp::Divide if *y != 0.0 => x / y,
                BinOp::Modulo if *y != 0.0 => x % y,
                _ => return None,
            };
            finite(result)
        }
        (Value::String(x), Value::String(y)) if op == BinOp::Add => {
            Some(Value::String(format!("{}{}", x, y)))
        }
        (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
            let x = to_decimal(a)?;
            let y = to_decimal(b)?;
            let result = match op {
                BinOp::Add => x.checked_add(y),
                BinOp::Subtract => x.checked_sub(y),
                BinOp::Multiply => x.checked_mul(y),
                BinOp::Divide => x.checked_div(y),
                BinOp::Modulo => x.checked_rem(y),
                _ => None,
            }?;
            from_decimal(result)
        }
        _ => None,
    }
}

/// Non-finite results have no JSON form and are left unfolded.
fn finite(n: f64) -> Option<Value> {
    n.is_finite().then_some(Value::Float(n))
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(n) => Decimal::from_i64(*n),
        Value::Float(n) => Decimal::from_f64(*n),
        _ => None,
    }
}

fn from_decimal(d: Decimal) -> Option<Value> {
    if d.is_integer()
        && let Some(n) = d.to_i64()
    {
        return Some(Value::Integer(n));
    }
    d.to_f64().map(Value::Float)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
            compare_numbers(a, b).is_some_and(|ordering| ordering.is_eq())
        }
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => compare_numbers(a, b),
    }
}

/// Integers compare exactly; mixed pairs go through `Decimal` when both fit.
fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
            match (to_decimal(a), to_decimal(b)) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                _ => a.as_float()?.partial_cmp(&b.as_float()?),
            }
        }
        _ => None,
    }
}

fn fold_method(receiver: &Value, method: &str, args: &[&Value]) -> Option<Value> {
    match (method, args) {
        ("upper", []) => Some(Value::String(receiver.as_str()?.to_uppercase())),
        ("lower", []) => Some(Value::String(receiver.as_str()?.to_lowercase())),
        ("trim", []) => Some(Value::String(receiver.as_str()?.trim().to_string())),
        ("length", []) => match receiver {
            Value::String(s) => Some(Value::Integer(s.chars().count() as i64)),
            Value::Array(items) => Some(Value::Integer(items.len() as i64)),
            _ => None,
        },
        ("starts_with", [prefix]) => Some(Value::Boolean(
            receiver.as_str()?.starts_with(prefix.as_str()?),
        )),
        ("ends_with", [suffix]) => Some(Value::Boolean(
            receiver.as_str()?.ends_with(suffix.as_str()?),
        )),
        ("contains", [needle]) => match receiver {
            Value::String(s) => Some(Value::Boolean(s.contains(needle.as_str()?))),
            Value::Array(items) => Some(Value::Boolean(
                items.iter().any(|item| values_equal(item, needle)),
            )),
            _ => None,
        },
        ("matches", [pattern]) => {
            let re = match regex::Regex::new(pattern.as_str()?) {
                Ok(re) => re,
                Err(e) => {
                    tracing::debug!(error = %e, "not folding matches() with invalid pattern");
                    return None;
                }
            };
            Some(Value::Boolean(re.is_match(receiver.as_str()?)))
        }
        _ => None,
    }
}
