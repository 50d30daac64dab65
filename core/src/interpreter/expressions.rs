//! Expression evaluation
//!
//! Evaluates `Expression` instructions against the scope's variables.
//! `Assign` is the only expression with a side effect.

use super::errors::EvalError;
use super::types::{BinaryOp, Expr, ScriptScope, UnaryOp, Val};

/// Evaluate an expression, writing assignments into the scope
pub fn eval_expr(expr: &Expr, scope: &mut ScriptScope) -> Result<Val, EvalError> {
    match expr {
        Expr::LitNull => Ok(Val::Null),

        Expr::LitBool { v } => Ok(Val::Bool(*v)),

        Expr::LitNum { v } => Ok(Val::Num(*v)),

        Expr::LitStr { v } => Ok(Val::Str(v.clone())),

        Expr::Ident { name } => scope
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() }),

        Expr::Assign { name, value } => {
            let v = eval_expr(value, scope)?;
            scope.set(name.clone(), v.clone());
            Ok(v)
        }

        Expr::Unary { op, operand } => {
            let v = eval_expr(operand, scope)?;
            match (op, v) {
                (UnaryOp::Not, v) => Ok(Val::Bool(!v.is_truthy())),
                (UnaryOp::Neg, Val::Num(n)) => Ok(Val::Num(-n)),
                (UnaryOp::Neg, v) => Err(EvalError::TypeMismatch {
                    op: "-".to_string(),
                    left: v.type_name(),
                    right: v.type_name(),
                }),
            }
        }

        Expr::Binary { op, left, right } => eval_binary(*op, left, right, scope),
    }
}

fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    scope: &mut ScriptScope,
) -> Result<Val, EvalError> {
    // Logical operators short-circuit
    match op {
        BinaryOp::And => {
            let l = eval_expr(left, scope)?;
            if !l.is_truthy() {
                return Ok(Val::Bool(false));
            }
            return Ok(Val::Bool(eval_expr(right, scope)?.is_truthy()));
        }
        BinaryOp::Or => {
            let l = eval_expr(left, scope)?;
            if l.is_truthy() {
                return Ok(Val::Bool(true));
            }
            return Ok(Val::Bool(eval_expr(right, scope)?.is_truthy()));
        }
        _ => {}
    }

    let l = eval_expr(left, scope)?;
    let r = eval_expr(right, scope)?;

    match (op, &l, &r) {
        (BinaryOp::Eq, _, _) => Ok(Val::Bool(l == r)),
        (BinaryOp::Ne, _, _) => Ok(Val::Bool(l != r)),

        (BinaryOp::Add, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a + b)),
        (BinaryOp::Add, Val::Str(_), _) | (BinaryOp::Add, _, Val::Str(_)) => {
            Ok(Val::Str(format!("{}{}", l, r)))
        }
        (BinaryOp::Sub, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a - b)),
        (BinaryOp::Mul, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a * b)),
        (BinaryOp::Div, Val::Num(_), Val::Num(b)) if *b == 0.0 => Err(EvalError::DivisionByZero),
        (BinaryOp::Div, Val::Num(a), Val::Num(b)) => Ok(Val::Num(a / b)),

        (BinaryOp::Lt, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a < b)),
        (BinaryOp::Le, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a <= b)),
        (BinaryOp::Gt, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a > b)),
        (BinaryOp::Ge, Val::Num(a), Val::Num(b)) => Ok(Val::Bool(a >= b)),
        (BinaryOp::Lt, Val::Str(a), Val::Str(b)) => Ok(Val::Bool(a < b)),
        (BinaryOp::Le, Val::Str(a), Val::Str(b)) => Ok(Val::Bool(a <= b)),
        (BinaryOp::Gt, Val::Str(a), Val::Str(b)) => Ok(Val::Bool(a > b)),
        (BinaryOp::Ge, Val::Str(a), Val::Str(b)) => Ok(Val::Bool(a >= b)),

        _ => Err(EvalError::TypeMismatch {
            op: op.to_string(),
            left: l.type_name(),
            right: r.type_name(),
        }),
    }
}
