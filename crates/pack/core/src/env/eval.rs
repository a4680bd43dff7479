//! Narrow interface to the host's designer expression language.
//!
//! The language itself is external. Components call it through
//! [`Evaluator`] and degrade to their documented fallback on failure via
//! [`evaluate_int_or`] / [`evaluate_bool_or`], which log exactly one error per
//! failed call and never propagate.

use tracing::error;

use crate::error::{ErrorSeverity, PackError};
use crate::state::{ItemInstance, Position, UnitState};

use super::Env;

/// Values an expression can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalValue {
    Int(i64),
    Bool(bool),
}

impl EvalValue {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Bool(_) => None,
        }
    }

    /// Truthiness follows the host language: non-zero integers are true.
    pub fn truthy(self) -> bool {
        match self {
            Self::Int(value) => value != 0,
            Self::Bool(value) => value,
        }
    }
}

/// Bindings visible to an expression.
#[derive(Clone, Copy, Debug)]
pub struct EvalContext<'a> {
    pub unit: &'a UnitState,
    pub target: Option<&'a UnitState>,
    pub item: Option<&'a ItemInstance>,
    pub position: Option<Position>,
}

impl<'a> EvalContext<'a> {
    pub fn new(unit: &'a UnitState) -> Self {
        Self {
            unit,
            target: None,
            item: None,
            position: None,
        }
    }

    pub fn with_target(mut self, target: Option<&'a UnitState>) -> Self {
        self.target = target;
        self
    }

    pub fn with_item(mut self, item: Option<&'a ItemInstance>) -> Self {
        self.item = item;
        self
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("syntax error in `{expr}`: {reason}")]
    Syntax { expr: String, reason: String },

    #[error("unknown name `{0}`")]
    UnknownName(String),

    #[error("`{name}` is not bound in this context")]
    Unbound { name: String },

    #[error("expected {expected}, found {found:?}")]
    TypeMismatch {
        expected: &'static str,
        found: EvalValue,
    },
}

impl PackError for EvalError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "EVAL_SYNTAX",
            Self::UnknownName(_) => "EVAL_UNKNOWN_NAME",
            Self::Unbound { .. } => "EVAL_UNBOUND",
            Self::TypeMismatch { .. } => "EVAL_TYPE_MISMATCH",
        }
    }
}

/// External expression evaluator.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expr: &str, ctx: &EvalContext<'_>) -> Result<EvalValue, EvalError>;
}

/// Minimal evaluator for tooling: literals and a few unit attributes.
///
/// Supports `true`, `false`, integers, and `unit.hp`, `unit.max_hp`,
/// `target.hp`, `target.max_hp`, `item.uses`. Anything else is an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteralEvaluator;

impl Evaluator for LiteralEvaluator {
    fn evaluate(&self, expr: &str, ctx: &EvalContext<'_>) -> Result<EvalValue, EvalError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(EvalError::Syntax {
                expr: expr.to_owned(),
                reason: "empty expression".to_owned(),
            });
        }
        match expr {
            "true" | "True" => return Ok(EvalValue::Bool(true)),
            "false" | "False" => return Ok(EvalValue::Bool(false)),
            _ => {}
        }
        if let Ok(value) = expr.parse::<i64>() {
            return Ok(EvalValue::Int(value));
        }

        let target = || {
            ctx.target.ok_or_else(|| EvalError::Unbound {
                name: "target".to_owned(),
            })
        };
        match expr {
            "unit.hp" => Ok(EvalValue::Int(i64::from(ctx.unit.hp))),
            "unit.max_hp" => Ok(EvalValue::Int(i64::from(ctx.unit.max_hp))),
            "target.hp" => Ok(EvalValue::Int(i64::from(target()?.hp))),
            "target.max_hp" => Ok(EvalValue::Int(i64::from(target()?.max_hp))),
            "item.uses" => {
                let item = ctx.item.ok_or_else(|| EvalError::Unbound {
                    name: "item".to_owned(),
                })?;
                item.data
                    .int("uses")
                    .map(EvalValue::Int)
                    .ok_or_else(|| EvalError::UnknownName("item.uses".to_owned()))
            }
            _ if expr.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') => {
                Err(EvalError::UnknownName(expr.to_owned()))
            }
            _ => Err(EvalError::Syntax {
                expr: expr.to_owned(),
                reason: "unsupported expression".to_owned(),
            }),
        }
    }
}

/// Evaluates a numeric expression, logging and returning `fallback` on failure.
pub fn evaluate_int_or(
    env: &Env<'_>,
    component: &'static str,
    expr: &str,
    ctx: &EvalContext<'_>,
    fallback: i64,
) -> i64 {
    let result = env
        .evaluator()
        .map_err(|e| e.to_string())
        .and_then(|evaluator| evaluator.evaluate(expr, ctx).map_err(|e| e.to_string()))
        .and_then(|value| {
            value.as_int().ok_or_else(|| {
                EvalError::TypeMismatch {
                    expected: "integer",
                    found: value,
                }
                .to_string()
            })
        });

    match result {
        Ok(value) => value,
        Err(err) => {
            error!(
                target: "pack::eval",
                component,
                expr,
                error = %err,
                fallback,
                "expression evaluation failed, using fallback"
            );
            fallback
        }
    }
}

/// Evaluates a boolean expression, logging and returning `fallback` on failure.
pub fn evaluate_bool_or(
    env: &Env<'_>,
    component: &'static str,
    expr: &str,
    ctx: &EvalContext<'_>,
    fallback: bool,
) -> bool {
    let result = env
        .evaluator()
        .map_err(|e| e.to_string())
        .and_then(|evaluator| evaluator.evaluate(expr, ctx).map_err(|e| e.to_string()));

    match result {
        Ok(value) => value.truthy(),
        Err(err) => {
            error!(
                target: "pack::eval",
                component,
                expr,
                error = %err,
                fallback,
                "expression evaluation failed, using fallback"
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Team, UnitId};

    fn unit() -> UnitState {
        UnitState::new(UnitId(1), "eirika", Team::Player, Position::ORIGIN, 18)
    }

    #[test]
    fn literals_and_attributes() {
        let unit = unit();
        let ctx = EvalContext::new(&unit);
        let eval = LiteralEvaluator;
        assert_eq!(eval.evaluate(" 12 ", &ctx), Ok(EvalValue::Int(12)));
        assert_eq!(eval.evaluate("True", &ctx), Ok(EvalValue::Bool(true)));
        assert_eq!(eval.evaluate("unit.max_hp", &ctx), Ok(EvalValue::Int(18)));
    }

    #[test]
    fn unbound_target_is_an_error() {
        let unit = unit();
        let ctx = EvalContext::new(&unit);
        assert_eq!(
            LiteralEvaluator.evaluate("target.hp", &ctx),
            Err(EvalError::Unbound {
                name: "target".to_owned()
            })
        );
    }

    #[test]
    fn malformed_expression_is_a_syntax_error() {
        let unit = unit();
        let ctx = EvalContext::new(&unit);
        let err = LiteralEvaluator.evaluate("unit.hp +* 2", &ctx).unwrap_err();
        assert_eq!(err.error_code(), "EVAL_SYNTAX");
    }
}
