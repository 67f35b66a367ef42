//! Number prototype words
//!
//! Arithmetic is integer-preserving: when both operands are integers the
//! result is an integer (with wrapping semantics on overflow, matching
//! Forth-family runtimes); any real operand widens the whole operation to
//! reals. Division by a numerically zero divisor stores a range error on
//! either path.

use crate::context::Context;
use crate::error::ErrorCode;
use crate::runtime::PrototypeDefinition;
use crate::value::Number;

/// Words installed on the number prototype.
pub fn definition() -> PrototypeDefinition {
    &[
        ("+", add),
        ("-", subtract),
        ("*", multiply),
        ("/", divide),
        ("<", less_than),
        (">", greater_than),
        ("<=", less_than_or_equal),
        (">=", greater_than_or_equal),
    ]
}

fn pop_operands(ctx: &mut Context) -> Option<(Number, Number)> {
    let rhs = ctx.pop_number()?;
    let lhs = ctx.pop_number()?;
    Some((lhs, rhs))
}

/// Adds two numbers.
///
/// Stack effect: ( number number -- number )
fn add(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => ctx.push_int(a.wrapping_add(b)),
            _ => ctx.push_real(lhs.as_real() + rhs.as_real()),
        }
    }
}

/// Subtracts the top number from the one below it.
///
/// Stack effect: ( number number -- number )
fn subtract(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => ctx.push_int(a.wrapping_sub(b)),
            _ => ctx.push_real(lhs.as_real() - rhs.as_real()),
        }
    }
}

/// Multiplies two numbers.
///
/// Stack effect: ( number number -- number )
fn multiply(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => ctx.push_int(a.wrapping_mul(b)),
            _ => ctx.push_real(lhs.as_real() * rhs.as_real()),
        }
    }
}

/// Divides the number below the top by the top. Division by zero stores a
/// range error.
///
/// Stack effect: ( number number -- number )
fn divide(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        match (lhs, rhs) {
            (_, Number::Int(0)) => {
                ctx.set_error(ErrorCode::Range, "Division by zero.");
            }
            (Number::Int(a), Number::Int(b)) => {
                // wrapping_div covers the i64::MIN / -1 edge.
                ctx.push_int(a.wrapping_div(b));
            }
            _ => {
                let divisor = rhs.as_real();

                if divisor == 0.0 {
                    ctx.set_error(ErrorCode::Range, "Division by zero.");
                } else {
                    ctx.push_real(lhs.as_real() / divisor);
                }
            }
        }
    }
}

/// Stack effect: ( number number -- boolean )
fn less_than(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        ctx.push_boolean(lhs.as_real() < rhs.as_real());
    }
}

/// Stack effect: ( number number -- boolean )
fn greater_than(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        ctx.push_boolean(lhs.as_real() > rhs.as_real());
    }
}

/// Stack effect: ( number number -- boolean )
fn less_than_or_equal(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        ctx.push_boolean(lhs.as_real() <= rhs.as_real());
    }
}

/// Stack effect: ( number number -- boolean )
fn greater_than_or_equal(ctx: &mut Context) {
    if let Some((lhs, rhs)) = pop_operands(ctx) {
        ctx.push_boolean(lhs.as_real() >= rhs.as_real());
    }
}
