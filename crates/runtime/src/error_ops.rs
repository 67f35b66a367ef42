//! Error prototype words
//!
//! Error values travel on the stack like any other value; `throw` moves one
//! into the context's error slot, which is how user code re-raises an error
//! that a `try` handler decided not to swallow.

use crate::context::Context;
use crate::runtime::PrototypeDefinition;
use crate::value::Value;

/// Words installed on the error prototype.
pub fn definition() -> PrototypeDefinition {
    &[("code", code), ("message", message), ("throw", throw)]
}

/// Returns the numeric code of the error.
///
/// Stack effect: ( error -- error number )
fn code(ctx: &mut Context) {
    if let Some(error) = ctx.pop_error() {
        let code = error.code() as i64;

        ctx.push(Value::Error(error));
        ctx.push_int(code);
    }
}

/// Returns the message of the error.
///
/// Stack effect: ( error -- error string )
fn message(ctx: &mut Context) {
    if let Some(error) = ctx.pop_error() {
        let message = error.message().to_string();

        ctx.push(Value::Error(error));
        ctx.push_string(&message);
    }
}

/// Sets the error as the context's uncaught error.
///
/// Stack effect: ( error -- )
fn throw(ctx: &mut Context) {
    if let Some(error) = ctx.pop_error() {
        ctx.set_error_value(error);
    }
}
