//! Symbol prototype words

use std::collections::HashMap;

use crate::context::Context;
use crate::exec::invoke;
use crate::runtime::PrototypeDefinition;
use crate::value::Value;

/// Words installed on the symbol prototype.
pub fn definition() -> PrototypeDefinition {
    &[("position", position), ("call", call)]
}

/// Returns the source position the symbol was read from as an object with
/// `filename`, `line` and `column` properties, or null when the symbol
/// carries no position.
///
/// Stack effect: ( symbol -- symbol object|null )
fn position(ctx: &mut Context) {
    if let Some(symbol) = ctx.pop_symbol() {
        let position = symbol.position().cloned();

        ctx.push(Value::Symbol(symbol));
        match position {
            Some(position) => {
                let properties = HashMap::from([
                    (
                        "filename".to_string(),
                        Value::String(crate::rope::Rope::from_str(&position.filename)),
                    ),
                    (
                        "line".to_string(),
                        Value::Number(crate::value::Number::Int(position.line as i64)),
                    ),
                    (
                        "column".to_string(),
                        Value::Number(crate::value::Number::Int(position.column as i64)),
                    ),
                ]);
                ctx.push_object(properties);
            }
            None => ctx.push_null(),
        }
    }
}

/// Resolves the symbol as a word and executes it.
///
/// Stack effect: ( symbol -- ... )
fn call(ctx: &mut Context) {
    if let Some(symbol) = ctx.pop_symbol() {
        invoke(ctx, symbol.id());
    }
}
