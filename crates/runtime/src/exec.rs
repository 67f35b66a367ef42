//! Value execution and word dispatch
//!
//! The interpreter loop is tiny: executing a compiled quote means executing
//! its values in order, where literals push themselves, a word defines
//! itself into the context dictionary, and a symbol is dispatched as a word
//! reference.
//!
//! Dispatch order for a symbol:
//!
//! 1. the context's local dictionary,
//! 2. the prototype chain of the value on top of the data stack,
//! 3. the runtime's global dictionary,
//! 4. decimal number literals,
//!
//! and otherwise a reference error. The first match wins; a quote found
//! anywhere along the way is called, any other value is pushed.

use std::rc::Rc;

use tracing::trace;

use crate::context::Context;
use crate::error::ErrorCode;
use crate::value::{Value, is_number_literal};

/// Executes a single value as part of a quote. Returns `false` when the
/// context holds an error afterwards.
pub fn exec(ctx: &mut Context, value: &Value) -> bool {
    match value {
        Value::Symbol(symbol) => invoke(ctx, symbol.id()),
        Value::Word(word) => {
            ctx.define(word.symbol().id(), Rc::clone(word.quote()));
            true
        }
        literal => {
            ctx.push(literal.clone());
            true
        }
    }
}

/// Resolves an identifier as a word and executes it.
pub fn invoke(ctx: &mut Context, id: &str) -> bool {
    // Words defined in this context shadow everything else.
    if let Some(quote) = ctx.dictionary().get(id).cloned() {
        trace!(word = id, source = "context", "dispatch");
        return quote.call(ctx);
    }

    // Words from the prototype of the value on top of the stack.
    if let Some(top) = ctx.data().last().cloned() {
        let runtime = Rc::clone(ctx.runtime());
        let prototype = top.prototype_of(&runtime);

        if let Some(property) = prototype.property(&runtime, id) {
            trace!(word = id, source = "prototype", "dispatch");
            return match property {
                Value::Quote(quote) => quote.call(ctx),
                value => {
                    ctx.push(value);
                    true
                }
            };
        }
    }

    // Global words.
    if let Some(value) = ctx.runtime().dictionary().get(id).cloned() {
        trace!(word = id, source = "global", "dispatch");
        return match value {
            Value::Quote(quote) => quote.call(ctx),
            value => {
                ctx.push(value);
                true
            }
        };
    }

    // Number literals.
    if is_number_literal(id) {
        ctx.push_number(id);
        return !ctx.has_error();
    }

    ctx.set_error(ErrorCode::Reference, format!("Unrecognized word: {id}."));
    false
}
