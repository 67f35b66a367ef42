//! Global dictionary words
//!
//! Words available regardless of what sits on the stack: the literal
//! constants, the classic stack shuffles, structural equality, the
//! conditional combinators and `try` for user-level error recovery.

use crate::context::Context;
use crate::runtime::PrototypeDefinition;
use crate::value::Value;

/// Words installed in the runtime's global dictionary.
pub fn definition() -> PrototypeDefinition {
    &[
        // Constants.
        ("null", null),
        ("true", true_word),
        ("false", false_word),
        // Stack shuffles.
        ("dup", dup),
        ("drop", drop),
        ("swap", swap),
        ("over", over),
        ("rot", rot),
        ("nip", nip),
        ("tuck", tuck),
        ("depth", depth),
        ("clear", clear),
        // Equality.
        ("=", equals),
        ("!=", not_equals),
        // Control.
        ("if", if_word),
        ("if-else", if_else),
        ("try", try_word),
    ]
}

/// Stack effect: ( -- null )
fn null(ctx: &mut Context) {
    ctx.push_null();
}

/// Stack effect: ( -- boolean )
fn true_word(ctx: &mut Context) {
    ctx.push_boolean(true);
}

/// Stack effect: ( -- boolean )
fn false_word(ctx: &mut Context) {
    ctx.push_boolean(false);
}

/// Duplicates the top value: ( a -- a a )
fn dup(ctx: &mut Context) {
    if let Some(value) = ctx.pop() {
        ctx.push(value.clone());
        ctx.push(value);
    }
}

/// Discards the top value: ( a -- )
fn drop(ctx: &mut Context) {
    ctx.pop();
}

/// Swaps the top two values: ( a b -- b a )
fn swap(ctx: &mut Context) {
    let Some(b) = ctx.pop() else { return };
    let Some(a) = ctx.pop() else { return };

    ctx.push(b);
    ctx.push(a);
}

/// Copies the second value to the top: ( a b -- a b a )
fn over(ctx: &mut Context) {
    let Some(b) = ctx.pop() else { return };
    let Some(a) = ctx.pop() else { return };

    ctx.push(a.clone());
    ctx.push(b);
    ctx.push(a);
}

/// Rotates the top three values: ( a b c -- b c a )
fn rot(ctx: &mut Context) {
    let Some(c) = ctx.pop() else { return };
    let Some(b) = ctx.pop() else { return };
    let Some(a) = ctx.pop() else { return };

    ctx.push(b);
    ctx.push(c);
    ctx.push(a);
}

/// Discards the second value: ( a b -- b )
fn nip(ctx: &mut Context) {
    let Some(b) = ctx.pop() else { return };
    let Some(_a) = ctx.pop() else { return };

    ctx.push(b);
}

/// Copies the top value below the second: ( a b -- b a b )
fn tuck(ctx: &mut Context) {
    let Some(b) = ctx.pop() else { return };
    let Some(a) = ctx.pop() else { return };

    ctx.push(b.clone());
    ctx.push(a);
    ctx.push(b);
}

/// Pushes the number of values on the stack: ( -- number )
fn depth(ctx: &mut Context) {
    let depth = ctx.depth() as i64;

    ctx.push_int(depth);
}

/// Removes every value from the stack: ( ... -- )
fn clear(ctx: &mut Context) {
    ctx.clear();
}

/// Structural equality of any two values: ( a b -- boolean )
fn equals(ctx: &mut Context) {
    let Some(b) = ctx.pop() else { return };
    let Some(a) = ctx.pop() else { return };

    ctx.push_boolean(a.equals(&b));
}

/// Structural inequality of any two values: ( a b -- boolean )
fn not_equals(ctx: &mut Context) {
    let Some(b) = ctx.pop() else { return };
    let Some(a) = ctx.pop() else { return };

    ctx.push_boolean(!a.equals(&b));
}

/// Executes the quote when the condition is true.
///
/// Stack effect: ( boolean quote -- ... )
fn if_word(ctx: &mut Context) {
    let Some(quote) = ctx.pop_quote() else { return };
    let Some(condition) = ctx.pop_boolean() else {
        return;
    };

    if condition {
        quote.call(ctx);
    }
}

/// Executes the first quote when the condition is true and the second one
/// otherwise.
///
/// Stack effect: ( boolean quote quote -- ... )
fn if_else(ctx: &mut Context) {
    let Some(else_quote) = ctx.pop_quote() else {
        return;
    };
    let Some(then_quote) = ctx.pop_quote() else {
        return;
    };
    let Some(condition) = ctx.pop_boolean() else {
        return;
    };

    if condition {
        then_quote.call(ctx);
    } else {
        else_quote.call(ctx);
    }
}

/// Executes the first quote; if it leaves an error behind, clears the error,
/// pushes it as a value and executes the second quote as the handler.
///
/// Stack effect: ( quote quote -- ... )
fn try_word(ctx: &mut Context) {
    let Some(catch_quote) = ctx.pop_quote() else {
        return;
    };
    let Some(try_quote) = ctx.pop_quote() else {
        return;
    };

    if !try_quote.call(ctx) {
        if let Some(error) = ctx.take_error() {
            ctx.push(Value::Error(error));
        }
        catch_quote.call(ctx);
    }
}
