//! Boolean prototype words

use crate::context::Context;
use crate::runtime::PrototypeDefinition;

/// Words installed on the boolean prototype.
pub fn definition() -> PrototypeDefinition {
    &[("and", and), ("or", or), ("xor", xor), ("not", not)]
}

/// Stack effect: ( boolean boolean -- boolean )
fn and(ctx: &mut Context) {
    let Some(rhs) = ctx.pop_boolean() else { return };
    let Some(lhs) = ctx.pop_boolean() else { return };

    ctx.push_boolean(lhs && rhs);
}

/// Stack effect: ( boolean boolean -- boolean )
fn or(ctx: &mut Context) {
    let Some(rhs) = ctx.pop_boolean() else { return };
    let Some(lhs) = ctx.pop_boolean() else { return };

    ctx.push_boolean(lhs || rhs);
}

/// Stack effect: ( boolean boolean -- boolean )
fn xor(ctx: &mut Context) {
    let Some(rhs) = ctx.pop_boolean() else { return };
    let Some(lhs) = ctx.pop_boolean() else { return };

    ctx.push_boolean(lhs != rhs);
}

/// Stack effect: ( boolean -- boolean )
fn not(ctx: &mut Context) {
    if let Some(value) = ctx.pop_boolean() {
        ctx.push_boolean(!value);
    }
}
