//! Quote prototype words

use crate::context::Context;
use crate::runtime::PrototypeDefinition;

/// Words installed on the quote prototype.
pub fn definition() -> PrototypeDefinition {
    &[("call", call)]
}

/// Executes the quote.
///
/// Stack effect: ( quote -- ... )
fn call(ctx: &mut Context) {
    if let Some(quote) = ctx.pop_quote() {
        quote.call(ctx);
    }
}
