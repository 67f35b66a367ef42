//! Word prototype words

use std::rc::Rc;

use crate::context::Context;
use crate::runtime::PrototypeDefinition;
use crate::value::Value;

/// Words installed on the word prototype.
pub fn definition() -> PrototypeDefinition {
    &[("symbol", symbol), ("quote", quote), ("define", define), ("call", call)]
}

/// Returns the symbol naming the word.
///
/// Stack effect: ( word -- word symbol )
fn symbol(ctx: &mut Context) {
    if let Some(word) = ctx.pop_word() {
        let symbol = Rc::clone(word.symbol());

        ctx.push(Value::Word(word));
        ctx.push(Value::Symbol(symbol));
    }
}

/// Returns the quote the word executes.
///
/// Stack effect: ( word -- word quote )
fn quote(ctx: &mut Context) {
    if let Some(word) = ctx.pop_word() {
        let quote = Rc::clone(word.quote());

        ctx.push(Value::Word(word));
        ctx.push(Value::Quote(quote));
    }
}

/// Defines the word into the context's dictionary.
///
/// Stack effect: ( word -- )
fn define(ctx: &mut Context) {
    if let Some(word) = ctx.pop_word() {
        ctx.define(word.symbol().id(), Rc::clone(word.quote()));
    }
}

/// Executes the word's quote without defining it.
///
/// Stack effect: ( word -- ... )
fn call(ctx: &mut Context) {
    if let Some(word) = ctx.pop_word() {
        word.quote().call(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::invoke;
    use crate::quote::Quote;
    use crate::runtime::Runtime;
    use crate::value::{Number, Symbol};

    fn push_word(ctx: &mut Context, id: &str, body: Vec<Value>) {
        ctx.push_word(
            Rc::new(Symbol::new(id, None)),
            Rc::new(Quote::Compiled(body)),
        );
    }

    #[test]
    fn test_accessors() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();

        push_word(&mut ctx, "answer", vec![Value::Number(Number::Int(42))]);
        symbol(&mut ctx);
        let s = ctx.pop_symbol().unwrap();
        assert_eq!(s.id(), "answer");

        quote(&mut ctx);
        assert!(ctx.pop_quote().is_some());
    }

    #[test]
    fn test_define_makes_word_invocable() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();

        push_word(&mut ctx, "answer", vec![Value::Number(Number::Int(42))]);
        define(&mut ctx);
        assert_eq!(ctx.depth(), 0);

        assert!(invoke(&mut ctx, "answer"));
        assert!(ctx.pop().unwrap().equals(&Value::Number(Number::Int(42))));
    }

    #[test]
    fn test_call_does_not_define() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();

        push_word(&mut ctx, "answer", vec![Value::Number(Number::Int(42))]);
        call(&mut ctx);

        assert!(ctx.pop().unwrap().equals(&Value::Number(Number::Int(42))));
        assert!(!ctx.dictionary().contains_key("answer"));
    }
}
