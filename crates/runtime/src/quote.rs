//! Quotes and words
//!
//! A quote is a first-class block of code: either a compiled sequence of
//! values executed in order, or a primitive backed by a native function that
//! manipulates the executing context directly. Every built-in word in the
//! runtime's dictionaries is a primitive quote.
//!
//! A word pairs a symbol with a quote; executing a word defines it into the
//! context's local dictionary.

use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::exec::exec;
use crate::value::{Symbol, Value};

/// Native implementation of a primitive quote.
pub type NativeWord = fn(&mut Context);

/// First-class block of code.
pub enum Quote {
    /// Sequence of values executed front to back.
    Compiled(Vec<Value>),
    /// Built-in word.
    Native(NativeWord),
}

impl Quote {
    /// Executes the quote in the given context. Returns `false` when the
    /// context holds an error afterwards.
    pub fn call(&self, ctx: &mut Context) -> bool {
        match self {
            Quote::Native(function) => {
                function(ctx);
                !ctx.has_error()
            }
            Quote::Compiled(values) => {
                for value in values {
                    if !exec(ctx, value) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Identity comparison: two quotes are the same when they are the same
    /// allocation, or primitives backed by the same native function.
    pub fn same(a: &Rc<Quote>, b: &Rc<Quote>) -> bool {
        if Rc::ptr_eq(a, b) {
            return true;
        }
        matches!(
            (&**a, &**b),
            (Quote::Native(f), Quote::Native(g)) if std::ptr::fn_addr_eq(*f, *g)
        )
    }

    /// Source form of the quote body, without the surrounding parentheses.
    fn body_source(&self) -> String {
        match self {
            Quote::Native(_) => "native".to_string(),
            Quote::Compiled(values) => {
                let parts: Vec<String> = values.iter().map(Value::to_source).collect();
                parts.join(" ")
            }
        }
    }

    pub fn to_source(&self) -> String {
        format!("({})", self.body_source())
    }
}

impl fmt::Debug for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Native(function) => write!(f, "Quote::Native({:p})", *function as *const ()),
            Quote::Compiled(values) => f.debug_tuple("Quote::Compiled").field(values).finish(),
        }
    }
}

/// Named quote: the unit of user-visible behaviour.
#[derive(Debug)]
pub struct Word {
    symbol: Rc<Symbol>,
    quote: Rc<Quote>,
}

impl Word {
    pub fn new(symbol: Rc<Symbol>, quote: Rc<Quote>) -> Self {
        Self { symbol, quote }
    }

    pub fn symbol(&self) -> &Rc<Symbol> {
        &self.symbol
    }

    pub fn quote(&self) -> &Rc<Quote> {
        &self.quote
    }

    pub fn to_source(&self) -> String {
        match &*self.quote {
            Quote::Compiled(_) => format!(": {} {} ;", self.symbol.id(), self.quote.body_source()),
            Quote::Native(_) => format!(": {} native ;", self.symbol.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::value::Number;

    fn push_one(ctx: &mut Context) {
        ctx.push_int(1);
    }

    fn push_two(ctx: &mut Context) {
        ctx.push_int(2);
    }

    #[test]
    fn test_native_quote_call() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();
        let quote = Rc::new(Quote::Native(push_one));

        assert!(quote.call(&mut ctx));
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_compiled_quote_executes_values_in_order() {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();
        let quote = Quote::Compiled(vec![
            Value::Number(Number::Int(10)),
            Value::Number(Number::Int(20)),
        ]);

        assert!(quote.call(&mut ctx));
        assert_eq!(ctx.depth(), 2);
        let top = ctx.pop().unwrap();
        assert!(top.equals(&Value::Number(Number::Int(20))));
    }

    #[test]
    fn test_identity() {
        let a = Rc::new(Quote::Native(push_one));
        let b = Rc::new(Quote::Native(push_one));
        let c = Rc::new(Quote::Native(push_two));
        let compiled = Rc::new(Quote::Compiled(vec![]));

        assert!(Quote::same(&a, &Rc::clone(&a)));
        assert!(Quote::same(&a, &b)); // same native function
        assert!(!Quote::same(&a, &c));
        assert!(!Quote::same(&a, &compiled));
        assert!(Quote::same(&compiled, &Rc::clone(&compiled)));
    }

    #[test]
    fn test_source_form() {
        let quote = Quote::Compiled(vec![
            Value::Number(Number::Int(2)),
            Value::Symbol(Rc::new(Symbol::new("*", None))),
        ]);
        assert_eq!(quote.to_source(), "(2 *)");

        let word = Word::new(
            Rc::new(Symbol::new("double", None)),
            Rc::new(Quote::Compiled(vec![Value::Symbol(Rc::new(Symbol::new(
                "dup", None,
            )))])),
        );
        assert_eq!(word.to_source(), ": double dup ;");
    }
}
