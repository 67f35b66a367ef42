//! Execution context
//!
//! A context owns one evaluation's state: the data stack, a local word
//! dictionary that overrides the runtime's global one, the error slot and an
//! optional source filename. Contexts are cheap; a host creates one per
//! script or REPL session from [`Runtime::new_context`].
//!
//! # Error slot
//!
//! The error slot is the universal failure channel. Built-in words never
//! unwind: on failure they store an error value and return, and callers
//! (the interpreter loop, or an embedding host) check the slot after each
//! dispatch. At most one error is held at a time; a user-level handler can
//! inspect and clear it, which is what the global `try` word does.
//!
//! # Stack protocol
//!
//! The typed `pop_*` family enforces operand types for built-in words.
//! Popping from an empty stack stores a range error ("Stack underflow.");
//! popping a mismatched type stores a type error and leaves the stack
//! untouched, so a failing word never consumes operands it cannot use.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::error::{ErrorCode, ErrorValue};
use crate::object::Object;
use crate::quote::Quote;
use crate::rope::Rope;
use crate::runtime::Runtime;
use crate::value::{Number, Symbol, Value, ValueType};

/// Program execution state.
pub struct Context {
    /// Runtime associated with this context.
    runtime: Rc<Runtime>,
    /// Data stack.
    data: Vec<Value>,
    /// Words defined in this context; consulted before the global dictionary.
    dictionary: HashMap<String, Rc<Quote>>,
    /// Currently uncaught error.
    error: Option<Rc<ErrorValue>>,
    /// Optional filename, when the context executes a module.
    filename: Option<String>,
}

impl Context {
    pub fn new(runtime: Rc<Runtime>) -> Self {
        Self {
            runtime,
            data: Vec::new(),
            dictionary: HashMap::new(),
            error: None,
            filename: None,
        }
    }

    /// The runtime associated with this context.
    pub fn runtime(&self) -> &Rc<Runtime> {
        &self.runtime
    }

    /// The values currently on the data stack, bottom first.
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Number of values on the data stack.
    pub fn depth(&self) -> usize {
        self.data.len()
    }

    /// Removes every value from the data stack.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Words defined in this context.
    pub fn dictionary(&self) -> &HashMap<String, Rc<Quote>> {
        &self.dictionary
    }

    /// Defines a word in this context, shadowing any global with the same
    /// identifier.
    pub fn define(&mut self, id: impl Into<String>, quote: Rc<Quote>) {
        self.dictionary.insert(id.into(), quote);
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    // --- Error slot ------------------------------------------------------

    /// The currently uncaught error, if any.
    pub fn error(&self) -> Option<&Rc<ErrorValue>> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Constructs an error value and stores it as the uncaught error.
    pub fn set_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let message = message.into();

        debug!(code = code.description(), %message, "error raised");
        self.error = Some(Rc::new(ErrorValue::new(code, message, None)));
    }

    /// Stores an existing error value as the uncaught error. Used by `throw`
    /// and by hosts re-raising a previously caught error.
    pub fn set_error_value(&mut self, error: Rc<ErrorValue>) {
        self.error = Some(error);
    }

    /// Removes and returns the uncaught error.
    pub fn take_error(&mut self) -> Option<Rc<ErrorValue>> {
        self.error.take()
    }

    /// Removes the uncaught error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // --- Pushing ---------------------------------------------------------

    /// Pushes a value onto the data stack.
    pub fn push(&mut self, value: Value) {
        self.data.push(value);
    }

    pub fn push_null(&mut self) {
        self.push(Value::Null);
    }

    pub fn push_boolean(&mut self, value: bool) {
        self.push(if value {
            self.runtime.true_value()
        } else {
            self.runtime.false_value()
        });
    }

    pub fn push_int(&mut self, value: i64) {
        self.push(Value::Number(Number::Int(value)));
    }

    pub fn push_real(&mut self, value: f64) {
        self.push(Value::Number(Number::Real(value)));
    }

    /// Parses text as a decimal number and pushes an integer when the text
    /// holds one, a real otherwise. Unparseable text stores a value error.
    pub fn push_number(&mut self, text: &str) {
        if let Ok(value) = text.parse::<i64>() {
            self.push_int(value);
        } else if let Ok(value) = text.parse::<f64>() {
            self.push_real(value);
        } else {
            self.set_error(ErrorCode::Value, "Could not convert string to number.");
        }
    }

    pub fn push_string(&mut self, text: &str) {
        self.push(Value::String(Rope::from_str(text)));
    }

    /// Constructs a string from a codepoint buffer and pushes it.
    pub fn push_string_chars(&mut self, chars: &[char]) {
        self.push(Value::String(Rope::from_chars(chars)));
    }

    pub fn push_array(&mut self, elements: Vec<Value>) {
        self.push(Value::Array(Rc::from(elements)));
    }

    pub fn push_object(&mut self, properties: HashMap<String, Value>) {
        self.push(Value::Object(Rc::new(Object::new(properties))));
    }

    pub fn push_symbol(&mut self, id: impl Into<String>) {
        self.push(Value::Symbol(Rc::new(Symbol::new(id, None))));
    }

    /// Constructs a compiled quote from a sequence of values and pushes it.
    pub fn push_quote(&mut self, values: Vec<Value>) {
        self.push(Value::Quote(Rc::new(Quote::Compiled(values))));
    }

    pub fn push_word(&mut self, symbol: Rc<Symbol>, quote: Rc<Quote>) {
        self.push(Value::Word(Rc::new(crate::quote::Word::new(symbol, quote))));
    }

    // --- Popping ---------------------------------------------------------

    /// Removes and returns the top of the data stack. An empty stack stores
    /// a range error and yields `None`.
    pub fn pop(&mut self) -> Option<Value> {
        if self.data.is_empty() {
            self.set_error(ErrorCode::Range, "Stack underflow.");
            return None;
        }
        self.data.pop()
    }

    /// Removes and returns the top of the data stack when its type matches.
    /// On a mismatch a type error is stored and the stack is left unchanged.
    pub fn pop_typed(&mut self, expected: ValueType) -> Option<Value> {
        match self.data.last() {
            None => {
                self.set_error(ErrorCode::Range, "Stack underflow.");
                None
            }
            Some(value) if value.value_type() == expected => self.data.pop(),
            Some(value) => {
                let message = format!("Expected {}, got {}.", expected, value.value_type());
                self.set_error(ErrorCode::Type, message);
                None
            }
        }
    }

    pub fn pop_boolean(&mut self) -> Option<bool> {
        match self.pop_typed(ValueType::Boolean) {
            Some(Value::Boolean(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_number(&mut self) -> Option<Number> {
        match self.pop_typed(ValueType::Number) {
            Some(Value::Number(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_string(&mut self) -> Option<Rc<Rope>> {
        match self.pop_typed(ValueType::String) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_array(&mut self) -> Option<Rc<[Value]>> {
        match self.pop_typed(ValueType::Array) {
            Some(Value::Array(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_object(&mut self) -> Option<Rc<Object>> {
        match self.pop_typed(ValueType::Object) {
            Some(Value::Object(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_symbol(&mut self) -> Option<Rc<Symbol>> {
        match self.pop_typed(ValueType::Symbol) {
            Some(Value::Symbol(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_quote(&mut self) -> Option<Rc<Quote>> {
        match self.pop_typed(ValueType::Quote) {
            Some(Value::Quote(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_word(&mut self) -> Option<Rc<crate::quote::Word>> {
        match self.pop_typed(ValueType::Word) {
            Some(Value::Word(value)) => Some(value),
            _ => None,
        }
    }

    pub fn pop_error(&mut self) -> Option<Rc<ErrorValue>> {
        match self.pop_typed(ValueType::Error) {
            Some(Value::Error(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Runtime::new().new_context()
    }

    #[test]
    fn test_push_pop_round_trip() {
        let mut ctx = context();
        ctx.push_int(42);
        let value = ctx.pop().unwrap();
        assert!(value.equals(&Value::Number(Number::Int(42))));
        assert_eq!(ctx.depth(), 0);
        assert!(!ctx.has_error());
    }

    #[test]
    fn test_pop_empty_sets_underflow() {
        let mut ctx = context();
        assert!(ctx.pop().is_none());
        let error = ctx.error().unwrap();
        assert_eq!(error.code(), ErrorCode::Range);
        assert_eq!(error.message(), "Stack underflow.");
    }

    #[test]
    fn test_typed_pop_mismatch_leaves_stack_unchanged() {
        let mut ctx = context();
        ctx.push_int(1);
        ctx.push_string("not a number");

        assert!(ctx.pop_number().is_none());
        // Nothing was consumed by the failing pop.
        assert_eq!(ctx.depth(), 2);
        let error = ctx.error().unwrap();
        assert_eq!(error.code(), ErrorCode::Type);
        assert_eq!(error.message(), "Expected number, got string.");
    }

    #[test]
    fn test_typed_pop_success() {
        let mut ctx = context();
        ctx.push_string("hi");
        let s = ctx.pop_string().unwrap();
        assert_eq!(s.flatten(), "hi");
    }

    #[test]
    fn test_typed_pop_null_mismatch_message() {
        let mut ctx = context();
        ctx.push_null();
        assert!(ctx.pop_string().is_none());
        assert_eq!(ctx.error().unwrap().message(), "Expected string, got null.");
    }

    #[test]
    fn test_push_number_parses_integers_and_reals() {
        let mut ctx = context();
        ctx.push_number("42");
        assert!(matches!(
            ctx.pop_number().unwrap(),
            Number::Int(42)
        ));
        ctx.push_number("12.5");
        assert!(matches!(
            ctx.pop_number().unwrap(),
            Number::Real(value) if value == 12.5
        ));
    }

    #[test]
    fn test_push_number_rejects_garbage() {
        let mut ctx = context();
        ctx.push_number("bogus");
        assert_eq!(ctx.error().unwrap().code(), ErrorCode::Value);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_error_slot_take_and_clear() {
        let mut ctx = context();
        ctx.set_error(ErrorCode::Value, "nope");
        assert!(ctx.has_error());

        let error = ctx.take_error().unwrap();
        assert_eq!(error.code(), ErrorCode::Value);
        assert!(!ctx.has_error());

        ctx.set_error(ErrorCode::Io, "again");
        ctx.clear_error();
        assert!(!ctx.has_error());
    }

    #[test]
    fn test_filename() {
        let mut ctx = context();
        assert!(ctx.filename().is_none());
        ctx.set_filename("script.plorth");
        assert_eq!(ctx.filename(), Some("script.plorth"));
    }
}
