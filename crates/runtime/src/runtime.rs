//! Runtime registry
//!
//! The runtime is constructed once per interpreter instance and thereafter
//! read-only. It owns the global dictionary, the canonical boolean values
//! and one prototype object per value type. Each prototype is built from a
//! static definition list of `(identifier, native function)` pairs; the
//! prototype itself is published twice: through a typed accessor used by
//! prototype resolution, and as a global dictionary entry named after the
//! type, holding an object of the shape `{"prototype": <proto>}` so scripts
//! can reach the method tables by name.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::error::{ErrorCode, ErrorValue};
use crate::object::Object;
use crate::quote::{NativeWord, Quote, Word};
use crate::rope::Rope;
use crate::value::{Number, Position, Symbol, Value};
use crate::{
    array_ops, boolean_ops, context::Context, error_ops, globals, number_ops, object_ops,
    quote_ops, string_ops, symbol_ops, word_ops,
};

/// Definition list for a prototype: identifier and native implementation of
/// each word.
pub type PrototypeDefinition = &'static [(&'static str, NativeWord)];

/// Process-wide interpreter state.
pub struct Runtime {
    dictionary: HashMap<String, Value>,
    array_prototype: Rc<Object>,
    boolean_prototype: Rc<Object>,
    error_prototype: Rc<Object>,
    number_prototype: Rc<Object>,
    object_prototype: Rc<Object>,
    quote_prototype: Rc<Object>,
    string_prototype: Rc<Object>,
    symbol_prototype: Rc<Object>,
    word_prototype: Rc<Object>,
}

impl Runtime {
    pub fn new() -> Rc<Runtime> {
        let mut dictionary = HashMap::new();

        for (id, function) in globals::definition() {
            dictionary.insert(
                (*id).to_string(),
                Value::Quote(Rc::new(Quote::Native(*function))),
            );
        }

        let array_prototype = make_prototype(&mut dictionary, "array", array_ops::definition());
        let boolean_prototype =
            make_prototype(&mut dictionary, "boolean", boolean_ops::definition());
        let error_prototype = make_prototype(&mut dictionary, "error", error_ops::definition());
        let number_prototype = make_prototype(&mut dictionary, "number", number_ops::definition());
        let object_prototype = make_prototype(&mut dictionary, "object", object_ops::definition());
        let quote_prototype = make_prototype(&mut dictionary, "quote", quote_ops::definition());
        let string_prototype = make_prototype(&mut dictionary, "string", string_ops::definition());
        let symbol_prototype = make_prototype(&mut dictionary, "symbol", symbol_ops::definition());
        let word_prototype = make_prototype(&mut dictionary, "word", word_ops::definition());

        debug!(words = dictionary.len(), "runtime constructed");

        Rc::new(Runtime {
            dictionary,
            array_prototype,
            boolean_prototype,
            error_prototype,
            number_prototype,
            object_prototype,
            quote_prototype,
            string_prototype,
            symbol_prototype,
            word_prototype,
        })
    }

    /// Creates a fresh execution context bound to this runtime.
    pub fn new_context(self: &Rc<Self>) -> Context {
        Context::new(Rc::clone(self))
    }

    /// The global dictionary: built-in words plus one entry per type name.
    pub fn dictionary(&self) -> &HashMap<String, Value> {
        &self.dictionary
    }

    // --- Value factories -------------------------------------------------

    /// Canonical `true`.
    pub fn true_value(&self) -> Value {
        Value::Boolean(true)
    }

    /// Canonical `false`.
    pub fn false_value(&self) -> Value {
        Value::Boolean(false)
    }

    pub fn string(&self, text: &str) -> Value {
        Value::String(Rope::from_str(text))
    }

    pub fn string_from_chars(&self, chars: &[char]) -> Value {
        Value::String(Rope::from_chars(chars))
    }

    pub fn number_int(&self, value: i64) -> Value {
        Value::Number(Number::Int(value))
    }

    pub fn number_real(&self, value: f64) -> Value {
        Value::Number(Number::Real(value))
    }

    pub fn array(&self, elements: Vec<Value>) -> Value {
        Value::Array(Rc::from(elements))
    }

    pub fn object(&self, properties: HashMap<String, Value>) -> Value {
        Value::Object(Rc::new(Object::new(properties)))
    }

    pub fn symbol(&self, id: impl Into<String>, position: Option<Position>) -> Value {
        Value::Symbol(Rc::new(Symbol::new(id, position)))
    }

    pub fn compiled_quote(&self, values: Vec<Value>) -> Value {
        Value::Quote(Rc::new(Quote::Compiled(values)))
    }

    pub fn native_quote(&self, function: NativeWord) -> Value {
        Value::Quote(Rc::new(Quote::Native(function)))
    }

    pub fn word(&self, symbol: Rc<Symbol>, quote: Rc<Quote>) -> Value {
        Value::Word(Rc::new(Word::new(symbol, quote)))
    }

    pub fn error(
        &self,
        code: ErrorCode,
        message: impl Into<String>,
        position: Option<Position>,
    ) -> Value {
        Value::Error(Rc::new(ErrorValue::new(code, message, position)))
    }

    // --- Prototype accessors ---------------------------------------------

    pub fn array_prototype(&self) -> &Rc<Object> {
        &self.array_prototype
    }

    pub fn boolean_prototype(&self) -> &Rc<Object> {
        &self.boolean_prototype
    }

    pub fn error_prototype(&self) -> &Rc<Object> {
        &self.error_prototype
    }

    pub fn number_prototype(&self) -> &Rc<Object> {
        &self.number_prototype
    }

    pub fn object_prototype(&self) -> &Rc<Object> {
        &self.object_prototype
    }

    pub fn quote_prototype(&self) -> &Rc<Object> {
        &self.quote_prototype
    }

    pub fn string_prototype(&self) -> &Rc<Object> {
        &self.string_prototype
    }

    pub fn symbol_prototype(&self) -> &Rc<Object> {
        &self.symbol_prototype
    }

    pub fn word_prototype(&self) -> &Rc<Object> {
        &self.word_prototype
    }
}

/// Builds a prototype object from its definition list, wrapping each native
/// function in a primitive quote, and installs the `{name: {"prototype":
/// <proto>}}` entry into the global dictionary.
fn make_prototype(
    dictionary: &mut HashMap<String, Value>,
    name: &str,
    definition: PrototypeDefinition,
) -> Rc<Object> {
    let mut properties = HashMap::with_capacity(definition.len());

    for (id, function) in definition {
        properties.insert(
            (*id).to_string(),
            Value::Quote(Rc::new(Quote::Native(*function))),
        );
    }

    let prototype = Rc::new(Object::new(properties));
    let container = HashMap::from([("prototype".to_string(), Value::Object(Rc::clone(&prototype)))]);

    dictionary.insert(name.to_string(), Value::Object(Rc::new(Object::new(container))));

    prototype
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn test_dictionary_has_type_entries() {
        let runtime = Runtime::new();

        for name in [
            "array", "boolean", "error", "number", "object", "quote", "string", "symbol", "word",
        ] {
            let entry = runtime.dictionary().get(name).unwrap();
            let Value::Object(container) = entry else {
                panic!("dictionary entry for {name} is not an object");
            };
            assert!(matches!(
                container.own_property("prototype"),
                Some(Value::Object(_))
            ));
        }
    }

    #[test]
    fn test_type_entry_exposes_prototype_object() {
        let runtime = Runtime::new();
        let Some(Value::Object(container)) = runtime.dictionary().get("string").cloned() else {
            panic!("no string entry");
        };
        let Some(Value::Object(proto)) = container.own_property("prototype") else {
            panic!("no prototype property");
        };
        assert!(Rc::ptr_eq(&proto, runtime.string_prototype()));
    }

    #[test]
    fn test_prototypes_hold_primitive_quotes() {
        let runtime = Runtime::new();
        let length = runtime.string_prototype().own_property("length").unwrap();
        assert_eq!(length.value_type(), ValueType::Quote);
    }

    #[test]
    fn test_globals_are_installed() {
        let runtime = Runtime::new();
        for word in ["dup", "drop", "swap", "if", "try", "="] {
            assert!(runtime.dictionary().contains_key(word), "missing {word}");
        }
    }

    #[test]
    fn test_factories() {
        let runtime = Runtime::new();
        assert!(runtime.true_value().equals(&Value::Boolean(true)));
        assert!(!runtime.false_value().equals(&runtime.true_value()));
        assert!(
            runtime
                .string("hi")
                .equals(&Value::String(Rope::from_str("hi")))
        );
        assert!(
            runtime
                .string_from_chars(&['h', 'i'])
                .equals(&runtime.string("hi"))
        );
        assert!(
            runtime
                .number_int(3)
                .equals(&Value::Number(Number::Real(3.0)))
        );
        assert!(runtime.number_real(0.5).equals(&runtime.number_real(0.5)));

        let array = runtime.array(vec![runtime.number_int(1)]);
        assert_eq!(array.value_type(), ValueType::Array);
        let object = runtime.object(HashMap::new());
        assert_eq!(object.value_type(), ValueType::Object);
    }

    #[test]
    fn test_code_value_factories() {
        let runtime = Runtime::new();

        let Value::Symbol(symbol) = runtime.symbol("twice", None) else {
            panic!("expected symbol");
        };
        let Value::Quote(quote) = runtime.compiled_quote(vec![]) else {
            panic!("expected quote");
        };
        let word = runtime.word(symbol, quote);
        assert_eq!(word.value_type(), ValueType::Word);
        assert_eq!(word.to_source(), ": twice  ;");

        fn noop(_: &mut Context) {}
        assert_eq!(runtime.native_quote(noop).value_type(), ValueType::Quote);
    }

    #[test]
    fn test_error_factory_carries_position() {
        let runtime = Runtime::new();
        let position = Position {
            filename: "boot.plorth".to_string(),
            line: 1,
            column: 9,
        };

        let Value::Error(error) = runtime.error(ErrorCode::Syntax, "Unterminated string.", Some(position))
        else {
            panic!("expected error");
        };
        assert_eq!(error.code(), ErrorCode::Syntax);
        assert_eq!(error.position().unwrap().column, 9);
        assert_eq!(
            error.to_string(),
            "syntax error: Unterminated string."
        );
    }
}
