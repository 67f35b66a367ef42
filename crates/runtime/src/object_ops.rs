//! Object prototype words
//!
//! These sit at the root of every prototype chain, so they are reachable
//! from values of any type.

use std::rc::Rc;

use crate::context::Context;
use crate::error::ErrorCode;
use crate::runtime::PrototypeDefinition;
use crate::value::Value;

/// Words installed on the object prototype.
pub fn definition() -> PrototypeDefinition {
    &[
        ("keys", keys),
        ("values", values),
        ("has?", has),
        ("@", get),
    ]
}

/// Returns the property names of the object as an array of strings. Order
/// is unspecified.
///
/// Stack effect: ( object -- object array )
fn keys(ctx: &mut Context) {
    if let Some(object) = ctx.pop_object() {
        let keys: Vec<Value> = object
            .properties()
            .keys()
            .map(|key| Value::String(crate::rope::Rope::from_str(key)))
            .collect();

        ctx.push(Value::Object(object));
        ctx.push_array(keys);
    }
}

/// Returns the property values of the object as an array. Order is
/// unspecified.
///
/// Stack effect: ( object -- object array )
fn values(ctx: &mut Context) {
    if let Some(object) = ctx.pop_object() {
        let values: Vec<Value> = object.properties().values().cloned().collect();

        ctx.push(Value::Object(object));
        ctx.push_array(values);
    }
}

/// Tests whether the object or its prototype chain has the named property.
///
/// Stack effect: ( object string -- object boolean )
fn has(ctx: &mut Context) {
    let Some(name) = ctx.pop_string() else { return };
    let Some(object) = ctx.pop_object() else {
        return;
    };

    let runtime = Rc::clone(ctx.runtime());
    let found = object.property(&runtime, &name.flatten()).is_some();

    ctx.push(Value::Object(object));
    ctx.push_boolean(found);
}

/// Retrieves the named property, searching the prototype chain. A missing
/// property stores a reference error and leaves the object on the stack.
///
/// Stack effect: ( object string -- object value )
fn get(ctx: &mut Context) {
    let Some(name) = ctx.pop_string() else { return };
    let Some(object) = ctx.pop_object() else {
        return;
    };

    let runtime = Rc::clone(ctx.runtime());
    let name = name.flatten();
    let property = object.property(&runtime, &name);

    ctx.push(Value::Object(object));

    match property {
        Some(value) => ctx.push(value),
        None => ctx.set_error(
            ErrorCode::Reference,
            format!("No such property: \"{name}\"."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::value::Number;
    use std::collections::HashMap;

    fn context_with_object() -> Context {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();
        let properties = HashMap::from([
            ("a".to_string(), Value::Number(Number::Int(1))),
            ("b".to_string(), Value::Boolean(true)),
        ]);

        ctx.push_object(properties);
        ctx
    }

    #[test]
    fn test_keys() {
        let mut ctx = context_with_object();
        keys(&mut ctx);

        let mut keys: Vec<String> = ctx
            .pop_array()
            .unwrap()
            .iter()
            .map(|value| value.to_string())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_values() {
        let mut ctx = context_with_object();
        values(&mut ctx);
        assert_eq!(ctx.pop_array().unwrap().len(), 2);
    }

    #[test]
    fn test_has() {
        let mut ctx = context_with_object();
        ctx.push_string("a");
        has(&mut ctx);
        assert!(ctx.pop_boolean().unwrap());

        ctx.push_string("missing");
        has(&mut ctx);
        assert!(!ctx.pop_boolean().unwrap());
    }

    #[test]
    fn test_get() {
        let mut ctx = context_with_object();
        ctx.push_string("a");
        get(&mut ctx);
        assert!(ctx.pop().unwrap().equals(&Value::Number(Number::Int(1))));
    }

    #[test]
    fn test_get_missing_property() {
        let mut ctx = context_with_object();
        ctx.push_string("missing");
        get(&mut ctx);

        let error = ctx.error().unwrap();
        assert_eq!(error.code(), ErrorCode::Reference);
        assert_eq!(error.message(), "No such property: \"missing\".");
        // The object stays behind.
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_has_sees_inherited_properties() {
        let mut ctx = context_with_object();
        // "keys" itself lives on the object prototype.
        ctx.push_string("keys");
        has(&mut ctx);
        assert!(ctx.pop_boolean().unwrap());
    }
}
