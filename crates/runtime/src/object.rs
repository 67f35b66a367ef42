//! Objects and prototype chains
//!
//! An object is a mapping from property name to value, frozen at
//! construction. Inheritance is prototypal: the implicit `__proto__`
//! property names the parent object, and property lookup walks that chain
//! until it reaches the runtime's object prototype. Prototype links are
//! assigned once, so chains are finite and acyclic.

use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::Runtime;
use crate::value::Value;

/// Name of the implicit prototype property.
pub const PROTO: &str = "__proto__";

/// Property map value. The map itself never changes after construction.
#[derive(Debug)]
pub struct Object {
    properties: HashMap<String, Value>,
}

impl Object {
    pub fn new(properties: HashMap<String, Value>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    /// Retrieves a property from the object itself, ignoring the prototype
    /// chain.
    pub fn own_property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    /// The parent prototype of this object: its `__proto__` property when
    /// that is an object, otherwise the runtime's object prototype.
    pub fn prototype(&self, runtime: &Runtime) -> Rc<Object> {
        match self.own_property(PROTO) {
            Some(Value::Object(parent)) => parent,
            _ => Rc::clone(runtime.object_prototype()),
        }
    }

    /// Retrieves a property from the object or its prototype chain. The
    /// chain terminates at the runtime's object prototype.
    pub fn property(self: &Rc<Self>, runtime: &Runtime, name: &str) -> Option<Value> {
        let mut current = Rc::clone(self);

        loop {
            if let Some(value) = current.own_property(name) {
                return Some(value);
            }
            if Rc::ptr_eq(&current, runtime.object_prototype()) {
                return None;
            }
            current = current.prototype(runtime);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    fn object(pairs: Vec<(&str, Value)>) -> Rc<Object> {
        Rc::new(Object::new(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        ))
    }

    #[test]
    fn test_own_property() {
        let o = object(vec![("a", Value::Number(Number::Int(1)))]);
        assert!(o.own_property("a").is_some());
        assert!(o.own_property("b").is_none());
    }

    #[test]
    fn test_property_walks_proto_chain() {
        let runtime = Runtime::new();
        let parent = object(vec![("inherited", Value::Boolean(true))]);
        let child = object(vec![
            ("own", Value::Boolean(true)),
            (PROTO, Value::Object(Rc::clone(&parent))),
        ]);

        assert!(child.property(&runtime, "own").is_some());
        assert!(child.property(&runtime, "inherited").is_some());
        assert!(child.property(&runtime, "missing").is_none());
    }

    #[test]
    fn test_chain_falls_back_to_object_prototype() {
        let runtime = Runtime::new();
        let o = object(vec![]);
        // The object prototype's own words are visible from any plain object.
        assert!(o.property(&runtime, "keys").is_some());
    }

    #[test]
    fn test_lookup_terminates_on_object_prototype() {
        let runtime = Runtime::new();
        let o = object(vec![]);
        assert!(o.property(&runtime, "definitely-not-a-property").is_none());
    }
}
