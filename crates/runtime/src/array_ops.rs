//! Array prototype words
//!
//! Same stack discipline as the string words: queries give back the
//! original array plus the result, transformations give the result.

use std::rc::Rc;

use crate::context::Context;
use crate::error::ErrorCode;
use crate::runtime::PrototypeDefinition;
use crate::value::Value;

/// Words installed on the array prototype.
pub fn definition() -> PrototypeDefinition {
    &[
        ("length", length),
        ("reverse", reverse),
        ("+", concat),
        ("@", get),
    ]
}

/// Returns the number of elements in the array.
///
/// Stack effect: ( array -- array number )
fn length(ctx: &mut Context) {
    if let Some(array) = ctx.pop_array() {
        let len = array.len() as i64;

        ctx.push(Value::Array(array));
        ctx.push_int(len);
    }
}

/// Reverses the array.
///
/// Stack effect: ( array -- array )
fn reverse(ctx: &mut Context) {
    if let Some(array) = ctx.pop_array() {
        let reversed: Vec<Value> = array.iter().rev().cloned().collect();

        ctx.push_array(reversed);
    }
}

/// Concatenates two arrays.
///
/// Stack effect: ( array array -- array )
fn concat(ctx: &mut Context) {
    let Some(rhs) = ctx.pop_array() else { return };
    let Some(lhs) = ctx.pop_array() else { return };

    let combined: Vec<Value> = lhs.iter().chain(rhs.iter()).cloned().collect();

    ctx.push_array(combined);
}

/// Retrieves the element at the given index. Negative indices count
/// backwards from the end; an index out of bounds stores a range error and
/// leaves the array on the stack.
///
/// Stack effect: ( array number -- array value )
fn get(ctx: &mut Context) {
    let Some(index) = ctx.pop_number() else {
        return;
    };
    let Some(array) = ctx.pop_array() else { return };

    let len = array.len();
    let mut index = index.as_int();

    if index < 0 {
        index += len as i64;
    }

    ctx.push(Value::Array(Rc::clone(&array)));

    if index < 0 || index >= len as i64 {
        ctx.set_error(ErrorCode::Range, "Array index out of bounds.");
        return;
    }

    ctx.push(array[index as usize].clone());
}
