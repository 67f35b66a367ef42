//! String prototype words
//!
//! Every word follows the shared prototype contract: it takes a string (and
//! possibly further operands) from the top of the stack and gives either the
//! original plus a derived result (query and extraction words) or just the
//! result (transformation words). On a type mismatch or a failed
//! precondition the word stores the appropriate error and performs no stack
//! manipulation beyond the pops that already succeeded.
//!
//! Words that extract substrings (`trim`, `words`, `lines`) push slice nodes
//! over the original rope, and `+` pushes a concat node, so none of them
//! copy character data. Only the words that must produce new characters
//! (`reverse`, the case conversions, `*`) allocate fresh buffers.

use std::rc::Rc;

use crate::context::Context;
use crate::error::ErrorCode;
use crate::rope::Rope;
use crate::runtime::PrototypeDefinition;
use crate::unicode;
use crate::value::{Number, Value, is_number_literal};

/// Words installed on the string prototype.
pub fn definition() -> PrototypeDefinition {
    &[
        ("length", length),
        ("chars", chars),
        ("runes", runes),
        ("words", words),
        ("lines", lines),
        // Tests.
        ("space?", is_space),
        ("lower-case?", is_lower_case),
        ("upper-case?", is_upper_case),
        // Conversions.
        ("reverse", reverse),
        ("upper-case", upper_case),
        ("lower-case", lower_case),
        ("swap-case", swap_case),
        ("capitalize", capitalize),
        ("trim", trim),
        ("trim-left", trim_left),
        ("trim-right", trim_right),
        (">number", to_number),
        ("+", concat),
        ("*", repeat),
        ("@", get),
    ]
}

/// Returns the length of the string.
///
/// Stack effect: ( string -- string number )
fn length(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len() as i64;

        ctx.push(Value::String(s));
        ctx.push_int(len);
    }
}

/// Tests whether the string contains only whitespace. Empty strings give
/// false.
///
/// Stack effect: ( string -- string boolean )
fn is_space(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result = !s.is_empty() && s.chars().all(unicode::is_space);

        ctx.push(Value::String(s));
        ctx.push_boolean(result);
    }
}

/// Tests whether the string contains only lower case codepoints. Empty
/// strings give false.
///
/// Stack effect: ( string -- string boolean )
fn is_lower_case(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result = !s.is_empty() && s.chars().all(unicode::is_lower);

        ctx.push(Value::String(s));
        ctx.push_boolean(result);
    }
}

/// Tests whether the string contains only upper case codepoints. Empty
/// strings give false.
///
/// Stack effect: ( string -- string boolean )
fn is_upper_case(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result = !s.is_empty() && s.chars().all(unicode::is_upper);

        ctx.push(Value::String(s));
        ctx.push_boolean(result);
    }
}

/// Extracts the characters of the string as an array of one-codepoint
/// strings.
///
/// Stack effect: ( string -- string array )
fn chars(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let output: Vec<Value> = s
            .chars()
            .map(|c| Value::String(Rope::from_chars(&[c])))
            .collect();

        ctx.push(Value::String(s));
        ctx.push_array(output);
    }
}

/// Extracts the Unicode codepoints of the string as an array of numbers.
///
/// Stack effect: ( string -- string array )
fn runes(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let output: Vec<Value> = s
            .chars()
            .map(|c| Value::Number(Number::Int(c as i64)))
            .collect();

        ctx.push(Value::String(s));
        ctx.push_array(output);
    }
}

/// Extracts whitespace-separated words from the string. Runs of whitespace
/// are treated as single separators and contribute no empty entries.
///
/// Stack effect: ( string -- string array )
fn words(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len();
        let mut begin = 0;
        let mut end = 0;
        let mut result = Vec::new();

        for i in 0..len {
            if unicode::is_space(s.at(i)) {
                if end > begin {
                    result.push(Value::String(Rope::slice(&s, begin, end - begin)));
                }
                begin = i + 1;
                end = i + 1;
            } else {
                end += 1;
            }
        }
        if end > begin {
            result.push(Value::String(Rope::slice(&s, begin, end - begin)));
        }

        ctx.push(Value::String(s));
        ctx.push_array(result);
    }
}

/// Extracts lines from the string, splitting on `\r\n`, `\n` or `\r`. A
/// separator at the very end does not contribute a trailing empty line.
///
/// Stack effect: ( string -- string array )
fn lines(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len();
        let mut begin = 0;
        let mut end = 0;
        let mut result = Vec::new();
        let mut i = 0;

        while i < len {
            let c = s.at(i);

            if i + 1 < len && c == '\r' && s.at(i + 1) == '\n' {
                result.push(Value::String(Rope::slice(&s, begin, end - begin)));
                i += 1;
                begin = i + 1;
                end = i + 1;
            } else if c == '\n' || c == '\r' {
                result.push(Value::String(Rope::slice(&s, begin, end - begin)));
                begin = i + 1;
                end = i + 1;
            } else {
                end += 1;
            }
            i += 1;
        }
        if end > begin {
            result.push(Value::String(Rope::slice(&s, begin, end - begin)));
        }

        ctx.push(Value::String(s));
        ctx.push_array(result);
    }
}

/// Reverses the string codepoint by codepoint.
///
/// Stack effect: ( string -- string )
fn reverse(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len();
        let mut result = Vec::with_capacity(len);

        for i in (0..len).rev() {
            result.push(s.at(i));
        }
        ctx.push_string_chars(&result);
    }
}

/// Converts the string into upper case.
///
/// Stack effect: ( string -- string )
fn upper_case(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result: Vec<char> = s.chars().map(unicode::to_upper).collect();

        ctx.push_string_chars(&result);
    }
}

/// Converts the string into lower case.
///
/// Stack effect: ( string -- string )
fn lower_case(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result: Vec<char> = s.chars().map(unicode::to_lower).collect();

        ctx.push_string_chars(&result);
    }
}

/// Turns lower case codepoints into upper case and vice versa.
///
/// Stack effect: ( string -- string )
fn swap_case(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result: Vec<char> = s
            .chars()
            .map(|c| {
                if unicode::is_lower(c) {
                    unicode::to_upper(c)
                } else {
                    unicode::to_lower(c)
                }
            })
            .collect();

        ctx.push_string_chars(&result);
    }
}

/// Upper-cases the first codepoint and lower-cases the rest.
///
/// Stack effect: ( string -- string )
fn capitalize(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let result: Vec<char> = s
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i == 0 {
                    unicode::to_upper(c)
                } else {
                    unicode::to_lower(c)
                }
            })
            .collect();

        ctx.push_string_chars(&result);
    }
}

/// Strips whitespace from both ends of the string. When there is nothing to
/// strip the original value is pushed back untouched.
///
/// Stack effect: ( string -- string )
fn trim(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len();
        let mut i = 0;
        let mut j = len;

        while i < len && unicode::is_space(s.at(i)) {
            i += 1;
        }
        while j > i && unicode::is_space(s.at(j - 1)) {
            j -= 1;
        }
        if i == 0 && j == len {
            ctx.push(Value::String(s));
        } else {
            ctx.push(Value::String(Rope::slice(&s, i, j - i)));
        }
    }
}

/// Strips whitespace from the beginning of the string.
///
/// Stack effect: ( string -- string )
fn trim_left(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len();
        let mut i = 0;

        while i < len && unicode::is_space(s.at(i)) {
            i += 1;
        }
        if i == 0 {
            ctx.push(Value::String(s));
        } else {
            ctx.push(Value::String(Rope::slice(&s, i, len - i)));
        }
    }
}

/// Strips whitespace from the end of the string.
///
/// Stack effect: ( string -- string )
fn trim_right(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let len = s.len();
        let mut j = len;

        while j > 0 && unicode::is_space(s.at(j - 1)) {
            j -= 1;
        }
        if j == len {
            ctx.push(Value::String(s));
        } else {
            ctx.push(Value::String(Rope::slice(&s, 0, j)));
        }
    }
}

/// Converts the string into a number, or stores a value error when the text
/// does not parse as one.
///
/// Stack effect: ( string -- number )
fn to_number(ctx: &mut Context) {
    if let Some(s) = ctx.pop_string() {
        let text = s.flatten();

        if is_number_literal(&text) {
            ctx.push_number(&text);
        } else {
            ctx.set_error(ErrorCode::Value, "Could not convert string to number.");
        }
    }
}

/// Concatenates two strings. An empty operand short-circuits to the other
/// one; otherwise the result is a concat node sharing both operands.
///
/// Stack effect: ( string string -- string )
fn concat(ctx: &mut Context) {
    let Some(rhs) = ctx.pop_string() else { return };
    let Some(lhs) = ctx.pop_string() else { return };

    if rhs.is_empty() {
        ctx.push(Value::String(lhs));
    } else if lhs.is_empty() {
        ctx.push(Value::String(rhs));
    } else {
        ctx.push(Value::String(Rope::concat(lhs, rhs)));
    }
}

/// Repeats the string. A real count truncates to an integer and a negative
/// count repeats by its absolute value.
///
/// Stack effect: ( string number -- string )
fn repeat(ctx: &mut Context) {
    let Some(count) = ctx.pop_number() else {
        return;
    };
    let Some(s) = ctx.pop_string() else { return };

    let len = s.len();
    let count = count.as_int().unsigned_abs() as usize;
    let mut result = Vec::with_capacity(len * count);

    for _ in 0..count {
        for i in 0..len {
            result.push(s.at(i));
        }
    }
    ctx.push_string_chars(&result);
}

/// Retrieves the character at the given index. Negative indices count
/// backwards from the end. An index out of bounds stores a range error and
/// leaves the string on the stack.
///
/// Stack effect: ( string number -- string string )
fn get(ctx: &mut Context) {
    let Some(index) = ctx.pop_number() else {
        return;
    };
    let Some(s) = ctx.pop_string() else { return };

    let len = s.len();
    let mut index = index.as_int();

    if index < 0 {
        index += len as i64;
    }

    ctx.push(Value::String(Rc::clone(&s)));

    if index < 0 || index >= len as i64 {
        ctx.set_error(ErrorCode::Range, "String index out of bounds.");
        return;
    }

    let c = s.at(index as usize);
    ctx.push_string_chars(&[c]);
}
