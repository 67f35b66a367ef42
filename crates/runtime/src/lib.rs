//! Plorth Runtime: an embeddable concatenative language core
//!
//! Key design principles:
//! - Value: What the language talks about (null, boolean, number, string, ...)
//! - Rope: Strings are lazy trees (simple / concat / slice) with O(1)
//!   concatenation and slicing
//! - Context: Per-evaluation state (data stack + dictionary + error slot);
//!   built-in words report failure through the error slot, never by panicking
//! - Runtime: Process-wide registry (global dictionary + per-type prototypes)
//!
//! Execution is strictly single-threaded; values are shared with `Rc` and are
//! immutable after construction, so the value graph stays acyclic and plain
//! reference counting reclaims everything.

pub mod array_ops;
pub mod boolean_ops;
pub mod context;
pub mod error;
pub mod error_ops;
pub mod exec;
pub mod globals;
pub mod json;
pub mod number_ops;
pub mod object;
pub mod object_ops;
pub mod quote;
pub mod quote_ops;
pub mod rope;
pub mod runtime;
pub mod string_ops;
pub mod symbol_ops;
pub mod unicode;
pub mod value;
pub mod word_ops;

// Re-export key types and functions
pub use context::Context;
pub use error::{ErrorCode, ErrorValue};
pub use exec::{exec, invoke};
pub use json::{JsonError, from_json, to_json};
pub use object::Object;
pub use quote::{NativeWord, Quote, Word};
pub use rope::Rope;
pub use runtime::Runtime;
pub use value::{Number, Position, Symbol, Value, ValueType};
