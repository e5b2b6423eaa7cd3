//! Best-effort typed reads over stored values.
//!
//! Every accessor returns `None` both when the path does not resolve and when
//! the stored value cannot be coerced; callers cannot tell the two apart.
//!
//! | Accessor | Accepts |
//! |---|---|
//! | `int`, `int64` | `Int`, `Float` (truncated), decimal `String` |
//! | `float` | `Float`, `Int`, numeric `String` |
//! | `bool` | `Bool`, `"true"`/`"false"` |
//! | `string` | `String` only |
//! | `strings`, `ints`, `floats` | the matching homogeneous list kind only |

use super::Tree;
use crate::Value;

impl Tree {
    pub fn int64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Int(i) => Some(i),
            Value::Float(f) => Some(f as i64),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Like [`Tree::int64`], narrowed to `i32`.
    ///
    /// Values outside the `i32` range yield `None` rather than wrapping; use
    /// [`Tree::int64`] for the full range.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.int64(key).and_then(|i| i32::try_from(i).ok())
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Float(f) => Some(f),
            Value::Int(i) => Some(i as f64),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Returns the stored string. Other kinds are not converted.
    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a stored `Strings` list.
    ///
    /// A generic `List` is never accepted, even when every element is a string.
    pub fn strings(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            Value::Strings(items) => Some(items),
            _ => None,
        }
    }

    pub fn ints(&self, key: &str) -> Option<Vec<i64>> {
        match self.get(key)? {
            Value::Ints(items) => Some(items),
            _ => None,
        }
    }

    pub fn floats(&self, key: &str) -> Option<Vec<f64>> {
        match self.get(key)? {
            Value::Floats(items) => Some(items),
            _ => None,
        }
    }
}
