use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::BigInt;
use num_traits::ToPrimitive;

mod display;
mod error;
pub mod signature;

pub use error::RuntimeError;

static INSTANCE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_instance_id() -> u64 {
    INSTANCE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A dynamically typed runtime value. Dispatch inspects these, never the
/// static types of the host program.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    BigInt(BigInt),
    Num(f64),
    Str(String),
    Bool(bool),
    Array(Vec<Value>),
    Hash(HashMap<String, Value>),
    /// A class object: the type itself, as opposed to an instance of it.
    Package(String),
    Instance {
        class_name: String,
        attributes: Arc<HashMap<String, Value>>,
        id: u64,
    },
    Nil,
}

impl Value {
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(items)
    }

    pub fn hash(map: HashMap<String, Value>) -> Value {
        Value::Hash(map)
    }

    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    pub fn make_instance(class_name: impl Into<String>, attributes: HashMap<String, Value>) -> Value {
        Value::Instance {
            class_name: class_name.into(),
            attributes: Arc::new(attributes),
            id: next_instance_id(),
        }
    }

    /// Canonicalize a big integer down to `Int` when it fits in an i64.
    pub fn from_bigint(n: BigInt) -> Value {
        match n.to_i64() {
            Some(small) => Value::Int(small),
            None => Value::BigInt(n),
        }
    }

    /// Attribute lookup on an instance; `None` for anything else.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Instance { attributes, .. } => attributes.get(name),
            _ => None,
        }
    }
}

/// The runtime type name a constraint is checked against.
pub fn value_type_name(value: &Value) -> &str {
    match value {
        Value::Int(_) | Value::BigInt(_) => "Int",
        Value::Num(_) => "Num",
        Value::Str(_) => "Str",
        Value::Bool(_) => "Bool",
        Value::Array(_) => "Array",
        Value::Hash(_) => "Hash",
        Value::Package(_) => "Package",
        Value::Instance { class_name, .. } => class_name,
        Value::Nil => "Nil",
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            // Int and BigInt denote the same value space; compare numerically.
            (Value::Int(a), Value::BigInt(b)) | (Value::BigInt(b), Value::Int(a)) => {
                b.to_i64() == Some(*a)
            }
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Package(a), Value::Package(b)) => a == b,
            (Value::Instance { id: a, .. }, Value::Instance { id: b, .. }) => a == b,
            (Value::Nil, Value::Nil) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bigint_canonicalizes_to_int() {
        assert_eq!(Value::from_bigint(BigInt::from(42)), Value::Int(42));
        let huge = BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        assert!(matches!(Value::from_bigint(huge), Value::BigInt(_)));
    }

    #[test]
    fn int_and_bigint_compare_numerically() {
        assert_eq!(Value::Int(7), Value::BigInt(BigInt::from(7)));
        assert_ne!(Value::Int(7), Value::BigInt(BigInt::from(8)));
    }

    #[test]
    fn instances_compare_by_identity() {
        let a = Value::make_instance("A", HashMap::new());
        let b = Value::make_instance("A", HashMap::new());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn type_names() {
        assert_eq!(value_type_name(&Value::Int(1)), "Int");
        assert_eq!(value_type_name(&Value::BigInt(BigInt::from(1))), "Int");
        assert_eq!(value_type_name(&Value::Num(1.5)), "Num");
        assert_eq!(value_type_name(&Value::make_instance("Dog", HashMap::new())), "Dog");
    }
}
