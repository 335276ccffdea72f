use super::*;

/// Nominal check of a constraint name against a runtime type name.
/// Registered-class ancestry is handled separately by the value check.
pub(crate) fn type_matches(constraint: &str, value_type: &str) -> bool {
    if constraint == "Any" || constraint == "Mu" {
        return true;
    }
    if constraint == value_type {
        return true;
    }
    if constraint == "Numeric" && matches!(value_type, "Int" | "Num") {
        return true;
    }
    if constraint == "Real" && matches!(value_type, "Int" | "Num") {
        return true;
    }
    if constraint == "Cool" && matches!(value_type, "Int" | "Num" | "Str" | "Bool") {
        return true;
    }
    if constraint == "Stringy" && value_type == "Str" {
        return true;
    }
    false
}

/// Split `Base[Inner]` into its parts; `None` for plain constraints.
pub(crate) fn parse_generic_constraint(constraint: &str) -> Option<(&str, &str)> {
    let open = constraint.find('[')?;
    if open == 0 || !constraint.ends_with(']') {
        return None;
    }
    let base = &constraint[..open];
    let inner = &constraint[open + 1..constraint.len() - 1];
    if base.is_empty() || inner.is_empty() {
        return None;
    }
    Some((base, inner))
}

impl Overloader {
    /// Does `value` satisfy the declared constraint?
    pub(crate) fn type_matches_value(&self, constraint: &str, value: &Value) -> bool {
        if let Some((base, inner)) = parse_generic_constraint(constraint) {
            return match base {
                "Array" => match value {
                    Value::Array(items) => items.iter().all(|v| self.type_matches_value(inner, v)),
                    _ => false,
                },
                "Hash" => match value {
                    Value::Hash(map) => map.values().all(|v| self.type_matches_value(inner, v)),
                    _ => false,
                },
                // Parameterized constraints we cannot check structurally are
                // accepted rather than rejected.
                _ => true,
            };
        }
        match value {
            Value::Package(name) => self.isa(name, constraint),
            Value::Instance { class_name, .. } => self.isa(class_name, constraint),
            // Dispatch-time numeric widening: an Int argument satisfies Num.
            Value::Int(_) | Value::BigInt(_) if constraint == "Num" => true,
            _ => type_matches(constraint, value_type_name(value)),
        }
    }

    /// Class-or-ancestor check for instances and class objects.
    fn isa(&self, class_name: &str, constraint: &str) -> bool {
        self.class_ancestry(class_name)
            .iter()
            .any(|c| type_matches(constraint, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use num_bigint::BigInt;
    use std::collections::HashMap;

    #[test]
    fn wildcard_and_exact_names() {
        assert!(type_matches("Any", "Str"));
        assert!(type_matches("Mu", "Nil"));
        assert!(type_matches("Int", "Int"));
        assert!(!type_matches("Int", "Str"));
        assert!(!type_matches("NoSuchType", "Str"));
    }

    #[test]
    fn abstract_supertypes() {
        assert!(type_matches("Numeric", "Int"));
        assert!(type_matches("Numeric", "Num"));
        assert!(type_matches("Real", "Num"));
        assert!(type_matches("Cool", "Bool"));
        assert!(type_matches("Stringy", "Str"));
        assert!(!type_matches("Stringy", "Int"));
    }

    #[test]
    fn numeric_widening_applies_to_values() {
        let ov = Overloader::new();
        assert!(ov.type_matches_value("Num", &Value::Int(3)));
        assert!(ov.type_matches_value("Num", &Value::BigInt(BigInt::from(3))));
        assert!(!ov.type_matches_value("Int", &Value::Num(3.0)));
    }

    #[test]
    fn parameterized_constraints() {
        let ov = Overloader::new();
        let ints = Value::array(vec![Value::Int(1), Value::Int(2)]);
        let mixed = Value::array(vec![Value::Int(1), Value::str("x")]);
        assert!(ov.type_matches_value("Array[Int]", &ints));
        assert!(!ov.type_matches_value("Array[Int]", &mixed));
        assert!(!ov.type_matches_value("Array[Int]", &Value::Int(1)));
        // Unknown base: permissive.
        assert!(ov.type_matches_value("Seq[Int]", &Value::Int(1)));
    }

    #[test]
    fn instance_ancestry_satisfies_parent_constraints() {
        let mut ov = Overloader::new();
        ov.register_class(ClassDef::new("Animal")).unwrap();
        ov.register_class(ClassDef::extending("Dog", ["Animal"])).unwrap();
        let dog = Value::make_instance("Dog", HashMap::new());
        assert!(ov.type_matches_value("Dog", &dog));
        assert!(ov.type_matches_value("Animal", &dog));
        assert!(ov.type_matches_value("Any", &dog));
        assert!(!ov.type_matches_value("Cat", &dog));
        assert!(ov.type_matches_value("Animal", &Value::Package("Dog".to_string())));
    }
}
