use super::Value;

impl Value {
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::BigInt(n) => n.to_string(),
            Value::Num(n) => {
                if n.is_nan() {
                    "NaN".to_string()
                } else if n.is_infinite() {
                    if *n > 0.0 { "Inf".to_string() } else { "-Inf".to_string() }
                } else {
                    n.to_string()
                }
            }
            Value::Str(s) => s.clone(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string_value()).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Hash(map) => {
                // Sorted so rendering is stable across runs.
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let parts: Vec<String> = keys
                    .iter()
                    .map(|k| format!("{} => {}", k, map[*k].to_string_value()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Package(name) => format!("({})", name),
            Value::Instance { class_name, .. } => format!("{}.new", class_name),
            Value::Nil => String::new(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}
