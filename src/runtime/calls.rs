use super::*;

/// Call-site arguments: positional values plus named values, the shape a
/// dynamic call carries before any parameter binding has happened.
#[derive(Debug, Clone, Default)]
pub struct Args {
    pub(crate) positional: Vec<Value>,
    pub(crate) named: HashMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Args::default()
    }

    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Args { positional: values.into_iter().collect(), named: HashMap::new() }
    }

    pub fn with_named(mut self, name: impl Into<String>, value: Value) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    pub fn push(&mut self, value: Value) {
        self.positional.push(value);
    }
}

/// Why a candidate did not fit a call. Consumed inside the resolution loop;
/// only direct handles ever surface one to the caller.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mismatch {
    Structural(String),
    Type {
        param: String,
        expected: String,
        actual: String,
    },
}

impl Mismatch {
    pub(crate) fn surface(self, name: &str) -> RuntimeError {
        match self {
            Mismatch::Structural(detail) => RuntimeError::BadArguments { name: name.to_string(), detail },
            Mismatch::Type { param, expected, actual } => RuntimeError::TypeCheck {
                name: name.to_string(),
                param,
                expected,
                actual,
            },
        }
    }
}

/// The class object a class-bound call should receive in place of the
/// argument the caller actually passed.
pub(crate) fn class_object_for(value: &Value) -> Value {
    match value {
        Value::Package(name) => Value::Package(name.clone()),
        Value::Instance { class_name, .. } => Value::Package(class_name.clone()),
        Value::Nil => Value::Package("Any".to_string()),
        other => Value::Package(value_type_name(other).to_string()),
    }
}

impl Overloader {
    /// Bind call arguments onto a callable's declared parameters.
    ///
    /// Structural checks always run: arity, unknown keywords, missing
    /// required parameters, a parameter supplied both positionally and by
    /// keyword. Type checks run only when `check_types` is set, and only
    /// for parameters carrying a constraint. On success the returned
    /// vector holds exactly one value per declared parameter.
    pub(crate) fn bind_args(
        &self,
        spec: &FnSpec,
        args: &Args,
        check_types: bool,
    ) -> Result<Vec<Value>, Mismatch> {
        let mut named = args.named.clone();
        let mut bound: Vec<Option<Value>> = vec![None; spec.params.len()];

        let positional_slots: Vec<usize> = spec
            .params
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.named && !p.slurpy && !p.slurpy_named)
            .map(|(i, _)| i)
            .collect();
        let slurpy_slot = spec.params.iter().position(|p| p.slurpy);
        let slurpy_named_slot = spec.params.iter().position(|p| p.slurpy_named);

        let mut pi = 0usize;
        for &slot in &positional_slots {
            if pi >= args.positional.len() {
                break;
            }
            let pname = &spec.params[slot].name;
            if named.contains_key(pname) {
                return Err(Mismatch::Structural(format!(
                    "got multiple values for argument '{}'",
                    pname
                )));
            }
            bound[slot] = Some(args.positional[pi].clone());
            pi += 1;
        }

        if pi < args.positional.len() {
            match slurpy_slot {
                Some(slot) => {
                    bound[slot] = Some(Value::array(args.positional[pi..].to_vec()));
                }
                None => {
                    return Err(Mismatch::Structural("too many positional arguments".to_string()));
                }
            }
        } else if let Some(slot) = slurpy_slot {
            bound[slot] = Some(Value::array(Vec::new()));
        }

        // Keywords may fill any still-empty parameter by name, positional
        // or keyword-only alike.
        for (slot, p) in spec.params.iter().enumerate() {
            if p.slurpy || p.slurpy_named {
                continue;
            }
            if bound[slot].is_none()
                && let Some(v) = named.remove(&p.name)
            {
                bound[slot] = Some(v);
            }
        }

        if let Some(slot) = slurpy_named_slot {
            bound[slot] = Some(Value::hash(std::mem::take(&mut named)));
        } else if !named.is_empty() {
            let mut keys: Vec<&String> = named.keys().collect();
            keys.sort();
            return Err(Mismatch::Structural(format!(
                "got an unexpected keyword argument '{}'",
                keys[0]
            )));
        }

        let mut out = Vec::with_capacity(spec.params.len());
        for (slot, p) in spec.params.iter().enumerate() {
            match bound[slot].take() {
                Some(v) => out.push(v),
                None => match &p.default {
                    Some(d) => out.push(d.clone()),
                    None => {
                        debug_assert!(p.is_required());
                        return Err(Mismatch::Structural(format!(
                            "missing a required argument: '{}'",
                            p.name
                        )));
                    }
                },
            }
        }

        if check_types {
            for (p, v) in spec.params.iter().zip(&out) {
                let Some(constraint) = &p.type_constraint else {
                    continue;
                };
                let ok = if p.slurpy {
                    match v {
                        Value::Array(items) => items.iter().all(|e| self.type_matches_value(constraint, e)),
                        _ => false,
                    }
                } else if p.slurpy_named {
                    match v {
                        Value::Hash(map) => map.values().all(|e| self.type_matches_value(constraint, e)),
                        _ => false,
                    }
                } else {
                    self.type_matches_value(constraint, v)
                };
                if !ok {
                    return Err(Mismatch::Type {
                        param: p.name.clone(),
                        expected: constraint.clone(),
                        actual: value_type_name(v).to_string(),
                    });
                }
            }
        }

        Ok(out)
    }

    /// Rewrite the call for the entry's binding kind before binding.
    ///
    /// Plain and static entries pass arguments through unchanged. A
    /// class-bound entry locates its class-or-instance argument (first
    /// positional, or the keyword matching its first declared parameter)
    /// and replaces it with the class object.
    pub(crate) fn adapt_for_binding(
        &self,
        spec: &FnSpec,
        binding: BindingKind,
        args: &Args,
    ) -> Result<Args, Mismatch> {
        match binding {
            BindingKind::Plain | BindingKind::StaticBound => Ok(args.clone()),
            BindingKind::ClassBound => {
                // Registration guarantees a first parameter exists.
                let invocant = spec.first_param_name().unwrap_or("cls").to_string();
                let mut adapted = args.clone();
                if let Some(v) = adapted.named.get_mut(&invocant) {
                    *v = class_object_for(v);
                } else if let Some(first) = adapted.positional.first_mut() {
                    *first = class_object_for(first);
                } else {
                    return Err(Mismatch::Structural(format!(
                        "missing a required argument: '{}'",
                        invocant
                    )));
                }
                Ok(adapted)
            }
        }
    }
}
