use thiserror::Error;

fn no_match_message(candidates: &usize) -> &'static str {
    if *candidates > 1 {
        "functions exist, but with different signatures"
    } else {
        "function exists, but with a different signature"
    }
}

/// Everything that can go wrong at registration or dispatch time.
///
/// Structural and per-parameter type mismatches drive candidate fallthrough
/// inside the resolver and never reach callers from a dispatched call; the
/// `BadArguments` and `TypeCheck` variants here surface only from direct,
/// resolution-bypassing handles. A `ResultType` violation is the opposite:
/// it always propagates, because the candidate already matched the call and
/// its body is what misbehaved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("invalid registration: {0}")]
    Registration(String),

    #[error("no overloads registered under '{name}'")]
    UnknownName { name: String },

    #[error("class '{class}' has no overloaded method '{name}'")]
    UnknownMethod { class: String, name: String },

    #[error("'{name}': {}", no_match_message(.candidates))]
    NoMatch { name: String, candidates: usize },

    #[error("no function with id '{id}' under '{name}'")]
    UnknownId { name: String, id: String },

    #[error("'{name}': {detail}")]
    BadArguments { name: String, detail: String },

    #[error("type of argument '{param}' is {actual} and not {expected} in '{name}'")]
    TypeCheck {
        name: String,
        param: String,
        expected: String,
        actual: String,
    },

    #[error("type of result is {actual} and not {expected} in '{name}'")]
    ResultType {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("'{name}' expects a class or instance argument")]
    MissingInvocant { name: String },

    #[error("{0}")]
    Message(String),
}

impl RuntimeError {
    /// Free-form failure raised from inside a candidate body.
    pub fn new(message: impl Into<String>) -> Self {
        RuntimeError::Message(message.into())
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, RuntimeError::NoMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::RuntimeError;

    #[test]
    fn no_match_message_counts_candidates() {
        let one = RuntimeError::NoMatch { name: "foo".to_string(), candidates: 1 };
        assert_eq!(one.to_string(), "'foo': function exists, but with a different signature");
        let many = RuntimeError::NoMatch { name: "foo".to_string(), candidates: 3 };
        assert_eq!(many.to_string(), "'foo': functions exist, but with different signatures");
    }

    #[test]
    fn result_type_message_is_stable() {
        let err = RuntimeError::ResultType {
            name: "foo".to_string(),
            expected: "Str".to_string(),
            actual: "Int".to_string(),
        };
        assert_eq!(err.to_string(), "type of result is Int and not Str in 'foo'");
    }
}
