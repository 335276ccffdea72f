use std::sync::Arc;

use super::{RuntimeError, Value};

/// Native implementation of an overload candidate. Bodies receive one value
/// per declared parameter, in declaration order, with defaults already
/// filled and variadic slots collected into `Array`/`Hash`.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync>;

/// Declared shape of one parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub(crate) name: String,
    pub(crate) type_constraint: Option<String>,
    pub(crate) named: bool,
    pub(crate) slurpy: bool,
    pub(crate) slurpy_named: bool,
    pub(crate) default: Option<Value>,
}

impl ParamSpec {
    fn bare(name: impl Into<String>) -> Self {
        ParamSpec {
            name: name.into(),
            type_constraint: None,
            named: false,
            slurpy: false,
            slurpy_named: false,
            default: None,
        }
    }

    /// Required positional parameter with no type constraint.
    pub fn pos(name: impl Into<String>) -> Self {
        Self::bare(name)
    }

    /// Required positional parameter constrained to the given type name.
    pub fn typed(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        let mut p = Self::bare(name);
        p.type_constraint = Some(constraint.into());
        p
    }

    /// Keyword-only parameter.
    pub fn named(name: impl Into<String>) -> Self {
        let mut p = Self::bare(name);
        p.named = true;
        p
    }

    /// Keyword-only parameter constrained to the given type name.
    pub fn named_typed(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        let mut p = Self::named(name);
        p.type_constraint = Some(constraint.into());
        p
    }

    /// Variadic positional catch-all; bound as an `Array`.
    pub fn slurpy(name: impl Into<String>) -> Self {
        let mut p = Self::bare(name);
        p.slurpy = true;
        p
    }

    /// Variadic keyword catch-all; bound as a `Hash`.
    pub fn slurpy_named(name: impl Into<String>) -> Self {
        let mut p = Self::bare(name);
        p.slurpy_named = true;
        p
    }

    /// Attach a default value, making the parameter optional.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_required(&self) -> bool {
        self.default.is_none() && !self.slurpy && !self.slurpy_named
    }

    fn render(&self) -> String {
        let mut out = String::new();
        if self.slurpy {
            out.push('*');
        } else if self.slurpy_named {
            out.push_str("**");
        }
        if let Some(tc) = &self.type_constraint {
            out.push_str(tc);
            out.push(' ');
        }
        if self.named {
            out.push(':');
        }
        out.push_str(&self.name);
        if self.default.is_some() {
            out.push('?');
        }
        out
    }
}

/// A callable plus the declaration descriptor dispatch works from.
///
/// Built once at registration; dispatch never reinspects anything per call.
#[derive(Clone)]
pub struct FnSpec {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) return_type: Option<String>,
    pub(crate) body: NativeFn,
}

impl FnSpec {
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = ParamSpec>,
        body: impl Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    ) -> Self {
        FnSpec {
            name: name.into(),
            params: params.into_iter().collect(),
            return_type: None,
            body: Arc::new(body),
        }
    }

    /// Declare the return type; violations surface as result-type errors,
    /// never as dispatch fallthrough.
    pub fn returning(mut self, constraint: impl Into<String>) -> Self {
        self.return_type = Some(constraint.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Count of type-constrained parameters; the resolution sort key.
    pub fn specificity(&self) -> usize {
        self.params.iter().filter(|p| p.type_constraint.is_some()).count()
    }

    pub(crate) fn first_param_name(&self) -> Option<&str> {
        self.params.first().map(|p| p.name.as_str())
    }

    pub(crate) fn render(&self) -> String {
        let parts: Vec<String> = self.params.iter().map(|p| p.render()).collect();
        match &self.return_type {
            Some(ret) => format!("{}({}) --> {}", self.name, parts.join(", "), ret),
            None => format!("{}({})", self.name, parts.join(", ")),
        }
    }
}

impl std::fmt::Debug for FnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSpec")
            .field("signature", &self.render())
            .finish_non_exhaustive()
    }
}
