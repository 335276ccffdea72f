use super::*;

use tracing::debug;

/// A method declaration captured while a class body is being assembled.
/// A bare `FnSpec` converts to `Plain`, so registration tolerates plain
/// functions and pre-wrapped class-bound/static-bound ones alike without
/// touching the wrapped callable.
pub enum MethodDecl {
    Plain(FnSpec),
    ClassBound(FnSpec),
    StaticBound(FnSpec),
}

impl From<FnSpec> for MethodDecl {
    fn from(f: FnSpec) -> Self {
        MethodDecl::Plain(f)
    }
}

impl MethodDecl {
    pub fn class_bound(f: FnSpec) -> Self {
        MethodDecl::ClassBound(f)
    }

    pub fn static_bound(f: FnSpec) -> Self {
        MethodDecl::StaticBound(f)
    }

    fn into_parts(self) -> (FnSpec, BindingKind) {
        match self {
            MethodDecl::Plain(f) => (f, BindingKind::Plain),
            MethodDecl::ClassBound(f) => (f, BindingKind::ClassBound),
            MethodDecl::StaticBound(f) => (f, BindingKind::StaticBound),
        }
    }
}

impl Overloader {
    /// Register a function under its own name. The returned `Arc` is the
    /// stored one, so callers can verify identity with `Arc::ptr_eq`.
    pub fn register(&mut self, f: FnSpec) -> Result<Arc<FnSpec>, RuntimeError> {
        self.register_entry(None, f)
    }

    /// Register a function addressable later via `with_id`.
    pub fn register_with_id(&mut self, id: impl Into<String>, f: FnSpec) -> Result<Arc<FnSpec>, RuntimeError> {
        self.register_entry(Some(checked_id(id)?), f)
    }

    fn register_entry(&mut self, id: Option<String>, f: FnSpec) -> Result<Arc<FnSpec>, RuntimeError> {
        if !self.pending_methods.is_empty() {
            return Err(RuntimeError::Registration(format!(
                "cannot register function '{}' while {} method(s) await a class registration",
                f.name(),
                self.pending_methods.len()
            )));
        }
        let spec = Arc::new(f);
        let entry = CandidateEntry {
            specificity: spec.specificity(),
            spec: spec.clone(),
            id,
            owner_class: None,
            binding: BindingKind::Plain,
        };
        self.functions.get_or_insert(spec.name()).add(entry);
        Ok(spec)
    }

    /// Mark a method for the next class registration. Nothing is
    /// dispatchable until `register_class` drains the pending buffer.
    pub fn register_method(&mut self, m: impl Into<MethodDecl>) -> Result<Arc<FnSpec>, RuntimeError> {
        self.register_method_entry(None, m.into())
    }

    pub fn register_method_with_id(
        &mut self,
        id: impl Into<String>,
        m: impl Into<MethodDecl>,
    ) -> Result<Arc<FnSpec>, RuntimeError> {
        self.register_method_entry(Some(checked_id(id)?), m.into())
    }

    fn register_method_entry(&mut self, id: Option<String>, decl: MethodDecl) -> Result<Arc<FnSpec>, RuntimeError> {
        let (f, binding) = decl.into_parts();
        if binding == BindingKind::ClassBound && f.first_param_name().is_none() {
            return Err(RuntimeError::Registration(format!(
                "class-bound method '{}' declares no parameters",
                f.name()
            )));
        }
        let spec = Arc::new(f);
        self.pending_methods.push(PendingMethod { id, spec: spec.clone(), binding });
        Ok(spec)
    }

    /// Register a class: validate its parents, then bind every pending
    /// method to it. The pending buffer is cleared even when it is empty,
    /// so interleaving two class bodies is not supported (single-threaded
    /// registration assumed).
    pub fn register_class(&mut self, class: ClassDef) -> Result<Arc<ClassDef>, RuntimeError> {
        for parent in &class.parents {
            if parent == &class.name {
                return Err(RuntimeError::Registration(format!(
                    "class '{}' cannot inherit from itself",
                    class.name
                )));
            }
            if !self.classes.contains_key(parent) {
                return Err(RuntimeError::Registration(format!(
                    "class '{}' specifies unknown parent class '{}'",
                    class.name, parent
                )));
            }
        }
        let class = Arc::new(class);
        self.classes.insert(class.name.clone(), class.clone());
        let drained = std::mem::take(&mut self.pending_methods);
        debug!(class = %class.name, methods = drained.len(), "registered class");
        let ns = self.methods.entry(class.name.clone()).or_default();
        for pm in drained {
            let entry = CandidateEntry {
                specificity: pm.spec.specificity(),
                spec: pm.spec.clone(),
                id: pm.id,
                owner_class: Some(class.name.clone()),
                binding: pm.binding,
            };
            ns.get_or_insert(pm.spec.name()).add(entry);
        }
        Ok(class)
    }
}

fn checked_id(id: impl Into<String>) -> Result<String, RuntimeError> {
    let id = id.into();
    if id.is_empty() {
        return Err(RuntimeError::Registration("overload id must not be empty".to_string()));
    }
    Ok(id)
}
