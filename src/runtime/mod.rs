use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::value::signature::FnSpec;
use crate::value::{RuntimeError, Value, value_type_name};

mod calls;
mod dispatch;
mod registration;
pub(crate) mod types;

pub use calls::Args;
pub use dispatch::{Handle, OverloadSet};
pub use registration::MethodDecl;

use dispatch::CandidateEntry;

/// How a method entry treats its implicit first argument when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Arguments pass through unchanged; the first one is conventionally
    /// the instance.
    Plain,
    /// The class-or-instance argument is replaced by the class object
    /// before binding.
    ClassBound,
    /// No implicit first argument.
    StaticBound,
}

/// A dynamically registered class: a name plus already-registered parents.
/// Parents feed the ancestry walk behind instance type checks.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub(crate) name: String,
    pub(crate) parents: Vec<String>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef { name: name.into(), parents: Vec::new() }
    }

    pub fn extending(name: impl Into<String>, parents: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ClassDef {
            name: name.into(),
            parents: parents.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Name-to-overload-set mapping. Entries materialize on first registration;
/// dispatch only ever reads.
#[derive(Default)]
pub(crate) struct Namespace {
    sets: HashMap<String, OverloadSet>,
}

impl Namespace {
    pub(crate) fn get(&self, name: &str) -> Option<&OverloadSet> {
        self.sets.get(name)
    }

    pub(crate) fn get_or_insert(&mut self, name: &str) -> &mut OverloadSet {
        self.sets.entry(name.to_string()).or_default()
    }
}

pub(crate) struct PendingMethod {
    pub(crate) id: Option<String>,
    pub(crate) spec: Arc<FnSpec>,
    pub(crate) binding: BindingKind,
}

/// The dispatch facade: plain functions in one namespace, class-scoped
/// methods in another, plus the pending buffer for two-phase class
/// registration. Instances share nothing; `global()` is only a convenience.
pub struct Overloader {
    pub(crate) functions: Namespace,
    pub(crate) methods: HashMap<String, Namespace>,
    pub(crate) classes: HashMap<String, Arc<ClassDef>>,
    pub(crate) pending_methods: Vec<PendingMethod>,
}

impl Overloader {
    pub fn new() -> Self {
        Overloader {
            functions: Namespace::default(),
            methods: HashMap::new(),
            classes: HashMap::new(),
            pending_methods: Vec::new(),
        }
    }

    pub fn overloads(&self, name: &str) -> Option<&OverloadSet> {
        self.functions.get(name)
    }

    pub fn method_overloads(&self, class: &str, name: &str) -> Option<&OverloadSet> {
        self.methods.get(class).and_then(|ns| ns.get(name))
    }

    pub fn is_registered_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// The class and its transitive parents, nearest first, deduplicated.
    pub(crate) fn class_ancestry(&self, class_name: &str) -> Vec<String> {
        let mut out = vec![class_name.to_string()];
        let mut i = 0;
        while i < out.len() {
            if let Some(def) = self.classes.get(&out[i]) {
                for parent in &def.parents {
                    if !out.iter().any(|c| c == parent) {
                        out.push(parent.clone());
                    }
                }
            }
            i += 1;
        }
        out
    }
}

impl Default for Overloader {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide convenience registry. Purely optional: every `Overloader`
/// is independently instantiable and tests should prefer their own.
pub fn global() -> &'static Mutex<Overloader> {
    static GLOBAL: OnceLock<Mutex<Overloader>> = OnceLock::new();
    GLOBAL.get_or_init(|| Mutex::new(Overloader::new()))
}
