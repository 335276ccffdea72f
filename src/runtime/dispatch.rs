use super::*;

use tracing::{debug, trace};

/// One registered implementation of an overloaded name.
#[derive(Debug, Clone)]
pub(crate) struct CandidateEntry {
    pub(crate) spec: Arc<FnSpec>,
    /// Cached `spec.specificity()`; the resolution sort key.
    pub(crate) specificity: usize,
    pub(crate) id: Option<String>,
    pub(crate) owner_class: Option<String>,
    pub(crate) binding: BindingKind,
}

/// All candidates registered under one name. Append-only; resolution
/// reads a sorted snapshot, so the set itself is never reordered.
#[derive(Default)]
pub struct OverloadSet {
    entries: Vec<CandidateEntry>,
}

impl OverloadSet {
    pub(crate) fn add(&mut self, entry: CandidateEntry) {
        debug!(
            signature = %entry.spec.render(),
            specificity = entry.specificity,
            owner = entry.owner_class.as_deref().unwrap_or(""),
            "registered overload candidate"
        );
        self.entries.push(entry);
    }

    /// Candidates in resolution order: most type-constrained first, equal
    /// specificity in insertion order (the sort is stable).
    fn resolution_order(&self) -> Vec<&CandidateEntry> {
        let mut order: Vec<&CandidateEntry> = self.entries.iter().collect();
        order.sort_by(|a, b| b.specificity.cmp(&a.specificity));
        order
    }

    /// First entry carrying the id; registration does not deduplicate ids.
    pub(crate) fn find_by_id(&self, id: &str) -> Option<&CandidateEntry> {
        self.entries.iter().find(|e| e.id.as_deref() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Overloader {
    /// Try candidates most-specific-first; the first one the call binds to
    /// wins. Structural and type mismatches fall through to the next
    /// candidate; anything a matched body raises propagates unchanged, as
    /// does a violated return-type declaration.
    pub(crate) fn resolve_in(
        &self,
        name: &str,
        set: &OverloadSet,
        args: &Args,
    ) -> Result<Value, RuntimeError> {
        for entry in set.resolution_order() {
            let adapted = match self.adapt_for_binding(&entry.spec, entry.binding, args) {
                Ok(adapted) => adapted,
                Err(mismatch) => {
                    trace!(name = %name, reason = ?mismatch, "candidate skipped during adaptation");
                    continue;
                }
            };
            let bound = match self.bind_args(&entry.spec, &adapted, true) {
                Ok(bound) => bound,
                Err(mismatch) => {
                    trace!(
                        name = %name,
                        signature = %entry.spec.render(),
                        reason = ?mismatch,
                        "candidate skipped"
                    );
                    continue;
                }
            };
            trace!(
                name = %name,
                signature = %entry.spec.render(),
                specificity = entry.specificity,
                "candidate selected"
            );
            let result = (entry.spec.body)(&bound)?;
            return self.check_result_type(&entry.spec, result);
        }
        Err(RuntimeError::NoMatch { name: name.to_string(), candidates: set.len() })
    }

    pub(crate) fn check_result_type(&self, spec: &FnSpec, result: Value) -> Result<Value, RuntimeError> {
        if let Some(expected) = &spec.return_type
            && !self.type_matches_value(expected, &result)
        {
            return Err(RuntimeError::ResultType {
                name: spec.name().to_string(),
                expected: expected.clone(),
                actual: value_type_name(&result).to_string(),
            });
        }
        Ok(result)
    }

    /// Resolve and invoke a plain overloaded function.
    pub fn call(&self, name: &str, args: Args) -> Result<Value, RuntimeError> {
        let Some(set) = self.functions.get(name) else {
            return Err(RuntimeError::UnknownName { name: name.to_string() });
        };
        self.resolve_in(name, set, &args)
    }

    /// Resolve and invoke an overloaded method of a registered class. The
    /// instance (or class) conventionally arrives as the first argument,
    /// per the entry's binding kind.
    pub fn call_method(&self, class: &str, name: &str, args: Args) -> Result<Value, RuntimeError> {
        let Some(ns) = self.methods.get(class) else {
            return Err(RuntimeError::UnknownName { name: class.to_string() });
        };
        let Some(set) = ns.get(name) else {
            return Err(RuntimeError::UnknownMethod { class: class.to_string(), name: name.to_string() });
        };
        self.resolve_in(name, set, &args)
    }

    /// Direct retrieval of one candidate by id, bypassing resolution.
    /// `type_check` selects the validating wrapper; the default handle
    /// invokes the raw implementation (still binding-adapted).
    pub fn with_id(&self, name: &str, id: &str, type_check: bool) -> Result<Handle<'_>, RuntimeError> {
        let Some(set) = self.functions.get(name) else {
            return Err(RuntimeError::UnknownName { name: name.to_string() });
        };
        let Some(entry) = set.find_by_id(id) else {
            return Err(RuntimeError::UnknownId { name: name.to_string(), id: id.to_string() });
        };
        Ok(Handle { ov: self, entry: entry.clone(), type_check })
    }

    /// `with_id` for a class-scoped method set.
    pub fn method_with_id(
        &self,
        class: &str,
        name: &str,
        id: &str,
        type_check: bool,
    ) -> Result<Handle<'_>, RuntimeError> {
        let Some(ns) = self.methods.get(class) else {
            return Err(RuntimeError::UnknownName { name: class.to_string() });
        };
        let Some(set) = ns.get(name) else {
            return Err(RuntimeError::UnknownMethod { class: class.to_string(), name: name.to_string() });
        };
        let Some(entry) = set.find_by_id(id) else {
            return Err(RuntimeError::UnknownId { name: name.to_string(), id: id.to_string() });
        };
        Ok(Handle { ov: self, entry: entry.clone(), type_check })
    }
}

/// A single candidate retrieved by id. Calls through the handle still bind
/// arguments structurally and adapt for the binding kind; only the type
/// validation layer is optional.
pub struct Handle<'a> {
    ov: &'a Overloader,
    entry: CandidateEntry,
    type_check: bool,
}

impl Handle<'_> {
    pub fn call(&self, args: Args) -> Result<Value, RuntimeError> {
        let name = self.entry.spec.name();
        let adapted = self
            .ov
            .adapt_for_binding(&self.entry.spec, self.entry.binding, &args)
            .map_err(|_| RuntimeError::MissingInvocant { name: name.to_string() })?;
        let bound = self
            .ov
            .bind_args(&self.entry.spec, &adapted, self.type_check)
            .map_err(|m| m.surface(name))?;
        let result = (self.entry.spec.body)(&bound)?;
        if self.type_check {
            self.ov.check_result_type(&self.entry.spec, result)
        } else {
            Ok(result)
        }
    }

    /// The retrieved implementation, without any validation wrapper.
    pub fn spec(&self) -> &Arc<FnSpec> {
        &self.entry.spec
    }
}

impl std::fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("entry", &self.entry)
            .field("type_check", &self.type_check)
            .finish_non_exhaustive()
    }
}
