//! Top-level binding environment of the sandbox interpreter, with
//! baseline snapshot semantics.

use std::collections::HashMap;

use rhai::{Dynamic, Scope};

/// The interpreter's global scope plus the baseline bookkeeping that makes
/// it reusable across runs.
///
/// Everything a script defines or imports at top level lands in this
/// scope. `initialize` records a baseline of every name bound so far,
/// explicitly including injected infrastructure; `reset_to_baseline`
/// removes every binding outside that set, which is exactly what the
/// previous script left behind.
pub struct SandboxEnv {
    scope: Scope<'static>,
    /// Baseline as a name -> occurrence count multiset. The interpreter
    /// scope allows shadowing, so a plain name set is not enough: a script
    /// re-declaring a baseline name adds a second entry that must go away
    /// on reset while the original stays.
    baseline: HashMap<String, usize>,
}

impl SandboxEnv {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            baseline: HashMap::new(),
        }
    }

    /// Bind an injected infrastructure constant.
    ///
    /// Call before `initialize` so the name becomes part of the baseline
    /// and survives every reset.
    pub fn inject_constant(&mut self, name: &str, value: impl Into<Dynamic>) {
        self.scope.push_constant_dynamic(name.to_string(), value.into());
    }

    /// Record the baseline set from the current top-level bindings.
    pub fn initialize(&mut self) {
        self.baseline.clear();
        for (name, _, _) in self.scope.iter() {
            *self.baseline.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    /// Remove every top-level binding not covered by the baseline.
    ///
    /// Baseline bindings keep their current values, so patches applied at
    /// startup (and any value a script managed to write into a baseline
    /// name) persist across runs. Idempotent; safe to call before the
    /// first run.
    pub fn reset_to_baseline(&mut self) {
        let mut budget = self.baseline.clone();
        let mut retained: Vec<(String, bool, Dynamic)> = Vec::new();
        for (name, is_constant, value) in self.scope.iter() {
            if let Some(remaining) = budget.get_mut(name) {
                if *remaining > 0 {
                    *remaining -= 1;
                    retained.push((name.to_string(), is_constant, value));
                }
            }
        }
        self.scope.clear();
        for (name, is_constant, value) in retained {
            if is_constant {
                self.scope.push_constant_dynamic(name, value);
            } else {
                self.scope.push_dynamic(name, value);
            }
        }
    }

    /// Number of live top-level bindings.
    pub fn len(&self) -> usize {
        self.scope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scope.is_empty()
    }

    /// The interpreter scope, for executing source against.
    pub(crate) fn scope_mut(&mut self) -> &mut Scope<'static> {
        &mut self.scope
    }
}

impl Default for SandboxEnv {
    fn default() -> Self {
        Self::new()
    }
}
