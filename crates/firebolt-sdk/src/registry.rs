//! Registry of every wire name the module tables produce.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

/// What a wire name is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Property read
    Getter,
    /// Property write
    Setter,
    /// Plain method call
    Method,
    /// Event subscription (including property change events)
    Event,
    /// Provider capability registration
    Provider,
}

/// Method metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Full wire name (e.g., "localization.locale")
    pub name: String,
    /// Module the name belongs to
    pub module: &'static str,
    pub kind: MethodKind,
    /// Deadline override, if the method has one
    pub timeout: Option<Duration>,
}

impl MethodInfo {
    pub(crate) fn new(name: String, module: &'static str, kind: MethodKind) -> Self {
        Self {
            name,
            module,
            kind,
            timeout: None,
        }
    }

    pub(crate) fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Method registry - every supported wire name with metadata
pub static METHOD_REGISTRY: LazyLock<HashMap<String, MethodInfo>> = LazyLock::new(|| {
    let modules = [
        crate::localization::entries(),
        crate::accessibility::entries(),
        crate::device::entries(),
        crate::advertising::entries(),
        crate::metrics::entries(),
        crate::user_grants::entries(),
        crate::keyboard::entries(),
        crate::pin_challenge::entries(),
        crate::acknowledge_challenge::entries(),
    ];

    modules
        .into_iter()
        .flatten()
        .map(|m| (m.name.clone(), m))
        .collect()
});

/// Get method info by wire name
pub fn method_info(name: &str) -> Option<&'static MethodInfo> {
    METHOD_REGISTRY.get(name)
}

/// Check if a wire name is supported
pub fn is_method_supported(name: &str) -> bool {
    METHOD_REGISTRY.contains_key(name)
}

/// All wire names for a module
pub fn methods_for_module(module: &str) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = METHOD_REGISTRY
        .values()
        .filter(|m| m.module == module)
        .map(|m| m.name.as_str())
        .collect();
    names.sort_unstable();
    names
}

/// All wire names of one kind
pub fn methods_by_kind(kind: MethodKind) -> Vec<&'static str> {
    METHOD_REGISTRY
        .values()
        .filter(|m| m.kind == kind)
        .map(|m| m.name.as_str())
        .collect()
}
