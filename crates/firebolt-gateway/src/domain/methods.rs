//! RPC method naming convention.
//!
//! - methods and getters: `<module>.<method>` with the module lowercased
//! - setters: `<module>.set<Property>`
//! - change notifications: `<module>.on<Property>Changed`

/// Full wire name for a module method
pub fn method_name(module: &str, method: &str) -> String {
    format!("{}.{}", module.to_ascii_lowercase(), method)
}

/// Wire name of the setter for a property
pub fn setter_name(module: &str, property: &str) -> String {
    method_name(module, &format!("set{}", capitalize(property)))
}

/// Wire name of the change notification for a property
pub fn change_event_name(module: &str, property: &str) -> String {
    method_name(module, &format!("on{}Changed", capitalize(property)))
}

/// Split a full wire name into module and method
pub fn split_method(full: &str) -> Option<(&str, &str)> {
    full.split_once('.')
        .filter(|(module, method)| !module.is_empty() && !method.is_empty())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
