use std::collections::HashMap;

/// A convenience function to get the default scopes in an allocated form.
pub fn default_scope_mappings() -> HashMap<String, Vec<String>> {
    DEFAULT_SCOPE_MAPPINGS
        .iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(ToString::to_string).collect()))
        .collect()
}

/// All default scopes, space separated, as carried by a full-access token.
pub fn default_scopes() -> String {
    DEFAULT_SCOPE_MAPPINGS
        .iter()
        .map(|(k, _)| *k)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Default scope mappings (in a `const` form).
///
/// See [`default_scope_mappings`] for a `HashMap` form.
///
/// It can be overridden by configuration.
pub const DEFAULT_SCOPE_MAPPINGS: &[(&str, &[&str])] = &[
    ("create:deviation", &["create.deviation"]),
    ("read:deviation", &["read.deviation", "read.user"]),
    ("update:deviation", &["update.deviation"]),
    ("delete:deviation", &["delete.deviation"]),
];
