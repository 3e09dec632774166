//! Case conversion for generated file names.
//!
//! Kind names arrive already correctly cased from the source schema (e.g.
//! `CustomResourceDefinition`), so the only conversion this crate needs is
//! PascalCase -> snake_case for GVK identity file names. Hand-rolled to
//! match how type names are trusted verbatim elsewhere in this crate,
//! rather than pulling in a case-conversion crate for one call site.

/// Convert a PascalCase (or already snake_case) kind name to snake_case.
///
/// Handles leading acronym runs the way Kubernetes kind names use them:
/// `CSIDriver` -> `csi_driver`, `HTTPIngressPath` -> `http_ingress_path`.
///
/// # Examples
/// ```
/// use ksplit_core::naming::to_snake_case;
/// assert_eq!(to_snake_case("Pod"), "pod");
/// assert_eq!(to_snake_case("CustomResourceDefinition"), "custom_resource_definition");
/// assert_eq!(to_snake_case("CSIDriver"), "csi_driver");
/// assert_eq!(to_snake_case("HTTPIngressPath"), "http_ingress_path");
/// ```
pub fn to_snake_case(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && chars[i - 1].is_lowercase();
            let next_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
            let starts_new_word = prev_lower || (next_lower && i > 0);
            if starts_new_word {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
