/// Package names are opaque, case-sensitive identifiers.
pub type PackageName = String;

const VERSION_OPERATORS: [char; 4] = ['<', '>', '=', '~'];

/// Strips a version qualifier such as `>=1.2` or `~3` from a raw dependency
/// specifier and returns the bare package name.
///
/// The name ends at the first comparison character; surrounding whitespace is
/// trimmed. Any input is accepted, and an empty or operator-only specifier
/// normalizes to an empty name.
pub fn normalize_specifier(spec: &str) -> PackageName {
    let name = match spec.find(|ch: char| VERSION_OPERATORS.contains(&ch)) {
        Some(cut) => &spec[..cut],
        None => spec,
    };
    name.trim().to_string()
}

/// Returns true when a non-empty `filter` occurs anywhere in `name`.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    !filter.is_empty() && name.contains(filter)
}
