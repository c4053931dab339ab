//! Symbol name helpers.
//!
//! Symbols are fully-qualified names such as `App\Models\User` (namespaced)
//! or `Twig_Environment` (legacy, underscore-delimited). Both separators are
//! single-byte ASCII, so byte offsets computed on a name stay valid on its
//! translated logical path.

/// Separator between namespace components.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Separator used by legacy flat names (`Vendor_Package_Class`).
pub const LEGACY_SEPARATOR: char = '_';

/// Strip leading namespace separators.
///
/// `\App\User` and `App\User` name the same symbol.
pub fn normalize_symbol(name: &str) -> &str {
    name.trim_start_matches(NAMESPACE_SEPARATOR)
}

/// First character of a symbol or prefix, used to bucket prefix tables.
pub fn first_char(name: &str) -> Option<char> {
    name.chars().next()
}

/// Byte offset of the last namespace separator in `name`.
pub fn last_separator(name: &str) -> Option<usize> {
    memchr::memrchr(NAMESPACE_SEPARATOR as u8, name.as_bytes())
}

/// Split a name into its namespace (without trailing separator) and the
/// final component.
///
/// ```
/// use symres_common::names::split_namespace;
/// assert_eq!(split_namespace("App\\Models\\User"), (Some("App\\Models"), "User"));
/// assert_eq!(split_namespace("Twig_Environment"), (None, "Twig_Environment"));
/// ```
pub fn split_namespace(name: &str) -> (Option<&str>, &str) {
    match last_separator(name) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

/// A hierarchical prefix is valid when it is empty (root) or ends with the
/// namespace separator.
pub fn is_valid_psr4_prefix(prefix: &str) -> bool {
    prefix.is_empty() || prefix.ends_with(NAMESPACE_SEPARATOR)
}

/// Whether `name` can be translated into a relative logical path: it is
/// non-empty and every namespace component is non-empty, is not `.` or `..`,
/// and holds no path separator, drive colon or NUL.
///
/// ```
/// use symres_common::names::is_well_formed;
/// assert!(is_well_formed("App\\Models\\User"));
/// assert!(!is_well_formed("App\\\\etc\\passwd"));
/// assert!(!is_well_formed("App\\..\\Secret"));
/// ```
pub fn is_well_formed(name: &str) -> bool {
    !name.is_empty()
        && name.split(NAMESPACE_SEPARATOR).all(|component| {
            !component.is_empty()
                && component != "."
                && component != ".."
                && !component
                    .chars()
                    .any(|ch| std::path::is_separator(ch) || ch == ':' || ch == '\0')
        })
}

/// Iterate the namespace boundaries of `name` from the longest prefix to the
/// shortest, yielding byte offsets of each separator.
///
/// For `A\B\C` this yields the offset of the second separator, then the
/// first.
pub fn namespace_boundaries(name: &str) -> impl Iterator<Item = usize> + '_ {
    memchr::memrchr_iter(NAMESPACE_SEPARATOR as u8, name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_separators() {
        assert_eq!(normalize_symbol("\\App\\User"), "App\\User");
        assert_eq!(normalize_symbol("App\\User"), "App\\User");
        assert_eq!(normalize_symbol(""), "");
    }

    #[test]
    fn test_split_namespace() {
        assert_eq!(split_namespace("A\\B\\C"), (Some("A\\B"), "C"));
        assert_eq!(split_namespace("Foo_Bar"), (None, "Foo_Bar"));
    }

    #[test]
    fn test_psr4_prefix_validity() {
        assert!(is_valid_psr4_prefix(""));
        assert!(is_valid_psr4_prefix("App\\"));
        assert!(!is_valid_psr4_prefix("App"));
    }

    #[test]
    fn test_well_formed_names() {
        assert!(is_well_formed("App\\Models\\User"));
        assert!(is_well_formed("Twig_Environment"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("App\\\\etc\\passwd"));
        assert!(!is_well_formed("App\\"));
        assert!(!is_well_formed("App\\/etc/passwd"));
        assert!(!is_well_formed("App\\..\\..\\etc"));
        assert!(!is_well_formed("App\\C:x"));
    }

    #[test]
    fn test_namespace_boundaries_longest_first() {
        let name = "A\\B\\C";
        let prefixes: Vec<&str> = namespace_boundaries(name).map(|pos| &name[..pos]).collect();
        assert_eq!(prefixes, vec!["A\\B", "A"]);
    }

    #[test]
    fn test_first_char() {
        assert_eq!(first_char("App\\"), Some('A'));
        assert_eq!(first_char(""), None);
    }
}
