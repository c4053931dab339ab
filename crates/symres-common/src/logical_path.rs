//! Symbol name to relative file path translation.
//!
//! Two conventions are supported:
//! - hierarchical (PSR-4): every namespace separator becomes a path
//!   separator, `App\Models\User` -> `App/Models/User.php`
//! - legacy (PSR-0): as above for the namespace portion, and additionally
//!   underscores in the final component become path separators,
//!   `Twig_Node_Expr` -> `Twig/Node/Expr.php`
//!
//! Translation never changes byte offsets, so a boundary found on the symbol
//! name can be used to slice its logical path.

use crate::names::{LEGACY_SEPARATOR, NAMESPACE_SEPARATOR, split_namespace};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Translate a namespaced name into its hierarchical logical path.
pub fn psr4_logical_path(name: &str, extension: &str) -> String {
    let mut path = String::with_capacity(name.len() + extension.len());
    path.extend(name.chars().map(|ch| {
        if ch == NAMESPACE_SEPARATOR {
            MAIN_SEPARATOR
        } else {
            ch
        }
    }));
    path.push_str(extension);
    path
}

/// Translate a name into its legacy logical path.
///
/// Underscores are only significant in the class component; underscores in
/// namespace segments are kept verbatim.
pub fn psr0_logical_path(name: &str, extension: &str) -> String {
    let mut path = String::with_capacity(name.len() + extension.len());
    let (namespace, class) = split_namespace(name);
    if let Some(namespace) = namespace {
        path.extend(namespace.chars().map(|ch| {
            if ch == NAMESPACE_SEPARATOR {
                MAIN_SEPARATOR
            } else {
                ch
            }
        }));
        path.push(MAIN_SEPARATOR);
    }
    path.extend(class.chars().map(|ch| {
        if ch == LEGACY_SEPARATOR {
            MAIN_SEPARATOR
        } else {
            ch
        }
    }));
    path.push_str(extension);
    path
}

/// The part of a hierarchical logical path after the namespace boundary at
/// byte offset `boundary` (the offset of a separator in the original name).
pub fn psr4_tail(logical_path: &str, boundary: usize) -> &str {
    &logical_path[boundary + 1..]
}

/// `dir` followed by a logical path. Leading separators on `relative` are
/// dropped, so the result never escapes `dir` by replacing it.
pub fn join_logical(dir: &Path, relative: &str) -> PathBuf {
    dir.join(relative.trim_start_matches(std::path::is_separator))
}
