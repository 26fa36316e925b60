//! Qualifier split for resource directory names.
//!
//! Resource directories encode their variant in the directory name itself:
//! `<base>[-<qualifier>[-<qualifier>...]]`, e.g. `values-en`, `layout-land`,
//! `menu`. The split is purely lexical; qualifier tokens are opaque to the
//! core and never validated against a vocabulary. Only the split itself is
//! load-bearing.

use crate::{Error, Result};

/// A directory name split into its base type prefix and qualifier suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifiedDir {
    /// The base type prefix, e.g. `"values"` in `values-en-rUS`
    pub base: String,
    /// The raw qualifier suffix, e.g. `"en-rUS"`; empty when the name has no
    /// dash or ends directly after it
    pub qualifiers: String,
}

/// Splits a single directory-name segment at its first dash.
///
/// Everything before the first dash is the base type prefix, everything
/// after it is the raw qualifier string. A segment without a dash has an
/// empty qualifier string; callers must not distinguish "no dash" from
/// "dash with empty suffix".
///
/// # Errors
///
/// Returns [`Error::MalformedDirectoryName`] for structurally invalid input:
/// an empty or whitespace-only segment, or a segment with an empty base
/// prefix such as `-en`.
pub fn split_dir_name(segment: &str) -> Result<QualifiedDir> {
    if segment.trim().is_empty() {
        return Err(Error::MalformedDirectoryName(segment.to_string()));
    }

    let (base, qualifiers) = match segment.split_once('-') {
        Some((base, qualifiers)) => (base, qualifiers),
        None => (segment, ""),
    };

    if base.is_empty() {
        return Err(Error::MalformedDirectoryName(segment.to_string()));
    }

    Ok(QualifiedDir {
        base: base.to_string(),
        qualifiers: qualifiers.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_with_qualifiers() {
        let dir = split_dir_name("values-en-rUS").unwrap();
        assert_eq!(dir.base, "values");
        assert_eq!(dir.qualifiers, "en-rUS");
    }

    #[test]
    fn split_without_dash() {
        let dir = split_dir_name("layout").unwrap();
        assert_eq!(dir.base, "layout");
        assert_eq!(dir.qualifiers, "");
    }

    #[test]
    fn trailing_dash_is_empty_qualifier() {
        let dir = split_dir_name("values-").unwrap();
        assert_eq!(dir.base, "values");
        assert_eq!(dir.qualifiers, "");
    }

    #[test]
    fn single_qualifier() {
        let dir = split_dir_name("menu-land").unwrap();
        assert_eq!(dir.base, "menu");
        assert_eq!(dir.qualifiers, "land");
    }

    #[test]
    fn empty_segment_is_malformed() {
        assert!(matches!(
            split_dir_name(""),
            Err(Error::MalformedDirectoryName(_))
        ));
        assert!(matches!(
            split_dir_name("   "),
            Err(Error::MalformedDirectoryName(_))
        ));
    }

    #[test]
    fn empty_base_is_malformed() {
        assert!(matches!(
            split_dir_name("-en"),
            Err(Error::MalformedDirectoryName(_))
        ));
    }

    #[test]
    fn split_is_deterministic() {
        let first = split_dir_name("values-en-rUS").unwrap();
        let second = split_dir_name("values-en-rUS").unwrap();
        assert_eq!(first, second);
    }
}
