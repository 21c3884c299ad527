use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::{unknown_predicate_error, Error, Result};

/// File-type predicate accepted for the string form of the `filter` option.
///
/// The set is closed; anything else is an [`Error::UnknownPredicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePredicate {
    /// The path exists and is a regular file
    File,
    /// The path exists and is a directory
    Directory,
    /// The path exists and is a symbolic link
    Symlink,
}

impl FromStr for TypePredicate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "file" => Ok(TypePredicate::File),
            "dir" | "directory" => Ok(TypePredicate::Directory),
            "symlink" => Ok(TypePredicate::Symlink),
            _ => Err(unknown_predicate_error(s)),
        }
    }
}

/// Read-only filesystem metadata lookup used to evaluate a
/// [`TypePredicate`].
///
/// Implementations must answer with a single synchronous query and treat
/// any failure as a negative result; the resolver never retries.
pub trait MetadataQuery: Send + Sync {
    fn matches(&self, path: &Path, predicate: TypePredicate) -> bool;
}

/// [`MetadataQuery`] backed by `std::fs`.
///
/// Uses `symlink_metadata` so symbolic links are reported as links rather
/// than followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMetadata;

impl MetadataQuery for FsMetadata {
    fn matches(&self, path: &Path, predicate: TypePredicate) -> bool {
        let Ok(metadata) = fs::symlink_metadata(path) else {
            return false;
        };
        let file_type = metadata.file_type();
        match predicate {
            TypePredicate::File => file_type.is_file(),
            TypePredicate::Directory => file_type.is_dir(),
            TypePredicate::Symlink => file_type.is_symlink(),
        }
    }
}

/// Boxed predicate closure over the raw source path.
pub type FilterFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Pre-filter evaluated before any path transformation.
///
/// A rejected source yields no record; it is not an error.
#[derive(Clone)]
pub enum Filter {
    /// Caller-supplied predicate over the raw source path
    Function(FilterFn),
    /// Named file-type check evaluated through a [`MetadataQuery`]
    Predicate(TypePredicate),
}

impl Filter {
    /// Wrap a closure as a filter.
    pub fn function<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Filter::Function(Arc::new(predicate))
    }

    /// Parse a predicate name into a filter.
    pub fn predicate(name: &str) -> Result<Self> {
        Ok(Filter::Predicate(name.parse()?))
    }

    pub(crate) fn matches(&self, path: &str, metadata: &dyn MetadataQuery) -> bool {
        match self {
            Filter::Function(predicate) => predicate(path),
            Filter::Predicate(predicate) => metadata.matches(Path::new(path), *predicate),
        }
    }
}

impl From<TypePredicate> for Filter {
    fn from(predicate: TypePredicate) -> Self {
        Filter::Predicate(predicate)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Function(_) => f.write_str("Filter::Function(..)"),
            Filter::Predicate(predicate) => f.debug_tuple("Filter::Predicate").field(predicate).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_predicate_from_str() {
        assert_eq!(TypePredicate::from_str("file").unwrap(), TypePredicate::File);
        assert_eq!(
            TypePredicate::from_str("directory").unwrap(),
            TypePredicate::Directory
        );
        assert_eq!(TypePredicate::from_str("dir").unwrap(), TypePredicate::Directory);
        assert_eq!(
            TypePredicate::from_str("Symlink").unwrap(),
            TypePredicate::Symlink
        );
    }

    #[test]
    fn test_type_predicate_rejects_unknown_name() {
        let result = TypePredicate::from_str("hardlink");
        assert!(result.is_err(), "Should reject a name outside the set");
        assert!(
            format!("{}", result.unwrap_err()).contains("hardlink"),
            "Error message should name the offending predicate"
        );
    }

    #[test]
    fn test_function_filter_matches() {
        let filter = Filter::function(|path: &str| path.ends_with(".txt"));
        assert!(filter.matches("a.txt", &FsMetadata));
        assert!(!filter.matches("a.md", &FsMetadata));
    }

    #[test]
    fn test_missing_path_is_negative() {
        let filter = Filter::from(TypePredicate::File);
        assert!(!filter.matches("definitely/not/a/real/path.txt", &FsMetadata));
    }
}
