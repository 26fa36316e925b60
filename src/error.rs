use thiserror::Error;

use crate::resources::ResourceId;

macro_rules! malformed_xml {
    // Single string version
    ($path:expr, $pos:expr, $msg:expr) => {
        crate::Error::MalformedXml {
            message: $msg.to_string(),
            path: $path.to_string(),
            position: $pos,
        }
    };

    // Format string with arguments version
    ($path:expr, $pos:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedXml {
            message: format!($fmt, $($arg)*),
            path: $path.to_string(),
            position: $pos,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while registering resource
/// identifiers, walking qualified resource directories, and parsing resource XML documents.
/// Each variant provides specific context about the failure mode to enable appropriate error
/// handling.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::MalformedDirectoryName`] - A resource directory name failed the qualifier split
/// - [`Error::MalformedXml`] - A resource document could not be parsed
/// - [`Error::Empty`] - Empty input provided
///
/// ## Registration Errors
/// - [`Error::DuplicateIdRegistration`] - Two registrations claimed the same id or name
/// - [`Error::UnresolvedReference`] - A declared name is unknown to the identifier registry
///
/// ## I/O and Infrastructure Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::LockError`] - Thread synchronization failure
/// - [`Error::GraphError`] - Loader dependency graph error
///
/// # Examples
///
/// ```rust,no_run
/// use rescope::{Error, Memory, ResourceStoreBuilder};
///
/// let fs = Memory::new();
/// let store = ResourceStoreBuilder::new()
///     .app_root(fs.root(), "app")
///     .build();
///
/// match store.initialize() {
///     Ok(()) => println!("Resources loaded"),
///     Err(Error::DuplicateIdRegistration { id, .. }) => {
///         eprintln!("Corrupt constants input for {}", id);
///     }
///     Err(Error::MalformedXml { message, path, position }) => {
///         eprintln!("Bad document {} at byte {}: {}", path, position, message);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A resource directory name is structurally invalid.
    ///
    /// Raised by the qualifier split for segments that cannot carry a base
    /// type prefix at all (empty or blank names). Directory names that merely
    /// carry an unknown prefix are not errors; they are simply not resource
    /// directories.
    #[error("Malformed directory name - '{0}'")]
    MalformedDirectoryName(String),

    /// A resource document is damaged and could not be parsed.
    ///
    /// The whole document is rejected; a partially built tree is never
    /// returned. During a load pass this condition is recovered at file
    /// granularity and surfaced through the diagnostics container.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `path` - Source path of the offending document
    /// * `position` - Byte position within the document where parsing failed
    #[error("Malformed XML - {path} @ byte {position}: {message}")]
    MalformedXml {
        /// The message to be printed for the MalformedXml error
        message: String,
        /// The source path of the document in which this error occured
        path: String,
        /// The byte position within the document at which this error occured
        position: u64,
    },

    /// An element declared a name that the identifier registry cannot resolve.
    ///
    /// During a load pass this condition is recovered at entry granularity:
    /// the single entry is skipped and reported, the rest of the document is
    /// processed normally.
    #[error("Unresolved resource reference - {0}")]
    UnresolvedReference(String),

    /// Two registrations claimed the same id for different names, or the same
    /// name for different ids.
    ///
    /// This indicates a corrupt generated-constants input and is fatal at
    /// registration time; no resolution can be trusted afterwards.
    #[error("Duplicate id registration - {id} claimed by '{existing}' and '{incoming}'")]
    DuplicateIdRegistration {
        /// The contested resource id
        id: ResourceId,
        /// The name the id was first registered under
        existing: String,
        /// The name of the conflicting registration
        incoming: String,
    },

    /// Provided input was empty.
    ///
    /// This error occurs when an empty document or buffer is provided where
    /// actual resource data was expected.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during directory listing or
    /// file reads, such as permission issues or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Failed to lock target.
    ///
    /// This error occurs when thread synchronization fails, typically when
    /// trying to acquire a mutex that is in an invalid state.
    #[error("Failed to lock target")]
    LockError,

    /// Loader dependency graph error.
    ///
    /// Errors related to dependency analysis between resource loaders. This
    /// can occur when a loader depends on a kind without a registered loader
    /// or when the dependency order cannot be resolved.
    #[error("{0}")]
    GraphError(String),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories, such as a
    /// malformed line in a generated-constants input.
    #[error("{0}")]
    Error(String),
}
