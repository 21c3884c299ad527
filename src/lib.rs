//! Computes destination paths for source files from mapping options.
//!
//! Given one or more source paths, an optional destination hint and a set
//! of [`Options`], the resolver answers "where does the output go?" for
//! build and scaffolding tools. Working-directory prefixes, base
//! directories, extension rewriting, flattening and a caller-supplied
//! rename hook are combined into a final [`PathRecord`] per source.
//!
//! ```
//! use map_dest::{resolve, Options};
//!
//! let options = Options {
//!     flatten: true,
//!     ext: Some("html".to_string()),
//!     ..Default::default()
//! };
//! let record = resolve("posts/hello.md", Some("site"), &options)?.unwrap();
//! assert_eq!(record.src, "posts/hello.md");
//! assert_eq!(record.dest, "site/hello.html");
//! # Ok::<(), map_dest::Error>(())
//! ```
//!
//! No file contents are read or written; the only filesystem access is the
//! optional metadata query behind the string form of the `filter` option.

pub use environment::*;
pub use errors::*;
pub use filter::*;
pub use normalize::ExtDot;
pub use options::*;
pub use resolve::*;

mod environment;
mod errors;
mod filter;
pub mod logging;
pub mod normalize;
mod options;
mod resolve;

pub mod prelude {
    pub use crate::errors::{
        config_parsing_error, invalid_source_error, unknown_predicate_error, Error, Result,
    };
    pub use crate::logging::{init_default_logger, init_logger, LogLevel};
    pub use crate::{rename, resolve, resolve_all};
    pub use crate::{
        ExtDot, Filter, Options, PathRecord, RenameStrategy, Resolved, Resolver, SourceInput,
    };
}
