//! Destination resolution
//!
//! [`Resolver`] applies the transformation pipeline (filter, flatten,
//! extension rewrite, rename hook, base composition) to turn a source
//! path and a destination hint into a [`PathRecord`].

use std::sync::Arc;

use log::{debug, trace};

use crate::environment::{Environment, SystemEnvironment};
use crate::errors::{invalid_source_error, Result};
use crate::filter::{FsMetadata, MetadataQuery};
use crate::normalize::{basename, expand_prefix, join, replace_extension, unify};
use crate::options::Options;

/// A resolved source/destination pair
///
/// Carries the working options that produced it (prefix-expanded `cwd`,
/// `dest_cwd` and `dest_base`) for inspection. Never mutated after
/// creation.
#[derive(Debug, Clone)]
pub struct PathRecord {
    /// Source path with `cwd`/`src_base` applied, separators unified
    pub src: String,
    /// Computed destination path, separators unified
    pub dest: String,
    /// The expanded working copy of the options used for this record
    pub options: Options,
}

/// Source argument accepted by [`Resolver::resolve_input`].
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// A single path
    Single(String),
    /// An ordered sequence of paths, each resolved independently
    Sequence(Vec<String>),
    /// A path with an optional base overriding `options.src_base`
    WithBase { path: String, base: Option<String> },
}

impl From<&str> for SourceInput {
    fn from(path: &str) -> Self {
        SourceInput::Single(path.to_string())
    }
}

impl From<String> for SourceInput {
    fn from(path: String) -> Self {
        SourceInput::Single(path)
    }
}

impl From<Vec<String>> for SourceInput {
    fn from(paths: Vec<String>) -> Self {
        SourceInput::Sequence(paths)
    }
}

impl From<Vec<&str>> for SourceInput {
    fn from(paths: Vec<&str>) -> Self {
        SourceInput::Sequence(paths.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SourceInput {
    fn from(paths: &[&str]) -> Self {
        SourceInput::Sequence(paths.iter().map(|p| p.to_string()).collect())
    }
}

/// Resolution result mirroring the shape of the input.
///
/// Single input yields one record, or `None` when the filter rejected it;
/// sequence input yields the ordered records of the matching elements.
#[derive(Debug, Clone)]
pub enum Resolved {
    Single(Option<PathRecord>),
    Sequence(Vec<PathRecord>),
}

impl Resolved {
    /// Flatten either shape into a list of records.
    pub fn into_records(self) -> Vec<PathRecord> {
        match self {
            Resolved::Single(record) => record.into_iter().collect(),
            Resolved::Sequence(records) => records,
        }
    }
}

/// Computes destination paths from mapping options.
///
/// Holds the injected collaborators: the [`Environment`] consulted for
/// `~`/`@` expansion and the [`MetadataQuery`] behind predicate filters.
/// Every resolution is synchronous and free of shared mutable state, so a
/// resolver may be used from multiple callers without coordination.
pub struct Resolver {
    environment: Arc<dyn Environment>,
    metadata: Arc<dyn MetadataQuery>,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver {
            environment: Arc::new(SystemEnvironment),
            metadata: Arc::new(FsMetadata),
        }
    }
}

impl Resolver {
    /// A resolver backed by the system environment and `std::fs`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Resolve a single source path against a destination hint.
    ///
    /// Returns `Ok(None)` when the configured filter rejects the source.
    ///
    /// # Errors
    /// Returns an error if the source path is empty.
    pub fn resolve(
        &self,
        source: &str,
        dest_hint: Option<&str>,
        options: &Options,
    ) -> Result<Option<PathRecord>> {
        let working_options = self.expand_options(options);
        self.resolve_with(source, dest_hint, &working_options)
    }

    /// Resolve an ordered sequence of source paths.
    ///
    /// Each element is resolved independently against the same hint and a
    /// shared working copy of the options; filtered elements are omitted,
    /// the order of the rest is preserved.
    pub fn resolve_all<I, S>(
        &self,
        sources: I,
        dest_hint: Option<&str>,
        options: &Options,
    ) -> Result<Vec<PathRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let working_options = self.expand_options(options);
        let mut records = Vec::new();
        for source in sources {
            if let Some(record) = self.resolve_with(source.as_ref(), dest_hint, &working_options)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Resolve any [`SourceInput`] shape.
    pub fn resolve_input(
        &self,
        input: impl Into<SourceInput>,
        dest_hint: Option<&str>,
        options: &Options,
    ) -> Result<Resolved> {
        match input.into() {
            SourceInput::Single(path) => {
                self.resolve(&path, dest_hint, options).map(Resolved::Single)
            }
            SourceInput::Sequence(paths) => self
                .resolve_all(&paths, dest_hint, options)
                .map(Resolved::Sequence),
            SourceInput::WithBase { path, base } => {
                let mut options = options.clone();
                if base.is_some() {
                    options.src_base = base;
                }
                self.resolve(&path, dest_hint, &options).map(Resolved::Single)
            }
        }
    }

    /// Apply the rename hook, or the default hint join when none is set.
    pub fn rename(&self, dest_hint: Option<&str>, src: &str, options: &Options) -> String {
        match &options.rename {
            Some(hook) => hook.rename(dest_hint, src, options),
            None => match dest_hint {
                Some(hint) if !hint.is_empty() => join([hint, src]),
                _ => src.to_string(),
            },
        }
    }

    /// Expand special prefixes in the configured directories once, up
    /// front. The expanded copy is shared by every element of a sequence
    /// and ends up in each record.
    fn expand_options(&self, options: &Options) -> Options {
        let environment = self.environment.as_ref();
        let mut expanded = options.clone();
        if let Some(cwd) = &expanded.cwd {
            expanded.cwd = Some(expand_prefix(cwd, environment));
        }
        if let Some(dest_cwd) = &expanded.dest_cwd {
            expanded.dest_cwd = Some(expand_prefix(dest_cwd, environment));
        }
        if let Some(dest_base) = &expanded.dest_base {
            expanded.dest_base = Some(expand_prefix(dest_base, environment));
        }
        expanded
    }

    /// The transformation pipeline, applied in fixed order.
    ///
    /// Flatten and extension rewrite operate on a working copy that only
    /// feeds the destination; the `src` field is composed from the
    /// original source path.
    fn resolve_with(
        &self,
        source: &str,
        dest_hint: Option<&str>,
        options: &Options,
    ) -> Result<Option<PathRecord>> {
        if source.is_empty() {
            return Err(invalid_source_error("source path is empty"));
        }

        if let Some(filter) = &options.filter {
            if !filter.matches(source, self.metadata.as_ref()) {
                trace!("'{source}' rejected by filter");
                return Ok(None);
            }
        }

        let mut working = unify(source);
        if options.flatten {
            working = basename(&working).to_string();
        }
        if let Some(ext) = &options.ext {
            working = replace_extension(&working, ext, options.ext_dot);
        }

        let mut dest = match &options.rename {
            Some(hook) => hook.rename(dest_hint, &working, options),
            None => {
                let root = join([
                    options.dest_base.as_deref().unwrap_or(""),
                    dest_hint.unwrap_or(""),
                ]);
                if root.is_empty() {
                    working
                } else {
                    join([root.as_str(), working.as_str()])
                }
            }
        };

        let mut src = source.to_string();
        let cwd = join([
            options.cwd.as_deref().unwrap_or(""),
            options.src_base.as_deref().unwrap_or(""),
        ]);
        if !cwd.is_empty() {
            src = join([cwd.as_str(), src.as_str()]);
        }

        if let Some(dest_cwd) = &options.dest_cwd {
            if !dest_cwd.is_empty() {
                dest = join([dest_cwd.as_str(), dest.as_str()]);
            }
        }

        let record = PathRecord {
            src: unify(&src),
            dest: unify(&dest),
            options: options.clone(),
        };
        debug!("resolved '{}' -> '{}'", record.src, record.dest);
        Ok(Some(record))
    }
}

/// Builder for a [`Resolver`] with substituted collaborators.
pub struct ResolverBuilder {
    environment: Arc<dyn Environment>,
    metadata: Arc<dyn MetadataQuery>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        ResolverBuilder {
            environment: Arc::new(SystemEnvironment),
            metadata: Arc::new(FsMetadata),
        }
    }

    /// Substitute the environment consulted for `~`/`@` expansion.
    pub fn environment<E>(mut self, environment: E) -> Self
    where
        E: Environment + 'static,
    {
        self.environment = Arc::new(environment);
        self
    }

    /// Substitute the metadata lookup behind predicate filters.
    pub fn metadata<Q>(mut self, metadata: Q) -> Self
    where
        Q: MetadataQuery + 'static,
    {
        self.metadata = Arc::new(metadata);
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            environment: self.environment,
            metadata: self.metadata,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a single source path with the default collaborators.
pub fn resolve(
    source: &str,
    dest_hint: Option<&str>,
    options: &Options,
) -> Result<Option<PathRecord>> {
    Resolver::default().resolve(source, dest_hint, options)
}

/// Resolve an ordered sequence of source paths with the default
/// collaborators.
pub fn resolve_all<I, S>(
    sources: I,
    dest_hint: Option<&str>,
    options: &Options,
) -> Result<Vec<PathRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Resolver::default().resolve_all(sources, dest_hint, options)
}

/// Apply the rename hook, or the default hint join, with the default
/// collaborators.
pub fn rename(dest_hint: Option<&str>, src: &str, options: &Options) -> String {
    Resolver::default().rename(dest_hint, src, options)
}
