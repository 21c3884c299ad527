//! Mapping options
//!
//! [`Options`] is the configuration handed to the resolver. Plain data
//! fields can be loaded from YAML; the rename and filter hooks are set in
//! code.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::errors::{config_parsing_error, Result};
use crate::filter::Filter;
use crate::normalize::ExtDot;

/// Strategy invoked in place of the default destination join.
///
/// Receives the destination hint, the working (flattened/rewritten) source
/// path and the expanded options; its return value becomes the destination
/// verbatim.
pub trait RenameStrategy: Send + Sync {
    fn rename(&self, dest: Option<&str>, src: &str, options: &Options) -> String;
}

impl<F> RenameStrategy for F
where
    F: Fn(Option<&str>, &str, &Options) -> String + Send + Sync,
{
    fn rename(&self, dest: Option<&str>, src: &str, options: &Options) -> String {
        self(dest, src, options)
    }
}

/// Options controlling how a destination path is composed
///
/// All fields are optional; the default maps every source onto itself.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Working-directory prefix prepended to the source path; supports
    /// `~` and `@` expansion
    pub cwd: Option<String>,
    /// Base appended onto `cwd` before prefixing the source
    pub src_base: Option<String>,
    /// Prefix prepended to the computed destination; supports `~`/`@`
    pub dest_cwd: Option<String>,
    /// Root joined under the destination hint when no rename hook overrides
    pub dest_base: Option<String>,
    /// Drop directory components from the destination-side filename
    pub flatten: bool,
    /// Replacement extension; `Some("")` (YAML `false` or `""`) strips it
    #[serde(deserialize_with = "deserialize_ext")]
    pub ext: Option<String>,
    /// Which dot marks the extension boundary
    pub ext_dot: ExtDot,
    /// Caller-supplied destination override
    #[serde(skip)]
    pub rename: Option<Arc<dyn RenameStrategy>>,
    /// Pre-filter evaluated on the raw source path
    #[serde(deserialize_with = "deserialize_filter")]
    pub filter: Option<Filter>,
}

impl Options {
    /// Load options from a YAML document.
    ///
    /// Hook fields (`rename`, closure filters) cannot be expressed in YAML
    /// and are left unset; `filter` accepts a predicate name.
    pub fn from_yaml(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| config_parsing_error(e, "invalid options document"))
    }

    /// Set the rename hook.
    pub fn with_rename<R>(mut self, rename: R) -> Self
    where
        R: RenameStrategy + 'static,
    {
        self.rename = Some(Arc::new(rename));
        self
    }

    /// Set a closure filter over the raw source path.
    pub fn with_filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Filter::function(predicate));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("cwd", &self.cwd)
            .field("src_base", &self.src_base)
            .field("dest_cwd", &self.dest_cwd)
            .field("dest_base", &self.dest_base)
            .field("flatten", &self.flatten)
            .field("ext", &self.ext)
            .field("ext_dot", &self.ext_dot)
            .field("rename", &self.rename.as_ref().map(|_| "<hook>"))
            .field("filter", &self.filter)
            .finish()
    }
}

/// `ext` accepts a string or the literal `false`; both `false` and the
/// empty string mean "strip the extension".
fn deserialize_ext<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ExtField {
        Flag(bool),
        Value(String),
    }

    match Option::<ExtField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ExtField::Flag(false)) => Ok(Some(String::new())),
        Some(ExtField::Flag(true)) => Err(serde::de::Error::custom(
            "`ext` accepts an extension string or `false`",
        )),
        Some(ExtField::Value(value)) => Ok(Some(value)),
    }
}

/// The YAML form of `filter` is a predicate name from the closed set.
fn deserialize_filter<'de, D>(deserializer: D) -> std::result::Result<Option<Filter>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(name) => Filter::predicate(&name)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
