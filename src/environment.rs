use std::env;
use std::path::PathBuf;

use directories::BaseDirs;

/// Resolves the directory roots used for special-prefix expansion.
///
/// A leading `~` in a configured directory expands to [`home_dir`], a
/// leading `@` to [`global_packages_dir`]. The trait exists so callers and
/// tests can substitute deterministic roots for the system lookup.
///
/// [`home_dir`]: Environment::home_dir
/// [`global_packages_dir`]: Environment::global_packages_dir
pub trait Environment: Send + Sync {
    /// The user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The root directory for globally installed packages, if one can be
    /// determined.
    fn global_packages_dir(&self) -> Option<PathBuf>;
}

/// [`Environment`] backed by the running system.
///
/// The home directory comes from the platform's user directories; the
/// global packages root honours a `PREFIX` environment variable override
/// before falling back to the platform convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn home_dir(&self) -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn global_packages_dir(&self) -> Option<PathBuf> {
        global_packages_dir()
    }
}

#[cfg(unix)]
fn global_packages_dir() -> Option<PathBuf> {
    if let Ok(prefix) = env::var("PREFIX") {
        return Some(PathBuf::from(prefix).join("lib/node_modules"));
    }
    Some(PathBuf::from("/usr/local/lib/node_modules"))
}

#[cfg(windows)]
fn global_packages_dir() -> Option<PathBuf> {
    if let Ok(prefix) = env::var("PREFIX") {
        return Some(PathBuf::from(prefix).join("node_modules"));
    }
    env::var("APPDATA")
        .ok()
        .map(|dir| PathBuf::from(dir).join("npm").join("node_modules"))
}

/// [`Environment`] with fixed roots.
///
/// Useful in tests and in sandboxed callers that must not consult the
/// system.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    pub home: Option<PathBuf>,
    pub global: Option<PathBuf>,
}

impl StaticEnvironment {
    pub fn new<P: Into<PathBuf>>(home: P, global: P) -> Self {
        StaticEnvironment {
            home: Some(home.into()),
            global: Some(global.into()),
        }
    }
}

impl Environment for StaticEnvironment {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn global_packages_dir(&self) -> Option<PathBuf> {
        self.global.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_environment_roots() {
        let environment = StaticEnvironment::new("/home/tester", "/opt/packages");
        assert_eq!(
            environment.home_dir(),
            Some(PathBuf::from("/home/tester"))
        );
        assert_eq!(
            environment.global_packages_dir(),
            Some(PathBuf::from("/opt/packages"))
        );
    }

    #[test]
    fn test_static_environment_default_is_unresolved() {
        let environment = StaticEnvironment::default();
        assert!(environment.home_dir().is_none());
        assert!(environment.global_packages_dir().is_none());
    }
}
