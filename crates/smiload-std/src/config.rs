//! Loader configuration: search path, preloads and the `smirc` file.
//!
//! A configuration starts from [`DEFAULT_SEARCH_PATH`], then applies the
//! file named by `SMIRC`, then the `SMIPATH` variable. Path specs use `:`
//! as the separator:
//!
//! - `a:b` replaces the current path,
//! - `:a:b` keeps the current path and appends `a`, `b` after it,
//! - `a:b:` puts `a`, `b` in front of the current path.
//!
//! Configuration files are line oriented. `#` starts a comment.
//!
//! ```text
//! path :/opt/vendor/mibs
//! load SNMPv2-MIB
//! smilint: path /srv/lint-mibs
//! ```
//!
//! A `tag:` prefix applies the directive only when the configuration was
//! created with that tag.

use crate::error::{Error, INIT_CONFIG_SYNTAX, INIT_CONFIG_UNREADABLE};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories searched when no configuration overrides them.
pub const DEFAULT_SEARCH_PATH: &[&str] = &[
    "/usr/share/snmp/mibs",
    "/usr/local/share/mibs",
    "/usr/share/mibs",
];

/// Environment variable naming a configuration file.
pub const SMIRC_VAR: &str = "SMIRC";
/// Environment variable holding a path spec.
pub const SMIPATH_VAR: &str = "SMIPATH";

const SEPARATOR: char = ':';

/// Loader configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directories searched for imported modules, in order.
    pub search_path: Vec<PathBuf>,
    /// Modules loaded by name when the environment is initialized.
    pub preload: Vec<String>,
    /// Tag selecting `tag:` directives in configuration files.
    pub tag: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_path: DEFAULT_SEARCH_PATH.iter().map(PathBuf::from).collect(),
            preload: Vec::new(),
            tag: None,
        }
    }
}

impl Config {
    /// Build from the defaults, `SMIRC` and `SMIPATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] if the `SMIRC` file cannot be read
    /// (code 1) or contains an unknown directive (code 2).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_tagged(None)
    }

    /// Like [`Config::from_env`], selecting `tag:` directives.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_env_tagged(tag: Option<&str>) -> Result<Self, Error> {
        let smirc = env::var_os(SMIRC_VAR).map(PathBuf::from);
        let smipath = env::var(SMIPATH_VAR).ok();
        Self::from_sources(tag, smirc.as_deref(), smipath.as_deref())
    }

    pub(crate) fn from_sources(
        tag: Option<&str>,
        smirc: Option<&Path>,
        smipath: Option<&str>,
    ) -> Result<Self, Error> {
        let mut config = Self {
            tag: tag.map(str::to_string),
            ..Self::default()
        };
        if let Some(file) = smirc {
            config.read_file(file)?;
        }
        if let Some(spec) = smipath {
            config.apply_path_spec(spec);
        }
        Ok(config)
    }

    /// A configuration searching exactly `paths`.
    #[must_use]
    pub fn with_search_path<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_path: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a directory to the search path.
    pub fn push_path(&mut self, path: impl Into<PathBuf>) {
        self.search_path.push(path.into());
    }

    /// Apply a `:`-separated path spec to the search path.
    pub fn apply_path_spec(&mut self, spec: &str) {
        let dirs: Vec<PathBuf> = spec
            .split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        if spec.starts_with(SEPARATOR) {
            self.search_path.extend(dirs);
        } else if spec.ends_with(SEPARATOR) {
            let rest = std::mem::replace(&mut self.search_path, dirs);
            self.search_path.extend(rest);
        } else {
            self.search_path = dirs;
        }
    }

    /// Read and apply a configuration file.
    ///
    /// # Errors
    ///
    /// Code 1 if the file cannot be read, code 2 on an unknown directive.
    pub fn read_file(&mut self, path: &Path) -> Result<(), Error> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::init(
                INIT_CONFIG_UNREADABLE,
                format!("cannot read {}: {e}", path.display()),
            )
        })?;
        self.apply_directives(&text, &path.display().to_string())
    }

    /// Apply configuration directives. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Code 2 on an unknown or malformed directive.
    pub fn apply_directives(&mut self, text: &str, origin: &str) -> Result<(), Error> {
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let line = match split_tag(line) {
                Some((tag, rest)) if self.tag.as_deref() == Some(tag) => rest,
                Some(_) => continue,
                None => line,
            };

            let (directive, args) = line
                .split_once(char::is_whitespace)
                .map_or((line, ""), |(d, a)| (d, a.trim()));
            let syntax_error = |message: String| {
                Error::init(INIT_CONFIG_SYNTAX, format!("{origin}:{}: {message}", index + 1))
            };

            match directive {
                "path" if !args.is_empty() => self.apply_path_spec(args),
                "load" if !args.is_empty() => {
                    self.preload.extend(args.split_whitespace().map(str::to_string));
                }
                "path" | "load" => {
                    return Err(syntax_error(format!("`{directive}` needs an argument")));
                }
                other => return Err(syntax_error(format!("unknown directive `{other}`"))),
            }
        }
        Ok(())
    }
}

/// Split `tag: rest` into its parts.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let (head, rest) = line.split_once(':')?;
    if head.is_empty() || head.contains(char::is_whitespace) {
        return None;
    }
    Some((head, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn paths(config: &Config) -> Vec<&str> {
        config
            .search_path
            .iter()
            .map(|p| p.to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_default_search_path() {
        let config = Config::default();
        assert_eq!(paths(&config), DEFAULT_SEARCH_PATH);
        assert!(config.preload.is_empty());
    }

    #[test]
    fn test_path_spec_replace_append_prepend() {
        let mut config = Config::with_search_path(["/base"]);
        config.apply_path_spec("/a:/b");
        assert_eq!(paths(&config), ["/a", "/b"]);

        config.apply_path_spec(":/c");
        assert_eq!(paths(&config), ["/a", "/b", "/c"]);

        config.apply_path_spec("/z:");
        assert_eq!(paths(&config), ["/z", "/a", "/b", "/c"]);

        config.apply_path_spec("/x::/y");
        assert_eq!(paths(&config), ["/x", "/y"]);
    }

    #[test]
    fn test_directives_and_tags() {
        let mut config = Config {
            tag: Some("smilint".into()),
            ..Config::with_search_path(["/base"])
        };
        config
            .apply_directives(
                "# site config\n\
                 path :/opt/mibs   # vendor\n\
                 load IF-MIB SNMPv2-MIB\n\
                 smilint: load LINT-MIB\n\
                 tcpdump: path /ignored\n",
                "test",
            )
            .unwrap();
        assert_eq!(paths(&config), ["/base", "/opt/mibs"]);
        assert_eq!(config.preload, ["IF-MIB", "SNMPv2-MIB", "LINT-MIB"]);
    }

    #[test]
    fn test_unknown_directive_is_code_2() {
        let mut config = Config::default();
        let err = config.apply_directives("level 3\n", "smirc").unwrap_err();
        assert!(matches!(err, Error::Initialization { code: 2, .. }));
        assert!(err.to_string().contains("smirc:1"));

        let err = config.apply_directives("load\n", "smirc").unwrap_err();
        assert!(matches!(err, Error::Initialization { code: 2, .. }));
    }

    #[test]
    fn test_smirc_and_smipath_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "path /from-rc").unwrap();
        let config = Config::from_sources(None, Some(file.path()), Some(":/from-env")).unwrap();
        assert_eq!(paths(&config), ["/from-rc", "/from-env"]);
    }

    #[test]
    fn test_unreadable_smirc_is_code_1() {
        let err = Config::from_sources(None, Some(Path::new("/nonexistent/smirc")), None)
            .unwrap_err();
        assert!(matches!(err, Error::Initialization { code: 1, .. }));
    }
}
