//! The parse environment: a registry of loaded modules plus the
//! configuration used to find their imports.
//!
//! # Example
//!
//! ```no_run
//! use smiload::{Config, Environment};
//!
//! let mut env = Environment::init(Config::default())?;
//! let (name, directory) = env.load("/usr/share/snmp/mibs/IF-MIB")?;
//! println!("{name}: {} objects", directory.len());
//! # Ok::<(), smiload::Error>(())
//! ```

use crate::config::Config;
use crate::error::{Error, INIT_PRELOAD_FAILED};
use crate::logging::LogTracer;
use smiload_core::lexer::{Diagnostic, LineIndex};
use smiload_core::resolver::builtins::is_base_module;
use smiload_core::resolver::resolve_module_traced;
use smiload_core::{ast, Module, OidDirectory, Parser};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extensions tried, in order, when locating a module by name.
pub const MODULE_EXTENSIONS: &[&str] = &["", ".mib", ".my", ".smiv1", ".smiv2", ".txt", ".smi"];

/// Loaded modules keyed by name, and the configuration used to load them.
#[derive(Debug)]
pub struct Environment {
    config: Config,
    modules: BTreeMap<String, Module>,
}

impl Environment {
    /// Create an environment and load the configured preload modules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Initialization`] with code 3 if a preload module
    /// cannot be loaded.
    pub fn init(config: Config) -> Result<Self, Error> {
        let preload = config.preload.clone();
        let mut env = Self {
            config,
            modules: BTreeMap::new(),
        };
        for name in &preload {
            env.load_by_name(name).map_err(|err| {
                Error::init(INIT_PRELOAD_FAILED, format!("cannot preload {name}: {err}"))
            })?;
        }
        Ok(env)
    }

    /// The configuration this environment was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load `path` and return the first module's name and OID directory.
    ///
    /// # Errors
    ///
    /// [`Error::Load`] if the file cannot be read or has a syntax error,
    /// [`Error::NoModule`] if it contains no module definition.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(String, OidDirectory), Error> {
        let module = self.load_module(path)?;
        Ok((module.name().to_string(), module.oid_directory()))
    }

    /// Load `path` and return the first resolved module it defines.
    ///
    /// Modules it imports from are located on the search path and loaded
    /// first, unless already registered.
    ///
    /// # Errors
    ///
    /// See [`Environment::load`].
    pub fn load_module(&mut self, path: impl AsRef<Path>) -> Result<&Module, Error> {
        let path = path.as_ref();
        let name = self.load_file(path, &mut BTreeSet::new())?;
        self.modules.get(&name).ok_or_else(|| Error::NoModule {
            path: path.display().to_string(),
        })
    }

    /// Locate a module by name on the search path and load it.
    ///
    /// # Errors
    ///
    /// [`Error::Load`] if no file for `name` exists on the search path,
    /// otherwise as [`Environment::load`].
    pub fn load_by_name(&mut self, name: &str) -> Result<&Module, Error> {
        let path = self
            .locate(name, None)
            .ok_or_else(|| Error::load(name, "module not found on search path"))?;
        self.load_module(path)
    }

    /// A loaded module.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// All loaded modules, ordered by name.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Find the file holding module `name`. The search path comes first,
    /// then `fallback_dir`.
    #[must_use]
    pub fn locate(&self, name: &str, fallback_dir: Option<&Path>) -> Option<PathBuf> {
        self.config
            .search_path
            .iter()
            .map(PathBuf::as_path)
            .chain(fallback_dir)
            .flat_map(|dir| {
                MODULE_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{name}{ext}")))
            })
            .find(|candidate| candidate.is_file())
    }

    /// Parse, resolve and register every module in `path`, returning the
    /// name of the first one. `in_progress` holds modules whose imports
    /// are being loaded, so import cycles terminate.
    fn load_file(&mut self, path: &Path, in_progress: &mut BTreeSet<String>) -> Result<String, Error> {
        let shown = path.display().to_string();
        let source = fs::read(path).map_err(|e| Error::load(&shown, e.to_string()))?;

        let parsed = Parser::new(&source).parse();
        let Some(first) = parsed.modules.first() else {
            return Err(Error::NoModule { path: shown });
        };
        if let Some(diag) = parsed.first_error() {
            return Err(Error::load(&shown, syntax_reason(&source, diag)));
        }
        let first_name = first.name.name.clone();
        debug!(path = %shown, module = %first_name, "parsed");

        for ast in &parsed.modules {
            let name = ast.name.name.clone();
            in_progress.insert(name.clone());
            self.load_imports(ast, path.parent(), in_progress);

            let diagnostics = parsed
                .diagnostics
                .iter()
                .filter(|d| d.span.start >= ast.span.start && d.span.start <= ast.span.end)
                .cloned()
                .collect();
            let module = resolve_module_traced(ast, &self.modules, &mut LogTracer)
                .with_source_diagnostics(diagnostics);
            if !module.unresolved().is_empty() {
                warn!(
                    module = %name,
                    count = module.unresolved().len(),
                    "definitions with unresolved OIDs"
                );
            }
            info!(module = %name, nodes = module.nodes().len(), "module loaded");

            in_progress.remove(&name);
            self.modules.insert(name, module);
        }

        Ok(first_name)
    }

    fn load_imports(
        &mut self,
        ast: &ast::Module,
        source_dir: Option<&Path>,
        in_progress: &mut BTreeSet<String>,
    ) {
        for from in ast.imported_modules() {
            if is_base_module(from) || self.modules.contains_key(from) || in_progress.contains(from)
            {
                continue;
            }
            let Some(path) = self.locate(from, source_dir) else {
                warn!(module = %ast.name.name, import = %from, "imported module not found");
                continue;
            };
            debug!(import = %from, path = %path.display(), "loading import");
            if let Err(err) = self.load_file(&path, in_progress) {
                warn!(import = %from, error = %err, "failed to load imported module");
            }
        }
    }
}

/// `line L, column C: message` for a diagnostic.
fn syntax_reason(source: &[u8], diag: &Diagnostic) -> String {
    let (line, column) = LineIndex::new(source).line_col(diag.span.start);
    format!("syntax error at line {line}, column {column}: {}", diag.message)
}
