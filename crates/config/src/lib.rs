//! Configuration for zimbib.
//!
//! A [`Config`] is assembled from layered sources, each overriding the
//! previous one:
//!
//! 1. built-in defaults ([`Config::default`]);
//! 2. `zimbib.toml` in the user configuration directory (for example
//!    `~/.config/zimbib/zimbib.toml` on Linux);
//! 3. an explicitly given file (`--config`);
//! 4. `ZIMBIB_*` environment variables, with `__` separating nested keys
//!    (`ZIMBIB_TEMPLATES__ENTRY`).
//!
//! The resulting value is passed explicitly to the loader and synchronizer.
//!
//! ```toml
//! root = ":References"
//! bibfile = "~/Documents/library.bib"
//! notebook = "/home/me/Notebooks/Notes"
//! summary = true
//! entries = true
//!
//! [templates]
//! entry = "\n@{{ entry_type }}\n"
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;
use zimbib_notebook::{PageName, make_valid};

/// Name of the configuration file looked up in the user configuration directory.
pub const CONFIG_FILE: &str = "zimbib.toml";
/// Prefix of the environment variables that override configuration values.
pub const ENV_PREFIX: &str = "ZIMBIB_";
/// Default root namespace for the bibliography pages.
pub const DEFAULT_ROOT: &str = ":References";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace under which the summary page and the entry pages live.
    pub root: String,
    /// Path of the BibTeX file; `~` is expanded.
    pub bibfile: String,
    /// Directory of the Zim notebook to write to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notebook: Option<PathBuf>,
    /// Rewrite the root summary page during `sync`.
    pub summary: bool,
    /// Import one page per entry during `sync`.
    pub entries: bool,
    pub templates: Templates,
}

/// Template overrides; `None` keeps the built-in template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            bibfile: String::new(),
            notebook: None,
            summary: true,
            entries: false,
            templates: Templates::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from every layer, `explicit` being an optional
    /// file given on the command line.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NotFound`] if `explicit` does not exist and
    /// [`ErrorKind::Load`] if any source is malformed. The result is not
    /// [validated](Self::validate) yet.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::from_sources(Self::user_file().as_deref(), explicit)
    }

    /// The `zimbib.toml` in the user configuration directory, if the platform has one.
    pub fn user_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "zimbib").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    #[instrument(level = "debug")]
    pub fn from_sources(user: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(user) = user {
            figment = figment.merge(Toml::file(user));
        }
        if let Some(explicit) = explicit {
            if !explicit.is_file() {
                exn::bail!(ErrorKind::NotFound(explicit.to_path_buf()));
            }
            figment = figment.merge(Toml::file(explicit));
        }
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract().or_raise(|| ErrorKind::Load)?;
        tracing::debug!(root = %config.root, bibfile = %config.bibfile, "Loaded configuration");
        Ok(config)
    }

    /// The root namespace as a page name, sanitized the same way entry pages are.
    pub fn root_page(&self) -> Result<PageName> {
        make_valid(&self.root).or_raise(|| ErrorKind::InvalidRoot(self.root.clone()))
    }

    /// Checks the settings this crate understands.
    ///
    /// Template overrides are only compiled where they are used, when the
    /// synchronizer builds its templates.
    pub fn validate(&self) -> Result<()> {
        if self.bibfile.trim().is_empty() {
            exn::bail!(ErrorKind::MissingBibfile);
        }
        self.root_page()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn with_bibfile(bibfile: &str) -> Config {
        Config { bibfile: bibfile.to_string(), ..Config::default() }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.root, ":References");
        assert!(config.bibfile.is_empty());
        assert!(config.summary);
        assert!(!config.entries);
        assert_eq!(config.templates, Templates::default());
    }

    #[test]
    fn test_layering() {
        Jail::expect_with(|jail| {
            jail.create_file("user.toml", "root = \":Papers\"\nbibfile = \"user.bib\"\n")?;
            jail.create_file("explicit.toml", "bibfile = \"explicit.bib\"\n[templates]\nentry = \"{{ key }}\"\n")?;
            jail.set_env("ZIMBIB_ENTRIES", "true");

            let config = Config::from_sources(Some(Path::new("user.toml")), Some(Path::new("explicit.toml"))).unwrap();
            assert_eq!(config.root, ":Papers");
            assert_eq!(config.bibfile, "explicit.bib");
            assert!(config.summary);
            assert!(config.entries);
            assert_eq!(config.templates.entry.as_deref(), Some("{{ key }}"));
            assert_eq!(config.templates.summary, None);
            Ok(())
        });
    }

    #[test]
    fn test_nested_env() {
        Jail::expect_with(|jail| {
            jail.set_env("ZIMBIB_TEMPLATES__SUMMARY", "{{ library.name }}");
            jail.set_env("ZIMBIB_BIBFILE", "env.bib");
            let config = Config::from_sources(None, None).unwrap();
            assert_eq!(config.templates.summary.as_deref(), Some("{{ library.name }}"));
            assert_eq!(config.bibfile, "env.bib");
            Ok(())
        });
    }

    #[test]
    fn test_missing_user_file_is_ignored() {
        Jail::expect_with(|_| {
            let config = Config::from_sources(Some(Path::new("nope.toml")), None).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let err = Config::from_sources(None, Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(p) if p == &path));
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "summary = \"sometimes\"\n").unwrap();
        let err = Config::from_sources(None, Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load));
    }

    #[test]
    fn test_validate_requires_bibfile() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingBibfile));
        let err = with_bibfile("   ").validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingBibfile));
        assert!(with_bibfile("~/library.bib").validate().is_ok());
    }

    #[rstest]
    #[case(":References", ":References")]
    #[case("References", ":References")]
    #[case(":Research::Papers:", ":Research:Papers")]
    #[case(":My_Library", ":My Library")]
    fn test_root_page(#[case] root: &str, #[case] expected: &str) {
        let config = Config { root: root.to_string(), ..with_bibfile("x.bib") };
        assert_eq!(config.root_page().unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(":")]
    #[case(":References:???")]
    fn test_invalid_root(#[case] root: &str) {
        let config = Config { root: root.to_string(), ..with_bibfile("x.bib") };
        let err = config.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidRoot(r) if r == root));
    }

    #[test]
    fn test_template_overrides_not_compiled() {
        let mut config = with_bibfile("x.bib");
        config.templates.entry = Some("{{ unclosed".to_string());
        assert!(config.validate().is_ok());
    }
}
