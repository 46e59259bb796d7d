//! Layered configuration.
//!
//! Sources, highest precedence first:
//!
//! - `RESUME_ATS_*` environment variables, with `__` between nested keys
//! - files passed explicitly (`--config`)
//! - `resume-ats.<ext>` then `.resume-ats.<ext>` in the nearest directory,
//!   walking up from the working directory, that has either
//! - `config.<ext>` in the user config directory
//! - built-in defaults
//!
//! `<ext>` is any of `toml`, `yaml`, `yml`, `json`. Files in one directory
//! all merge, and later extensions in that list override earlier ones.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use resume_ats_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("profile {}", config.scoring.version);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::dictionary::{DictionaryCache, FileDictionaryProvider};
use crate::error::{ConfigError, ConfigResult};
use crate::profile::ScoringProfile;
use crate::roles::{ConfiguredRoleTemplates, RoleTemplate};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// The configuration for resume-ats.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON), then overlaid with `RESUME_ATS_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default log filter when neither `RUST_LOG` nor `-v`/`-q` is given.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Largest résumé accepted, in bytes. Unset means 5 MiB.
    ///
    /// Applies to résumé files read by the CLI and to text sent to the MCP
    /// server. Use `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Accept input of any size.
    pub disable_input_limit: bool,
    /// Word list used for spelling checks (one word per line).
    ///
    /// A relative path resolves against the directory of the highest
    /// precedence config file, or the working directory if none. Without a dictionary, spelling checks are skipped.
    pub dictionary_path: Option<Utf8PathBuf>,
    /// Seconds a loaded dictionary stays cached. Omit to cache forever.
    pub dictionary_ttl_secs: Option<u64>,
    /// Role templates keyed by role family.
    ///
    /// These extend (not replace) the built-in templates. A family that
    /// collides with a built-in overrides it.
    pub role_templates: HashMap<String, RoleTemplate>,
    /// Scoring thresholds, penalties, and weights.
    pub scoring: ScoringProfile,
}

impl Config {
    /// Effective input limit, or `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// Dictionary path, resolved against `base_dir` when relative.
    pub fn resolved_dictionary_path(&self, base_dir: Option<&Utf8Path>) -> Option<Utf8PathBuf> {
        let path = self.dictionary_path.as_ref()?;
        match base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// A dictionary cache honoring `dictionary_ttl_secs`.
    pub fn dictionary_cache(&self) -> DictionaryCache {
        match self.dictionary_ttl_secs {
            Some(secs) => DictionaryCache::with_ttl(Duration::from_secs(secs)),
            None => DictionaryCache::new(),
        }
    }

    /// File dictionary provider for the configured path, if any.
    pub fn dictionary_provider(&self, base_dir: Option<&Utf8Path>) -> Option<FileDictionaryProvider> {
        self.resolved_dictionary_path(base_dir)
            .map(FileDictionaryProvider::new)
    }

    /// Template provider: configured overrides layered over the built-ins.
    pub fn role_template_provider(&self) -> ConfiguredRoleTemplates {
        ConfiguredRoleTemplates::new(self.role_templates.clone())
    }
}

/// Minimum level for emitted logs.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Intermediate scoring figures.
    Debug,
    /// One line per scored résumé.
    #[default]
    Info,
    /// Degraded modes only, such as a missing dictionary.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Filter directive for this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The files that fed a loaded [`Config`], lowest precedence first within
/// each group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Files from the nearest directory holding any config.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// `config.<ext>` from the user config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed with `--config` or [`ConfigLoader::with_file`].
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file with the final say: the last explicit file, else the last
    /// project file, else the user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or(self.project_files.last())
            .map(Utf8PathBuf::as_path)
            .or(self.user_file.as_deref())
    }

    /// Directory of [`primary_file`](Self::primary_file). Relative paths in
    /// the config resolve against it.
    pub fn primary_dir(&self) -> Option<&Utf8Path> {
        self.primary_file().and_then(Utf8Path::parent)
    }

    fn is_empty(&self) -> bool {
        self.primary_file().is_none()
    }
}

/// Extensions tried in each directory. Later ones win when several exist.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Config file stem and user config directory name.
const APP_NAME: &str = "resume-ats";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "RESUME_ATS_";

/// Builds a [`Config`] from defaults, files, and the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    search_from: Option<Utf8PathBuf>,
    user_config: bool,
    stop_at: Option<String>,
    extra_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and stops project search at a
    /// `.git` directory.
    pub fn new() -> Self {
        Self {
            search_from: None,
            user_config: true,
            stop_at: Some(".git".to_string()),
            extra_files: Vec::new(),
        }
    }

    /// Search `dir` and its ancestors for project config.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_from = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Toggle the user config layer.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop the ancestor walk above a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.stop_at = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.stop_at = None;
        self
    }

    /// Layer `path` over everything discovered. Repeated calls stack, last
    /// one wins.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.extra_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Find the files this loader would read, without reading them.
    pub fn sources(&self) -> ConfigSources {
        ConfigSources {
            user_file: self.user_config.then(find_user_config).flatten(),
            project_files: self
                .search_from
                .as_deref()
                .map(|dir| discover_project_configs(dir, self.stop_at.as_deref()))
                .unwrap_or_default(),
            explicit_files: self.extra_files.clone(),
        }
    }

    /// Merge defaults, user config, project config, explicit files, and
    /// `RESUME_ATS_*` variables, in rising precedence.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.sources();
        let layers = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&sources.explicit_files);

        let figment = layers
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                |figment, path| {
                    tracing::debug!(%path, "merging config file");
                    merge_file(figment, path)
                },
            )
            // RESUME_ATS_LOG_LEVEL=debug, RESUME_ATS_SCORING__VERSION=trial, etc.
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            profile = %config.scoring.version,
            role_overrides = config.role_templates.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails when no config file exists.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        if self.sources().is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }
}

/// Config files in the nearest directory, from `start` upward, that has any.
///
/// Dotfiles come before plain names so `resume-ats.toml` beats
/// `.resume-ats.toml`. A directory holding `stop_at` is still searched, but
/// its parents never are.
fn discover_project_configs(start: &Utf8Path, stop_at: Option<&str>) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = [".", ""]
            .iter()
            .flat_map(|prefix| {
                CONFIG_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{prefix}{APP_NAME}.{ext}")))
            })
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if let Some(marker) = stop_at
            && dir.join(marker).exists()
        {
            break;
        }
    }
    Vec::new()
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// Platform config directory for resume-ats, e.g. `~/.config/resume-ats` on
/// Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::StuffingCount;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Held by tests that touch process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn isolated() -> ConfigLoader {
        ConfigLoader::new().with_user_config(false)
    }

    fn write(dir: &std::path::Path, name: &str, body: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        utf8(path)
    }

    #[test]
    fn defaults_without_any_source() {
        let (config, sources) = isolated().without_boundary_marker().load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));
        assert!(config.role_templates.is_empty());
        assert!(sources.primary_file().is_none());
        assert!(sources.primary_dir().is_none());
    }

    #[test]
    fn explicit_files_stack_in_order() {
        let tmp = TempDir::new().unwrap();
        let base = write(tmp.path(), "base.toml", "log_level = \"warn\"\nlog_dir = \"/var/log/ats\"\n");
        let top = write(tmp.path(), "top.toml", r#"log_level = "error""#);

        let (config, sources) = isolated().with_file(&base).with_file(&top).load().unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.log_dir.as_deref().map(Utf8Path::as_str), Some("/var/log/ats"));
        assert_eq!(sources.primary_file(), Some(top.as_path()));
    }

    #[test]
    fn project_config_found_from_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let job_hunt = tmp.path().join("job-hunt");
        let drafts = job_hunt.join("drafts").join("v3");
        fs::create_dir_all(&drafts).unwrap();
        let found = write(&job_hunt, ".resume-ats.yaml", "log_level: debug\n");

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(utf8(drafts))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(sources.project_files, vec![found.clone()]);
        assert_eq!(sources.primary_dir(), found.parent());
    }

    #[test]
    fn git_directory_bounds_the_walk() {
        let tmp = TempDir::new().unwrap();
        let outer = tmp.path().join("outer");
        let repo = outer.join("repo");
        let cwd = repo.join("resumes");
        fs::create_dir_all(&cwd).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        write(&outer, ".resume-ats.toml", r#"log_level = "warn""#);

        let (config, sources) = isolated()
            .with_boundary_marker(".git")
            .with_project_search(utf8(cwd))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn config_beside_the_boundary_is_still_found() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let cwd = repo.join("resumes");
        fs::create_dir_all(&cwd).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        write(&repo, "resume-ats.toml", r#"log_level = "warn""#);

        let (config, _) = isolated().with_project_search(utf8(cwd)).load().unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn walk_stops_at_a_start_directory_holding_git() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let repo = home.join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        write(&home, "resume-ats.toml", r#"log_level = "debug""#);

        let (config, sources) = isolated()
            .with_boundary_marker(".git")
            .with_project_search(utf8(repo))
            .load()
            .unwrap();

        assert!(sources.project_files.is_empty(), "found {:?}", sources.project_files);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn plain_name_beats_dotfile_in_one_directory() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".resume-ats.toml", r#"log_level = "warn""#);
        write(tmp.path(), "resume-ats.yaml", "log_level: error\n");

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path().to_path_buf()))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.project_files[0].as_str().ends_with(".resume-ats.toml"));
    }

    #[test]
    fn nearest_directory_shadows_ancestors() {
        let tmp = TempDir::new().unwrap();
        let child = tmp.path().join("child");
        fs::create_dir_all(&child).unwrap();
        write(tmp.path(), ".resume-ats.toml", "max_input_bytes = 10\n");
        write(&child, "resume-ats.toml", r#"log_level = "error""#);

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(utf8(child))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.max_input_bytes, None, "ancestor files are not merged");
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn explicit_file_wins_over_project_config() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".resume-ats.toml", r#"log_level = "warn""#);
        let explicit = write(tmp.path(), "ci.toml", r#"log_level = "error""#);

        let (config, sources) = isolated()
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path().to_path_buf()))
            .with_file(&explicit)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 1);
        assert_eq!(sources.primary_file(), Some(explicit.as_path()));
    }

    #[test]
    fn load_or_error_requires_a_file() {
        let result = isolated().without_boundary_marker().load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));

        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "c.json", r#"{"log_level": "debug"}"#);
        let (config, _) = isolated().with_file(file).load_or_error().unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn malformed_file_is_a_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "bad.toml", "log_level = \"loud\"\n");
        let err = isolated().with_file(file).load().unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn user_config_dir_is_named_for_the_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains(APP_NAME));
        }
    }

    #[test]
    fn input_limit_switch() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "c.toml", "max_input_bytes = 1024\n");
        let (config, _) = isolated().with_file(&file).load().unwrap();
        assert_eq!(config.input_limit(), Some(1024));

        let off = Config {
            disable_input_limit: true,
            ..config
        };
        assert_eq!(off.max_input_bytes, Some(1024));
        assert_eq!(off.input_limit(), None);
    }

    #[test]
    fn partial_scoring_profile_keeps_defaults() {
        let yaml = "scoring:\n  version: trial\n  keyword:\n    stuffing_count: max\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scoring.version, "trial");
        assert_eq!(config.scoring.keyword.stuffing_count, StuffingCount::Max);
        assert_eq!(config.scoring.keyword.max, 40);
        assert_eq!(config.scoring.tone, ScoringProfile::default().tone);
    }

    #[test]
    fn role_templates_deserialize_from_yaml() {
        let yaml = r#"
role_templates:
  barista:
    must_have: ["espresso", "customer service"]
    tools: ["POS"]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let barista = &config.role_templates["barista"];
        assert_eq!(barista.must_have, vec!["espresso", "customer service"]);
        assert!(barista.nice_to_have.is_empty());
        assert!(config.role_template_provider().is_overridden("barista"));
    }

    #[test]
    fn relative_dictionary_path_resolves_against_config_dir() {
        let config = Config {
            dictionary_path: Some(Utf8PathBuf::from("words.txt")),
            ..Config::default()
        };
        assert_eq!(
            config.resolved_dictionary_path(Some(Utf8Path::new("/etc/resume-ats"))),
            Some(Utf8PathBuf::from("/etc/resume-ats/words.txt"))
        );
        let absolute = Config {
            dictionary_path: Some(Utf8PathBuf::from("/usr/share/dict/words")),
            ..Config::default()
        };
        assert_eq!(
            absolute.resolved_dictionary_path(Some(Utf8Path::new("/etc"))),
            Some(Utf8PathBuf::from("/usr/share/dict/words"))
        );
        assert!(Config::default().dictionary_provider(None).is_none());
    }

    #[test]
    #[allow(unsafe_code)]
    fn environment_overrides_files() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "c.toml", "[scoring]\nversion = \"from-file\"\n");

        // SAFETY: ENV_LOCK serializes every test that touches the environment.
        unsafe {
            std::env::set_var("RESUME_ATS_SCORING__VERSION", "from-env");
        }
        let result = isolated().with_file(file).load();
        // SAFETY: as above.
        unsafe {
            std::env::remove_var("RESUME_ATS_SCORING__VERSION");
        }

        let (config, _) = result.unwrap();
        assert_eq!(config.scoring.version, "from-env");
    }
}
