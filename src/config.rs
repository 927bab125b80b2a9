use crate::logger::LogLevel;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_EXTENSIONS: &str = ".png,.jpg,.jpeg,.webp";

/// Supplies the base directory that node subfolders are resolved against.
pub trait InputRootResolver: Send + Sync {
    fn input_directory(&self) -> PathBuf;
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub input_dir: PathBuf,
    pub default_extensions: String,
    pub log_level: LogLevel,
    pub log_json: bool,
    pub log_file: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            input_dir: absolutize(Path::new(DEFAULT_INPUT_DIR)),
            default_extensions: DEFAULT_EXTENSIONS.to_string(),
            log_level: LogLevel::Info,
            log_json: false,
            log_file: None,
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let input_dir = env::var("RANDIMG_INPUT_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(|dir| absolutize(Path::new(&dir)))
            .unwrap_or_else(|| absolutize(Path::new(DEFAULT_INPUT_DIR)));
        let default_extensions = env::var("RANDIMG_EXTENSIONS")
            .ok()
            .filter(|exts| !exts.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.to_string());
        let log_level = env::var("RANDIMG_LOG_LEVEL")
            .ok()
            .and_then(|level| LogLevel::parse(&level))
            .unwrap_or(LogLevel::Info);
        let log_json = env::var("RANDIMG_LOG_JSON")
            .ok()
            .map_or(false, |val| val == "true");
        let log_file = env::var("RANDIMG_LOG_FILE").ok().filter(|p| !p.is_empty());

        LoaderConfig {
            input_dir,
            default_extensions,
            log_level,
            log_json,
            log_file,
        }
    }

    pub fn with_input_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_dir = absolutize(dir.as_ref());
        self
    }

    pub fn with_default_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.default_extensions = extensions.into();
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

impl InputRootResolver for LoaderConfig {
    fn input_directory(&self) -> PathBuf {
        self.input_dir.clone()
    }
}

// Falls back to the path as given when the working directory is unavailable.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
