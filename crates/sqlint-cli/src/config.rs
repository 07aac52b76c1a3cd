//! Configuration file discovery and loading

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use sqlint_core::Config;

/// Config file names, in lookup order
pub const CONFIG_FILES: &[&str] = &[".sqlintrc.toml", ".sqlintrc.json", "sqlint.toml"];

/// File written by `sqlint init`
pub const DEFAULT_CONFIG_FILE: &str = ".sqlintrc.toml";

/// Contents written by `sqlint init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sqlint configuration

# dialect = "mysql"

# ignorePatterns = ["migrations/*.sql", "temp/*.sql"]

[rules]
no-select-star = ["warning"]
keyword-case = ["warning"]
table-alias = ["info"]
"#;

/// Load configuration from a TOML or JSON file
pub fn load(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load config file {}", path.display()))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = Config::from_str_with_extension(&contents, extension)
        .wrap_err_with(|| format!("Failed to load config file {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Find a config file in `start` or any of its parent directories
pub fn find(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        // Try parent directory
        if !current.pop() {
            return None;
        }
    }
}

/// Try to find and load a config file starting from the current directory
pub fn find_and_load() -> Result<Option<Config>> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    find(&cwd).map(|path| load(&path)).transpose()
}
