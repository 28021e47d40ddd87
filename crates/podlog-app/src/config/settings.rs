//! Settings loading and the default config file

use std::path::{Path, PathBuf};

use podlog_core::prelude::*;

use super::types::Settings;

pub const CONFIG_DIR: &str = ".podlog";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Load settings from `<dir>/.podlog/config.toml`.
///
/// A missing or unreadable file is not an error: defaults are used and the
/// problem is logged.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match load_settings_file(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; using defaults", e);
            Settings::default()
        }
    }
}

/// Load settings from an explicit file path
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let settings = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))?;

    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Create `<dir>/.podlog/config.toml` with commented defaults.
///
/// An existing file is left untouched. Returns the config file path.
pub fn init_config_dir(dir: &Path) -> Result<PathBuf> {
    let config_dir = dir.join(CONFIG_DIR);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .map_err(|e| Error::config(format!("Failed to create .podlog dir: {}", e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# podlog configuration

[render]
chunk_lines = 1000        # Lines appended per step of a full render
drop_blank_lines = true   # Keep blank lines out of the stored history

[filter]
mode = "all"              # all | include | exclude | after | before
pattern = ""

[producer]
forward_stderr = true     # Show the producer's stderr in the panel
"#;
        std::fs::write(&config_path, default_content)?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podlog_core::{FilterMode, FilterSpec};
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILENAME), content).unwrap();
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.render.chunk_lines, 1000);
        assert!(settings.render.drop_blank_lines);
        assert!(settings.producer.forward_stderr);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[render]
chunk_lines = 250

[filter]
mode = "exclude"
pattern = "healthz"
"#,
        );

        let settings = load_settings(dir.path());
        assert_eq!(settings.render.chunk_lines, 250);
        assert!(settings.render.drop_blank_lines);
        assert_eq!(
            settings.filter,
            FilterSpec::new(FilterMode::Exclude, "healthz")
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[render\nchunk_lines = ");
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_settings_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[filter]\nmode = \"sideways\"\n");
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILENAME);
        assert!(matches!(
            load_settings_file(&path),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_init_writes_parseable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = init_config_dir(dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(load_settings_file(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[render]\nchunk_lines = 5\n");
        let path = init_config_dir(dir.path()).unwrap();
        assert_eq!(load_settings_file(&path).unwrap().render.chunk_lines, 5);
    }

    #[test]
    fn test_zero_chunk_lines_is_clamped() {
        let mut settings = Settings::default();
        settings.render.chunk_lines = 0;
        assert_eq!(settings.render.effective_chunk_lines(), 1);
    }
}
