use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HygConfig {
    pub brightest: BrightestConfig,
    pub cells: CellsConfig,
    pub info: InfoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightestConfig {
    pub sqlite_file: PathBuf,
    pub count: usize,
}

impl Default for BrightestConfig {
    fn default() -> Self {
        Self {
            sqlite_file: PathBuf::from("stars_brightest.sqlite3"),
            count: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellsConfig {
    pub sqlite_file: PathBuf,
    pub skip: usize,
    pub lvl_0_count: usize,
    pub lvl_1_count: usize,
    pub include_rest: bool,
}

impl Default for CellsConfig {
    fn default() -> Self {
        Self {
            sqlite_file: PathBuf::from("stars_h3.sqlite3"),
            skip: 0,
            lvl_0_count: 100,
            lvl_1_count: 100,
            include_rest: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub sqlite_file: PathBuf,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            sqlite_file: PathBuf::from("stars_info.sqlite3"),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("hygdb.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<HygConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: HygConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &HygConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(Some(&dir.path().join("hygdb.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hygdb.toml");
        std::fs::write(&path, "[cells]\nskip = 10\ninclude_rest = true\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.cells.skip, 10);
        assert!(config.cells.include_rest);
        assert_eq!(config.cells.lvl_0_count, 100);
        assert_eq!(config.brightest.count, 300);
        assert_eq!(config.info.sqlite_file, PathBuf::from("stars_info.sqlite3"));
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hygdb.toml");
        let config = HygConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), Some(config));
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("out").join("nested").join("stars.sqlite3");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
