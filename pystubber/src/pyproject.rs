use crate::StubError;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::*};

/// Knobs for stub rendering, read from `[tool.pystubber]` in `pyproject.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StubConfig {
    /// Emit `_private` class members too (dunders are always shown).
    pub include_private: bool,
    /// Re-document members inherited from classes of the same module.
    pub inherited_members: bool,
    /// Emit a `# Method resolution order:` comment for non-trivial hierarchies.
    pub mro_comments: bool,
    /// Width above which `__all__` is written one name per line.
    pub line_width: usize,
    /// Emit `__version__`, `__author__`, ... as trailing comment sections.
    pub metadata_trailer: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            include_private: false,
            inherited_members: true,
            mro_comments: true,
            line_width: 79,
            metadata_trailer: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyProject {
    pub tool: Option<Tool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub pystubber: Option<StubConfig>,
}

impl PyProject {
    pub fn parse_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.file_name() != Some("pyproject.toml".as_ref()) {
            bail!("{} is not a pyproject.toml", path.display())
        }
        let content = fs::read_to_string(path).map_err(|source| StubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_at(&content, path)
    }

    fn from_str_at(content: &str, path: &Path) -> Result<Self> {
        toml::de::from_str(content).map_err(|e| {
            StubError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// `[tool.pystubber]` if present, defaults otherwise.
    pub fn stub_config(&self) -> StubConfig {
        self.tool
            .as_ref()
            .and_then(|tool| tool.pystubber.clone())
            .unwrap_or_default()
    }
}

impl StubConfig {
    pub fn from_pyproject_toml(path: impl AsRef<Path>) -> Result<Self> {
        Ok(PyProject::parse_toml(path)?.stub_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_uses_defaults() -> Result<()> {
        let project = PyProject::from_str_at(
            r#"
            [project]
            name = "demo"
            "#,
            Path::new("pyproject.toml"),
        )?;
        assert_eq!(project.stub_config(), StubConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_table() -> Result<()> {
        let project = PyProject::from_str_at(
            r#"
            [tool.pystubber]
            include-private = true
            line-width = 100
            "#,
            Path::new("pyproject.toml"),
        )?;
        let config = project.stub_config();
        assert!(config.include_private);
        assert_eq!(config.line_width, 100);
        assert!(config.inherited_members);
        assert!(config.mro_comments);
        Ok(())
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = PyProject::from_str_at(
            "[tool.pystubber]\nline-width = \"wide\"\n",
            Path::new("pyproject.toml"),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StubError>(),
            Some(StubError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_other_file_names() {
        assert!(StubConfig::from_pyproject_toml("setup.cfg").is_err());
    }
}
