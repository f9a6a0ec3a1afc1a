use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use covqc_coverage::StrandCategory;

/// One depth table of a strand comparison.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    /// Category name, inferred from the file name when absent
    pub name: Option<String>,
    pub path: PathBuf,
}

/// TOML configuration of the `strand` subcommand.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StrandConfig {
    pub prefix: Option<String>,
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub skip_empty: bool,
    pub precision: Option<usize>,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

#[derive(Error, Debug)]
pub enum StrandConfigError {
    #[error("Config file lists no categories")]
    NoCategories,
    #[error("Cannot infer a category name from {0}, set `name` explicitly")]
    UnnamedCategory(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type StrandConfigResult<T> = std::result::Result<T, StrandConfigError>;

impl CategoryEntry {
    ///
    /// Build an entry from a `NAME=PATH` or bare `PATH` command line value.
    ///
    pub fn from_arg(value: &str) -> Self {
        match value.split_once('=') {
            Some((name, path)) if !name.is_empty() => CategoryEntry {
                name: Some(name.to_string()),
                path: PathBuf::from(path),
            },
            _ => CategoryEntry {
                name: None,
                path: PathBuf::from(value),
            },
        }
    }

    /// The explicit name, or the canonical category found in the file name.
    pub fn category_name(&self) -> StrandConfigResult<String> {
        match &self.name {
            Some(name) => Ok(name.clone()),
            None => StrandCategory::from_file_name(&self.path)
                .map(|c| c.to_string())
                .ok_or_else(|| StrandConfigError::UnnamedCategory(self.path.display().to_string())),
        }
    }
}

impl StrandConfig {
    /// Resolve relative paths against `base`.
    fn resolve_paths(&mut self, base: &Path) {
        for entry in self.categories.iter_mut() {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }
        if let Some(dir) = self.output_dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}

impl TryFrom<&Path> for StrandConfig {
    type Error = StrandConfigError;

    ///
    /// Read a config file. Relative paths inside it are taken relative to the
    /// folder holding the file.
    ///
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let mut config: StrandConfig = toml::from_str(&toml_str)?;

        if config.categories.is_empty() {
            return Err(StrandConfigError::NoCategories);
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/strand/strand.toml");
        let config = StrandConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.prefix.as_deref(), Some("sample"));
        assert_eq!(config.precision, Some(2));
        assert!(!config.skip_empty);
        assert_eq!(config.categories.len(), 4);
        assert_eq!(
            config.output_dir,
            Some(PathBuf::from("../tests/data/strand/out"))
        );
        assert_eq!(
            config.categories[3].path,
            PathBuf::from("../tests/data/strand/sample_DepthCoverage.ReverseStrand.Q30.txt")
        );
    }

    #[rstest]
    fn test_minimal_config_infers_names() {
        let path = PathBuf::from("../tests/data/strand/minimal.toml");
        let config = StrandConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.prefix, None);
        assert_eq!(config.output_dir, None);
        assert_eq!(
            config.categories[0].category_name().unwrap(),
            "ReverseStrand.Q30"
        );
    }

    #[rstest]
    fn test_config_without_categories() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefix = \"x\"").unwrap();

        let result = StrandConfig::try_from(file.path());
        assert!(matches!(result, Err(StrandConfigError::NoCategories)));
    }

    #[rstest]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[categories]]\npath = 3").unwrap();

        let result = StrandConfig::try_from(file.path());
        assert!(matches!(result, Err(StrandConfigError::Toml(_))));
    }

    #[rstest]
    #[case("ForwardStrand.Q30=fwd.txt", Some("ForwardStrand.Q30"), "fwd.txt")]
    #[case("x_DepthCoverage.BothStrands.Q00.txt.gz", None, "x_DepthCoverage.BothStrands.Q00.txt.gz")]
    #[case("=odd.txt", None, "=odd.txt")]
    fn test_entry_from_arg(
        #[case] value: &str,
        #[case] name: Option<&str>,
        #[case] path: &str,
    ) {
        let entry = CategoryEntry::from_arg(value);
        assert_eq!(entry.name.as_deref(), name);
        assert_eq!(entry.path, PathBuf::from(path));
    }

    #[rstest]
    fn test_unnamed_category() {
        let entry = CategoryEntry::from_arg("depth.txt");
        assert!(matches!(
            entry.category_name(),
            Err(StrandConfigError::UnnamedCategory(_))
        ));
    }
}
