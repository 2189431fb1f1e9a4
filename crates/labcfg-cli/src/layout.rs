//! On-disk layout of a configuration tree.
//!
//! ```text
//! <base>/
//!   templates/<type>.yaml.template
//!   validation/schema/config.schema.json
//! ```

use std::path::{Path, PathBuf};

use labcfg_core::ConfigType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_dir: PathBuf,
    schema_path: PathBuf,
}

impl Layout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let schema_path = base_dir
            .join("validation")
            .join("schema")
            .join("config.schema.json");
        Self {
            base_dir,
            schema_path,
        }
    }

    pub fn with_schema_path(mut self, schema_path: impl Into<PathBuf>) -> Self {
        self.schema_path = schema_path.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Expected location of the document for `config_type`.
    pub fn config_path(&self, config_type: ConfigType) -> PathBuf {
        self.base_dir
            .join("templates")
            .join(format!("{config_type}.yaml.template"))
    }

    /// Resolve a user-supplied path.
    ///
    /// Absolute paths are returned as-is. A relative path is taken relative
    /// to the current directory when it exists there, then under the base
    /// directory. A path found in neither place is returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.exists() {
            return path.to_path_buf();
        }
        let under_base = self.base_dir.join(path);
        if under_base.exists() {
            under_base
        } else {
            path.to_path_buf()
        }
    }
}
