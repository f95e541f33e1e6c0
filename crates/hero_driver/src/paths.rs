//! Cross-platform application paths

use std::path::{Path, PathBuf};

use crate::error::DriverError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, DriverError> {
        let base = dirs::config_dir().ok_or(DriverError::NoConfigDir)?;
        Ok(Self::from_dir(base.join("chaos_order")))
    }

    pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("driver.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_lives_in_config_dir() {
        let paths = AppPaths::from_dir("/tmp/chaos_order");
        assert_eq!(paths.config_dir(), Path::new("/tmp/chaos_order"));
        assert_eq!(paths.settings_file(), PathBuf::from("/tmp/chaos_order/driver.json"));
    }
}
