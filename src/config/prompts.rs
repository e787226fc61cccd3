//! Prompt configuration

use serde::Deserialize;
use std::path::Path;

use super::error::ValidationError;

/// Prompt source configuration
///
/// Prompts are compiled into the binary; setting `dir` overrides them with
/// files from disk, which is how prompt wording gets iterated without a
/// rebuild.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptConfig {
    /// Directory of prompt text files overriding the built-in set
    pub dir: Option<String>,
}

impl PromptConfig {
    /// Validate prompt configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref dir) = self.dir {
            if !Path::new(dir).is_dir() {
                return Err(ValidationError::MissingPromptDir(dir.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dir_is_valid() {
        assert!(PromptConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_dir_rejected() {
        let config = PromptConfig {
            dir: Some("/definitely/not/a/real/path".to_string()),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_existing_dir_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PromptConfig {
            dir: Some(tmp.path().to_string_lossy().into_owned()),
        };
        assert!(config.validate().is_ok());
    }
}
