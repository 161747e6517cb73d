//! Exit codes for the CLI

use relnotes_core::ConfigError;
use relnotes_github::CollectorError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error (missing milestone, repository or credential)
pub const CONFIG_ERROR: i32 = 2;

/// Collecting pull requests failed
pub const COLLECTOR_ERROR: i32 = 3;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Pick the exit code for an error by looking through its causes
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
        if let Some(err) = cause.downcast_ref::<CollectorError>() {
            return if err.is_config() {
                CONFIG_ERROR
            } else {
                COLLECTOR_ERROR
            };
        }
    }
    ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnotes_core::ChangelogError;

    #[test]
    fn test_missing_field_is_config_error() {
        let err = anyhow::Error::new(ConfigError::MissingField("milestone".to_string()));
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let err = anyhow::Error::new(CollectorError::MissingCredential("GITHUB_TOKEN".to_string()))
            .context("creating GitHub client");
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_api_error_is_collector_error() {
        let err = anyhow::Error::new(CollectorError::ApiError {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(for_error(&err), COLLECTOR_ERROR);
    }

    #[test]
    fn test_config_error_behind_context() {
        let err = anyhow::Error::new(ConfigError::InvalidValue {
            field: "taxonomy.categories".to_string(),
            message: "at least one category is required".to_string(),
        })
        .context("loading relnotes.yaml");
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_write_failure_is_general_error() {
        let err = anyhow::Error::new(ChangelogError::WriteFailed {
            path: "changelog.md".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(for_error(&err), ERROR);
    }

    #[test]
    fn test_other_error() {
        assert_eq!(for_error(&anyhow::anyhow!("anything")), ERROR);
    }
}
