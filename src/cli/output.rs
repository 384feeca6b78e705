//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, InterceptError, TreeError};

/// Map domain/service errors to a string for CLI output, with a hint where
/// one helps.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Intercept(InterceptError::PathNotFound { .. })
        | ApiError::Tree(TreeError::UnknownCommand(_)) => {
            format!("{}\nRun `splice tree` to list registered commands.", e)
        }
        ApiError::Intercept(InterceptError::NoTargetsConfigured) => {
            format!("{}\nPass --intercept PATH or set install.targets.", e)
        }
        _ => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::TargetPath;

    #[test]
    fn test_path_not_found_gets_hint() {
        let e = ApiError::Intercept(InterceptError::PathNotFound {
            segment: "b".to_string(),
            path: TargetPath::parse("a.b").unwrap(),
        });
        let out = map_error(&e);
        assert!(out.starts_with("Interception error: Command path segment not found: 'b' in a.b"));
        assert!(out.contains("splice tree"));
    }

    #[test]
    fn test_plain_errors_pass_through() {
        let e = ApiError::ConfigError("bad".to_string());
        assert_eq!(map_error(&e), "Configuration error: bad");
    }
}
