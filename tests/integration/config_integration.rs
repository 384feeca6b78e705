//! Configuration loading from workspace files and environment

use crate::integration::test_utils::ENV_MUTEX;
use splice::config::{ConfigLoader, InterceptPolicy};
use splice::InstallMode;
use tempfile::TempDir;

#[test]
fn test_environment_specific_file_layers_over_workspace() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("splice.toml"),
        "[install]\nmode = \"atomic\"\ntargets = [\"foo.bar\"]\n",
    )
    .unwrap();
    std::fs::create_dir(temp_dir.path().join("config")).unwrap();
    std::fs::write(
        temp_dir.path().join("config").join("staging.toml"),
        "[install]\npolicy = \"block\"\n",
    )
    .unwrap();

    std::env::set_var("SPLICE_ENV", "staging");
    let config = ConfigLoader::load_with_global(temp_dir.path(), None);
    std::env::remove_var("SPLICE_ENV");

    let config = config.unwrap();
    assert_eq!(config.install.mode, InstallMode::Atomic);
    assert_eq!(config.install.policy, InterceptPolicy::Block);
    assert_eq!(
        config.install.target_paths().unwrap()[0].segments(),
        ["foo", "bar"]
    );
}

#[test]
fn test_invalid_logging_level_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("splice.toml"),
        "[logging]\nlevel = \"shouty\"\n",
    )
    .unwrap();

    let err = ConfigLoader::load_with_global(temp_dir.path(), None).unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}
