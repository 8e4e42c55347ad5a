//! Configuration loading tests
//!
//! Covers file loading, graceful defaults, and environment priority.
//!
//! Note: tests that touch MOMO_* environment variables are marked #[serial]
//! so they never run concurrently with each other.

use momo_common::config::{MomoConfig, DEFAULT_PORT};
use momo_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;

const MANAGED_VARS: &[&str] = &[
    "MOMO_PORT",
    "MOMO_IMAGE_SERVICE",
    "MOMO_MUSIC_SERVICE",
    "MOMO_DEEPSEEK_API_KEY",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_load_explicit_file() {
    clear_env();
    let file = write_config(
        r#"
        host = "0.0.0.0"
        port = 7001
        static_dir = "/srv/momo/static"

        [services]
        image = "replicate"
        music = "musicgen"

        [replicate]
        api_key = "r8-key"
        "#,
    );

    let config = MomoConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 7001);
    assert_eq!(config.static_dir.to_string_lossy(), "/srv/momo/static");
    assert_eq!(config.services.image, "replicate");
    assert_eq!(config.services.music, "musicgen");
    assert_eq!(config.replicate.api_key(), Some("r8-key"));
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    clear_env();
    let result = MomoConfig::load(Some(std::path::Path::new("/nonexistent/momo.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_malformed_explicit_file_is_error() {
    clear_env();
    let file = write_config("[services\nimage = ");
    assert!(matches!(MomoConfig::load(Some(file.path())), Err(Error::Toml(_))));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = write_config(
        r#"
        port = 7001

        [services]
        image = "dalle"
        "#,
    );

    env::set_var("MOMO_PORT", "7002");
    env::set_var("MOMO_IMAGE_SERVICE", "unsplash");
    env::set_var("MOMO_DEEPSEEK_API_KEY", "sk-env");

    let config = MomoConfig::load(Some(file.path())).unwrap();
    clear_env();

    assert_eq!(config.port, 7002);
    assert_eq!(config.services.image, "unsplash");
    assert_eq!(config.deepseek.api_key(), Some("sk-env"));
}

#[test]
#[serial]
fn test_empty_file_yields_defaults() {
    clear_env();
    let file = write_config("");
    let config = MomoConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config, {
        let mut defaults = MomoConfig::default();
        defaults.apply_overrides(|_| None);
        defaults
    });
}

#[test]
fn test_default_config_path_ends_with_file_name() {
    if let Some(path) = MomoConfig::default_config_path() {
        assert!(path.ends_with("momo/momo.toml"));
    }
}
