// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use avionix_core::AvionixError;
use avionix_state::{ConfigFormat, ConfigLoader, Configuration};
use avionix_test_utils::fixtures::{FUEL_ONLY_JSON, FUEL_ONLY_TOML, MALFORMED_JSON};
use avionix_test_utils::LogCapture;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("avionix-{}-{name}", std::process::id()))
}

#[tokio::test]
async fn test_loads_json_file() -> anyhow::Result<()> {
    // Arrange
    let path = scratch_file("simvars.json");
    tokio::fs::write(&path, FUEL_ONLY_JSON).await?;

    // Act
    let config = ConfigLoader::from_file(&path).try_load().await?;

    // Assert
    assert_eq!(config.variables.len(), 1);
    assert_eq!(config.variables[0].name, "FUEL");
    tokio::fs::remove_file(&path).await?;
    Ok(())
}

#[tokio::test]
async fn test_loads_toml_file_by_extension() -> anyhow::Result<()> {
    let path = scratch_file("simvars.toml");
    tokio::fs::write(&path, FUEL_ONLY_TOML).await?;

    let config = ConfigLoader::from_file(&path).try_load().await?;

    assert_eq!(config.interval(), Duration::from_millis(500));
    tokio::fs::remove_file(&path).await?;
    Ok(())
}

#[tokio::test]
async fn test_missing_file_falls_back() {
    // Arrange
    let logs = LogCapture::new();
    let _guard = logs.set_default();
    let loader = ConfigLoader::from_file(scratch_file("does-not-exist.json"));

    // Act
    let config = loader.load().await;

    // Assert
    assert_eq!(config, Configuration::fallback());
    assert_eq!(logs.warning_count(), 1);
    assert!(logs.contains(tracing::Level::WARN, "fallback"));
}

#[tokio::test]
async fn test_malformed_document_falls_back() {
    let logs = LogCapture::new();
    let _guard = logs.set_default();

    let config = ConfigLoader::from_json(MALFORMED_JSON).load().await;

    assert_eq!(config, Configuration::fallback());
    assert!(logs.contains(tracing::Level::WARN, "invalid JSON"));
}

#[tokio::test]
async fn test_try_load_reports_config_unavailable() {
    let result = ConfigLoader::from_json(MALFORMED_JSON).try_load().await;

    assert!(matches!(
        result,
        Err(AvionixError::ConfigUnavailable { ref context, .. }) if context == "inline Json"
    ));
}

#[tokio::test]
async fn test_successful_load_logs_info() -> anyhow::Result<()> {
    let logs = LogCapture::new();
    let _guard = logs.set_default();

    let config = ConfigLoader::from_toml(FUEL_ONLY_TOML).load().await;

    assert_eq!(config.variables.len(), 1);
    assert_eq!(logs.warning_count(), 0);
    assert!(logs.contains(tracing::Level::INFO, "configuration loaded"));
    Ok(())
}

#[tokio::test]
async fn test_each_load_is_a_single_attempt() -> anyhow::Result<()> {
    // Arrange
    let path = scratch_file("late.json");
    let loader = ConfigLoader::from_file(&path);
    assert_eq!(loader.load().await, Configuration::fallback());

    // Act
    tokio::fs::write(&path, FUEL_ONLY_JSON).await?;
    let config = loader.load().await;

    // Assert
    assert_eq!(config.variables[0].name, "FUEL");
    tokio::fs::remove_file(&path).await?;
    Ok(())
}

#[test]
fn test_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("a/simvars.toml")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("a/SIMVARS.TOML")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("a/simvars.json")), ConfigFormat::Json);
    assert_eq!(ConfigFormat::from_path(Path::new("simvars")), ConfigFormat::Json);
}
