use anyhow::Result;
use async_drills::utils::validation::Validate;
use async_drills::{AppConfig, CliConfig};
use clap::Parser;
use tempfile::TempDir;

const CONFIG: &str = r#"
[http]
placeholder_base_url = "http://localhost:3000"
sunrise_base_url = "http://localhost:3001"
timeout_seconds = 10

[sunrise]
city_a = "35.6762,139.6503"
city_b = "-33.8688,151.2093"

[countdown]
interval_ms = 500
ticks = 10
"#;

#[test]
fn test_load_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("drills.toml");
    std::fs::write(&config_path, CONFIG)?;

    let config = AppConfig::from_file(&config_path)?;
    config.validate()?;

    assert_eq!(config.http.placeholder_base_url, "http://localhost:3000");
    assert_eq!(config.http.timeout_seconds, 10);
    assert_eq!(config.sunrise.city_b()?.latitude(), -33.8688);
    assert_eq!(config.countdown.interval_ms, 500);
    Ok(())
}

#[test]
fn test_cli_flags_override_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("drills.toml");
    std::fs::write(&config_path, CONFIG)?;

    let cli = CliConfig::try_parse_from([
        "async-drills",
        "--config",
        config_path.to_str().unwrap(),
        "countdown",
        "--ticks",
        "2",
    ])?;
    let config = cli.app_config()?;

    assert_eq!(config.countdown.ticks, Some(2));
    assert_eq!(config.countdown.interval_ms, 500);
    assert_eq!(config.sunrise.city_a()?.longitude(), 139.6503);
    Ok(())
}

#[test]
fn test_invalid_config_file_values_are_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("broken.toml");
    std::fs::write(
        &config_path,
        "[sunrise]\ncity_a = \"north,south\"\n",
    )?;

    let cli = CliConfig::try_parse_from([
        "async-drills",
        "--config",
        config_path.to_str().unwrap(),
        "sunrise",
    ])?;
    let err = cli.app_config().unwrap_err();

    assert!(err.is_validation());
    Ok(())
}
