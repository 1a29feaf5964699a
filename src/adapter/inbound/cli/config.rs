//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::{Config, TEMPLATE};
use crate::infrastructure::config::{CommandEndpoint, OperatorConfig};

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Set control.base_url in {}", path.display()));
    output::note("2. Set operator.id (or HALTCTL_OPERATOR)");
    output::note(&format!(
        "3. Run: haltctl config validate -c {}",
        path.display()
    ));
    output::note(&format!("4. Run: haltctl watch -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let status_url = config.status_url()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config show",
            "path": path.display().to_string(),
            "status_url": status_url.as_str(),
            "config": serde_json::to_value(&config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());

    output::section("Control Plane");
    output::field("Base URL", &config.control.base_url);
    output::field("Status feed", status_url);
    output::field("Endpoint", config.control.endpoint);
    output::field("Timeout", format!("{}ms", config.control.request_timeout_ms));
    output::field("Connect", format!("{}ms", config.control.connect_timeout_ms));

    output::section("Status Stream");
    output::field("Delay", format!("{}ms", config.stream.reconnect_delay_ms));
    output::field("Handshake", format!("{}ms", config.stream.connect_timeout_ms));
    if config.stream.backoff_multiplier > 1.0 {
        output::field("Multiplier", config.stream.backoff_multiplier);
        output::field("Max delay", format!("{}ms", config.stream.max_reconnect_delay_ms));
    }

    output::section("Operator");
    output::field("ID", &config.operator.id);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    let warnings = warnings(&config);
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("haltctl config show -c {}", path.display()));

    Ok(())
}

/// Non-fatal findings worth surfacing to the operator.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.control.base_url.trim_start().starts_with("http://") {
        warnings.push("control.base_url is not HTTPS; commands travel unencrypted".to_string());
    }
    if config.control.endpoint == CommandEndpoint::LegacyKill {
        warnings.push("legacy_kill endpoint is deprecated and cannot resume".to_string());
    }
    if config.operator.id == OperatorConfig::default().id {
        warnings.push("operator.id is still the placeholder identity".to_string());
    }
    warnings
}
