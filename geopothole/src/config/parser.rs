//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};
use reqwest::Url;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = non_empty(section, "base_url") {
            Url::parse(v).map_err(|e| invalid("server", "base_url", v, &e.to_string()))?;
            config.server.base_url = v.to_string();
        }
        if let Some(v) = non_empty(section, "endpoint") {
            config.server.endpoint = v.to_string();
        }
    }

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        if let Some(v) = section.get("enabled") {
            config.location.enabled = parse_bool("location", "enabled", v)?;
        }
        if let Some(v) = non_empty(section, "gpsd_host") {
            config.location.gpsd_host = v.to_string();
        }
        if let Some(v) = section.get("gpsd_port") {
            config.location.gpsd_port =
                parse_number("location", "gpsd_port", v, "must be a port number (1-65535)")?;
            if config.location.gpsd_port == 0 {
                return Err(invalid(
                    "location",
                    "gpsd_port",
                    v,
                    "must be a port number (1-65535)",
                ));
            }
        }
        if let Some(v) = section.get("high_accuracy") {
            config.location.high_accuracy = parse_bool("location", "high_accuracy", v)?;
        }
        if let Some(v) = section.get("timeout") {
            config.location.timeout =
                parse_number("location", "timeout", v, "must be a positive integer (seconds)")?;
            if config.location.timeout == 0 {
                return Err(invalid(
                    "location",
                    "timeout",
                    v,
                    "must be a positive integer (seconds)",
                ));
            }
        }
        if let Some(v) = section.get("maximum_age") {
            config.location.maximum_age = parse_number(
                "location",
                "maximum_age",
                v,
                "must be a non-negative integer (seconds)",
            )?;
        }
    }

    // [detection] section
    if let Some(section) = ini.section(Some("detection")) {
        if let Some(v) = section.get("min_confidence") {
            let reason = "must be a number between 0 and 100";
            let value: f64 = parse_number("detection", "min_confidence", v, reason)?;
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid("detection", "min_confidence", v, reason));
            }
            config.detection.min_confidence = value;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

/// Trimmed value of `key`, or `None` if missing or blank.
fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigFileError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(section, key, value, "must be true or false")),
    }
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
