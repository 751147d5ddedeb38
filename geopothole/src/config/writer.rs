//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[server]
; Base URL used to resolve a relative endpoint
base_url = {}
; Report endpoint (relative to base_url, or an absolute URL)
endpoint = {}

[location]
; Track position through gpsd (false = coordinates must be given manually)
enabled = {}
gpsd_host = {}
gpsd_port = {}
; Only accept 3D fixes
high_accuracy = {}
; Seconds to wait for each position fix
timeout = {}
; Maximum age in seconds of a cached fix (0 = always wait for a fresh one)
maximum_age = {}

[detection]
; Minimum confidence (0-100) for reports read by `geopothole feed`
min_confidence = {}

[logging]
file = {}
"#,
        config.server.base_url,
        config.server.endpoint,
        config.location.enabled,
        config.location.gpsd_host,
        config.location.gpsd_port,
        config.location.high_accuracy,
        config.location.timeout,
        config.location.maximum_age,
        config.detection.min_confidence,
        config.logging.file.display(),
    )
}
