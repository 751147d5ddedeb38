//! gpsd JSON protocol parsing.
//!
//! gpsd streams newline-delimited JSON objects, each tagged by a `class`
//! field. Only `TPV` (time-position-velocity) reports carry positions:
//!
//! ```text
//! {"class":"VERSION","release":"3.25","proto_major":3,"proto_minor":15}
//! {"class":"TPV","device":"/dev/ttyACM0","mode":3,"time":"2026-03-01T10:15:30.000Z",
//!  "lat":12.971600,"lon":77.594600,"eph":4.2,"epx":3.1,"epy":4.0}
//! ```
//!
//! `mode` is the fix quality: 0/1 = no fix, 2 = 2D, 3 = 3D.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::location::Position;

/// Command that enables JSON streaming on a new connection.
pub const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true}\n";

/// Minimum mode for a usable 2D fix.
const MODE_2D: u8 = 2;

/// Mode for a 3D fix.
const MODE_3D: u8 = 3;

/// A gpsd report. Classes other than TPV are ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "class")]
pub enum Report {
    #[serde(rename = "TPV")]
    Tpv(Tpv),
    #[serde(other)]
    Other,
}

/// Time-position-velocity report. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tpv {
    pub mode: u8,
    pub time: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Estimated horizontal position error, meters.
    pub eph: Option<f64>,
    /// Estimated longitude error, meters.
    pub epx: Option<f64>,
    /// Estimated latitude error, meters.
    pub epy: Option<f64>,
}

impl Tpv {
    /// Convert to a position if the fix is good enough.
    ///
    /// `require_3d` raises the minimum mode from 2D to 3D.
    pub fn to_position(&self, require_3d: bool) -> Option<Position> {
        let min_mode = if require_3d { MODE_3D } else { MODE_2D };
        if self.mode < min_mode {
            return None;
        }

        let (lat, lon) = (self.lat?, self.lon?);
        let timestamp = self
            .time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        Some(Position::at(lat, lon, self.accuracy(), timestamp))
    }

    /// Horizontal accuracy: `eph`, else the worse of `epx`/`epy`, else 0.
    fn accuracy(&self) -> f64 {
        let axis_error = match (self.epx, self.epy) {
            (Some(x), Some(y)) => Some(x.max(y)),
            (x, y) => x.or(y),
        };
        self.eph.or(axis_error).unwrap_or(0.0)
    }
}

/// Parse one line from gpsd into a position fix.
///
/// Returns `None` for non-TPV reports, fixes below the required mode and
/// lines that are not valid JSON.
pub fn parse_fix(line: &str, require_3d: bool) -> Option<Position> {
    match serde_json::from_str::<Report>(line.trim()) {
        Ok(Report::Tpv(tpv)) => tpv.to_position(require_3d),
        Ok(Report::Other) | Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TPV_3D: &str = r#"{"class":"TPV","device":"/dev/ttyACM0","mode":3,"time":"2026-03-01T10:15:30.000Z","lat":12.9716,"lon":77.5946,"alt":920.0,"eph":4.2,"epx":3.1,"epy":4.0,"speed":0.1}"#;

    #[test]
    fn test_parse_3d_fix() {
        let position = parse_fix(TPV_3D, true).expect("3D fix should parse");
        assert_eq!(position.coords.latitude, 12.9716);
        assert_eq!(position.coords.longitude, 77.5946);
        assert_eq!(position.coords.accuracy, 4.2);
        assert_eq!(position.timestamp.to_rfc3339(), "2026-03-01T10:15:30+00:00");
    }

    #[test]
    fn test_2d_fix_rejected_when_3d_required() {
        let line = r#"{"class":"TPV","mode":2,"lat":1.0,"lon":2.0}"#;
        assert!(parse_fix(line, true).is_none());
        assert!(parse_fix(line, false).is_some());
    }

    #[test]
    fn test_no_fix_is_ignored() {
        let line = r#"{"class":"TPV","mode":1,"lat":1.0,"lon":2.0}"#;
        assert!(parse_fix(line, false).is_none());
    }

    #[test]
    fn test_missing_coordinates_are_ignored() {
        let line = r#"{"class":"TPV","mode":3,"time":"2026-03-01T10:15:30.000Z"}"#;
        assert!(parse_fix(line, false).is_none());
    }

    #[test]
    fn test_other_classes_are_ignored() {
        let lines = [
            r#"{"class":"VERSION","release":"3.25","proto_major":3,"proto_minor":15}"#,
            r#"{"class":"DEVICES","devices":[]}"#,
            r#"{"class":"SKY","satellites":[]}"#,
        ];
        for line in lines {
            assert!(parse_fix(line, false).is_none(), "{line}");
        }
    }

    #[test]
    fn test_garbage_is_ignored() {
        assert!(parse_fix("not json", false).is_none());
        assert!(parse_fix("", false).is_none());
    }

    #[test]
    fn test_accuracy_falls_back_to_axis_errors() {
        let line = r#"{"class":"TPV","mode":3,"lat":1.0,"lon":2.0,"epx":3.0,"epy":7.5}"#;
        assert_eq!(parse_fix(line, false).unwrap().coords.accuracy, 7.5);

        let line = r#"{"class":"TPV","mode":3,"lat":1.0,"lon":2.0,"epy":2.5}"#;
        assert_eq!(parse_fix(line, false).unwrap().coords.accuracy, 2.5);

        let line = r#"{"class":"TPV","mode":3,"lat":1.0,"lon":2.0}"#;
        assert_eq!(parse_fix(line, false).unwrap().coords.accuracy, 0.0);
    }

    #[test]
    fn test_invalid_time_uses_now() {
        let line = r#"{"class":"TPV","mode":3,"time":"yesterday","lat":1.0,"lon":2.0}"#;
        let position = parse_fix(line, false).unwrap();
        assert!(position.age() < std::time::Duration::from_secs(5));
    }
}
