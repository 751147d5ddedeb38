//! Feed command - submit detections read from stdin.
//!
//! Each input line holds one confidence score (0-100) from the detection
//! pipeline. Lines below the threshold are skipped, unparseable lines are
//! logged and skipped, and every submitted report prints one JSON line.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the feed command until stdin closes or Ctrl+C.
pub async fn run(runner: &CliRunner, min_confidence: Option<f64>) -> Result<(), CliError> {
    runner.log_startup("feed");
    let config = runner.config();
    let threshold = min_confidence.unwrap_or(config.detection.min_confidence);

    let location = runner.location_service()?;
    let reporter = runner.reporter(&config.server, location)?;

    info!(threshold, "Reading detections from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut submitted: u64 = 0;
    let mut failed: u64 = 0;

    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        let Some(confidence) = parse_confidence(&line) else {
            if !line.trim().is_empty() {
                warn!(input = %line.trim(), "Ignoring line without a confidence score");
            }
            continue;
        };

        if confidence < threshold {
            debug!(confidence, threshold, "Detection below threshold");
            continue;
        }

        let outcome = reporter.submit_report(confidence).await;
        if outcome.is_success() {
            submitted += 1;
        } else {
            failed += 1;
        }
        println!("{}", outcome.to_json());
    }

    reporter.stop_tracking();
    info!(submitted, failed, "Feed finished");
    Ok(())
}

/// Parse one input line as a finite confidence score.
fn parse_confidence(line: &str) -> Option<f64> {
    line.trim().parse::<f64>().ok().filter(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confidence() {
        assert_eq!(parse_confidence("92.5"), Some(92.5));
        assert_eq!(parse_confidence("  71\n"), Some(71.0));
        assert_eq!(parse_confidence(""), None);
        assert_eq!(parse_confidence("pothole"), None);
        assert_eq!(parse_confidence("NaN"), None);
    }
}
