//! Comma-separated export of a calibration session.
//!
//! Layout, one block per action in sequence order:
//!
//! ```text
//! Left Click
//! 0.01,0.63,0.95,...
//! Right Click
//! ...
//! ```
//!
//! A header row holds the action name alone; each following row is one
//! waveform with its samples in order.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::calibration::CalibrationSession;
use crate::error::{log_calibration_error, CalibrationError};

/// What was written by a successful export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub header_rows: usize,
    pub data_rows: usize,
}

/// Write `session` to `destination`, replacing any existing file
///
/// # Errors
/// `CalibrationError::Io` if the file cannot be created or written. There is
/// no retry; the caller keeps the session and may try again.
pub fn export_session<P: AsRef<Path>>(
    session: &CalibrationSession,
    destination: P,
) -> Result<ExportSummary, CalibrationError> {
    let path = destination.as_ref();
    let to_error = |err: io::Error| CalibrationError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    let result = File::create(path).map_err(to_error).and_then(|file| {
        let mut writer = BufWriter::new(file);
        let summary = write_session(session, &mut writer).map_err(to_error)?;
        writer.flush().map_err(to_error)?;
        Ok(summary)
    });

    match &result {
        Ok(summary) => info!(
            "[Export] Wrote {} actions / {} waveforms to {}",
            summary.header_rows,
            summary.data_rows,
            path.display()
        ),
        Err(err) => log_calibration_error(err, "export_session"),
    }
    result
}

/// Write `session` in export format to any writer
pub fn write_session<W: Write>(
    session: &CalibrationSession,
    writer: &mut W,
) -> io::Result<ExportSummary> {
    let mut summary = ExportSummary {
        header_rows: 0,
        data_rows: 0,
    };

    for (action, waveforms) in session.blocks() {
        writeln!(writer, "{}", action.display_name())?;
        summary.header_rows += 1;

        for waveform in waveforms {
            let row = waveform
                .samples()
                .iter()
                .map(|sample| sample.to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(writer, "{}", row)?;
            summary.data_rows += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationAction;
    use crate::signal::Waveform;

    fn completed_session() -> CalibrationSession {
        let mut session = CalibrationSession::standard();
        for i in 0..4 {
            session.record_capture(Some(Waveform::new(vec![i as f64, -0.5, 1.25])));
        }
        session
    }

    #[test]
    fn test_write_completed_session() {
        let mut out = Vec::new();
        let summary = write_session(&completed_session(), &mut out).unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                header_rows: 4,
                data_rows: 4
            }
        );

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Left Click",
                "0,-0.5,1.25",
                "Right Click",
                "1,-0.5,1.25",
                "Scroll Up",
                "2,-0.5,1.25",
                "Scroll Down",
                "3,-0.5,1.25",
            ]
        );
    }

    #[test]
    fn test_partial_session_keeps_all_headers() {
        let mut session = CalibrationSession::standard();
        session.record_capture(Some(Waveform::new(vec![0.1])));

        let mut out = Vec::new();
        let summary = write_session(&session, &mut out).unwrap();
        assert_eq!(summary.header_rows, 4);
        assert_eq!(summary.data_rows, 1);
    }

    #[test]
    fn test_samples_round_trip_exactly() {
        let samples = vec![0.1 + 0.2, -1.0e-7, 0.9999999999999999];
        let mut session = CalibrationSession::new(vec![CalibrationAction::ScrollUp]);
        session.record_capture(Some(Waveform::new(samples.clone())));

        let mut out = Vec::new();
        write_session(&session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        let parsed: Vec<f64> = row.split(',').map(|s| s.parse().unwrap()).collect();
        assert_eq!(parsed, samples);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibration.csv");

        let summary = export_session(&completed_session(), &path).unwrap();
        assert_eq!(summary.data_rows, 4);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Left Click\n"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("calibration.csv");

        let err = export_session(&completed_session(), &path).unwrap_err();
        assert!(matches!(err, CalibrationError::Io { .. }));
    }
}
