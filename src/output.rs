//! CSV persistence for weekly summaries.

use anyhow::Result;
use tracing::debug;

use crate::aggregate::WeeklySummary;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Writes the summaries as headerless `week,avgSunrise,avgSunset` rows,
/// replacing any existing file at `path`.
pub fn write_csv<P: AsRef<Path>>(path: P, weeks: &[WeeklySummary]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = weeks.len(), "Writing weekly CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    for week in weeks {
        writer.serialize(week)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_weeks() -> Vec<WeeklySummary> {
        vec![
            WeeklySummary {
                week: 1,
                avg_sunrise: "06:00".to_string(),
                avg_sunset: "18:00".to_string(),
            },
            WeeklySummary {
                week: 3,
                avg_sunrise: "06:45".to_string(),
                avg_sunset: "19:10".to_string(),
            },
        ]
    }

    #[test]
    fn test_write_csv_rows_without_header() {
        let path = temp_path("sun_weekly_test_rows.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_weeks()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["1,06:00,18:00", "3,06:45,19:10"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let path = temp_path("sun_weekly_test_overwrite.csv");
        fs::write(&path, "stale contents\n").unwrap();

        write_csv(&path, &sample_weeks()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_empty_sequence_produces_empty_file() {
        let path = temp_path("sun_weekly_test_empty.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());

        fs::remove_file(&path).unwrap();
    }
}
