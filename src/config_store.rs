//! Typed updates to the application config file.
//!
//! The config is parsed as a JSON document and the named array field is
//! replaced wholesale; everything else in the document is preserved. This is
//! a data-level operation, not a text substitution, so a partial or
//! mis-anchored match cannot corrupt the file.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::aggregate::WeeklySummary;

/// Shape of one entry in the config's weekly-averages array.
#[derive(Serialize)]
struct ConfigEntry<'a> {
    week: u32,
    sunrise: &'a str,
    sunset: &'a str,
}

/// Replaces the array under `field` in the JSON config at `path` with the
/// rendered weekly summaries.
///
/// # Errors
///
/// Fails if the file is unreadable, is not a JSON object, or does not already
/// contain `field` as an array. The field must pre-exist so a typo'd name
/// cannot silently grow a new, unused key.
pub fn replace_weekly_times<P: AsRef<Path>>(
    path: P,
    field: &str,
    weeks: &[WeeklySummary],
) -> Result<()> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let mut doc: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing config JSON in {}", path.display()))?;

    let Some(obj) = doc.as_object_mut() else {
        bail!("config root in {} is not a JSON object", path.display());
    };
    match obj.get(field) {
        Some(Value::Array(_)) => {}
        Some(_) => bail!("config field {:?} is not an array", field),
        None => bail!("config field {:?} not found in {}", field, path.display()),
    }

    let entries: Vec<ConfigEntry<'_>> = weeks
        .iter()
        .map(|w| ConfigEntry {
            week: w.week,
            sunrise: &w.avg_sunrise,
            sunset: &w.avg_sunset,
        })
        .collect();
    obj.insert(field.to_string(), serde_json::to_value(&entries)?);

    let mut rendered = serde_json::to_string_pretty(&doc)?;
    rendered.push('\n');
    fs::write(path, rendered)
        .with_context(|| format!("writing config to {}", path.display()))?;

    info!(path = %path.display(), field, entries = weeks.len(), "Config updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config(name: &str, contents: &str) -> String {
        let path = format!("{}/{}", env::temp_dir().display(), name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn sample_weeks() -> Vec<WeeklySummary> {
        vec![WeeklySummary {
            week: 1,
            avg_sunrise: "06:00".to_string(),
            avg_sunset: "18:00".to_string(),
        }]
    }

    #[test]
    fn test_replaces_array_and_preserves_other_keys() {
        let path = temp_config(
            "sun_weekly_test_config.json",
            r#"{"city":"Wellington","weeklyAverageSunTimes":[{"week":9}]}"#,
        );

        replace_weekly_times(&path, "weeklyAverageSunTimes", &sample_weeks()).unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["city"], "Wellington");
        assert_eq!(doc["weeklyAverageSunTimes"][0]["week"], 1);
        assert_eq!(doc["weeklyAverageSunTimes"][0]["sunrise"], "06:00");
        assert_eq!(doc["weeklyAverageSunTimes"][0]["sunset"], "18:00");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let path = temp_config("sun_weekly_test_config_missing.json", r#"{"city":"x"}"#);

        let err = replace_weekly_times(&path, "weeklyAverageSunTimes", &sample_weeks());
        assert!(err.is_err());

        // File untouched on failure.
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"city":"x"}"#);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_array_field_is_an_error() {
        let path = temp_config(
            "sun_weekly_test_config_nonarray.json",
            r#"{"weeklyAverageSunTimes":"nope"}"#,
        );

        assert!(replace_weekly_times(&path, "weeklyAverageSunTimes", &sample_weeks()).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_object_root_is_an_error() {
        let path = temp_config("sun_weekly_test_config_root.json", "[1,2,3]");

        assert!(replace_weekly_times(&path, "weeklyAverageSunTimes", &sample_weeks()).is_err());
        fs::remove_file(&path).unwrap();
    }
}
