use crate::overdue;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub const DATA_ENV: &str = "QMS_DATA";
pub const TODAY_ENV: &str = "QMS_TODAY";
pub const LOG_LEVEL_ENV: &str = "QMS_LOG_LEVEL";
pub const LOG_STDOUT_ENV: &str = "QMS_LOG_STDOUT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// Runtime settings shared by the binaries. Flags override the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub data_path: Option<PathBuf>,
    /// Pinned evaluation date; the local calendar date is used when unset.
    pub today: Option<NaiveDate>,
    pub log_level: Option<String>,
    pub debug: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let today = match non_empty(TODAY_ENV) {
            Some(value) => Some(parse_date(&value)?),
            None => None,
        };
        Ok(Self {
            data_path: non_empty(DATA_ENV).map(|value| PathBuf::from(value.trim())),
            today,
            log_level: non_empty(LOG_LEVEL_ENV).map(|value| value.trim().to_string()),
            debug: false,
        })
    }

    pub fn with_overrides(
        mut self,
        data_path: Option<PathBuf>,
        today: Option<&str>,
        debug: bool,
    ) -> Result<Self, SettingsError> {
        if let Some(path) = data_path {
            self.data_path = Some(path);
        }
        if let Some(value) = today {
            self.today = Some(parse_date(value)?);
        }
        self.debug |= debug;
        Ok(self)
    }

    pub fn evaluation_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(overdue::local_today)
    }

    /// `debug` wins over an explicit level, which wins over `default`.
    pub fn log_level(&self, default: &str) -> String {
        if self.debug {
            return "debug".to_string();
        }
        self.log_level
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, SettingsError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SettingsError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn env_true(key: &str) -> bool {
    matches!(
        std::env::var(key).ok().as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn reads_environment_values() {
        let settings = Settings::from_lookup(lookup(&[
            (DATA_ENV, "/tmp/qms.json"),
            (TODAY_ENV, "2024-01-25"),
            (LOG_LEVEL_ENV, "trace"),
        ]))
        .expect("settings");
        assert_eq!(settings.data_path, Some(PathBuf::from("/tmp/qms.json")));
        assert_eq!(settings.today, NaiveDate::from_ymd_opt(2024, 1, 25));
        assert_eq!(settings.log_level("info"), "trace");
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings =
            Settings::from_lookup(lookup(&[(DATA_ENV, "  "), (TODAY_ENV, "")])).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log_level("warn"), "warn");
    }

    #[test]
    fn flags_override_environment() {
        let settings = Settings::from_lookup(lookup(&[(TODAY_ENV, "2024-01-25")]))
            .expect("settings")
            .with_overrides(Some(PathBuf::from("data.json")), Some("2024-02-01"), true)
            .expect("overrides");
        assert_eq!(settings.data_path, Some(PathBuf::from("data.json")));
        assert_eq!(
            settings.evaluation_date(),
            NaiveDate::from_ymd_opt(2024, 2, 1).expect("date")
        );
        assert_eq!(settings.log_level("info"), "debug");
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = Settings::from_lookup(lookup(&[(TODAY_ENV, "25/01/2024")])).unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidDate {
                value: "25/01/2024".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid date \"25/01/2024\": expected YYYY-MM-DD"
        );
    }
}
