use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Timezone in which record timestamps are stamped
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// ISO-8601 stamp with a `+HH:MM` offset, e.g.
    /// "2024-01-01T10:00:00.123456+01:00". The fraction is always six digits
    /// and is left out entirely when the microseconds are zero.
    pub(crate) fn stamp(self, utc: DateTime<Utc>) -> String {
        let precision = if utc.timestamp_subsec_micros() == 0 {
            SecondsFormat::Secs
        } else {
            SecondsFormat::Micros
        };
        self.to_fixed_offset(utc).to_rfc3339_opts(precision, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_returns_local() {
        assert!(matches!(Timezone::parse(None).unwrap(), Timezone::Local));
    }

    #[test]
    fn parse_local_string_returns_local() {
        assert!(matches!(
            Timezone::parse(Some("LOCAL")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("  local  ")).unwrap(),
            Timezone::Local
        ));
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z"] {
            let tz = Timezone::parse(Some(raw)).unwrap();
            assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)));
        }
    }

    #[test]
    fn parse_madrid() {
        let tz = Timezone::parse(Some("Europe/Madrid")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::Europe::Madrid)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn stamp_winter_madrid_is_plus_one() {
        let utc = "2024-01-01T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::Named(chrono_tz::Europe::Madrid);
        assert_eq!(tz.stamp(utc), "2024-01-01T10:00:00+01:00");
    }

    #[test]
    fn stamp_summer_madrid_is_plus_two() {
        let utc = "2024-07-01T09:00:00.5Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::Named(chrono_tz::Europe::Madrid);
        assert_eq!(tz.stamp(utc), "2024-07-01T11:00:00.500000+02:00");
    }

    #[test]
    fn stamp_drops_fraction_only_when_micros_are_zero() {
        let tz = Timezone::Named(chrono_tz::UTC);
        let whole = "2024-03-05T08:15:30.000000400Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(tz.stamp(whole), "2024-03-05T08:15:30+00:00");
        let tiny = "2024-03-05T08:15:30.000001Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(tz.stamp(tiny), "2024-03-05T08:15:30.000001+00:00");
    }

    #[test]
    fn stamp_utc_keeps_numeric_offset() {
        let utc = "2026-02-12T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::Named(chrono_tz::UTC);
        assert_eq!(tz.stamp(utc), "2026-02-12T10:00:00+00:00");
    }
}
