use std::path::Path;

use chrono::Utc;

use crate::cli::SummaryArgs;
use crate::config::Settings;
use crate::error::AppError;
use crate::output::{SummaryTableOptions, output_summary_json, print_summary_table};
use crate::publish::{GitCli, NoopPublisher, PublishOutcome, Publisher, VcsPublisher};
use crate::source::{OccupancySource, SessionClient};
use crate::stats::{DEFAULT_PLACE, SummaryQuery, summarize};
use crate::store::{JsonFileStore, Record, Store, append_record};
use crate::utils::Timezone;

fn build_store(settings: &Settings) -> JsonFileStore {
    JsonFileStore::new(&settings.data_file).with_atomic_write(settings.atomic_write)
}

fn build_publisher(settings: &Settings) -> Box<dyn Publisher> {
    if !settings.publish {
        return Box::new(NoopPublisher);
    }
    Box::new(VcsPublisher::new(
        GitCli::new(&settings.repo_root),
        &settings.secrets_file,
        &settings.remote,
    ))
}

/// Fetch one payload and append it to the history. Returns the new length.
///
/// The timestamp is taken before the fetch so it marks when the run started.
pub(crate) fn collect(
    source: &dyn OccupancySource,
    store: &dyn Store,
    timezone: Timezone,
) -> Result<usize, AppError> {
    let timestamp = timezone.stamp(Utc::now());
    let data = source.fetch_occupancy()?;
    let len = append_record(store, Record::new(timestamp.as_str(), data))?;
    log::info!("Recorded occupancy at {timestamp} ({len} records)");
    Ok(len)
}

/// Run the publisher, logging instead of propagating any failure
pub(crate) fn publish_best_effort(
    publisher: &dyn Publisher,
    path: &Path,
) -> Option<PublishOutcome> {
    match publisher.publish(path) {
        Ok(outcome) => {
            match outcome {
                PublishOutcome::Pushed => log::info!("Published {}", path.display()),
                PublishOutcome::Disabled => log::debug!("Publishing disabled"),
                other => log::info!("Publish {}: {other}", path.display()),
            }
            Some(outcome)
        }
        Err(e) => {
            log::error!("Publish failed: {e}");
            None
        }
    }
}

pub(crate) fn run_collect(settings: &Settings) -> Result<(), AppError> {
    let source = SessionClient::new(&settings.base_url, settings.http_timeout);
    let store = build_store(settings);
    collect(&source, &store, settings.timezone)?;

    let publisher = build_publisher(settings);
    publish_best_effort(publisher.as_ref(), store.path());
    Ok(())
}

pub(crate) fn run_publish(settings: &Settings) {
    let publisher = build_publisher(settings);
    publish_best_effort(publisher.as_ref(), &settings.data_file);
}

pub(crate) fn run_summary(
    settings: &Settings,
    args: &SummaryArgs,
    default_place: Option<u32>,
    use_color: bool,
) -> Result<(), AppError> {
    let history = build_store(settings).load()?;
    if history.is_empty() {
        println!("No occupancy data found in {}.", settings.data_file.display());
        return Ok(());
    }

    let place = args.place.or(default_place).unwrap_or(DEFAULT_PLACE);
    let query = SummaryQuery::new(place, &args.months, args.days)?;
    let summary = summarize(&history, &query, Utc::now());

    if args.json {
        println!("{}", output_summary_json(&summary));
    } else {
        print_summary_table(&summary, SummaryTableOptions { use_color });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, PublishError};
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::fs;

    struct StubSource(Value);

    impl OccupancySource for StubSource {
        fn fetch_occupancy(&self) -> Result<Value, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct DownSource;

    impl OccupancySource for DownSource {
        fn fetch_occupancy(&self) -> Result<Value, FetchError> {
            Err(FetchError::MissingCookie { name: "XSRF-TOKEN" })
        }
    }

    struct FailingPublisher(RefCell<usize>);

    impl Publisher for FailingPublisher {
        fn publish(&self, _path: &Path) -> Result<PublishOutcome, PublishError> {
            *self.0.borrow_mut() += 1;
            Err(PublishError::GitNotFound)
        }
    }

    fn utc() -> Timezone {
        Timezone::Named(chrono_tz::UTC)
    }

    #[test]
    fn collect_creates_history_with_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("stats.json"));
        let payload = json!([{"IdRecinto": 4, "Ocupacion": 12, "Aforo": 120}]);

        let len = collect(&StubSource(payload.clone()), &store, utc()).unwrap();

        assert_eq!(len, 1);
        let history = store.load().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].data, payload);
        assert!(history[0].timestamp.ends_with("+00:00"));
    }

    #[test]
    fn collect_appends_exactly_one_record_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"[{"timestamp":"2024-01-01T00:00:00+01:00","data":{"occupancy":5}}]"#,
        )
        .unwrap();
        let store = JsonFileStore::new(&path);

        collect(&StubSource(json!({"occupancy": 7})), &store, utc()).unwrap();
        let len = collect(&StubSource(json!({"occupancy": 8})), &store, utc()).unwrap();

        assert_eq!(len, 3);
        let history = store.load().unwrap();
        assert_eq!(history[0].timestamp, "2024-01-01T00:00:00+01:00");
        assert_eq!(history[0].data, json!({"occupancy": 5}));
        assert_eq!(history[1].data, json!({"occupancy": 7}));
        assert_eq!(history[2].data, json!({"occupancy": 8}));
    }

    #[test]
    fn failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let store = JsonFileStore::new(&path);

        assert!(collect(&DownSource, &store, utc()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn malformed_history_aborts_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "[{").unwrap();
        let store = JsonFileStore::new(&path);

        let err = collect(&StubSource(json!(1)), &store, utc()).unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{");
    }

    #[test]
    fn publish_failure_is_swallowed() {
        let publisher = FailingPublisher(RefCell::new(0));
        assert!(publish_best_effort(&publisher, Path::new("data/stats.json")).is_none());
        assert_eq!(*publisher.0.borrow(), 1);
    }

    #[test]
    fn disabled_publishing_uses_noop() {
        let settings = Settings {
            publish: false,
            ..Settings::default()
        };
        let publisher = build_publisher(&settings);
        assert_eq!(
            publish_best_effort(publisher.as_ref(), Path::new("data/stats.json")),
            Some(PublishOutcome::Disabled)
        );
    }

    #[test]
    fn missing_secrets_skips_publishing_without_git() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            secrets_file: dir.path().join("absent"),
            // Not a repository: any git command would fail
            repo_root: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let publisher = build_publisher(&settings);
        assert_eq!(
            publish_best_effort(publisher.as_ref(), &dir.path().join("stats.json")),
            Some(PublishOutcome::NoCredentials)
        );
    }
}
