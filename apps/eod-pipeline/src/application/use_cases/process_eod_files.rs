//! Process EOD Files Use Case
//!
//! For each requested file type: fetch the listing, filter it with the
//! trade-date patterns, download every match, decode trades and prices, and
//! write their tables. Every file ends in exactly one [`FileOutcome`]; no
//! type's failure blocks another.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::application::dto::{FileOutcome, RunReport};
use crate::application::ports::{
    PipelineEvent, PipelineEventSink, RemoteSourcePort, TableSinkPort,
};
use crate::domain::file_discovery::{
    FilePatternMatcher, FileType, NoMatchError, RemoteFile, compact_date,
};
use crate::domain::message_decoding::{Batch, DecodeError, decode_price_batch, decode_trade_batch};
use crate::error::PipelineError;

/// Settings the orchestrator runs with.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Root under which one directory per trade date is created.
    pub download_root: PathBuf,
    /// Files of one type processed concurrently.
    pub max_concurrent_files: usize,
    /// Pattern template per file type, each containing `{date}`.
    pub patterns: Vec<(FileType, String)>,
}

impl PipelineSettings {
    /// Directory a trade date's files are downloaded to.
    #[must_use]
    pub fn download_dir(&self, trade_date: NaiveDate) -> PathBuf {
        self.download_root.join(compact_date(trade_date))
    }
}

/// A listed name's place in the run, in listing order.
enum Slot {
    /// Matched and still to be fetched.
    Fetch(RemoteFile),
    /// Already settled without fetching.
    Done(FileOutcome),
}

/// Summary of a written table.
struct Emitted {
    outputs: Vec<PathBuf>,
    rows: usize,
    columns: usize,
}

/// Use case for one end-of-day run.
pub struct ProcessEodFilesUseCase<S, T, E>
where
    S: RemoteSourcePort,
    T: TableSinkPort + 'static,
    E: PipelineEventSink,
{
    source: Arc<S>,
    table_sink: Arc<T>,
    events: Arc<E>,
    settings: PipelineSettings,
}

impl<S, T, E> ProcessEodFilesUseCase<S, T, E>
where
    S: RemoteSourcePort,
    T: TableSinkPort + 'static,
    E: PipelineEventSink,
{
    /// Create a new ProcessEodFilesUseCase.
    pub fn new(source: Arc<S>, table_sink: Arc<T>, events: Arc<E>, settings: PipelineSettings) -> Self {
        Self {
            source,
            table_sink,
            events,
            settings,
        }
    }

    /// Check that the listing is reachable.
    pub async fn probe(&self, cancel: &CancellationToken) -> Result<(), PipelineError> {
        self.source.probe(cancel).await?;
        Ok(())
    }

    /// Process every file type.
    pub async fn run_all(&self, trade_date: NaiveDate, cancel: &CancellationToken) -> RunReport {
        self.run(trade_date, &FileType::ALL, cancel).await
    }

    /// Process the requested file types, in the order given.
    pub async fn run(
        &self,
        trade_date: NaiveDate,
        types: &[FileType],
        cancel: &CancellationToken,
    ) -> RunReport {
        let mut requested: Vec<FileType> = Vec::with_capacity(types.len());
        for file_type in types {
            if !requested.contains(file_type) {
                requested.push(*file_type);
            }
        }

        let templates = self
            .settings
            .patterns
            .iter()
            .map(|(file_type, template)| (*file_type, template.as_str()));
        let matcher = match FilePatternMatcher::new(templates, trade_date) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::error!(error = %e, "Pattern table is invalid");
                let outcomes = requested
                    .iter()
                    .map(|file_type| {
                        let name = self.template_for(*file_type).unwrap_or_default();
                        FileOutcome::failed(name, *file_type, e.clone().into())
                    })
                    .collect();
                return RunReport {
                    trade_date,
                    outcomes,
                };
            }
        };

        let dest_dir = self.settings.download_dir(trade_date);
        let mut outcomes = Vec::new();
        for file_type in requested {
            let span = tracing::info_span!("file_type", %file_type, %trade_date);
            let processed = self
                .process_type(&matcher, file_type, &dest_dir, cancel)
                .instrument(span)
                .await;
            outcomes.extend(processed);
        }

        RunReport {
            trade_date,
            outcomes,
        }
    }

    fn template_for(&self, file_type: FileType) -> Option<String> {
        self.settings
            .patterns
            .iter()
            .find(|(t, _)| *t == file_type)
            .map(|(_, template)| template.clone())
    }

    async fn process_type(
        &self,
        matcher: &FilePatternMatcher,
        file_type: FileType,
        dest_dir: &Path,
        cancel: &CancellationToken,
    ) -> Vec<FileOutcome> {
        let listing_url = self.source.listing_url().to_string();
        let names = match self.source.list_files(cancel).await {
            Ok(names) => names,
            Err(e) => {
                return vec![self.fail(listing_url, file_type, e.into())];
            }
        };

        self.events.publish(PipelineEvent::ListingFetched {
            file_type,
            url: listing_url,
            entries: names.len(),
        });

        let mut slots = Vec::new();
        for name in &names {
            match matcher.match_name(name) {
                Ok(Some(file)) if file.file_type() == file_type => {
                    self.events.publish(PipelineEvent::FileMatched {
                        name: name.clone(),
                        file_type,
                    });
                    slots.push(Slot::Fetch(file));
                }
                Err(ambiguous) if ambiguous.types.contains(&file_type) => {
                    let outcome = self.fail(name.clone(), file_type, ambiguous.into());
                    slots.push(Slot::Done(outcome));
                }
                Ok(_) | Err(_) => {}
            }
        }

        if slots.is_empty() {
            let pattern = matcher.pattern_for(file_type).unwrap_or_default().to_string();
            tracing::warn!(%file_type, %pattern, "No listed file matches");
            let error = NoMatchError { file_type, pattern };
            return vec![FileOutcome::failed(
                error.pattern.clone(),
                file_type,
                error.into(),
            )];
        }

        tracing::info!(%file_type, files = slots.len(), "Processing matched files");

        // `buffered` yields in input order, so outcomes keep listing order.
        let limit = self.settings.max_concurrent_files.max(1);
        stream::iter(slots)
            .map(|slot| async move {
                match slot {
                    Slot::Fetch(file) => self.process_file(file, dest_dir, cancel).await,
                    Slot::Done(outcome) => outcome,
                }
            })
            .buffered(limit)
            .collect()
            .await
    }

    async fn process_file(
        &self,
        file: RemoteFile,
        dest_dir: &Path,
        cancel: &CancellationToken,
    ) -> FileOutcome {
        let file_type = file.file_type();
        let local = match self.source.download(&file, dest_dir, cancel).await {
            Ok(path) => path,
            Err(e) => return self.fail(file.name().to_string(), file_type, e.into()),
        };

        self.events.publish(PipelineEvent::DownloadComplete {
            name: file.name().to_string(),
            path: local.clone(),
        });

        if !file_type.is_decoded() {
            return FileOutcome::ok(file.name(), file_type, vec![local]);
        }

        let outputs: Vec<PathBuf> = file
            .output_names()
            .into_iter()
            .map(|name| dest_dir.join(name))
            .collect();

        let sink = Arc::clone(&self.table_sink);
        let source_path = local.clone();
        let task = tokio::task::spawn_blocking(move || -> Result<Emitted, PipelineError> {
            let batch = decode_file(&source_path, file_type)?;
            let written = sink.write_tables(&batch, &outputs)?;
            Ok(Emitted {
                outputs: written,
                rows: batch.len(),
                columns: batch.columns().len(),
            })
        });

        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(PipelineError::Task {
                name: file.name().to_string(),
                message: e.to_string(),
            }),
        };

        match result {
            Ok(emitted) => {
                self.events.publish(PipelineEvent::TablesWritten {
                    name: file.name().to_string(),
                    rows: emitted.rows,
                    columns: emitted.columns,
                    outputs: emitted.outputs.clone(),
                });
                FileOutcome::ok(file.name(), file_type, emitted.outputs)
            }
            Err(e) => {
                self.events.publish(PipelineEvent::FileFailed {
                    name: file.name().to_string(),
                    file_type,
                    error: e.to_string(),
                });
                FileOutcome::failed_with_outputs(file.name(), file_type, vec![local], e)
            }
        }
    }

    fn fail(&self, name: String, file_type: FileType, error: PipelineError) -> FileOutcome {
        self.events.publish(PipelineEvent::FileFailed {
            name: name.clone(),
            file_type,
            error: error.to_string(),
        });
        FileOutcome::failed(name, file_type, error)
    }
}

/// Decode a downloaded file according to its type.
fn decode_file(path: &Path, file_type: FileType) -> Result<Batch, DecodeError> {
    let reader = BufReader::new(File::open(path)?);
    match file_type {
        FileType::Trades => decode_trade_batch(reader),
        FileType::Price => decode_price_batch(reader),
        FileType::Instruments => Err(DecodeError::Read(format!(
            "{file_type} files have no decoder"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::dto::FileStatus;
    use crate::application::ports::{DownloadError, FetchError, NoOpEventSink, TableError};
    use crate::error::ErrorKind;

    const TRADES: &str = r"{date}_RECO_GFOX_LCHC_EOD_PRD_\d{14}\.dat";
    const PRICE: &str = r"PRICE_GFOX_PRD_{date}\.csv";
    const INSTRUMENTS: &str = r"INSTRUMENT_GFOX_PRD_{date}\.csv";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    fn settings(root: &Path) -> PipelineSettings {
        PipelineSettings {
            download_root: root.to_path_buf(),
            max_concurrent_files: 2,
            patterns: vec![
                (FileType::Trades, TRADES.to_string()),
                (FileType::Price, PRICE.to_string()),
                (FileType::Instruments, INSTRUMENTS.to_string()),
            ],
        }
    }

    /// In-memory file server.
    struct FakeSource {
        listing: Result<Vec<String>, FetchError>,
        files: HashMap<String, String>,
    }

    impl FakeSource {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                listing: Ok(files.iter().map(|(n, _)| (*n).to_string()).collect()),
                files: files
                    .iter()
                    .map(|(n, c)| ((*n).to_string(), (*c).to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl RemoteSourcePort for FakeSource {
        fn listing_url(&self) -> &str {
            "http://eod.local/outbound/"
        }

        async fn probe(&self, _cancel: &CancellationToken) -> Result<(), FetchError> {
            self.listing.clone().map(|_| ())
        }

        async fn list_files(&self, _cancel: &CancellationToken) -> Result<Vec<String>, FetchError> {
            self.listing.clone()
        }

        async fn download(
            &self,
            file: &RemoteFile,
            dest_dir: &Path,
            _cancel: &CancellationToken,
        ) -> Result<PathBuf, DownloadError> {
            let Some(content) = self.files.get(file.name()) else {
                return Err(DownloadError::Status {
                    name: file.name().to_string(),
                    status: 404,
                });
            };
            std::fs::create_dir_all(dest_dir).unwrap();
            let path = dest_dir.join(file.name());
            std::fs::write(&path, content).unwrap();
            Ok(path)
        }
    }

    /// Records the batches it receives instead of writing them.
    #[derive(Default)]
    struct RecordingSink {
        written: Mutex<Vec<(usize, Vec<PathBuf>)>>,
    }

    impl TableSinkPort for RecordingSink {
        fn write_tables(&self, batch: &Batch, outputs: &[PathBuf]) -> Result<Vec<PathBuf>, TableError> {
            self.written
                .lock()
                .unwrap()
                .push((batch.len(), outputs.to_vec()));
            Ok(outputs.to_vec())
        }
    }

    #[derive(Default)]
    struct CollectingEvents {
        events: Mutex<Vec<PipelineEvent>>,
    }

    impl PipelineEventSink for CollectingEvents {
        fn publish(&self, event: PipelineEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn use_case(
        source: FakeSource,
        root: &Path,
    ) -> ProcessEodFilesUseCase<FakeSource, RecordingSink, NoOpEventSink> {
        ProcessEodFilesUseCase::new(
            Arc::new(source),
            Arc::new(RecordingSink::default()),
            Arc::new(NoOpEventSink),
            settings(root),
        )
    }

    #[tokio::test]
    async fn trades_are_written_long_and_short() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&[(
            "20240131_RECO_GFOX_LCHC_EOD_PRD_20240131235959.dat",
            "8=FIXT.1.1\x0135=AE\n",
        )]);
        let uc = use_case(source, dir.path());

        let report = uc.run(date(), &[FileType::Trades], &CancellationToken::new()).await;

        assert_eq!(report.outcomes.len(), 1);
        let outcome = &report.outcomes[0];
        assert_eq!(outcome.status, FileStatus::Ok);
        let day = dir.path().join("20240131");
        assert_eq!(
            outcome.outputs,
            vec![
                day.join("20240131_RECO_GFOX_LCHC_EOD_PRD_20240131235959_LONG_DUCO.csv"),
                day.join("20240131_RECO_GFOX_LCHC_EOD_PRD_20240131235959_SHORT_DUCO.csv"),
            ]
        );
    }

    #[tokio::test]
    async fn instruments_are_downloaded_only() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&[("INSTRUMENT_GFOX_PRD_20240131.csv", "anything")]);
        let uc = use_case(source, dir.path());

        let report = uc
            .run(date(), &[FileType::Instruments], &CancellationToken::new())
            .await;

        assert_eq!(report.outcomes[0].status, FileStatus::Ok);
        assert_eq!(
            report.outcomes[0].outputs,
            vec![dir.path().join("20240131").join("INSTRUMENT_GFOX_PRD_20240131.csv")]
        );
        assert!(uc.table_sink.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_type_is_no_match_named_by_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let uc = use_case(FakeSource::new(&[("README.txt", "")]), dir.path());

        let report = uc.run(date(), &[FileType::Price], &CancellationToken::new()).await;

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].status, FileStatus::NoMatch);
        assert_eq!(report.outcomes[0].name, r"PRICE_GFOX_PRD_20240131\.csv");
        assert!(!report.has_failures());
    }

    #[tokio::test]
    async fn listing_failure_is_scoped_per_type() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::new(&[]);
        source.listing = Err(FetchError::Status {
            url: "http://eod.local/outbound/".to_string(),
            status: 500,
        });
        let uc = use_case(source, dir.path());

        let report = uc.run_all(date(), &CancellationToken::new()).await;

        assert_eq!(report.outcomes.len(), 3);
        for outcome in &report.outcomes {
            assert_eq!(outcome.status, FileStatus::FetchFailed);
            assert_eq!(outcome.name, "http://eod.local/outbound/");
        }
    }

    #[tokio::test]
    async fn empty_price_file_fails_decode_but_keeps_download() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::new(&[
            ("PRICE_GFOX_PRD_20240131.csv", "\n"),
            ("INSTRUMENT_GFOX_PRD_20240131.csv", "x"),
        ]);
        let uc = use_case(source, dir.path());

        let report = uc.run_all(date(), &CancellationToken::new()).await;

        let price: Vec<_> = report.for_type(FileType::Price).collect();
        assert_eq!(price[0].status, FileStatus::DecodeFailed);
        assert_eq!(price[0].outputs.len(), 1);
        assert_eq!(
            price[0].error.as_ref().map(PipelineError::kind),
            Some(ErrorKind::DecodeFailed)
        );

        let instruments: Vec<_> = report.for_type(FileType::Instruments).collect();
        assert_eq!(instruments[0].status, FileStatus::Ok);
    }

    #[tokio::test]
    async fn ambiguous_name_is_misconfigured_and_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.patterns[1].1 = r".*{date}\.csv".to_string();
        let uc = ProcessEodFilesUseCase::new(
            Arc::new(FakeSource::new(&[("INSTRUMENT_GFOX_PRD_20240131.csv", "x")])),
            Arc::new(RecordingSink::default()),
            Arc::new(NoOpEventSink),
            settings,
        );

        let report = uc
            .run(date(), &[FileType::Price, FileType::Instruments], &CancellationToken::new())
            .await;

        assert_eq!(report.outcomes.len(), 2);
        for outcome in &report.outcomes {
            assert_eq!(outcome.status, FileStatus::Misconfigured);
            assert!(outcome.outputs.is_empty());
        }
        assert!(!dir.path().join("20240131").exists());
    }

    #[tokio::test]
    async fn download_failure_does_not_block_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::new(&[
            ("20240131_RECO_GFOX_LCHC_EOD_PRD_20240131000001.dat", "8=A\n"),
            ("20240131_RECO_GFOX_LCHC_EOD_PRD_20240131000002.dat", "8=B\n"),
        ]);
        source
            .files
            .remove("20240131_RECO_GFOX_LCHC_EOD_PRD_20240131000001.dat");
        let uc = use_case(source, dir.path());

        let report = uc.run(date(), &[FileType::Trades], &CancellationToken::new()).await;

        let statuses: Vec<FileStatus> = report.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![FileStatus::FetchFailed, FileStatus::Ok]);
    }

    #[tokio::test]
    async fn events_follow_processing() {
        let dir = tempfile::tempdir().unwrap();
        let events = Arc::new(CollectingEvents::default());
        let uc = ProcessEodFilesUseCase::new(
            Arc::new(FakeSource::new(&[("PRICE_GFOX_PRD_20240131.csv", "8=A\x01527=1\n")])),
            Arc::new(RecordingSink::default()),
            Arc::clone(&events),
            settings(dir.path()),
        );

        uc.run(date(), &[FileType::Price], &CancellationToken::new()).await;

        let events = events.events.lock().unwrap();
        assert!(matches!(events[0], PipelineEvent::ListingFetched { entries: 1, .. }));
        assert!(matches!(events[1], PipelineEvent::FileMatched { .. }));
        assert!(matches!(events[2], PipelineEvent::DownloadComplete { .. }));
        assert!(matches!(events[3], PipelineEvent::TablesWritten { rows: 1, columns: 4, .. }));
    }

    #[tokio::test]
    async fn duplicate_types_run_once() {
        let dir = tempfile::tempdir().unwrap();
        let uc = use_case(FakeSource::new(&[]), dir.path());

        let report = uc
            .run(date(), &[FileType::Price, FileType::Price], &CancellationToken::new())
            .await;

        assert_eq!(report.outcomes.len(), 1);
    }

    #[tokio::test]
    async fn outcomes_keep_listing_order_with_ambiguous_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.patterns[1].1 = r"PRICE_GFOX_PRD_{date}".to_string();
        settings.patterns[2].1 = r"PRICE_GFOX_PRD_{date}_B".to_string();
        let uc = ProcessEodFilesUseCase::new(
            Arc::new(FakeSource::new(&[
                ("PRICE_GFOX_PRD_20240131.csv", "8=A\x01527=1\n"),
                ("PRICE_GFOX_PRD_20240131_B.csv", "8=B\x01527=2\n"),
            ])),
            Arc::new(RecordingSink::default()),
            Arc::new(NoOpEventSink),
            settings,
        );

        let report = uc.run(date(), &[FileType::Price], &CancellationToken::new()).await;

        let seen: Vec<(&str, FileStatus)> = report
            .outcomes
            .iter()
            .map(|o| (o.name.as_str(), o.status))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("PRICE_GFOX_PRD_20240131.csv", FileStatus::Ok),
                ("PRICE_GFOX_PRD_20240131_B.csv", FileStatus::Misconfigured),
            ]
        );
    }
}
