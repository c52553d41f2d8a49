//! Task repository contracts and file-backed implementation.
//!
//! # Responsibility
//! - Load the whole task list at startup and save it after each mutation.
//! - Keep the record format and file handling inside the storage boundary.
//!
//! # Invariants
//! - A missing data file is created empty, never treated as an error.
//! - Malformed lines are skipped and reported; they never abort a load.
//! - A save replaces the file atomically (temp file + rename); a failed
//!   rename leaves no temp file behind.

use crate::model::task_list::TaskList;
use crate::repo::record::{parse_record, RecordError};
use log::{error, info, warn};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
}

impl RepoError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// How the backing store was found at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No prior data; an empty store was created.
    Created,
    /// Existing data was read.
    Imported,
}

/// One persisted line that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the store.
    pub line_number: usize,
    pub reason: RecordError,
}

/// Result of loading the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub tasks: TaskList,
    pub outcome: LoadOutcome,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    /// Decodes record lines, skipping blank lines and collecting failures.
    pub fn from_records<'a>(
        outcome: LoadOutcome,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut tasks = TaskList::new();
        let mut skipped = Vec::new();

        for (offset, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line) {
                Ok(task) => {
                    tasks.add(task);
                }
                Err(reason) => {
                    warn!(
                        "event=record_skip module=repo status=error line={} error={}",
                        offset + 1,
                        reason
                    );
                    skipped.push(SkippedRecord {
                        line_number: offset + 1,
                        reason,
                    });
                }
            }
        }

        Self {
            tasks,
            outcome,
            skipped,
        }
    }
}

/// Repository interface for whole-list persistence.
pub trait TaskRepository {
    /// Human-readable name of the backing store, used in user notices.
    fn location(&self) -> String;
    fn load_all(&self) -> RepoResult<LoadReport>;
    fn save_all(&self, tasks: &TaskList) -> RepoResult<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn location(&self) -> String {
        (**self).location()
    }

    fn load_all(&self) -> RepoResult<LoadReport> {
        (**self).load_all()
    }

    fn save_all(&self, tasks: &TaskList) -> RepoResult<()> {
        (**self).save_all(tasks)
    }
}

/// Renders every task as one record line.
pub fn encode_records(tasks: &TaskList) -> String {
    let mut body = String::new();
    for (_, task) in tasks.iter() {
        body.push_str(&task.to_record());
        body.push('\n');
    }
    body
}

/// Plain-text file repository, one record per line.
#[derive(Debug, Clone)]
pub struct FileTaskRepository {
    path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent_dir(&self) -> RepoResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|err| RepoError::io(parent, err))
            }
            _ => Ok(()),
        }
    }

    fn create_empty(&self) -> RepoResult<()> {
        self.ensure_parent_dir()?;
        fs::File::create(&self.path).map_err(|err| RepoError::io(&self.path, err))?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load_all(&self) -> RepoResult<LoadReport> {
        let started_at = Instant::now();
        info!("event=store_load module=repo status=start");

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if let Err(err) = self.create_empty() {
                    error!(
                        "event=store_load module=repo status=error duration_ms={} error_code=store_create_failed error={}",
                        started_at.elapsed().as_millis(),
                        err
                    );
                    return Err(err);
                }
                info!(
                    "event=store_load module=repo status=ok outcome=created duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(LoadReport::from_records(
                    LoadOutcome::Created,
                    std::iter::empty(),
                ));
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error duration_ms={} error_code=store_read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(RepoError::io(&self.path, err));
            }
        };

        let report = LoadReport::from_records(LoadOutcome::Imported, content.lines());
        info!(
            "event=store_load module=repo status=ok outcome=imported tasks={} skipped={} duration_ms={}",
            report.tasks.len(),
            report.skipped.len(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }

    fn save_all(&self, tasks: &TaskList) -> RepoResult<()> {
        let started_at = Instant::now();
        let temp_path = self.temp_path();

        let result = self.ensure_parent_dir().and_then(|()| {
            fs::write(&temp_path, encode_records(tasks))
                .map_err(|err| RepoError::io(&temp_path, err))?;
            fs::rename(&temp_path, &self.path).map_err(|err| {
                if let Err(cleanup) = fs::remove_file(&temp_path) {
                    warn!(
                        "event=store_save module=repo status=error error_code=temp_cleanup_failed error={}",
                        cleanup
                    );
                }
                RepoError::io(&self.path, err)
            })
        });

        match &result {
            Ok(()) => info!(
                "event=store_save module=repo status=ok tasks={} duration_ms={}",
                tasks.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=repo status=error tasks={} duration_ms={} error_code=store_write_failed error={}",
                tasks.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// In-memory repository holding encoded record lines.
///
/// Used by tests and by front ends that opt out of persistence.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    records: RefCell<Option<String>>,
    saves: RefCell<usize>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from previously persisted record text.
    pub fn with_records(records: impl Into<String>) -> Self {
        Self {
            records: RefCell::new(Some(records.into())),
            saves: RefCell::new(0),
        }
    }

    /// Returns the last saved record text, if any.
    pub fn records(&self) -> Option<String> {
        self.records.borrow().clone()
    }

    /// Number of successful `save_all` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load_all(&self) -> RepoResult<LoadReport> {
        let mut records = self.records.borrow_mut();
        if let Some(text) = records.as_deref() {
            return Ok(LoadReport::from_records(
                LoadOutcome::Imported,
                text.lines(),
            ));
        }
        *records = Some(String::new());
        Ok(LoadReport::from_records(LoadOutcome::Created, std::iter::empty()))
    }

    fn save_all(&self, tasks: &TaskList) -> RepoResult<()> {
        *self.records.borrow_mut() = Some(encode_records(tasks));
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
