//! Results and testruns bound to the connection that saves them.

use async_trait::async_trait;

use crate::connection::SlickConnection;
use crate::error::{Result, SlickError};
use crate::model::Model;
use crate::models::{Link, LogEntry, StoredFile, TestResult, Testrun};
use crate::traits::Attachable;

/// A result plus the connection used to save it.
#[derive(Debug, Clone)]
pub struct ResultHandle {
    pub result: TestResult,
    connection: SlickConnection,
}

impl ResultHandle {
    pub fn new(result: TestResult, connection: SlickConnection) -> Self {
        Self { result, connection }
    }

    /// Append a log entry stamped with the current time.
    ///
    /// Only the local copy changes; call [`Attachable::update`] to save.
    pub fn add_log_entry(&mut self, message: impl Into<String>, level: impl Into<String>, logger_name: impl Into<String>) {
        self.push_log_entry(LogEntry::now(level, logger_name, message));
    }

    /// Append a prepared log entry, such as one built with
    /// [`LogEntry::with_exception`]. Local only, like
    /// [`add_log_entry`](Self::add_log_entry).
    pub fn push_log_entry(&mut self, entry: LogEntry) {
        self.result.log.get_or_insert_with(Vec::new).push(entry);
    }

    pub fn into_inner(self) -> TestResult {
        self.result
    }
}

#[async_trait]
impl Attachable for ResultHandle {
    fn connection(&self) -> &SlickConnection {
        &self.connection
    }

    fn files_mut(&mut self) -> &mut Option<Vec<StoredFile>> {
        &mut self.result.files
    }

    fn links_mut(&mut self) -> &mut Option<Vec<Link>> {
        &mut self.result.links
    }

    async fn update(&mut self) -> Result<()> {
        if self.result.id().is_none() {
            return Err(SlickError::MissingId(TestResult::NAME));
        }
        self.result = self.connection.results().update(&self.result).await?;
        Ok(())
    }
}

/// A testrun plus the connection used to save it.
#[derive(Debug, Clone)]
pub struct TestrunHandle {
    pub testrun: Testrun,
    connection: SlickConnection,
}

impl TestrunHandle {
    pub fn new(testrun: Testrun, connection: SlickConnection) -> Self {
        Self { testrun, connection }
    }

    pub fn into_inner(self) -> Testrun {
        self.testrun
    }
}

#[async_trait]
impl Attachable for TestrunHandle {
    fn connection(&self) -> &SlickConnection {
        &self.connection
    }

    fn files_mut(&mut self) -> &mut Option<Vec<StoredFile>> {
        &mut self.testrun.files
    }

    fn links_mut(&mut self) -> &mut Option<Vec<Link>> {
        &mut self.testrun.links
    }

    /// Save the testrun. The server computes `summary` itself, so it is
    /// dropped before sending.
    async fn update(&mut self) -> Result<()> {
        if self.testrun.id().is_none() {
            return Err(SlickError::MissingId(Testrun::NAME));
        }
        self.testrun.summary = None;
        self.testrun = self.connection.testruns().update(&self.testrun).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> SlickConnection {
        SlickConnection::new("http://slick").unwrap()
    }

    #[test]
    fn test_add_log_entry_is_local() {
        let mut handle = ResultHandle::new(TestResult::default(), connection());
        handle.add_log_entry("clicked login", "INFO", "ui");
        handle.add_log_entry("saw dashboard", "DEBUG", "ui");

        let log = handle.result.log.as_ref().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].message.as_deref(), Some("clicked login"));
        assert_eq!(log[0].level.as_deref(), Some("INFO"));
        assert_eq!(log[1].logger_name.as_deref(), Some("ui"));
        assert!(log[1].entry_time.is_some());
    }

    #[test]
    fn test_exception_entry_keeps_stack_trace() {
        let mut handle = ResultHandle::new(TestResult::default(), connection());
        handle.push_log_entry(LogEntry::now("ERROR", "ui", "login failed").with_exception(
            "TimeoutError",
            "no dashboard after 30s",
            vec!["at login (login.rs:42)".to_string()],
        ));

        let entry = &handle.result.log.as_ref().unwrap()[0];
        assert_eq!(entry.exception_class_name.as_deref(), Some("TimeoutError"));
        assert_eq!(entry.exception_message.as_deref(), Some("no dashboard after 30s"));
        assert_eq!(
            entry.exception_stack_trace.as_deref(),
            Some(&["at login (login.rs:42)".to_string()][..])
        );
        assert!(entry.entry_time.is_some());
    }

    #[tokio::test]
    async fn test_update_without_id_fails_locally() {
        let mut handle = TestrunHandle::new(Testrun::default(), connection());
        let err = handle.add_link("ci", "https://ci").await.unwrap_err();
        assert!(matches!(err, SlickError::MissingId("Testrun")));
        assert_eq!(handle.testrun.links.as_ref().map(Vec::len), Some(1));
    }
}
