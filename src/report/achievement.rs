//! The outcome record of a test case.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{DataEntry, FileEntry, SnippetEntry};
use crate::error::{ClientError, ClientResult};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;

/// Outcome of a test run, as understood by the results service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// The test passed.
    Passed,
    /// The test failed.
    Failed,
    /// The test did not apply to the system under test.
    #[default]
    NonApplicable,
    /// The test aborted with an unexpected error.
    Exception,
}

impl TestResult {
    /// Every accepted result, in wire-token order.
    pub const ALL: [Self; 4] = [Self::Passed, Self::Failed, Self::NonApplicable, Self::Exception];

    /// Returns the lowercase wire token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::NonApplicable => "nonapplicable",
            Self::Exception => "exception",
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestResult {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|r| r.as_str() == s).ok_or_else(|| {
            ClientError::Argument(format!(
                "result must be one of passed, failed, nonapplicable, exception; not {s:?}"
            ))
        })
    }
}

/// Result, date, anchor and evidence files of a test case.
pub struct Achievement {
    clock: Arc<dyn Clock>,
    fs: Arc<dyn FileSystem>,
    result: TestResult,
    test_date: DateTime<Utc>,
    anchor: Option<String>,
    data: Vec<DataEntry>,
}

impl fmt::Debug for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Achievement")
            .field("result", &self.result)
            .field("test_date", &self.test_date)
            .field("anchor", &self.anchor)
            .field("data", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl Achievement {
    /// Creates a `nonapplicable` achievement stamped with the current time.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, fs: Arc<dyn FileSystem>) -> Self {
        let test_date = clock.now();
        Self { clock, fs, result: TestResult::default(), test_date, anchor: None, data: Vec::new() }
    }

    /// Records `result`, dated `date` or now.
    pub fn set_result(&mut self, result: TestResult, date: Option<DateTime<Utc>>) {
        self.result = result;
        self.test_date = date.unwrap_or_else(|| self.clock.now());
    }

    /// Records the result named by a wire token such as `"failed"`.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `token` is not one of the four result
    /// tokens; the achievement is left unchanged.
    pub fn set_result_token(
        &mut self,
        token: &str,
        date: Option<DateTime<Utc>>,
    ) -> ClientResult<()> {
        let result = token.parse()?;
        self.set_result(result, date);
        Ok(())
    }

    /// Correlates the achievement with an external record.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `anchor` is empty.
    pub fn set_anchor(&mut self, anchor: impl Into<String>) -> ClientResult<()> {
        let anchor = anchor.into();
        if anchor.is_empty() {
            return Err(ClientError::Argument("anchor must be a non-empty string".into()));
        }
        self.anchor = Some(anchor);
        Ok(())
    }

    /// Embeds a file as evidence.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `path` is not a readable regular file.
    pub fn add_data_file(
        &mut self,
        path: impl AsRef<Path>,
        mime_type: Option<&str>,
    ) -> ClientResult<()> {
        let entry = FileEntry::from_path(self.fs.as_ref(), path.as_ref(), mime_type)?;
        self.data.push(DataEntry::File(entry));
        Ok(())
    }

    /// Embeds generated plot output as evidence.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `path` is not a readable regular file or
    /// `mime_type` is not a supported snippet type.
    pub fn add_snippet_file(
        &mut self,
        path: impl AsRef<Path>,
        mime_type: &str,
        name: Option<&str>,
    ) -> ClientResult<()> {
        let entry = SnippetEntry::from_path(self.fs.as_ref(), path.as_ref(), mime_type, name)?;
        self.data.push(DataEntry::Snippet(entry));
        Ok(())
    }

    /// The recorded result.
    #[must_use]
    pub fn result(&self) -> TestResult {
        self.result
    }

    /// The date the result was recorded.
    #[must_use]
    pub fn test_date(&self) -> DateTime<Utc> {
        self.test_date
    }

    /// The external anchor, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Embedded evidence entries.
    #[must_use]
    pub fn data(&self) -> &[DataEntry] {
        &self.data
    }

    pub(crate) fn transform(&self) -> AchievementDoc<'_> {
        AchievementDoc {
            result: self.result,
            test_date: self.test_date.to_rfc3339_opts(SecondsFormat::Micros, true),
            data: &self.data,
            anchor: self.anchor.as_deref(),
        }
    }
}

/// One element of the `achievements` array of a report document.
#[derive(Debug, Serialize)]
pub(crate) struct AchievementDoc<'a> {
    result: TestResult,
    #[serde(rename = "test-date")]
    test_date: String,
    #[serde(skip_serializing_if = "<[DataEntry]>::is_empty")]
    data: &'a [DataEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::{FixedClock, MemoryFileSystem};
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn fixture() -> (Arc<FixedClock>, Arc<MemoryFileSystem>, Achievement) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()));
        let fs = Arc::new(MemoryFileSystem::new());
        let achievement = Achievement::new(clock.clone(), fs.clone());
        (clock, fs, achievement)
    }

    #[test]
    fn defaults_to_nonapplicable_at_construction_time() {
        let (_, _, achievement) = fixture();
        let json = serde_json::to_value(achievement.transform()).unwrap();

        assert_eq!(
            json,
            json!({"result": "nonapplicable", "test-date": "2024-03-01T08:00:00.000000Z"})
        );
    }

    #[test]
    fn set_result_refreshes_the_date() {
        let (clock, _, mut achievement) = fixture();
        clock.advance(Duration::minutes(5));

        achievement.set_result(TestResult::Failed, None);
        assert_eq!(achievement.result(), TestResult::Failed);
        assert_eq!(achievement.test_date(), Utc.with_ymd_and_hms(2024, 3, 1, 8, 5, 0).unwrap());
    }

    #[test]
    fn explicit_date_wins() {
        let (clock, _, mut achievement) = fixture();
        clock.advance(Duration::hours(1));
        let date = Utc.with_ymd_and_hms(2023, 12, 24, 18, 0, 0).unwrap();

        achievement.set_result_token("passed", Some(date)).unwrap();
        assert_eq!(achievement.test_date(), date);
    }

    #[test]
    fn bogus_result_is_rejected() {
        let (_, _, mut achievement) = fixture();
        let err = achievement.set_result_token("bogus", None).unwrap_err();

        assert!(matches!(err, ClientError::Argument(_)));
        assert_eq!(achievement.result(), TestResult::NonApplicable);
    }

    #[test]
    fn result_tokens_round_trip() {
        for result in TestResult::ALL {
            assert_eq!(result.as_str().parse::<TestResult>().unwrap(), result);
            assert_eq!(serde_json::to_value(result).unwrap(), json!(result.as_str()));
        }
    }

    #[test]
    fn anchor_and_data_are_emitted_when_set() {
        let (_, fs, mut achievement) = fixture();
        fs.insert("/run/trace.txt", "ok");
        achievement.add_data_file("/run/trace.txt", None).unwrap();
        achievement.set_anchor("build-4711").unwrap();

        let json = serde_json::to_value(achievement.transform()).unwrap();
        assert_eq!(json["anchor"], "build-4711");
        assert_eq!(json["data"][0]["name"], "trace.txt");
        assert_eq!(json["data"][0]["mime-type"], "text/plain");
    }

    #[test]
    fn empty_anchor_is_rejected() {
        let (_, _, mut achievement) = fixture();
        assert!(achievement.set_anchor("").is_err());
        assert_eq!(achievement.anchor(), None);
    }

    #[test]
    fn missing_evidence_file_is_rejected() {
        let (_, _, mut achievement) = fixture();
        assert!(achievement.add_data_file("/run/missing.txt", None).is_err());
        assert!(achievement.add_snippet_file("/run/missing.png", "x", None).is_err());
        assert!(achievement.data().is_empty());
    }
}
