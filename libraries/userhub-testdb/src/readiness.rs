//! Log-based readiness predicate

use crate::error::{Result, TestDbError};
use std::time::Duration;
use testcontainers::{ContainerAsync, Image};
use tokio::time::Instant;

/// Line PostgreSQL prints when it starts accepting connections
pub const POSTGRES_READY_MESSAGE: &str = "database system is ready to accept connections";

/// Wait until a message has appeared a number of times in a container's logs.
///
/// The PostgreSQL image starts a temporary server during init, stops it,
/// then starts the real one; both print the ready line. Waiting for the
/// second occurrence keeps tests from connecting to the init-time server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReadiness {
    pub message: String,
    pub occurrences: usize,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for LogReadiness {
    fn default() -> Self {
        Self {
            message: POSTGRES_READY_MESSAGE.to_string(),
            occurrences: 2,
            timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl LogReadiness {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_occurrences(mut self, occurrences: usize) -> Self {
        self.occurrences = occurrences;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Whether the given log text satisfies the predicate
    pub fn is_satisfied(&self, logs: &str) -> bool {
        count_occurrences(logs, &self.message) >= self.occurrences
    }

    /// Poll the container's stdout and stderr until satisfied or timed out.
    pub async fn wait<I: Image>(&self, container: &ContainerAsync<I>) -> Result<()> {
        let deadline = Instant::now() + self.timeout;

        loop {
            let logs = collect_logs(container).await?;
            if self.is_satisfied(&logs) {
                tracing::debug!(
                    container = container.id(),
                    occurrences = self.occurrences,
                    "Readiness message observed"
                );
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(TestDbError::timeout(
                    format!(
                        "{} occurrence(s) of {:?} in container {}",
                        self.occurrences,
                        self.message,
                        container.id()
                    ),
                    self.timeout,
                ));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Number of non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Concatenated stdout and stderr of a container, lossily decoded
pub(crate) async fn collect_logs<I: Image>(container: &ContainerAsync<I>) -> Result<String> {
    let stdout = container.stdout_to_vec().await?;
    let stderr = container.stderr_to_vec().await?;

    let mut logs = String::from_utf8_lossy(&stdout).into_owned();
    logs.push('\n');
    logs.push_str(&String::from_utf8_lossy(&stderr));
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT_LOG: &str = "\
        PostgreSQL init process complete; ready for start up.\n\
        LOG:  database system is ready to accept connections\n\
        LOG:  received fast shutdown request\n";

    const STARTED_LOG: &str = "\
        LOG:  starting PostgreSQL 15.6 on x86_64-pc-linux-gnu\n\
        LOG:  database system is ready to accept connections\n";

    #[test]
    fn counts_every_occurrence() {
        let logs = format!("{INIT_LOG}{STARTED_LOG}");
        assert_eq!(count_occurrences(&logs, POSTGRES_READY_MESSAGE), 2);
        assert_eq!(count_occurrences(INIT_LOG, POSTGRES_READY_MESSAGE), 1);
        assert_eq!(count_occurrences("", POSTGRES_READY_MESSAGE), 0);
    }

    #[test]
    fn empty_needle_never_matches() {
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn init_server_alone_is_not_ready() {
        let readiness = LogReadiness::default();
        assert!(!readiness.is_satisfied(INIT_LOG));
        assert!(readiness.is_satisfied(&format!("{INIT_LOG}{STARTED_LOG}")));
    }

    #[test]
    fn occurrence_count_is_configurable() {
        let readiness = LogReadiness::new("ready").with_occurrences(1);
        assert!(readiness.is_satisfied("server ready"));
        assert!(!readiness.is_satisfied("server starting"));
    }
}
