//! Thin wrappers around the docker CLI for the pieces testcontainers does
//! not manage for us: user-defined networks, image builds, exit waits.

use crate::error::{Result, TestDbError};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Run `docker <args>` and return trimmed stdout
async fn docker<I, S>(args: I, current_dir: Option<&Path>) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args
        .into_iter()
        .map(|arg| arg.as_ref().to_os_string())
        .collect();
    let command = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut cmd = Command::new("docker");
    cmd.args(&args).kill_on_drop(true);
    if let Some(dir) = current_dir {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| TestDbError::docker(&command, e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TestDbError::docker(command, stderr.trim()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// A user-defined bridge network
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DockerNetwork {
    pub name: String,
}

impl DockerNetwork {
    pub async fn create(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        docker(
            ["network", "create", "--driver", "bridge", "--attachable", name.as_str()],
            None,
        )
        .await?;
        tracing::debug!(network = %name, "Created docker network");
        Ok(Self { name })
    }

    pub async fn remove(self) -> Result<()> {
        docker(["network", "rm", self.name.as_str()], None).await?;
        tracing::debug!(network = %self.name, "Removed docker network");
        Ok(())
    }
}

/// Build `tag` from the `Dockerfile` in `context`
pub(crate) async fn build_image(context: &Path, tag: &str) -> Result<()> {
    if !context.join("Dockerfile").is_file() {
        return Err(TestDbError::InvalidMigrations {
            path: context.display().to_string(),
            reason: "no Dockerfile in build context".to_string(),
        });
    }

    tracing::info!(context = %context.display(), tag, "Building migration image");
    docker(["build", "-t", tag, "-f", "Dockerfile", "."], Some(context)).await?;
    Ok(())
}

pub(crate) async fn remove_image(tag: &str) -> Result<()> {
    docker(["image", "rm", "--force", tag], None).await?;
    Ok(())
}

pub(crate) async fn is_running(container_id: &str) -> Result<bool> {
    let state = docker(
        ["inspect", "--format", "{{.State.Running}}", container_id],
        None,
    )
    .await?;
    Ok(state == "true")
}

/// Block until the container exits and return its exit code
pub(crate) async fn wait_for_exit(container_id: &str, limit: Duration) -> Result<i64> {
    let waited = tokio::time::timeout(limit, docker(["wait", container_id], None))
        .await
        .map_err(|_| TestDbError::timeout(format!("container {container_id} to exit"), limit))??;

    parse_exit_code(&waited)
}

/// `docker wait` prints one status code per container; the last line is ours
fn parse_exit_code(output: &str) -> Result<i64> {
    output
        .lines()
        .last()
        .unwrap_or_default()
        .trim()
        .parse()
        .map_err(|_| TestDbError::docker("wait", format!("unexpected output: {output:?}")))
}
