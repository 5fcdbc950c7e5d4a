use anyhow::{Context, Result};
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Exit status and captured output of one tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the external tool with a finished argument list
pub trait Invoker {
    fn invoke(&self, args: &[String]) -> impl Future<Output = Result<Invocation>> + Send;
}

#[derive(Debug, Clone)]
pub struct FfmpegInvoker {
    binary: String,
}

impl FfmpegInvoker {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Invoker for FfmpegInvoker {
    async fn invoke(&self, args: &[String]) -> Result<Invocation> {
        info!("Running {} with {} arguments", self.binary, args.len());
        debug!("Arguments: {:?}", args);

        let output = Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to spawn {}", self.binary))?;

        Ok(Invocation {
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Wrap compiled filter arguments into a full single-input transcode
pub fn build_invocation(input: &Path, filter_args: &[String], output: &Path) -> Vec<String> {
    let mut command = vec!["-hide_banner".to_string(), "-y".to_string()];

    command.push("-i".to_string());
    command.push(input.to_string_lossy().to_string());

    command.extend(filter_args.iter().cloned());

    command.push(output.to_string_lossy().to_string());

    command
}
