use crate::error::FilterError;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::fmt;
use std::process::Command;
use std::str::FromStr;

/// An ffmpeg release number. Missing components compare as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ToolVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ToolVersion {
    type Err = FilterError;

    /// Parse `"0.8"`, `"6.1.1"` or `"n7.0"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('n');
        let mut parts = trimmed.split('.');
        let mut next = |required: bool| -> Result<u32, FilterError> {
            match parts.next() {
                Some(p) => p
                    .parse::<u32>()
                    .map_err(|_| FilterError::InvalidVersion(s.to_string())),
                None if required => Err(FilterError::InvalidVersion(s.to_string())),
                None => Ok(0),
            }
        };
        let major = next(true)?;
        let minor = next(false)?;
        let patch = next(false)?;
        Ok(ToolVersion::new(major, minor, patch))
    }
}

/// Extract the release from `ffmpeg -version` output, e.g. "ffmpeg version n6.1.1"
pub fn parse_version_output(output: &str) -> Result<ToolVersion> {
    let re = Regex::new(r"ffmpeg version[^\d]*(\d+)\.(\d+)(?:\.(\d+))?")
        .context("Failed to compile version regex")?;

    let caps = re
        .captures(output)
        .ok_or_else(|| anyhow!("Failed to parse ffmpeg version from output: {}", output))?;

    let major: u32 = caps[1].parse().context("Failed to parse major version")?;
    let minor: u32 = caps[2].parse().context("Failed to parse minor version")?;
    let patch: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().context("Failed to parse patch version")?,
        None => 0,
    };

    Ok(ToolVersion::new(major, minor, patch))
}

/// Ask the binary for its version
pub fn detect_tool_version(binary: &str) -> Result<ToolVersion> {
    let output = Command::new(binary)
        .arg("-version")
        .output()
        .with_context(|| format!("Failed to execute {} -version. Is it installed and in PATH?", binary))?;

    if !output.status.success() {
        return Err(anyhow!("{} -version command failed", binary));
    }

    parse_version_output(&String::from_utf8_lossy(&output.stdout))
}
