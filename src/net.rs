//! Streaming archive download with throttled progress reporting
//!
//! One blocking GET with a hard upper-bound timeout. Progress is emitted as
//! plain percent lines, only when the integer percentage strictly increases,
//! and at most once per sample interval so large downloads cannot flood the
//! output. Zero-byte payloads are the caller's responsibility to reject.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{BotforgeError, Result};

/// Hard upper bound for one archive download
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Minimum wall-clock distance between two progress lines
const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

const CHUNK_SIZE: usize = 64 * 1024;

/// Transient per-download progress counters.
///
/// Pure bookkeeping: `advance` is fed the chunk size and the current instant
/// and decides whether a new percentage should be reported. Percentages are
/// strictly increasing; with an unknown total nothing is ever reported.
pub struct DownloadProgress {
    received: u64,
    total: u64,
    last_percent: Option<u32>,
    last_emit: Option<Instant>,
    interval: Duration,
}

impl DownloadProgress {
    pub fn new(total: u64) -> Self {
        Self::with_interval(total, SAMPLE_INTERVAL)
    }

    pub fn with_interval(total: u64, interval: Duration) -> Self {
        Self {
            received: 0,
            total,
            last_percent: None,
            last_emit: None,
            interval,
        }
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    /// Record `bytes` received at `now`; returns the whole percentage to
    /// report, or `None` when inside the sample interval or when the
    /// percentage has not increased.
    pub fn advance(&mut self, bytes: u64, now: Instant) -> Option<u32> {
        self.received += bytes;
        if self.total == 0 {
            return None;
        }

        if let Some(last) = self.last_emit {
            if now.duration_since(last) < self.interval {
                return None;
            }
        }

        let percent = ((self.received.saturating_mul(100)) / self.total).min(100) as u32;
        if self.last_percent.is_some_and(|p| percent <= p) {
            return None;
        }

        self.last_percent = Some(percent);
        self.last_emit = Some(now);
        Some(percent)
    }
}

/// Download `url` to `destination` with a streaming GET.
///
/// Fails on any transport, timeout or filesystem-write error. No partial
/// file cleanup happens here; the working directory is deliberately left on
/// disk for diagnostics.
pub fn download(url: &str, destination: &Path) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;

    let mut response = client.get(url).send()?.error_for_status().map_err(|e| {
        BotforgeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })?;

    let total = response.content_length().unwrap_or(0);
    let mut progress = DownloadProgress::new(total);

    let mut file = File::create(destination).map_err(|e| BotforgeError::DownloadFailed {
        url: url.to_string(),
        reason: format!("cannot create {}: {}", destination.display(), e),
    })?;

    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = response
            .read(&mut buf)
            .map_err(|e| BotforgeError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .map_err(|e| BotforgeError::DownloadFailed {
                url: url.to_string(),
                reason: format!("write to {} failed: {}", destination.display(), e),
            })?;
        if let Some(percent) = progress.advance(n as u64, Instant::now()) {
            println!("Downloading corebot source... {percent}%");
        }
    }
    file.flush().map_err(|e| BotforgeError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}
