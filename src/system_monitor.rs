// System monitor
//
// Point-in-time CPU / memory / platform snapshot via sysinfo, disk via statvfs.
// Nothing is cached between calls: every request samples the host afresh.

use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(not(unix))]
use sysinfo::Disks;
use sysinfo::System;

/// Window between the two CPU refreshes that make up one usage sample.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(500);

/// Filesystem reported as "disk" by default.
pub const DEFAULT_DISK_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f32,
}

impl Usage {
    /// `None` when `total_bytes` is zero; a percentage of nothing is meaningless.
    /// Memory accounting: everything not available is used.
    pub fn from_available(total_bytes: u64, available_bytes: u64) -> Option<Self> {
        if total_bytes == 0 {
            return None;
        }
        let used_bytes = total_bytes.saturating_sub(available_bytes);
        Some(Self {
            total_bytes,
            used_bytes,
            percent: round1(used_bytes as f64 / total_bytes as f64 * 100.0),
        })
    }

    /// Disk accounting as `df` reports it: used is total minus free blocks,
    /// and the percentage is taken over what unprivileged users can reach
    /// (used + available), so root-reserved blocks count as neither.
    pub fn from_fs_stats(stats: &FsStats) -> Option<Self> {
        if stats.blocks == 0 {
            return None;
        }
        let unit = stats.fragment_size;
        let used_blocks = stats.blocks.saturating_sub(stats.blocks_free);
        let reachable = used_blocks + stats.blocks_available;
        let percent = if reachable == 0 {
            0.0
        } else {
            round1(used_blocks as f64 / reachable as f64 * 100.0)
        };
        Some(Self {
            total_bytes: stats.blocks * unit,
            used_bytes: used_blocks * unit,
            percent,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    pub platform: String,
    pub cpu_percent: f32,
    pub memory: Usage,
    pub disk: Usage,
}

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("cannot resolve disk path {path}: {source}")]
    DiskPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("statvfs failed for {path}: {source}")]
    Statvfs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no mounted filesystem covers {0}")]
    NoDisk(PathBuf),

    #[error("filesystem at {0} reports zero capacity")]
    EmptyDisk(PathBuf),

    #[error("memory totals unavailable")]
    Memory,

    #[error("no CPUs reported by the OS")]
    Cpu,
}

/// Anything that can produce a [`SystemSnapshot`].
///
/// `collect` may block for the CPU sampling window; async callers should run
/// it on the blocking pool.
pub trait MetricsSource: Send + Sync + 'static {
    fn collect(&self) -> Result<SystemSnapshot, CollectError>;
}

/// Live collector backed by `sysinfo`. Holds configuration only, no samples.
#[derive(Debug, Clone)]
pub struct SysinfoCollector {
    disk_path: PathBuf,
    cpu_window: Duration,
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new(DEFAULT_DISK_PATH, CPU_SAMPLE_WINDOW)
    }
}

impl SysinfoCollector {
    /// The window is clamped to sysinfo's minimum refresh interval, below
    /// which CPU usage reads as zero.
    pub fn new(disk_path: impl Into<PathBuf>, cpu_window: Duration) -> Self {
        Self {
            disk_path: disk_path.into(),
            cpu_window: cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }

    fn sample_cpu(&self, sys: &mut System) -> Result<f32, CollectError> {
        sys.refresh_cpu_all();
        std::thread::sleep(self.cpu_window);
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(CollectError::Cpu);
        }
        let avg = cpus.iter().map(|c| c.cpu_usage()).sum::<f32>() / cpus.len() as f32;
        Ok(round1(avg as f64))
    }

    fn sample_memory(sys: &mut System) -> Result<Usage, CollectError> {
        sys.refresh_memory();
        Usage::from_available(sys.total_memory(), sys.available_memory())
            .ok_or(CollectError::Memory)
    }

    fn sample_disk(&self) -> Result<Usage, CollectError> {
        let resolved =
            std::fs::canonicalize(&self.disk_path).map_err(|source| CollectError::DiskPath {
                path: self.disk_path.clone(),
                source,
            })?;

        let stats = fs_stats(&resolved)?;
        tracing::debug!(path = %resolved.display(), ?stats, "disk usage resolved");

        Usage::from_fs_stats(&stats).ok_or(CollectError::EmptyDisk(resolved))
    }
}

/// Raw filesystem counters, in units of `fragment_size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub fragment_size: u64,
    pub blocks: u64,
    /// Free blocks, including those reserved for root.
    pub blocks_free: u64,
    /// Free blocks usable by unprivileged processes.
    pub blocks_available: u64,
}

#[cfg(unix)]
fn fs_stats(path: &Path) -> Result<FsStats, CollectError> {
    use nix::sys::statvfs::statvfs;

    let stats = statvfs(path).map_err(|e| CollectError::Statvfs {
        path: path.to_path_buf(),
        source: std::io::Error::from(e),
    })?;

    // f_frsize is the unit f_blocks is counted in; some filesystems leave it 0.
    let fragment_size = if stats.fragment_size() > 0 {
        stats.fragment_size() as u64
    } else {
        stats.block_size() as u64
    };

    Ok(FsStats {
        fragment_size,
        blocks: stats.blocks() as u64,
        blocks_free: stats.blocks_free() as u64,
        blocks_available: stats.blocks_available() as u64,
    })
}

/// sysinfo exposes no free-block count here, so free and available coincide.
#[cfg(not(unix))]
fn fs_stats(path: &Path) -> Result<FsStats, CollectError> {
    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|d| path.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().components().count())
        .ok_or_else(|| CollectError::NoDisk(path.to_path_buf()))?;

    Ok(FsStats {
        fragment_size: 1,
        blocks: disk.total_space(),
        blocks_free: disk.available_space(),
        blocks_available: disk.available_space(),
    })
}

impl MetricsSource for SysinfoCollector {
    fn collect(&self) -> Result<SystemSnapshot, CollectError> {
        let mut sys = System::new();

        // Disk first: a bad path fails fast, before the CPU window is spent.
        let disk = self.sample_disk()?;
        let memory = Self::sample_memory(&mut sys)?;
        let cpu_percent = self.sample_cpu(&mut sys)?;

        Ok(SystemSnapshot {
            platform: platform_string(),
            cpu_percent,
            memory,
            disk,
        })
    }
}

/// `"<system>-<release>-<machine>"` from uname, e.g. `Linux-6.8.0-31-generic-x86_64`.
#[cfg(unix)]
pub fn platform_string() -> String {
    match nix::sys::utsname::uname() {
        Ok(uts) => format!(
            "{}-{}-{}",
            uts.sysname().to_string_lossy(),
            uts.release().to_string_lossy(),
            uts.machine().to_string_lossy(),
        ),
        Err(e) => {
            tracing::warn!("uname failed: {}", e);
            fallback_platform()
        }
    }
}

#[cfg(not(unix))]
pub fn platform_string() -> String {
    fallback_platform()
}

fn fallback_platform() -> String {
    let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    match System::kernel_version() {
        Some(kernel) => format!("{}-{}-{}", name, kernel, std::env::consts::ARCH),
        None => format!("{}-{}", name, std::env::consts::ARCH),
    }
}

fn round1(value: f64) -> f32 {
    ((value * 10.0).round() / 10.0) as f32
}
