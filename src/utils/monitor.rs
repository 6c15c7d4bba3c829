#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct RunStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// Process resource usage sampled between the phases of a run.
#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    peak_memory: Mutex<u64>,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(pid),
                Err(e) => {
                    tracing::warn!("Run monitoring disabled, cannot resolve own PID: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            start_time: Instant::now(),
            peak_memory: Mutex::new(0),
        }
    }

    pub fn get_stats(&self) -> Option<RunStats> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let process = system.process(pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(RunStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.pid.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = RunMonitor::new(false);
        assert!(!monitor.is_enabled());
        assert!(monitor.get_stats().is_none());
    }

    #[test]
    fn test_enabled_monitor_samples_own_process() {
        let monitor = RunMonitor::new(true);
        assert!(monitor.is_enabled());
        let stats = monitor.get_stats().expect("own process should be visible");
        assert!(stats.peak_memory_mb >= stats.memory_usage_mb);
    }
}
