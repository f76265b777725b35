//! CPU and OS timers for measuring the phases of a run.

use std::{
    sync::OnceLock,
    time::{Duration, Instant},
};

use tracing::{debug, info};

pub const OS_TIMER_FREQUENCY: u64 = 1_000_000;

static OS_TIMER_ORIGIN: OnceLock<Instant> = OnceLock::new();

#[cfg(target_arch = "x86_64")]
#[inline]
pub fn read_cpu_timer() -> u64 {
    use std::arch::x86_64::_rdtsc;
    unsafe { _rdtsc() }
}

#[cfg(target_arch = "aarch64")]
#[inline]
pub fn read_cpu_timer() -> u64 {
    let val: u64;
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
    }
    val
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
pub fn read_cpu_timer() -> u64 {
    read_os_timer()
}

/// Monotonic microseconds since the first call.
pub fn read_os_timer() -> u64 {
    OS_TIMER_ORIGIN.get_or_init(Instant::now).elapsed().as_micros() as u64
}

/// CPU timer ticks per second, measured against the OS timer for `wait_ms`.
pub fn estimate_cpu_frequency(wait_ms: u64) -> u64 {
    let os_wait = OS_TIMER_FREQUENCY * wait_ms.max(1) / 1000;

    let cpu_start = read_cpu_timer();
    let os_start = read_os_timer();
    let mut os_elapsed = 0;
    while os_elapsed < os_wait {
        os_elapsed = read_os_timer().saturating_sub(os_start);
    }
    let cpu_elapsed = read_cpu_timer().wrapping_sub(cpu_start);

    let freq = (cpu_elapsed as u128 * OS_TIMER_FREQUENCY as u128 / os_elapsed as u128) as u64;
    debug!(os_elapsed, cpu_elapsed, freq, "estimated cpu timer frequency");
    freq
}

/// Named phases timed with the CPU timer, in the order they ran.
#[derive(Debug, Default)]
pub struct Timings {
    phases: Vec<(&'static str, u64)>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure<T>(&mut self, label: &'static str, f: impl FnOnce() -> T) -> T {
        let begin = read_cpu_timer();
        let out = f();
        self.phases.push((label, read_cpu_timer().wrapping_sub(begin)));
        out
    }

    pub fn phases(&self) -> &[(&'static str, u64)] {
        &self.phases
    }

    pub fn total(&self) -> u64 {
        self.phases.iter().map(|(_, ticks)| ticks).sum()
    }

    pub fn report(&self, cpu_freq: u64) {
        let total = self.total().max(1);
        for (label, ticks) in &self.phases {
            let share = 100.0 * *ticks as f64 / total as f64;
            info!(
                "{label}: {ticks} ticks, {:?} ({share:.2}%)",
                ticks_to_duration(*ticks, cpu_freq)
            );
        }
        info!(
            "total: {} ticks, {:?}",
            self.total(),
            ticks_to_duration(self.total(), cpu_freq)
        );
    }
}

fn ticks_to_duration(ticks: u64, cpu_freq: u64) -> Duration {
    if cpu_freq == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(ticks as f64 / cpu_freq as f64)
}
