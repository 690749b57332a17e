use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::error::AppError;

static CURRENT_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Counting wrapper over the system allocator.
///
/// Tracks live heap bytes and a resettable high-water mark, so a trial can be
/// baselined and its peak read back afterwards. Install it in a binary with:
///
/// ```ignore
/// #[global_allocator]
/// static ALLOC: TrackingAllocator = TrackingAllocator;
/// ```
///
/// The counters are process-global; that is fine here because trials run one
/// at a time on a single thread.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    let live = CURRENT_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
}

fn record_dealloc(size: usize) {
    CURRENT_BYTES.fetch_sub(size, Ordering::Relaxed);
}

/// Live tracked heap bytes right now.
pub fn current_bytes() -> u64 {
    CURRENT_BYTES.load(Ordering::Relaxed) as u64
}

/// High-water mark since the last [`reset_peak`].
pub fn peak_bytes() -> u64 {
    PEAK_BYTES.load(Ordering::Relaxed) as u64
}

/// Drop the high-water mark down to the current live total.
pub fn reset_peak() {
    PEAK_BYTES.store(CURRENT_BYTES.load(Ordering::Relaxed), Ordering::Relaxed);
}

const PROBE_ALLOC_BYTES: usize = 64 * 1024;

/// Whether allocations are actually flowing through [`TrackingAllocator`].
/// The counters stay at zero in a process that never installed it.
fn tracking_allocator_active() -> bool {
    reset_peak();
    let baseline = peak_bytes();
    let buf = std::hint::black_box(vec![0u8; PROBE_ALLOC_BYTES]);
    drop(buf);
    peak_bytes() >= baseline + PROBE_ALLOC_BYTES as u64
}

/// Which facility produced a peak-memory figure. Absolute values from
/// different probes are not comparable: `alloc` counts heap bytes allocated
/// by this program, `rusage` reports whole-process peak RSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    Alloc,
    Rusage,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Alloc => write!(f, "alloc"),
            ProbeKind::Rusage => write!(f, "rusage"),
        }
    }
}

/// Peak-memory probe for one trial.
///
/// Preferred: the tracking allocator (resettable per trial). Fallback:
/// `getrusage` peak RSS, which only ever grows over the process lifetime, so
/// later trials can inherit the footprint of earlier ones. Samples carry
/// their [`ProbeKind`] so readers know which figure they are looking at.
#[derive(Debug, Clone, Copy)]
pub struct PeakMemoryProbe {
    kind: ProbeKind,
}

impl PeakMemoryProbe {
    /// Pick the best available probe, or fail rather than fabricate zeros.
    pub fn detect() -> Result<Self, AppError> {
        if tracking_allocator_active() {
            return Ok(Self {
                kind: ProbeKind::Alloc,
            });
        }
        if rusage_peak_bytes().is_ok() {
            tracing::warn!(
                "tracking allocator not installed, falling back to getrusage \
                 (process-wide peak RSS, not resettable per trial)"
            );
            return Ok(Self {
                kind: ProbeKind::Rusage,
            });
        }
        Err(AppError::MeasurementUnavailable(
            "no tracking allocator installed and getrusage failed".to_string(),
        ))
    }

    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    /// Run `f` and return the peak memory attributable to it, in bytes.
    pub fn measure<F>(&self, f: F) -> Result<u64, AppError>
    where
        F: FnOnce() -> Result<(), AppError>,
    {
        match self.kind {
            ProbeKind::Alloc => {
                reset_peak();
                let baseline = current_bytes();
                f()?;
                Ok(peak_bytes().saturating_sub(baseline))
            }
            ProbeKind::Rusage => {
                f()?;
                rusage_peak_bytes()
            }
        }
    }
}

#[cfg(unix)]
fn rusage_peak_bytes() -> Result<u64, AppError> {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return Err(AppError::MeasurementUnavailable(
            "getrusage(RUSAGE_SELF) failed".to_string(),
        ));
    }
    let raw = usage.ru_maxrss as u64;
    // ru_maxrss is kilobytes on Linux, bytes on macOS.
    #[cfg(target_os = "macos")]
    return Ok(raw);
    #[cfg(not(target_os = "macos"))]
    Ok(raw * 1024)
}

#[cfg(not(unix))]
fn rusage_peak_bytes() -> Result<u64, AppError> {
    Err(AppError::MeasurementUnavailable(
        "getrusage is not available on this platform".to_string(),
    ))
}
