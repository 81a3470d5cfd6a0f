//! Peak heap measurement for benchmark runs.
//!
//! # Purpose
//!
//! This module provides:
//! - [`TrackingAllocator`]: a [`GlobalAlloc`] wrapper over [`System`] that keeps
//!   a live-byte ledger and a resettable high-water mark.
//! - [`MemoryTracker`]: the `start` / `stop -> peak bytes` seam the harness
//!   measures through.
//! - [`AllocTracker`]: the tracker backed by [`TrackingAllocator`].
//!
//! # Usage
//!
//! ```rust,ignore
//! // In main.rs (or an integration test crate), install the allocator:
//! #[global_allocator]
//! static ALLOC: sortscope::alloc::TrackingAllocator = sortscope::alloc::TrackingAllocator;
//! ```
//!
//! Without the allocator installed, [`AllocTracker`] reports zero bytes.
//!
//! # Multi-threaded Limitation
//!
//! The ledger is global. Allocations from *any* thread raise the mark, so a
//! measurement is only attributable to the code under test when nothing else
//! allocates concurrently. Benchmark sweeps run their measurements strictly
//! one after another for this reason.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Bytes currently allocated through [`TrackingAllocator`].
static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);

/// Highest value of `LIVE_BYTES` since the last [`reset_peak`].
static PEAK_BYTES: AtomicU64 = AtomicU64::new(0);

/// Set on the first allocation routed through [`TrackingAllocator`].
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Current live bytes according to the ledger.
pub fn live_bytes() -> u64 {
    LIVE_BYTES.load(Ordering::Relaxed)
}

/// High-water mark since the last reset.
pub fn peak_bytes() -> u64 {
    PEAK_BYTES.load(Ordering::Relaxed)
}

/// Lowers the high-water mark to the current live total and returns it.
///
/// Only the mark is reset; the live ledger is never rewritten, since live
/// allocations made before the reset are still freed through it later.
pub fn reset_peak() -> u64 {
    let live = live_bytes();
    PEAK_BYTES.store(live, Ordering::Relaxed);
    live
}

/// Whether [`TrackingAllocator`] is serving allocations in this process.
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

/// A wrapper around the system allocator that tracks live and peak bytes.
///
/// Adds two relaxed atomic updates per allocation; meant for benchmarking
/// builds, not for general use.
pub struct TrackingAllocator;

#[inline]
fn record_growth(bytes: u64) {
    let live = LIVE_BYTES.fetch_add(bytes, Ordering::Relaxed) + bytes;
    PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
}

#[inline]
fn record_shrink(bytes: u64) {
    LIVE_BYTES.fetch_sub(bytes, Ordering::Relaxed);
}

// SAFETY: every method delegates to `System`, which upholds the `GlobalAlloc`
// contract. The ledger updates happen after a successful allocation and after
// a deallocation, and never touch the memory itself.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            INSTALLED.store(true, Ordering::Relaxed);
            record_growth(layout.size() as u64);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            INSTALLED.store(true, Ordering::Relaxed);
            record_growth(layout.size() as u64);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_shrink(layout.size() as u64);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            let old_size = layout.size() as u64;
            let new_size = new_size as u64;
            if new_size > old_size {
                record_growth(new_size - old_size);
            } else {
                record_shrink(old_size - new_size);
            }
        }
        new_ptr
    }
}

/// Peak-memory instrumentation around a single measured call.
pub trait MemoryTracker {
    /// Begins a measurement window.
    fn start(&mut self);

    /// Ends the window, returning the peak bytes allocated above the level
    /// seen at [`start`](MemoryTracker::start).
    fn stop(&mut self) -> u64;

    /// Whether a window is open.
    fn is_tracking(&self) -> bool;
}

/// [`MemoryTracker`] backed by the process-wide [`TrackingAllocator`] ledger.
#[derive(Debug, Default)]
pub struct AllocTracker {
    baseline: Option<u64>,
}

impl AllocTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryTracker for AllocTracker {
    fn start(&mut self) {
        self.baseline = Some(reset_peak());
    }

    fn stop(&mut self) -> u64 {
        match self.baseline.take() {
            Some(baseline) => peak_bytes().saturating_sub(baseline),
            None => 0,
        }
    }

    fn is_tracking(&self) -> bool {
        self.baseline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_reports_zero() {
        let mut tracker = AllocTracker::new();
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.stop(), 0);
    }

    #[test]
    fn start_opens_window_and_stop_closes_it() {
        let mut tracker = AllocTracker::new();
        tracker.start();
        assert!(tracker.is_tracking());
        tracker.stop();
        assert!(!tracker.is_tracking());
    }
}
