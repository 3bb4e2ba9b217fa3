use crate::backend::BackendKind;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct IntrinsicMetrics {
    /// Number of `get_IsSupported` queries answered
    pub queries: AtomicU64,
    /// Number of operations computed by real instructions
    pub hardware_calls: AtomicU64,
    /// Number of operations computed by the portable formulas
    pub software_calls: AtomicU64,
    /// Number of calls refused because the instruction set is unsupported
    pub rejected_calls: AtomicU64,
}

/// A point-in-time copy of [`IntrinsicMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queries: u64,
    pub hardware_calls: u64,
    pub software_calls: u64,
    pub rejected_calls: u64,
}

impl IntrinsicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_call(&self, kind: BackendKind) {
        let counter = match kind {
            BackendKind::Hardware => &self.hardware_calls,
            BackendKind::Software => &self.software_calls,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejected_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            hardware_calls: self.hardware_calls.load(Ordering::Relaxed),
            software_calls: self.software_calls.load(Ordering::Relaxed),
            rejected_calls: self.rejected_calls.load(Ordering::Relaxed),
        }
    }
}
