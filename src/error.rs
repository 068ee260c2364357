//! Unified error type for hidmon.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging when the
//! `defmt` feature is enabled (the host test build goes without it).

/// Top-level error type used across the application.
///
/// Per the error-handling model, none of these are fatal: the main loop
/// logs the error and keeps polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A composite report carried an id with no matching descriptor
    /// entry; the report is discarded.
    UnknownReportId { report_id: u8 },

    /// A report arrived for a (device, instance) pair that was never
    /// mounted (or was already unmounted); the report is discarded.
    UnknownInterface { dev_addr: u8, instance: u8 },

    /// A composite report arrived with zero bytes, so there is no id
    /// byte to strip.
    EmptyReport,

    /// Report payload exceeds the owned-buffer capacity. Dropped rather
    /// than truncated, so stored state never lies about a report.
    ReportTooLong { len: usize },

    /// The interface table is full; the mounting device goes
    /// unmonitored.
    InterfaceTableFull { dev_addr: u8, instance: u8 },
}
