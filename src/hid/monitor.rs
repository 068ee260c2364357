//! HID report cache and change detection.
//!
//! [`ReportMonitor`] owns one slot per mounted HID interface: the
//! descriptor triples parsed at mount time plus the last report it
//! announced for that interface. [`ReportMonitor::submit`] decides
//! whether a newly received report is worth printing.
//!
//! State is per interface, keyed by (device address, instance), so two
//! attached devices never suppress or flap each other's output.

use heapless::Vec;

use crate::config::{MAX_INTERFACES, MAX_REPORTS_PER_INTERFACE, MAX_REPORT_LEN};
use crate::error::Error;
use crate::hid::report_info::ReportInfo;

/// Identifies one HID interface of one attached device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceKey {
    pub dev_addr: u8,
    pub instance: u8,
}

/// The last report announced for an interface.
///
/// Replaced wholesale on every detected change; overwriting the
/// `heapless::Vec` drops the previous bytes automatically.
#[derive(Clone, Debug)]
struct LastReport {
    usage_page: u16,
    usage: u16,
    bytes: Vec<u8, MAX_REPORT_LEN>,
}

struct InterfaceSlot {
    key: InterfaceKey,
    reports: Vec<ReportInfo, MAX_REPORTS_PER_INTERFACE>,
    last: Option<LastReport>,
}

/// Outcome of submitting a received report.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission<'a> {
    /// The report differs from the last announced one; the payload
    /// (report id already stripped for composite reports) should be
    /// printed. The monitor has stored it as the new last-seen state.
    Changed(&'a [u8]),
    /// Identical to the last announced report; nothing to do.
    Unchanged,
}

/// Per-interface report cache with change detection.
pub struct ReportMonitor {
    slots: Vec<InterfaceSlot, MAX_INTERFACES>,
}

impl ReportMonitor {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register a mounted interface with its parsed descriptor triples.
    ///
    /// Remounting a known key replaces its triples and clears its
    /// last-seen state, so a re-plugged device starts from a clean
    /// slate. Returns the number of registered triples.
    pub fn mount(&mut self, key: InterfaceKey, reports: &[ReportInfo]) -> Result<usize, Error> {
        let mut entries: Vec<ReportInfo, MAX_REPORTS_PER_INTERFACE> = Vec::new();
        for info in reports.iter().take(MAX_REPORTS_PER_INTERFACE) {
            // Cannot overflow: iteration is capped at capacity.
            let _ = entries.push(*info);
        }
        let count = entries.len();

        if let Some(slot) = self.slots.iter_mut().find(|s| s.key == key) {
            slot.reports = entries;
            slot.last = None;
            return Ok(count);
        }

        self.slots
            .push(InterfaceSlot {
                key,
                reports: entries,
                last: None,
            })
            .map_err(|_| Error::InterfaceTableFull {
                dev_addr: key.dev_addr,
                instance: key.instance,
            })?;
        Ok(count)
    }

    /// Drop an interface's slot entirely. Returns whether it existed.
    pub fn unmount(&mut self, key: InterfaceKey) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.key != key);
        self.slots.len() != before
    }

    /// Number of currently mounted interfaces.
    pub fn mounted(&self) -> usize {
        self.slots.len()
    }

    /// Submit a received report for change detection.
    ///
    /// An interface with exactly one report triple of id 0 sends simple
    /// reports: the whole buffer is the payload. Anything else is a
    /// composite report: the first byte is the report id, stripped
    /// before lookup and comparison.
    pub fn submit<'a>(
        &mut self,
        key: InterfaceKey,
        report: &'a [u8],
    ) -> Result<Submission<'a>, Error> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or(Error::UnknownInterface {
                dev_addr: key.dev_addr,
                instance: key.instance,
            })?;

        let (info, payload) = if slot.reports.len() == 1 && slot.reports[0].report_id == 0 {
            // Simple report without a report id byte.
            (slot.reports[0], report)
        } else {
            // Composite report: first byte is the report id, data
            // starts from the second byte.
            let (&rpt_id, payload) = report.split_first().ok_or(Error::EmptyReport)?;
            let info = slot
                .reports
                .iter()
                .find(|info| info.report_id == rpt_id)
                .copied()
                .ok_or(Error::UnknownReportId { report_id: rpt_id })?;
            (info, payload)
        };

        if payload.len() > MAX_REPORT_LEN {
            return Err(Error::ReportTooLong { len: payload.len() });
        }

        let changed = match &slot.last {
            None => true,
            Some(last) => {
                last.usage_page != info.usage_page
                    || last.usage != info.usage
                    || last.bytes.as_slice() != payload
            }
        };

        if !changed {
            return Ok(Submission::Unchanged);
        }

        // Replace the stored state wholesale; the old buffer goes with it.
        let mut bytes: Vec<u8, MAX_REPORT_LEN> = Vec::new();
        // Cannot fail: length was checked above.
        let _ = bytes.extend_from_slice(payload);
        slot.last = Some(LastReport {
            usage_page: info.usage_page,
            usage: info.usage,
            bytes,
        });

        Ok(Submission::Changed(payload))
    }
}

impl Default for ReportMonitor {
    fn default() -> Self {
        Self::new()
    }
}
