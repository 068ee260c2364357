//! HID report descriptor scan.
//!
//! Reduces a report descriptor to one `(report id, usage page, usage)`
//! triple per top-level collection - exactly the metadata the report
//! monitor needs to dispatch incoming reports. Key items:
//! - Usage Page: category of usages (keyboard, mouse, consumer, etc.)
//! - Usage: specific function within a page
//! - Report ID: identifies which report follows (if multiple)
//! - Collection / End Collection: top-level boundaries
//!
//! ## Limitations
//!
//! This is deliberately not a general HID parser:
//! - Only depth-0 usage page / usage are captured
//! - Push/Pop state is not supported
//! - Report sizes and field layouts are ignored

use heapless::Vec;

use crate::config::MAX_REPORTS_PER_INTERFACE;

/// Metadata for one top-level report of a HID interface.
///
/// Populated once at mount; immutable until remount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportInfo {
    /// Report id (0 when the interface multiplexes nothing).
    pub report_id: u8,
    /// Usage page in effect at the collection's opening.
    pub usage_page: u16,
    /// Usage in effect at the collection's opening.
    pub usage: u16,
}

/// Scan a report descriptor, emitting one [`ReportInfo`] per top-level
/// collection, capped at [`MAX_REPORTS_PER_INTERFACE`].
///
/// Truncated or malformed input ends the scan early; whatever was
/// completed before the bad item is returned.
pub fn parse_report_info(data: &[u8]) -> Vec<ReportInfo, MAX_REPORTS_PER_INTERFACE> {
    let mut infos: Vec<ReportInfo, MAX_REPORTS_PER_INTERFACE> = Vec::new();
    let mut current = ReportInfo::default();
    let mut depth: u16 = 0;

    let mut i = 0;
    while i < data.len() && infos.len() < infos.capacity() {
        let prefix = data[i];
        let tag = (prefix >> 4) & 0x0F;
        let item_type = (prefix >> 2) & 0x03;
        let size = match prefix & 0x03 {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 4,
        };

        if i + 1 + size > data.len() {
            break;
        }

        let value: u32 = match size {
            0 => 0,
            1 => data[i + 1] as u32,
            2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
            _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
        };

        match item_type {
            // Main items
            0 => match tag {
                // Collection
                0x0A => depth += 1,
                // End Collection
                0x0C => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        // Top-level collection closed: emit its triple.
                        // The next collection restates its own page/usage.
                        let _ = infos.push(current);
                        current = ReportInfo::default();
                    }
                }
                _ => {}
            },
            // Global items
            1 => match tag {
                // Usage Page
                0x00 => {
                    if depth == 0 {
                        current.usage_page = value as u16;
                    }
                }
                // Report ID
                0x08 => current.report_id = value as u8,
                _ => {}
            },
            // Local items
            2 => {
                // Usage, captured before the collection opens.
                if tag == 0x00 && depth == 0 {
                    current.usage = value as u16;
                }
            }
            _ => {}
        }

        i += 1 + size;
    }

    infos
}
