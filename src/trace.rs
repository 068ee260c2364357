//! Diagnostic line formatting.
//!
//! The report line format is fixed: `report[<len>] = <hex bytes...>`,
//! two lowercase hex digits per byte, space-separated. Formatting into
//! a `heapless::String` keeps the output testable on the host; the
//! firmware hands the finished line to defmt.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_REPORT_LEN;

/// Worst case: `report[64] = ` plus 64 three-char ` xx` groups.
pub const REPORT_LINE_CAP: usize = 16 + MAX_REPORT_LEN * 3;

/// Format a changed report payload as `report[<len>] = <hex bytes...>`.
pub fn report_line(payload: &[u8]) -> String<REPORT_LINE_CAP> {
    let mut line = String::new();
    // Cannot fail: REPORT_LINE_CAP covers the longest accepted payload.
    let _ = write!(line, "report[{}] =", payload.len());
    for &b in payload {
        let _ = write!(line, " {:02x}", b);
    }
    line
}

/// HID interface protocol, as reported by the interface descriptor's
/// `bInterfaceProtocol` for the boot subclass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceProtocol {
    None,
    Keyboard,
    Mouse,
}

impl InterfaceProtocol {
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            1 => InterfaceProtocol::Keyboard,
            2 => InterfaceProtocol::Mouse,
            _ => InterfaceProtocol::None,
        }
    }

    /// Protocol name for mount diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            InterfaceProtocol::None => "None",
            InterfaceProtocol::Keyboard => "Keyboard",
            InterfaceProtocol::Mouse => "Mouse",
        }
    }
}
