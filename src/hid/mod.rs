//! HID report monitoring: descriptor metadata and change detection.

pub mod interface;
pub mod monitor;
pub mod report_info;


pub use interface::InterfaceCandidate;
pub use monitor::{InterfaceKey, ReportMonitor, Submission};
pub use report_info::{parse_report_info, ReportInfo};
