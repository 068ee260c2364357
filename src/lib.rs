//! Host-testable core of hidmon.
//!
//! Everything that does not touch RP2040 hardware lives here: the
//! report cache / change detector, the descriptor scan, the heartbeat
//! scheduler, and the diagnostic line formatting.
//!
//! Usage: `cargo test` (default features, no embedded toolchain needed).
//!
//! Note: the firmware binary uses main.rs with #![no_std] and
//! #![no_main] behind the `embedded` feature and links against this
//! library for all of its logic.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod heartbeat;
pub mod hid;
pub mod trace;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - heartbeat scheduling and diagnostic formatting
// (report cache / change detection tests live in src/hid/tests.rs)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::heartbeat::Heartbeat;
    use super::trace::{report_line, InterfaceProtocol};

    // ════════════════════════════════════════════════════════════════════════
    // Heartbeat Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn heartbeat_does_not_fire_before_interval() {
        let mut hb = Heartbeat::with_interval(0, 1000);
        assert_eq!(hb.poll(0), None);
        assert_eq!(hb.poll(500), None);
        assert_eq!(hb.poll(999), None);
    }

    #[test]
    fn heartbeat_fires_once_per_interval() {
        let mut hb = Heartbeat::with_interval(0, 1000);
        assert_eq!(hb.poll(1000), Some(true));
        // Same instant again: already rearmed for 2000.
        assert_eq!(hb.poll(1000), None);
        assert_eq!(hb.poll(1999), None);
        assert_eq!(hb.poll(2000), Some(false));
    }

    #[test]
    fn heartbeat_toggles_alternating_levels() {
        let mut hb = Heartbeat::with_interval(0, 100);
        assert_eq!(hb.poll(100), Some(true));
        assert_eq!(hb.poll(200), Some(false));
        assert_eq!(hb.poll(300), Some(true));
        assert_eq!(hb.level(), true);
    }

    #[test]
    fn heartbeat_never_double_toggles_under_fast_polling() {
        let mut hb = Heartbeat::with_interval(0, 50);
        let mut toggles = 0;
        // Poll every millisecond for one second.
        for now in 0..=1000 {
            if hb.poll(now).is_some() {
                toggles += 1;
            }
        }
        assert_eq!(toggles, 20);
    }

    #[test]
    fn heartbeat_deadline_accumulates_under_irregular_polling() {
        let mut hb = Heartbeat::with_interval(0, 100);
        // Late poll: the deadline advances to 100, not to 170.
        assert_eq!(hb.poll(170), Some(true));
        // 200 is a full interval past the accumulated deadline of 100.
        assert_eq!(hb.poll(200), Some(false));
        assert_eq!(hb.poll(299), None);
        assert_eq!(hb.poll(300), Some(true));
    }

    #[test]
    fn heartbeat_catches_up_one_toggle_per_poll() {
        let mut hb = Heartbeat::with_interval(0, 100);
        // Three intervals elapse unpolled; each poll yields one toggle.
        assert_eq!(hb.poll(350), Some(true));
        assert_eq!(hb.poll(350), Some(false));
        assert_eq!(hb.poll(350), Some(true));
        assert_eq!(hb.poll(350), None);
    }

    #[test]
    fn heartbeat_survives_millis_wraparound() {
        let mut hb = Heartbeat::with_interval(u32::MAX - 49, 100);
        assert_eq!(hb.poll(u32::MAX), None);
        // 50 ms past the anchor, wrapped through zero.
        assert_eq!(hb.poll(49), None);
        assert_eq!(hb.poll(50), Some(true));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Report Line Formatting Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn report_line_formats_hex_bytes() {
        let line = report_line(&[0x02, 0x03]);
        assert_eq!(line.as_str(), "report[2] = 02 03");
    }

    #[test]
    fn report_line_empty_payload() {
        let line = report_line(&[]);
        assert_eq!(line.as_str(), "report[0] =");
    }

    #[test]
    fn report_line_lowercase_two_digit_hex() {
        let line = report_line(&[0x00, 0xFF, 0x0A]);
        assert_eq!(line.as_str(), "report[3] = 00 ff 0a");
    }

    #[test]
    fn report_line_fits_longest_payload() {
        let payload = [0xAB; 64];
        let line = report_line(&payload);
        assert!(line.as_str().starts_with("report[64] = ab ab"));
        assert_eq!(line.len(), "report[64] =".len() + 64 * 3);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Interface Protocol Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn interface_protocol_names() {
        assert_eq!(InterfaceProtocol::from_u8(0).name(), "None");
        assert_eq!(InterfaceProtocol::from_u8(1).name(), "Keyboard");
        assert_eq!(InterfaceProtocol::from_u8(2).name(), "Mouse");
        // Out-of-range protocols fall back to None.
        assert_eq!(InterfaceProtocol::from_u8(7).name(), "None");
    }
}
