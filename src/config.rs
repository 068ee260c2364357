//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, clock rates, and table capacities
//! live here so they can be tuned in one place.

// SPI0

/// SPI0 bus clock rate (Hz).
pub const SPI_BAUD_HZ: u32 = 1_000_000;

// I2C0

/// I2C0 bus clock rate (Hz). 400 kHz fast mode.
pub const I2C_BAUD_HZ: u32 = 400_000;

// GPIO pin assignments (Pico defaults)
//
// These are logical names; actual `rp2040_hal::gpio::Pins` fields are selected in
// `main.rs`. See the GPIO function select table in the RP2040 datasheet
// before moving any of them.
//
//   SPI0 MISO   → GP16
//   SPI0 CS     → GP17  (plain output, driven high at rest: active-low)
//   SPI0 SCK    → GP18
//   SPI0 MOSI   → GP19
//   I²C0 SDA    → GP8   (internal pull-up)
//   I²C0 SCL    → GP9   (internal pull-up)
//   Onboard LED → GP25

// Heartbeat

/// LED heartbeat toggle interval (ms).
pub const HEARTBEAT_INTERVAL_MS: u32 = 1000;

// HID report monitoring

/// Maximum number of HID interfaces tracked at once.
pub const MAX_INTERFACES: usize = 4;

/// Maximum number of report descriptors parsed per interface.
pub const MAX_REPORTS_PER_INTERFACE: usize = 4;

/// Maximum HID input report payload length (bytes).
/// 64 is the full-speed interrupt endpoint maximum.
pub const MAX_REPORT_LEN: usize = 64;
