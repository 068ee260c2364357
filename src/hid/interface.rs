//! HID interface discovery.
//!
//! During the host stack's discovery phase the configuration tree is
//! delivered one descriptor at a time, with the 2-byte length/type
//! header already stripped. [`InterfaceCandidate`] accumulates those
//! callbacks into everything needed to adopt a HID interface: the
//! configuration value to select, the interface number and protocol,
//! the report descriptor length, and the interrupt IN endpoint.
//!
//! A candidate is usable once a configuration, a HID interface, and an
//! interrupt IN endpoint have all been seen ([`supported_config`]
//! returns the configuration value to hand to the stack).
//!
//! [`supported_config`]: InterfaceCandidate::supported_config

/// Standard descriptor type codes, as passed alongside each body.
pub const DESC_CONFIGURATION: u8 = 0x02;
pub const DESC_INTERFACE: u8 = 0x04;
pub const DESC_ENDPOINT: u8 = 0x05;
/// HID class descriptor, nested between interface and endpoint.
pub const DESC_HID: u8 = 0x21;

const USB_CLASS_HID: u8 = 0x03;

/// Accumulates per-descriptor discovery callbacks for one device.
///
/// Adopts the first HID interface it sees; descriptors for later
/// interfaces are ignored once an endpoint has been found.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterfaceCandidate {
    config: Option<u8>,
    interface: Option<u8>,
    protocol: u8,
    report_desc_len: Option<u16>,
    endpoint: Option<u8>,
    max_packet_size: u16,
    interval: u8,
}

impl InterfaceCandidate {
    pub const fn new() -> Self {
        Self {
            config: None,
            interface: None,
            protocol: 0,
            report_desc_len: None,
            endpoint: None,
            max_packet_size: 0,
            interval: 0,
        }
    }

    /// Feed one discovery descriptor: its type code and the body with
    /// the length/type header stripped. Field offsets below are body
    /// offsets, not descriptor offsets.
    pub fn feed(&mut self, descriptor_type: u8, body: &[u8]) {
        match descriptor_type {
            DESC_CONFIGURATION if body.len() >= 4 => {
                // New configurations only matter until an interface is
                // adopted; afterwards the value must stay put.
                if self.interface.is_none() {
                    // bConfigurationValue
                    self.config = Some(body[3]);
                }
            }
            DESC_INTERFACE if body.len() >= 6 => {
                // bInterfaceClass
                if self.endpoint.is_none() && body[3] == USB_CLASS_HID {
                    // bInterfaceNumber, bInterfaceProtocol
                    self.interface = Some(body[0]);
                    self.protocol = body[5];
                } else if self.endpoint.is_none() {
                    // A non-HID interface resets a half-seen candidate,
                    // so its endpoints are not misattributed.
                    self.interface = None;
                    self.report_desc_len = None;
                }
            }
            DESC_HID if body.len() >= 7 => {
                if self.interface.is_some() && self.report_desc_len.is_none() {
                    // wDescriptorLength of the report descriptor.
                    self.report_desc_len = Some(u16::from_le_bytes([body[5], body[6]]));
                }
            }
            DESC_ENDPOINT if body.len() >= 5 => {
                if self.interface.is_some() && self.endpoint.is_none() {
                    // bEndpointAddress, bmAttributes
                    let is_in = body[0] & 0x80 != 0;
                    let is_interrupt = body[1] & 0x03 == 0x03;
                    if is_in && is_interrupt {
                        self.endpoint = Some(body[0] & 0x0F);
                        self.max_packet_size = u16::from_le_bytes([body[2], body[3]]);
                        self.interval = body[4];
                    }
                }
            }
            _ => {}
        }
    }

    /// The configuration value to select, once the candidate has a
    /// configuration, a HID interface, and an interrupt IN endpoint.
    pub fn supported_config(&self) -> Option<u8> {
        self.interface
            .and(self.endpoint)
            .and(self.config)
    }

    /// HID interface number (the monitor's instance id).
    pub fn interface(&self) -> Option<u8> {
        self.interface
    }

    /// `bInterfaceProtocol` of the adopted interface.
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Report descriptor length announced by the HID descriptor.
    pub fn report_desc_len(&self) -> u16 {
        self.report_desc_len.unwrap_or(0)
    }

    /// Interrupt IN endpoint number.
    pub fn endpoint(&self) -> Option<u8> {
        self.endpoint
    }

    /// `wMaxPacketSize` of the interrupt IN endpoint.
    pub fn max_packet_size(&self) -> u16 {
        self.max_packet_size
    }

    /// `bInterval` of the interrupt IN endpoint.
    pub fn interval(&self) -> u8 {
        self.interval
    }
}
