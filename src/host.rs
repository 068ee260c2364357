//! HID input driver for the `usbh` host stack.
//!
//! Accumulates the per-descriptor discovery callbacks into an
//! [`InterfaceCandidate`], selects the configuration, opens a control
//! and an interrupt IN pipe, fetches the report descriptor over the
//! control pipe, and queues mount / unmount / report events for the
//! main loop to drain via [`HidInputDriver::take_event`]. All
//! decisions about report contents happen in the library's
//! `ReportMonitor`; this driver only moves bytes.

use heapless::{Deque, Vec};
use usb_device::control::{Recipient, Request, RequestType};
use usb_device::UsbDirection;
use usbh::{
    bus::HostBus,
    driver::Driver,
    types::{ConnectionSpeed, DeviceAddress, SetupPacket},
    PipeId, UsbHost,
};

use hidmon::config::MAX_REPORT_LEN;
use hidmon::hid::interface::InterfaceCandidate;
use hidmon::trace::InterfaceProtocol;

/// Largest HID report descriptor staged during mount.
const MAX_REPORT_DESC_LEN: usize = 256;

/// Devices tracked through enumeration at once.
const MAX_DEVICES: usize = 4;

/// HID report descriptor type, for GET_DESCRIPTOR wValue.
const DESC_HID_REPORT: u8 = 0x22;

/// Events handed to the main loop, in arrival order.
pub enum HidEvent {
    Mounted {
        dev_addr: u8,
        instance: u8,
        protocol: InterfaceProtocol,
        descriptor: Vec<u8, MAX_REPORT_DESC_LEN>,
    },
    Unmounted {
        dev_addr: u8,
        instance: u8,
    },
    Report {
        dev_addr: u8,
        instance: u8,
        data: Vec<u8, MAX_REPORT_LEN>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Accumulating discovery descriptors.
    Discovering,
    /// GET_DESCRIPTOR (report) is in flight on the control pipe.
    FetchingReportDescriptor,
    /// Mounted; interrupt IN completions flow as report events.
    Running,
}

struct DeviceState {
    dev_addr: u8,
    candidate: InterfaceCandidate,
    control_pipe: Option<PipeId>,
    interrupt_pipe: Option<PipeId>,
    phase: Phase,
}

/// `usbh` driver that surfaces raw HID input reports.
pub struct HidInputDriver {
    devices: Vec<DeviceState, MAX_DEVICES>,
    events: Deque<HidEvent, 8>,
}

impl HidInputDriver {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            events: Deque::new(),
        }
    }

    /// Pop the oldest pending event, if any.
    pub fn take_event(&mut self) -> Option<HidEvent> {
        self.events.pop_front()
    }

    fn device_mut(&mut self, dev_addr: u8) -> Option<&mut DeviceState> {
        self.devices.iter_mut().find(|d| d.dev_addr == dev_addr)
    }

    fn push_event(&mut self, event: HidEvent) {
        // A full queue means the main loop stopped draining; dropping
        // the newest event keeps mount ordering intact.
        let _ = self.events.push_back(event);
    }
}

impl Default for HidInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: HostBus> Driver<B> for HidInputDriver {
    fn attached(&mut self, dev_addr: DeviceAddress, _connection_speed: ConnectionSpeed) {
        // Table full: the device goes unmonitored.
        let _ = self.devices.push(DeviceState {
            dev_addr: dev_addr.into(),
            candidate: InterfaceCandidate::new(),
            control_pipe: None,
            interrupt_pipe: None,
            phase: Phase::Discovering,
        });
    }

    fn detached(&mut self, dev_addr: DeviceAddress) {
        let dev_addr: u8 = dev_addr.into();
        if let Some(state) = self.devices.iter().find(|d| d.dev_addr == dev_addr) {
            // Only mounted devices announced themselves; only they
            // announce their departure.
            let announce = state.phase == Phase::Running;
            let instance = state.candidate.interface().unwrap_or(0);
            self.devices.retain(|d| d.dev_addr != dev_addr);
            if announce {
                self.push_event(HidEvent::Unmounted { dev_addr, instance });
            }
        }
    }

    fn descriptor(&mut self, dev_addr: DeviceAddress, descriptor_type: u8, data: &[u8]) {
        let dev_addr: u8 = dev_addr.into();
        if let Some(state) = self.device_mut(dev_addr) {
            if state.phase == Phase::Discovering {
                state.candidate.feed(descriptor_type, data);
            }
        }
    }

    fn configure(&mut self, dev_addr: DeviceAddress) -> Option<u8> {
        let dev_addr: u8 = dev_addr.into();
        let config = self
            .device_mut(dev_addr)
            .and_then(|state| state.candidate.supported_config());

        if config.is_none() {
            // No HID interface with an interrupt IN endpoint: not ours.
            self.devices.retain(|d| d.dev_addr != dev_addr);
        }
        config
    }

    fn configured(&mut self, dev_addr: DeviceAddress, value: u8, host: &mut UsbHost<B>) {
        let addr: u8 = dev_addr.into();
        let Some(state) = self.devices.iter_mut().find(|d| d.dev_addr == addr) else {
            return;
        };
        let Some(config) = state.candidate.supported_config() else {
            return;
        };
        if value != config {
            // Some other driver picked a different configuration.
            return;
        }

        state.control_pipe = host.create_control_pipe(dev_addr);
        // Completeness check: supported_config() verified the endpoint.
        if let Some(ep) = state.candidate.endpoint() {
            state.interrupt_pipe = host.create_interrupt_pipe(
                dev_addr,
                ep,
                UsbDirection::In,
                state.candidate.max_packet_size(),
                state.candidate.interval(),
            );
        }

        // GET_DESCRIPTOR (report), addressed to the HID interface. The
        // transfer must ride our control pipe or the completion is
        // never dispatched back to this driver.
        let (Some(pipe), Some(interface)) = (state.control_pipe, state.candidate.interface())
        else {
            return;
        };
        let setup = SetupPacket::new(
            UsbDirection::In,
            RequestType::Standard,
            Recipient::Interface,
            Request::GET_DESCRIPTOR,
            (DESC_HID_REPORT as u16) << 8,
            interface as u16,
            state.candidate.report_desc_len(),
        );
        if host.control_in(Some(dev_addr), Some(pipe), setup).is_ok() {
            state.phase = Phase::FetchingReportDescriptor;
        }
    }

    fn completed_control(&mut self, dev_addr: DeviceAddress, pipe_id: PipeId, data: Option<&[u8]>) {
        let dev_addr: u8 = dev_addr.into();
        let Some(state) = self.device_mut(dev_addr) else {
            return;
        };
        if state.phase != Phase::FetchingReportDescriptor || state.control_pipe != Some(pipe_id) {
            return;
        }
        state.phase = Phase::Running;
        let instance = state.candidate.interface().unwrap_or(0);
        let protocol = InterfaceProtocol::from_u8(state.candidate.protocol());

        let mut descriptor: Vec<u8, MAX_REPORT_DESC_LEN> = Vec::new();
        if let Some(data) = data {
            // Oversize tails are dropped; the scan reads what fits.
            let take = data.len().min(descriptor.capacity());
            let _ = descriptor.extend_from_slice(&data[..take]);
        }
        self.push_event(HidEvent::Mounted {
            dev_addr,
            instance,
            protocol,
            descriptor,
        });
    }

    fn completed_in(&mut self, dev_addr: DeviceAddress, pipe_id: PipeId, data: &[u8]) {
        let dev_addr: u8 = dev_addr.into();
        let Some(state) = self.device_mut(dev_addr) else {
            return;
        };
        if state.phase != Phase::Running || state.interrupt_pipe != Some(pipe_id) {
            return;
        }
        let instance = state.candidate.interface().unwrap_or(0);
        // A transfer longer than any valid report is dropped here; the
        // monitor never sees a truncated payload.
        if let Ok(data) = Vec::from_slice(data) {
            self.push_event(HidEvent::Report {
                dev_addr,
                instance,
                data,
            });
        }
    }

    fn completed_out(&mut self, _dev_addr: DeviceAddress, _pipe_id: PipeId, _data: &mut [u8]) {
        // No OUT pipes in use.
    }
}
