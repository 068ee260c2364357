//! hidmon firmware entry point.
//!
//! Bring-up order: clocks, SPI0, I2C0, LED, USB host. After that a
//! single cooperative loop polls the USB host stack (driver callbacks
//! run synchronously inside the poll), drains the driver's event queue
//! into the report monitor, and polls the LED heartbeat. Nothing in
//! the loop blocks or sleeps.

#![no_std]
#![no_main]

mod host;

use defmt::{info, warn};
use defmt_rtt as _;
use panic_probe as _;

use cortex_m_rt::entry;
use embedded_hal::digital::OutputPin;
use fugit::RateExtU32;
use rp2040_hal::{
    self as hal,
    clocks::init_clocks_and_plls,
    gpio::{FunctionI2C, FunctionSpi, Pin, Pins, PullUp},
    usb::host::UsbHostBus,
    Clock, Sio, Spi, Timer, Watchdog, I2C,
};
use usbh::{PollResult, UsbHost};

use hidmon::config;
use hidmon::heartbeat::Heartbeat;
use hidmon::hid::{parse_report_info, InterfaceKey, ReportMonitor, Submission};
use hidmon::trace::report_line;

use host::{HidEvent, HidInputDriver};

/// The linker places this boot block at the start of the program
/// image; the ROM bootloader needs it to get the code up and running.
#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// External crystal on the Pico board is 12 MHz.
const XTAL_FREQ_HZ: u32 = 12_000_000;

/// Monotonic milliseconds from the 1 MHz system timer.
fn millis(timer: &Timer) -> u32 {
    (timer.get_counter().ticks() / 1_000) as u32
}

#[entry]
fn main() -> ! {
    let mut pac = hal::pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let clocks = init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // SPI0 at 1 MHz on GP16/18/19; GP17 is a plain output for chip
    // select, parked high (active-low).
    let spi_miso = pins.gpio16.into_function::<FunctionSpi>();
    let spi_sck = pins.gpio18.into_function::<FunctionSpi>();
    let spi_mosi = pins.gpio19.into_function::<FunctionSpi>();
    let mut spi_cs = pins.gpio17.into_push_pull_output();
    spi_cs.set_high().unwrap();
    let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (spi_mosi, spi_miso, spi_sck));
    let _spi = spi.init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        config::SPI_BAUD_HZ.Hz(),
        embedded_hal::spi::MODE_0,
    );

    // I2C0 at 400 kHz on GP8/GP9 with internal pull-ups.
    let i2c_sda: Pin<_, FunctionI2C, PullUp> = pins.gpio8.reconfigure();
    let i2c_scl: Pin<_, FunctionI2C, PullUp> = pins.gpio9.reconfigure();
    let _i2c = I2C::i2c0(
        pac.I2C0,
        i2c_sda,
        i2c_scl,
        config::I2C_BAUD_HZ.Hz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    let mut led = pins.gpio25.into_push_pull_output();
    led.set_low().unwrap();

    let mut usb_host = UsbHost::new(UsbHostBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        &mut pac.RESETS,
    ));
    let mut driver = HidInputDriver::new();
    let mut monitor = ReportMonitor::new();
    let mut heartbeat = Heartbeat::new(millis(&timer));

    info!("hidmon up, waiting for HID devices");

    loop {
        match usb_host.poll(&mut [&mut driver]) {
            PollResult::NoDevice | PollResult::Busy | PollResult::Idle => {}
            PollResult::BusError(_) => warn!("usb bus error"),
            PollResult::DiscoveryError(_) => warn!("device discovery failed"),
            _ => {}
        }

        while let Some(event) = driver.take_event() {
            match event {
                HidEvent::Mounted {
                    dev_addr,
                    instance,
                    protocol,
                    descriptor,
                } => {
                    info!(
                        "HID device address = {}, instance = {} is mounted",
                        dev_addr, instance
                    );
                    let infos = parse_report_info(&descriptor);
                    let key = InterfaceKey { dev_addr, instance };
                    match monitor.mount(key, &infos) {
                        Ok(count) => info!(
                            "HID has {} reports and interface protocol = {=str}",
                            count,
                            protocol.name()
                        ),
                        Err(err) => warn!("mount rejected: {}", err),
                    }
                }
                HidEvent::Unmounted { dev_addr, instance } => {
                    info!(
                        "HID device address = {}, instance = {} is unmounted",
                        dev_addr, instance
                    );
                    monitor.unmount(InterfaceKey { dev_addr, instance });
                }
                HidEvent::Report {
                    dev_addr,
                    instance,
                    data,
                } => {
                    let key = InterfaceKey { dev_addr, instance };
                    match monitor.submit(key, &data) {
                        Ok(Submission::Changed(payload)) => {
                            info!("{=str}", report_line(payload).as_str());
                        }
                        Ok(Submission::Unchanged) => {}
                        Err(err) => warn!("report dropped: {}", err),
                    }
                }
            }
        }

        if let Some(level) = heartbeat.poll(millis(&timer)) {
            if level {
                led.set_high().unwrap();
            } else {
                led.set_low().unwrap();
            }
        }
    }
}
