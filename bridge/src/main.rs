//! C64-to-USB keyboard bridge.
//!
//! Turns a Commodore 64 keyboard into a USB HID keyboard on a Linux board
//! in USB gadget mode:
//! - 8×8 matrix scanning over GPIO (columns driven low one at a time)
//! - Per-key timestamp debouncing
//! - Restore key as a modifier remapping cursor and function keys
//! - Boot-protocol HID reports written to the gadget device

mod debounce;
mod gpio;
mod hid;
mod matrix;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
use hid::{DryRunEmitter, HidGadget, KeyEmitter};
use matrix::{MonotonicClock, Scanner};

#[derive(Parser)]
#[command(name = "c64-bridge")]
#[command(about = "C64 keyboard to USB HID bridge")]
struct Cli {
    /// GPIO chip the keyboard harness is wired to
    #[arg(long, default_value = "gpiochip0")]
    chip: String,

    /// USB gadget HID keyboard device
    #[arg(long, default_value = "/dev/hidg0")]
    hidg: PathBuf,

    /// Debounce interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Delay before the first scan pass, in seconds
    #[arg(long, default_value_t = 1)]
    startup_delay: u64,

    /// Log key events instead of writing HID reports
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let chip = gpiod::Chip::new(&cli.chip).with_context(|| format!("opening {}", cli.chip))?;
    let pins = gpio::GpiodMatrix::open(&chip).context("requesting matrix lines")?;
    let gate = gpio::GpiodRestore::open(&chip).context("requesting restore line")?;

    let mut emitter: Box<dyn KeyEmitter> = if cli.dry_run {
        log::info!("dry run: key events will be logged, not sent");
        Box::new(DryRunEmitter)
    } else {
        Box::new(
            HidGadget::open(&cli.hidg)
                .with_context(|| format!("opening {}", cli.hidg.display()))?,
        )
    };

    // The clock starts before the startup delay, so by the first pass every
    // cell's boot-time debounce window has already expired.
    let clock = MonotonicClock::new();
    let mut scanner = Scanner::new(pins, gate, Debouncer::new(cli.debounce_ms * 1_000_000));

    log::info!(
        "scanning 8x8 matrix on {} (debounce {} ms)",
        cli.chip,
        cli.debounce_ms
    );

    // Give the host a moment to enumerate the gadget before reports go out.
    thread::sleep(Duration::from_secs(cli.startup_delay));

    scanner
        .run(&clock, emitter.as_mut())
        .context("matrix scan loop")?;
    Ok(())
}
