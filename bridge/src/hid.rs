//! USB HID keyboard emission.
//!
//! The bridge runs on a board in USB gadget mode, so sending a key event
//! means rewriting an 8-byte boot-protocol report and writing it to the
//! gadget's HID device (usually `/dev/hidg0`). The scan pipeline only sees
//! the [`KeyEmitter`] trait: two fire-and-forget operations.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use c64_keymap::Keycode;

/// The two operations the scan pipeline needs from the HID side. Both are
/// fire-and-forget: a failed transmission is dropped, never retried.
pub trait KeyEmitter {
    fn press(&mut self, code: Keycode);
    fn release(&mut self, code: Keycode);
}

/// Standard USB HID boot-protocol keyboard report (8 bytes).
/// Byte 0: modifier keys bitmask
/// Byte 1: reserved (0x00)
/// Bytes 2-7: up to 6 simultaneous keycodes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub reserved: u8,
    pub keys: [u8; 6],
}

impl KeyboardReport {
    pub const fn empty() -> Self {
        Self {
            modifiers: 0,
            reserved: 0,
            keys: [0; 6],
        }
    }

    /// Add a key: modifiers set their bit, everything else takes a free
    /// slot. Past six held keys the press is silently dropped (no rollover
    /// error for simplicity).
    pub fn add(&mut self, code: Keycode) {
        if code.is_modifier() {
            self.modifiers |= code.modifier_bit();
            return;
        }
        let v = code as u8;
        if self.keys.contains(&v) {
            return;
        }
        if let Some(slot) = self.keys.iter_mut().find(|k| **k == 0) {
            *slot = v;
        }
    }

    /// Remove a key from the report.
    pub fn remove(&mut self, code: Keycode) {
        if code.is_modifier() {
            self.modifiers &= !code.modifier_bit();
            return;
        }
        let v = code as u8;
        for k in self.keys.iter_mut() {
            if *k == v {
                *k = 0;
            }
        }
    }

    /// Serialize for transmission.
    pub fn as_bytes(&self) -> [u8; 8] {
        [
            self.modifiers,
            self.reserved,
            self.keys[0],
            self.keys[1],
            self.keys[2],
            self.keys[3],
            self.keys[4],
            self.keys[5],
        ]
    }
}

/// Writes boot-protocol reports to a USB gadget HID device.
pub struct HidGadget {
    dev: File,
    report: KeyboardReport,
}

impl HidGadget {
    pub fn open(path: &Path) -> io::Result<Self> {
        let dev = OpenOptions::new().write(true).open(path)?;
        Ok(Self {
            dev,
            report: KeyboardReport::empty(),
        })
    }

    fn flush_report(&mut self) {
        // The write fails while the host has not enumerated the gadget yet;
        // the report is dropped and scanning continues.
        if let Err(err) = self.dev.write_all(&self.report.as_bytes()) {
            log::debug!("dropped HID report: {}", err);
        }
    }
}

impl KeyEmitter for HidGadget {
    fn press(&mut self, code: Keycode) {
        self.report.add(code);
        self.flush_report();
    }

    fn release(&mut self, code: Keycode) {
        self.report.remove(code);
        self.flush_report();
    }
}

/// Logs transitions instead of writing reports (`--dry-run`).
pub struct DryRunEmitter;

impl KeyEmitter for DryRunEmitter {
    fn press(&mut self, code: Keycode) {
        log::info!("press {:?} (0x{:02X})", code, code as u8);
    }

    fn release(&mut self, code: Keycode) {
        log::info!("release {:?} (0x{:02X})", code, code as u8);
    }
}
