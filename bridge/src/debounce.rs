//! Per-key debounce logic.
//!
//! Each matrix cell carries a tiny state machine: whether the key is
//! currently down, when its last accepted transition happened, and which
//! code was emitted for it. After any accepted transition the cell ignores
//! further samples for a fixed interval, which suppresses contact bounce in
//! both directions.

use c64_keymap::{binding_for, Keycode, COLS, ROWS};

use crate::hid::KeyEmitter;

/// Default time a cell stays deaf after an accepted transition, in
/// milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// State for one matrix cell.
#[derive(Copy, Clone)]
struct KeyCell {
    down: bool,
    /// Code emitted at press time. Release must send the same code even if
    /// the restore modifier changed in between, or the host's key state
    /// would desynchronize.
    sent: Option<Keycode>,
    /// Timestamp of the last accepted transition, in clock ticks.
    last_transition: u64,
}

impl KeyCell {
    const fn new() -> Self {
        Self {
            down: false,
            sent: None,
            last_transition: 0,
        }
    }
}

pub struct Debouncer {
    cells: [[KeyCell; COLS]; ROWS],
    /// Debounce interval in the same tick units as the scan timestamps.
    interval: u64,
}

impl Debouncer {
    pub const fn new(interval_ticks: u64) -> Self {
        Self {
            cells: [[KeyCell::new(); COLS]; ROWS],
            interval: interval_ticks,
        }
    }

    /// Feed one raw sample for cell (`row`, `col`).
    ///
    /// `pressed` is the electrical verdict for this pass, `now` the pass
    /// timestamp, and `restore_active` the modifier state sampled once at
    /// the start of the pass. Accepted presses emit the alternate code when
    /// the cell has one and restore is held, otherwise the primary code;
    /// accepted releases emit whichever code the press sent.
    pub fn feed<E: KeyEmitter + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        pressed: bool,
        now: u64,
        restore_active: bool,
        emitter: &mut E,
    ) {
        let cell = &mut self.cells[row][col];

        // Still inside the deaf window after the last accepted transition.
        if now - cell.last_transition < self.interval {
            return;
        }

        // Same-state sample: nothing to do.
        if cell.down == pressed {
            return;
        }

        if pressed {
            let binding = binding_for(row, col);
            let code = match binding.alternate {
                Some(alt) if restore_active => alt,
                _ => binding.primary,
            };
            emitter.press(code);
            cell.down = true;
            cell.sent = Some(code);
            cell.last_transition = now;
            log::debug!("pressed ({}, {}) -> {:?} at {}", row, col, code, now);
        } else {
            cell.down = false;
            cell.last_transition = now;
            if let Some(code) = cell.sent.take() {
                emitter.release(code);
                log::debug!("released ({}, {}) -> {:?} at {}", row, col, code, now);
            }
        }
    }
}
