//! Key matrix scanning for the C64 keyboard.
//!
//! The keyboard is an 8×8 switch matrix: 8 column lines driven low one at a
//! time, 8 pulled-up row lines sampled while a column is active. A row
//! reading low means the key at (row, active column) is closed. The restore
//! key has its own line outside the matrix and acts as a modifier for the
//! whole pass.

use std::io;
use std::time::Instant;

use c64_keymap::{COLS, ROWS};

use crate::debounce::Debouncer;
use crate::hid::KeyEmitter;

/// Physical matrix lines: 8 idle-high column outputs and 8 pulled-up row
/// inputs.
pub trait MatrixPins {
    /// Drive column `col` low (active) or back high (inactive).
    fn set_column(&mut self, col: usize, active: bool) -> io::Result<()>;

    /// Sample all row lines. Returns electrical levels, true = high (idle).
    fn read_rows(&mut self) -> io::Result<[bool; ROWS]>;
}

/// The dedicated restore line, wired outside the matrix. No debounce of its
/// own: its only effect is selecting which code a separately debounced key
/// press emits.
pub trait RestoreGate {
    /// True while the restore line reads low.
    fn is_active(&mut self) -> io::Result<bool>;
}

/// Monotonic tick source for the scan loop.
pub trait Clock {
    /// Nanoseconds since a fixed origin. Integer ticks, so precision does
    /// not degrade as uptime grows.
    fn now_ns(&self) -> u64;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Drives the whole pipeline: owns the pins, the restore gate and the 64
/// debounce cells, and pushes verified transitions into the emitter.
pub struct Scanner<P, G> {
    pins: P,
    gate: G,
    debouncer: Debouncer,
}

impl<P: MatrixPins, G: RestoreGate> Scanner<P, G> {
    pub fn new(pins: P, gate: G, debouncer: Debouncer) -> Self {
        Self {
            pins,
            gate,
            debouncer,
        }
    }

    /// One full scan pass at timestamp `now`.
    ///
    /// The restore state is read once and held fixed for the pass. Columns
    /// are activated strictly one at a time in ascending order, rows sampled
    /// in ascending order within each column, so no two columns are ever
    /// active simultaneously and tie-breaks between same-pass transitions
    /// are deterministic.
    pub fn scan_pass<E: KeyEmitter + ?Sized>(
        &mut self,
        now: u64,
        emitter: &mut E,
    ) -> io::Result<()> {
        let restore_active = self.gate.is_active()?;

        for col in 0..COLS {
            self.pins.set_column(col, true)?;
            let levels = self.pins.read_rows()?;
            for row in 0..ROWS {
                // Row pulled low while its column is driven means pressed.
                self.debouncer
                    .feed(row, col, !levels[row], now, restore_active, emitter);
            }
            self.pins.set_column(col, false)?;
        }

        Ok(())
    }

    /// Run scan passes until the process dies. The loop never sleeps; pass
    /// rate is bounded by GPIO and HID latency.
    pub fn run<E: KeyEmitter + ?Sized>(
        &mut self,
        clock: &impl Clock,
        emitter: &mut E,
    ) -> io::Result<()> {
        loop {
            let now = clock.now_ns();
            self.scan_pass(now, emitter)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c64_keymap::Keycode;

    const T0: u64 = 1_000_000_000;
    const INTERVAL: u64 = 50_000_000;

    /// Fake matrix wiring: a map of closed switches plus a full history of
    /// column line changes.
    struct FakePins {
        closed: [[bool; COLS]; ROWS],
        active_col: Option<usize>,
        /// (col, active) in the order the scanner drove them.
        history: Vec<(usize, bool)>,
        overlapped: bool,
    }

    impl FakePins {
        fn new() -> Self {
            Self {
                closed: [[false; COLS]; ROWS],
                active_col: None,
                history: Vec::new(),
                overlapped: false,
            }
        }
    }

    impl MatrixPins for FakePins {
        fn set_column(&mut self, col: usize, active: bool) -> io::Result<()> {
            self.history.push((col, active));
            if active {
                if self.active_col.is_some() {
                    self.overlapped = true;
                }
                self.active_col = Some(col);
            } else if self.active_col == Some(col) {
                self.active_col = None;
            }
            Ok(())
        }

        fn read_rows(&mut self) -> io::Result<[bool; ROWS]> {
            let mut levels = [true; ROWS];
            if let Some(col) = self.active_col {
                for row in 0..ROWS {
                    if self.closed[row][col] {
                        levels[row] = false;
                    }
                }
            }
            Ok(levels)
        }
    }

    struct FakeGate {
        active: bool,
    }

    impl RestoreGate for FakeGate {
        fn is_active(&mut self) -> io::Result<bool> {
            Ok(self.active)
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<(bool, Keycode)>,
    }

    impl KeyEmitter for Recorder {
        fn press(&mut self, code: Keycode) {
            self.events.push((true, code));
        }

        fn release(&mut self, code: Keycode) {
            self.events.push((false, code));
        }
    }

    #[test]
    fn test_only_one_column_active_at_a_time() {
        let mut scanner = Scanner::new(FakePins::new(), FakeGate { active: false },
            Debouncer::new(INTERVAL));
        let mut rec = Recorder::default();

        scanner.scan_pass(T0, &mut rec).unwrap();

        assert!(!scanner.pins.overlapped);
        // Each column toggled active then inactive, in ascending order.
        let expected: Vec<(usize, bool)> = (0..COLS)
            .flat_map(|c| [(c, true), (c, false)])
            .collect();
        assert_eq!(scanner.pins.history, expected);
    }

    #[test]
    fn test_closed_switch_emits_press_then_release() {
        let mut pins = FakePins::new();
        pins.closed[0][2] = true; // cursor right
        let mut scanner =
            Scanner::new(pins, FakeGate { active: false }, Debouncer::new(INTERVAL));
        let mut rec = Recorder::default();

        scanner.scan_pass(T0, &mut rec).unwrap();
        assert_eq!(rec.events, vec![(true, Keycode::Right)]);

        // Key still held: later passes emit nothing new.
        scanner.scan_pass(T0 + 2 * INTERVAL, &mut rec).unwrap();
        assert_eq!(rec.events.len(), 1);

        scanner.pins.closed[0][2] = false;
        scanner.scan_pass(T0 + 4 * INTERVAL, &mut rec).unwrap();
        assert_eq!(
            rec.events,
            vec![(true, Keycode::Right), (false, Keycode::Right)]
        );
    }

    #[test]
    fn test_restore_state_is_latched_per_press() {
        let mut pins = FakePins::new();
        pins.closed[0][2] = true;
        let mut scanner =
            Scanner::new(pins, FakeGate { active: true }, Debouncer::new(INTERVAL));
        let mut rec = Recorder::default();

        scanner.scan_pass(T0, &mut rec).unwrap();

        // Restore released while the key is still held.
        scanner.gate.active = false;
        scanner.pins.closed[0][2] = false;
        scanner.scan_pass(T0 + 2 * INTERVAL, &mut rec).unwrap();

        assert_eq!(
            rec.events,
            vec![(true, Keycode::Left), (false, Keycode::Left)]
        );
    }

    #[test]
    fn test_pass_order_breaks_same_pass_ties() {
        let mut pins = FakePins::new();
        pins.closed[3][1] = true; // Y
        pins.closed[1][0] = true; // 3
        let mut scanner =
            Scanner::new(pins, FakeGate { active: false }, Debouncer::new(INTERVAL));
        let mut rec = Recorder::default();

        scanner.scan_pass(T0, &mut rec).unwrap();

        // Column 0 is scanned before column 1.
        assert_eq!(rec.events, vec![(true, Keycode::N3), (true, Keycode::Y)]);
    }

    #[test]
    fn test_keys_in_same_row_do_not_cross_couple() {
        // A switch closed in column 5 must not read as pressed while
        // column 2 is the active one.
        let mut pins = FakePins::new();
        pins.closed[4][5] = true; // K
        let mut scanner =
            Scanner::new(pins, FakeGate { active: false }, Debouncer::new(INTERVAL));
        let mut rec = Recorder::default();

        scanner.scan_pass(T0, &mut rec).unwrap();

        assert_eq!(rec.events, vec![(true, Keycode::K)]);
    }
}
