//! gpiod-backed implementations of the matrix pin traits.
//!
//! Line offsets below are BCM numbers on the Pi header the keyboard harness
//! plugs into. Rows and restore are inputs with the internal pull-up, so
//! they idle high; columns are push-pull outputs that idle high and are
//! driven low one at a time by the scanner.

use std::io;

use gpiod::{Bias, Chip, Input, Lines, Options, Output};

use c64_keymap::{COLS, ROWS};

use crate::matrix::{MatrixPins, RestoreGate};

/// BCM line offsets of the row inputs, matrix rows 0-7.
pub const ROW_OFFSETS: [u32; ROWS] = [4, 17, 27, 22, 5, 6, 13, 19];
/// BCM line offsets of the column outputs, matrix columns 0-7.
pub const COL_OFFSETS: [u32; COLS] = [12, 16, 20, 21, 26, 23, 24, 25];
/// BCM line offset of the restore key input.
pub const RESTORE_OFFSET: u32 = 18;

/// The matrix lines, requested as one input bundle and one output bundle.
pub struct GpiodMatrix {
    rows: Lines<Input>,
    cols: Lines<Output>,
    /// Current column levels; the whole bundle is rewritten on every toggle.
    levels: [bool; COLS],
}

impl GpiodMatrix {
    pub fn open(chip: &Chip) -> io::Result<Self> {
        let rows = chip.request_lines(
            Options::input(ROW_OFFSETS)
                .consumer(env!("CARGO_PKG_NAME"))
                .bias(Bias::PullUp),
        )?;
        let levels = [true; COLS];
        let cols = chip.request_lines(
            Options::output(COL_OFFSETS)
                .consumer(env!("CARGO_PKG_NAME"))
                .values(levels),
        )?;
        Ok(Self { rows, cols, levels })
    }
}

impl MatrixPins for GpiodMatrix {
    fn set_column(&mut self, col: usize, active: bool) -> io::Result<()> {
        self.levels[col] = !active;
        self.cols.set_values(self.levels)
    }

    fn read_rows(&mut self) -> io::Result<[bool; ROWS]> {
        self.rows.get_values([false; ROWS])
    }
}

/// The restore key's dedicated line.
pub struct GpiodRestore {
    line: Lines<Input>,
}

impl GpiodRestore {
    pub fn open(chip: &Chip) -> io::Result<Self> {
        let line = chip.request_lines(
            Options::input([RESTORE_OFFSET])
                .consumer(env!("CARGO_PKG_NAME"))
                .bias(Bias::PullUp),
        )?;
        Ok(Self { line })
    }
}

impl RestoreGate for GpiodRestore {
    fn is_active(&mut self) -> io::Result<bool> {
        let values = self.line.get_values([false])?;
        Ok(!values[0])
    }
}
