//! Shared keymap data for the C64-to-USB keyboard bridge.
//!
//! This crate is `no_std`-compatible: pure data and lookup, no I/O, so it
//! can be used by both the bridge daemon and the native CLI tool.

#![cfg_attr(not(test), no_std)]

/// Number of row lines in the C64 matrix.
pub const ROWS: usize = 8;
/// Number of column lines in the C64 matrix.
pub const COLS: usize = 8;

/// USB HID keycodes.
/// See USB HID Usage Tables, Section 10 (Keyboard/Keypad Page 0x07).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Keycode {
    // Letters
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,

    // Numbers
    N1 = 0x1E,
    N2 = 0x1F,
    N3 = 0x20,
    N4 = 0x21,
    N5 = 0x22,
    N6 = 0x23,
    N7 = 0x24,
    N8 = 0x25,
    N9 = 0x26,
    N0 = 0x27,

    // Control keys
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Space = 0x2C,
    Minus = 0x2D,
    LBracket = 0x2F,
    /// Non-US # and ~ — stands in for the C64 £ key
    NonUsHash = 0x32,
    Semicolon = 0x33,
    Grave = 0x35,
    Comma = 0x36,
    Dot = 0x37,
    Slash = 0x38,

    // Function keys
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,

    // Navigation
    Home = 0x4A,
    PageUp = 0x4B,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,

    // Keypad
    KpAsterisk = 0x55,
    KpPlus = 0x57,
    KpEquals = 0x67,

    // Modifiers (sent in the report's modifier byte, not the keycode array)
    LCtrl = 0xE0,
    LShift = 0xE1,
    LAlt = 0xE2,
    LGui = 0xE3,
    RCtrl = 0xE4,
    RShift = 0xE5,
    RAlt = 0xE6,
    RGui = 0xE7,
}

impl Keycode {
    /// Check if this keycode is a modifier (LCtrl..RGui).
    pub fn is_modifier(self) -> bool {
        let v = self as u8;
        (0xE0..=0xE7).contains(&v)
    }

    /// Get the modifier bit mask (bit 0 = LCtrl, bit 7 = RGui).
    pub fn modifier_bit(self) -> u8 {
        if self.is_modifier() {
            1 << (self as u8 - 0xE0)
        } else {
            0
        }
    }

    /// Display name for use in layout visualizations.
    pub fn display_name(self) -> &'static str {
        match self {
            Keycode::A => "A",
            Keycode::B => "B",
            Keycode::C => "C",
            Keycode::D => "D",
            Keycode::E => "E",
            Keycode::F => "F",
            Keycode::G => "G",
            Keycode::H => "H",
            Keycode::I => "I",
            Keycode::J => "J",
            Keycode::K => "K",
            Keycode::L => "L",
            Keycode::M => "M",
            Keycode::N => "N",
            Keycode::O => "O",
            Keycode::P => "P",
            Keycode::Q => "Q",
            Keycode::R => "R",
            Keycode::S => "S",
            Keycode::T => "T",
            Keycode::U => "U",
            Keycode::V => "V",
            Keycode::W => "W",
            Keycode::X => "X",
            Keycode::Y => "Y",
            Keycode::Z => "Z",
            Keycode::N1 => "1",
            Keycode::N2 => "2",
            Keycode::N3 => "3",
            Keycode::N4 => "4",
            Keycode::N5 => "5",
            Keycode::N6 => "6",
            Keycode::N7 => "7",
            Keycode::N8 => "8",
            Keycode::N9 => "9",
            Keycode::N0 => "0",
            Keycode::Enter => "Ret",
            Keycode::Escape => "Stop",
            Keycode::Backspace => "Del",
            Keycode::Space => "Spc",
            Keycode::Minus => "-",
            Keycode::LBracket => ":",
            Keycode::NonUsHash => "\u{a3}",
            Keycode::Semicolon => ";",
            Keycode::Grave => "@",
            Keycode::Comma => ",",
            Keycode::Dot => ".",
            Keycode::Slash => "/",
            Keycode::F1 => "F1",
            Keycode::F2 => "F2",
            Keycode::F3 => "F3",
            Keycode::F4 => "F4",
            Keycode::F5 => "F5",
            Keycode::F6 => "F6",
            Keycode::F7 => "F7",
            Keycode::F8 => "F8",
            Keycode::Home => "Home",
            Keycode::PageUp => "\u{2191}",
            Keycode::Right => "\u{2192}",
            Keycode::Left => "\u{2190}",
            Keycode::Down => "\u{2193}",
            Keycode::Up => "\u{2191}",
            Keycode::KpAsterisk => "*",
            Keycode::KpPlus => "+",
            Keycode::KpEquals => "=",
            Keycode::LCtrl => "Ctrl",
            Keycode::LShift => "Shft",
            Keycode::LAlt => "Alt",
            Keycode::LGui => "C=",
            Keycode::RCtrl => "RCtl",
            Keycode::RShift => "RSft",
            Keycode::RAlt => "RAlt",
            Keycode::RGui => "RGui",
        }
    }
}

/// What one matrix position emits: a primary code, plus an optional
/// alternate code used while the restore modifier is held.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct KeyBinding {
    pub primary: Keycode,
    pub alternate: Option<Keycode>,
}

/// A position with no restore behavior.
const fn plain(primary: Keycode) -> KeyBinding {
    KeyBinding {
        primary,
        alternate: None,
    }
}

/// A position remapped to `alternate` while restore is held.
const fn restore(primary: Keycode, alternate: Keycode) -> KeyBinding {
    KeyBinding {
        primary,
        alternate: Some(alternate),
    }
}

/// The C64 matrix binding table, indexed `[row][column]`.
///
/// Primary codes follow the stock C64 keyboard wiring. The matrix has no
/// dedicated up/left cursor keys and only odd-numbered function keys, so
/// restore remaps each cursor key to its opposite direction and each
/// function key to its shifted pair.
pub static BINDINGS: [[KeyBinding; COLS]; ROWS] = [
    // Row 0: InstDel, Return, cursor right, F7, F1, F3, F5, cursor down
    [
        plain(Keycode::Backspace),
        plain(Keycode::Enter),
        restore(Keycode::Right, Keycode::Left),
        restore(Keycode::F7, Keycode::F8),
        restore(Keycode::F1, Keycode::F2),
        restore(Keycode::F3, Keycode::F4),
        restore(Keycode::F5, Keycode::F6),
        restore(Keycode::Down, Keycode::Up),
    ],
    // Row 1: 3, W, A, 4, Z, S, E, left shift
    [
        plain(Keycode::N3),
        plain(Keycode::W),
        plain(Keycode::A),
        plain(Keycode::N4),
        plain(Keycode::Z),
        plain(Keycode::S),
        plain(Keycode::E),
        plain(Keycode::LShift),
    ],
    // Row 2: 5, R, D, 6, C, F, T, X
    [
        plain(Keycode::N5),
        plain(Keycode::R),
        plain(Keycode::D),
        plain(Keycode::N6),
        plain(Keycode::C),
        plain(Keycode::F),
        plain(Keycode::T),
        plain(Keycode::X),
    ],
    // Row 3: 7, Y, G, 8, B, H, U, V
    [
        plain(Keycode::N7),
        plain(Keycode::Y),
        plain(Keycode::G),
        plain(Keycode::N8),
        plain(Keycode::B),
        plain(Keycode::H),
        plain(Keycode::U),
        plain(Keycode::V),
    ],
    // Row 4: 9, I, J, 0, M, K, O, N
    [
        plain(Keycode::N9),
        plain(Keycode::I),
        plain(Keycode::J),
        plain(Keycode::N0),
        plain(Keycode::M),
        plain(Keycode::K),
        plain(Keycode::O),
        plain(Keycode::N),
    ],
    // Row 5: +, P, L, -, ., : (colon/[), @, ,
    [
        plain(Keycode::KpPlus),
        plain(Keycode::P),
        plain(Keycode::L),
        plain(Keycode::Minus),
        plain(Keycode::Dot),
        plain(Keycode::LBracket),
        plain(Keycode::Grave),
        plain(Keycode::Comma),
    ],
    // Row 6: £, *, ; (semicolon/]), ClrHome, right shift, =, up-arrow glyph, /
    [
        plain(Keycode::NonUsHash),
        plain(Keycode::KpAsterisk),
        plain(Keycode::Semicolon),
        plain(Keycode::Home),
        plain(Keycode::RShift),
        plain(Keycode::KpEquals),
        plain(Keycode::PageUp),
        plain(Keycode::Slash),
    ],
    // Row 7: 1, RunStop, Ctrl, 2, Space, C= (Commodore), Q, Alt
    [
        plain(Keycode::N1),
        plain(Keycode::Escape),
        plain(Keycode::LCtrl),
        plain(Keycode::N2),
        plain(Keycode::Space),
        plain(Keycode::LGui),
        plain(Keycode::Q),
        plain(Keycode::LAlt),
    ],
];

/// Look up the binding for a matrix position.
pub fn binding_for(row: usize, col: usize) -> KeyBinding {
    BINDINGS[row][col]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_keys_remap_to_opposite_direction() {
        assert_eq!(binding_for(0, 2), restore(Keycode::Right, Keycode::Left));
        assert_eq!(binding_for(0, 7), restore(Keycode::Down, Keycode::Up));
    }

    #[test]
    fn test_function_keys_remap_to_shifted_pair() {
        assert_eq!(binding_for(0, 4).alternate, Some(Keycode::F2));
        assert_eq!(binding_for(0, 5).alternate, Some(Keycode::F4));
        assert_eq!(binding_for(0, 6).alternate, Some(Keycode::F6));
        assert_eq!(binding_for(0, 3).alternate, Some(Keycode::F8));
    }

    #[test]
    fn test_only_row_zero_carries_alternates() {
        for row in 1..ROWS {
            for col in 0..COLS {
                assert_eq!(binding_for(row, col).alternate, None);
            }
        }
    }

    #[test]
    fn test_modifier_bits() {
        assert_eq!(Keycode::LCtrl.modifier_bit(), 0x01);
        assert_eq!(Keycode::LShift.modifier_bit(), 0x02);
        assert_eq!(Keycode::RShift.modifier_bit(), 0x20);
        assert_eq!(Keycode::A.modifier_bit(), 0x00);
        assert!(!Keycode::A.is_modifier());
        assert!(Keycode::LGui.is_modifier());
    }
}
