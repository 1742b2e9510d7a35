//! USB HID keyboard usage IDs and their canonical names.
//!
//! [`Keycode`] covers the keyboard/keypad usage page entries a boot keyboard
//! can send. Every variant has one canonical uppercase identifier (`A`, `F5`,
//! `LEFT_ARROW`, `KEYPAD_ONE`, ...) and a handful of keys also answer to a
//! canonical synonym (`CONTROL`, `GUI`, `RETURN`, ...). Script-level aliases
//! such as `CTRL` or `DOWNARROW` live in [`crate::keys`], not here.

macro_rules! keycodes {
    ($($variant:ident = $usage:literal => $name:literal,)+) => {
        /// A USB HID keyboard usage ID.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Keycode {
            $($variant = $usage,)+
        }

        impl Keycode {
            /// Every key code, in usage order.
            pub const ALL: &'static [Keycode] = &[$(Keycode::$variant,)+];

            /// The canonical identifier of this key.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Keycode::$variant => $name,)+
                }
            }
        }
    };
}

keycodes! {
    A = 0x04 => "A",
    B = 0x05 => "B",
    C = 0x06 => "C",
    D = 0x07 => "D",
    E = 0x08 => "E",
    F = 0x09 => "F",
    G = 0x0A => "G",
    H = 0x0B => "H",
    I = 0x0C => "I",
    J = 0x0D => "J",
    K = 0x0E => "K",
    L = 0x0F => "L",
    M = 0x10 => "M",
    N = 0x11 => "N",
    O = 0x12 => "O",
    P = 0x13 => "P",
    Q = 0x14 => "Q",
    R = 0x15 => "R",
    S = 0x16 => "S",
    T = 0x17 => "T",
    U = 0x18 => "U",
    V = 0x19 => "V",
    W = 0x1A => "W",
    X = 0x1B => "X",
    Y = 0x1C => "Y",
    Z = 0x1D => "Z",
    One = 0x1E => "ONE",
    Two = 0x1F => "TWO",
    Three = 0x20 => "THREE",
    Four = 0x21 => "FOUR",
    Five = 0x22 => "FIVE",
    Six = 0x23 => "SIX",
    Seven = 0x24 => "SEVEN",
    Eight = 0x25 => "EIGHT",
    Nine = 0x26 => "NINE",
    Zero = 0x27 => "ZERO",
    Enter = 0x28 => "ENTER",
    Escape = 0x29 => "ESCAPE",
    Backspace = 0x2A => "BACKSPACE",
    Tab = 0x2B => "TAB",
    Spacebar = 0x2C => "SPACEBAR",
    Minus = 0x2D => "MINUS",
    Equals = 0x2E => "EQUALS",
    LeftBracket = 0x2F => "LEFT_BRACKET",
    RightBracket = 0x30 => "RIGHT_BRACKET",
    Backslash = 0x31 => "BACKSLASH",
    Pound = 0x32 => "POUND",
    Semicolon = 0x33 => "SEMICOLON",
    Quote = 0x34 => "QUOTE",
    GraveAccent = 0x35 => "GRAVE_ACCENT",
    Comma = 0x36 => "COMMA",
    Period = 0x37 => "PERIOD",
    ForwardSlash = 0x38 => "FORWARD_SLASH",
    CapsLock = 0x39 => "CAPS_LOCK",
    F1 = 0x3A => "F1",
    F2 = 0x3B => "F2",
    F3 = 0x3C => "F3",
    F4 = 0x3D => "F4",
    F5 = 0x3E => "F5",
    F6 = 0x3F => "F6",
    F7 = 0x40 => "F7",
    F8 = 0x41 => "F8",
    F9 = 0x42 => "F9",
    F10 = 0x43 => "F10",
    F11 = 0x44 => "F11",
    F12 = 0x45 => "F12",
    PrintScreen = 0x46 => "PRINT_SCREEN",
    ScrollLock = 0x47 => "SCROLL_LOCK",
    Pause = 0x48 => "PAUSE",
    Insert = 0x49 => "INSERT",
    Home = 0x4A => "HOME",
    PageUp = 0x4B => "PAGE_UP",
    Delete = 0x4C => "DELETE",
    End = 0x4D => "END",
    PageDown = 0x4E => "PAGE_DOWN",
    RightArrow = 0x4F => "RIGHT_ARROW",
    LeftArrow = 0x50 => "LEFT_ARROW",
    DownArrow = 0x51 => "DOWN_ARROW",
    UpArrow = 0x52 => "UP_ARROW",
    KeypadNumlock = 0x53 => "KEYPAD_NUMLOCK",
    KeypadForwardSlash = 0x54 => "KEYPAD_FORWARD_SLASH",
    KeypadAsterisk = 0x55 => "KEYPAD_ASTERISK",
    KeypadMinus = 0x56 => "KEYPAD_MINUS",
    KeypadPlus = 0x57 => "KEYPAD_PLUS",
    KeypadEnter = 0x58 => "KEYPAD_ENTER",
    KeypadOne = 0x59 => "KEYPAD_ONE",
    KeypadTwo = 0x5A => "KEYPAD_TWO",
    KeypadThree = 0x5B => "KEYPAD_THREE",
    KeypadFour = 0x5C => "KEYPAD_FOUR",
    KeypadFive = 0x5D => "KEYPAD_FIVE",
    KeypadSix = 0x5E => "KEYPAD_SIX",
    KeypadSeven = 0x5F => "KEYPAD_SEVEN",
    KeypadEight = 0x60 => "KEYPAD_EIGHT",
    KeypadNine = 0x61 => "KEYPAD_NINE",
    KeypadZero = 0x62 => "KEYPAD_ZERO",
    KeypadPeriod = 0x63 => "KEYPAD_PERIOD",
    KeypadBackslash = 0x64 => "KEYPAD_BACKSLASH",
    Application = 0x65 => "APPLICATION",
    Power = 0x66 => "POWER",
    KeypadEquals = 0x67 => "KEYPAD_EQUALS",
    F13 = 0x68 => "F13",
    F14 = 0x69 => "F14",
    F15 = 0x6A => "F15",
    F16 = 0x6B => "F16",
    F17 = 0x6C => "F17",
    F18 = 0x6D => "F18",
    F19 = 0x6E => "F19",
    F20 = 0x6F => "F20",
    F21 = 0x70 => "F21",
    F22 = 0x71 => "F22",
    F23 = 0x72 => "F23",
    F24 = 0x73 => "F24",
    LeftControl = 0xE0 => "LEFT_CONTROL",
    LeftShift = 0xE1 => "LEFT_SHIFT",
    LeftAlt = 0xE2 => "LEFT_ALT",
    LeftGui = 0xE3 => "LEFT_GUI",
    RightControl = 0xE4 => "RIGHT_CONTROL",
    RightShift = 0xE5 => "RIGHT_SHIFT",
    RightAlt = 0xE6 => "RIGHT_ALT",
    RightGui = 0xE7 => "RIGHT_GUI",
}

/// Canonical identifiers that name the same usage as another variant.
const SYNONYMS: &[(&str, Keycode)] = &[
    ("RETURN", Keycode::Enter),
    ("SPACE", Keycode::Spacebar),
    ("CONTROL", Keycode::LeftControl),
    ("SHIFT", Keycode::LeftShift),
    ("ALT", Keycode::LeftAlt),
    ("OPTION", Keycode::LeftAlt),
    ("GUI", Keycode::LeftGui),
    ("WINDOWS", Keycode::LeftGui),
    ("COMMAND", Keycode::LeftGui),
];

impl Keycode {
    /// Look up a key by its canonical identifier or canonical synonym.
    ///
    /// Matching is exact; callers uppercase script tokens first.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name() == name)
            .or_else(|| {
                SYNONYMS
                    .iter()
                    .find(|(synonym, _)| *synonym == name)
                    .map(|(_, key)| *key)
            })
    }

    /// The HID usage ID sent in keyboard reports.
    pub const fn usage(self) -> u8 {
        self as u8
    }

    pub const fn is_modifier(self) -> bool {
        self.usage() >= 0xE0
    }

    /// Bit in the report's modifier byte, or `None` for ordinary keys.
    pub const fn modifier_bit(self) -> Option<u8> {
        if self.is_modifier() {
            Some(1 << (self.usage() - 0xE0))
        } else {
            None
        }
    }
}
