//! US keyboard layout: which key (and whether Shift) produces a character.

use crate::keycode::Keycode;

/// The key and shift state that type `ch` on a US layout, if any.
pub fn us_layout(ch: char) -> Option<(Keycode, bool)> {
    if ch.is_ascii_lowercase() {
        return letter(ch).map(|key| (key, false));
    }
    if ch.is_ascii_uppercase() {
        return letter(ch.to_ascii_lowercase()).map(|key| (key, true));
    }
    let entry = match ch {
        '1' => (Keycode::One, false),
        '2' => (Keycode::Two, false),
        '3' => (Keycode::Three, false),
        '4' => (Keycode::Four, false),
        '5' => (Keycode::Five, false),
        '6' => (Keycode::Six, false),
        '7' => (Keycode::Seven, false),
        '8' => (Keycode::Eight, false),
        '9' => (Keycode::Nine, false),
        '0' => (Keycode::Zero, false),
        '!' => (Keycode::One, true),
        '@' => (Keycode::Two, true),
        '#' => (Keycode::Three, true),
        '$' => (Keycode::Four, true),
        '%' => (Keycode::Five, true),
        '^' => (Keycode::Six, true),
        '&' => (Keycode::Seven, true),
        '*' => (Keycode::Eight, true),
        '(' => (Keycode::Nine, true),
        ')' => (Keycode::Zero, true),
        '\n' => (Keycode::Enter, false),
        '\t' => (Keycode::Tab, false),
        '\x08' => (Keycode::Backspace, false),
        '\x1b' => (Keycode::Escape, false),
        ' ' => (Keycode::Spacebar, false),
        '-' => (Keycode::Minus, false),
        '_' => (Keycode::Minus, true),
        '=' => (Keycode::Equals, false),
        '+' => (Keycode::Equals, true),
        '[' => (Keycode::LeftBracket, false),
        '{' => (Keycode::LeftBracket, true),
        ']' => (Keycode::RightBracket, false),
        '}' => (Keycode::RightBracket, true),
        '\\' => (Keycode::Backslash, false),
        '|' => (Keycode::Backslash, true),
        ';' => (Keycode::Semicolon, false),
        ':' => (Keycode::Semicolon, true),
        '\'' => (Keycode::Quote, false),
        '"' => (Keycode::Quote, true),
        '`' => (Keycode::GraveAccent, false),
        '~' => (Keycode::GraveAccent, true),
        ',' => (Keycode::Comma, false),
        '<' => (Keycode::Comma, true),
        '.' => (Keycode::Period, false),
        '>' => (Keycode::Period, true),
        '/' => (Keycode::ForwardSlash, false),
        '?' => (Keycode::ForwardSlash, true),
        _ => return None,
    };
    Some(entry)
}

fn letter(ch: char) -> Option<Keycode> {
    let offset = (ch as u8).checked_sub(b'a')? as usize;
    Keycode::ALL.get(offset).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(us_layout('a'), Some((Keycode::A, false)));
        assert_eq!(us_layout('z'), Some((Keycode::Z, false)));
        assert_eq!(us_layout('Q'), Some((Keycode::Q, true)));
    }

    #[test]
    fn test_digits_and_symbols() {
        assert_eq!(us_layout('0'), Some((Keycode::Zero, false)));
        assert_eq!(us_layout('!'), Some((Keycode::One, true)));
        assert_eq!(us_layout('?'), Some((Keycode::ForwardSlash, true)));
        assert_eq!(us_layout(' '), Some((Keycode::Spacebar, false)));
        assert_eq!(us_layout('\n'), Some((Keycode::Enter, false)));
    }

    #[test]
    fn test_untypeable() {
        assert_eq!(us_layout('é'), None);
        assert_eq!(us_layout('€'), None);
    }
}
