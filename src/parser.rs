//! Line classifier for the DuckyScript dialect.
//!
//! [`classify`] decides which command a line is and slices out its argument;
//! [`parse_line`] additionally builds the boxed command through the registry.

use crate::command::DuckyCommand;
use crate::commands::{
    DefaultDelay, Delay, Import, KeyCombo, Led, Print, Rem, Repeat, Swipe, Tap, TypeString,
};
use crate::error::{Error, Result};
use std::time::Duration;

/// The command a script line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Rem,
    DefaultDelay,
    Delay,
    String,
    Print,
    Import,
    Repeat,
    Led,
    Swipe,
    Tap,
    KeyCombo,
}

/// A classified line: its kind and the raw argument substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub kind: CommandKind,
    pub args: &'a str,
}

/// Keywords in match priority order. `DEFAULT_DELAY` precedes `DELAY`.
static KEYWORDS: &[(&str, CommandKind)] = &[
    (DefaultDelay::NAME, CommandKind::DefaultDelay),
    (DefaultDelay::ALT_NAME, CommandKind::DefaultDelay),
    (Delay::NAME, CommandKind::Delay),
    (TypeString::NAME, CommandKind::String),
    (Print::NAME, CommandKind::Print),
    (Import::NAME, CommandKind::Import),
    (Repeat::NAME, CommandKind::Repeat),
    (Led::NAME, CommandKind::Led),
    (Swipe::NAME, CommandKind::Swipe),
    (Tap::NAME, CommandKind::Tap),
];

type ParseFn = fn(&str) -> Result<Box<dyn DuckyCommand>>;

impl CommandKind {
    fn parser(self) -> ParseFn {
        match self {
            Self::Rem => Rem::parse_boxed,
            Self::DefaultDelay => DefaultDelay::parse_boxed,
            Self::Delay => Delay::parse_boxed,
            Self::String => TypeString::parse_boxed,
            Self::Print => Print::parse_boxed,
            Self::Import => Import::parse_boxed,
            Self::Repeat => Repeat::parse_boxed,
            Self::Led => Led::parse_boxed,
            Self::Swipe => Swipe::parse_boxed,
            Self::Tap => Tap::parse_boxed,
            Self::KeyCombo => KeyCombo::parse_boxed,
        }
    }
}

/// Classify one line (trailing whitespace already removed).
///
/// Keywords are case-sensitive prefixes; the first match wins. The argument is
/// everything after the keyword and exactly one following character, so
/// `STRING  hi` keeps the second space. A line matching no keyword is a key
/// combination whose argument is the whole line.
pub fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() || line.starts_with(Rem::NAME) {
        return Line {
            kind: CommandKind::Rem,
            args: "",
        };
    }
    for (keyword, kind) in KEYWORDS {
        if let Some(rest) = line.strip_prefix(keyword) {
            return Line {
                kind: *kind,
                args: skip_delimiter(rest),
            };
        }
    }
    Line {
        kind: CommandKind::KeyCombo,
        args: line,
    }
}

/// Classify and parse a line into its command.
pub fn parse_line(line: &str) -> Result<Box<dyn DuckyCommand>> {
    parse_classified(classify(line))
}

pub(crate) fn parse_classified(line: Line<'_>) -> Result<Box<dyn DuckyCommand>> {
    (line.kind.parser())(line.args)
}

fn skip_delimiter(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

/// Parse a millisecond count that may be fractional: `100`, `2.5`.
pub(crate) fn parse_millis(command: &'static str, value: &str) -> Result<Duration> {
    let invalid = || Error::InvalidDelay {
        command,
        value: value.to_string(),
    };
    let ms: f64 = value.trim().parse().map_err(|_| invalid())?;
    let nanos = (ms * 1_000_000.0).round();
    if !nanos.is_finite() || nanos < 0.0 || nanos >= u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Parse whitespace-separated integer arguments for a gesture command.
///
/// Extra arguments are ignored.
pub(crate) fn parse_ints<const N: usize>(
    command: &'static str,
    usage: &'static str,
    args: &str,
) -> Result<[i32; N]> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < N {
        return Err(Error::MissingArguments { command, usage });
    }
    let mut values = [0; N];
    for (value, token) in values.iter_mut().zip(&tokens) {
        *value = token.parse().map_err(|_| Error::InvalidArgument {
            command,
            value: (*token).to_string(),
        })?;
    }
    Ok(values)
}
