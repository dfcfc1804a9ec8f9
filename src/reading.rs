use std::fmt;
use std::sync::LazyLock;

use iced::Color;
use regex::Regex;

static READING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"R:\s*(\d+).*?G:\s*(\d+).*?B:\s*(\d+)").expect("reading pattern is valid")
});

/// One color sample as printed by the sensor board.
///
/// The firmware sends 16-bit values, but only lines whose components fit a
/// `#rrggbb` code are readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Reading {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses the first `R:<int> ... G:<int> ... B:<int>` run in `line`.
    ///
    /// Returns `None` when the line does not have that shape or a component
    /// is above 255.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = READING_PATTERN.captures(line)?;
        let component = |idx| caps.get(idx)?.as_str().parse::<u8>().ok();

        Some(Self::new(component(1)?, component(2)?, component(3)?))
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    pub fn label(&self) -> String {
        format!(
            "RGB: {}, {}, {}\nHEX: {}",
            self.red,
            self.green,
            self.blue,
            self.hex()
        )
    }

    pub fn fill(&self) -> Color {
        Color::from_rgb8(self.red, self.green, self.blue)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}
