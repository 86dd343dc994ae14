use std::fmt;

/// The named CTA 'L' line colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineColor {
    Red,
    Blue,
    Brown,
    Green,
    Orange,
    Pink,
    Purple,
    PurpleExpress,
    Yellow,
}

impl LineColor {
    pub const ALL: [LineColor; 9] = [
        LineColor::Red,
        LineColor::Blue,
        LineColor::Brown,
        LineColor::Green,
        LineColor::Orange,
        LineColor::Pink,
        LineColor::Purple,
        LineColor::PurpleExpress,
        LineColor::Yellow,
    ];

    /// Name as stored in the `Lines.Color` column
    pub fn as_str(&self) -> &'static str {
        match self {
            LineColor::Red => "Red",
            LineColor::Blue => "Blue",
            LineColor::Brown => "Brown",
            LineColor::Green => "Green",
            LineColor::Orange => "Orange",
            LineColor::Pink => "Pink",
            LineColor::Purple => "Purple",
            LineColor::PurpleExpress => "Purple-Express",
            LineColor::Yellow => "Yellow",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let normalized = normalize_color(name);
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
    }

    /// Express variants draw in their base line's color
    pub fn display_color(&self) -> LineColor {
        match self {
            LineColor::PurpleExpress => LineColor::Purple,
            other => *other,
        }
    }

    /// Chart RGB for the line's display color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self.display_color() {
            LineColor::Red => (198, 12, 48),
            LineColor::Blue => (0, 161, 222),
            LineColor::Brown => (98, 54, 27),
            LineColor::Green => (0, 155, 58),
            LineColor::Orange => (249, 70, 28),
            LineColor::Pink => (226, 126, 166),
            LineColor::Purple | LineColor::PurpleExpress => (82, 35, 152),
            LineColor::Yellow => (249, 227, 0),
        }
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize free-text color input: trim, lowercase, then capitalize every
/// hyphen-separated segment (`" purple-express"` -> `"Purple-Express"`)
pub fn normalize_color(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
