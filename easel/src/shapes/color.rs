use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::rgb(r, g, b)
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", rgb(0, 0, 0)),
    ("white", rgb(255, 255, 255)),
    ("red", rgb(255, 0, 0)),
    ("lime", rgb(0, 255, 0)),
    ("green", rgb(0, 128, 0)),
    ("blue", rgb(0, 0, 255)),
    ("yellow", rgb(255, 255, 0)),
    ("cyan", rgb(0, 255, 255)),
    ("magenta", rgb(255, 0, 255)),
    ("orange", rgb(255, 165, 0)),
    ("darkorange", rgb(255, 140, 0)),
    ("purple", rgb(128, 0, 128)),
    ("pink", rgb(255, 192, 203)),
    ("brown", rgb(165, 42, 42)),
    ("gray", rgb(128, 128, 128)),
    ("grey", rgb(128, 128, 128)),
    ("silver", rgb(192, 192, 192)),
    ("gold", rgb(255, 215, 0)),
    ("navy", rgb(0, 0, 128)),
    ("teal", rgb(0, 128, 128)),
    ("maroon", rgb(128, 0, 0)),
    ("olive", rgb(128, 128, 0)),
    ("skyblue", rgb(135, 206, 235)),
    ("lightblue", rgb(173, 216, 230)),
    ("lightgreen", rgb(144, 238, 144)),
    ("lightgray", rgb(211, 211, 211)),
    ("darkgray", rgb(169, 169, 169)),
    ("darkblue", rgb(0, 0, 139)),
    ("darkgreen", rgb(0, 100, 0)),
    ("seagreen", rgb(46, 139, 87)),
    ("royalblue", rgb(65, 105, 225)),
    ("crimson", rgb(220, 20, 60)),
    ("salmon", rgb(250, 128, 114)),
    ("violet", rgb(238, 130, 238)),
    ("indigo", rgb(75, 0, 130)),
    ("beige", rgb(245, 245, 220)),
    ("tan", rgb(210, 180, 140)),
];

impl Color {
    pub const BLACK: Self = rgb(0, 0, 0);
    pub const WHITE: Self = rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Looks up a named color, ignoring case (`"lightBlue"` works).
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, color)| *color)
    }

    /// Scales alpha by an opacity in the 0..=100 range.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let scale = (opacity / 100.0).clamp(0.0, 1.0);
        Self {
            a: (self.a as f64 * scale).round() as u8,
            ..self
        }
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) =
            NAMED_COLORS.iter().find(|(_, color)| color == self)
        {
            return write!(f, "{}", name);
        }
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
