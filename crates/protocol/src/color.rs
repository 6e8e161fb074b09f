use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("{0:?} is not a valid HTML color")]
    Invalid(String),
}

/// A color accepted by the frontend's line materials.
///
/// The original spelling is kept as given (the browser parses it again), but
/// construction only succeeds for the forms the frontend understands:
/// CSS named colors (case-insensitive), `#rgb`, `#rgba`, `#rrggbb`,
/// `#rrggbbaa`, and the `rgb()`, `rgba()`, `hsl()`, `hsla()` functions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Cow<'static, str>);

pub const BLACK: Color = Color(Cow::Borrowed("black"));
pub const RED: Color = Color(Cow::Borrowed("red"));
pub const GREEN: Color = Color(Cow::Borrowed("green"));
pub const BLUE: Color = Color(Cow::Borrowed("blue"));
/// Default color of minor gridlines.
pub const LIGHT_GRAY: Color = Color(Cow::Borrowed("#d9d9d9"));
/// Default color of major gridlines.
pub const MID_GRAY: Color = Color(Cow::Borrowed("#a6a6a6"));

impl Color {
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        if is_named(trimmed) || is_hex(trimmed) || is_functional(trimmed) {
            Ok(Self(Cow::Owned(trimmed.to_string())))
        } else {
            Err(ColorError::Invalid(input.to_string()))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0.into_owned()
    }
}

impl PartialEq<&str> for Color {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn is_named(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    NAMED_COLORS.binary_search(&lower.as_str()).is_ok()
}

fn is_hex(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_functional(s: &str) -> bool {
    let Some((name, rest)) = s.split_once('(') else {
        return false;
    };
    let Some(body) = rest.strip_suffix(')') else {
        return false;
    };
    let args: Vec<&str> = body.split(',').map(str::trim).collect();
    match (name.trim().to_ascii_lowercase().as_str(), args.as_slice()) {
        ("rgb", [r, g, b]) => [r, g, b].iter().all(|c| is_channel(c)),
        ("rgba", [r, g, b, a]) => [r, g, b].iter().all(|c| is_channel(c)) && is_alpha(a),
        ("hsl", [h, s, l]) => is_number(h) && is_percent(s) && is_percent(l),
        ("hsla", [h, s, l, a]) => is_number(h) && is_percent(s) && is_percent(l) && is_alpha(a),
        _ => false,
    }
}

/// An rgb channel: an integer, optionally a percentage.
fn is_channel(s: &str) -> bool {
    let digits = s.strip_suffix('%').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_percent(s: &str) -> bool {
    s.strip_suffix('%').is_some_and(is_number)
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_alpha(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(|a| (0.0..=1.0).contains(&a))
}

/// CSS named colors, sorted for binary search.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];
