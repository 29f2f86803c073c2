use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{CarnetError, CarnetResult};

/// Straight (non-premultiplied) RGBA8 color parsed from a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CssColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or a named color.
    pub fn parse(s: &str) -> CarnetResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CarnetError::validation("color must be non-empty"));
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let Some(args) = args.strip_suffix(')') else {
                return Err(CarnetError::validation(format!("unterminated color \"{s}\"")));
            };
            return parse_rgb_fn(args);
        }
        named(&lower).ok_or_else(|| CarnetError::validation(format!("unknown color \"{s}\"")))
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

fn parse_hex(s: &str) -> CarnetResult<CssColor> {
    fn nibble(c: u8) -> CarnetResult<u8> {
        (c as char)
            .to_digit(16)
            .map(|v| v as u8)
            .ok_or_else(|| CarnetError::validation(format!("invalid hex digit '{}'", c as char)))
    }

    let b = s.as_bytes();
    let byte = |i: usize| -> CarnetResult<u8> { Ok(nibble(b[i])? << 4 | nibble(b[i + 1])?) };
    let short = |i: usize| -> CarnetResult<u8> { Ok(nibble(b[i])? * 17) };

    match b.len() {
        3 => Ok(CssColor::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Ok(CssColor::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Ok(CssColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(CssColor::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => Err(CarnetError::validation(
            "hex color must be #rgb, #rgba, #rrggbb or #rrggbbaa",
        )),
    }
}

fn parse_rgb_fn(args: &str) -> CarnetResult<CssColor> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(CarnetError::validation(
            "rgb()/rgba() expects 3 channels and an optional alpha",
        ));
    }

    fn channel(p: &str) -> CarnetResult<u8> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            parse_f64(pct)? * 2.55
        } else {
            parse_f64(p)?
        };
        Ok(v.round().clamp(0.0, 255.0) as u8)
    }

    fn alpha(p: &str) -> CarnetResult<u8> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            parse_f64(pct)? / 100.0
        } else {
            parse_f64(p)?
        };
        Ok((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    fn parse_f64(p: &str) -> CarnetResult<f64> {
        p.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CarnetError::validation(format!("invalid color component \"{p}\"")))
    }

    let a = match parts.get(3) {
        Some(p) => alpha(p)?,
        None => 255,
    };
    Ok(CssColor::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

fn named(s: &str) -> Option<CssColor> {
    let c = match s {
        "transparent" => CssColor::rgba(0, 0, 0, 0),
        "black" => CssColor::rgb(0, 0, 0),
        "white" => CssColor::rgb(255, 255, 255),
        "red" => CssColor::rgb(255, 0, 0),
        "green" => CssColor::rgb(0, 128, 0),
        "lime" => CssColor::rgb(0, 255, 0),
        "blue" => CssColor::rgb(0, 0, 255),
        "yellow" => CssColor::rgb(255, 255, 0),
        "cyan" | "aqua" => CssColor::rgb(0, 255, 255),
        "magenta" | "fuchsia" => CssColor::rgb(255, 0, 255),
        "gray" | "grey" => CssColor::rgb(128, 128, 128),
        "silver" => CssColor::rgb(192, 192, 192),
        "maroon" => CssColor::rgb(128, 0, 0),
        "olive" => CssColor::rgb(128, 128, 0),
        "purple" => CssColor::rgb(128, 0, 128),
        "teal" => CssColor::rgb(0, 128, 128),
        "navy" => CssColor::rgb(0, 0, 128),
        "orange" => CssColor::rgb(255, 165, 0),
        "pink" => CssColor::rgb(255, 192, 203),
        "brown" => CssColor::rgb(165, 42, 42),
        "gold" => CssColor::rgb(255, 215, 0),
        "indigo" => CssColor::rgb(75, 0, 130),
        "violet" => CssColor::rgb(238, 130, 238),
        "crimson" => CssColor::rgb(220, 20, 60),
        "coral" => CssColor::rgb(255, 127, 80),
        "salmon" => CssColor::rgb(250, 128, 114),
        "tomato" => CssColor::rgb(255, 99, 71),
        "khaki" => CssColor::rgb(240, 230, 140),
        "beige" => CssColor::rgb(245, 245, 220),
        "ivory" => CssColor::rgb(255, 255, 240),
        "darkgray" | "darkgrey" => CssColor::rgb(169, 169, 169),
        "lightgray" | "lightgrey" => CssColor::rgb(211, 211, 211),
        "dimgray" | "dimgrey" => CssColor::rgb(105, 105, 105),
        "darkblue" => CssColor::rgb(0, 0, 139),
        "darkred" => CssColor::rgb(139, 0, 0),
        "darkgreen" => CssColor::rgb(0, 100, 0),
        "royalblue" => CssColor::rgb(65, 105, 225),
        "steelblue" => CssColor::rgb(70, 130, 180),
        "skyblue" => CssColor::rgb(135, 206, 235),
        "dodgerblue" => CssColor::rgb(30, 144, 255),
        "slategray" | "slategrey" => CssColor::rgb(112, 128, 144),
        "whitesmoke" => CssColor::rgb(245, 245, 245),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
