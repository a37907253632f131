use serde::{Deserialize, Serialize};
use std::fmt;

/// A `#RGB`, `#RRGGBB` or `#RRGGBBAA` color that keeps the caller's spelling.
///
/// The string as given is what flows into render trees; the parsed channels are only used
/// to derive translucent tints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexColor {
    raw: String,
    rgba: [u8; 4],
}

impl HexColor {
    /// Parse a hex color, keeping `s` verbatim.
    pub fn parse(s: &str) -> Result<Self, String> {
        let rgba = parse_hex(s)?;
        Ok(Self {
            raw: s.to_owned(),
            rgba,
        })
    }

    /// Opaque color spelled `#RRGGBB`.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            raw: format!("#{r:02X}{g:02X}{b:02X}"),
            rgba: [r, g, b, 255],
        }
    }

    /// The color exactly as provided.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Straight (non-premultiplied) channels.
    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }

    /// Same color with its alpha scaled by `alpha / 255`, as `#RRGGBBAA`.
    pub fn tint(&self, alpha: u8) -> String {
        let [r, g, b, a] = self.rgba;
        let a = ((u16::from(a) * u16::from(alpha) + 127) / 255) as u8;
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn parse_hex(s: &str) -> Result<[u8; 4], String> {
    let Some(hex) = s.strip_prefix('#') else {
        return Err(format!("color \"{s}\" must start with '#'"));
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("color \"{s}\" contains non-hex digits"));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match hex.len() {
        3 => {
            let mut out = [0u8, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let v = hex_byte(&c.to_string())?;
                out[i] = v * 17;
            }
            Ok(out)
        }
        6 => Ok([
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            255,
        ]),
        8 => Ok([
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        ]),
        _ => Err(format!(
            "color \"{s}\" must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)"
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/color.rs"]
mod tests;
