//! RGB colors and piecewise-linear HSL color scales.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 8-bit sRGB color, displayed as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub(crate) fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let delta = max - min;
        let saturation = if lightness < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let sector = if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        Hsl {
            hue: (sector * 60.0).rem_euclid(360.0),
            saturation,
            lightness,
        }
    }

    pub(crate) fn from_hsl(hsl: Hsl) -> Self {
        let Hsl {
            hue,
            saturation,
            lightness,
        } = hsl;

        if saturation <= 0.0 {
            let v = to_channel(lightness);
            return Self::rgb(v, v, v);
        }

        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;
        let h = hue.rem_euclid(360.0) / 360.0;

        Self::rgb(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{raw}'")))
    }
}

/// Hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Linear blend; hue travels the shorter way round the wheel.
    fn mix(self, other: Hsl, f: f64) -> Hsl {
        let mut dh = other.hue - self.hue;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }
        Hsl {
            hue: (self.hue + f * dh).rem_euclid(360.0),
            saturation: self.saturation + f * (other.saturation - self.saturation),
            lightness: self.lightness + f * (other.lightness - self.lightness),
        }
    }
}

/// A color pinned to a position in the scale's domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// Piecewise-linear interpolation over ordered color stops, in HSL.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

impl ColorScale {
    /// Build a scale; stops are sorted by position. Returns `None` when empty.
    pub fn new(mut stops: Vec<ColorStop>) -> Option<Self> {
        if stops.is_empty() || stops.iter().any(|s| !s.position.is_finite()) {
            return None;
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Some(Self { stops })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at `t`, clamped to the first and last stop.
    pub fn at(&self, t: f64) -> Color {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];

        if t.is_nan() || t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                let f = (t - lo.position) / span;
                return Color::from_hsl(lo.color.to_hsl().mix(hi.color.to_hsl(), f));
            }
        }

        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Color::from_hex("#10B981").unwrap();
        assert_eq!(c, Color::rgb(0x10, 0xb9, 0x81));
        assert_eq!(c.to_hex(), "#10b981");
        assert_eq!(Color::from_hex("94a3b8").unwrap().to_string(), "#94a3b8");
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
    }

    #[test]
    fn hsl_conversion_preserves_colors() {
        for hex in ["#10b981", "#fbbf24", "#f97316", "#ef4444", "#94a3b8", "#000000", "#ffffff"] {
            let c = Color::from_hex(hex).unwrap();
            assert_eq!(Color::from_hsl(c.to_hsl()), c, "{hex}");
        }
    }

    #[test]
    fn pure_red_hue_is_zero() {
        let hsl = Color::rgb(255, 0, 0).to_hsl();
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 1.0);
        assert_eq!(hsl.lightness, 0.5);
    }

    #[test]
    fn mix_takes_short_way_round() {
        let a = Hsl { hue: 350.0, saturation: 1.0, lightness: 0.5 };
        let b = Hsl { hue: 10.0, saturation: 1.0, lightness: 0.5 };
        let mid = a.mix(b, 0.5);
        assert!(mid.hue < 1e-9 || (360.0 - mid.hue) < 1e-9);
    }

    #[test]
    fn scale_clamps_outside_domain() {
        let scale = ColorScale::new(vec![
            ColorStop { position: 0.0, color: Color::rgb(0, 0, 0) },
            ColorStop { position: 1.0, color: Color::rgb(255, 255, 255) },
        ])
        .unwrap();
        assert_eq!(scale.at(-3.0), Color::rgb(0, 0, 0));
        assert_eq!(scale.at(7.0), Color::rgb(255, 255, 255));
        assert_eq!(scale.at(f64::NAN), Color::rgb(0, 0, 0));
        assert_eq!(scale.at(0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn empty_scale_is_rejected() {
        assert!(ColorScale::new(Vec::new()).is_none());
    }

    #[test]
    fn color_serializes_as_hex() {
        let json = serde_json::to_string(&Color::rgb(0xf9, 0x73, 0x16)).unwrap();
        assert_eq!(json, "\"#f97316\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0xf9, 0x73, 0x16));
    }
}
