//! Color parsing and the continuous and qualitative scales used by the charts.

use plotters::style::RGBColor;

/// Parses `#RRGGBB`.
pub fn parse_hex(color: &str) -> Option<RGBColor> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Qualitative Set3 palette for categorical slices.
pub const SET3: [RGBColor; 12] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
    RGBColor(217, 217, 217),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
    RGBColor(255, 237, 111),
];

const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

const BLUES: [RGBColor; 5] = [
    RGBColor(239, 243, 255),
    RGBColor(189, 215, 231),
    RGBColor(107, 174, 214),
    RGBColor(49, 130, 189),
    RGBColor(8, 81, 156),
];

const RD_YL_BU_R: [RGBColor; 7] = [
    RGBColor(69, 117, 180),
    RGBColor(145, 191, 219),
    RGBColor(224, 243, 248),
    RGBColor(255, 255, 191),
    RGBColor(254, 224, 144),
    RGBColor(252, 141, 89),
    RGBColor(215, 48, 39),
];

/// Continuous color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Dark purple through green to yellow.
    Viridis,
    /// Pale to dark blue.
    Blues,
    /// Blue through yellow to red.
    RdYlBuR,
}

impl ColorScale {
    fn stops(self) -> &'static [RGBColor] {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Blues => &BLUES,
            Self::RdYlBuR => &RD_YL_BU_R,
        }
    }

    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn at(self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor();
        let frac = scaled - lower;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (lower as usize).min(stops.len() - 1);
        let from = stops[index];
        let to = stops[(index + 1).min(stops.len() - 1)];
        RGBColor(lerp(from.0, to.0, frac), lerp(from.1, to.1, frac), lerp(from.2, to.2, frac))
    }

    /// Color of `value` within `[min, max]`; a flat range maps to the top.
    pub fn map(self, value: f64, min: f64, max: f64) -> RGBColor {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.at(1.0);
        }
        self.at((value - min) / span)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(from: u8, to: u8, frac: f64) -> u8 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * frac).round() as u8
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: RGBColor) -> RGBColor {
    let luminance =
        0.299 * f64::from(background.0) + 0.587 * f64::from(background.1) + 0.114 * f64::from(background.2);
    if luminance > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

/// Minimum and maximum of a sequence, `None` when empty.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
