//! Length, colour and line-dash conversions.

use crate::model::ColorRef;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// CSS pixels per inch.
pub const PX_PER_INCH: i64 = 96;

/// English Metric Units per CSS pixel.
pub const EMU_PER_PX: i64 = EMU_PER_INCH / PX_PER_INCH;

/// Convert EMU to whole CSS pixels, truncating toward zero.
///
/// Defined for the whole `i64` range.
pub fn emu_to_px(emu: i64) -> i64 {
    emu / EMU_PER_PX
}

/// Convert EMU to points.
pub fn emu_to_pt(emu: i64) -> Option<f64> {
    let pt = emu as f64 / EMU_PER_POINT;
    pt.is_finite().then_some(pt)
}

/// Convert points to whole CSS pixels (96/72), truncating toward zero.
pub fn pt_to_px(pt: f64) -> Option<i64> {
    let px = pt * 96.0 / 72.0;
    px.is_finite().then_some(px.trunc() as i64)
}

/// Format a colour reference as `#rrggbb`.
///
/// Scheme colours carry no RGB of their own and yield `None`; they are
/// resolved through the theme by [`crate::style::theme::scheme_color`].
pub fn color_to_hex(color: &ColorRef) -> Option<String> {
    match color {
        ColorRef::Rgb(hex) => normalize_hex(hex),
        ColorRef::System { last_rgb, .. } => last_rgb.as_deref().and_then(normalize_hex),
        ColorRef::Scheme(_) => None,
    }
}

/// Validate a six digit hex string and format it as lower-case `#rrggbb`.
pub fn normalize_hex(hex: &str) -> Option<String> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        None
    }
}

/// Preset line dash styles (`a:prstDash@val`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Solid,
    Dash,
    Dot,
    DashDot,
    LongDash,
    LongDashDot,
    LongDashDotDot,
    SysDash,
    SysDot,
    SysDashDot,
    SysDashDotDot,
}

impl DashStyle {
    /// Parse a `prstDash` value; unknown values are `None`.
    pub fn from_preset(val: &str) -> Option<Self> {
        match val {
            "solid" => Some(Self::Solid),
            "dash" => Some(Self::Dash),
            "dot" => Some(Self::Dot),
            "dashDot" => Some(Self::DashDot),
            "lgDash" => Some(Self::LongDash),
            "lgDashDot" => Some(Self::LongDashDot),
            "lgDashDotDot" => Some(Self::LongDashDotDot),
            "sysDash" => Some(Self::SysDash),
            "sysDot" => Some(Self::SysDot),
            "sysDashDot" => Some(Self::SysDashDot),
            "sysDashDotDot" => Some(Self::SysDashDotDot),
            _ => None,
        }
    }

    /// CSS border style for this dash style.
    pub fn css(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dot | Self::SysDot => "dotted",
            Self::Dash
            | Self::DashDot
            | Self::LongDash
            | Self::LongDashDot
            | Self::LongDashDotDot
            | Self::SysDash
            | Self::SysDashDot
            | Self::SysDashDotDot => "dashed",
        }
    }
}

/// CSS border style for an optional dash style; absent means `solid`.
pub fn dash_style_to_css(style: Option<DashStyle>) -> &'static str {
    style.map_or("solid", DashStyle::css)
}
