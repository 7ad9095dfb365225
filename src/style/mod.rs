//! Style resolution: theme, backgrounds, fonts and placeholder defaults.
//!
//! Every lookup here is total. Missing parts, nodes or media make a
//! resolver fall through to its next source and finally to a fixed
//! default; nothing in this module returns an error.

mod fallback;
pub mod font;
pub mod theme;

pub use fallback::Fallback;
pub use font::{
    effective_font, layout_placeholder_defaults, EffectiveFont, PlaceholderDefaults,
    PlaceholderDefaultsCache, PlaceholderKey, PlaceholderStyle,
};
pub use theme::{
    background_style, resolve_color, scheme_color, theme_fonts, BackgroundStyle, ThemeFonts,
};
