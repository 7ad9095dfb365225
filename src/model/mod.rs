//! Presentation model.
//!
//! The PPTX reader turns package parts into these structures; the style
//! resolvers and HTML emitters only ever look at this model.

mod presentation;
mod shape;
mod text;

pub use presentation::*;
pub use shape::*;
pub use text::*;
