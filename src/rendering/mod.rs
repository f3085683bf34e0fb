//! Output rendering - from ranked recommendations to terminal text.
//!
//! Plain text when piping or when color is off; ANSI colors and score badges
//! otherwise. An explain mode adds the per-signal breakdown of every score.

mod colors;
mod recommendations;

pub use colors::{Badge, Colorizer};
pub use recommendations::RecommendationRenderer;
