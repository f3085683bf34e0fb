//! ANSI color utilities and affinity badges.
//!
//! Badges give a quick read of a combined score:
//! - [strong]: 0.5 and above
//! - [fair]: 0.3 up to 0.5
//! - [weak]: below 0.3
//!
//! Color scheme optimized for both light and dark terminals:
//! - High contrast for member headers
//! - Semantic colors for candidates and scores
//! - Muted colors for per-signal breakdowns

use owo_colors::{OwoColorize, Style};
use std::fmt;

/// Score band for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Strong,
    Fair,
    Weak,
}

impl Badge {
    /// Band a combined score falls into
    pub fn for_score(score: f64) -> Self {
        if score >= 0.5 {
            Badge::Strong
        } else if score >= 0.3 {
            Badge::Fair
        } else {
            Badge::Weak
        }
    }

    /// Get the badge label for display
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Strong => "strong",
            Badge::Fair => "fair",
            Badge::Weak => "weak",
        }
    }

    /// Get the badge's display color/style
    pub fn style(&self) -> Style {
        match self {
            Badge::Strong => Style::new().bright_green().bold(),
            Badge::Fair => Style::new().yellow(),
            Badge::Weak => Style::new().dimmed(),
        }
    }

    /// Render the badge with color
    pub fn render(&self) -> String {
        format!("[{}]", self.label().style(self.style()))
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Colorize the parts of a recommendation listing.
pub struct Colorizer;

impl Colorizer {
    /// Member header (bold blue)
    pub fn member(s: &str) -> String {
        s.bright_blue().bold().to_string()
    }

    /// Recommended candidate id (green)
    pub fn candidate(s: &str) -> String {
        s.green().to_string()
    }

    /// Score value (cyan)
    pub fn score(s: &str) -> String {
        s.cyan().to_string()
    }

    /// Signal label in breakdowns (dimmed yellow)
    pub fn signal(s: &str) -> String {
        s.yellow().dimmed().to_string()
    }

    /// Dim text for secondary information
    pub fn dim(s: &str) -> String {
        s.dimmed().to_string()
    }
}
