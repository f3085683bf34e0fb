//! Text rendering of recommendation lists.
//!
//! ```text
//! Member U1 ->
//!   1. U4  0.6000 [strong]
//!   2. U5  0.4437 [fair]
//!   3. U2  0.4354 [fair]
//! ```
//!
//! With explain enabled each candidate gets one extra line with the weighted
//! contribution of every signal.

use crate::combine::CombinedScores;
use crate::error::Result;
use crate::types::{EntityId, Recommendation};

use super::colors::{Badge, Colorizer};

/// Renders ranked lists for the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationRenderer {
    color: bool,
    explain: bool,
}

impl RecommendationRenderer {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            explain: false,
        }
    }

    /// Add per-signal breakdown lines under each candidate.
    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    /// Render every member's list under a single heading.
    pub fn render_all(
        &self,
        scores: &CombinedScores,
        lists: &[(EntityId, Vec<Recommendation>)],
    ) -> Result<String> {
        let mut out = String::from("Top Recommendations for Each Member:\n");
        for (member, recs) in lists {
            out.push('\n');
            out.push_str(&self.render_member(scores, member, recs)?);
        }
        Ok(out)
    }

    /// Render one member's list.
    pub fn render_member(
        &self,
        scores: &CombinedScores,
        member: &str,
        recs: &[Recommendation],
    ) -> Result<String> {
        let mut lines = vec![format!("Member {} ->", self.paint(member, Colorizer::member))];

        if recs.is_empty() {
            lines.push(format!("  {}", self.paint("(no candidates)", Colorizer::dim)));
        }

        let width = recs.iter().map(|r| r.candidate.len()).max().unwrap_or(0);
        for (i, rec) in recs.iter().enumerate() {
            let badge = Badge::for_score(rec.score);
            let badge = if self.color {
                badge.render()
            } else {
                format!("[{}]", badge.label())
            };
            let candidate = format!("{:<width$}", rec.candidate, width = width);
            lines.push(format!(
                "  {}. {}  {} {}",
                i + 1,
                self.paint(&candidate, Colorizer::candidate),
                self.paint(&format!("{:.4}", rec.score), Colorizer::score),
                badge
            ));

            if self.explain {
                let breakdown = scores.breakdown(member, &rec.candidate)?;
                let parts: Vec<String> = breakdown
                    .components
                    .iter()
                    .map(|(kind, raw, contribution)| {
                        format!(
                            "{}={:.3}→{:.4}",
                            self.paint(kind.label(), Colorizer::signal),
                            raw,
                            contribution
                        )
                    })
                    .collect();
                lines.push(format!("       {}", parts.join("  ")));
            }
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn paint(&self, s: &str, style: fn(&str) -> String) -> String {
        if self.color {
            style(s)
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AffinityConfig;
    use crate::pipeline;
    use crate::ranking::RecommendationRanker;

    #[test]
    fn test_plain_rendering() {
        let scores = pipeline::run(&AffinityConfig::default()).unwrap();
        let recs = RecommendationRanker::new(&scores).recommend("U1", 3).unwrap();
        let text = RecommendationRenderer::new(false)
            .render_member(&scores, "U1", &recs)
            .unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Member U1 ->");
        assert_eq!(lines[1], "  1. U4  0.6000 [strong]");
        assert_eq!(lines[2], "  2. U5  0.4437 [fair]");
        assert_eq!(lines[3], "  3. U2  0.4354 [fair]");
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_explain_lines() {
        let scores = pipeline::run(&AffinityConfig::default()).unwrap();
        let recs = RecommendationRanker::new(&scores).recommend("U1", 1).unwrap();
        let text = RecommendationRenderer::new(false)
            .with_explain(true)
            .render_member(&scores, "U1", &recs)
            .unwrap();

        let breakdown = text.lines().nth(2).unwrap();
        for label in ["content", "collaborative", "social", "distance"] {
            assert!(breakdown.contains(label), "missing {} in {}", label, breakdown);
        }
    }

    #[test]
    fn test_render_all_heading() {
        let scores = pipeline::run(&AffinityConfig::default()).unwrap();
        let lists = RecommendationRanker::new(&scores).recommend_all(2).unwrap();
        let text = RecommendationRenderer::new(false)
            .render_all(&scores, &lists)
            .unwrap();
        assert!(text.starts_with("Top Recommendations for Each Member:"));
        assert_eq!(text.matches("Member ").count(), 5);
    }
}
