use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSummaryRow {
    pub name: String,
    pub is_ad: bool,
    pub seconds_watched: f64,
    pub heart: bool,
    pub share: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdSummaryRow {
    pub product_name: String,
    pub impressions: u64,
    pub avg_watch_seconds: f64,
    pub like_rate: f64,
    pub share_rate: f64,
    pub engagement_score: f64,
}

/// What the launcher prints when the feed closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub videos: Vec<VideoSummaryRow>,
    /// Products whose ads were seen this session, sorted by product path.
    pub ads: Vec<AdSummaryRow>,
}

impl SessionSummary {
    pub fn total_seconds_watched(&self) -> f64 {
        self.videos.iter().map(|v| v.seconds_watched).sum()
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Doom Scroll Session Summary ===")?;
        for row in &self.videos {
            writeln!(
                f,
                "- {:30}  |  {}  |  watched {:5.1}s  |  heart={} share={}",
                row.name,
                if row.is_ad { "AD " } else { "VID" },
                row.seconds_watched,
                if row.heart { '♥' } else { ' ' },
                if row.share { '↗' } else { ' ' },
            )?;
        }

        writeln!(f)?;
        if self.ads.is_empty() {
            writeln!(f, "=== Ad Performance Summary ===")?;
            return writeln!(
                f,
                "No ad impressions with linked products were recorded this session."
            );
        }

        writeln!(f, "=== Ad Performance Summary (by product) ===")?;
        for row in &self.ads {
            writeln!(
                f,
                "- {:30}  |  impressions={:3}  |  avg_watch={:4.1}s  |  like_rate={:.2}%  |  share_rate={:.2}%  |  engagement_score={:.4}",
                row.product_name,
                row.impressions,
                row.avg_watch_seconds,
                row.like_rate * 100.0,
                row.share_rate * 100.0,
                row.engagement_score,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, is_ad: bool, seconds: f64, heart: bool) -> VideoSummaryRow {
        VideoSummaryRow {
            name: name.to_string(),
            is_ad,
            seconds_watched: seconds,
            heart,
            share: false,
        }
    }

    #[test]
    fn test_summary_without_ads() {
        let summary = SessionSummary {
            videos: vec![row("a.mp4", false, 3.3, true)],
            ads: Vec::new(),
        };
        let text = summary.to_string();
        assert!(text.starts_with("=== Doom Scroll Session Summary ===\n"));
        assert!(text.contains("|  VID  |  watched   3.3s  |  heart=♥ share= "));
        assert!(text.contains("No ad impressions with linked products"));
    }

    #[test]
    fn test_summary_with_ads() {
        let summary = SessionSummary {
            videos: vec![row("a.mp4", false, 1.0, false), row("ad.mp4", true, 2.0, false)],
            ads: vec![AdSummaryRow {
                product_name: "mug.png".to_string(),
                impressions: 2,
                avg_watch_seconds: 1.5,
                like_rate: 0.5,
                share_rate: 0.0,
                engagement_score: 0.23,
            }],
        };
        let text = summary.to_string();
        assert!(text.contains("=== Ad Performance Summary (by product) ==="));
        assert!(text.contains("impressions=  2  |  avg_watch= 1.5s  |  like_rate=50.00%"));
        assert!(text.contains("engagement_score=0.2300"));
        assert!((summary.total_seconds_watched() - 3.0).abs() < f64::EPSILON);
    }
}
