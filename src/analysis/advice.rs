use crate::analysis::metrics::ActivityMetrics;

pub const NO_DATA: &str = "No data available for analysis.";
pub const KEEP_GOING: &str = "Keep up the good development pace!";

const LOW_FREQUENCY: &str = "Try to increase your commit frequency.";
const LATE_NIGHTS: &str = "Consider reducing late-night commits to protect your well-being.";
const WEEKEND_OVERLOAD: &str = "Many weekend commits can be a sign of overload.";
const INCONSISTENT: &str = "Consider keeping a more consistent development rhythm.";

pub struct AdviceGenerator;

impl AdviceGenerator {
    /// Rules fire independently and keep their order in the output.
    pub fn generate(metrics: &ActivityMetrics) -> String {
        if metrics.is_empty() {
            return NO_DATA.to_string();
        }

        let rules: [(bool, &str); 4] = [
            (metrics.average_commits_per_day < 0.5, LOW_FREQUENCY),
            (metrics.late_night_commits > 10, LATE_NIGHTS),
            (metrics.weekend_commit_ratio > 40.0, WEEKEND_OVERLOAD),
            (metrics.idle_days > 7, INCONSISTENT),
        ];

        let advice: Vec<&str> = rules
            .iter()
            .filter(|(fired, _)| *fired)
            .map(|(_, sentence)| *sentence)
            .collect();

        if advice.is_empty() {
            KEEP_GOING.to_string()
        } else {
            advice.join(" ")
        }
    }
}
