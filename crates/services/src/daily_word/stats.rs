/// Aggregated view of learning progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    pub learned: usize,
    pub in_review: usize,
    pub total_days: usize,
    /// `learned / total_days` as a whole percentage, rounded half up.
    pub percent: usize,
}

impl ProgressStats {
    #[must_use]
    pub fn new(learned: usize, in_review: usize, total_days: usize) -> Self {
        let percent = if total_days == 0 {
            0
        } else {
            (learned * 200 + total_days) / (total_days * 2)
        };
        Self {
            learned,
            in_review,
            total_days,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(ProgressStats::new(1, 0, 3).percent, 33);
        assert_eq!(ProgressStats::new(2, 0, 3).percent, 67);
        assert_eq!(ProgressStats::new(1, 0, 8).percent, 13);
        assert_eq!(ProgressStats::new(0, 0, 5).percent, 0);
        assert_eq!(ProgressStats::new(5, 0, 5).percent, 100);
    }
}
