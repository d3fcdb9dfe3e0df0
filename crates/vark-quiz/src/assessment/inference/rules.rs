use super::super::domain::{LearningStyle, PercentageBreakdown, ScoreTally};

/// Single forward pass over the answers; each answer bumps exactly one counter.
pub(crate) fn tally_answers(answers: &[LearningStyle]) -> ScoreTally {
    let mut tally = ScoreTally::default();
    for answer in answers {
        *tally.get_mut(*answer) += 1;
    }
    tally
}

/// Rounds each share independently, so the values need not add up to 100.
pub(crate) fn percentages(tally: &ScoreTally, total: u64) -> PercentageBreakdown {
    PercentageBreakdown::from_fn(|style| round_percentage(*tally.get(style), total))
}

/// `round(count / total * 100)` with halves rounded up, in integer arithmetic.
pub(crate) fn round_percentage(count: u32, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let count = u64::from(count).min(total);
    ((count * 200 + total) / (total * 2)) as u8
}
