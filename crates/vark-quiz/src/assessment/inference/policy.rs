use super::super::domain::{Dominant, ScoreTally};

/// Picks the style holding the strict maximum; any tie at the top, including
/// the all-zero tally, resolves to [`Dominant::Multimodal`].
pub(crate) fn resolve_dominant(tally: &ScoreTally) -> Dominant {
    let max_score = tally.iter().map(|(_, count)| *count).max().unwrap_or(0);

    let mut winners = tally
        .iter()
        .filter(|(_, count)| **count == max_score)
        .map(|(style, _)| style);

    match (winners.next(), winners.next()) {
        (Some(style), None) => Dominant::Style(style),
        _ => Dominant::Multimodal,
    }
}
