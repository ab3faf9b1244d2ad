//! Next-question selection for quiz play.

use crate::domain::{Question, QuestionId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Pick one question uniformly at random from `candidates`, skipping any
/// whose id appears in `previous`.
///
/// Returns `None` when every candidate has already been asked.
pub fn pick_next_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[QuestionId],
    rng: &mut R,
) -> Option<Question> {
    let asked: HashSet<QuestionId> = previous.iter().copied().collect();

    let eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();

    eligible.choose(rng).cloned()
}
