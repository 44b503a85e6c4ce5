use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;
use crate::settings::QuizSelection;

/// Picks the next question out of `candidates` (in id order) that is not in
/// `previous`. `None` once every candidate was asked.
pub fn next_question<R>(
    candidates: Vec<Question>,
    previous: &HashSet<i64>,
    selection: QuizSelection,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let mut unseen = candidates
        .into_iter()
        .filter(|question| !previous.contains(&question.id));
    match selection {
        QuizSelection::First => unseen.next(),
        QuizSelection::Random => unseen.choose(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: "answer".into(),
            category: 1,
            difficulty: 1,
        }
    }

    fn pool(ids: &[i64]) -> Vec<Question> {
        ids.iter().copied().map(question).collect()
    }

    #[test]
    fn first_skips_previous_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        let previous = HashSet::from([2, 3]);
        let next = next_question(pool(&[2, 3, 5, 8]), &previous, QuizSelection::First, &mut rng);
        assert_eq!(next.map(|q| q.id), Some(5));
    }

    #[test]
    fn random_never_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let previous = HashSet::from([1, 2, 4]);
        for _ in 0..50 {
            let next =
                next_question(pool(&[1, 2, 3, 4, 5]), &previous, QuizSelection::Random, &mut rng)
                    .unwrap();
            assert!(next.id == 3 || next.id == 5);
        }
    }

    #[test]
    fn exhausted_pool_yields_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let previous = HashSet::from([5]);
        for selection in [QuizSelection::First, QuizSelection::Random] {
            assert!(next_question(pool(&[5]), &previous, selection, &mut rng).is_none());
            assert!(next_question(Vec::new(), &HashSet::new(), selection, &mut rng).is_none());
        }
    }

    #[test]
    fn walking_the_pool_visits_every_question_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut previous = HashSet::new();
        while let Some(next) =
            next_question(pool(&[1, 2, 3, 4]), &previous, QuizSelection::Random, &mut rng)
        {
            assert!(previous.insert(next.id));
        }
        assert_eq!(previous, HashSet::from([1, 2, 3, 4]));
    }
}
