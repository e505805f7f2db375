use rand::Rng;
use rand::seq::SliceRandom;
use trivia_core::model::{Deck, Question};

/// Merges fetched batches into a single uniformly shuffled deck.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAssembler;

impl SessionAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn assemble<I>(&self, batches: I) -> Deck
    where
        I: IntoIterator<Item = Vec<Question>>,
    {
        self.assemble_with_rng(batches, &mut rand::rng())
    }

    pub fn assemble_with_rng<I, R>(&self, batches: I, rng: &mut R) -> Deck
    where
        I: IntoIterator<Item = Vec<Question>>,
        R: Rng + ?Sized,
    {
        let mut questions: Vec<Question> = batches.into_iter().flatten().collect();
        questions.as_mut_slice().shuffle(rng);
        Deck::new(questions)
    }
}
