use async_trait::async_trait;
use trivia_core::model::Deck;

/// Supplies a freshly fetched deck for each session start.
///
/// Failures are already folded into the deck: an empty deck means nothing
/// could be fetched.
#[async_trait]
pub trait DeckSource: Send + Sync {
    async fn fetch_deck(&self) -> Deck;
}
