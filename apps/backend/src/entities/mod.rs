pub mod facts;
pub mod games;
pub mod live_guesses;
pub mod players;
pub mod score_log;
pub mod story_ratings;

pub use facts::Entity as Facts;
pub use facts::Model as Fact;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use live_guesses::Entity as LiveGuesses;
pub use live_guesses::Model as LiveGuess;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use score_log::Entity as ScoreLog;
pub use score_log::Model as ScoreLogEntry;
pub use story_ratings::Entity as StoryRatings;
pub use story_ratings::Model as StoryRating;
