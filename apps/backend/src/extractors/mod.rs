pub mod game_token;
pub mod session;
pub mod validated_json;

pub use game_token::GameToken;
pub use session::SessionPlayer;
pub use validated_json::ValidatedJson;
