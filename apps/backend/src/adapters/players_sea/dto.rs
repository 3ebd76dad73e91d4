//! DTOs for players_sea adapter.

#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub game_id: i64,
    pub name: String,
    pub emoji: String,
    pub is_host: bool,
}

impl PlayerCreate {
    pub fn new(game_id: i64, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            game_id,
            name: name.into(),
            emoji: emoji.into(),
            is_host: false,
        }
    }

    pub fn host(mut self) -> Self {
        self.is_host = true;
        self
    }
}
