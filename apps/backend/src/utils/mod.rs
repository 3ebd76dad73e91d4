pub mod emoji;
pub mod room_token;
