use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "author_id")]
    pub author_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub guessed: bool,
    #[sea_orm(column_name = "story_revealed")]
    pub story_revealed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub story: Option<String>,
    #[sea_orm(column_name = "story_rating_average", column_type = "Double", nullable)]
    pub story_rating_average: Option<f64>,
    #[sea_orm(column_name = "story_rating_count")]
    pub story_rating_count: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "resolved_at")]
    pub resolved_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::AuthorId",
        to = "super::players::Column::Id"
    )]
    Author,
    #[sea_orm(has_many = "super::live_guesses::Entity")]
    LiveGuesses,
    #[sea_orm(has_many = "super::story_ratings::Entity")]
    StoryRatings,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::live_guesses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveGuesses.def()
    }
}

impl Related<super::story_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoryRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
