use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "live_guesses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "fact_id")]
    pub fact_id: i64,
    #[sea_orm(column_name = "guesser_id")]
    pub guesser_id: i64,
    #[sea_orm(column_name = "guessed_player_id")]
    pub guessed_player_id: i64,
    #[sea_orm(column_name = "is_correct")]
    pub is_correct: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facts::Entity",
        from = "Column::FactId",
        to = "super::facts::Column::Id"
    )]
    Fact,
}

impl Related<super::facts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
