use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Token,
    Phase,
    CurrentFactId,
    StoryTellerId,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    EndedAt,
    LastFactAdded,
    Version,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    GameId,
    Name,
    Emoji,
    IsHost,
    KickedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Facts {
    Table,
    Id,
    GameId,
    AuthorId,
    Text,
    Guessed,
    StoryRevealed,
    Story,
    StoryRatingAverage,
    StoryRatingCount,
    CreatedAt,
    ResolvedAt,
}

#[derive(Iden)]
enum LiveGuesses {
    Table,
    Id,
    GameId,
    FactId,
    GuesserId,
    GuessedPlayerId,
    IsCorrect,
    CreatedAt,
}

#[derive(Iden)]
enum StoryRatings {
    Table,
    Id,
    GameId,
    FactId,
    RaterId,
    Rating,
    CreatedAt,
}

#[derive(Iden)]
enum ScoreLog {
    Table,
    Id,
    GameId,
    PlayerId,
    FactId,
    Points,
    Reason,
    Description,
    CreatedAt,
}

fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games; phase is a plain string so the schema runs on Postgres and SQLite alike
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(pk(Games::Id))
                    .col(ColumnDef::new(Games::Token).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Games::Phase)
                            .string_len(16)
                            .not_null()
                            .default("LOBBY"),
                    )
                    .col(ColumnDef::new(Games::CurrentFactId).big_integer().null())
                    .col(ColumnDef::new(Games::StoryTellerId).big_integer().null())
                    .col(created_at(Games::CreatedAt))
                    .col(created_at(Games::UpdatedAt))
                    .col(
                        ColumnDef::new(Games::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Games::EndedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Games::LastFactAdded)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_token")
                    .table(Games::Table)
                    .col(Games::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(pk(Players::Id))
                    .col(ColumnDef::new(Players::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Players::Name).string_len(64).not_null())
                    .col(ColumnDef::new(Players::Emoji).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Players::IsHost)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Players::KickedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at(Players::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_game_id")
                            .from(Players::Table, Players::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_players_game_id")
                    .table(Players::Table)
                    .col(Players::GameId)
                    .to_owned(),
            )
            .await?;

        // facts
        manager
            .create_table(
                Table::create()
                    .table(Facts::Table)
                    .if_not_exists()
                    .col(pk(Facts::Id))
                    .col(ColumnDef::new(Facts::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Facts::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Facts::Text).text().not_null())
                    .col(
                        ColumnDef::new(Facts::Guessed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Facts::StoryRevealed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Facts::Story).text().null())
                    .col(ColumnDef::new(Facts::StoryRatingAverage).double().null())
                    .col(
                        ColumnDef::new(Facts::StoryRatingCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at(Facts::CreatedAt))
                    .col(
                        ColumnDef::new(Facts::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_facts_game_id")
                            .from(Facts::Table, Facts::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_facts_author_id")
                            .from(Facts::Table, Facts::AuthorId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_facts_game_id")
                    .table(Facts::Table)
                    .col(Facts::GameId)
                    .to_owned(),
            )
            .await?;

        // live_guesses: one guess per (fact, guesser)
        manager
            .create_table(
                Table::create()
                    .table(LiveGuesses::Table)
                    .if_not_exists()
                    .col(pk(LiveGuesses::Id))
                    .col(ColumnDef::new(LiveGuesses::GameId).big_integer().not_null())
                    .col(ColumnDef::new(LiveGuesses::FactId).big_integer().not_null())
                    .col(
                        ColumnDef::new(LiveGuesses::GuesserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveGuesses::GuessedPlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LiveGuesses::IsCorrect).boolean().not_null())
                    .col(created_at(LiveGuesses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_guesses_game_id")
                            .from(LiveGuesses::Table, LiveGuesses::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_guesses_fact_id")
                            .from(LiveGuesses::Table, LiveGuesses::FactId)
                            .to(Facts::Table, Facts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_guesses_guesser_id")
                            .from(LiveGuesses::Table, LiveGuesses::GuesserId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_live_guesses_guessed_player_id")
                            .from(LiveGuesses::Table, LiveGuesses::GuessedPlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_live_guesses_fact_guesser")
                    .table(LiveGuesses::Table)
                    .col(LiveGuesses::FactId)
                    .col(LiveGuesses::GuesserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // story_ratings: one rating per (fact, rater)
        manager
            .create_table(
                Table::create()
                    .table(StoryRatings::Table)
                    .if_not_exists()
                    .col(pk(StoryRatings::Id))
                    .col(ColumnDef::new(StoryRatings::GameId).big_integer().not_null())
                    .col(ColumnDef::new(StoryRatings::FactId).big_integer().not_null())
                    .col(ColumnDef::new(StoryRatings::RaterId).big_integer().not_null())
                    .col(
                        ColumnDef::new(StoryRatings::Rating)
                            .small_integer()
                            .not_null()
                            .check(
                                Expr::col(StoryRatings::Rating)
                                    .gte(1)
                                    .and(Expr::col(StoryRatings::Rating).lte(3)),
                            ),
                    )
                    .col(created_at(StoryRatings::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_ratings_game_id")
                            .from(StoryRatings::Table, StoryRatings::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_ratings_fact_id")
                            .from(StoryRatings::Table, StoryRatings::FactId)
                            .to(Facts::Table, Facts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_ratings_rater_id")
                            .from(StoryRatings::Table, StoryRatings::RaterId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_story_ratings_fact_rater")
                    .table(StoryRatings::Table)
                    .col(StoryRatings::FactId)
                    .col(StoryRatings::RaterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // score_log: append-only ledger; fact reference survives fact deletion as NULL
        manager
            .create_table(
                Table::create()
                    .table(ScoreLog::Table)
                    .if_not_exists()
                    .col(pk(ScoreLog::Id))
                    .col(ColumnDef::new(ScoreLog::GameId).big_integer().not_null())
                    .col(ColumnDef::new(ScoreLog::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(ScoreLog::FactId).big_integer().null())
                    .col(ColumnDef::new(ScoreLog::Points).integer().not_null())
                    .col(ColumnDef::new(ScoreLog::Reason).string_len(32).not_null())
                    .col(ColumnDef::new(ScoreLog::Description).string().not_null())
                    .col(created_at(ScoreLog::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_score_log_game_id")
                            .from(ScoreLog::Table, ScoreLog::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_score_log_player_id")
                            .from(ScoreLog::Table, ScoreLog::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_score_log_fact_id")
                            .from(ScoreLog::Table, ScoreLog::FactId)
                            .to(Facts::Table, Facts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_score_log_game_player")
                    .table(ScoreLog::Table)
                    .col(ScoreLog::GameId)
                    .col(ScoreLog::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScoreLog::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StoryRatings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LiveGuesses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Facts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
