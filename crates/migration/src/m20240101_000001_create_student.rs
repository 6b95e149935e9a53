//! Create `student` table.
//!
//! `email` carries a unique constraint so duplicate registrations are rejected
//! by the store as well as by the service check.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(big_integer(Student::Id).auto_increment().primary_key())
                    .col(string_len(Student::Name, 128).not_null())
                    .col(string_len(Student::Email, 255).unique_key().not_null())
                    .col(string_len(Student::Gender, 16).not_null())
                    .col(text(Student::Joke).not_null())
                    .col(integer(Student::BookingId).not_null())
                    .col(timestamp_with_time_zone(Student::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, Name, Email, Gender, Joke, BookingId, CreatedAt }
