use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum User {
    Table,
    Uuid
}

#[derive(Iden)]
enum Participant {
    Table,
    Uuid,
    Email,
    UserId,
    FullName,
    Role,
    Committee,
    Country,
    Grade,
    Bio,
    PastConferences,
    Awards
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participant::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participant::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Participant::UserId)
                            .uuid()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Participant::FullName).string())
                    .col(ColumnDef::new(Participant::Role).string())
                    .col(ColumnDef::new(Participant::Committee).string())
                    .col(ColumnDef::new(Participant::Country).string())
                    .col(ColumnDef::new(Participant::Grade).string_len(8))
                    .col(ColumnDef::new(Participant::Bio).text())
                    .col(ColumnDef::new(Participant::PastConferences).integer())
                    .col(ColumnDef::new(Participant::Awards).text())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-participant_user")
                            .from_tbl(Participant::Table)
                            .from_col(Participant::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Uuid)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participant::Table).to_owned())
            .await
    }
}
