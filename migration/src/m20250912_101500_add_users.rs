use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum User {
    Table,
    Uuid,
    Email,
    PasswordHash
}

#[derive(Iden)]
enum UserAccessKey {
    Table,
    KeyHash,
    UserId
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::PasswordHash)
                            .string_len(128)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserAccessKey::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAccessKey::KeyHash)
                        .string_len(128)
                        .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserAccessKey::UserId)
                            .uuid()
                            .not_null()
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-user-key_user")
                            .from_tbl(UserAccessKey::Table)
                            .from_col(UserAccessKey::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Uuid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAccessKey::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}
