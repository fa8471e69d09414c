use sea_orm_migration::prelude::*;

use crate::m0000020_create_deviation::Deviation;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Action::Table)
                    .col(
                        ColumnDef::new(Action::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Action::DeviationId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(Action::DeviationId)
                            .to(Deviation::Table, Deviation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Action::ActionDescription).text().not_null())
                    .col(ColumnDef::new(Action::ActionResponsible).string())
                    .col(ColumnDef::new(Action::ActionExpirationDate).date())
                    .col(
                        ColumnDef::new(Action::ReminderSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Action::Status)
                            .string_len(20)
                            .not_null()
                            .default("Not Started"),
                    )
                    .col(
                        ColumnDef::new(Action::Order)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .index(
                        Index::create()
                            .table(Action::Table)
                            .name("action_deviation_id_order_idx")
                            .col(Action::DeviationId)
                            .col(Action::Order)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Action::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Action {
    Table,
    Id,
    DeviationId,
    ActionDescription,
    ActionResponsible,
    ActionExpirationDate,
    ReminderSent,
    Status,
    Order,
}
