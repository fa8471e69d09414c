use sea_orm_migration::prelude::*;

use crate::m0000010_create_user::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deviation::Table)
                    .col(
                        ColumnDef::new(Deviation::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deviation::PrimaryColumn).string())
                    .col(ColumnDef::new(Deviation::Year).integer())
                    .col(
                        ColumnDef::new(Deviation::DevNumber)
                            .string()
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Deviation::CreatedBy).string())
                    .col(ColumnDef::new(Deviation::CreatedByUserId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(Deviation::CreatedByUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(ColumnDef::new(Deviation::OwnerPlant).string())
                    .col(ColumnDef::new(Deviation::AffectedPlant).string())
                    .col(ColumnDef::new(Deviation::Sbu).string())
                    .col(ColumnDef::new(Deviation::ReleaseDate).date())
                    .col(ColumnDef::new(Deviation::EffectivityDate).date())
                    .col(ColumnDef::new(Deviation::ExpirationDate).date())
                    .col(ColumnDef::new(Deviation::DrawingNumber).string())
                    .col(
                        ColumnDef::new(Deviation::BackToBackDeviation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Deviation::DefectCategory).string())
                    .col(ColumnDef::new(Deviation::AssemblyDefectType).string())
                    .col(ColumnDef::new(Deviation::MoldingDefectType).string())
                    .col(ColumnDef::new(Deviation::Attachment).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deviation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Deviation {
    Table,
    Id,
    PrimaryColumn,
    Year,
    DevNumber,
    CreatedBy,
    CreatedByUserId,
    OwnerPlant,
    AffectedPlant,
    Sbu,
    ReleaseDate,
    EffectivityDate,
    ExpirationDate,
    DrawingNumber,
    BackToBackDeviation,
    DefectCategory,
    AssemblyDefectType,
    MoldingDefectType,
    Attachment,
}
