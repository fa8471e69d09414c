use crate::sheet::{parse_sheet, SheetDeviation};
use anyhow::Context;
use devtrack_common::{config, db::Database};
use devtrack_entity::{action, deviation};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use std::{
    fs::File,
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Import deviations from a CSV export of the legacy deviation matrix
#[derive(clap::Args, Debug)]
pub struct ImportDeviations {
    /// The file to import
    #[arg(long, env = "IMPORT_FILE")]
    pub file: PathBuf,

    /// Database configuration
    #[command(flatten)]
    pub database: config::Database,
}

impl ImportDeviations {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let db = Database::new(&self.database).await?;

        let report = import_file(&db, &self.file).await?;

        log::info!(
            "deviations: created {}, updated {}",
            report.deviations_created,
            report.deviations_updated
        );
        log::info!(
            "actions: created {} (existing actions were replaced)",
            report.actions_created
        );

        db.close().await?;

        Ok(ExitCode::SUCCESS)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub deviations_created: usize,
    pub deviations_updated: usize,
    pub actions_created: usize,
}

/// Import a CSV file.
///
/// An empty file is reported and skipped before any database write.
pub async fn import_file(db: &Database, path: &Path) -> anyhow::Result<ImportReport> {
    let file = File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
    let deviations =
        parse_sheet(file).with_context(|| format!("failed to parse: {}", path.display()))?;

    if deviations.is_empty() {
        log::warn!("no deviation rows found in: {}", path.display());
        return Ok(ImportReport::default());
    }

    import(db, deviations).await
}

/// Upsert a batch of deviations parsed from a sheet, in one transaction.
///
/// Deviation fields update sparsely, a value the sheet does not carry stays untouched. The
/// action set is replaced wholesale, with orders re-assigned 1..n in row order.
pub async fn import(db: &Database, deviations: Vec<SheetDeviation>) -> anyhow::Result<ImportReport> {
    let mut report = ImportReport::default();

    let tx = db.begin().await?;

    for sheet in deviations {
        let current = deviation::Entity::find()
            .filter(deviation::Column::DevNumber.eq(&sheet.dev_number))
            .one(&tx)
            .await?;

        let current = match current {
            Some(model) => {
                report.deviations_updated += 1;
                update_deviation(model, &sheet, &tx).await?
            }
            None => {
                report.deviations_created += 1;
                create_deviation(&sheet, &tx).await?
            }
        };

        action::Entity::delete_many()
            .filter(action::Column::DeviationId.eq(current.id))
            .exec(&tx)
            .await?;

        for (index, entry) in sheet.actions.iter().enumerate() {
            action::ActiveModel {
                deviation_id: Set(current.id),
                action_description: Set(entry.description.clone()),
                action_responsible: Set(Some(entry.responsible.clone())),
                action_expiration_date: Set(entry.due_date),
                reminder_sent: Set(false),
                status: Set(Default::default()),
                order: Set(index as i32 + 1),
                ..Default::default()
            }
            .insert(&tx)
            .await?;

            report.actions_created += 1;
        }
    }

    tx.commit().await?;

    Ok(report)
}

async fn create_deviation<C: ConnectionTrait>(
    sheet: &SheetDeviation,
    connection: &C,
) -> anyhow::Result<deviation::Model> {
    Ok(deviation::ActiveModel {
        dev_number: Set(sheet.dev_number.clone()),
        primary_column: Set(sheet.primary_column.clone()),
        year: Set(sheet.year),
        created_by: Set(sheet.created_by.clone()),
        owner_plant: Set(sheet.owner_plant.clone()),
        affected_plant: Set(sheet.affected_plant.clone()),
        sbu: Set(sheet.sbu.clone()),
        release_date: Set(sheet.release_date.flatten()),
        effectivity_date: Set(sheet.effectivity_date.flatten()),
        expiration_date: Set(sheet.expiration_date.flatten()),
        drawing_number: Set(sheet.drawing_number.clone()),
        back_to_back_deviation: Set(sheet.back_to_back_deviation.unwrap_or_default()),
        defect_category: Set(sheet.defect_category.clone()),
        assembly_defect_type: Set(sheet.assembly_defect_type.clone()),
        molding_defect_type: Set(sheet.molding_defect_type.clone()),
        ..Default::default()
    }
    .insert(connection)
    .await?)
}

async fn update_deviation<C: ConnectionTrait>(
    model: deviation::Model,
    sheet: &SheetDeviation,
    connection: &C,
) -> anyhow::Result<deviation::Model> {
    let mut model = model.into_active_model();

    if let Some(value) = &sheet.primary_column {
        model.primary_column = Set(Some(value.clone()));
    }
    if let Some(value) = sheet.year {
        model.year = Set(Some(value));
    }
    if let Some(value) = &sheet.created_by {
        model.created_by = Set(Some(value.clone()));
    }
    if let Some(value) = &sheet.owner_plant {
        model.owner_plant = Set(Some(value.clone()));
    }
    if let Some(value) = &sheet.affected_plant {
        model.affected_plant = Set(Some(value.clone()));
    }
    if let Some(value) = &sheet.sbu {
        model.sbu = Set(Some(value.clone()));
    }
    if let Some(value) = sheet.release_date {
        model.release_date = Set(value);
    }
    if let Some(value) = sheet.effectivity_date {
        model.effectivity_date = Set(value);
    }
    if let Some(value) = sheet.expiration_date {
        model.expiration_date = Set(value);
    }
    if let Some(value) = &sheet.drawing_number {
        model.drawing_number = Set(Some(value.clone()));
    }
    if let Some(value) = sheet.back_to_back_deviation {
        model.back_to_back_deviation = Set(value);
    }
    if let Some(value) = &sheet.defect_category {
        model.defect_category = Set(Some(value.clone()));
    }
    if let Some(value) = &sheet.assembly_defect_type {
        model.assembly_defect_type = Set(Some(value.clone()));
    }
    if let Some(value) = &sheet.molding_defect_type {
        model.molding_defect_type = Set(Some(value.clone()));
    }

    Ok(model.update(connection).await?)
}
