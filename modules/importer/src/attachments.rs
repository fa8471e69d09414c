use anyhow::{bail, Context};
use devtrack_common::{config, db::Database};
use devtrack_entity::deviation;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use std::{fs, path::Path, process::ExitCode};

/// Link attachment files to their deviations
#[derive(clap::Args, Debug)]
pub struct LinkAttachments {
    /// Attachment directory configuration
    #[command(flatten)]
    pub attachments: config::Attachments,

    /// Database configuration
    #[command(flatten)]
    pub database: config::Database,
}

impl LinkAttachments {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let db = Database::new(&self.database).await?;

        let report = link_attachments(&db, &self.attachments.dir).await?;

        log::info!("successfully linked: {} files", report.linked);
        log::info!("files without matching deviations: {}", report.not_found);

        db.close().await?;

        Ok(ExitCode::SUCCESS)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub linked: usize,
    pub not_found: usize,
}

/// Scan a directory for `DEV*.pdf` files and record them on the matching deviations.
///
/// The dev_number is the file stem up to the first underscore, so upload copies like
/// `DEV24-0439_4vsYn5j.pdf` find their deviation as well. A file without a match is a
/// warning, not an error.
pub async fn link_attachments(db: &Database, dir: &Path) -> anyhow::Result<LinkReport> {
    if !dir.is_dir() {
        bail!("attachment directory does not exist: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to scan: {}", dir.display()))? {
        if let Ok(name) = entry?.file_name().into_string() {
            files.push(name);
        }
    }
    files.sort();

    let mut report = LinkReport::default();

    for name in files {
        let Some(stem) = name.strip_suffix(".pdf") else {
            continue;
        };
        if !name.starts_with("DEV") {
            continue;
        }

        let dev_number = match stem.split_once('_') {
            Some((base, _)) => base,
            None => stem,
        };

        let Some(current) = deviation::Entity::find()
            .filter(deviation::Column::DevNumber.eq(dev_number))
            .one(db)
            .await?
        else {
            log::warn!("no deviation found for {dev_number} (file: {name})");
            report.not_found += 1;
            continue;
        };

        // a suffixed copy never replaces an existing attachment, the primary form always does
        if current.attachment.is_none() || !stem.contains('_') {
            let mut model = current.into_active_model();
            model.attachment = Set(Some(name.clone()));
            model.update(db).await?;

            log::info!("linked {name} to {dev_number}");
            report.linked += 1;
        }
    }

    Ok(report)
}
