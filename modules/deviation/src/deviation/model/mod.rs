mod details;
mod summary;

pub use details::*;
pub use summary::*;

use devtrack_entity::deviation;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviationHead {
    pub id: i32,

    #[schema(required)]
    pub primary_column: Option<String>,

    #[schema(required)]
    pub year: Option<i32>,

    /// The business identifier of the deviation. Unique, and used as the
    /// path parameter of all deviation endpoints.
    pub dev_number: String,

    #[schema(required)]
    pub created_by: Option<String>,

    /// Id of the user account which created this deviation.
    #[schema(required)]
    pub created_by_user: Option<i32>,

    #[schema(required)]
    pub owner_plant: Option<String>,

    #[schema(required)]
    pub affected_plant: Option<String>,

    #[schema(required)]
    pub sbu: Option<String>,

    #[schema(required)]
    pub release_date: Option<chrono::NaiveDate>,

    #[schema(required)]
    pub effectivity_date: Option<chrono::NaiveDate>,

    #[schema(required)]
    pub expiration_date: Option<chrono::NaiveDate>,

    #[schema(required)]
    pub drawing_number: Option<String>,

    pub back_to_back_deviation: bool,

    #[schema(required)]
    pub defect_category: Option<String>,

    #[schema(required)]
    pub assembly_defect_type: Option<String>,

    #[schema(required)]
    pub molding_defect_type: Option<String>,

    #[schema(required)]
    pub attachment: Option<String>,
}

impl DeviationHead {
    pub fn from_entity(deviation: &deviation::Model) -> Self {
        Self {
            id: deviation.id,
            primary_column: deviation.primary_column.clone(),
            year: deviation.year,
            dev_number: deviation.dev_number.clone(),
            created_by: deviation.created_by.clone(),
            created_by_user: deviation.created_by_user_id,
            owner_plant: deviation.owner_plant.clone(),
            affected_plant: deviation.affected_plant.clone(),
            sbu: deviation.sbu.clone(),
            release_date: deviation.release_date,
            effectivity_date: deviation.effectivity_date,
            expiration_date: deviation.expiration_date,
            drawing_number: deviation.drawing_number.clone(),
            back_to_back_deviation: deviation.back_to_back_deviation,
            defect_category: deviation.defect_category.clone(),
            assembly_defect_type: deviation.assembly_defect_type.clone(),
            molding_defect_type: deviation.molding_defect_type.clone(),
            attachment: deviation.attachment.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateDeviationRequest {
    pub dev_number: String,

    #[serde(default)]
    pub primary_column: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub created_by: Option<String>,

    /// Id of the user account to record as creator. Defaults to the
    /// authenticated caller.
    #[serde(default)]
    pub created_by_user: Option<i32>,

    #[serde(default)]
    pub owner_plant: Option<String>,

    #[serde(default)]
    pub affected_plant: Option<String>,

    #[serde(default)]
    pub sbu: Option<String>,

    #[serde(default)]
    pub release_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub effectivity_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub expiration_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub drawing_number: Option<String>,

    #[serde(default)]
    pub back_to_back_deviation: bool,

    #[serde(default)]
    pub defect_category: Option<String>,

    #[serde(default)]
    pub assembly_defect_type: Option<String>,

    #[serde(default)]
    pub molding_defect_type: Option<String>,

    #[serde(default)]
    pub attachment: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateDeviationRequest {
    /// Accepted for symmetry with the read payload, but must match the
    /// current value. The business identifier cannot be changed.
    #[serde(default)]
    pub dev_number: Option<String>,

    #[serde(default)]
    pub primary_column: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_by_user: Option<i32>,

    #[serde(default)]
    pub owner_plant: Option<String>,

    #[serde(default)]
    pub affected_plant: Option<String>,

    #[serde(default)]
    pub sbu: Option<String>,

    #[serde(default)]
    pub release_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub effectivity_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub expiration_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub drawing_number: Option<String>,

    #[serde(default)]
    pub back_to_back_deviation: Option<bool>,

    #[serde(default)]
    pub defect_category: Option<String>,

    #[serde(default)]
    pub assembly_defect_type: Option<String>,

    #[serde(default)]
    pub molding_defect_type: Option<String>,

    #[serde(default)]
    pub attachment: Option<String>,
}

/// Requested target positions for the actions of one deviation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub new_order: Vec<ReorderEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReorderEntry {
    /// Id of an action belonging to the deviation being reordered.
    pub id: i32,
    pub order: i32,
}
