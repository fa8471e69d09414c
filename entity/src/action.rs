use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// A remediation action of a deviation.
///
/// Actions of one deviation are ordered by their `order` column, which is unique within the
/// deviation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub deviation_id: i32,
    #[sea_orm(column_type = "Text")]
    pub action_description: String,
    /// Free-form responsible name, as found in imported sheets
    pub action_responsible: Option<String>,
    pub action_expiration_date: Option<NaiveDate>,
    pub reminder_sent: bool,
    pub status: ActionStatus,
    pub order: i32,
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    strum::Display,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ActionStatus {
    #[sea_orm(string_value = "Not Started")]
    #[strum(serialize = "Not Started")]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[sea_orm(string_value = "In Progress")]
    #[strum(serialize = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Done")]
    #[strum(serialize = "Done")]
    #[serde(rename = "Done")]
    Done,
}

impl Default for ActionStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::deviation::Entity",
        from = "Column::DeviationId",
        to = "super::deviation::Column::Id"
    )]
    Deviation,
}

impl Related<super::deviation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deviation.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::action_responsible::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::action_responsible::Relation::Action.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
