use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// A quality deviation, uniquely identified by its business key `dev_number`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "deviation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub primary_column: Option<String>,
    pub year: Option<i32>,
    #[sea_orm(unique, indexed)]
    pub dev_number: String,
    /// Free-form creator name, as found in imported sheets
    pub created_by: Option<String>,
    /// The user who created the record through the API
    pub created_by_user_id: Option<i32>,

    pub owner_plant: Option<String>,
    pub affected_plant: Option<String>,
    pub sbu: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub effectivity_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub drawing_number: Option<String>,
    pub back_to_back_deviation: bool,
    pub defect_category: Option<String>,
    pub assembly_defect_type: Option<String>,
    pub molding_defect_type: Option<String>,
    /// Path of the attached document, relative to the attachment directory
    pub attachment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::action::Entity")]
    Action,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedByUserId",
        to = "super::user::Column::Id"
    )]
    CreatedByUser,
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Action.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedByUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
