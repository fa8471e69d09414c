use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, indexed)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

impl Model {
    /// The name shown for this user, falling back to the username.
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deviation::Entity")]
    Deviation,
}

impl Related<super::deviation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deviation.def()
    }
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        super::action_responsible::Relation::Action.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::action_responsible::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod test {
    use super::*;

    fn user(username: &str, first: &str, last: &str) -> Model {
        Model {
            id: 1,
            username: username.into(),
            first_name: first.into(),
            last_name: last.into(),
            email: String::new(),
            password_hash: String::new(),
            is_active: true,
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(user("jdoe", "Jane", "Doe").display_name(), "Jane Doe");
    }

    #[test]
    fn display_name_handles_partial_names() {
        assert_eq!(user("jdoe", "Jane", "").display_name(), "Jane");
        assert_eq!(user("jdoe", "", "Doe").display_name(), "Doe");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(user("jdoe", "", "").display_name(), "jdoe");
    }
}
