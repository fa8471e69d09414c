use crate::Error;
use devtrack_entity::{action, action::ActionStatus, action_responsible, user};
use sea_orm::{ConnectionTrait, LoaderTrait, ModelTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionHead {
    pub id: i32,

    /// Id of the deviation this action belongs to.
    pub deviation: i32,

    pub action_description: String,

    #[schema(required)]
    pub action_responsible: Option<String>,

    #[schema(required)]
    pub action_expiration_date: Option<chrono::NaiveDate>,

    pub reminder_sent: bool,

    pub status: ActionStatus,

    /// Position of this action within its deviation, starting at 1.
    pub order: i32,
}

impl ActionHead {
    pub fn from_entity(action: &action::Model) -> Self {
        Self {
            id: action.id,
            deviation: action.deviation_id,
            action_description: action.action_description.clone(),
            action_responsible: action.action_responsible.clone(),
            action_expiration_date: action.action_expiration_date,
            reminder_sent: action.reminder_sent,
            status: action.status,
            order: action.order,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionDetails {
    #[serde(flatten)]
    pub head: ActionHead,

    /// Display names of the users responsible for this action.
    pub action_responsible_users: Vec<String>,
}

impl ActionDetails {
    pub async fn from_entity<C: ConnectionTrait>(
        action: &action::Model,
        connection: &C,
    ) -> Result<Self, Error> {
        let users = action.find_related(user::Entity).all(connection).await?;

        Ok(Self {
            head: ActionHead::from_entity(action),
            action_responsible_users: users.iter().map(|user| user.display_name()).collect(),
        })
    }

    pub async fn from_entities<C: ConnectionTrait>(
        actions: Vec<action::Model>,
        connection: &C,
    ) -> Result<Vec<Self>, Error> {
        let responsible = actions
            .load_many_to_many(user::Entity, action_responsible::Entity, connection)
            .await?;

        Ok(actions
            .iter()
            .zip(responsible)
            .map(|(action, users)| Self {
                head: ActionHead::from_entity(action),
                action_responsible_users: users.iter().map(|user| user.display_name()).collect(),
            })
            .collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateActionRequest {
    pub action_description: String,

    #[serde(default)]
    pub action_responsible: Option<String>,

    #[serde(default)]
    pub action_expiration_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub status: ActionStatus,

    /// Explicit position for the new action. When absent, the action is
    /// appended after the currently highest order.
    #[serde(default)]
    pub order: Option<i32>,

    /// User ids to link as responsible for this action.
    #[serde(default)]
    pub action_responsible_users: Vec<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateActionRequest {
    #[serde(default)]
    pub action_description: Option<String>,

    #[serde(default)]
    pub action_responsible: Option<String>,

    #[serde(default)]
    pub action_expiration_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub reminder_sent: Option<bool>,

    #[serde(default)]
    pub status: Option<ActionStatus>,

    #[serde(default)]
    pub order: Option<i32>,

    /// When present, replaces the full set of responsible users.
    #[serde(default)]
    pub action_responsible_users: Option<Vec<i32>>,
}
