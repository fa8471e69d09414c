use super::DeviationSummary;
use crate::{action::model::ActionDetails, Error};
use devtrack_entity::{action, deviation};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviationDetails {
    #[serde(flatten)]
    pub summary: DeviationSummary,

    /// All actions of this deviation, ordered by their `order` field.
    pub actions: Vec<ActionDetails>,
}

impl DeviationDetails {
    pub async fn from_entity<C: ConnectionTrait>(
        deviation: &deviation::Model,
        today: chrono::NaiveDate,
        connection: &C,
    ) -> Result<Self, Error> {
        let actions = action::Entity::find()
            .filter(action::Column::DeviationId.eq(deviation.id))
            .order_by_asc(action::Column::Order)
            .order_by_asc(action::Column::Id)
            .all(connection)
            .await?;

        let statuses = actions
            .iter()
            .map(|action| action.status)
            .collect::<Vec<_>>();

        Ok(Self {
            summary: DeviationSummary::from_entity(deviation, &statuses, today),
            actions: ActionDetails::from_entities(actions, connection).await?,
        })
    }
}
