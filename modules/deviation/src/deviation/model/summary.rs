use super::DeviationHead;
use crate::{
    deviation::status::{completion_percentage, deviation_status, DeviationStatus},
    Error,
};
use devtrack_entity::{action, action::ActionStatus, deviation};
use sea_orm::{ConnectionTrait, LoaderTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeviationSummary {
    #[serde(flatten)]
    pub head: DeviationHead,

    /// Status derived from the statuses of all actions and the expiration date.
    pub deviation_status: DeviationStatus,

    /// Rounded percentage of actions which are done.
    pub completion_percentage: u32,
}

impl DeviationSummary {
    pub fn from_entity(
        deviation: &deviation::Model,
        statuses: &[ActionStatus],
        today: chrono::NaiveDate,
    ) -> Self {
        Self {
            head: DeviationHead::from_entity(deviation),
            deviation_status: deviation_status(deviation.expiration_date, statuses, today),
            completion_percentage: completion_percentage(statuses),
        }
    }

    pub async fn from_entities<C: ConnectionTrait>(
        deviations: Vec<deviation::Model>,
        today: chrono::NaiveDate,
        connection: &C,
    ) -> Result<Vec<Self>, Error> {
        let actions = deviations.load_many(action::Entity, connection).await?;

        Ok(deviations
            .iter()
            .zip(actions)
            .map(|(deviation, actions)| {
                let statuses = actions
                    .iter()
                    .map(|action| action.status)
                    .collect::<Vec<_>>();
                Self::from_entity(deviation, &statuses, today)
            })
            .collect())
    }
}
