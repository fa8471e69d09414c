#[cfg(test)]
mod test;

use crate::{
    action::model::{ActionDetails, CreateActionRequest, UpdateActionRequest},
    Error,
};
use devtrack_common::db::{Database, DatabaseErrors};
use devtrack_entity::{action, action_responsible, deviation, user};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct ActionService {
    db: Database,
}

impl ActionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List the actions of a deviation, ordered by `(order, id)`.
    ///
    /// Returns `Ok(None)` when the deviation does not exist.
    pub async fn fetch_actions<C: ConnectionTrait>(
        &self,
        dev_number: &str,
        connection: &C,
    ) -> Result<Option<Vec<ActionDetails>>, Error> {
        let Some(deviation) = Self::find_deviation(dev_number, connection).await? else {
            return Ok(None);
        };

        let actions = action::Entity::find()
            .filter(action::Column::DeviationId.eq(deviation.id))
            .order_by_asc(action::Column::Order)
            .order_by_asc(action::Column::Id)
            .all(connection)
            .await?;

        Ok(Some(ActionDetails::from_entities(actions, connection).await?))
    }

    /// Create an action under a deviation.
    ///
    /// When the payload carries no explicit order, the action is appended after the currently
    /// highest order of the deviation.
    pub async fn create_action(
        &self,
        dev_number: &str,
        create: CreateActionRequest,
    ) -> Result<Option<ActionDetails>, Error> {
        let Some(deviation) = Self::find_deviation(dev_number, &self.db).await? else {
            return Ok(None);
        };

        let tx = self.db.begin().await?;

        let responsible = Self::validate_users(&create.action_responsible_users, &tx).await?;

        let order = match create.order {
            Some(order) => order,
            None => {
                action::Entity::find()
                    .filter(action::Column::DeviationId.eq(deviation.id))
                    .order_by_desc(action::Column::Order)
                    .one(&tx)
                    .await?
                    .map(|action| action.order)
                    .unwrap_or(0)
                    + 1
            }
        };

        let model = action::ActiveModel {
            deviation_id: Set(deviation.id),
            action_description: Set(create.action_description),
            action_responsible: Set(create.action_responsible),
            action_expiration_date: Set(create.action_expiration_date),
            reminder_sent: Set(false),
            status: Set(create.status),
            order: Set(order),
            ..Default::default()
        };

        let action = model.insert(&tx).await.map_err(order_conflict)?;

        for user_id in responsible {
            action_responsible::ActiveModel {
                action_id: Set(action.id),
                user_id: Set(user_id),
            }
            .insert(&tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(ActionDetails::from_entity(&action, &self.db).await?))
    }

    /// Fetch a single action. The action must belong to the named deviation.
    pub async fn fetch_action<C: ConnectionTrait>(
        &self,
        dev_number: &str,
        action_id: i32,
        connection: &C,
    ) -> Result<Option<ActionDetails>, Error> {
        let Some(action) = Self::find_action(dev_number, action_id, connection).await? else {
            return Ok(None);
        };

        Ok(Some(ActionDetails::from_entity(&action, connection).await?))
    }

    /// Update an action. Fields absent from the payload remain untouched. A responsible user
    /// list, when present, replaces the previously linked set.
    pub async fn update_action(
        &self,
        dev_number: &str,
        action_id: i32,
        update: UpdateActionRequest,
    ) -> Result<Option<ActionDetails>, Error> {
        let Some(current) = Self::find_action(dev_number, action_id, &self.db).await? else {
            return Ok(None);
        };

        let tx = self.db.begin().await?;

        let responsible = match &update.action_responsible_users {
            Some(user_ids) => Some(Self::validate_users(user_ids, &tx).await?),
            None => None,
        };

        let mut model = current.into_active_model();

        if let Some(value) = update.action_description {
            model.action_description = Set(value);
        }
        if let Some(value) = update.action_responsible {
            model.action_responsible = Set(Some(value));
        }
        if let Some(value) = update.action_expiration_date {
            model.action_expiration_date = Set(Some(value));
        }
        if let Some(value) = update.reminder_sent {
            model.reminder_sent = Set(value);
        }
        if let Some(value) = update.status {
            model.status = Set(value);
        }
        if let Some(value) = update.order {
            model.order = Set(value);
        }

        let action = model.update(&tx).await.map_err(order_conflict)?;

        if let Some(user_ids) = responsible {
            action_responsible::Entity::delete_many()
                .filter(action_responsible::Column::ActionId.eq(action.id))
                .exec(&tx)
                .await?;

            for user_id in user_ids {
                action_responsible::ActiveModel {
                    action_id: Set(action.id),
                    user_id: Set(user_id),
                }
                .insert(&tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(ActionDetails::from_entity(&action, &self.db).await?))
    }

    /// Delete an action. The action must belong to the named deviation.
    pub async fn delete_action(&self, dev_number: &str, action_id: i32) -> Result<bool, Error> {
        let Some(deviation) = Self::find_deviation(dev_number, &self.db).await? else {
            return Ok(false);
        };

        let result = action::Entity::delete_many()
            .filter(action::Column::Id.eq(action_id))
            .filter(action::Column::DeviationId.eq(deviation.id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn find_deviation<C: ConnectionTrait>(
        dev_number: &str,
        connection: &C,
    ) -> Result<Option<deviation::Model>, Error> {
        Ok(deviation::Entity::find()
            .filter(deviation::Column::DevNumber.eq(dev_number))
            .one(connection)
            .await?)
    }

    async fn find_action<C: ConnectionTrait>(
        dev_number: &str,
        action_id: i32,
        connection: &C,
    ) -> Result<Option<action::Model>, Error> {
        let Some(deviation) = Self::find_deviation(dev_number, connection).await? else {
            return Ok(None);
        };

        Ok(action::Entity::find_by_id(action_id)
            .filter(action::Column::DeviationId.eq(deviation.id))
            .one(connection)
            .await?)
    }

    /// Resolve the requested responsible user ids. Duplicates are collapsed, unknown ids
    /// reject the request.
    async fn validate_users<C: ConnectionTrait>(
        user_ids: &[i32],
        connection: &C,
    ) -> Result<Vec<i32>, Error> {
        let mut unique = Vec::with_capacity(user_ids.len());
        for id in user_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        let known = user::Entity::find()
            .filter(user::Column::Id.is_in(unique.clone()))
            .all(connection)
            .await?;

        if known.len() != unique.len() {
            return Err(Error::BadRequest(
                "one or more responsible user ids are unknown".into(),
            ));
        }

        Ok(unique)
    }
}

fn order_conflict(err: DbErr) -> Error {
    if err.is_duplicate() {
        Error::BadRequest("order value is already taken within this deviation".into())
    } else {
        err.into()
    }
}
