
use crate::{
    deviation::model::{
        CreateDeviationRequest, DeviationDetails, DeviationSummary, ReorderEntry,
        UpdateDeviationRequest,
    },
    Error,
};
use devtrack_common::{
    db::{limiter::LimiterTrait, Database, DatabaseErrors},
    model::{Paginated, PaginatedResults},
};
use devtrack_entity::{action, action_responsible, deviation, user};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use sea_query::Expr;

pub struct DeviationService {
    db: Database,
}

impl DeviationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List deviations, ordered by their `dev_number`.
    ///
    /// When `mine_for` carries a username, the result is restricted to deviations created by
    /// that user or having the user among the responsible users of any action.
    pub async fn fetch_deviations<C: ConnectionTrait>(
        &self,
        mine_for: Option<&str>,
        paginated: Paginated,
        connection: &C,
    ) -> Result<PaginatedResults<DeviationSummary>, Error> {
        let mut query = deviation::Entity::find().order_by_asc(deviation::Column::DevNumber);

        if let Some(username) = mine_for {
            let Some(user) = user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(connection)
                .await?
            else {
                return Ok(PaginatedResults {
                    items: vec![],
                    total: 0,
                });
            };

            let action_ids = action_responsible::Entity::find()
                .filter(action_responsible::Column::UserId.eq(user.id))
                .all(connection)
                .await?
                .into_iter()
                .map(|link| link.action_id)
                .collect::<Vec<_>>();

            let responsible_on = action::Entity::find()
                .filter(action::Column::Id.is_in(action_ids))
                .all(connection)
                .await?
                .into_iter()
                .map(|action| action.deviation_id)
                .collect::<Vec<_>>();

            query = query.filter(
                Condition::any()
                    .add(deviation::Column::CreatedByUserId.eq(user.id))
                    .add(deviation::Column::Id.is_in(responsible_on)),
            );
        }

        let limiter = query.limiting(connection, &paginated);

        let total = limiter.total().await?;
        let deviations = limiter.fetch().await?;

        Ok(PaginatedResults {
            total,
            items: DeviationSummary::from_entities(
                deviations,
                chrono::Local::now().date_naive(),
                connection,
            )
            .await?,
        })
    }

    /// Create a new deviation.
    ///
    /// When the payload does not name a creating user, the authenticated caller is recorded,
    /// if one is known.
    pub async fn create_deviation(
        &self,
        create: CreateDeviationRequest,
        caller: Option<&str>,
    ) -> Result<DeviationDetails, Error> {
        let created_by_user_id = match create.created_by_user {
            Some(id) => {
                if user::Entity::find_by_id(id).one(&self.db).await?.is_none() {
                    return Err(Error::BadRequest(format!("unknown user id {id}")));
                }
                Some(id)
            }
            None => match caller {
                Some(username) => user::Entity::find()
                    .filter(user::Column::Username.eq(username))
                    .one(&self.db)
                    .await?
                    .map(|user| user.id),
                None => None,
            },
        };

        let model = deviation::ActiveModel {
            dev_number: Set(create.dev_number.clone()),
            primary_column: Set(create.primary_column),
            year: Set(create.year),
            created_by: Set(create.created_by),
            created_by_user_id: Set(created_by_user_id),
            owner_plant: Set(create.owner_plant),
            affected_plant: Set(create.affected_plant),
            sbu: Set(create.sbu),
            release_date: Set(create.release_date),
            effectivity_date: Set(create.effectivity_date),
            expiration_date: Set(create.expiration_date),
            drawing_number: Set(create.drawing_number),
            back_to_back_deviation: Set(create.back_to_back_deviation),
            defect_category: Set(create.defect_category),
            assembly_defect_type: Set(create.assembly_defect_type),
            molding_defect_type: Set(create.molding_defect_type),
            attachment: Set(create.attachment),
            ..Default::default()
        };

        let deviation = match model.insert(&self.db).await {
            Ok(deviation) => deviation,
            Err(err) if err.is_duplicate() => {
                return Err(Error::BadRequest(format!(
                    "deviation {} already exists",
                    create.dev_number
                )))
            }
            Err(err) => return Err(err.into()),
        };

        DeviationDetails::from_entity(&deviation, chrono::Local::now().date_naive(), &self.db)
            .await
    }

    pub async fn fetch_deviation<C: ConnectionTrait>(
        &self,
        dev_number: &str,
        connection: &C,
    ) -> Result<Option<DeviationDetails>, Error> {
        match deviation::Entity::find()
            .filter(deviation::Column::DevNumber.eq(dev_number))
            .one(connection)
            .await?
        {
            Some(deviation) => Ok(Some(
                DeviationDetails::from_entity(
                    &deviation,
                    chrono::Local::now().date_naive(),
                    connection,
                )
                .await?,
            )),
            None => Ok(None),
        }
    }

    /// Update a deviation. Fields absent from the payload remain untouched.
    pub async fn update_deviation(
        &self,
        dev_number: &str,
        update: UpdateDeviationRequest,
    ) -> Result<Option<DeviationDetails>, Error> {
        let Some(current) = deviation::Entity::find()
            .filter(deviation::Column::DevNumber.eq(dev_number))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if let Some(requested) = &update.dev_number {
            if requested != &current.dev_number {
                return Err(Error::BadRequest("dev_number cannot be changed".into()));
            }
        }

        if let Some(id) = update.created_by_user {
            if user::Entity::find_by_id(id).one(&self.db).await?.is_none() {
                return Err(Error::BadRequest(format!("unknown user id {id}")));
            }
        }

        let mut model = current.into_active_model();

        if let Some(value) = update.primary_column {
            model.primary_column = Set(Some(value));
        }
        if let Some(value) = update.year {
            model.year = Set(Some(value));
        }
        if let Some(value) = update.created_by {
            model.created_by = Set(Some(value));
        }
        if let Some(value) = update.created_by_user {
            model.created_by_user_id = Set(Some(value));
        }
        if let Some(value) = update.owner_plant {
            model.owner_plant = Set(Some(value));
        }
        if let Some(value) = update.affected_plant {
            model.affected_plant = Set(Some(value));
        }
        if let Some(value) = update.sbu {
            model.sbu = Set(Some(value));
        }
        if let Some(value) = update.release_date {
            model.release_date = Set(Some(value));
        }
        if let Some(value) = update.effectivity_date {
            model.effectivity_date = Set(Some(value));
        }
        if let Some(value) = update.expiration_date {
            model.expiration_date = Set(Some(value));
        }
        if let Some(value) = update.drawing_number {
            model.drawing_number = Set(Some(value));
        }
        if let Some(value) = update.back_to_back_deviation {
            model.back_to_back_deviation = Set(value);
        }
        if let Some(value) = update.defect_category {
            model.defect_category = Set(Some(value));
        }
        if let Some(value) = update.assembly_defect_type {
            model.assembly_defect_type = Set(Some(value));
        }
        if let Some(value) = update.molding_defect_type {
            model.molding_defect_type = Set(Some(value));
        }
        if let Some(value) = update.attachment {
            model.attachment = Set(Some(value));
        }

        let deviation = model.update(&self.db).await?;

        Ok(Some(
            DeviationDetails::from_entity(&deviation, chrono::Local::now().date_naive(), &self.db)
                .await?,
        ))
    }

    /// Delete a deviation and, through the database, all of its actions.
    pub async fn delete_deviation(&self, dev_number: &str) -> Result<bool, Error> {
        let result = deviation::Entity::delete_many()
            .filter(deviation::Column::DevNumber.eq(dev_number))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Apply a new ordering to a subset of a deviation's actions.
    ///
    /// Validates that every referenced action belongs to the deviation before any write. The
    /// covered actions are first parked above every live order value, so that the final
    /// assignments cannot transiently collide with the order values they vacate.
    pub async fn reorder_actions(
        &self,
        dev_number: &str,
        entries: &[ReorderEntry],
    ) -> Result<Option<DeviationDetails>, Error> {
        let Some(deviation) = deviation::Entity::find()
            .filter(deviation::Column::DevNumber.eq(dev_number))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let tx = self.db.begin().await?;

        let ids = entries.iter().map(|entry| entry.id).collect::<Vec<_>>();
        let covered = action::Entity::find()
            .filter(action::Column::DeviationId.eq(deviation.id))
            .filter(action::Column::Id.is_in(ids))
            .all(&tx)
            .await?;

        if covered.len() != entries.len() {
            return Err(Error::BadRequest(
                "One or more actions not found or do not belong to this deviation".into(),
            ));
        }

        let max_order = action::Entity::find()
            .filter(action::Column::DeviationId.eq(deviation.id))
            .order_by_desc(action::Column::Order)
            .one(&tx)
            .await?
            .map(|action| action.order)
            .unwrap_or(0);

        let temp_offset = max_order + 1000;

        for action in &covered {
            let mut active = action.clone().into_active_model();
            active.order = Set(temp_offset + action.order);
            active.update(&tx).await?;
        }

        for entry in entries {
            action::Entity::update_many()
                .col_expr(action::Column::Order, Expr::value(entry.order))
                .filter(action::Column::Id.eq(entry.id))
                .exec(&tx)
                .await
                .map_err(|err| {
                    if err.is_duplicate() {
                        Error::BadRequest(
                            "order values conflict with other actions of this deviation".into(),
                        )
                    } else {
                        err.into()
                    }
                })?;
        }

        tx.commit().await?;

        Ok(Some(
            DeviationDetails::from_entity(&deviation, chrono::Local::now().date_naive(), &self.db)
                .await?,
        ))
    }
}
