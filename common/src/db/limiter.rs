use crate::model::Paginated;
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, Paginator, PaginatorTrait, QuerySelect,
    Select, SelectModel, Selector, SelectorTrait,
};
use std::num::NonZeroU64;

/// A limited window over a select, plus the total count of the unlimited query.
pub struct Limiter<'db, C, S>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    db: &'db C,
    selector: Selector<S>,
    paginator: Paginator<'db, C, S>,
}

impl<'db, C, S> Limiter<'db, C, S>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    pub async fn fetch(self) -> Result<Vec<S::Item>, DbErr> {
        self.selector.all(self.db).await
    }

    pub async fn total(&self) -> Result<u64, DbErr> {
        self.paginator.num_items().await
    }
}

pub trait LimiterTrait<'db, C>
where
    C: ConnectionTrait,
{
    type Selector: SelectorTrait + 'db;

    /// Apply offset and limit to the query. A limit of zero means no limit.
    fn limiting(self, db: &'db C, paginated: &Paginated) -> Limiter<'db, C, Self::Selector>;
}

impl<'db, C, E, M> LimiterTrait<'db, C> for Select<E>
where
    C: ConnectionTrait,
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'db,
{
    type Selector = SelectModel<M>;

    fn limiting(self, db: &'db C, paginated: &Paginated) -> Limiter<'db, C, Self::Selector> {
        let selector = self
            .clone()
            .offset(NonZeroU64::new(paginated.offset).map(NonZeroU64::get))
            .limit(NonZeroU64::new(paginated.limit).map(NonZeroU64::get))
            .into_model();

        Limiter {
            db,
            paginator: self.paginate(db, 1),
            selector,
        }
    }
}
