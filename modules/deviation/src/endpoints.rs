use actix_web::web;
use devtrack_common::db::Database;

pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    config.app_data(web::Data::new(db.clone()));

    crate::deviation::endpoints::configure(config, db.clone());
    crate::action::endpoints::configure(config, db);
}
