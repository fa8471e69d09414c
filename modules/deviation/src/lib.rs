pub mod action;
pub mod deviation;
pub mod endpoints;
pub mod error;

pub use endpoints::configure;
pub use error::Error;
