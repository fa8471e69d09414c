pub mod attachments;
pub mod service;
pub mod sheet;

pub use attachments::LinkAttachments;
pub use service::ImportDeviations;
