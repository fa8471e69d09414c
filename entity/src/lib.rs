pub mod user;

pub mod deviation;

pub mod action;
pub mod action_responsible;
