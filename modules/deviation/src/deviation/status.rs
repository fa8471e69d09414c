use chrono::NaiveDate;
use devtrack_entity::action::ActionStatus;

/// The rollup status of a deviation.
///
/// Derived from its actions and its expiration date on every read, never stored.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
pub enum DeviationStatus {
    #[strum(serialize = "Not Started")]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[strum(serialize = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[strum(serialize = "Done")]
    Done,
    Delayed,
}

/// Derive the rollup status from the action statuses and the expiration date.
///
/// A deviation with all actions done is "Done", and stays "Done" past its expiration date. In
/// every other case a passed expiration date turns the status into "Delayed".
pub fn deviation_status(
    expiration_date: Option<NaiveDate>,
    statuses: &[ActionStatus],
    today: NaiveDate,
) -> DeviationStatus {
    let expired = expiration_date.map(|date| date < today).unwrap_or(false);

    if statuses.is_empty() {
        return if expired {
            DeviationStatus::Delayed
        } else {
            DeviationStatus::NotStarted
        };
    }

    if statuses.iter().all(|status| *status == ActionStatus::Done) {
        return DeviationStatus::Done;
    }

    if expired {
        return DeviationStatus::Delayed;
    }

    if statuses
        .iter()
        .any(|status| *status == ActionStatus::InProgress)
    {
        DeviationStatus::InProgress
    } else if statuses
        .iter()
        .all(|status| *status == ActionStatus::NotStarted)
    {
        DeviationStatus::NotStarted
    } else {
        // a mix of done and not started counts as progress
        DeviationStatus::InProgress
    }
}

/// The percentage of done actions, rounded. Zero for a deviation without actions.
pub fn completion_percentage(statuses: &[ActionStatus]) -> u32 {
    if statuses.is_empty() {
        return 0;
    }

    let done = statuses
        .iter()
        .filter(|status| **status == ActionStatus::Done)
        .count();

    ((done as f64 / statuses.len() as f64) * 100.0).round() as u32
}
