use std::borrow::Cow;
use std::fmt::Display;

/// The error payload all endpoints return.
///
/// `error` is stable and machine readable, the rest is for humans.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorInformation {
    /// A stable identifier for the kind of error
    pub error: Cow<'static, str>,
    /// A human readable message, omitted when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Additional information, when there is any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorInformation {
    pub fn new(error: impl Into<Cow<'static, str>>, message: impl Display) -> Self {
        Self {
            error: error.into(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(self, details: impl Display) -> Self {
        Self {
            details: Some(details.to_string()),
            ..self
        }
    }
}
