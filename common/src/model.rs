use utoipa::{IntoParams, ToSchema};

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    IntoParams,
    ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Paginated {
    /// The first item to return, skipping all that come before it.
    ///
    /// NOTE: The order of items is defined by the API being called.
    #[serde(default)]
    pub offset: u64,

    /// The maximum number of entries to return.
    ///
    /// Zero means: no limit
    #[serde(default)]
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, ToSchema)]
pub struct PaginatedResults<R> {
    pub items: Vec<R>,
    pub total: u64,
}
