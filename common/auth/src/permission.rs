use crate::{
    authenticator::user::UserInformation,
    authorizer::{Authorizer, Requirement, RequirementError},
};
use strum::ParseError;

/// The permissions checked by the endpoints.
///
/// The wire form is `verb.resource`, which is also what token scopes carry.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Debug,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(into = "String", try_from = "String")]
pub enum Permission {
    #[strum(serialize = "create.deviation")]
    CreateDeviation,
    #[strum(serialize = "read.deviation")]
    ReadDeviation,
    #[strum(serialize = "update.deviation")]
    UpdateDeviation,
    #[strum(serialize = "delete.deviation")]
    DeleteDeviation,

    #[strum(serialize = "read.user")]
    ReadUser,
}

impl TryFrom<String> for Permission {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().try_into()
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.to_string()
    }
}

// Marker types for `Require<_>`, one per permission.
macro_rules! requirement {
    ($($permission:ident),* $(,)?) => {
        $(
            pub struct $permission;

            impl Requirement for $permission {
                fn enforce(
                    authorizer: &Authorizer,
                    user: &UserInformation,
                ) -> Result<(), RequirementError> {
                    Ok(authorizer.require(user, Permission::$permission)?)
                }
            }
        )*
    };
}

requirement!(
    CreateDeviation,
    ReadDeviation,
    UpdateDeviation,
    DeleteDeviation,
    ReadUser,
);
