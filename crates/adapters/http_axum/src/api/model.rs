//! Wire model exchanged with HTTP clients.

use serde::{Deserialize, Deserializer, Serialize};

use portal_domain::id::UserId;
use portal_domain::user::User;

/// JSON representation of a [`User`].
///
/// Absent or `null` fields decode to their empty value so that required-field
/// checks report them instead of the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserModel {
    #[serde(default, alias = "id", deserialize_with = "null_as_default")]
    pub user_id: i32,
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default, alias = "email", deserialize_with = "null_as_default")]
    pub user_email: String,
    #[serde(default, alias = "band", deserialize_with = "null_as_default")]
    pub user_band: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl From<User> for UserModel {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.get(),
            user_name: user.name,
            user_email: user.email,
            user_band: user.band,
        }
    }
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: UserId::new(model.user_id),
            name: model.user_name,
            email: model.user_email,
            band: model.user_band,
        }
    }
}
