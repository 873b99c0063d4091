//! Raw record shapes exchanged with the [`Remote`] record service, and their
//! normalization into [`domain::User`]s.
//!
//! [`Remote`]: super::Remote

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::domain::{self, user};

/// User record as returned by the [`Remote`] record service.
///
/// Every field is optional: absent or malformed values are read as [`None`]
/// instead of failing the whole record.
///
/// [`Remote`]: super::Remote
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    /// ID of this [`User`].
    #[serde(
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<u64>,

    /// Full name of this [`User`].
    #[serde(
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Email address of this [`User`].
    #[serde(
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    /// [`Company`] this [`User`] works at.
    #[serde(
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<Company>,
}

/// Organization a [`User`] belongs to.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Company {
    /// Name of this [`Company`].
    #[serde(
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl User {
    /// Returns the [`user::Id`] of this [`User`], if it has any.
    #[must_use]
    pub fn id(&self) -> Option<user::Id> {
        self.id.map(user::Id::from)
    }

    /// Normalizes this [`User`] into a [`domain::User`], using the provided
    /// `fallback` [`user::Id`] if this [`User`] has none.
    ///
    /// The full name is split on its first space into the first name and the
    /// remaining last name. Missing email becomes empty, and missing company
    /// becomes the [`user::Department::GENERAL`] one.
    #[must_use]
    pub fn normalize(self, fallback: user::Id) -> domain::User {
        let Self {
            id,
            name,
            email,
            company,
        } = self;

        let name = name.unwrap_or_default();
        let (first_name, last_name) =
            name.split_once(' ').unwrap_or((name.as_str(), ""));

        domain::User::new(
            id.map_or(fallback, user::Id::from),
            user::Fields {
                first_name: first_name.into(),
                last_name: last_name.into(),
                email: email.unwrap_or_default().into(),
                department: company
                    .and_then(|c| c.name)
                    .map(user::Department::from)
                    .unwrap_or_default(),
            },
        )
    }
}

/// Body of a request creating or updating a [`User`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Payload {
    /// ID of the updated [`User`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Full name of the [`User`].
    pub name: String,

    /// Email address of the [`User`].
    pub email: String,

    /// [`Company`] of the [`User`].
    pub company: Company,
}

impl Payload {
    /// Creates a new [`Payload`] out of the provided [`user::Fields`].
    #[must_use]
    pub fn new(id: Option<user::Id>, fields: &user::Fields) -> Self {
        Self {
            id: id.map(Into::into),
            name: fields.full_name(),
            email: fields.email.to_string(),
            company: Company {
                name: Some(fields.department.to_string()),
            },
        }
    }
}

/// Deserializes a value, falling back to [`None`] if it's malformed.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    /// Either a well-formed value or anything else.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        /// Well-formed value.
        Valid(T),

        /// Malformed value.
        Malformed(IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(v) => Some(v),
        Lenient::Malformed(_) => None,
    })
}
