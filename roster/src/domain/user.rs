//! [`User`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// User record as held in the canonical collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    /// ID of this [`User`].
    ///
    /// Never changes once assigned.
    pub id: Id,

    /// First [`Name`] of this [`User`].
    pub first_name: Name,

    /// Last [`Name`] of this [`User`].
    pub last_name: Name,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Department`] of this [`User`].
    pub department: Department,
}

impl User {
    /// Creates a new [`User`] with the provided [`Id`] and [`Fields`].
    #[must_use]
    pub fn new(id: Id, fields: Fields) -> Self {
        let Fields {
            first_name,
            last_name,
            email,
            department,
        } = fields;
        Self {
            id,
            first_name,
            last_name,
            email,
            department,
        }
    }

    /// Returns the editable [`Fields`] of this [`User`].
    #[must_use]
    pub fn fields(&self) -> Fields {
        Fields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        }
    }

    /// Replaces the editable [`Fields`] of this [`User`], keeping its [`Id`].
    pub fn apply(&mut self, fields: Fields) {
        let id = self.id;
        *self = Self::new(id, fields);
    }
}

/// Editable fields of a [`User`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Fields {
    /// First [`Name`] of a [`User`].
    pub first_name: Name,

    /// Last [`Name`] of a [`User`].
    pub last_name: Name,

    /// [`Email`] of a [`User`].
    pub email: Email,

    /// [`Department`] of a [`User`].
    pub department: Department,
}

impl Fields {
    /// Returns the full name combined of the first and last [`Name`]s.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(u64);

impl Id {
    /// Returns the [`Id`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Name of a [`User`], possibly empty.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Name(String);

/// Email address of a [`User`], possibly empty.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Email(String);

/// Department a [`User`] belongs to.
#[derive(
    AsRef, Clone, Debug, Display, Eq, From, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Department(String);

impl Department {
    /// Name of the [`Department`] used when none is known.
    pub const GENERAL: &'static str = "General";
}

impl Default for Department {
    fn default() -> Self {
        Self(Self::GENERAL.to_owned())
    }
}

#[cfg(test)]
mod spec {
    use super::{Department, Fields, Id, User};

    fn fields(first: &str, last: &str) -> Fields {
        Fields {
            first_name: first.into(),
            last_name: last.into(),
            email: "a@b.com".into(),
            department: "Eng".into(),
        }
    }

    #[test]
    fn full_name() {
        assert_eq!(fields("Ann", "Lee").full_name(), "Ann Lee");
        assert_eq!(fields("Ann", "").full_name(), "Ann");
        assert_eq!(fields("", "Lee").full_name(), "Lee");
        assert_eq!(fields("", "").full_name(), "");
    }

    #[test]
    fn apply_keeps_id() {
        let mut user = User::new(Id::from(7), fields("Ann", "Lee"));
        user.apply(fields("Bob", "Ray"));

        assert_eq!(user.id, Id::from(7));
        assert_eq!(user.fields(), fields("Bob", "Ray"));
    }

    #[test]
    fn department_defaults_to_general() {
        assert_eq!(Department::default().as_ref(), "General");
    }

    #[test]
    fn id_is_displayed_as_decimal() {
        assert_eq!(Id::from(42).to_string(), "42");
        assert_eq!(Id::from(41).next(), Id::from(42));
        assert_eq!("42".parse::<Id>(), Ok(Id::from(42)));
        assert!("user".parse::<Id>().is_err());
    }
}
