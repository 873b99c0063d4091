//! User form definitions: its lifecycle and validation of the entered values.
//!
//! The [`Controller`] never validates [`user::Fields`] itself, so a [`Draft`]
//! must be validated before being submitted.
//!
//! [`Controller`]: crate::Controller

use std::sync::LazyLock;

use derive_more::Display;
use regex::Regex;

use crate::domain::user;

/// State of the user form.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Form {
    /// Form is not displayed.
    #[default]
    Closed,

    /// Form is open for creating a new user.
    Create,

    /// Form is open for editing the user with the provided [`user::Id`].
    Edit(user::Id),
}

impl Form {
    /// Indicates whether this [`Form`] is displayed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Values entered into the user form, not validated yet.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Entered first name.
    pub first_name: String,

    /// Entered last name.
    pub last_name: String,

    /// Entered email address.
    pub email: String,

    /// Entered department.
    pub department: String,
}

impl From<user::Fields> for Draft {
    fn from(fields: user::Fields) -> Self {
        Self {
            first_name: fields.first_name.into(),
            last_name: fields.last_name.into(),
            email: fields.email.into(),
            department: fields.department.into(),
        }
    }
}

impl Draft {
    /// Validates this [`Draft`], converting it into [`user::Fields`].
    ///
    /// # Errors
    ///
    /// With every [`Invalid`] value found, in the order of the form fields.
    pub fn validate(self) -> Result<user::Fields, Vec<Invalid>> {
        /// Regular expression checking email format.
        static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push(Invalid::FirstNameRequired);
        }
        if self.last_name.trim().is_empty() {
            errors.push(Invalid::LastNameRequired);
        }
        if self.email.trim().is_empty() {
            errors.push(Invalid::EmailRequired);
        } else if !EMAIL.is_match(&self.email) {
            errors.push(Invalid::EmailMalformed);
        }
        if self.department.trim().is_empty() {
            errors.push(Invalid::DepartmentRequired);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let Self {
            first_name,
            last_name,
            email,
            department,
        } = self;
        Ok(user::Fields {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            department: department.into(),
        })
    }
}

/// Invalid value of a [`Draft`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Invalid {
    /// First name is blank.
    #[display("First name is required")]
    FirstNameRequired,

    /// Last name is blank.
    #[display("Last name is required")]
    LastNameRequired,

    /// Email is blank.
    #[display("Email is required")]
    EmailRequired,

    /// Email doesn't look like an email address.
    #[display("Invalid email")]
    EmailMalformed,

    /// Department is blank.
    #[display("Department is required")]
    DepartmentRequired,
}
