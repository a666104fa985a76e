//! Create/edit form: a field buffer that validates required-field
//! presence before producing a submission.
//!
//! The submission is the statically discriminated [`FormSubmit`] union —
//! the presence of the record being edited selects the update path, so a
//! create payload can never be sent down the update route or vice versa.

use thiserror::Error;
use user_admin_core::{CreateUserRequest, UpdateUserRequest, User};

use super::FormSubmit;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("age must be a non-negative whole number, got {0:?}")]
    InvalidAge(String),
}

/// Field buffer for the user form. All fields are edited as text; `submit`
/// validates and converts them.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub age: String,
    editing: Option<User>,
}

impl UserForm {
    /// Empty form for creating a new user.
    pub fn create() -> Self {
        Self::default()
    }

    /// Form prefilled from the record being edited.
    pub fn edit(user: User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.map(|a| a.to_string()).unwrap_or_default(),
            editing: Some(user),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit User"
        } else {
            "Create New User"
        }
    }

    /// Validate the buffer and produce the submission payload.
    pub fn submit(&self) -> Result<FormSubmit, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::MissingField("email"));
        }
        let age = match self.age.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u32>()
                    .map_err(|_| FormError::InvalidAge(raw.to_string()))?,
            ),
        };

        Ok(match &self.editing {
            Some(user) => FormSubmit::Update {
                id: user.id.clone(),
                payload: UpdateUserRequest {
                    name: Some(name.to_string()),
                    email: Some(email.to_string()),
                    age,
                },
            },
            None => FormSubmit::Create(CreateUserRequest {
                name: name.to_string(),
                email: email.to_string(),
                age,
            }),
        })
    }
}
