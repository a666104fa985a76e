//! View components: stateless renderers of controller state plus the
//! intent types they emit. Views never call the controller — the shell
//! applies each [`Intent`] for them.

pub mod card;
pub mod form;
pub mod pagination;
pub mod spinner;

use user_admin_core::{CreateUserRequest, UpdateUserRequest, User};

/// A user action emitted by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Edit(User),
    Delete(String),
    Submit(FormSubmit),
    ChangePage(u32),
    Refresh,
}

/// A validated form submission, statically discriminated by the presence
/// of the edited record's id.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmit {
    Create(CreateUserRequest),
    Update { id: String, payload: UpdateUserRequest },
}
