//! Terminal front end for the user admin API: the view components, the
//! ureq-backed transport, and the interactive shell that wires them to
//! `user_admin_core`'s controller.

pub mod app;
pub mod transport;
pub mod views;

pub use app::App;
pub use transport::UreqTransport;
