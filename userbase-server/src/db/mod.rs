//! Database access: pool construction, schema ensure, and the user repository

pub mod pool;
pub mod schema;
pub mod users;

pub use pool::create_pool;
pub use users::{DbError, ListWindow, NewUser, User, UserRepo};
