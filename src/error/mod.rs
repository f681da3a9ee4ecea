//! The unified error handling system for the application.

use std::fmt::Display;

pub use types::AdminError;

/// A unified `Result` type for the entire application.
pub type Result<T> = std::result::Result<T, AdminError>;

pub mod types;

/// Context Trait for adding context to errors.
pub trait Context<T, E> {
    /// Wraps the error as an internal error carrying `context`.
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display;

    /// Lazily built variant of [`Context::context`].
    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: Into<AdminError>,
{
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display,
    {
        self.with_context(|| context)
    }

    #[track_caller]
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|error| {
            let error: AdminError = error.into();
            AdminError::internal_with_source(context().to_string(), error)
        })
    }
}
