/// State management module
///
/// This module handles all application state, including:
/// - The project data model and its JSON layout (data.rs)
/// - The SQLite-backed storage slot (store.rs)
/// - The in-memory project repository (repository.rs)
/// - Filters and counters derived from the list (derive.rs)
/// - The create/edit form and its validation (form.rs)

pub mod data;
pub mod derive;
pub mod form;
pub mod repository;
pub mod store;
