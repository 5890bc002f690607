//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Model error: {0}")]
    Model(#[from] pagesmith_model::ModelError),

    #[error("No page selected")]
    NoPageSelected,

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Please select a Column or Section to add this widget into.")]
    NoContainerSelected,

    #[error("Add a Section first.")]
    NoSections,

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("Page {0} is a system page owned by the host application")]
    SystemPage(String),

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
}
