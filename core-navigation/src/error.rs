use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    /// `select_item` was called while the machine is at the root; a
    /// category must be selected first.
    #[error("No category selected")]
    NoCategorySelected,
}

pub type Result<T> = std::result::Result<T, NavigationError>;
