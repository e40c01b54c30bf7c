use crate::form::FormField;
use crate::router::ViewKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] directory_store::StoreError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Cannot {action} from the {from} view")]
    InvalidTransition {
        from: ViewKind,
        action: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(FormField),

    #[error("{field} is limited to {max} characters (got {actual})")]
    TooLong {
        field: FormField,
        max: usize,
        actual: usize,
    },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    UnknownOption(#[from] directory_model::ModelError),
}
