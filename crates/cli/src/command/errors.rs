use directory_app::{AppError, FormError, SAVE_ERROR_MESSAGE};
use directory_search::SearchError;
use directory_store::StoreError;

#[derive(Debug)]
pub struct ErrorClassification {
    pub code: &'static str,
    pub hint: Option<String>,
}

/// Missing company; raised by `get`
#[derive(Debug)]
pub struct NotFound(pub String);

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No company with id {:?}", self.0)
    }
}

impl std::error::Error for NotFound {}

/// Pick an error code and a hint for a failed action
pub fn classify_error(err: &anyhow::Error) -> ErrorClassification {
    if err.downcast_ref::<NotFound>().is_some() {
        return ErrorClassification {
            code: "not_found",
            hint: Some("Use action=list to see the ids currently in the directory.".to_string()),
        };
    }

    if let Some(form) = err.downcast_ref::<FormError>() {
        return invalid_input(form);
    }
    if let Some(AppError::Form(form)) = err.downcast_ref::<AppError>() {
        return invalid_input(form);
    }

    if err.downcast_ref::<SearchError>().is_some() {
        return ErrorClassification {
            code: "invalid_input",
            hint: Some("Use action=catalog for the accepted sector labels, or \"All\".".to_string()),
        };
    }

    match err.downcast_ref::<StoreError>() {
        Some(StoreError::DuplicateId(_)) => ErrorClassification {
            code: "conflict",
            hint: Some("Submit again; a fresh id is generated for every submission.".to_string()),
        },
        Some(_) => ErrorClassification {
            code: "store_error",
            hint: Some(
                "The external store rejected the request; check its URL, key and table."
                    .to_string(),
            ),
        },
        None if err.to_string().starts_with("Invalid payload") => ErrorClassification {
            code: "invalid_request",
            hint: Some("Verify the payload matches the Command API schema.".to_string()),
        },
        None => ErrorClassification {
            code: "internal",
            hint: None,
        },
    }
}

fn invalid_input(err: &FormError) -> ErrorClassification {
    let hint = match err {
        FormError::UnknownOption(_) => {
            "Use action=catalog for the accepted sector, size and type labels."
        }
        FormError::Required(_) => "name, fullDescription and email are required.",
        _ => "Fix the field and submit again.",
    };
    ErrorClassification {
        code: "invalid_input",
        hint: Some(hint.to_string()),
    }
}

/// What a user is told when a save fails
pub fn save_failure(err: StoreError) -> anyhow::Error {
    log::error!("Saving company failed: {err}");
    anyhow::Error::new(err).context(SAVE_ERROR_MESSAGE)
}
