mod errors;
mod services;

pub use directory_protocol::{CommandRequest, CommandResponse};
pub use errors::{classify_error, save_failure};
pub use services::{catalog, form_from_payload, meta_for};

use directory_store::DirectoryStore;
use services::Services;
use std::time::Instant;

/// Executes Command API requests against one shared directory
pub struct CommandHandler {
    services: Services,
}

impl CommandHandler {
    pub fn new(store: DirectoryStore) -> Self {
        Self {
            services: Services::new(store),
        }
    }

    pub async fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let CommandRequest { action, payload } = request;
        log::debug!("Command {}", action.as_str());

        match self.services.route(action, payload).await {
            Ok(outcome) => {
                let mut meta = outcome.meta;
                meta.duration_ms = Some(started.elapsed().as_millis() as u64);
                CommandResponse::ok(outcome.data, meta)
            }
            Err(err) => {
                let classification = classify_error(&err);
                log::warn!("Command {} failed: {err:#}", action.as_str());

                let mut response =
                    CommandResponse::error(classification.code, err.to_string(), classification.hint);
                let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
                if let Some(error) = response.error.as_mut().filter(|_| !causes.is_empty()) {
                    error.details = Some(serde_json::json!({ "causes": causes }));
                }
                response.meta.duration_ms = Some(started.elapsed().as_millis() as u64);
                response
            }
        }
    }
}
