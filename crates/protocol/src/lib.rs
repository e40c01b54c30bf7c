use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const COMMAND_API_VERSION: u32 = 1;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    /// Filtered listing
    List,
    /// One company by id
    Get,
    /// Submit a new company
    Create,
    /// Sectors, sizes and types offered by the submission form
    Catalog,
    /// Re-fetch the directory from its source
    Reload,
}

impl CommandAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::List => "list",
            CommandAction::Get => "get",
            CommandAction::Create => "create",
            CommandAction::Catalog => "catalog",
            CommandAction::Reload => "reload",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ListPayload {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// A sector label, or "All"
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GetPayload {
    pub id: String,
}

/// Submission form fields; list fields are comma-separated text
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub company_type: Option<String>,
    pub sector: Option<String>,
    pub size: Option<String>,
    pub short_description: String,
    pub full_description: String,
    pub products: String,
    pub services: String,
    pub markets_served: String,
    pub location: String,
    pub logo: Option<String>,
    pub cover: Option<String>,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub whatsapp: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub sectors: Vec<String>,
    pub sizes: Vec<String>,
    pub types: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct ResponseMeta {
    pub version: u32,
    /// "live" or "fallback"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn ok(data: Value, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Ok,
            error: None,
            data,
            meta,
        }
    }

    pub fn error(code: &str, message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            error: Some(ErrorEnvelope {
                code: code.to_string(),
                message: message.into(),
                details: None,
                hint,
            }),
            data: Value::Null,
            meta: ResponseMeta {
                version: COMMAND_API_VERSION,
                ..Default::default()
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

pub fn parse_payload<T: for<'de> Deserialize<'de>>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| anyhow::anyhow!("Invalid payload: {err}"))
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_payload_defaults_to_empty_object() {
        let request: CommandRequest = serde_json::from_str(r#"{"action":"catalog"}"#).unwrap();
        assert_eq!(request.action, CommandAction::Catalog);
        assert!(request.payload.as_object().unwrap().is_empty());
    }

    #[test]
    fn create_payload_accepts_partial_fields() {
        let payload: CreatePayload = parse_payload(json!({
            "name": "Nuova Srl",
            "type": "Distributore",
            "products": "A, B"
        }))
        .unwrap();
        assert_eq!(payload.name, "Nuova Srl");
        assert_eq!(payload.company_type.as_deref(), Some("Distributore"));
        assert_eq!(payload.products, "A, B");
        assert!(payload.email.is_empty());
    }

    #[test]
    fn error_response_omits_empty_parts() {
        let response = CommandResponse::error("invalid_request", "bad", None);
        let value: Value = serde_json::from_str(&serialize_json(&response).unwrap()).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], "invalid_request");
        assert!(value["error"].get("hint").is_none());
        assert!(value["meta"].get("origin").is_none());
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(serde_json::from_str::<CommandRequest>(r#"{"action":"delete"}"#).is_err());
    }
}
