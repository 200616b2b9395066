use serde::{Deserialize, Serialize};

use crate::rules::OverrideAction;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    pub agent_id: String,
    pub tool_pattern: String,
    pub action: OverrideAction,
    pub reason: String,
    pub ttl_seconds: u64,
}

// Whatever the gate sends back for an override. Fields default so a
// partial or odd-shaped response still decodes; an empty id is the
// processor's signal that the gate violated its contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Override {
    pub id: String,
    pub agent_id: String,
    pub tool_pattern: String,
    pub action: String,
    pub reason: String,
    pub ttl_seconds: u64,
}

#[derive(Debug)]
pub enum GateError {
    Transport(String),
    Rejected(u16),
    Decode(String),
}

impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Rejected(status) => write!(f, "rejected with status {status}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
        }
    }
}

impl std::error::Error for GateError {}

#[async_trait::async_trait]
pub trait Gate: Send + Sync {
    async fn create_override(&self, request: &OverrideRequest) -> Result<Override, GateError>;
    async fn remove_override(&self, id: &str) -> Result<(), GateError>;
    async fn list_overrides(&self) -> Result<Vec<Override>, GateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let req = OverrideRequest {
            agent_id: "agent-1".into(),
            tool_pattern: "*".into(),
            action: OverrideAction::Deny,
            reason: "test".into(),
            ttl_seconds: 60,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["agentId"], "agent-1");
        assert_eq!(json["toolPattern"], "*");
        assert_eq!(json["action"], "deny");
        assert_eq!(json["ttlSeconds"], 60);
    }

    #[test]
    fn override_decodes_with_missing_fields() {
        let ovr: Override = serde_json::from_str(r#"{"id": "ovr-1"}"#).unwrap();
        assert_eq!(ovr.id, "ovr-1");
        assert!(ovr.agent_id.is_empty());
    }

    #[test]
    fn override_missing_id_decodes_empty() {
        let ovr: Override = serde_json::from_str(r#"{"agentId": "a1"}"#).unwrap();
        assert!(ovr.id.is_empty());
    }

    #[test]
    fn error_display() {
        assert!(GateError::Transport("refused".into()).to_string().contains("transport"));
        assert!(GateError::Rejected(500).to_string().contains("500"));
    }
}
