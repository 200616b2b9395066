use std::sync::Arc;

use serde::Deserialize;

use crate::gate::{Gate, OverrideRequest};
use crate::rules::RuleSet;
use crate::store::{override_key, OverrideStore};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    // `event` is the field name older webhook producers send.
    #[serde(alias = "event")]
    pub kind: EventKind,
    pub metric: String,
    pub current_value: f64,
    pub threshold: f64,
    pub agent_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Breach,
    Recovery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ignored,
    AlreadyActive { override_id: String },
    OverrideCreated { override_id: String },
    NoActiveOverride,
    OverrideRemoved { override_id: String },
    GateUnreachable { detail: String },
}

#[derive(Clone)]
pub struct Processor {
    rules: Arc<RuleSet>,
    overrides: OverrideStore,
    gate: Arc<dyn Gate>,
}

impl Processor {
    pub fn new(rules: RuleSet, overrides: OverrideStore, gate: Arc<dyn Gate>) -> Self {
        Self {
            rules: Arc::new(rules),
            overrides,
            gate,
        }
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    pub async fn process(&self, event: &Event) -> Outcome {
        let outcome = match event.kind {
            EventKind::Breach => self.on_breach(event).await,
            EventKind::Recovery => self.on_recovery(event).await,
        };

        // The transition above has released its lock handle by now, so a
        // key left untracked can shed its lock entry unless another event
        // for the same key is still in flight.
        let key = override_key(&event.agent_id, &event.metric);
        if !self.overrides.has(&key) {
            self.overrides.release_lock(&key);
        }

        outcome
    }

    async fn on_breach(&self, event: &Event) -> Outcome {
        let Some(rule) = self.rules.lookup(&event.metric) else {
            tracing::debug!(metric = %event.metric, agent_id = %event.agent_id, "breach for unconfigured metric, ignoring");
            return Outcome::Ignored;
        };

        let key = override_key(&event.agent_id, &event.metric);
        // Held across the gate call so concurrent breaches for one key
        // cannot both observe "no override" and double-create.
        let lock = self.overrides.key_lock(&key);
        let _guard = lock.lock().await;

        if let Some(id) = self.overrides.get(&key) {
            return Outcome::AlreadyActive { override_id: id };
        }

        let request = OverrideRequest {
            agent_id: event.agent_id.clone(),
            tool_pattern: rule.tool_pattern.clone(),
            action: rule.action,
            reason: rule.reason.clone(),
            ttl_seconds: rule.ttl_seconds,
        };

        match self.gate.create_override(&request).await {
            Ok(created) if created.id.is_empty() => {
                tracing::warn!(key = %key, "gate accepted create but returned no override id");
                Outcome::GateUnreachable {
                    detail: "invalid response from AgentGate: missing override id".into(),
                }
            }
            Ok(created) => {
                self.overrides.put(key.clone(), created.id.clone());
                tracing::info!(
                    key = %key,
                    override_id = %created.id,
                    action = rule.action.as_str(),
                    "override created"
                );
                Outcome::OverrideCreated {
                    override_id: created.id,
                }
            }
            // Nothing was stored, so the next breach retries the create.
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "override create failed");
                Outcome::GateUnreachable {
                    detail: e.to_string(),
                }
            }
        }
    }

    async fn on_recovery(&self, event: &Event) -> Outcome {
        let key = override_key(&event.agent_id, &event.metric);
        let lock = self.overrides.key_lock(&key);
        let _guard = lock.lock().await;

        let Some(id) = self.overrides.get(&key) else {
            return Outcome::NoActiveOverride;
        };

        match self.gate.remove_override(&id).await {
            Ok(()) => {
                self.overrides.remove(&key);
                tracing::info!(key = %key, override_id = %id, "override removed");
                Outcome::OverrideRemoved { override_id: id }
            }
            // The gate may still be enforcing the override; the mapping
            // stays so a later recovery can retry the removal.
            Err(e) => {
                tracing::warn!(key = %key, override_id = %id, error = %e, "override remove failed");
                Outcome::GateUnreachable {
                    detail: e.to_string(),
                }
            }
        }
    }
}
