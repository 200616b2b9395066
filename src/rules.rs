use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub metric: String,
    pub action: OverrideAction,
    #[serde(default = "default_tool_pattern")]
    pub tool_pattern: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_reason")]
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OverrideAction {
    RequireApproval,
    Deny,
    Allow,
}

impl OverrideAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequireApproval => "require_approval",
            Self::Deny => "deny",
            Self::Allow => "allow",
        }
    }
}

fn default_tool_pattern() -> String {
    "*".to_string()
}

fn default_ttl_seconds() -> u64 {
    3600
}

fn default_reason() -> String {
    "Guardrail triggered".to_string()
}

// Ordered rule list. Lookup returns the first rule for a metric; a later
// rule with the same metric is unreachable, which is the documented
// tie-break rather than an error.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn lookup(&self, metric: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.metric == metric)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
