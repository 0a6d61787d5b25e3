//! Content-blocker rule lists.
//!
//! Navigation policy only sees frame loads. History endpoints are fetched by
//! script, so they are blocked separately through the browser's content
//! blocker, using the WebKit rule-list JSON shape:
//!
//! ```json
//! [{ "trigger": { "url-filter": "https://…" }, "action": { "type": "block" } }]
//! ```

use crate::base::context::JsonResultExt;
use crate::base::guarderror::GuardError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RuleTrigger {
    #[serde(rename = "url-filter")]
    pub url_filter: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RuleActionType {
    Block,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: RuleActionType,
}

/// A single content-blocker rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentRule {
    pub trigger: RuleTrigger,
    pub action: RuleAction,
}

impl ContentRule {
    /// Block every request whose URL matches `url_filter`.
    pub fn block(url_filter: impl Into<String>) -> Self {
        Self {
            trigger: RuleTrigger {
                url_filter: url_filter.into(),
            },
            action: RuleAction {
                action_type: RuleActionType::Block,
            },
        }
    }
}

/// An ordered rule list ready to compile into the browser.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContentRuleList {
    pub rules: Vec<ContentRule>,
}

impl ContentRuleList {
    /// Build a list blocking each filter.
    pub fn blocking<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: filters.into_iter().map(ContentRule::block).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Encode as the browser's rule-list JSON.
    pub fn to_json(&self) -> Result<String, GuardError> {
        serde_json::to_string_pretty(self).serialize_context("content rule list")
    }
}
