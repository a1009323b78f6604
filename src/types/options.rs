//! Typed request configuration for sessions and queries.
//!
//! Everything the gateway accepts is spelled out here instead of living as
//! ambient module constants: callers build one [`SessionRequest`] /
//! [`QueryRequest`] per integration and pass it explicitly.

use serde::Serialize;

/// A key/value pair attached to a session as context metadata.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContextPair {
    pub key: String,
    pub value: String,
}

/// Request body for creating a chat session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agent_ids: Vec<String>,
    pub external_user_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context_metadata: Vec<ContextPair>,
}

impl SessionRequest {
    pub fn new(external_user_id: impl Into<String>) -> Self {
        Self {
            external_user_id: external_user_id.into(),
            ..Self::default()
        }
    }

    pub fn agent_id(mut self, id: impl Into<String>) -> Self {
        self.agent_ids.push(id.into());
        self
    }

    pub fn agent_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.agent_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_metadata.push(ContextPair {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

/// Request body for submitting a query to a session.
///
/// The response mode (stream vs sync) is chosen by the client method, not
/// here — [`crate::ChatClient::query`] streams, [`crate::ChatClient::query_sync`]
/// does not.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub endpoint_id: String,
    pub query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agent_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_mode: Option<String>,
    pub model_configs: ModelConfigs,
}

impl QueryRequest {
    pub fn new(endpoint_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn agent_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.agent_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn reasoning_mode(mut self, mode: impl Into<String>) -> Self {
        self.reasoning_mode = Some(mode.into());
        self
    }

    pub fn model_configs(mut self, configs: ModelConfigs) -> Self {
        self.model_configs = configs;
        self
    }
}

/// Sampling configuration forwarded to the fulfilment model.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfigs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

impl ModelConfigs {
    pub fn fulfillment_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.fulfillment_prompt = Some(prompt.into());
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.top_p = Some(p);
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.stop_sequences = Some(stop);
        self
    }

    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }
}
