//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pricing library
//! without making real language model calls or loading model artifacts.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{ModelError, ModelResult, PricingError, Result};
use crate::traits::{generator::TextGenerator, model::RegressionModel};
use crate::types::vector::FeatureVector;

/// What the mock generator does on a call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Fail(String),
}

/// A mock text generator for testing.
///
/// Replies are consumed in order; once the queue is empty the fallback
/// reply is used. Every prompt is recorded for assertions.
pub struct MockGenerator {
    replies: Arc<RwLock<VecDeque<MockReply>>>,
    fallback: MockReply,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            replies: Arc::default(),
            fallback: MockReply::Text("{}".to_string()),
            prompts: Arc::default(),
        }
    }
}

impl MockGenerator {
    /// Create a mock that replies with an empty JSON object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            fallback: MockReply::Text(text.into()),
            ..Self::default()
        }
    }

    /// Always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback: MockReply::Fail(message.into()),
            ..Self::default()
        }
    }

    /// Queue a one-off reply ahead of the fallback.
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.replies.write().unwrap().push_back(reply);
        self
    }

    /// Get all prompts sent to this mock.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        let reply = self
            .replies
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(PricingError::Generation(message.into())),
        }
    }
}

/// A regression model that always predicts the same value.
#[derive(Debug, Clone)]
pub struct ConstantModel {
    name: String,
    value: f64,
}

impl ConstantModel {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl RegressionModel for ConstantModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, _features: &FeatureVector) -> ModelResult<f64> {
        Ok(self.value)
    }
}

/// A regression model that always fails.
#[derive(Debug, Clone)]
pub struct FailingModel {
    name: String,
}

impl FailingModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RegressionModel for FailingModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, _features: &FeatureVector) -> ModelResult<f64> {
        Err(ModelError::Inference(format!("{} is unavailable", self.name)))
    }
}
