//! Read-only views over backend responses.
//!
//! [`Message`], [`Candidate`] and [`GenerationResponse`] own a copy of the data
//! they wrap and add derived accessors: concatenated text and structured output
//! parsed into `O`. Missing structured output is `None`, never an error.

use crate::extract::extract_json;
use crate::types::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// A generated message
pub struct Message<O = Value> {
    pub role: Role,
    pub content: Vec<Part>,
    _output: PhantomData<fn() -> O>,
}

impl<O> Message<O> {
    /// Concatenated text of all parts, in order. Non-text parts contribute nothing.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|part| part.as_text().unwrap_or_default())
            .collect()
    }

    /// First JSON value embedded in [`Message::text`]
    pub fn output_value(&self) -> Option<Value> {
        extract_json(&self.text())
    }

    /// First media part, if any
    pub fn media(&self) -> Option<&MediaRef> {
        self.content.iter().find_map(Part::as_media)
    }

    /// Convert back into wire data, e.g. to extend a conversation history
    pub fn to_data(&self) -> MessageData {
        MessageData {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

impl<O: DeserializeOwned> Message<O> {
    /// Structured output parsed as `O`
    pub fn output(&self) -> Option<O> {
        self.output_value()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

impl<O> From<MessageData> for Message<O> {
    fn from(message: MessageData) -> Self {
        Self {
            role: message.role,
            content: message.content,
            _output: PhantomData,
        }
    }
}

// `O` is never stored, so Clone and Debug do not require it to implement either.
impl<O> Clone for Message<O> {
    fn clone(&self) -> Self {
        Self {
            role: self.role,
            content: self.content.clone(),
            _output: PhantomData,
        }
    }
}

impl<O> Debug for Message<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("role", &self.role)
            .field("content", &self.content)
            .finish()
    }
}

/// One generated alternative
pub struct Candidate<O = Value> {
    pub message: Message<O>,
    pub index: u32,
    pub usage: GenerationUsage,
    pub finish_reason: FinishReason,
    pub finish_message: String,
    pub custom: Option<Value>,
}

impl<O> Candidate<O> {
    /// Text of the candidate's message
    pub fn text(&self) -> String {
        self.message.text()
    }

    /// Raw structured output of the candidate's message
    pub fn output_value(&self) -> Option<Value> {
        self.message.output_value()
    }

    /// First media part of the candidate's message
    pub fn media(&self) -> Option<&MediaRef> {
        self.message.media()
    }
}

impl<O: DeserializeOwned> Candidate<O> {
    /// Structured output of the candidate's message
    pub fn output(&self) -> Option<O> {
        self.message.output()
    }
}

impl<O> From<CandidateData> for Candidate<O> {
    fn from(candidate: CandidateData) -> Self {
        Self {
            message: Message::from(candidate.message),
            index: candidate.index,
            usage: candidate.usage.unwrap_or_default(),
            finish_reason: candidate.finish_reason,
            finish_message: candidate.finish_message.unwrap_or_default(),
            custom: candidate.custom,
        }
    }
}

impl<O> Clone for Candidate<O> {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            index: self.index,
            usage: self.usage.clone(),
            finish_reason: self.finish_reason,
            finish_message: self.finish_message.clone(),
            custom: self.custom.clone(),
        }
    }
}

impl<O> Debug for Candidate<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("message", &self.message)
            .field("index", &self.index)
            .field("usage", &self.usage)
            .field("finish_reason", &self.finish_reason)
            .field("finish_message", &self.finish_message)
            .field("custom", &self.custom)
            .finish()
    }
}

/// Wrapped result of a generation call
pub struct GenerationResponse<O = Value> {
    pub candidates: Vec<Candidate<O>>,
    pub usage: GenerationUsage,
    pub custom: Value,
}

impl<O> GenerationResponse<O> {
    /// Text of the first candidate, or `""` when there are none
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(Candidate::text)
            .unwrap_or_default()
    }

    /// Raw structured output of the first candidate
    pub fn output_value(&self) -> Option<Value> {
        self.candidates.first().and_then(Candidate::output_value)
    }

    /// First media part of the first candidate
    pub fn media(&self) -> Option<&MediaRef> {
        self.candidates.first().and_then(Candidate::media)
    }
}

impl<O: DeserializeOwned> GenerationResponse<O> {
    /// Structured output of the first candidate
    pub fn output(&self) -> Option<O> {
        self.candidates.first().and_then(Candidate::output)
    }
}

impl<O> From<GenerationResponseData> for GenerationResponse<O> {
    fn from(response: GenerationResponseData) -> Self {
        Self {
            candidates: response.candidates.into_iter().map(Candidate::from).collect(),
            usage: response.usage.unwrap_or_default(),
            custom: response
                .custom
                .unwrap_or_else(|| Value::Object(Default::default())),
        }
    }
}

impl<O> Clone for GenerationResponse<O> {
    fn clone(&self) -> Self {
        Self {
            candidates: self.candidates.clone(),
            usage: self.usage.clone(),
            custom: self.custom.clone(),
        }
    }
}

impl<O> Debug for GenerationResponse<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationResponse")
            .field("candidates", &self.candidates)
            .field("usage", &self.usage)
            .field("custom", &self.custom)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Colors {
        colors: Vec<String>,
    }

    fn message(content: Vec<Part>) -> MessageData {
        MessageData::new(Role::Model, content)
    }

    #[test]
    fn test_message_text_concatenates_in_order() {
        let data = message(vec![
            Part::text("Hello, "),
            Part::media("https://example.com/cat.png", None),
            Part::text("World!"),
        ]);

        let msg: Message = Message::from(data.clone());
        assert_eq!(msg.text(), "Hello, World!");
        assert_eq!(Message::<Value>::from(msg.to_data()).text(), msg.text());
        assert_eq!(msg.media().unwrap().url, "https://example.com/cat.png");
    }

    #[test]
    fn test_message_without_text() {
        let msg: Message = Message::from(message(vec![]));
        assert_eq!(msg.text(), "");
        assert_eq!(msg.output(), None);
    }

    #[test]
    fn test_message_output() {
        let msg: Message<Colors> = Message::from(message(vec![Part::text(
            "Here are three: {\"colors\": [\"red\", \"green\", \"blue\"]}",
        )]));
        assert_eq!(
            msg.output(),
            Some(Colors {
                colors: vec!["red".into(), "green".into(), "blue".into()]
            })
        );

        let wrong: Message<Colors> = Message::from(message(vec![Part::text("{\"sizes\": [1]}")]));
        assert_eq!(wrong.output(), None);
        assert_eq!(wrong.output_value(), Some(json!({"sizes": [1]})));
    }

    #[test]
    fn test_candidate_defaults() {
        let candidate: Candidate = Candidate::from(CandidateData {
            message: MessageData::model("hi"),
            index: 3,
            usage: None,
            finish_reason: FinishReason::Length,
            finish_message: None,
            custom: Some(json!({"safety": "ok"})),
        });

        assert_eq!(candidate.index, 3);
        assert_eq!(candidate.usage, GenerationUsage::default());
        assert_eq!(candidate.finish_reason, FinishReason::Length);
        assert_eq!(candidate.finish_message, "");
        assert_eq!(candidate.custom, Some(json!({"safety": "ok"})));
        assert_eq!(candidate.text(), "hi");
    }

    #[test]
    fn test_response_preserves_candidate_order() {
        let data = GenerationResponseData::new(vec![
            CandidateData::new(0, MessageData::model("first")),
            CandidateData::new(1, MessageData::model("second")),
            CandidateData::new(2, MessageData::model("third")),
        ]);

        let response: GenerationResponse = GenerationResponse::from(data.clone());
        assert_eq!(response.candidates.len(), data.candidates.len());
        for (candidate, source) in response.candidates.iter().zip(&data.candidates) {
            assert_eq!(candidate.index, source.index);
        }
        assert_eq!(response.text(), "first");
        assert_eq!(response.custom, json!({}));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerationResponse<Colors> =
            GenerationResponse::from(GenerationResponseData::default());
        assert_eq!(response.text(), "");
        assert_eq!(response.output(), None);
        assert!(response.media().is_none());
        assert_eq!(response.usage, GenerationUsage::default());
    }

    #[test]
    fn test_response_clones_without_output_bounds() {
        // Neither Clone nor Debug.
        #[derive(Deserialize)]
        struct Opaque {
            #[allow(dead_code)]
            colors: Vec<String>,
        }

        let response: GenerationResponse<Opaque> = GenerationResponse::from(
            GenerationResponseData::new(vec![CandidateData::new(
                0,
                MessageData::model("{\"colors\": [\"red\"]}"),
            )]),
        );

        let copy = response.clone();
        assert_eq!(copy.text(), response.text());
        assert_eq!(copy.candidates[0].message.clone().text(), response.text());
        assert!(copy.output().is_some());
        assert!(format!("{:?}", copy).contains("GenerationResponse"));
    }
}
