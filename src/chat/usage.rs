use serde::{Deserialize, Serialize};

/// Token accounting reported by the remote model for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    #[serde(alias = "output_tokens")]
    pub completion_tokens: u32,
    /// Total number of tokens used
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bedrock_style_field_names() {
        let usage: Usage = serde_json::from_str(
            r#"{"input_tokens": 12, "output_tokens": 30, "total_tokens": 42}"#,
        )
        .unwrap();
        assert_eq!(usage, Usage::new(12, 30));
    }
}
