use std::fmt;
use std::sync::Arc;

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::LLMError;

use super::state::ConversationState;

pub const START: &str = "__start__";
pub const END: &str = "__end__";
pub const CHATBOT_NODE: &str = "chatbot";

/// Compiled `START -> chatbot -> END` graph.
///
/// Holds only the provider handle, so clones are cheap and one instance can
/// serve any number of concurrent invocations.
#[derive(Clone)]
pub struct ChatGraph {
    provider: Arc<dyn ChatProvider>,
}

impl fmt::Debug for ChatGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatGraph")
            .field("model_id", &self.provider.model_id())
            .finish()
    }
}

impl ChatGraph {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Runs the graph: the state gains exactly one assistant message.
    pub async fn invoke(&self, state: ConversationState) -> Result<ConversationState, LLMError> {
        let update = self.chatbot(&state).await?;
        Ok(state.merge(update))
    }

    /// The chatbot node collapsed to a direct call: history in, reply out.
    pub async fn respond(&self, history: &[ChatMessage]) -> Result<ChatMessage, LLMError> {
        if history.is_empty() {
            return Err(LLMError::InvalidRequest(
                "conversation must contain at least one message".to_string(),
            ));
        }
        log::debug!(
            "invoking {} with {} message(s)",
            self.provider.model_id(),
            history.len()
        );
        let response = self.provider.chat(history).await?;
        if let Some(usage) = response.usage() {
            log::debug!(
                "model usage: prompt={} completion={} total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        Ok(ChatMessage::assistant()
            .content(response.text().unwrap_or_default())
            .build())
    }

    async fn chatbot(&self, state: &ConversationState) -> Result<ConversationState, LLMError> {
        let reply = self.respond(state.messages.as_slice()).await?;
        Ok(ConversationState::new(vec![reply]))
    }

    pub fn nodes(&self) -> [&'static str; 3] {
        [START, CHATBOT_NODE, END]
    }

    pub fn edges(&self) -> [(&'static str, &'static str); 2] {
        [(START, CHATBOT_NODE), (CHATBOT_NODE, END)]
    }

    /// Renders the topology as a Mermaid flowchart.
    pub fn draw_mermaid(&self) -> String {
        let mut out = String::new();
        out.push_str("---\nconfig:\n  flowchart:\n    curve: linear\n---\n");
        out.push_str("graph TD;\n");
        for node in self.nodes() {
            let line = match node {
                START => format!("\t{node}([<p>{node}</p>]):::first\n"),
                END => format!("\t{node}([<p>{node}</p>]):::last\n"),
                _ => format!("\t{node}({node})\n"),
            };
            out.push_str(&line);
        }
        for (from, to) in self.edges() {
            out.push_str(&format!("\t{from} --> {to};\n"));
        }
        out.push_str("\tclassDef default fill:#f2f0ff,line-height:1.2\n");
        out.push_str("\tclassDef first fill-opacity:0\n");
        out.push_str("\tclassDef last fill:#bfb6fc\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use proptest::prelude::*;

    use super::*;
    use crate::chat::{ChatResponse, ChatRole};

    #[derive(Debug)]
    struct TextResponse(String);

    impl fmt::Display for TextResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl ChatResponse for TextResponse {
        fn text(&self) -> Option<String> {
            Some(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingProvider {
        calls: AtomicUsize,
        seen: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl ChatProvider for RecordingProvider {
        async fn chat(
            &self,
            messages: &[ChatMessage],
        ) -> Result<Box<dyn ChatResponse>, LLMError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().expect("seen lock") = messages.to_vec();
            Ok(Box::new(TextResponse(format!("reply #{}", messages.len()))))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ChatProvider for FailingProvider {
        async fn chat(&self, _: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
            Err(LLMError::AuthError("expired token".to_string()))
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
    }

    #[tokio::test]
    async fn invoke_appends_one_assistant_message() {
        let provider = Arc::new(RecordingProvider::default());
        let graph = ChatGraph::new(provider.clone());
        let history = vec![
            ChatMessage::system().content("be terse").build(),
            ChatMessage::user().content("Hello").build(),
        ];

        let result = graph
            .invoke(ConversationState::new(history.clone()))
            .await
            .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*provider.seen.lock().unwrap(), history);
        assert_eq!(&result.messages.as_slice()[..2], history.as_slice());
        let last = result.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, "reply #2");
    }

    #[tokio::test]
    async fn empty_state_is_rejected_without_calling_the_model() {
        let provider = Arc::new(RecordingProvider::default());
        let graph = ChatGraph::new(provider.clone());

        let err = graph.invoke(ConversationState::default()).await.unwrap_err();

        assert!(matches!(err, LLMError::InvalidRequest(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_errors_propagate_unchanged() {
        let graph = ChatGraph::new(Arc::new(FailingProvider));
        let state = ConversationState::new(vec![ChatMessage::user().content("hi").build()]);

        let err = graph.invoke(state).await.unwrap_err();

        assert!(matches!(err, LLMError::AuthError(ref m) if m == "expired token"));
    }

    #[test]
    fn mermaid_lists_single_path() {
        let graph = ChatGraph::new(Arc::new(FailingProvider));
        let diagram = graph.draw_mermaid();
        assert!(diagram.contains("graph TD;"));
        assert!(diagram.contains("\t__start__ --> chatbot;\n"));
        assert!(diagram.contains("\tchatbot --> __end__;\n"));
        assert!(diagram.contains("\tchatbot(chatbot)\n"));
    }

    #[test]
    fn mermaid_output_is_stable() {
        let graph = ChatGraph::new(Arc::new(FailingProvider));
        let expected = "---\nconfig:\n  flowchart:\n    curve: linear\n---\n\
graph TD;\n\
\t__start__([<p>__start__</p>]):::first\n\
\tchatbot(chatbot)\n\
\t__end__([<p>__end__</p>]):::last\n\
\t__start__ --> chatbot;\n\
\tchatbot --> __end__;\n\
\tclassDef default fill:#f2f0ff,line-height:1.2\n\
\tclassDef first fill-opacity:0\n\
\tclassDef last fill:#bfb6fc\n";
        assert_eq!(graph.draw_mermaid(), expected);
    }

    /// Replies with the last message's content after yielding, so concurrent
    /// invocations interleave on the runtime.
    struct EchoProvider;

    #[async_trait]
    impl ChatProvider for EchoProvider {
        async fn chat(
            &self,
            messages: &[ChatMessage],
        ) -> Result<Box<dyn ChatResponse>, LLMError> {
            tokio::task::yield_now().await;
            let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
            Ok(Box::new(TextResponse(format!("echo: {last}"))))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn shared_graph_serves_concurrent_invocations() {
        let graph = Arc::new(ChatGraph::new(Arc::new(EchoProvider)));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let graph = Arc::clone(&graph);
                let history: Vec<ChatMessage> = (0..=i)
                    .map(|turn| ChatMessage::user().content(format!("task {i} turn {turn}")).build())
                    .collect();
                tokio::spawn(async move {
                    let result = graph
                        .invoke(ConversationState::new(history.clone()))
                        .await
                        .unwrap();
                    (i, history, result)
                })
            })
            .collect();

        for handle in handles {
            let (i, history, result) = handle.await.unwrap();
            let messages = result.messages.as_slice();
            assert_eq!(messages.len(), history.len() + 1);
            assert_eq!(&messages[..history.len()], history.as_slice());
            let last = result.messages.last().unwrap();
            assert_eq!(last.role, ChatRole::Assistant);
            assert_eq!(last.content, format!("echo: task {i} turn {i}"));
        }
    }

    fn role() -> impl Strategy<Value = ChatRole> {
        prop_oneof![
            Just(ChatRole::User),
            Just(ChatRole::Assistant),
            Just(ChatRole::System),
        ]
    }

    proptest! {
        #[test]
        fn result_is_history_plus_one_assistant(
            history in prop::collection::vec((role(), ".{0,16}"), 1..8)
        ) {
            let history: Vec<ChatMessage> = history
                .into_iter()
                .map(|(role, content)| ChatMessage { role, content })
                .collect();
            let graph = ChatGraph::new(Arc::new(RecordingProvider::default()));

            let result = runtime()
                .block_on(graph.invoke(ConversationState::new(history.clone())))
                .unwrap();

            prop_assert_eq!(result.messages.len(), history.len() + 1);
            prop_assert_eq!(&result.messages.as_slice()[..history.len()], history.as_slice());
            prop_assert_eq!(result.messages.last().unwrap().role, ChatRole::Assistant);
        }
    }
}
