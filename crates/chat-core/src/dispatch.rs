//! Dispatch Loop
//!
//! Turn-by-turn mediation between the user, an intent classifier and an
//! action table, driven as an explicit state machine:
//!
//! ```text
//!   AwaitingGreeting ──send(greeting, none)──▶ ProcessingReply
//!          ▲                                    │   │
//!          │◀──── directive ran / empty input ──┘   │ prose
//!          │                                        ▼
//!          └──────────────── "" ─────────── AwaitingUserInput
//!                                                   │ text
//!                              ProcessingReply ◀────┘ send(text, context)
//!
//!   exit reply / exit input / end of input ──▶ Ended
//! ```
//!
//! Turns are strictly sequential: the context token only makes sense under a
//! total order of turns.

use std::sync::Arc;

use tracing::{debug, info};

use crate::action::{ActionTable, Directive};
use crate::classifier::IntentClassifier;
use crate::console::Console;
use crate::context::{ClassifierReply, ConversationContext};
use crate::error::{ChatError, Result};
use crate::session::{EndReason, SessionSummary};

/// Default exit sentinel
pub const DEFAULT_EXIT_TOKEN: &str = "exit";

/// Loop configuration
#[derive(Clone, Debug)]
pub struct LoopConfig {
    /// Opening utterance; `None` sends no text
    pub greeting: Option<String>,

    /// Reply or input that ends the session
    pub exit_token: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            greeting: None,
            exit_token: DEFAULT_EXIT_TOKEN.into(),
        }
    }
}

#[derive(Debug)]
enum TurnState {
    AwaitingGreeting,
    ProcessingReply(ClassifierReply),
    AwaitingUserInput(ConversationContext),
    Ended(EndReason),
}

/// The turn-taking dispatcher
pub struct DispatchLoop<A: ActionTable> {
    classifier: Arc<dyn IntentClassifier>,
    actions: A,
    config: LoopConfig,
}

impl<A: ActionTable> DispatchLoop<A> {
    pub fn new(classifier: Arc<dyn IntentClassifier>, actions: A, config: LoopConfig) -> Self {
        Self {
            classifier,
            actions,
            config,
        }
    }

    pub fn builder() -> DispatchLoopBuilder<A> {
        DispatchLoopBuilder::new()
    }

    /// Run one session to completion.
    ///
    /// Classifier, action and console failures are not recovered; they end
    /// the session with an error.
    pub async fn run(&self, console: &mut dyn Console) -> Result<SessionSummary> {
        self.drive(console, SessionSummary::start()).await
    }

    #[tracing::instrument(name = "session", skip_all, fields(id = %summary.id))]
    async fn drive(
        &self,
        console: &mut dyn Console,
        mut summary: SessionSummary,
    ) -> Result<SessionSummary> {
        info!(
            classifier = self.classifier.name(),
            actions = ?self.actions.names(),
            "session started"
        );

        let mut state = TurnState::AwaitingGreeting;

        loop {
            state = match state {
                TurnState::AwaitingGreeting => {
                    let greeting = self.config.greeting.as_deref();
                    TurnState::ProcessingReply(self.converse(&mut summary, greeting, None).await?)
                }
                TurnState::ProcessingReply(reply) => {
                    self.process_reply(console, &mut summary, reply).await?
                }
                TurnState::AwaitingUserInput(context) => {
                    self.await_input(console, &mut summary, context).await?
                }
                TurnState::Ended(reason) => {
                    summary.finish(reason);
                    info!(
                        %reason,
                        classifier_calls = summary.classifier_calls,
                        directives = summary.directives,
                        prompts = summary.prompts,
                        "session ended"
                    );
                    return Ok(summary);
                }
            };
        }
    }

    async fn converse(
        &self,
        summary: &mut SessionSummary,
        text: Option<&str>,
        context: Option<&ConversationContext>,
    ) -> Result<ClassifierReply> {
        summary.classifier_calls += 1;
        debug!(
            turn = summary.classifier_calls,
            has_text = text.is_some(),
            has_context = context.is_some(),
            "sending turn to classifier"
        );

        self.classifier.send(text, context).await
    }

    async fn process_reply(
        &self,
        console: &mut dyn Console,
        summary: &mut SessionSummary,
        reply: ClassifierReply,
    ) -> Result<TurnState> {
        if reply.is_exit(&self.config.exit_token) {
            return Ok(TurnState::Ended(EndReason::ExitReply));
        }

        let action = Directive::parse(&reply.text).and_then(|d| self.actions.resolve(&d));

        if let Some(action) = action {
            info!(?action, "dispatching directive");
            let output = self.actions.invoke(&action).await?;
            console.write_line(&output).await?;
            summary.directives += 1;

            // Context is dropped: a fresh greeting cycle begins.
            return Ok(TurnState::AwaitingGreeting);
        }

        console.write_line(&reply.text).await?;
        summary.prompts += 1;

        Ok(TurnState::AwaitingUserInput(reply.context))
    }

    async fn await_input(
        &self,
        console: &mut dyn Console,
        summary: &mut SessionSummary,
        context: ConversationContext,
    ) -> Result<TurnState> {
        let Some(line) = console.read_line().await? else {
            return Ok(TurnState::Ended(EndReason::EndOfInput));
        };

        let input = line.trim();

        if input == self.config.exit_token {
            return Ok(TurnState::Ended(EndReason::ExitInput));
        }

        if input.is_empty() {
            debug!("empty input, restarting with greeting");
            return Ok(TurnState::AwaitingGreeting);
        }

        let reply = self.converse(summary, Some(input), Some(&context)).await?;
        Ok(TurnState::ProcessingReply(reply))
    }

}

/// Builder for the dispatch loop
pub struct DispatchLoopBuilder<A: ActionTable> {
    classifier: Option<Arc<dyn IntentClassifier>>,
    actions: Option<A>,
    config: LoopConfig,
}

impl<A: ActionTable> Default for DispatchLoopBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ActionTable> DispatchLoopBuilder<A> {
    pub fn new() -> Self {
        Self {
            classifier: None,
            actions: None,
            config: LoopConfig::default(),
        }
    }

    pub fn classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn actions(mut self, actions: A) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn greeting(mut self, greeting: Option<String>) -> Self {
        self.config.greeting = greeting;
        self
    }

    pub fn exit_token(mut self, token: impl Into<String>) -> Self {
        self.config.exit_token = token.into();
        self
    }

    pub fn build(self) -> Result<DispatchLoop<A>> {
        let classifier = self.classifier
            .ok_or_else(|| ChatError::Config("Classifier is required".into()))?;
        let actions = self.actions
            .ok_or_else(|| ChatError::Config("Action table is required".into()))?;

        if self.config.exit_token.trim().is_empty() {
            return Err(ChatError::Config("Exit token must not be empty".into()));
        }

        Ok(DispatchLoop::new(classifier, actions, self.config))
    }
}
