//! Chat executor - routes one chat message to the agent
//!
//! Every message initializes a fresh agent, then either runs one
//! autonomous cycle or dispatches a (possibly rewritten) instruction.

use std::sync::Arc;

use tracing::{debug, info, warn};

use statuette_core::autonomous::{
    cycle_failure, cycle_summary, AutonomousAction, AUTONOMOUS_INTERVAL_SECS, PRELIMINARY_CHECK,
};
use statuette_core::chat::{
    is_autonomous_trigger, normalize_input, rewrite_instruction, ChatResponse,
};

use crate::dispatcher::dispatch;
use crate::error::Result;
use crate::provider::{AgentProvider, AgentSession};
use crate::session::SessionConfig;

/// Executes chat messages against agents from a provider
pub struct ChatExecutor {
    provider: Arc<dyn AgentProvider>,
}

impl ChatExecutor {
    pub fn new(provider: Arc<dyn AgentProvider>) -> Self {
        Self { provider }
    }

    /// Process one chat message and return the responses to display.
    ///
    /// Initialization errors are returned in every case. Instruction errors
    /// are returned for manual messages; an autonomous cycle reports them as
    /// a chat message instead.
    pub async fn process_chat_message(&self, message: &str) -> Result<Vec<ChatResponse>> {
        let input = normalize_input(message);
        let agent = self.provider.initialize().await?;

        if is_autonomous_trigger(&input) {
            info!("Running autonomous cycle");
            return Ok(run_autonomous_cycle(agent.session.as_ref(), &agent.config).await);
        }

        let instruction = rewrite_instruction(&input);
        debug!("Dispatching {:?} instruction", instruction.intent);

        dispatch(agent.session.as_ref(), &agent.config, &instruction.text).await
    }
}

/// Run one autonomous cycle with a randomly chosen action
pub async fn run_autonomous_cycle(
    session: &dyn AgentSession,
    config: &SessionConfig,
) -> Vec<ChatResponse> {
    let action = AutonomousAction::choose(&mut rand::thread_rng());
    run_autonomous_action(session, config, action).await
}

/// Run one autonomous cycle performing `action`.
///
/// Outputs are returned in call order followed by the cycle summary. If any
/// instruction fails the partial output is discarded and a single error
/// message is returned.
pub async fn run_autonomous_action(
    session: &dyn AgentSession,
    config: &SessionConfig,
    action: AutonomousAction,
) -> Vec<ChatResponse> {
    info!("Autonomous action: {}", action);

    match perform_cycle(session, config, action).await {
        Ok(responses) => responses,
        Err(e) => {
            warn!("Autonomous cycle failed: {}", e);
            vec![ChatResponse::tools(cycle_failure(
                e,
                AUTONOMOUS_INTERVAL_SECS,
            ))]
        }
    }
}

async fn perform_cycle(
    session: &dyn AgentSession,
    config: &SessionConfig,
    action: AutonomousAction,
) -> Result<Vec<ChatResponse>> {
    let mut responses = dispatch(session, config, PRELIMINARY_CHECK).await?;
    responses.extend(dispatch(session, config, &action.instruction()).await?);
    responses.push(ChatResponse::tools(cycle_summary(
        action,
        AUTONOMOUS_INTERVAL_SECS,
    )));
    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::AgentChunk;
    use crate::error::AgentError;
    use crate::scripted::ScriptedAgent;

    fn executor_with(agent: &ScriptedAgent) -> ChatExecutor {
        ChatExecutor::new(Arc::new(agent.clone()))
    }

    #[tokio::test]
    async fn test_wallet_request_is_rewritten() {
        let agent = ScriptedAgent::new(|_| Ok(vec![AgentChunk::tools("Balance: 1.25 ETH")]));
        let executor = executor_with(&agent);

        let responses = executor
            .process_chat_message("  My Wallet Balance ")
            .await
            .unwrap();

        assert_eq!(responses, vec![ChatResponse::tools("Balance: 1.25 ETH")]);
        assert_eq!(
            agent.instructions().await,
            vec!["Please show me my wallet address and details from the CDP wallet.".to_string()]
        );
        assert_eq!(agent.initializations(), 1);
    }

    #[tokio::test]
    async fn test_passthrough_sends_normalized_input() {
        let agent = ScriptedAgent::echo();
        let executor = executor_with(&agent);

        let responses = executor.process_chat_message("What Is Gas?").await.unwrap();

        assert_eq!(responses, vec![ChatResponse::tools("what is gas?")]);
    }

    #[tokio::test]
    async fn test_each_message_initializes_agent() {
        let agent = ScriptedAgent::echo();
        let executor = executor_with(&agent);

        executor.process_chat_message("one").await.unwrap();
        executor.process_chat_message("two").await.unwrap();

        assert_eq!(agent.initializations(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_error_propagates() {
        let agent = ScriptedAgent::new(|_| Err(AgentError::runtime(500, "boom")));
        let executor = executor_with(&agent);

        let result = executor.process_chat_message("send token").await;

        assert!(matches!(result, Err(AgentError::Runtime { .. })));
    }

    #[tokio::test]
    async fn test_initialization_error_propagates_for_trigger() {
        let agent = ScriptedAgent::echo().with_init_failure("runtime down");
        let executor = executor_with(&agent);

        let result = executor.process_chat_message("autonomous").await;

        assert!(matches!(result, Err(AgentError::Initialization { .. })));
        assert!(agent.instructions().await.is_empty());
    }

    #[tokio::test]
    async fn test_trigger_runs_autonomous_cycle() {
        let agent = ScriptedAgent::echo();
        let executor = executor_with(&agent);

        let responses = executor.process_chat_message("go autonomous").await.unwrap();

        let instructions = agent.instructions().await;
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0], PRELIMINARY_CHECK);
        assert!(instructions[1].starts_with("Let's perform this action: "));

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].content, PRELIMINARY_CHECK);
        assert_eq!(responses[1].content, instructions[1]);
        assert!(responses[2]
            .content
            .starts_with("Completed autonomous action: "));
    }

    #[tokio::test]
    async fn test_cycle_without_preliminary_output() {
        let agent = ScriptedAgent::new(|instruction| {
            if instruction == PRELIMINARY_CHECK {
                Ok(vec![AgentChunk::agent("All good")])
            } else {
                Ok(vec![AgentChunk::tools("Faucet request sent")])
            }
        });

        let responses = run_autonomous_action(
            &agent,
            &SessionConfig::default(),
            AutonomousAction::RequestFaucet,
        )
        .await;

        assert_eq!(
            responses,
            vec![
                ChatResponse::tools("Faucet request sent"),
                ChatResponse::tools(
                    "Completed autonomous action: Request test tokens from the faucet if needed. Next action in 30 seconds..."
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_cycle_discards_partial_output() {
        let agent = ScriptedAgent::new(|instruction| {
            if instruction == PRELIMINARY_CHECK {
                Ok(vec![AgentChunk::tools("Wallet: 0xabc")])
            } else {
                Err(AgentError::runtime(502, "bad gateway"))
            }
        });

        let responses =
            run_autonomous_action(&agent, &SessionConfig::default(), AutonomousAction::MintNft)
                .await;

        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].content,
            "Error in autonomous mode: Agent runtime returned 502: bad gateway. Will try again in 30 seconds..."
        );
    }
}
