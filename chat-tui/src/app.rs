//! Application state: the conversation, the mode and the autonomous loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;
use statuette_core::autonomous::AUTONOMOUS_INTERVAL_SECS;
use statuette_core::chat::{classify, normalize_input, ChatResponse, Classification};
use statuette_core::Mode;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::autonomous::AutonomousLoop;
use crate::transport::ChatTransport;

pub const ENTER_AUTONOMOUS_NOTICE: &str =
    "Entering autonomous mode. The agent will perform actions automatically every 30 seconds.";
pub const STOP_AUTONOMOUS_NOTICE: &str = "Autonomous mode stopped.";
pub const CHAT_ERROR_NOTICE: &str =
    "Sorry, there was an error processing your message. Please try again.";
pub const AUTONOMOUS_ERROR_NOTICE: &str = "Error in autonomous mode. Will retry in 30 seconds...";

/// Canned instructions offered while the conversation is empty.
pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        title: "🏦 My wallet address is",
        hint: "Check your wallet address",
        message: "my wallet address",
    },
    QuickAction {
        title: "💧 Get some faucet",
        hint: "Request test tokens for your wallet",
        message: "get some faucet",
    },
    QuickAction {
        title: "💰 My wallet balance is",
        hint: "Check your current token balance",
        message: "my wallet balance",
    },
    QuickAction {
        title: "💸 Send Token to",
        hint: "Send tokens to another address",
        message: "send token",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct QuickAction {
    pub title: &'static str,
    pub hint: &'static str,
    pub message: &'static str,
}

/// Messages for async operations.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Manual request answered
    ChatReplied(Vec<ChatResponse>),
    /// Manual request failed
    ChatFailed(String),
    /// Autonomous cycle answered
    AutonomousReplied {
        generation: u64,
        responses: Vec<ChatResponse>,
    },
    /// Autonomous cycle failed
    AutonomousFailed { generation: u64, error: String },
}

/// A message as displayed, with the local time it was appended.
#[derive(Debug, Clone)]
pub struct DisplayMessage {
    pub response: ChatResponse,
    pub received_at: DateTime<Local>,
}

/// Main application state.
pub struct App {
    transport: Arc<dyn ChatTransport>,
    pub messages: Vec<DisplayMessage>,
    pub mode: Mode,
    pub input: String,
    pub busy: bool,
    /// Lines scrolled up from the bottom of the conversation
    pub scroll_offset: u16,
    autonomous: Option<AutonomousLoop>,
    generation: u64,
    cycle_period: Duration,
    quit: bool,
}

impl App {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            messages: Vec::new(),
            mode: Mode::Manual,
            input: String::new(),
            busy: false,
            scroll_offset: 0,
            autonomous: None,
            generation: 0,
            cycle_period: Duration::from_secs(AUTONOMOUS_INTERVAL_SECS),
            quit: false,
        }
    }

    pub fn is_autonomous_running(&self) -> bool {
        self.autonomous.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn show_quick_actions(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, response: ChatResponse) {
        self.messages.push(DisplayMessage {
            response,
            received_at: Local::now(),
        });
        // Follow new output
        self.scroll_offset = 0;
    }

    /// Submit one line of user input.
    pub fn submit(&mut self, raw: &str, tx: mpsc::Sender<AppMessage>) {
        let input = normalize_input(raw);
        if input.is_empty() || self.busy {
            return;
        }

        self.push(ChatResponse::user(input.clone()));

        match classify(&input, self.mode) {
            Classification::EnterAutonomous => self.enter_autonomous(tx),
            Classification::StopAutonomous => self.stop_autonomous(),
            Classification::Forward(_) => self.send_manual(input, tx),
        }
    }

    fn enter_autonomous(&mut self, tx: mpsc::Sender<AppMessage>) {
        self.mode = Mode::Auto;
        self.push(ChatResponse::tools(ENTER_AUTONOMOUS_NOTICE));

        if self.autonomous.is_some() {
            debug!("Autonomous loop already running");
            return;
        }

        self.generation += 1;
        info!("Starting autonomous loop {}", self.generation);
        self.autonomous = Some(AutonomousLoop::start(
            self.generation,
            Arc::clone(&self.transport),
            tx,
            self.cycle_period,
        ));
    }

    fn stop_autonomous(&mut self) {
        if let Some(handle) = self.autonomous.take() {
            info!("Stopping autonomous loop {}", handle.generation());
            handle.stop();
        }
        self.mode = Mode::Manual;
        self.push(ChatResponse::tools(STOP_AUTONOMOUS_NOTICE));
    }

    fn send_manual(&mut self, input: String, tx: mpsc::Sender<AppMessage>) {
        self.busy = true;
        let transport = Arc::clone(&self.transport);

        tokio::spawn(async move {
            let msg = match transport.send(&input).await {
                Ok(responses) => AppMessage::ChatReplied(responses),
                Err(e) => AppMessage::ChatFailed(format!("{:#}", e)),
            };
            let _ = tx.send(msg).await;
        });
    }

    fn is_current_loop(&self, generation: u64) -> bool {
        self.autonomous
            .as_ref()
            .is_some_and(|handle| handle.generation() == generation)
    }

    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::ChatReplied(responses) => {
                self.busy = false;
                for response in responses {
                    self.push(response);
                }
            }
            AppMessage::ChatFailed(error) => {
                self.busy = false;
                warn!("Chat request failed: {}", error);
                self.push(ChatResponse::tools(CHAT_ERROR_NOTICE));
            }
            AppMessage::AutonomousReplied {
                generation,
                responses,
            } => {
                if !self.is_current_loop(generation) {
                    debug!("Discarding output of stopped autonomous loop {}", generation);
                    return;
                }
                for response in responses {
                    self.push(response);
                }
            }
            AppMessage::AutonomousFailed { generation, error } => {
                if !self.is_current_loop(generation) {
                    return;
                }
                warn!("Autonomous cycle failed: {}", error);
                self.push(ChatResponse::tools(AUTONOMOUS_ERROR_NOTICE));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, tx: mpsc::Sender<AppMessage>) {
        match key {
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                if self.busy {
                    return;
                }
                let raw = std::mem::take(&mut self.input);
                self.submit(&raw, tx);
            }
            KeyCode::F(n @ 1..=4) if self.show_quick_actions() && !self.busy => {
                let action = QUICK_ACTIONS[usize::from(n - 1)];
                self.input = action.message.to_string();
                let raw = std::mem::take(&mut self.input);
                self.submit(&raw, tx);
            }
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(10),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use statuette_core::chat::MessageKind;
    use std::sync::Mutex;

    type Reply = Box<dyn Fn(&str) -> Result<Vec<ChatResponse>> + Send + Sync>;

    struct FakeTransport {
        sent: Mutex<Vec<String>>,
        reply: Reply,
    }

    impl FakeTransport {
        fn new(reply: impl Fn(&str) -> Result<Vec<ChatResponse>> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                reply: Box::new(reply),
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for FakeTransport {
        async fn send(&self, message: &str) -> Result<Vec<ChatResponse>> {
            self.sent.lock().unwrap().push(message.to_string());
            (self.reply)(message)
        }
    }

    fn cycle_reply(message: &str) -> Result<Vec<ChatResponse>> {
        assert_eq!(message, "autonomous");
        Ok(vec![
            ChatResponse::tools("Minted NFT #7"),
            ChatResponse::tools(
                "Completed autonomous action: Mint an NFT Collections with generated art. Next action in 30 seconds...",
            ),
        ])
    }

    fn contents(app: &App) -> Vec<&str> {
        app.messages
            .iter()
            .map(|m| m.response.content.as_str())
            .collect()
    }

    #[tokio::test]
    async fn wallet_request_appends_tool_reply() {
        let transport = FakeTransport::new(|_| Ok(vec![ChatResponse::tools("Balance: 0.5 ETH")]));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("  My Wallet Balance ", tx);
        assert!(app.busy);

        let msg = rx.recv().await.unwrap();
        app.handle_message(msg);

        assert!(!app.busy);
        assert_eq!(transport.sent(), vec!["my wallet balance".to_string()]);
        assert_eq!(contents(&app), vec!["my wallet balance", "Balance: 0.5 ETH"]);
        assert_eq!(app.messages[0].response.kind, MessageKind::User);
        assert_eq!(app.messages[1].response.kind, MessageKind::Tools);
    }

    #[tokio::test]
    async fn server_side_trigger_is_sent_in_manual_mode() {
        let transport = FakeTransport::new(|_| Ok(vec![ChatResponse::tools("Cycle done")]));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("self-running", tx);
        let msg = rx.recv().await.unwrap();
        app.handle_message(msg);

        assert_eq!(app.mode, Mode::Manual);
        assert_eq!(transport.sent(), vec!["self-running".to_string()]);
        assert_eq!(contents(&app), vec!["self-running", "Cycle done"]);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport.clone());
        let (tx, _rx) = mpsc::channel(8);

        app.submit("   ", tx);

        assert!(app.messages.is_empty());
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn submissions_are_ignored_while_busy() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("first", tx.clone());
        app.submit("second", tx);

        rx.recv().await.unwrap();
        assert_eq!(transport.sent(), vec!["first".to_string()]);
        assert_eq!(contents(&app), vec!["first"]);
    }

    #[tokio::test]
    async fn transport_failure_shows_error_notice() {
        let transport = FakeTransport::new(|_| Err(anyhow::anyhow!("connection refused")));
        let mut app = App::new(transport);
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("hello", tx);
        let msg = rx.recv().await.unwrap();
        app.handle_message(msg);

        assert_eq!(contents(&app), vec!["hello", CHAT_ERROR_NOTICE]);
        assert!(!app.busy);
    }

    #[tokio::test]
    async fn empty_reply_appends_nothing() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport);
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("hi", tx);
        let msg = rx.recv().await.unwrap();
        app.handle_message(msg);

        assert_eq!(contents(&app), vec!["hi"]);
    }

    #[tokio::test(start_paused = true)]
    async fn entering_autonomous_mode_runs_first_cycle() {
        let transport = FakeTransport::new(cycle_reply);
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("go autonomous", tx);
        assert_eq!(app.mode, Mode::Auto);
        assert!(app.is_autonomous_running());

        let msg = rx.recv().await.unwrap();
        app.handle_message(msg);

        let tools: Vec<_> = app
            .messages
            .iter()
            .filter(|m| !m.response.is_user())
            .map(|m| m.response.content.as_str())
            .collect();
        assert_eq!(
            tools,
            vec![
                ENTER_AUTONOMOUS_NOTICE,
                "Minted NFT #7",
                "Completed autonomous action: Mint an NFT Collections with generated art. Next action in 30 seconds...",
            ]
        );
        assert_eq!(transport.sent(), vec!["autonomous".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_trigger_keeps_one_timer() {
        let transport = FakeTransport::new(cycle_reply);
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("auto", tx.clone());
        app.handle_message(rx.recv().await.unwrap());
        app.submit("auto", tx);
        assert_eq!(transport.sent().len(), 1);

        tokio::time::sleep(Duration::from_secs(31)).await;
        while let Ok(msg) = rx.try_recv() {
            app.handle_message(msg);
        }

        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_returns_to_manual_and_no_cycle_fires() {
        let transport = FakeTransport::new(cycle_reply);
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("autonomous", tx.clone());
        app.handle_message(rx.recv().await.unwrap());

        app.submit("stop", tx);
        assert_eq!(app.mode, Mode::Manual);
        assert!(!app.is_autonomous_running());
        assert_eq!(
            app.messages.last().unwrap().response.content,
            STOP_AUTONOMOUS_NOTICE
        );

        tokio::time::sleep(Duration::from_secs(95)).await;

        assert_eq!(transport.sent().len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stop_in_manual_mode_is_forwarded() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("stop", tx);
        rx.recv().await.unwrap();

        assert_eq!(transport.sent(), vec!["stop".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn autonomous_failure_shows_retry_notice_and_keeps_running() {
        let transport = FakeTransport::new(|_| Err(anyhow::anyhow!("server returned 500")));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.submit("auto", tx);
        app.handle_message(rx.recv().await.unwrap());
        assert_eq!(
            app.messages.last().unwrap().response.content,
            AUTONOMOUS_ERROR_NOTICE
        );

        app.handle_message(rx.recv().await.unwrap());
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(app.mode, Mode::Auto);
    }

    #[tokio::test]
    async fn output_of_stopped_loop_is_discarded() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport);

        app.handle_message(AppMessage::AutonomousReplied {
            generation: 1,
            responses: vec![ChatResponse::tools("late")],
        });

        assert!(app.messages.is_empty());
    }

    #[tokio::test]
    async fn quick_action_submits_canned_message() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        app.handle_key(KeyCode::F(2), tx.clone());
        rx.recv().await.unwrap();

        assert_eq!(transport.sent(), vec!["get some faucet".to_string()]);
        assert!(app.input.is_empty());

        // Hidden once the conversation has started
        app.busy = false;
        app.handle_key(KeyCode::F(1), tx);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn typing_and_enter_submits_input() {
        let transport = FakeTransport::new(|_| Ok(vec![]));
        let mut app = App::new(transport.clone());
        let (tx, mut rx) = mpsc::channel(8);

        for c in "NFTx".chars() {
            app.handle_key(KeyCode::Char(c), tx.clone());
        }
        app.handle_key(KeyCode::Backspace, tx.clone());
        app.handle_key(KeyCode::Enter, tx);
        rx.recv().await.unwrap();

        assert_eq!(transport.sent(), vec!["nft".to_string()]);
    }
}
