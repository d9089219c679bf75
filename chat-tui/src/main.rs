//! AgentStatuette - terminal chat for your onchain agent
//!
//! Talks to the chat server over `POST /api/chat`. Type a request, use a
//! quick action, or say "auto" to let the agent act on its own.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod autonomous;
mod transport;
mod ui;

use app::{App, AppMessage};
use transport::HttpChatClient;

#[derive(Parser, Debug)]
#[command(name = "statuette")]
#[command(about = "AgentStatuette - terminal chat for your onchain agent")]
#[command(version)]
struct Cli {
    /// Chat server URL
    #[arg(short, long, default_value = "http://localhost:3000")]
    server: String,

    /// File receiving the client's logs
    #[arg(long, default_value = "statuette.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file so the terminal stays clean
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statuette_tui=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .init();

    let client = HttpChatClient::new(cli.server);
    tracing::info!("Using chat server {}", client.base_url());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(client));

    // Create message channel for async operations
    let (tx, mut rx) = mpsc::channel::<AppMessage>(32);

    let result = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    // Tear down the autonomous timer before leaving
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AppMessage>,
    rx: &mut mpsc::Receiver<AppMessage>,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| ui::render(f, app))?;

        // Handle async messages
        while let Ok(msg) = rx.try_recv() {
            app.handle_message(msg);
        }

        // Poll for events with timeout
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global quit
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if key.code == KeyCode::Esc || ctrl_c {
                        app.request_quit();
                    } else {
                        app.handle_key(key.code, tx.clone());
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
