//! Autonomous loop: posts the autonomous trigger on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::app::AppMessage;
use crate::transport::ChatTransport;

/// Message the server recognizes as an autonomous cycle request.
pub const AUTONOMOUS_MESSAGE: &str = "autonomous";

/// Owned handle to a running autonomous loop.
///
/// The first cycle runs immediately, then one per period. A cycle is awaited
/// before the next tick is taken, so cycles never overlap. Stopping or
/// dropping the handle cancels both the pending tick and a cycle in flight.
pub struct AutonomousLoop {
    generation: u64,
    abort_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl AutonomousLoop {
    pub fn start(
        generation: u64,
        transport: Arc<dyn ChatTransport>,
        tx: mpsc::Sender<AppMessage>,
        period: Duration,
    ) -> Self {
        let (abort_tx, mut abort_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut abort_rx => break,
                    _ = ticker.tick() => {}
                }

                debug!("Autonomous cycle {} starting", generation);
                let result = tokio::select! {
                    _ = &mut abort_rx => break,
                    result = transport.send(AUTONOMOUS_MESSAGE) => result,
                };

                let msg = match result {
                    Ok(responses) => AppMessage::AutonomousReplied {
                        generation,
                        responses,
                    },
                    Err(e) => {
                        warn!("Autonomous cycle failed: {:#}", e);
                        AppMessage::AutonomousFailed {
                            generation,
                            error: e.to_string(),
                        }
                    }
                };

                if tx.send(msg).await.is_err() {
                    // Receiver closed
                    break;
                }
            }

            info!("Autonomous loop {} stopped", generation);
        });

        Self {
            generation,
            abort_tx: Some(abort_tx),
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(tx) = self.abort_tx.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

impl Drop for AutonomousLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
