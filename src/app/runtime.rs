//! Background producers for the application loop.

use crate::app::messages::AppEvent;
use crate::input::InputService;
use crate::store::{PostSource, PostStore};
use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Spawn a blocking thread that collects terminal input and forwards actions onto a channel.
pub fn spawn_input_thread(
    tx: UnboundedSender<AppEvent>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(AppEvent::Input(action)).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    error!("Input thread error: {}", err);
                    break;
                }
            }
        }
        debug!("input thread stopped");
    })
}

/// Load the post collection once and report the outcome on the channel.
pub fn spawn_post_load(
    source: Arc<dyn PostSource>,
    tx: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = PostStore::load_from(source.as_ref()).await;
        if tx.send(AppEvent::PostsLoaded(outcome)).is_err() {
            debug!("application loop gone before posts finished loading");
        }
    })
}
