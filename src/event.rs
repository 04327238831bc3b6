use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

use crate::{
    error::ApiError,
    satellite::{SatelliteInfo, SatelliteTrack},
};

/// Terminal and application events.
#[derive(Debug)]
pub enum Event {
    Render,
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Animation tick of the session with the given generation.
    AnimationTick(u64),
    SatellitesFetched(Result<Vec<SatelliteInfo>, ApiError>),
    TracksFetched(Result<Vec<SatelliteTrack>, ApiError>),
}

/// Terminal event handler.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Event handler thread.
    handler: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`].
    pub fn new() -> Self {
        const RENDER_RATE: f64 = 30.0;

        let render_delay = Duration::from_secs_f64(1.0 / RENDER_RATE);
        let (sender, receiver) = mpsc::unbounded_channel();
        let _sender = sender.clone();
        let handler = tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut render_interval = tokio::time::interval(render_delay);
            loop {
                let crossterm_event = reader.next().fuse();
                let event = tokio::select! {
                  _ = _sender.closed() => {
                    break;
                  }
                  _ = render_interval.tick() => Event::Render,
                  Some(Ok(event)) = crossterm_event => {
                    match event {
                      CrosstermEvent::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        Event::Key(key)
                      },
                      CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
                      _ => continue,
                    }
                  }
                };
                if _sender.send(event).is_err() {
                    break;
                }
            }
        });
        Self {
            sender,
            receiver,
            handler,
        }
    }

    /// Returns a sender that background tasks use to post events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Receive the next event from the handler thread.
    ///
    /// This function will always block the current thread if
    /// there is no data available and it's possible for more data to be sent.
    pub async fn next(&mut self) -> Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| std::io::Error::other("event channel closed").into())
    }

    /// Stops reading terminal events.
    pub fn close(&self) {
        self.handler.abort();
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
