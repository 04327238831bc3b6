use std::io;

use anyhow::Result;
use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{
    app::App,
    config::{Cli, Settings},
    event::{Event, EventHandler},
    handler::{handle_key_events, handle_mouse_events},
    tui::Tui,
};

pub mod animator;
pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod n2yo;
pub mod projection;
pub mod satellite;
pub mod selection;
pub mod ticker;
pub mod tui;
pub mod widgets;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = config::init_logger(cli.log_file.clone())?;
    log::info!("logging to {}", log_path.display());

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new();
    let sender = events.sender();
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    // Create an application and look up the satellites above the observer.
    let mut app = App::new(Settings::from(cli), sender);
    app.refresh_satellites();

    // Start the main loop.
    while app.running {
        // Handle events.
        match tui.events.next().await? {
            Event::Render => tui.render(&mut app)?,
            Event::Key(event) => handle_key_events(event, &mut app)?,
            Event::Mouse(event) => handle_mouse_events(event, &mut app)?,
            event => app.handle_event(event),
        }
    }

    // Exit the user interface.
    tui.events.close();
    tui.exit()?;
    log::info!("exiting");
    Ok(())
}
