use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::{app::App, widgets::satellites};

pub fn handle_key_events(event: KeyEvent, app: &mut App) -> Result<()> {
    match event.code {
        // Exit application on `ESC` or `q`
        KeyCode::Esc | KeyCode::Char('q') => {
            app.quit();
        }
        // Exit application on `Ctrl-C`
        KeyCode::Char('c') if event.modifiers == KeyModifiers::CONTROL => {
            app.quit();
        }
        KeyCode::Char('r') => app.refresh_satellites(),
        KeyCode::Char('t') => app.track(),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.increase_minutes(),
        KeyCode::Char('-') => app.decrease_minutes(),
        KeyCode::Down | KeyCode::Char('j') => satellites::select_next(app),
        KeyCode::Up | KeyCode::Char('k') => satellites::select_previous(app),
        KeyCode::Char(' ') | KeyCode::Enter => satellites::toggle_selected(app),
        _ => {}
    }
    Ok(())
}

pub fn handle_mouse_events(event: MouseEvent, app: &mut App) -> Result<()> {
    satellites::handle_mouse_events(event, app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        config::{Cli, Settings},
        satellite::SatelliteInfo,
    };

    fn app() -> App {
        let cli = Cli::try_parse_from(["groundtrack", "--api-key", "key"]).unwrap();
        let (sender, _receiver) = mpsc::unbounded_channel();
        App::new(Settings::from(cli), sender)
    }

    fn press(code: KeyCode, app: &mut App) {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app).unwrap();
    }

    #[test]
    fn keyboard_selection() {
        let mut app = app();
        app.on_satellites_fetched(Ok(vec![
            SatelliteInfo::new(1, "STARLINK-1"),
            SatelliteInfo::new(2, "STARLINK-2"),
        ]));

        press(KeyCode::Down, &mut app);
        press(KeyCode::Down, &mut app);
        press(KeyCode::Char(' '), &mut app);
        assert_eq!(app.selection.ids(), vec![2]);

        press(KeyCode::Enter, &mut app);
        assert!(app.selection.is_empty());
    }

    #[test]
    fn duration_keys() {
        let mut app = app();
        press(KeyCode::Char('+'), &mut app);
        assert_eq!(app.settings.minutes, 6);
        press(KeyCode::Char('-'), &mut app);
        press(KeyCode::Char('-'), &mut app);
        assert_eq!(app.settings.minutes, 4);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        press(KeyCode::Char('s'), &mut app);
        assert!(app.running);
        handle_key_events(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut app)
            .unwrap();
        assert!(!app.running);
    }
}
