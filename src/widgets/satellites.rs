use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Text,
    widgets::{Block, List, ListItem, ListState, Scrollbar, ScrollbarState, StatefulWidget},
};

use crate::{app::App, satellite::SatelliteInfo, selection::Selection};

pub struct Satellites<'a> {
    pub satellites: &'a [SatelliteInfo],
    pub selection: &'a Selection,
    pub loading: bool,
}

#[derive(Default)]
pub struct SatellitesState {
    pub list_state: ListState,
    pub area: Rect,
}

impl SatellitesState {
    pub fn reset(&mut self) {
        self.list_state = ListState::default();
    }
}

impl StatefulWidget for Satellites<'_> {
    type State = SatellitesState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.area = area;

        let title = if self.loading {
            "Satellites (loading...)".to_string()
        } else {
            format!(
                "Satellites ({}/{})",
                self.selection.len(),
                self.satellites.len()
            )
        };

        let items = self.satellites.iter().map(|satellite| {
            let selected = self.selection.contains(satellite.id);
            let style = if selected {
                Style::default().fg(Color::White)
            } else {
                Style::default()
            };
            let text: String = if selected {
                format!("✓ {}", satellite)
            } else {
                format!("☐ {}", satellite)
            };
            ListItem::new(Text::styled(text, style))
        });

        let list = List::new(items)
            .block(Block::bordered().title(title.blue()))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        list.render(area, buf, &mut state.list_state);

        let inner_area = area.inner(Margin::new(0, 1));
        let mut scrollbar_state =
            ScrollbarState::new(self.satellites.len().saturating_sub(inner_area.height as usize))
                .position(state.list_state.offset());
        Scrollbar::default().render(area, buf, &mut scrollbar_state);
    }
}

pub fn select_next(app: &mut App) {
    if app.satellites.is_empty() {
        return;
    }
    let last = app.satellites.len() - 1;
    let index = app
        .satellites_state
        .list_state
        .selected()
        .map_or(0, |index| (index + 1).min(last));
    app.satellites_state.list_state.select(Some(index));
}

pub fn select_previous(app: &mut App) {
    if app.satellites.is_empty() {
        return;
    }
    let index = app
        .satellites_state
        .list_state
        .selected()
        .map_or(0, |index| index.saturating_sub(1));
    app.satellites_state.list_state.select(Some(index));
}

/// Toggles the highlighted satellite.
pub fn toggle_selected(app: &mut App) {
    if let Some(index) = app.satellites_state.list_state.selected() {
        app.toggle_satellite(index);
    }
}

pub fn handle_mouse_events(event: MouseEvent, app: &mut App) -> Result<()> {
    let inner_area = app.satellites_state.area.inner(Margin::new(1, 1));
    if !inner_area.contains(Position::new(event.column, event.row)) {
        return Ok(());
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let row = (event.row - inner_area.y) as usize + app.satellites_state.list_state.offset();
            if row < app.satellites.len() {
                app.satellites_state.list_state.select(Some(row));
                app.toggle_satellite(row);
            }
        }
        MouseEventKind::ScrollDown => {
            let max_offset = app
                .satellites
                .len()
                .saturating_sub(inner_area.height as usize);
            *app.satellites_state.list_state.offset_mut() =
                (app.satellites_state.list_state.offset() + 1).min(max_offset);
        }
        MouseEventKind::ScrollUp => {
            *app.satellites_state.list_state.offset_mut() =
                app.satellites_state.list_state.offset().saturating_sub(1);
        }
        _ => {}
    }

    Ok(())
}
