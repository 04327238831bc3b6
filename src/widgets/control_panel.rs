use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::{palette::tailwind, Style, Stylize},
    text::{Line, Text},
    widgets::{Block, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    animator::{format_timestamp, AnimationState},
    app::App,
};

pub struct ControlPanel<'a> {
    pub app: &'a App,
}

#[derive(Default)]
pub struct ControlPanelState {
    pub table_state: TableState,
}

impl ControlPanel<'_> {
    fn items(&self) -> Vec<(&'static str, String)> {
        let app = self.app;
        let settings = &app.settings;

        let state = if app.loading_positions {
            "Fetching positions".to_string()
        } else {
            match app.animator.state() {
                AnimationState::Idle => "Idle".to_string(),
                AnimationState::Running { cursor } => format!(
                    "Tracking {}/{}",
                    cursor.min(app.animator.len()),
                    app.animator.len()
                ),
                AnimationState::Stopped => "Stopped".to_string(),
            }
        };

        let mut items = vec![
            ("Latitude", format!("{:.4}", settings.observer.latitude)),
            ("Longitude", format!("{:.4}", settings.observer.longitude)),
            ("Altitude", format!("{} m", settings.observer.altitude)),
            ("Radius", format!("{}°", settings.radius)),
            ("Category", settings.category.to_string()),
            ("Duration", format!("{} min", settings.minutes)),
            ("Selected", app.selection.len().to_string()),
            ("State", state),
            (
                "Time",
                app.frame
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |frame| format_timestamp(frame.timestamp)),
            ),
            (
                "Sample",
                app.frame
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |frame| frame.cursor.to_string()),
            ),
            ("Status", app.status.clone().unwrap_or_default()),
        ];

        // Sample of the first tracked satellite as seen from the observer
        let lead = app.frame.as_ref().and_then(|frame| {
            let track = app.animator.tracks().first()?;
            Some((&track.info, track.positions.get(frame.cursor)?))
        });
        if let Some((info, position)) = lead {
            items.extend([
                ("Lead", info.name.clone()),
                ("Alt", format_optional(position.altitude, " km")),
                ("Az", format_optional(position.azimuth, "°")),
                ("El", format_optional(position.elevation, "°")),
            ]);
        }

        let highlighted = app
            .satellites_state
            .list_state
            .selected()
            .and_then(|index| app.satellites.get(index));
        if let Some(satellite) = highlighted {
            items.extend([
                ("Name", satellite.name.clone()),
                ("NORAD ID", satellite.id.to_string()),
                ("COSPAR ID", satellite.cospar_id.clone().unwrap_or_default()),
                ("Launched", satellite.launch_date.clone().unwrap_or_default()),
                ("Sat lat", format_optional(satellite.latitude, "°")),
                ("Sat lng", format_optional(satellite.longitude, "°")),
                ("Sat alt", format_optional(satellite.altitude, " km")),
            ]);
        }

        items
    }
}

impl StatefulWidget for ControlPanel<'_> {
    type State = ControlPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered().title("Observer".blue());
        let inner_area = area.inner(Margin::new(1, 1));
        let [table_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(inner_area);

        let items = self.items();
        let max_key_width = items
            .iter()
            .map(|(key, _)| key.width() as u16)
            .max()
            .unwrap_or_default();

        let widths = [Constraint::Max(max_key_width), Constraint::Fill(1)];
        let [_left, right] = Layout::horizontal(widths)
            .areas(table_area)
            .map(|rect| rect.width);
        let right = right.saturating_sub(1) as usize;

        let rows = items.iter().enumerate().map(|(i, (key, value))| {
            let color = match i % 2 {
                0 => tailwind::SLATE.c950,
                _ => tailwind::SLATE.c900,
            };
            Row::new([
                Cell::from(Text::from(key.bold())),
                Cell::from(Text::from(truncate(value, right))),
            ])
            .style(Style::new().bg(color))
            .height(1)
        });

        block.render(area, buf);
        let table = Table::new(rows, widths);
        StatefulWidget::render(table, table_area, buf, &mut state.table_state);

        let help = Paragraph::new(vec![
            Line::from("r refresh  space select  t track  s stop".dark_gray()),
            Line::from("+/- duration  q quit".dark_gray()),
        ])
        .wrap(Wrap { trim: true });
        help.render(help_area, buf);
    }
}

fn format_optional(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}{unit}"))
}

/// Shortens `value` to `width` columns, ending with "..." when cut.
fn truncate(value: &str, width: usize) -> String {
    if value.width() <= width {
        return value.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut result = String::new();
    for c in value.chars() {
        if result.width() + c.to_string().width() > keep {
            break;
        }
        result.push(c);
    }
    result + "..."
}
