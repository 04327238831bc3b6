use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line, Points},
        Block, StatefulWidget, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::{
    animator::{Caption, Frame},
    projection::{Projection, SURFACE_HEIGHT, SURFACE_WIDTH},
};

const HEADLINE_SIZE: u16 = 14;

pub struct TrackMap<'a> {
    pub frame: Option<&'a Frame>,
    pub loading: bool,
    pub graticule_color: Color,
    pub text_color: Color,
}

pub struct TrackMapState {
    /// Projected outline and graticule, in surface pixels.
    pub graticule: Vec<Vec<(f64, f64)>>,
    pub inner_area: Rect,
}

impl TrackMapState {
    pub fn new(projection: &Projection) -> Self {
        Self {
            graticule: projection.graticule(),
            inner_area: Rect::default(),
        }
    }
}

impl StatefulWidget for TrackMap<'_> {
    type State = TrackMapState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered().title("Satellite ground track".blue());
        state.inner_area = block.inner(area);
        block.render(area, buf);

        // Width of one terminal cell in surface pixels
        let cell_width = SURFACE_WIDTH / state.inner_area.width.max(1) as f64;

        let canvas = Canvas::default()
            .paint(|ctx| {
                for line in &state.graticule {
                    for window in line.windows(2) {
                        let (x1, y1) = window[0];
                        let (x2, y2) = window[1];
                        ctx.draw(&Line::new(
                            x1,
                            flip(y1),
                            x2,
                            flip(y2),
                            self.graticule_color,
                        ));
                    }
                }
                ctx.layer();

                if self.loading {
                    let caption = Caption {
                        text: "Loading positions...".to_string(),
                        x: SURFACE_WIDTH / 2.0,
                        y: SURFACE_HEIGHT / 2.0,
                        font: crate::animator::TITLE_FONT,
                    };
                    print_centered(ctx, &caption, self.text_color, cell_width);
                }

                let Some(frame) = self.frame else {
                    return;
                };
                for marker in &frame.markers {
                    let coords = disk(marker.x, marker.y, marker.radius);
                    ctx.draw(&Points {
                        coords: &coords,
                        color: marker.color,
                    });
                }
                ctx.layer();
                for marker in &frame.markers {
                    print_centered(ctx, &marker.label, marker.color, cell_width);
                }
                print_centered(ctx, &frame.title, self.text_color, cell_width);
            })
            .x_bounds([0.0, SURFACE_WIDTH])
            .y_bounds([0.0, SURFACE_HEIGHT]);

        canvas.render(state.inner_area, buf);
    }
}

/// Converts a surface y coordinate (growing downwards) to canvas space.
fn flip(y: f64) -> f64 {
    SURFACE_HEIGHT - y
}

fn print_centered(ctx: &mut Context, caption: &Caption, color: Color, cell_width: f64) {
    if caption.text.is_empty() {
        return;
    }
    let mut style = Style::default().fg(color);
    if caption.font.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    // Headline sized text is underlined since cells cannot grow.
    if caption.font.size >= HEADLINE_SIZE {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    let x = caption.x - caption.text.width() as f64 * cell_width / 2.0;
    ctx.print(
        x.max(0.0),
        flip(caption.y),
        Span::styled(caption.text.clone(), style),
    );
}

/// Returns the surface points covered by a filled circle.
fn disk(x: f64, y: f64, radius: f64) -> Vec<(f64, f64)> {
    let steps = radius.ceil() as i32;
    let mut points = Vec::new();
    for dx in -steps..=steps {
        for dy in -steps..=steps {
            let (dx, dy) = (dx as f64, dy as f64);
            if dx * dx + dy * dy <= radius * radius {
                points.push((x + dx, flip(y + dy)));
            }
        }
    }
    points
}
