use std::time::Duration;

use chrono::DateTime;
use ratatui::style::Color;

use crate::{
    color::OrdinalScale,
    error::TrackError,
    projection::{Projection, SURFACE_WIDTH},
    satellite::{label_from_name, Position, SatelliteInfo, SatelliteTrack},
};

/// Number of samples the cursor advances per tick
pub const STEP_SIZE: usize = 60;
/// Wall-clock time between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

const MARKER_RADIUS: f64 = 4.0;
const LABEL_OFFSET: f64 = 14.0;
const TITLE_Y: f64 = 10.0;

/// Animation lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Running {
        cursor: usize,
    },
    Stopped,
}

impl AnimationState {
    /// Advances the state by one tick over a series of `len` samples.
    ///
    /// Returns the next state and the index to draw, if any.
    pub fn step(self, len: usize, step_size: usize) -> (Self, Option<usize>) {
        match self {
            Self::Running { cursor } if cursor >= len => (Self::Stopped, None),
            Self::Running { cursor } => (
                Self::Running {
                    cursor: cursor + step_size,
                },
                Some(cursor),
            ),
            state => (state, None),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    /// Size in pixels
    pub size: u16,
    pub bold: bool,
}

pub const TITLE_FONT: Font = Font {
    size: 14,
    bold: true,
};
pub const LABEL_FONT: Font = Font {
    size: 11,
    bold: true,
};

/// Horizontally centered text anchored at a surface point.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

/// Filled circle with a caption below it.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
    pub label: Caption,
}

/// Everything drawn on the cleared surface for one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub cursor: usize,
    pub timestamp: i64,
    pub title: Caption,
    pub markers: Vec<Marker>,
}

/// Steps through pre-fetched position series and produces frames.
///
/// The animator knows nothing about timers: whoever owns it calls
/// [`Animator::tick`] on the configured cadence.
#[derive(Clone, Debug)]
pub struct Animator {
    tracks: Vec<SatelliteTrack>,
    state: AnimationState,
    step_size: usize,
    tick_interval: Duration,
    projection: Projection,
    colors: OrdinalScale,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            state: AnimationState::Idle,
            step_size: STEP_SIZE,
            tick_interval: TICK_INTERVAL,
            projection: Projection::default(),
            colors: OrdinalScale::default(),
        }
    }
}

impl Animator {
    /// Constructs a new instance of [`Animator`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn tracks(&self) -> &[SatelliteTrack] {
        &self.tracks
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Length of the shared position series.
    pub fn len(&self) -> usize {
        self.tracks.first().map_or(0, SatelliteTrack::len)
    }

    /// Replaces the current session with a new one over `tracks`.
    ///
    /// The series must be non-empty and of equal length. Timestamps that
    /// drift between satellites are tolerated but logged.
    pub fn start(&mut self, tracks: Vec<SatelliteTrack>) -> Result<(), TrackError> {
        let first = tracks.first().ok_or(TrackError::NoTracks)?;
        let expected = first.len();
        for track in &tracks {
            if track.is_empty() {
                return Err(TrackError::EmptySeries {
                    name: track.info.name.clone(),
                });
            }
            if track.len() != expected {
                return Err(TrackError::LengthMismatch {
                    name: track.info.name.clone(),
                    expected,
                    actual: track.len(),
                });
            }
        }

        if let Some(track) = tracks.iter().skip(1).find(|track| {
            track
                .positions
                .iter()
                .zip(&first.positions)
                .any(|(a, b)| a.timestamp != b.timestamp)
        }) {
            log::warn!(
                "timestamps of {} are not aligned with {}",
                track.info.name,
                first.info.name
            );
        }

        log::info!(
            "starting animation of {} satellites over {} samples",
            tracks.len(),
            expected
        );
        self.tracks = tracks;
        self.state = AnimationState::Running { cursor: 0 };
        Ok(())
    }

    /// Advances one tick.
    ///
    /// Returns the frame to draw, or `None` when the session has just
    /// finished or is not running.
    pub fn tick(&mut self) -> Option<Frame> {
        let (state, cursor) = self.state.step(self.len(), self.step_size);
        if state != self.state && state == AnimationState::Stopped {
            log::info!("animation finished");
        }
        self.state = state;
        let cursor = cursor?;

        let timestamp = self.tracks[0].positions[cursor].timestamp;
        let title = Caption {
            text: format_timestamp(timestamp),
            x: SURFACE_WIDTH / 2.0,
            y: TITLE_Y,
            font: TITLE_FONT,
        };

        let Self {
            tracks,
            projection,
            colors,
            ..
        } = self;
        let markers = tracks
            .iter()
            .filter_map(|track| draw_marker(projection, colors, &track.info, &track.positions[cursor]))
            .collect();

        Some(Frame {
            cursor,
            timestamp,
            title,
            markers,
        })
    }

    /// Stops the current session. Does nothing if no session is running.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            log::info!("animation stopped");
            self.state = AnimationState::Stopped;
        }
    }

    /// Builds the marker of one satellite, or `None` without a position fix.
    pub fn draw_satellite(&mut self, info: &SatelliteInfo, position: &Position) -> Option<Marker> {
        draw_marker(&self.projection, &mut self.colors, info, position)
    }
}

fn draw_marker(
    projection: &Projection,
    colors: &mut OrdinalScale,
    info: &SatelliteInfo,
    position: &Position,
) -> Option<Marker> {
    let Some((longitude, latitude)) = position.fix() else {
        log::debug!("{} has no fix at {}", info.name, position.timestamp);
        return None;
    };

    let label = label_from_name(&info.name);
    let (x, y) = projection.project(longitude, latitude);
    let color = colors.color(&label);

    Some(Marker {
        x,
        y,
        radius: MARKER_RADIUS,
        color,
        label: Caption {
            text: label,
            x,
            y: y + LABEL_OFFSET,
            font: LABEL_FONT,
        },
    })
}

/// Formats unix seconds as a UTC date and time.
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn track(id: u64, name: &str, len: usize) -> SatelliteTrack {
        SatelliteTrack {
            info: SatelliteInfo::new(id, name),
            positions: (0..len)
                .map(|i| Position::new(1000 + i as i64, 10.0 + i as f64 * 0.01, 20.0))
                .collect(),
        }
    }

    fn run_to_end(animator: &mut Animator) -> Vec<Frame> {
        let mut frames = Vec::new();
        while animator.is_running() {
            frames.extend(animator.tick());
        }
        frames
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(59)]
    #[case(60)]
    #[case(61)]
    #[case(120)]
    #[case(301)]
    fn frame_count(#[case] len: usize) {
        let mut animator = Animator::new();
        animator.start(vec![track(1, "STARLINK-1", len)]).unwrap();
        let frames = run_to_end(&mut animator);
        assert_eq!(frames.len(), len.div_ceil(STEP_SIZE));
        assert_eq!(animator.state(), AnimationState::Stopped);
        let cursors: Vec<_> = frames.iter().map(|frame| frame.cursor).collect();
        let expected: Vec<_> = (0..len).step_by(STEP_SIZE).collect();
        assert_eq!(cursors, expected);
    }

    #[test]
    fn two_sample_scenario() {
        let mut animator = Animator::new();
        animator
            .start(vec![SatelliteTrack {
                info: SatelliteInfo::new(42, "STARLINK-42"),
                positions: vec![Position::new(1000, 10.0, 20.0), Position::new(1060, 11.0, 21.0)],
            }])
            .unwrap();

        let frame = animator.tick().expect("first tick draws");
        assert_eq!(frame.cursor, 0);
        assert_eq!(frame.timestamp, 1000);
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].label.text, "42");
        assert_eq!(animator.state(), AnimationState::Running { cursor: 60 });

        assert_eq!(animator.tick(), None);
        assert_eq!(animator.state(), AnimationState::Stopped);
        assert_eq!(animator.tick(), None);
    }

    #[test]
    fn step_transitions() {
        assert_eq!(
            AnimationState::Running { cursor: 0 }.step(2, 60),
            (AnimationState::Running { cursor: 60 }, Some(0))
        );
        assert_eq!(
            AnimationState::Running { cursor: 60 }.step(2, 60),
            (AnimationState::Stopped, None)
        );
        assert_eq!(AnimationState::Idle.step(2, 60), (AnimationState::Idle, None));
        assert_eq!(
            AnimationState::Stopped.step(2, 60),
            (AnimationState::Stopped, None)
        );
    }

    #[test]
    fn title_is_centered_at_the_top() {
        let mut animator = Animator::new();
        animator.start(vec![track(1, "STARLINK-1", 1)]).unwrap();
        let frame = animator.tick().unwrap();
        assert_eq!(frame.title.x, 480.0);
        assert_eq!(frame.title.y, 10.0);
        assert_eq!(frame.title.font, TITLE_FONT);
        assert_eq!(frame.title.text, "1970-01-01 00:16:40 UTC");
    }

    #[test]
    fn marker_geometry() {
        let mut animator = Animator::new();
        let marker = animator
            .draw_satellite(&SatelliteInfo::new(7, "STARLINK-7"), &Position::new(0, 10.0, 20.0))
            .unwrap();
        let (x, y) = Projection::default().project(20.0, 10.0);
        assert_eq!((marker.x, marker.y), (x, y));
        assert_eq!(marker.radius, 4.0);
        assert_eq!((marker.label.x, marker.label.y), (x, y + 14.0));
        assert_eq!(marker.label.font, LABEL_FONT);
    }

    #[rstest]
    #[case(Position::new(0, 0.0, 20.0))]
    #[case(Position::new(0, 10.0, 0.0))]
    #[case(Position { latitude: None, ..Position::new(0, 10.0, 20.0) })]
    #[case(Position { longitude: None, ..Position::new(0, 10.0, 20.0) })]
    fn missing_fix_draws_nothing(#[case] position: Position) {
        let mut animator = Animator::new();
        assert_eq!(
            animator.draw_satellite(&SatelliteInfo::new(1, "STARLINK-1"), &position),
            None
        );
    }

    #[test]
    fn bad_satellite_does_not_abort_frame() {
        let mut no_fix = track(1, "STARLINK-1", 1);
        no_fix.positions[0].latitude = Some(0.0);
        let no_digits = track(2, "NOSTARLINKNAME", 1);
        let good = track(3, "STARLINK-3", 1);

        let mut animator = Animator::new();
        animator.start(vec![no_fix, no_digits, good]).unwrap();
        let frame = animator.tick().unwrap();

        let labels: Vec<_> = frame.markers.iter().map(|m| m.label.text.as_str()).collect();
        assert_eq!(labels, vec!["", "3"]);
    }

    #[test]
    fn colors_are_stable_across_ticks_and_sessions() {
        let mut animator = Animator::new();
        animator
            .start(vec![track(1, "STARLINK-1", 61), track(2, "STARLINK-2", 61)])
            .unwrap();
        let first = animator.tick().unwrap();
        let second = animator.tick().unwrap();
        assert_eq!(first.markers[0].color, second.markers[0].color);
        assert_ne!(first.markers[0].color, first.markers[1].color);

        animator
            .start(vec![track(2, "STARLINK-2", 1), track(1, "STARLINK-1", 1)])
            .unwrap();
        let third = animator.tick().unwrap();
        assert_eq!(third.markers[1].color, first.markers[0].color);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut animator = Animator::new();
        animator.stop();
        assert_eq!(animator.state(), AnimationState::Idle);

        animator.start(vec![track(1, "STARLINK-1", 200)]).unwrap();
        animator.tick();
        animator.stop();
        animator.stop();
        assert_eq!(animator.state(), AnimationState::Stopped);
        assert_eq!(animator.tick(), None);
    }

    #[test]
    fn restart_resets_cursor() {
        let mut animator = Animator::new();
        animator.start(vec![track(1, "STARLINK-1", 200)]).unwrap();
        animator.tick();
        animator.tick();
        animator.start(vec![track(2, "STARLINK-2", 200)]).unwrap();
        assert_eq!(animator.state(), AnimationState::Running { cursor: 0 });
        assert_eq!(animator.tick().unwrap().markers[0].label.text, "2");
    }

    #[test]
    fn start_validates_series() {
        let mut animator = Animator::new();
        assert_eq!(animator.start(Vec::new()), Err(TrackError::NoTracks));
        assert_eq!(
            animator.start(vec![track(1, "A-1", 0)]),
            Err(TrackError::EmptySeries {
                name: "A-1".to_string()
            })
        );
        assert_eq!(
            animator.start(vec![track(1, "A-1", 3), track(2, "B-2", 2)]),
            Err(TrackError::LengthMismatch {
                name: "B-2".to_string(),
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(animator.state(), AnimationState::Idle);
    }
}
