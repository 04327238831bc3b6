use tokio::sync::mpsc::UnboundedSender;

use crate::{
    animator::{AnimationState, Animator, Frame},
    config::Settings,
    error::ApiError,
    event::Event,
    n2yo::{self, Client},
    satellite::{SatelliteInfo, SatelliteTrack},
    selection::Selection,
    ticker::Ticker,
    widgets::{control_panel::ControlPanelState, satellites::SatellitesState, track_map::TrackMapState},
};

/// Application.
pub struct App {
    /// Is the application running?
    pub running: bool,

    pub settings: Settings,
    /// Satellites returned by the last nearby lookup.
    pub satellites: Vec<SatelliteInfo>,
    pub selection: Selection,
    pub loading_satellites: bool,
    pub loading_positions: bool,
    /// Last message shown to the user.
    pub status: Option<String>,

    pub animator: Animator,
    /// Last frame produced by the animator.
    pub frame: Option<Frame>,
    ticker: Option<Ticker>,
    generation: u64,

    pub satellites_state: SatellitesState,
    pub track_map_state: TrackMapState,
    pub control_panel_state: ControlPanelState,

    client: Client,
    sender: UnboundedSender<Event>,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(settings: Settings, sender: UnboundedSender<Event>) -> Self {
        let client = Client::new(&settings.base_url, &settings.api_key, settings.timeout);
        let animator = Animator::new();
        let track_map_state = TrackMapState::new(animator.projection());
        Self {
            running: true,
            settings,
            satellites: Vec::new(),
            selection: Selection::default(),
            loading_satellites: false,
            loading_positions: false,
            status: None,
            animator,
            frame: None,
            ticker: None,
            generation: 0,
            satellites_state: SatellitesState::default(),
            track_map_state,
            control_panel_state: ControlPanelState::default(),
            client,
            sender,
        }
    }

    /// Dispatches a background event to its handler.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::AnimationTick(generation) => self.on_animation_tick(generation),
            Event::SatellitesFetched(result) => self.on_satellites_fetched(result),
            Event::TracksFetched(result) => self.on_tracks_fetched(result),
            Event::Render | Event::Key(_) | Event::Mouse(_) => {}
        }
    }

    /// Looks up the satellites above the configured observer.
    pub fn refresh_satellites(&mut self) {
        if self.loading_satellites {
            return;
        }
        self.loading_satellites = true;
        self.status = Some("Loading satellites...".to_string());
        log::info!(
            "looking up {} satellites within {}° of {:?}",
            self.settings.category,
            self.settings.radius,
            self.settings.observer
        );

        let client = self.client.clone();
        let sender = self.sender.clone();
        let (observer, radius, category) = (
            self.settings.observer,
            self.settings.radius,
            self.settings.category,
        );
        tokio::spawn(async move {
            let result = n2yo::fetch_above(client, observer, radius, category).await;
            let _ = sender.send(Event::SatellitesFetched(result));
        });
    }

    pub fn on_satellites_fetched(&mut self, result: Result<Vec<SatelliteInfo>, ApiError>) {
        self.loading_satellites = false;
        match result {
            Ok(satellites) => {
                log::info!("found {} satellites", satellites.len());
                self.status = Some(format!("Found {} satellites", satellites.len()));
                self.satellites = satellites;
                self.selection.clear();
                self.satellites_state.reset();
            }
            Err(err) => {
                log::error!("failed to fetch satellites: {err}");
                self.status = Some(format!("Failed to fetch satellites: {err}"));
            }
        }
    }

    /// Toggles the membership of the satellite at `index` in the selection.
    pub fn toggle_satellite(&mut self, index: usize) {
        let Some(satellite) = self.satellites.get(index) else {
            return;
        };
        let included = !self.selection.contains(satellite.id);
        self.selection.toggle(satellite, included);
    }

    /// Returns whether a track can be requested right now.
    pub fn can_track(&self) -> bool {
        !self.selection.is_empty() && !self.loading_positions && !self.animator.is_running()
    }

    /// Fetches the positions of the selected satellites for the configured
    /// duration, then starts the animation.
    pub fn track(&mut self) {
        if !self.can_track() {
            self.status = Some(if self.selection.is_empty() {
                "Select at least one satellite".to_string()
            } else {
                "Tracking in progress".to_string()
            });
            return;
        }

        let seconds = self.settings.minutes * 60;
        self.loading_positions = true;
        self.status = Some(format!(
            "Fetching positions of {} satellites...",
            self.selection.len()
        ));
        log::info!(
            "fetching {} s of positions for {:?}",
            seconds,
            self.selection.ids()
        );

        let client = self.client.clone();
        let sender = self.sender.clone();
        let ids = self.selection.ids();
        let observer = self.settings.observer;
        tokio::spawn(async move {
            let result = n2yo::fetch_tracks(client, ids, observer, seconds).await;
            let _ = sender.send(Event::TracksFetched(result));
        });
    }

    pub fn on_tracks_fetched(&mut self, result: Result<Vec<SatelliteTrack>, ApiError>) {
        self.loading_positions = false;
        match result {
            Ok(tracks) => self.start_animation(tracks),
            Err(err) => {
                log::error!("failed to fetch satellite positions: {err}");
                self.status = Some(format!("Failed to fetch positions: {err}"));
            }
        }
    }

    /// Replaces any running session with a new one over `tracks`.
    pub fn start_animation(&mut self, tracks: Vec<SatelliteTrack>) {
        self.stop();
        if let Err(err) = self.animator.start(tracks) {
            log::error!("cannot start animation: {err}");
            self.status = Some(format!("Cannot track: {err}"));
            return;
        }
        self.generation += 1;
        self.frame = None;
        self.ticker = Some(Ticker::spawn(
            self.generation,
            self.animator.tick_interval(),
            self.sender.clone(),
        ));
        self.status = Some("Tracking".to_string());
    }

    pub fn on_animation_tick(&mut self, generation: u64) {
        let current = self.ticker.as_ref().map(Ticker::generation);
        if current != Some(generation) {
            log::trace!("dropping stale tick of session {generation}");
            return;
        }

        match self.animator.tick() {
            Some(frame) => self.frame = Some(frame),
            None => {
                self.ticker = None;
                if self.animator.state() == AnimationState::Stopped {
                    self.status = Some("Tracking finished".to_string());
                }
            }
        }
    }

    /// Stops the animation. Safe to call when nothing is running.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            self.status = Some("Tracking stopped".to_string());
        }
        self.animator.stop();
    }

    pub fn increase_minutes(&mut self) {
        self.settings.minutes = self.settings.minutes.saturating_add(1);
    }

    pub fn decrease_minutes(&mut self) {
        self.settings.minutes = self.settings.minutes.saturating_sub(1).max(1);
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.stop();
        self.running = false;
    }
}
