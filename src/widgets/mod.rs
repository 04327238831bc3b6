pub mod control_panel;
pub mod satellites;
pub mod track_map;
