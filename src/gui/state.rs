//! Overlay state management.
//!
//! Holds what each side currently displays and whether the tracker is alive.

use crate::tracker::{Side, SideUpdate};

/// Message from the tracker thread to the GUI.
#[derive(Clone, Debug)]
pub enum TrackerEvent {
    Updated(SideUpdate),
    /// The refresh loop exited, with the failure reason if it did not stop cleanly
    Stopped(Option<String>),
}

/// Tracker status for display in the footer.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TrackerStatus {
    #[default]
    Running,
    Stopped,
    Error(String),
}

/// What one column of the overlay shows: a name label and three icon rows.
#[derive(Clone, Debug, PartialEq)]
pub struct SideView {
    pub name: String,
    pub weak_to: Vec<String>,
    pub resists: Vec<String>,
    pub immune_to: Vec<String>,
}

impl SideView {
    /// Initial view before the first update arrives.
    pub fn placeholder(side: Side) -> Self {
        Self {
            name: side.placeholder().to_string(),
            weak_to: Vec::new(),
            resists: Vec::new(),
            immune_to: Vec::new(),
        }
    }

    /// Replaces the whole view with the latest result.
    ///
    /// An unresolved name is shown verbatim, even when empty.
    pub fn apply(&mut self, update: &SideUpdate) {
        let effectiveness = &update.effectiveness;
        self.name = update.name.clone();
        self.weak_to = effectiveness.weak_to.iter().cloned().collect();
        self.resists = effectiveness.resists.iter().cloned().collect();
        self.immune_to = effectiveness.immune_to.iter().cloned().collect();
    }
}

/// Overlay application state.
#[derive(Clone, Debug)]
pub struct OverlayState {
    pub mine: SideView,
    pub rival: SideView,
    pub status: TrackerStatus,
    pub refresh_interval_ms: u64,
}

impl OverlayState {
    pub fn new(refresh_interval_ms: u64) -> Self {
        Self {
            mine: SideView::placeholder(Side::Mine),
            rival: SideView::placeholder(Side::Rival),
            status: TrackerStatus::Running,
            refresh_interval_ms,
        }
    }

    pub fn side(&self, side: Side) -> &SideView {
        match side {
            Side::Mine => &self.mine,
            Side::Rival => &self.rival,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideView {
        match side {
            Side::Mine => &mut self.mine,
            Side::Rival => &mut self.rival,
        }
    }

    pub fn apply_event(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::Updated(update) => self.side_mut(update.side).apply(&update),
            TrackerEvent::Stopped(None) => self.status = TrackerStatus::Stopped,
            TrackerEvent::Stopped(Some(error)) => self.status = TrackerStatus::Error(error),
        }
    }

    /// Footer line describing the refresh period, or why updates stopped.
    pub fn footer_text(&self) -> String {
        match &self.status {
            TrackerStatus::Running => {
                let secs = self.refresh_interval_ms as f64 / 1000.0;
                format!("Updates every {} seconds", secs)
            }
            TrackerStatus::Stopped => "Updates stopped".to_string(),
            TrackerStatus::Error(msg) => format!("Updates stopped: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Effectiveness;

    fn update(side: Side, name: &str, weak_to: &[&str], immune_to: &[&str]) -> SideUpdate {
        SideUpdate {
            side,
            raw_text: name.to_string(),
            name: name.to_string(),
            types: vec!["Ghost".to_string()],
            effectiveness: Effectiveness {
                weak_to: weak_to.iter().map(|s| s.to_string()).collect(),
                resists: Default::default(),
                immune_to: immune_to.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_initial_state_shows_placeholders() {
        let state = OverlayState::new(3000);
        assert_eq!(state.side(Side::Mine).name, "Your Pokémon");
        assert_eq!(state.side(Side::Rival).name, "Rival Pokémon");
        assert!(state.mine.weak_to.is_empty());
        assert_eq!(state.status, TrackerStatus::Running);
    }

    #[test]
    fn test_update_replaces_only_its_side() {
        let mut state = OverlayState::new(3000);
        state.apply_event(TrackerEvent::Updated(update(
            Side::Rival,
            "Gengar",
            &["Psychic", "Ghost"],
            &["Normal"],
        )));

        assert_eq!(state.rival.name, "Gengar");
        // BTreeSet iteration gives alphabetical order
        assert_eq!(state.rival.weak_to, vec!["Ghost", "Psychic"]);
        assert_eq!(state.rival.immune_to, vec!["Normal"]);
        assert_eq!(state.mine, SideView::placeholder(Side::Mine));
    }

    #[test]
    fn test_later_update_clears_previous_rows() {
        let mut state = OverlayState::new(3000);
        state.apply_event(TrackerEvent::Updated(update(Side::Mine, "Gengar", &["Dark"], &[])));
        state.apply_event(TrackerEvent::Updated(update(Side::Mine, "", &[], &[])));

        assert_eq!(state.mine.name, "");
        assert!(state.mine.weak_to.is_empty());
    }

    #[test]
    fn test_footer_text() {
        let mut state = OverlayState::new(3000);
        assert_eq!(state.footer_text(), "Updates every 3 seconds");

        state.refresh_interval_ms = 1500;
        assert_eq!(state.footer_text(), "Updates every 1.5 seconds");

        state.apply_event(TrackerEvent::Stopped(Some("receiver gone".to_string())));
        assert_eq!(state.footer_text(), "Updates stopped: receiver gone");

        state.apply_event(TrackerEvent::Stopped(None));
        assert_eq!(state.status, TrackerStatus::Stopped);
    }
}
