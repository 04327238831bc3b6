use crate::satellite::SatelliteInfo;

/// Satellites chosen for tracking, keyed by id, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    items: Vec<SatelliteInfo>,
}

impl Selection {
    /// Adds `item` when `included` is set, removes it otherwise.
    ///
    /// Adding a present item or removing an absent one does nothing.
    pub fn toggle(&mut self, item: &SatelliteInfo, included: bool) -> &Self {
        let found = self.contains(item.id);
        if included && !found {
            self.items.push(item.clone());
        }
        if !included && found {
            self.items.retain(|entry| entry.id != item.id);
        }
        log::debug!("selection: {:?}", self.ids());
        self
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|entry| entry.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|entry| entry.id).collect()
    }
}
