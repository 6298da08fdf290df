//! # Zone Store
//!
//! Owns one instance's zone mapping. Every mutation builds a new mapping and
//! swaps it in whole, so a snapshot taken by a reader is never half-updated.

use std::sync::Arc;

use log::{info, warn};
use trains_shared::zone::{Zone, ZoneConfig, ZoneTarget};

use super::geometry::{validate_new_zone, ZoneRejection};

#[derive(Debug, Clone, Default)]
pub struct ZoneStore {
    zones: Arc<ZoneConfig>,
}

impl ZoneStore {
    pub fn new(zones: ZoneConfig) -> Self {
        Self { zones: Arc::new(zones) }
    }

    /// Current mapping. Later mutations do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<ZoneConfig> {
        Arc::clone(&self.zones)
    }

    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.zones.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Insert a new zone after validation.
    ///
    /// The stored zone is always unlinked and disabled, whatever the
    /// candidate carried.
    pub fn add_zone(&mut self, candidate: Zone) -> Result<(), ZoneRejection> {
        validate_new_zone(&self.zones, &candidate)?;

        let zone = Zone {
            link: None,
            enabled: false,
            ..candidate
        };
        self.replace(|zones| {
            zones.insert(zone.name.clone(), zone);
        });
        Ok(())
    }

    /// Remove a zone. Returns false when no zone has that name.
    pub fn delete_zone(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            warn!("Unknown zone {}", name);
            return false;
        }
        self.replace(|zones| {
            zones.remove(name);
        });
        true
    }

    /// Enable or disable a zone.
    ///
    /// Does not require a link to be present before enabling.
    pub fn set_status(&mut self, name: &str, enabled: bool) -> bool {
        if !self.contains(name) {
            warn!("Unknown zone {}", name);
            return false;
        }
        self.replace(|zones| {
            if let Some(zone) = zones.get_mut(name) {
                zone.enabled = enabled;
            }
        });
        info!("Setting zone {} status {}", name, enabled);
        true
    }

    /// Point a zone at a named zone on another instance
    pub fn set_link(&mut self, name: &str, target: ZoneTarget) -> bool {
        if !self.contains(name) {
            warn!("Unknown zone {}", name);
            return false;
        }
        info!("Linking zone {} to {}:{}", name, target.instance, target.name);
        self.replace(|zones| {
            if let Some(zone) = zones.get_mut(name) {
                zone.link = Some(target);
            }
        });
        true
    }

    /// Copy the current mapping, apply `edit`, and swap the result in
    fn replace(&mut self, edit: impl FnOnce(&mut ZoneConfig)) {
        let mut next = ZoneConfig::clone(&self.zones);
        edit(&mut next);
        self.zones = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::geometry::overlaps;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn zone(name: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Zone {
        Zone::new(name, "nauvis", x1, y1, x2, y2)
    }

    fn target(instance: &str, name: &str) -> ZoneTarget {
        ZoneTarget { instance: instance.to_string(), name: name.to_string() }
    }

    #[test]
    fn add_stores_unlinked_disabled_zone() {
        let mut store = ZoneStore::default();
        let mut candidate = zone("a", 0.0, 0.0, 5.0, 5.0);
        candidate.enabled = true;
        candidate.link = Some(target("west", "b"));

        store.add_zone(candidate).unwrap();

        let stored = store.get("a").unwrap();
        assert!(!stored.enabled);
        assert!(stored.link.is_none());
    }

    #[test]
    fn rejected_add_leaves_store_unchanged() {
        let mut store = ZoneStore::default();
        store.add_zone(zone("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let before = store.snapshot();

        assert!(store.add_zone(zone("a", 50.0, 50.0, 60.0, 60.0)).is_err());
        assert!(store.add_zone(zone("b", 5.0, 5.0, 20.0, 20.0)).is_err());
        assert!(store.add_zone(zone("c", 30.0, 0.0, 20.0, 10.0)).is_err());
        assert!(store.add_zone(zone("d", 0.0, 30.0, 10.0, 20.0)).is_err());
        assert!(store.add_zone(zone("", 100.0, 100.0, 110.0, 110.0)).is_err());

        assert_eq!(*store.snapshot(), *before);
        assert!(Arc::ptr_eq(&store.snapshot(), &before));
    }

    #[test]
    fn delete_then_readd_same_name() {
        let mut store = ZoneStore::default();
        store.add_zone(zone("a", 0.0, 0.0, 10.0, 10.0)).unwrap();

        assert!(store.delete_zone("a"));
        assert!(!store.contains("a"));

        store.add_zone(zone("a", 100.0, 100.0, 110.0, 110.0)).unwrap();
        assert_eq!(store.get("a").unwrap().x1, 100.0);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut store = ZoneStore::default();
        assert!(!store.delete_zone("ghost"));
        assert!(store.is_empty());
    }

    #[test]
    fn status_can_enable_without_link() {
        let mut store = ZoneStore::default();
        store.add_zone(zone("a", 0.0, 0.0, 1.0, 1.0)).unwrap();

        assert!(store.set_status("a", true));
        let stored = store.get("a").unwrap();
        assert!(stored.enabled);
        assert!(stored.link.is_none());
    }

    #[test]
    fn link_and_status_on_unknown_zone_are_noops() {
        let mut store = ZoneStore::default();
        assert!(!store.set_status("ghost", true));
        assert!(!store.set_link("ghost", target("west", "b")));
        assert!(store.is_empty());
    }

    #[test]
    fn mutations_do_not_touch_existing_snapshots() {
        let mut store = ZoneStore::default();
        store.add_zone(zone("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let before = store.snapshot();

        store.set_link("a", target("west", "b"));
        store.set_status("a", true);

        assert!(before["a"].link.is_none());
        assert!(!before["a"].enabled);
        assert_eq!(store.get("a").unwrap().link, Some(target("west", "b")));
    }

    fn assert_no_overlap(store: &ZoneStore) {
        let zones: Vec<_> = store.snapshot().values().cloned().collect();
        for (i, a) in zones.iter().enumerate() {
            for b in &zones[i + 1..] {
                assert!(
                    a.surface != b.surface || !overlaps(a, b),
                    "{} overlaps {}",
                    a.name,
                    b.name
                );
            }
        }
    }

    #[test]
    fn random_operation_sequences_never_overlap() {
        let surfaces = ["nauvis", "space"];

        for seed in 0..32u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut store = ZoneStore::default();

            for _ in 0..200 {
                let name = format!("z{}", rng.gen_range(0..24));
                match rng.gen_range(0..4) {
                    0 | 1 => {
                        let x1 = rng.gen_range(-50.0..50.0);
                        let y1 = rng.gen_range(-50.0..50.0);
                        let w = rng.gen_range(-2.0..20.0);
                        let h = rng.gen_range(-2.0..20.0);
                        let surface = surfaces[rng.gen_range(0..surfaces.len())];
                        let _ = store.add_zone(Zone::new(name, surface, x1, y1, x1 + w, y1 + h));
                    }
                    2 => {
                        store.delete_zone(&name);
                    }
                    _ => {
                        if rng.gen_bool(0.5) {
                            store.set_status(&name, rng.gen_bool(0.5));
                        } else {
                            store.set_link(&name, target("west", "gate"));
                        }
                    }
                }
                assert_no_overlap(&store);
            }
        }
    }
}
