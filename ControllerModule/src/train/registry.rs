//! # Train Registry
//!
//! Maps cluster-wide train ids to the instance a train was last seen on.
//! Ids start at 1, only grow, and are never reused; registrations are never
//! removed.
//!
//! Single writer: allocation reads the highest id and inserts the next one,
//! so callers must serialize access (the controller service does).

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Serialize, Deserialize};
use trains_shared::types::{GlobalTrainId, InstanceId, LocalTrainId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRegistration {
    /// Last known location
    pub last_instance: InstanceId,

    /// Identifier of the train inside that instance's game process
    pub local_train_id: Option<LocalTrainId>,
}

#[derive(Debug, Clone, Default)]
pub struct TrainRegistry {
    trains: BTreeMap<GlobalTrainId, TrainRegistration>,
}

impl TrainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a train and return its new global id
    pub fn allocate_id(
        &mut self,
        instance: InstanceId,
        local_train_id: Option<LocalTrainId>,
    ) -> GlobalTrainId {
        let next_id = self.trains.keys().next_back().copied().unwrap_or(0) + 1;
        self.trains.insert(
            next_id,
            TrainRegistration {
                last_instance: instance,
                local_train_id,
            },
        );
        info!(
            "Registered train {} from instance {} (local id {:?})",
            next_id, instance, local_train_id
        );
        next_id
    }

    /// Record that a train now lives on `new_instance`.
    ///
    /// Unknown ids are left alone; nothing is allocated implicitly.
    pub fn reassign_instance(&mut self, id: GlobalTrainId, new_instance: InstanceId) -> bool {
        match self.trains.get_mut(&id) {
            Some(registration) => {
                debug!(
                    "Train {} moved from instance {} to {}",
                    id, registration.last_instance, new_instance
                );
                registration.last_instance = new_instance;
                true
            }
            None => {
                debug!("Teleport for unregistered train {}", id);
                false
            }
        }
    }

    pub fn get(&self, id: GlobalTrainId) -> Option<&TrainRegistration> {
        self.trains.get(&id)
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn first_three_ids_are_one_two_three() {
        let mut registry = TrainRegistry::new();
        assert_eq!(registry.allocate_id(5, Some(100)), 1);
        assert_eq!(registry.allocate_id(9, None), 2);
        assert_eq!(registry.allocate_id(5, Some(100)), 3);
    }

    #[test]
    fn ids_strictly_increase_for_any_arguments() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut registry = TrainRegistry::new();
        let mut previous = 0;

        for _ in 0..500 {
            let instance = rng.gen_range(-3..3);
            let local = if rng.gen_bool(0.2) { None } else { Some(rng.gen_range(0..10)) };
            let id = registry.allocate_id(instance, local);
            assert!(id > previous);
            previous = id;
        }
        assert_eq!(registry.len(), 500);
    }

    #[test]
    fn allocation_stores_origin() {
        let mut registry = TrainRegistry::new();
        let id = registry.allocate_id(5, Some(17));
        assert_eq!(
            registry.get(id),
            Some(&TrainRegistration { last_instance: 5, local_train_id: Some(17) })
        );
    }

    #[test]
    fn reassign_keeps_local_id() {
        let mut registry = TrainRegistry::new();
        let id = registry.allocate_id(5, Some(17));

        assert!(registry.reassign_instance(id, 7));

        let registration = registry.get(id).unwrap();
        assert_eq!(registration.last_instance, 7);
        assert_eq!(registration.local_train_id, Some(17));
    }

    #[test]
    fn reassign_unknown_does_not_allocate() {
        let mut registry = TrainRegistry::new();
        assert!(!registry.reassign_instance(999, 7));
        assert!(registry.is_empty());
        assert_eq!(registry.allocate_id(1, None), 1);
    }
}
