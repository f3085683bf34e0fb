//! Validated, immutable signal data indexed by one canonical entity order.
//!
//! Every per-entity vector and every matrix in the store is indexed by the
//! position of the entity in `entities`. That order is fixed at build time and
//! never re-derived, so scorers can work on plain indices.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::config::Dataset;
use crate::error::{AffinityError, Result};
use crate::types::EntityId;

/// Entity universe plus the four signal containers.
#[derive(Debug, Clone)]
pub struct SignalStore {
    entities: Vec<EntityId>,
    index: HashMap<EntityId, usize>,
    interests: Vec<BTreeSet<String>>,
    interactions: Vec<Vec<u8>>,
    adjacency: Vec<Vec<u8>>,
    distances: Vec<f64>,
    max_distance: f64,
}

impl SignalStore {
    /// Validate a dataset and index it by its entity order.
    ///
    /// Fails with [`AffinityError::Schema`] when:
    /// - an id is empty or listed twice
    /// - interests or distances miss an id, or name one outside the universe
    /// - a matrix is not `n × n`, or holds anything but 0/1
    /// - a distance is negative or not finite
    pub fn build(dataset: &Dataset) -> Result<Self> {
        let entities = canonical_entities(&dataset.entities)?;
        let n = entities.len();

        check_keys("interests", &dataset.entities, dataset.interests.keys())?;
        check_keys("distances", &dataset.entities, dataset.distances.keys())?;
        check_binary_matrix("interactions", &dataset.interactions, n)?;
        check_binary_matrix("social-adjacency", &dataset.social_adjacency, n)?;

        let interests: Vec<BTreeSet<String>> = dataset
            .entities
            .iter()
            .map(|id| dataset.interests[id].clone())
            .collect();

        let distances = ordered_distances(&dataset.entities, &dataset.distances)?;
        let max_distance = distances.iter().copied().fold(0.0_f64, f64::max);

        let index = entities
            .iter()
            .enumerate()
            .map(|(i, id)| (Arc::clone(id), i))
            .collect();

        debug!(entities = n, max_distance, "signal store built");

        Ok(Self {
            entities,
            index,
            interests,
            interactions: dataset.interactions.clone(),
            adjacency: dataset.social_adjacency.clone(),
            distances,
            max_distance,
        })
    }

    /// Entity ids in canonical order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Position of an id in the canonical order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn interests(&self, u: usize) -> &BTreeSet<String> {
        &self.interests[u]
    }

    /// Row `u` of the interaction record (u's interactions toward everyone).
    pub fn interaction_row(&self, u: usize) -> &[u8] {
        &self.interactions[u]
    }

    /// Row `u` of the social adjacency matrix.
    pub fn adjacency_row(&self, u: usize) -> &[u8] {
        &self.adjacency[u]
    }

    pub fn distance(&self, u: usize) -> f64 {
        self.distances[u]
    }

    /// Largest distance over the whole universe (0.0 when empty).
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }
}

fn canonical_entities(ids: &[String]) -> Result<Vec<EntityId>> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut entities = Vec::with_capacity(ids.len());
    for id in ids {
        if id.is_empty() {
            return Err(AffinityError::Schema("entity id must not be empty".into()));
        }
        if !seen.insert(id.as_str()) {
            return Err(AffinityError::Schema(format!("duplicate entity id '{}'", id)));
        }
        entities.push(EntityId::from(id.as_str()));
    }
    Ok(entities)
}

/// The keys of a per-entity map must be exactly the universe.
fn check_keys<'a>(
    source: &str,
    entities: &[String],
    keys: impl Iterator<Item = &'a String>,
) -> Result<()> {
    let keys: BTreeSet<&str> = keys.map(String::as_str).collect();
    let universe: BTreeSet<&str> = entities.iter().map(String::as_str).collect();

    if let Some(missing) = universe.difference(&keys).next() {
        return Err(AffinityError::Schema(format!(
            "{} has no entry for entity '{}'",
            source, missing
        )));
    }
    if let Some(extra) = keys.difference(&universe).next() {
        return Err(AffinityError::Schema(format!(
            "{} names unknown entity '{}'",
            source, extra
        )));
    }
    Ok(())
}

fn check_binary_matrix(source: &str, matrix: &[Vec<u8>], n: usize) -> Result<()> {
    if matrix.len() != n {
        return Err(AffinityError::Schema(format!(
            "{} has {} rows, expected {}",
            source,
            matrix.len(),
            n
        )));
    }
    for (u, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(AffinityError::Schema(format!(
                "{} row {} has {} columns, expected {}",
                source,
                u,
                row.len(),
                n
            )));
        }
        if let Some(v) = row.iter().position(|&x| x > 1) {
            return Err(AffinityError::Schema(format!(
                "{} cell ({}, {}) is {}, expected 0 or 1",
                source, u, v, row[v]
            )));
        }
    }
    Ok(())
}

fn ordered_distances(entities: &[String], distances: &BTreeMap<String, f64>) -> Result<Vec<f64>> {
    entities
        .iter()
        .map(|id| {
            let d = distances[id];
            if d.is_finite() && d >= 0.0 {
                Ok(d)
            } else {
                Err(AffinityError::Schema(format!(
                    "distance for '{}' must be a non-negative number, got {}",
                    id, d
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_message(dataset: &Dataset) -> String {
        match SignalStore::build(dataset) {
            Err(AffinityError::Schema(msg)) => msg,
            other => panic!("expected schema error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_build_demo() {
        let store = SignalStore::build(&Dataset::demo()).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.index_of("U3"), Some(2));
        assert_eq!(store.index_of("U9"), None);
        assert_eq!(store.distance(2), 12.0);
        assert_eq!(store.max_distance(), 12.0);
        assert!(store.interests(0).contains("hiking"));
        assert_eq!(store.interaction_row(2), &[0, 0, 0, 1, 0]);
        assert_eq!(store.adjacency_row(1), &[1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_entity_order_is_preserved() {
        let mut dataset = Dataset::demo();
        dataset.entities.reverse();
        dataset.interactions.reverse();
        dataset.social_adjacency.reverse();
        let store = SignalStore::build(&dataset).unwrap();
        let ids: Vec<&str> = store.entities().iter().map(|e| e.as_ref()).collect();
        assert_eq!(ids, vec!["U5", "U4", "U3", "U2", "U1"]);
        assert_eq!(store.distance(0), 4.0);
    }

    #[test]
    fn test_missing_interest_entry() {
        let mut dataset = Dataset::demo();
        dataset.interests.remove("U4");
        assert!(schema_message(&dataset).contains("interests has no entry for entity 'U4'"));
    }

    #[test]
    fn test_unknown_distance_entry() {
        let mut dataset = Dataset::demo();
        dataset.distances.insert("U6".into(), 1.0);
        assert!(schema_message(&dataset).contains("distances names unknown entity 'U6'"));
    }

    #[test]
    fn test_duplicate_entity() {
        let mut dataset = Dataset::demo();
        dataset.entities[4] = "U1".into();
        assert!(schema_message(&dataset).contains("duplicate"));
    }

    #[test]
    fn test_matrix_dimension_mismatch() {
        let mut dataset = Dataset::demo();
        dataset.interactions.pop();
        assert!(schema_message(&dataset).contains("interactions has 4 rows"));

        let mut dataset = Dataset::demo();
        dataset.social_adjacency[2].push(0);
        assert!(schema_message(&dataset).contains("social-adjacency row 2"));
    }

    #[test]
    fn test_non_binary_cell() {
        let mut dataset = Dataset::demo();
        dataset.interactions[1][3] = 2;
        assert!(schema_message(&dataset).contains("(1, 3) is 2"));
    }

    #[test]
    fn test_negative_distance() {
        let mut dataset = Dataset::demo();
        dataset.distances.insert("U2".into(), -3.0);
        assert!(schema_message(&dataset).contains("non-negative"));
    }

    #[test]
    fn test_empty_universe() {
        let dataset = Dataset {
            entities: vec![],
            interests: BTreeMap::new(),
            distances: BTreeMap::new(),
            interactions: vec![],
            social_adjacency: vec![],
        };
        let store = SignalStore::build(&dataset).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.max_distance(), 0.0);
    }
}
