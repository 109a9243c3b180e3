//! Spatial Index Module
//!
//! R-tree over canvas-space bounding boxes, used for pointer hit testing.
//! Point queries are O(log n) instead of a scan over every entity.

use crate::types::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;
use std::hash::Hash;

/// A bounding box tagged with the key of the entity it belongs to.
#[derive(Debug, Clone)]
pub struct SpatialEntry<K> {
    pub key: K,
    pub bounds: Rect,
}

impl<K> SpatialEntry<K> {
    pub fn new(key: K, bounds: Rect) -> Self {
        Self { key, bounds }
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds.contains_point(p)
    }
}

impl<K> RTreeObject for SpatialEntry<K> {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.left, self.bounds.top],
            [self.bounds.right(), self.bounds.bottom()],
        )
    }
}

impl<K: PartialEq> PartialEq for SpatialEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Spatial index keyed by `K`.
pub struct SpatialIndex<K> {
    tree: RTree<SpatialEntry<K>>,
    entries: HashMap<K, Rect>,
}

impl<K: Clone + Eq + Hash> SpatialIndex<K> {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Build an index from `(key, bounds)` pairs in one bulk load.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, Rect)>,
    {
        let entries: Vec<SpatialEntry<K>> = items
            .into_iter()
            .map(|(key, bounds)| SpatialEntry::new(key, bounds))
            .collect();

        let map = entries
            .iter()
            .map(|e| (e.key.clone(), e.bounds))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            entries: map,
        }
    }

    pub fn insert(&mut self, key: K, bounds: Rect) {
        self.remove(&key);
        self.tree.insert(SpatialEntry::new(key.clone(), bounds));
        self.entries.insert(key, bounds);
    }

    pub fn remove(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(bounds) => {
                self.tree.remove(&SpatialEntry::new(key.clone(), bounds));
                true
            }
            None => false,
        }
    }

    /// All keys whose box contains the point (borders inclusive).
    pub fn query_point(&self, p: Point) -> Vec<K> {
        let envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(p))
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// All keys whose box intersects the rectangle.
    pub fn query_rect(&self, rect: Rect) -> Vec<K> {
        let envelope = AABB::from_corners([rect.left, rect.top], [rect.right(), rect.bottom()]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.key.clone())
            .collect()
    }

    pub fn bounds(&self, key: &K) -> Option<Rect> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Clone + Eq + Hash> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
