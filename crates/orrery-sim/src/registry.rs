//! Body ownership and per-frame position fan-out
//!
//! The registry is the single owner of all bodies and the authority for the
//! selection invariant: removing a body invalidates any selection pointing
//! at it, and selecting an absent id fails loudly instead of silently
//! no-opping over a caller bug.

use crate::elements::OrbitalElements;
use crate::error::{SimError, SimResult};
use crate::selection::SelectionStore;
use crate::{path, propagator};
use orrery_core::coordinates::CartesianPosition;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Unique body identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for BodyId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Render-facing attributes carried opaquely by the core
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    /// Visual radius in renderer scene units
    pub radius: f64,
    /// RGB color
    pub color: [u8; 3],
    /// Potentially-hazardous flag from the catalog
    pub hazardous: bool,
}

impl Default for DisplayAttributes {
    fn default() -> Self {
        Self { radius: 0.5, color: [139, 115, 85], hazardous: false }
    }
}

/// One orbiting body: identity, orbit, display payload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub elements: OrbitalElements,
    pub display: DisplayAttributes,
}

impl Body {
    /// Create a body, re-validating the elements so nothing invalid can
    /// reach the registry even through deserialized input.
    pub fn new(
        id: impl Into<BodyId>,
        elements: OrbitalElements,
        display: DisplayAttributes,
    ) -> SimResult<Self> {
        elements.validate()?;
        Ok(Self { id: id.into(), elements, display })
    }
}

struct CachedPath {
    segments: usize,
    points: Arc<Vec<CartesianPosition>>,
}

/// Owner of all bodies plus the selection store and per-body path cache
pub struct BodyRegistry {
    bodies: HashMap<BodyId, Body>,
    selection: Arc<SelectionStore>,
    path_cache: HashMap<BodyId, CachedPath>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            selection: Arc::new(SelectionStore::new()),
            path_cache: HashMap::new(),
        }
    }

    /// Selection store handle for UI subscribers
    pub fn selection(&self) -> Arc<SelectionStore> {
        self.selection.clone()
    }

    /// Insert or replace a body. Elements are re-validated here: the fields
    /// are public and `Body` deserializes, so a body can reach this point
    /// without going through the validating constructor, and the registry is
    /// the last gate before propagation. Replacing drops the cached orbit
    /// path so the next `orbit_path` call resamples the new elements.
    pub fn insert(&mut self, body: Body) -> SimResult<Option<Body>> {
        body.elements.validate()?;
        self.path_cache.remove(&body.id);
        Ok(self.bodies.insert(body.id.clone(), body))
    }

    /// Remove a body, clearing any selection that pointed at it
    pub fn remove(&mut self, id: &BodyId) -> Option<Body> {
        self.path_cache.remove(id);
        let removed = self.bodies.remove(id);
        if removed.is_some() {
            self.selection.invalidate(id);
        }
        removed
    }

    pub fn get(&self, id: &BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn contains(&self, id: &BodyId) -> bool {
        self.bodies.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &BodyId> {
        self.bodies.keys()
    }

    /// Select a body for inspection. Fails with `UnknownBody` (selection
    /// unchanged) if the id is not registered.
    pub fn select(&self, id: &BodyId) -> SimResult<()> {
        if !self.contains(id) {
            return Err(SimError::UnknownBody(id.to_string()));
        }
        self.selection.set(Some(id.clone()));
        Ok(())
    }

    /// Currently selected body, if any
    pub fn selected(&self) -> Option<&Body> {
        self.selection.current().and_then(|id| self.bodies.get(&id))
    }

    /// World position of one body at simulation time `t`
    pub fn position_of(&self, id: &BodyId, t: f64) -> SimResult<CartesianPosition> {
        let body = self
            .bodies
            .get(id)
            .ok_or_else(|| SimError::UnknownBody(id.to_string()))?;
        Ok(propagator::position(&body.elements, t))
    }

    /// World positions of every body at simulation time `t`
    ///
    /// Propagation is pure, so the fan-out runs one task per body.
    pub fn positions_at(&self, t: f64) -> HashMap<BodyId, CartesianPosition> {
        self.bodies
            .par_iter()
            .map(|(id, body)| (id.clone(), propagator::position(&body.elements, t)))
            .collect()
    }

    /// Cached closed-loop orbit path for one body
    ///
    /// Recomputed only when the body's elements were replaced or a different
    /// segment count is requested.
    pub fn orbit_path(
        &mut self,
        id: &BodyId,
        segments: usize,
    ) -> SimResult<Arc<Vec<CartesianPosition>>> {
        let body = self
            .bodies
            .get(id)
            .ok_or_else(|| SimError::UnknownBody(id.to_string()))?;

        if let Some(cached) = self.path_cache.get(id) {
            if cached.segments == segments {
                return Ok(cached.points.clone());
            }
        }

        let points = Arc::new(path::sample_path(&body.elements, segments)?);
        self.path_cache.insert(
            id.clone(),
            CachedPath { segments, points: points.clone() },
        );
        Ok(points)
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
