//! Classrooms and the lookup table lectures resolve them through.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A physical room with its capacity and amenities.
///
/// Equality and hashing cover every field, so two descriptors with the same
/// name but different amenities are different rooms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique room name (e.g. `Raf10 (a)`).
    pub name: String,
    pub has_projector: bool,
    pub seat_count: u32,
    pub computer_count: u32,
}

impl Classroom {
    pub fn new(
        name: impl Into<String>,
        has_projector: bool,
        seat_count: u32,
        computer_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            has_projector,
            seat_count,
            computer_count,
        }
    }
}

/// Classroom lookup table with first-call-wins initialization.
///
/// The table starts empty. The first [`initialize`](Self::initialize) call
/// fills it; every later call is ignored, whatever rooms it carries. Loaders
/// receive the registry explicitly (see [`LoadContext`](crate::LoadContext))
/// instead of consulting shared global state.
#[derive(Debug, Default)]
pub struct ClassroomRegistry {
    rooms: Vec<Arc<Classroom>>,
    initialized: bool,
}

impl ClassroomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the registry if this is the first call.
    ///
    /// Returns whether the rooms were taken.
    pub fn initialize(&mut self, rooms: impl IntoIterator<Item = Classroom>) -> bool {
        if self.initialized {
            tracing::warn!("classroom registry already initialized, ignoring new rooms");
            return false;
        }
        self.rooms = rooms.into_iter().map(Arc::new).collect();
        self.initialized = true;
        tracing::debug!(count = self.rooms.len(), "classroom registry initialized");
        true
    }

    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the first room registered under `name`.
    pub fn for_name(&self, name: &str) -> Option<Arc<Classroom>> {
        self.rooms.iter().find(|room| room.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
