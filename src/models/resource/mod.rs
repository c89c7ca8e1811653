// Resource module
// Professionals and rooms that bookings are assigned to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a professional or room column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Professional,
    Room,
}

/// A column of the day agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub kind: ResourceKind,
    /// Inert columns are drawn but accept no drops and no new bookings.
    #[serde(default = "default_bookable")]
    pub bookable: bool,
}

fn default_bookable() -> bool {
    true
}

impl Resource {
    /// A bookable professional column.
    pub fn professional(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId(id),
            name: name.into(),
            kind: ResourceKind::Professional,
            bookable: true,
        }
    }

    /// A room column that is shown for reference only.
    pub fn inert_room(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId(id),
            name: name.into(),
            kind: ResourceKind::Room,
            bookable: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("Resource {} needs a name", self.id));
        }
        Ok(())
    }
}

/// Default clinic roster: two professionals and one inert room.
pub fn default_roster() -> Vec<Resource> {
    vec![
        Resource::professional(1, "Dr. Ana Silva"),
        Resource::professional(2, "Dr. Carlos Mendes"),
        Resource::inert_room(3, "Laser Room"),
    ]
}
