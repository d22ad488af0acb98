use serde::{Deserialize, Serialize};

/// A set of record ids hypothesized to belong to one identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityProfile {
    pub members: Vec<String>,
}

impl EntityProfile {
    #[must_use]
    pub const fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}
