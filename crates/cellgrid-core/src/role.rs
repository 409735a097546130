//! Data roles
//!
//! A view asks for cell data under a role. Only [`Role::Display`] yields
//! data and only [`Role::Edit`] accepts writes.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Role under which cell data is read or written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    /// Rendered value
    Display,
    /// Value written back by an editor
    Edit,
}

impl Role {
    /// All roles, ordered by id
    pub const ALL: [Role; 2] = [Role::Display, Role::Edit];

    /// Numeric role id
    pub fn id(self) -> i32 {
        match self {
            Role::Display => 0,
            Role::Edit => 1,
        }
    }

    /// Role name as exposed to views
    pub fn name(self) -> &'static str {
        match self {
            Role::Display => "display",
            Role::Edit => "edit",
        }
    }

    /// Look up a role by numeric id
    pub fn from_id(id: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.id() == id)
            .ok_or(Error::UnknownRole(id))
    }
}

impl TryFrom<i32> for Role {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self> {
        Role::from_id(id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role id to role name table
pub fn role_names() -> BTreeMap<i32, &'static str> {
    Role::ALL
        .into_iter()
        .map(|role| (role.id(), role.name()))
        .collect()
}
