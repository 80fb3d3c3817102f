use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Named capabilities gating the mutating task operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Assign or reassign a task to a user other than the caller.
    AssignTaskToOthers,
    /// Delete tasks.
    DeleteTasks,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssignTaskToOthers => "tasks.assign_to_others",
            Self::DeleteTasks => "tasks.delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "tasks.assign_to_others" => Ok(Self::AssignTaskToOthers),
            "tasks.delete" => Ok(Self::DeleteTasks),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported permission '{}'",
                value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_name_roundtrip() {
        for permission in [Permission::AssignTaskToOthers, Permission::DeleteTasks] {
            assert_eq!(
                permission.as_str().parse::<Permission>().unwrap(),
                permission
            );
        }
    }

    #[test]
    fn unknown_permission_name_is_rejected() {
        assert!("tasks.reticulate".parse::<Permission>().is_err());
    }
}
