//! Status module - the outcome recorded for an application

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Outcome of a job application
///
/// The integer discriminants are the wire values used by the RPC layer.
/// The snapshot encoding uses the names returned by [`Status::as_str`];
/// `Accepted` is spelled `"Success"` there for compatibility with existing
/// snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Application received, no outcome yet
    #[default]
    Pending = 0,

    /// Application rejected
    Reject = 1,

    /// Application accepted / moved forward
    Accepted = 2,

    /// Confirmation whose outcome was recorded by a later email
    Applied = 3,
}

impl Status {
    /// Get the snapshot name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Reject => "Reject",
            Status::Accepted => "Success",
            Status::Applied => "Applied",
        }
    }

    /// Parse a status from its snapshot name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Status::Pending),
            "Reject" => Some(Status::Reject),
            "Success" => Some(Status::Accepted),
            "Applied" => Some(Status::Applied),
            _ => None,
        }
    }

    /// Integer value used on the wire
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Build a status from its wire value
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Status::Pending),
            1 => Some(Status::Reject),
            2 => Some(Status::Accepted),
            3 => Some(Status::Applied),
            _ => None,
        }
    }

    /// Whether the status records a final answer from the company
    pub fn is_outcome(&self) -> bool {
        matches!(self, Status::Reject | Status::Accepted)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid status: {}", s))
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Unknown names decode as Pending, matching how older snapshots were read.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_names() {
        assert_eq!(Status::Pending.as_str(), "Pending");
        assert_eq!(Status::Reject.as_str(), "Reject");
        assert_eq!(Status::Accepted.as_str(), "Success");
        assert_eq!(Status::parse("Success"), Some(Status::Accepted));
        assert_eq!(Status::parse("accepted"), None);
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(Status::Pending.as_i32(), 0);
        assert_eq!(Status::Reject.as_i32(), 1);
        assert_eq!(Status::Accepted.as_i32(), 2);
        assert_eq!(Status::from_i32(3), Some(Status::Applied));
        assert_eq!(Status::from_i32(7), None);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Status::Accepted).unwrap();
        assert_eq!(json, "\"Success\"");

        let back: Status = serde_json::from_str("\"Reject\"").unwrap();
        assert_eq!(back, Status::Reject);
    }

    #[test]
    fn test_unknown_name_decodes_as_pending() {
        let status: Status = serde_json::from_str("\"Ghosted\"").unwrap();
        assert_eq!(status, Status::Pending);
    }

    #[test]
    fn test_outcomes() {
        assert!(Status::Reject.is_outcome());
        assert!(Status::Accepted.is_outcome());
        assert!(!Status::Pending.is_outcome());
        assert!(!Status::Applied.is_outcome());
    }
}
