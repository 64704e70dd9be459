//! Relationship Data Structure
//!
//! A friendship between two users. On the wire it is directed (`userId` is the
//! acting user), but it always denotes the same unordered pair.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub user_id: i64,
    pub friend_id: i64,
}

impl Relationship {
    pub fn new(user_id: i64, friend_id: i64) -> Self {
        Self { user_id, friend_id }
    }

    /// The same edge seen from the other side
    pub fn reversed(self) -> Self {
        Self {
            user_id: self.friend_id,
            friend_id: self.user_id,
        }
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        if self.user_id == self.friend_id {
            return Err(SharedError::validation(
                "friendId",
                "a user cannot befriend themselves",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed() {
        let edge = Relationship::new(1, 2);
        assert_eq!(edge.reversed(), Relationship::new(2, 1));
        assert_eq!(edge.reversed().reversed(), edge);
    }

    #[test]
    fn test_self_edge_is_invalid() {
        assert!(Relationship::new(3, 3).validate().is_err());
        assert!(Relationship::new(3, 4).validate().is_ok());
    }

    #[test]
    fn test_wire_format() {
        let edge: Relationship =
            serde_json::from_str(r#"{"userId": 1, "friendId": 2}"#).unwrap();
        assert_eq!(edge, Relationship::new(1, 2));
    }
}
