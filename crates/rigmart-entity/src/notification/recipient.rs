//! Notification recipient variant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a notification is addressed to.
///
/// Persisted as a nullable `user_id` column; modelled as a tagged variant so
/// that the personal-or-broadcast OR-query intent stays explicit in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Recipient {
    /// Addressed to one user.
    Personal {
        /// The owning user.
        owner_id: Uuid,
    },
    /// Visible to every user; owned by nobody.
    Broadcast,
}

impl Recipient {
    /// Build from the nullable `user_id` column.
    pub fn from_column(user_id: Option<Uuid>) -> Self {
        match user_id {
            Some(owner_id) => Self::Personal { owner_id },
            None => Self::Broadcast,
        }
    }

    /// Render back to the nullable `user_id` column.
    pub fn to_column(self) -> Option<Uuid> {
        match self {
            Self::Personal { owner_id } => Some(owner_id),
            Self::Broadcast => None,
        }
    }

    /// Whether this notification is visible to everyone.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Self::Broadcast)
    }

    /// Whether the given user owns this notification.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        matches!(self, Self::Personal { owner_id } if *owner_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_round_trip() {
        let owner = Uuid::new_v4();
        assert_eq!(
            Recipient::from_column(Some(owner)),
            Recipient::Personal { owner_id: owner }
        );
        assert_eq!(Recipient::from_column(None), Recipient::Broadcast);
        assert_eq!(Recipient::Broadcast.to_column(), None);
        assert_eq!(
            Recipient::Personal { owner_id: owner }.to_column(),
            Some(owner)
        );
    }

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let personal = Recipient::Personal { owner_id: owner };
        assert!(personal.is_owned_by(owner));
        assert!(!personal.is_owned_by(other));
        assert!(!Recipient::Broadcast.is_owned_by(owner));
    }
}
