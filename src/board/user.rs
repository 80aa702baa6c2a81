//! User identities.

/// Unique external identifier of a user (for example a chat platform id).
pub type UserId = String;

/// A user as seen by the engine.
///
/// The same type is used for the identity a caller passes in and for the
/// record kept in the registry. Identity is the `id`; `display_name` may
/// change between calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    /// Unique, stable identifier.
    pub id: UserId,
    /// Readable name, neither unique nor constant.
    pub display_name: String,
}

impl User {
    /// Create a user identity.
    pub fn new(id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
