/// Stored credentials of a user.
///
/// Owned by the persistence layer; this crate only produces and consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    /// Self-describing encoded hash
    pub password_hash: String,
    /// Hex encoded salt
    pub salt: String,
}
