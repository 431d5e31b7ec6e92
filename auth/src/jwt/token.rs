use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

/// Role tags assigned to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Anonymous,
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "ANONYMOUS",
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANONYMOUS" => Ok(Role::Anonymous),
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Verified token content.
///
/// Built by the verifier from validated claims; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: String,
    pub subject: String,
    pub role: String,
    /// Issued-at claim, not the time of verification
    pub created_at: DateTime<Utc>,
}

impl Token {
    /// Role as a known tag, if it is one.
    pub fn role_tag(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}
