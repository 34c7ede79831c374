use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::principal::errors::EmailError;
use crate::principal::errors::RoleError;

/// Principal aggregate entity.
///
/// A registered identity. The email address is the unique identifier and is
/// immutable after creation; the credential is held only in hashed form.
#[derive(Debug, Clone)]
pub struct Principal {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Role tag attached to a principal.
///
/// Persisted and serialized by name (`USER` / `ADMIN`). The role is the
/// single granted authority carried in the authenticated context; policy
/// decisions beyond that live outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Role name as stored and granted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a role from its stored name.
    ///
    /// # Arguments
    /// * `s` - Role name (`USER` or `ADMIN`)
    ///
    /// # Errors
    /// * `Unknown` - Name does not match a known role
    pub fn from_string(s: &str) -> Result<Self, RoleError> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Doubles as the
/// principal identifier throughout the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new principal with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address (the identifier)
    /// * `first_name` - Display name, given part
    /// * `last_name` - Display name, family part
    /// * `password` - Plain text credential (hashed by the service)
    ///
    /// # Returns
    /// RegisterCommand with validated identifier
    pub fn new(email: EmailAddress, first_name: String, last_name: String, password: String) -> Self {
        Self {
            email,
            first_name,
            last_name,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        assert_eq!(Role::from_string("USER").unwrap(), Role::User);
        assert_eq!(Role::from_string("ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::User.as_str(), "USER");
        assert_eq!(Role::Admin.as_str(), "ADMIN");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = Role::from_string("ROOT");
        assert!(matches!(result, Err(RoleError::Unknown(_))));
    }

    #[test]
    fn test_email_address_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }
}
