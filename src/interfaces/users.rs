//! # Users Interface
//!
//! Authentication and researcher management. Logging in exchanges
//! credentials for a bearer token (`POST /api/users/login`); administrators
//! register, list, and delete researcher accounts; any account holder can
//! change their own password (`PUT /api/users/change_password`).
//!
//! Passwords are wrapped in [`Password`], which zeroizes its memory on drop
//! and redacts itself from `Debug` output.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// A password in transit. Zeroized on drop; never echoed by `Debug`.
#[derive(Clone, Deserialize, Serialize, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a password string.
    #[must_use]
    pub const fn new(password: String) -> Self {
        Self(password)
    }

    /// Check the platform password policy: at least 8 characters, at least
    /// one uppercase letter, one lowercase letter, one digit, and one of
    /// `@$!%*?&`, with no characters outside those classes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::WeakPassword`] when the policy is not met.
    pub fn check_policy(&self) -> Result<()> {
        const SPECIALS: &str = "@$!%*?&";

        let password = &self.0;
        let allowed =
            password.chars().all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c));

        if password.len() >= 8
            && allowed
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| SPECIALS.contains(c))
        {
            Ok(())
        } else {
            Err(Error::WeakPassword)
        }
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(password.to_string())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

/// The `POST /api/users/login` request body.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Login {
    /// The account's username.
    pub username: String,

    /// The account's password.
    pub password: Password,
}

/// The login reply: a bearer token and its lifetime.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenGrant {
    /// The bearer token, a JWT.
    pub jwt: String,

    /// The token scheme, `Bearer`.
    pub token_type: String,

    /// Seconds until the token expires.
    pub expires_in: u64,
}

/// The `PUT /api/users/change_password` request body.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChangePassword {
    /// The account's username.
    pub username: String,

    /// The current password.
    pub old_password: Password,

    /// The replacement password. Must meet the platform password policy.
    pub new_password: Password,
}

impl ChangePassword {
    /// Validate the request before it is sent: every field present and the
    /// new password strong enough.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingRequiredFields`] or [`Error::WeakPassword`].
    pub fn validate(&self) -> Result<()> {
        let mut missing = vec![];
        if self.username.trim().is_empty() {
            missing.push("username");
        }
        if self.old_password.0.is_empty() {
            missing.push("current password");
        }
        if self.new_password.0.is_empty() {
            missing.push("new password");
        }
        if !missing.is_empty() {
            return Err(Error::MissingRequiredFields(missing));
        }

        self.new_password.check_policy()
    }
}

/// Details for registering a researcher account
/// (`POST /api/users/register`).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Researcher {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Contact email, also the login identity.
    pub email: String,

    /// The institution the researcher belongs to.
    pub affiliation: String,
}

/// A registered researcher as returned by `GET /api/users/researchers`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResearcherRecord {
    /// The account identifier used for deletion.
    pub user_id: String,

    /// The registered details.
    #[serde(flatten)]
    pub details: Researcher,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn password_policy_accepts_strong() {
        Password::from("Str0ng!pass").check_policy().expect("should pass policy");
    }

    #[test]
    fn password_policy_rejects_weak() {
        for weak in ["Ab1!", "alllowercase1!", "ALLUPPERCASE1!", "NoDigits!!", "NoSpecial11"] {
            assert!(Password::from(weak).check_policy().is_err(), "policy should reject {weak}");
        }
    }

    #[test]
    fn password_debug_redacted() {
        let password = Password::from("Str0ng!pass");
        assert_eq!(format!("{password:?}"), "Password(****)");
    }

    #[test]
    fn change_password_lists_missing() {
        let request = ChangePassword {
            username: String::new(),
            old_password: Password::from("old"),
            new_password: Password::from(""),
        };
        let err = request.validate().expect_err("should be missing fields");
        assert!(
            matches!(err, Error::MissingRequiredFields(fields)
                if fields == vec!["username", "new password"])
        );
    }
}
