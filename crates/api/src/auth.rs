// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication: registration, login, session resolution, logout.

use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use bookstore_core::Principal;
use bookstore_domain::{Role, normalize_email, parse_date, validate_user_fields, Address};
use bookstore_persistence::{Persistence, SessionRecord, UserRecord};

use crate::error::{ApiError, translate_domain_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{CustomerResponse, LoginRequest, LoginResponse, RegisterRequest};

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Registers a new customer account.
    ///
    /// The role is always `user`; administrators exist only via the
    /// bootstrap path. The email is normalized before storage so logins
    /// are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed fields, a password policy
    /// violation for weak credentials, or `Conflict` for a duplicate
    /// email.
    pub fn register(
        persistence: &mut Persistence,
        req: &RegisterRequest,
    ) -> Result<CustomerResponse, ApiError> {
        let email: String = normalize_email(&req.email).map_err(translate_domain_error)?;

        PasswordPolicy::default().validate(&req.password, &email)?;

        let address: Address = Address {
            country: req.country.clone(),
            city: req.city.clone(),
            street: req.street.clone(),
            house_number: req.house_number.clone(),
        };
        validate_user_fields(&req.given_name, &req.surname, &address, &req.phone)
            .map_err(translate_domain_error)?;
        let birth_date = parse_date("birth_date", &req.birth_date).map_err(translate_domain_error)?;

        let record: UserRecord = persistence.create_user(
            &email,
            &req.password,
            Role::User.as_str(),
            &req.given_name,
            &req.surname,
            &req.country,
            &req.city,
            &req.street,
            &req.house_number,
            &req.phone,
            birth_date,
        )?;

        crate::handlers::customer_response(&record)
    }

    /// Authenticates a user and creates a session.
    ///
    /// Session establishment succeeds only if a user record exists for
    /// the supplied email AND the credential verifies against the stored
    /// hash. Both failure cases produce the identical
    /// [`ApiError::InvalidCredentials`] so callers cannot enumerate
    /// registered addresses.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` on any authentication failure, or
    /// `Internal` if the store fails.
    pub fn login(
        persistence: &mut Persistence,
        req: &LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let email: String = req.email.trim().to_lowercase();

        let Some(user) = persistence.get_user_by_email(&email)? else {
            debug!("Login attempt for unknown email");
            return Err(ApiError::InvalidCredentials);
        };

        let verified: bool = persistence.verify_password(&req.password, &user.password_hash)?;
        if !verified {
            debug!(user_id = user.user_id, "Login attempt with wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let role: Role = user.role.parse().map_err(|_| ApiError::Internal {
            message: format!("Stored role '{}' is not a recognized role", user.role),
        })?;

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format expiration time: {e}"),
            })?;

        persistence.create_session(&session_token, user.user_id, &expires_at_str)?;

        debug!(user_id = user.user_id, "Session established");

        Ok(LoginResponse {
            token: session_token,
            user_id: user.user_id,
            role,
            expires_at: expires_at_str,
        })
    }

    /// Resolves a session token to a principal.
    ///
    /// Resolution never fails: an absent token, unknown token, expired
    /// session, deleted user, or store error all yield
    /// [`Principal::Anonymous`], which downstream authorization treats as
    /// the least-privileged principal.
    pub fn resolve_principal(persistence: &mut Persistence, token: Option<&str>) -> Principal {
        let Some(token) = token else {
            return Principal::Anonymous;
        };

        let session: SessionRecord = match persistence.get_session_by_token(token) {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!("Unknown session token");
                return Principal::Anonymous;
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed");
                return Principal::Anonymous;
            }
        };

        let expires_at = match OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        ) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored session expiration failed to parse");
                return Principal::Anonymous;
            }
        };
        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            return Principal::Anonymous;
        }

        let user: UserRecord = match persistence.get_user_by_id(session.user_id) {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = session.user_id, "Session references deleted user");
                return Principal::Anonymous;
            }
            Err(e) => {
                warn!(error = %e, "User lookup failed during session resolution");
                return Principal::Anonymous;
            }
        };

        let Ok(role) = user.role.parse::<Role>() else {
            warn!(role = %user.role, "Stored role is not recognized");
            return Principal::Anonymous;
        };

        // Touching the activity timestamp is best-effort bookkeeping.
        if let Err(e) = persistence.update_session_activity(session.session_id) {
            warn!(error = %e, "Failed to update session activity");
        }

        Principal::Authenticated {
            user_id: user.user_id,
            role,
        }
    }

    /// Logs out by deleting the session.
    ///
    /// Unconditional and idempotent: unknown tokens and anonymous callers
    /// (no token at all) are a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns `Internal` only if the store delete itself fails.
    pub fn logout(persistence: &mut Persistence, token: Option<&str>) -> Result<(), ApiError> {
        if let Some(token) = token {
            persistence.delete_session(token)?;
        }
        Ok(())
    }

    /// Generates a session token from 256 bits of randomness.
    fn generate_session_token() -> String {
        let (high, low): (u128, u128) = (rand::random(), rand::random());
        format!("{high:032x}{low:032x}")
    }
}
