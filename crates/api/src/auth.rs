// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Marketplace operators. Admins manage the catalog, the directory, and
    /// the pair registry, and may see and correct every lead.
    Admin,
    /// A registered professional. Professionals see the leads assigned to
    /// any pair they belong to.
    Professional,
    /// A registered customer. Customers submit leads and see their own.
    Customer,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Professional => "professional",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "professional" => Ok(Self::Professional),
            "customer" => Ok(Self::Customer),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// For professionals and customers `id` is their directory identifier; for
/// admins it only identifies the operator in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub id: i64,
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

/// Stub authentication: the caller asserts an identity and a role.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Builds an authenticated actor from the raw id and role supplied by
    /// the transport.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the id is empty, not a
    /// positive integer, or the role is unknown.
    pub fn authenticate(actor_id: &str, role: &str) -> Result<AuthenticatedActor, AuthError> {
        let trimmed: &str = actor_id.trim();
        if trimmed.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Actor ID cannot be empty"),
            });
        }

        let id: i64 = trimmed
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Actor ID '{trimmed}' is not a positive integer"),
            })?;

        let role: Role = Role::from_str(role)?;
        Ok(AuthenticatedActor::new(id, role))
    }
}

/// Role-based access checks.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor holds `required`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` naming `action` and the required role.
    pub fn require_role(
        actor: &AuthenticatedActor,
        required: Role,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.role == required {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: required.to_string(),
            })
        }
    }

    /// Only admins may change the catalog, the directory, or the pair
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is not an admin.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        Self::require_role(actor, Role::Admin, action)
    }

    /// Only customers submit leads.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor is not a customer.
    pub fn authorize_create_lead(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_role(actor, Role::Customer, "create_lead")
    }
}
