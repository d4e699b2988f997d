//! Authorization policy
//!
//! Every mutating operation is checked against a fixed rule table before it
//! reaches the association manager or the favorite ledger. A decision depends
//! only on the operation, the actor's role and whether the actor owns the
//! target; evaluation is a pure function of those three inputs.

use std::fmt;
use crate::models::{Role, User, UserId};
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::log_policy_denial;

/// Operations gated by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateComment,
    EditComment,
    DeleteComment,
    AddFavorite,
    RemoveFavorite,
    /// Register an account with the USER role
    RegisterUser,
    /// Register an account with the ADMIN role
    RegisterAdmin,
    DeleteOwnAccount,
    ManageGenre,
    AcceptEvent,
    DeleteEvent,
}

impl Operation {
    pub fn register(role: Role) -> Self {
        match role {
            Role::User => Operation::RegisterUser,
            Role::Admin => Operation::RegisterAdmin,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateComment => "create comment",
            Operation::EditComment => "edit comment",
            Operation::DeleteComment => "delete comment",
            Operation::AddFavorite => "add favorite",
            Operation::RemoveFavorite => "remove favorite",
            Operation::RegisterUser => "register user",
            Operation::RegisterAdmin => "register admin",
            Operation::DeleteOwnAccount => "delete own account",
            Operation::ManageGenre => "manage genre",
            Operation::AcceptEvent => "accept event",
            Operation::DeleteEvent => "delete event",
        };
        write!(f, "{}", name)
    }
}

/// Relation between the actor and the target of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    NonOwner,
    /// The target has no owning user
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(&'static str),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// One row of the rule table
#[derive(Debug, Clone, Copy)]
pub struct PolicyRule {
    pub operation: Operation,
    pub anonymous: bool,
    pub user_non_owner: bool,
    pub user_owner: bool,
    pub admin: bool,
    /// Anonymous denial means "sign in first" rather than "never allowed"
    pub requires_identity: bool,
    pub reason: &'static str,
}

const fn rule(
    operation: Operation,
    cells: [bool; 4],
    requires_identity: bool,
    reason: &'static str,
) -> PolicyRule {
    PolicyRule {
        operation,
        anonymous: cells[0],
        user_non_owner: cells[1],
        user_owner: cells[2],
        admin: cells[3],
        requires_identity,
        reason,
    }
}

//                                 anonymous, USER non-owner, USER owner, ADMIN
#[rustfmt::skip]
pub const POLICY: &[PolicyRule] = &[
    rule(Operation::CreateComment,    [false, true,  true,  true ], true,  "commenting requires an account"),
    rule(Operation::EditComment,      [false, false, true,  false], true,  "only the author may edit a comment"),
    rule(Operation::DeleteComment,    [false, false, true,  true ], true,  "only the author or an admin may delete a comment"),
    rule(Operation::AddFavorite,      [false, false, true,  true ], true,  "users may only manage their own favorites"),
    rule(Operation::RemoveFavorite,   [false, false, true,  true ], true,  "users may only manage their own favorites"),
    rule(Operation::RegisterUser,     [true,  false, false, true ], false, "signed-in users cannot register accounts"),
    rule(Operation::RegisterAdmin,    [false, false, false, true ], false, "only admins may create admin accounts"),
    rule(Operation::DeleteOwnAccount, [false, false, true,  false], true,  "accounts may only be deleted by their owner; admin accounts are managed separately"),
    rule(Operation::ManageGenre,      [false, false, false, true ], true,  "genres are managed by admins"),
    rule(Operation::AcceptEvent,      [false, false, false, true ], true,  "events are accepted by admins"),
    rule(Operation::DeleteEvent,      [false, false, false, true ], true,  "events are deleted by admins"),
];

/// Look up the rule for an operation
pub fn rule_for(operation: Operation) -> Option<&'static PolicyRule> {
    POLICY.iter().find(|rule| rule.operation == operation)
}

/// Evaluate the rule table. Operations without a rule are denied.
pub fn evaluate(operation: Operation, role: Option<Role>, ownership: Ownership) -> Decision {
    let Some(rule) = rule_for(operation) else {
        return Decision::Deny("no policy rule");
    };
    let allowed = match role {
        None => rule.anonymous,
        Some(Role::Admin) => rule.admin,
        Some(Role::User) => match ownership {
            Ownership::Owner => rule.user_owner,
            Ownership::NonOwner | Ownership::NotApplicable => rule.user_non_owner,
        },
    };

    if allowed {
        Decision::Allow
    } else if role.is_none() && rule.requires_identity {
        Decision::Deny("authentication required")
    } else {
        Decision::Deny(rule.reason)
    }
}

/// The identity an operation runs as
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    Anonymous,
    User(User),
}

impl Actor {
    pub fn role(&self) -> Option<Role> {
        match self {
            Actor::Anonymous => None,
            Actor::User(user) => Some(user.role),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Actor::Anonymous => None,
            Actor::User(user) => Some(user),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|user| user.id)
    }

    /// The signed-in user, or `Unauthorized`
    pub fn require_user(&self) -> Result<&User> {
        self.user()
            .ok_or_else(|| EventHubError::Unauthorized("authentication required".to_string()))
    }

    /// Ownership is identity equality with the target's user, never role
    pub fn ownership_of(&self, owner_id: UserId) -> Ownership {
        match self.user_id() {
            Some(id) if id == owner_id => Ownership::Owner,
            _ => Ownership::NonOwner,
        }
    }
}

/// Authorization service applying the rule table to actors
#[derive(Debug, Clone, Default)]
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    /// Check `operation` for `actor` against a target owned by `owner_id`.
    ///
    /// Anonymous denials of operations that need an identity become
    /// `Unauthorized`; every other denial is `Forbidden`.
    pub fn authorize(&self, actor: &Actor, operation: Operation, owner_id: Option<UserId>) -> Result<()> {
        let ownership = owner_id.map_or(Ownership::NotApplicable, |id| actor.ownership_of(id));

        match evaluate(operation, actor.role(), ownership) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                log_policy_denial(actor.user_id(), &operation.to_string(), reason);
                if actor.role().is_none() && rule_for(operation).map_or(true, |rule| rule.requires_identity) {
                    Err(EventHubError::Unauthorized(format!("{} requires authentication", operation)))
                } else {
                    Err(EventHubError::forbidden(operation.to_string(), reason))
                }
            }
        }
    }
}
