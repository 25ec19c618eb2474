//! The visitor a ranking is computed for.

/// Identifier of a registered user.
pub type UserId = u64;

/// Identity of the visitor requesting recommendations.
///
/// Anonymous visitors have no stored preferences or purchase history.
///
/// # Examples
/// ```
/// use marquee_core::UserContext;
///
/// assert_eq!(UserContext::from(Some(7)).user_id(), Some(7));
/// assert!(!UserContext::from(None).is_authenticated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserContext {
    /// A visitor without an account session.
    #[default]
    Anonymous,
    /// A signed-in user.
    Authenticated {
        /// Identifier of the signed-in user.
        user_id: UserId,
    },
}

impl UserContext {
    /// Return the user identifier for authenticated visitors.
    #[must_use]
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_id } => Some(user_id),
        }
    }

    /// Report whether the visitor is signed in.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl From<Option<UserId>> for UserContext {
    fn from(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Anonymous, |user_id| Self::Authenticated { user_id })
    }
}
