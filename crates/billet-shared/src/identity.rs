//! The fixed two-person identity set.
//!
//! Exactly two identities exist per deployment, each bound to one secret
//! phrase; each identity's partner is the other. The set is fixed at
//! configuration time, there is no runtime registration.
//!
//! The gate logic is written against the pair as a mapping from name to
//! secret rather than two named branches, so growing beyond two would
//! only change [`IdentityPair`], not its callers.

use subtle::ConstantTimeEq;

use crate::error::PairError;

/// One configured participant: a display name bound to a secret phrase.
#[derive(Clone)]
pub struct Identity {
    pub name: String,
    secret: String,
}

/// Secrets never appear in logs, so the Debug impl redacts them.
impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Identity {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Constant-time, case-sensitive exact comparison against the
    /// configured secret.
    fn secret_matches(&self, candidate: &str) -> bool {
        let a = self.secret.as_bytes();
        let b = candidate.as_bytes();
        a.len() == b.len() && a.ct_eq(b).unwrap_u8() == 1
    }
}

/// The two configured identities.
#[derive(Debug, Clone)]
pub struct IdentityPair {
    identities: [Identity; 2],
}

impl IdentityPair {
    /// Build the pair, rejecting ambiguous configuration up front:
    /// duplicate names, duplicate secrets, or empty values.
    pub fn new(first: Identity, second: Identity) -> Result<Self, PairError> {
        if first.name.is_empty()
            || second.name.is_empty()
            || first.secret.is_empty()
            || second.secret.is_empty()
        {
            return Err(PairError::Empty);
        }
        if first.name == second.name {
            return Err(PairError::DuplicateName);
        }
        if first.secret == second.secret {
            return Err(PairError::DuplicateSecret);
        }
        Ok(Self {
            identities: [first, second],
        })
    }

    /// Resolve a submitted phrase to `(matched identity, partner)`.
    ///
    /// Both configured secrets are compared before branching, so the call
    /// does the same work whether or not the first entry matches.
    pub fn authenticate(&self, candidate: &str) -> Option<(&Identity, &Identity)> {
        let [a, b] = &self.identities;
        let hit_a = a.secret_matches(candidate);
        let hit_b = b.secret_matches(candidate);
        if hit_a {
            Some((a, b))
        } else if hit_b {
            Some((b, a))
        } else {
            None
        }
    }

    /// Find the identity whose secret matches the submitted phrase.
    pub fn match_secret(&self, candidate: &str) -> Option<&Identity> {
        self.authenticate(candidate).map(|(identity, _)| identity)
    }

    /// The other identity relative to `name`, or `None` for an unknown name.
    pub fn partner_of(&self, name: &str) -> Option<&Identity> {
        let [a, b] = &self.identities;
        if a.name == name {
            Some(b)
        } else if b.name == name {
            Some(a)
        } else {
            None
        }
    }

    /// Whether `name` is one of the two configured identities.
    pub fn contains(&self, name: &str) -> bool {
        self.identities.iter().any(|i| i.name == name)
    }

    pub fn names(&self) -> [&str; 2] {
        let [a, b] = &self.identities;
        [a.name.as_str(), b.name.as_str()]
    }
}
