//! Participants of an orchestration run.

use aesop_error::{AesopResult, OrchestrationError, OrchestrationErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named participant with fixed instructions.
///
/// Roles are constructed once when a run is set up and never change while it
/// executes. The `capability` text is shown to turn selectors as context; the
/// `instructions` are the system prompt handed to the model whenever this
/// role speaks.
///
/// # Examples
///
/// ```
/// use aesop_core::Role;
///
/// let writer = Role::new(
///     "Story_Writer",
///     "Writes the complete story",
///     "You are a master children's story writer.",
/// );
/// assert_eq!(writer.name(), "Story_Writer");
/// assert_eq!(format!("{}", writer), "Story_Writer");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
    derive_more::Display,
)]
#[display("{}", name)]
#[builder(setter(into))]
pub struct Role {
    /// Unique identifier within a run.
    name: String,
    /// What this role contributes to the collaboration.
    #[serde(alias = "description")]
    capability: String,
    /// System prompt used when this role speaks.
    #[serde(alias = "system_message")]
    instructions: String,
}

impl Role {
    /// Create a role from its three parts.
    pub fn new(
        name: impl Into<String>,
        capability: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capability: capability.into(),
            instructions: instructions.into(),
        }
    }

    /// Creates a new role builder.
    pub fn builder() -> RoleBuilder {
        RoleBuilder::default()
    }
}

/// The ordered, fixed set of roles taking part in a run.
///
/// Declaration order is significant: it is the round-robin sequence.
/// A roster is never empty and never holds two roles with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    roles: Vec<Role>,
}

impl Roster {
    /// Build a roster from roles in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRoster` when `roles` is empty and `DuplicateRole` when a
    /// name appears twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use aesop_core::{Role, Roster};
    ///
    /// let roster = Roster::new(vec![
    ///     Role::new("A", "first", "go first"),
    ///     Role::new("B", "second", "go second"),
    /// ])
    /// .unwrap();
    /// assert_eq!(roster.names(), vec!["A", "B"]);
    ///
    /// assert!(Roster::new(Vec::new()).is_err());
    /// ```
    #[track_caller]
    pub fn new(roles: Vec<Role>) -> AesopResult<Self> {
        if roles.is_empty() {
            return Err(OrchestrationError::new(OrchestrationErrorKind::EmptyRoster).into());
        }

        let mut seen = HashSet::new();
        for role in &roles {
            if !seen.insert(role.name().as_str()) {
                return Err(OrchestrationError::new(OrchestrationErrorKind::DuplicateRole(
                    role.name().clone(),
                ))
                .into());
            }
        }

        tracing::debug!(roles = roles.len(), "Roster assembled");
        Ok(Self { roles })
    }

    /// Roles in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role at a declaration position.
    pub fn get(&self, index: usize) -> Option<&Role> {
        self.roles.get(index)
    }

    /// Declaration position of the role with this exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.roles.iter().position(|r| r.name() == name)
    }

    /// Role with this exact name.
    pub fn find(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name() == name)
    }

    /// Role whose name matches ignoring ASCII case.
    pub fn find_ignore_case(&self, name: &str) -> Option<&Role> {
        self.roles
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    /// Role names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name().as_str()).collect()
    }

    /// Iterate roles in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Role> {
        self.roles.iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Role;
    type IntoIter = std::slice::Iter<'a, Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.iter()
    }
}
