//! Idempotent resource primitives (check + apply pattern).
//!
//! Each resource owns exactly one path under the target root.  The passes in
//! [`tasks`](crate::tasks) build resources from config entries and apply them
//! in document order.
pub mod activation;
pub mod chmod;
pub mod file;
pub mod helpers;
pub mod mask;

use anyhow::Result;

/// Minimal interface for resources that can be described, applied, and removed.
///
/// Resources whose apply is a no-op when the target already matches
/// (masks, permissions) also implement [`Resource`] and check it first.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, or a read-only target filesystem.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// Default implementation returns an error; override in resources
    /// that support removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed, or if removal is
    /// not supported for this resource type.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}

/// State of a resource on the target filesystem.
///
/// # Examples
///
/// ```
/// use ignition_apply::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "points to /other".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the resource path.
    Missing,
    /// The resource exists and matches the desired state.
    Correct,
    /// Something exists at the path but does not match.
    Incorrect {
        /// Description of what is there now.
        current: String,
    },
    /// The resource cannot be checked (e.g. the file it applies to is absent).
    Invalid {
        /// Reason why the resource cannot be checked.
        reason: String,
    },
}

/// Result of applying or removing a resource.
///
/// # Examples
///
/// ```
/// use ignition_apply::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// The filesystem was changed.
    Applied,
    /// The filesystem already matched; nothing was touched.
    AlreadyCorrect,
}

/// Interface for resources that can determine their own state.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O failures
    /// other than the path being absent.
    fn current_state(&self) -> Result<ResourceState>;
}
