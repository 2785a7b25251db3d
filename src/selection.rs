//! Selection State Machine
//!
//! Pure transitions over a caller-owned service selection. Every mutation
//! returns a new `ServiceSet`; nothing is retained between calls.
//!
//! # Transition Rules
//!
//! | Action                 | Result |
//! |------------------------|--------|
//! | `Select(BlurayPackage)` without `VideoRecording` | unchanged copy |
//! | `Select(other)`        | appended if absent, otherwise unchanged |
//! | `Deselect(Photography)` without `VideoRecording` | `Photography` and `TwoDayEvent` removed |
//! | `Deselect(other)`      | removed if present |
//! | unrecognized           | unchanged copy |
//!
//! The select-time Bluray check does not run again when `VideoRecording` is
//! later deselected. The pricing guard in `pricing.rs` repairs such
//! selections before they are priced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CatalogYear, ServiceKind};

// ============================================================================
// ServiceSet
// ============================================================================

/// Insertion-ordered set of service kinds.
///
/// Duplicates are never stored: building from a list keeps the first
/// occurrence of each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ServiceKind>", into = "Vec<ServiceKind>")]
pub struct ServiceSet {
    services: Vec<ServiceKind>,
}

impl ServiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, service: ServiceKind) -> bool {
        self.services.contains(&service)
    }

    /// True if every service of `required` is in this set, in any order
    pub fn is_superset_of(&self, required: &[ServiceKind]) -> bool {
        required.iter().all(|service| self.contains(*service))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceKind> + '_ {
        self.services.iter().copied()
    }

    pub fn as_slice(&self) -> &[ServiceKind] {
        &self.services
    }

    /// Append `service` unless already present. Returns whether it was added.
    fn insert(&mut self, service: ServiceKind) -> bool {
        if self.contains(service) {
            return false;
        }
        self.services.push(service);
        true
    }

    /// Remove `service` in place. Returns whether it was present.
    fn remove(&mut self, service: ServiceKind) -> bool {
        match self.services.iter().position(|s| *s == service) {
            Some(index) => {
                self.services.remove(index);
                true
            }
            None => false,
        }
    }
}

impl FromIterator<ServiceKind> for ServiceSet {
    fn from_iter<I: IntoIterator<Item = ServiceKind>>(iter: I) -> Self {
        let mut set = Self::new();
        for service in iter {
            set.insert(service);
        }
        set
    }
}

impl From<Vec<ServiceKind>> for ServiceSet {
    fn from(services: Vec<ServiceKind>) -> Self {
        services.into_iter().collect()
    }
}

impl<const N: usize> From<[ServiceKind; N]> for ServiceSet {
    fn from(services: [ServiceKind; N]) -> Self {
        services.into_iter().collect()
    }
}

impl From<ServiceSet> for Vec<ServiceKind> {
    fn from(set: ServiceSet) -> Self {
        set.services
    }
}

impl fmt::Display for ServiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let names: Vec<String> = self.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

// ============================================================================
// Actions
// ============================================================================

/// A user action against a selection.
///
/// Serialized as `{"type": "Select", "service": "Photography"}`. Any other
/// `type` deserializes to `Unrecognized`, which leaves the selection as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectionAction {
    Select { service: ServiceKind },
    Deselect { service: ServiceKind },
    #[serde(other)]
    Unrecognized,
}

impl SelectionAction {
    pub const fn select(service: ServiceKind) -> Self {
        Self::Select { service }
    }

    pub const fn deselect(service: ServiceKind) -> Self {
        Self::Deselect { service }
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// Whether `service` may be added to `services`.
///
/// Only a service with an unmet prerequisite is refused, which today means
/// `BlurayPackage` without `VideoRecording`.
pub fn can_select(services: &ServiceSet, service: ServiceKind) -> bool {
    service
        .prerequisite()
        .is_none_or(|required| services.contains(required))
}

/// The add-on that must leave together with `removed`, if any.
///
/// Deselecting `Photography` drops `TwoDayEvent` unless `VideoRecording`
/// still justifies it. The check does not require `Photography` itself to be
/// present.
pub fn dependent_addon(services: &ServiceSet, removed: ServiceKind) -> Option<ServiceKind> {
    let orphaned = removed == ServiceKind::Photography
        && services.contains(ServiceKind::TwoDayEvent)
        && !services.contains(ServiceKind::VideoRecording);
    orphaned.then_some(ServiceKind::TwoDayEvent)
}

/// Apply `action` to `previous` and return the resulting selection.
///
/// Refused or unrecognized actions return an unchanged copy; this function
/// never fails.
pub fn update_selected_services(previous: &ServiceSet, action: SelectionAction) -> ServiceSet {
    let mut next = previous.clone();

    match action {
        SelectionAction::Select { service } => {
            if !can_select(previous, service) {
                tracing::trace!(%service, "select refused, prerequisite missing");
                return next;
            }
            next.insert(service);
        }
        SelectionAction::Deselect { service } => {
            if let Some(addon) = dependent_addon(previous, service) {
                tracing::trace!(%service, %addon, "cascading removal of dependent add-on");
                next.remove(addon);
            }
            next.remove(service);
        }
        SelectionAction::Unrecognized => {
            tracing::trace!("ignoring unrecognized selection action");
        }
    }

    next
}

// ============================================================================
// Selection
// ============================================================================

/// A service selection together with the catalog year it is priced in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub services: ServiceSet,
    pub year: CatalogYear,
}

impl Selection {
    pub fn new(year: CatalogYear) -> Self {
        Self {
            services: ServiceSet::new(),
            year,
        }
    }

    pub fn with_services(year: CatalogYear, services: impl Into<ServiceSet>) -> Self {
        Self {
            services: services.into(),
            year,
        }
    }

    /// Return a new selection with `action` applied; the year is unchanged
    pub fn apply(&self, action: SelectionAction) -> Self {
        Self {
            services: update_selected_services(&self.services, action),
            year: self.year,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
