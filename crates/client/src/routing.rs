//! Pure view routing.
//!
//! Which screen renders is a function of the session state alone. The
//! resolver redirects any requested view that is inconsistent with the
//! state, so deep links and reloads always land on a screen the user is
//! allowed to see.

use nexus_core::Role;

use crate::session::SessionState;

/// Top-level screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Combined sign-in / sign-up screen.
    Auth,
    /// Inventory management for the signed-in merchant.
    MerchantDashboard,
    /// Public catalog with search.
    Storefront,
}

impl View {
    /// The URL path the view lives at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Auth => "/auth",
            Self::MerchantDashboard => "/merchant",
            Self::Storefront => "/shop",
        }
    }
}

/// The home view for a session state.
///
/// Anonymous users start at the auth screen; signed-in users start at the
/// screen for their role.
#[must_use]
pub fn route_for(state: &SessionState) -> View {
    match state.role() {
        None => View::Auth,
        Some(Role::Merchant) => View::MerchantDashboard,
        Some(Role::Customer) => View::Storefront,
    }
}

/// Resolve a requested view against the session state.
///
/// A request consistent with the state is granted; anything else redirects
/// to [`route_for`]. Signed-in users never see the auth screen, and each
/// role only sees its own screen.
#[must_use]
pub fn resolve(requested: View, state: &SessionState) -> View {
    match (requested, state.role()) {
        (View::Auth, None)
        | (View::MerchantDashboard, Some(Role::Merchant))
        | (View::Storefront, Some(Role::Customer)) => requested,
        _ => route_for(state),
    }
}
