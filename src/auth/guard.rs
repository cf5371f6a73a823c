use crate::auth::session::SessionState;
use crate::domain::models::Role;

/// What the router should do with a view request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The session is still resolving; show a waiting indicator and decide
    /// nothing yet. Redirecting now would bounce a valid session to login.
    Pending,
    /// Authenticated and allowed: render the view.
    Render,
    /// Not authenticated: go to login, remembering where the user was headed.
    RedirectToLogin { from: String },
    /// Authenticated but not allowed here: go to the role's own landing view.
    Redirect { to: &'static str },
}

/// Gate a view request against the current session and the view's allowed
/// roles.
pub fn authorize(state: &SessionState, allowed: &[Role], requested: &str) -> RouteOutcome {
    if state.is_resolving() {
        return RouteOutcome::Pending;
    }

    let Some(identity) = state.identity() else {
        return RouteOutcome::RedirectToLogin {
            from: requested.to_string(),
        };
    };

    if allowed.contains(&identity.role) {
        RouteOutcome::Render
    } else {
        RouteOutcome::Redirect {
            to: identity.role.home_path(),
        }
    }
}
