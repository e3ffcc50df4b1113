//! Guarded rendering.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use pharmacy_auth::guard::{GuardDecision, Requirement, SessionState, decide};
use pharmacy_entity::user::UserProfile;

use crate::navigator::Navigator;

/// What a guarded view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "content", rename_all = "snake_case")]
pub enum GuardedView<V> {
    /// Resolution pending; show a placeholder.
    Loading,
    /// No user; navigation was replaced with the login route.
    Redirected {
        /// Where the user was sent.
        to: String,
    },
    /// Requirement failed and the caller gave no fallback.
    Forbidden(ForbiddenView),
    /// Requirement failed; the caller's fallback.
    Fallback(V),
    /// Requirement met.
    Content(V),
}

impl<V> GuardedView<V> {
    /// The rendered content, if the guard passed.
    pub fn content(&self) -> Option<&V> {
        match self {
            Self::Content(v) => Some(v),
            _ => None,
        }
    }
}

/// The generic "access denied" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForbiddenView {
    /// Heading.
    pub title: String,
    /// Explanation for the user.
    pub message: String,
    /// The requirement that failed, for support staff.
    pub requirement: String,
}

impl ForbiddenView {
    fn for_requirement(requirement: &Requirement) -> Self {
        Self {
            title: "Access denied".to_string(),
            message: "You do not have permission to view this page.".to_string(),
            requirement: requirement.to_string(),
        }
    }

    /// The view's "go back" action.
    pub fn go_back(&self, navigator: &dyn Navigator) {
        navigator.back();
    }
}

/// Applies guard decisions for the console.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl RouteGuard {
    /// A guard that redirects to `login_route`.
    pub fn new(navigator: Arc<dyn Navigator>, login_route: impl Into<String>) -> Self {
        Self {
            navigator,
            login_route: login_route.into(),
        }
    }

    /// Render one guarded view.
    ///
    /// `content` runs only when the requirement passes. Call again on every
    /// render; nothing is remembered between calls.
    pub fn render<V>(
        &self,
        state: &SessionState,
        requirement: &Requirement,
        content: impl FnOnce(&UserProfile) -> V,
        fallback: Option<V>,
    ) -> GuardedView<V> {
        match decide(state, requirement) {
            GuardDecision::Loading => GuardedView::Loading,
            GuardDecision::Unauthenticated => {
                debug!(to = %self.login_route, "Redirecting signed-out visitor");
                self.navigator.replace(&self.login_route);
                GuardedView::Redirected {
                    to: self.login_route.clone(),
                }
            }
            GuardDecision::Forbidden => match fallback {
                Some(v) => GuardedView::Fallback(v),
                None => GuardedView::Forbidden(ForbiddenView::for_requirement(requirement)),
            },
            GuardDecision::Authorized(user) => GuardedView::Content(content(user)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::HistoryNavigator;
    use pharmacy_entity::user::UserRole;

    fn guard() -> (RouteGuard, Arc<HistoryNavigator>) {
        let nav = Arc::new(HistoryNavigator::new("/"));
        (RouteGuard::new(nav.clone(), "/login"), nav)
    }

    #[test]
    fn test_loading_renders_placeholder_without_content() {
        let (guard, nav) = guard();
        let view = guard.render(
            &SessionState::Loading,
            &Requirement::one("read_products"),
            |_| panic!("content must not render"),
            None::<()>,
        );
        assert_eq!(view, GuardedView::Loading);
        assert_eq!(nav.location(), "/");
    }

    #[test]
    fn test_signed_out_is_redirected_with_replace() {
        let (guard, nav) = guard();
        nav.push("/admin/sales/orders");

        let view = guard.render(
            &SessionState::anonymous(),
            &Requirement::none(),
            |_| (),
            None,
        );
        assert_eq!(view, GuardedView::Redirected { to: "/login".into() });
        assert_eq!(nav.entries(), ["/", "/login"]);
    }

    #[test]
    fn test_forbidden_and_fallback() {
        let (guard, nav) = guard();
        let state = SessionState::authenticated(UserProfile::new(
            "sam",
            UserRole::Staff,
            ["read_products"],
        ));
        let requirement = Requirement::one("write_products");

        let view = guard.render(&state, &requirement, |_| "editor", None);
        let GuardedView::Forbidden(forbidden) = view else {
            panic!("expected forbidden view");
        };
        assert_eq!(forbidden.requirement, "write_products");

        nav.push("/admin/catalog/products/new");
        forbidden.go_back(&*nav);
        assert_eq!(nav.location(), "/");

        let view = guard.render(&state, &requirement, |_| "editor", Some("read-only"));
        assert_eq!(view, GuardedView::Fallback("read-only"));
    }

    #[test]
    fn test_authorized_renders_content() {
        let (guard, _) = guard();
        let state = SessionState::authenticated(UserProfile::new(
            "sam",
            UserRole::Staff,
            ["read_products"],
        ));
        let view = guard.render(&state, &Requirement::one("read_products"), |u| u.name.clone(), None);
        assert_eq!(view.content().map(String::as_str), Some("sam"));
    }
}
