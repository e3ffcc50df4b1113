//! Opening console locations.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use pharmacy_auth::navigation::{MenuNode, active_trail, build_menu, console_menu};
use pharmacy_core::config::ClientConfig;
use pharmacy_core::result::AppResult;
use pharmacy_entity::user::UserProfile;

use crate::api::HttpAuthApi;
use crate::navigator::{HistoryNavigator, Navigator};
use crate::routes::{Access, ConsoleRoute, console_routes, match_route};
use crate::session::SessionContext;
use crate::storage::FileStorage;
use crate::views::{GuardedView, RouteGuard};

/// A rendered console page with its navigation chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContent {
    /// Location rendered.
    pub path: String,
    /// Page title.
    pub title: String,
    /// Signed-in user.
    pub user: UserProfile,
    /// Menu visible to the user.
    pub menu: Vec<MenuNode>,
    /// Active menu trail for the location.
    pub active: Vec<String>,
}

/// Result of opening a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    /// A page anyone may see.
    Public {
        /// Page title.
        title: String,
    },
    /// No route serves the location.
    NotFound {
        /// The location.
        path: String,
    },
    /// A guarded page.
    Guarded {
        /// What the guard rendered.
        view: GuardedView<PageContent>,
    },
}

/// The console runtime.
#[derive(Debug)]
pub struct Console {
    session: Arc<SessionContext>,
    navigator: Arc<dyn Navigator>,
    guard: RouteGuard,
    routes: Vec<ConsoleRoute>,
    menu: Vec<MenuNode>,
}

impl Console {
    /// Assemble a console from its parts.
    pub fn new(
        session: Arc<SessionContext>,
        navigator: Arc<dyn Navigator>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            guard: RouteGuard::new(Arc::clone(&navigator), config.login_route.clone()),
            session,
            navigator,
            routes: console_routes(),
            menu: console_menu(),
        }
    }

    /// Wire an HTTP-backed console with file storage, as configured.
    ///
    /// The session is still loading; call [`SessionContext::initialize`].
    pub fn connect(config: &ClientConfig) -> AppResult<Self> {
        let api = Arc::new(HttpAuthApi::new(config)?);
        let storage = Arc::new(FileStorage::open(&config.storage_path)?);
        let navigator: Arc<dyn Navigator> = Arc::new(HistoryNavigator::new(&config.home_route));
        let session = Arc::new(SessionContext::new(
            api,
            storage,
            Arc::clone(&navigator),
            config.home_route.clone(),
        ));

        Ok(Self::new(session, navigator, config))
    }

    /// The session resolver.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The navigator.
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Navigate to `path` and render it.
    pub fn open(&self, path: &str) -> Page {
        self.navigator.push(path);
        self.render()
    }

    /// Render the current location.
    pub fn render(&self) -> Page {
        let location = self.navigator.location();
        let Some(route) = match_route(&self.routes, &location) else {
            debug!(path = %location, "No console route");
            return Page::NotFound { path: location };
        };

        let requirement = match &route.access {
            Access::Public => {
                return Page::Public {
                    title: route.title.to_string(),
                };
            }
            Access::Guarded(requirement) => requirement,
        };

        let state = self.session.state();
        let view = self.guard.render(
            &state,
            requirement,
            |user| {
                let (menu, active) = self.menu_for(user, &location);
                PageContent {
                    path: location.clone(),
                    title: route.title.to_string(),
                    user: user.clone(),
                    menu,
                    active,
                }
            },
            None,
        );

        Page::Guarded { view }
    }

    /// Menu and active trail for the current user at the current location.
    pub fn menu(&self) -> (Vec<MenuNode>, Vec<String>) {
        let state = self.session.state();
        let location = self.navigator.location();
        match state.user() {
            Some(user) => self.menu_for(user, &location),
            None => (Vec::new(), Vec::new()),
        }
    }

    fn menu_for(&self, user: &UserProfile, location: &str) -> (Vec<MenuNode>, Vec<String>) {
        let evaluator = pharmacy_auth::PermissionEvaluator::new(Some(user));
        let menu = build_menu(&self.menu, &evaluator);
        let active = active_trail(&menu, location);
        (menu, active)
    }
}
