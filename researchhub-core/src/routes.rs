//! Client routes and the route guard.
//!
//! [`guard`] is the access-control checkpoint evaluated before a protected
//! screen renders. It is a pure function of the session snapshot and the
//! route's allowed roles, so it must simply be re-run whenever either the
//! session or the requested path changes.

use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString};

use crate::session::Session;
use crate::Role;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// The registration screen.
pub const REGISTER_PATH: &str = "/register";
const PROTECTED_PREFIX: &str = "autenticate";

/// Outcome of the route guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The profile is still being resolved; show a pending state and decide later.
    Pending,
    /// Navigate to this path instead.
    Redirect(String),
    /// Render the protected screen.
    Allow,
}

/// Decides whether a protected screen may render.
///
/// - loading → [`Access::Pending`], so a restored session does not flash
///   the login screen while its profile resolves;
/// - no credential or no profile → redirect to [`LOGIN_PATH`];
/// - `allowed_roles` given and the profile's role not in it → redirect to
///   the account's own role home;
/// - otherwise [`Access::Allow`].
#[must_use]
pub fn guard(session: &Session, allowed_roles: Option<&[Role]>) -> Access {
    if session.is_loading() {
        return Access::Pending;
    }
    let profile = match (session.credential(), session.profile()) {
        (Some(_), Some(profile)) => profile,
        _ => return Access::Redirect(LOGIN_PATH.to_string()),
    };
    match allowed_roles {
        Some(roles) if !roles.contains(&profile.role) => {
            Access::Redirect(profile.role.home_path())
        }
        _ => Access::Allow,
    }
}

/// Screens below a role's home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Section {
    /// The role's dashboard, `/autenticate/{role}`.
    Home,
    /// Paper search.
    Papers,
    /// Papers saved by the account.
    SavedPapers,
    /// Project management.
    Projects,
    /// Experiments of the account's projects.
    Experiments,
    /// Equipment and reservations.
    Equipment,
    /// Account management.
    Users,
}

impl Section {
    /// Every section, in sidebar order.
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Papers,
        Self::SavedPapers,
        Self::Projects,
        Self::Experiments,
        Self::Equipment,
        Self::Users,
    ];

    /// Roles that may open this section.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Home | Self::Papers => &[Role::Admin, Role::Researcher, Role::User],
            Self::SavedPapers => &[Role::Researcher, Role::User],
            Self::Projects | Self::Experiments | Self::Equipment => {
                &[Role::Admin, Role::Researcher]
            }
            Self::Users => &[Role::Admin],
        }
    }

    /// Sidebar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Dashboard",
            Self::Papers => "Papers",
            Self::SavedPapers => "Saved papers",
            Self::Projects => "Projects",
            Self::Experiments => "Experiments",
            Self::Equipment => "Equipment",
            Self::Users => "Users",
        }
    }

    /// `true` if `role` may open this section.
    #[must_use]
    pub fn is_open_to(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// A client-visible route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, always redirected to the login screen.
    Root,
    /// `/login`.
    Login,
    /// `/register`.
    Register,
    /// `/autenticate/{role}[/{section}]`.
    Protected {
        /// The role subtree.
        role: Role,
        /// The screen within it.
        section: Section,
    },
}

impl Route {
    /// Parses a path. Query strings and trailing slashes are ignored.
    ///
    /// Returns `None` for paths with no screen, including sections the
    /// subtree's role may not open (`/autenticate/user/users`).
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Self::Root),
            ["login"] => Some(Self::Login),
            ["register"] => Some(Self::Register),
            [PROTECTED_PREFIX, role] => Self::protected(role, Section::Home),
            [PROTECTED_PREFIX, role, section] => match Section::from_str(section) {
                Ok(Section::Home) | Err(_) => None,
                Ok(section) => Self::protected(role, section),
            },
            _ => None,
        }
    }

    fn protected(role: &str, section: Section) -> Option<Self> {
        let role = Role::from_str(role).ok()?;
        section
            .is_open_to(role)
            .then_some(Self::Protected { role, section })
    }

    /// Roles allowed to render this route; `None` for public routes.
    ///
    /// A role subtree is only open to that role.
    #[must_use]
    pub const fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Self::Root | Self::Login | Self::Register => None,
            Self::Protected { role, .. } => Some(match role {
                Role::Admin => &[Role::Admin],
                Role::Researcher => &[Role::Researcher],
                Role::User => &[Role::User],
            }),
        }
    }

    /// The canonical path of this route.
    #[must_use]
    pub fn path(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Login => f.write_str(LOGIN_PATH),
            Self::Register => f.write_str(REGISTER_PATH),
            Self::Protected {
                role,
                section: Section::Home,
            } => write!(f, "/{PROTECTED_PREFIX}/{role}"),
            Self::Protected { role, section } => write!(f, "/{PROTECTED_PREFIX}/{role}/{section}"),
        }
    }
}

/// Outcome of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Wait for the session to settle, then navigate again.
    Pending,
    /// Navigate to this path instead.
    Redirect(String),
    /// Render this route.
    Render(Route),
    /// No screen at this path.
    NotFound,
}

/// Resolves a path against the route table and the guard.
#[must_use]
pub fn navigate(session: &Session, path: &str) -> Navigation {
    let Some(route) = Route::parse(path) else {
        return Navigation::NotFound;
    };
    if route == Route::Root {
        return Navigation::Redirect(LOGIN_PATH.to_string());
    }
    match route.allowed_roles() {
        None => Navigation::Render(route),
        Some(roles) => match guard(session, Some(roles)) {
            Access::Pending => Navigation::Pending,
            Access::Redirect(path) => Navigation::Redirect(path),
            Access::Allow => Navigation::Render(route),
        },
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// Target screen.
    pub section: Section,
    /// Target route.
    pub route: Route,
}

/// Sidebar entries visible to `role`, in display order.
#[must_use]
pub fn menu(role: Role) -> Vec<MenuItem> {
    Section::ALL
        .into_iter()
        .filter(|section| section.is_open_to(role))
        .map(|section| MenuItem {
            section,
            route: Route::Protected { role, section },
        })
        .collect()
}
