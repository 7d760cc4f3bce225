//! Console route table.
//!
//! Every `/admin` page sits behind a `GuardedView`; the login page is
//! public; everything else redirects to the login page.

use super::view::{GuardedView, Render};

/// A protected page of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedRoute {
    pub pattern: &'static str,
    pub title: &'static str,
}

pub const PROTECTED_ROUTES: &[ProtectedRoute] = &[
    ProtectedRoute {
        pattern: "/admin",
        title: "Dashboard",
    },
    ProtectedRoute {
        pattern: "/admin/contacts",
        title: "Contact Submissions",
    },
    ProtectedRoute {
        pattern: "/admin/users",
        title: "User Management",
    },
    ProtectedRoute {
        pattern: "/admin/services",
        title: "Services Management",
    },
    ProtectedRoute {
        pattern: "/admin/blog",
        title: "Blog Posts Management",
    },
    ProtectedRoute {
        pattern: "/admin/blog/:slug",
        title: "Blog Post",
    },
];

/// Sidebar navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: &[NavItem] = &[
    NavItem {
        name: "Dashboard",
        href: "/admin",
    },
    NavItem {
        name: "Contact Submissions",
        href: "/admin/contacts",
    },
    NavItem {
        name: "User Management",
        href: "/admin/users",
    },
    NavItem {
        name: "Services",
        href: "/admin/services",
    },
    NavItem {
        name: "Testimonials",
        href: "/admin/testimonials",
    },
    NavItem {
        name: "Blog Posts",
        href: "/admin/blog",
    },
    NavItem {
        name: "Analytics",
        href: "/admin/analytics",
    },
    NavItem {
        name: "Notifications",
        href: "/admin/notifications",
    },
    NavItem {
        name: "Settings",
        href: "/admin/settings",
    },
];

/// Whether a navigation entry is highlighted for the current path.
///
/// The dashboard entry matches exactly; the others match by prefix.
pub fn is_active(href: &str, pathname: &str) -> bool {
    if href == "/admin" {
        return pathname == "/admin";
    }
    pathname.starts_with(href)
}

/// Result of matching a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Login,
    Protected {
        route: ProtectedRoute,
        slug: Option<String>,
    },
    Redirect(String),
}

/// A protected page ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedPage {
    pub title: &'static str,
    pub operator: String,
    pub slug: Option<String>,
}

/// What the console shows for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Login,
    Guarded(Render<ProtectedPage>),
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct ConsoleRouter {
    login_path: String,
}

impl ConsoleRouter {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    /// Matches a path, ignoring query string, fragment and trailing slash.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let path = normalize(path);

        if path == self.login_path {
            return RouteMatch::Login;
        }

        PROTECTED_ROUTES
            .iter()
            .find_map(|route| {
                match_pattern(route.pattern, path).map(|slug| RouteMatch::Protected {
                    route: *route,
                    slug,
                })
            })
            .unwrap_or_else(|| RouteMatch::Redirect(self.login_path.clone()))
    }

    /// Resolves a path and, for protected routes, asks the view whether
    /// the content may be shown.
    pub fn render(&self, path: &str, view: &GuardedView) -> Page {
        match self.resolve(path) {
            RouteMatch::Login => Page::Login,
            RouteMatch::Redirect(to) => Page::Redirect(to),
            RouteMatch::Protected { route, slug } => Page::Guarded(view.render(|identity| {
                ProtectedPage {
                    title: route.title,
                    operator: identity.to_string(),
                    slug,
                }
            })),
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Returns `Some(slug)` when `path` matches `pattern`; the slug is the
/// value of a `:param` segment if the pattern has one.
fn match_pattern(pattern: &str, path: &str) -> Option<Option<String>> {
    let mut expected = pattern.split('/');
    let mut actual = path.split('/');
    let mut slug = None;

    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return Some(slug),
            (Some(p), Some(a)) if p.starts_with(':') && !a.is_empty() => {
                slug = Some(a.to_string());
            }
            (Some(p), Some(a)) if p == a => {}
            _ => return None,
        }
    }
}
