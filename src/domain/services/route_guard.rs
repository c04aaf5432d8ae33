#[cfg(test)]
#[path = "route_guard_test.rs"]
mod tests;

use super::SessionStore;
use crate::domain::models::Route;
use crate::domain::models::RouteClass;
use crate::domain::models::RouteDecision;

pub struct RouteGuard {}

impl RouteGuard {
    pub fn decide(has_token: bool, class: RouteClass) -> RouteDecision {
        match (class, has_token) {
            (RouteClass::Protected, false) => return RouteDecision::Redirect(Route::Login),
            (RouteClass::PublicOnly, true) => return RouteDecision::Redirect(Route::Chat),
            _ => return RouteDecision::Allow,
        }
    }

    pub fn check(session: &SessionStore, route: Route) -> RouteDecision {
        return RouteGuard::check_token(session.is_authenticated(), route);
    }

    fn check_token(has_token: bool, route: Route) -> RouteDecision {
        match route.class() {
            Some(class) => return RouteGuard::decide(has_token, class),
            None => return RouteDecision::Redirect(Route::Login),
        }
    }

    /// Follows redirects until a reachable route is found. Each route class
    /// redirects at most once per token state, so the chain is short.
    pub fn resolve(session: &SessionStore, route: Route) -> Route {
        let has_token = session.is_authenticated();
        let mut current = route;
        for _ in 0..4 {
            match RouteGuard::check_token(has_token, current) {
                RouteDecision::Allow => return current,
                RouteDecision::Redirect(next) => current = next,
            }
        }

        return current;
    }
}
