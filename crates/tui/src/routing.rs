use serde_json::{Map, Value};
use std::cell::RefCell;

pub const DEFAULT_FALLBACK_ROUTE: &str = "home";

pub type RouteParams = Map<String, Value>;

pub trait Router {
    fn navigate_to(&self, route: &str, params: &RouteParams);

    fn previous_route(&self) -> Option<String>;

    fn go_back(&self);
}

/// Goes back when history allows it, otherwise navigates to `fallback`
/// (`"home"` when not given).
pub fn nav_back(router: &dyn Router, fallback: Option<&str>) {
    if let Some(previous) = router.previous_route() {
        tracing::debug!(%previous, "navigating back");
        router.go_back();
        return;
    }
    let fallback = fallback
        .filter(|route| !route.is_empty())
        .unwrap_or(DEFAULT_FALLBACK_ROUTE);
    tracing::debug!(fallback, "no history, navigating to fallback");
    router.navigate_to(fallback, &RouteParams::new());
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub route: String,
    pub params: RouteParams,
}

#[derive(Debug, Default)]
pub struct RouteHistory {
    entries: RefCell<Vec<RouteEntry>>,
}

impl RouteHistory {
    pub fn starting_at(route: &str) -> Self {
        let history = Self::default();
        history.navigate_to(route, &RouteParams::new());
        history
    }

    pub fn current(&self) -> Option<RouteEntry> {
        self.entries.borrow().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl Router for RouteHistory {
    fn navigate_to(&self, route: &str, params: &RouteParams) {
        self.entries.borrow_mut().push(RouteEntry {
            route: route.to_string(),
            params: params.clone(),
        });
    }

    fn previous_route(&self) -> Option<String> {
        let entries = self.entries.borrow();
        entries
            .len()
            .checked_sub(2)
            .map(|index| entries[index].route.clone())
    }

    fn go_back(&self) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() > 1 {
            entries.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{nav_back, RouteHistory, RouteParams, Router};
    use serde_json::json;

    #[test]
    fn back_pops_when_history_exists() {
        let history = RouteHistory::starting_at("home");
        let mut params = RouteParams::new();
        params.insert("id".to_string(), json!(7));
        history.navigate_to("detail", &params);
        assert_eq!(history.previous_route().as_deref(), Some("home"));
        nav_back(&history, Some("elsewhere"));
        assert_eq!(history.current().map(|entry| entry.route).as_deref(), Some("home"));
    }

    #[test]
    fn fallback_is_used_without_history() {
        let history = RouteHistory::starting_at("detail");
        nav_back(&history, Some("list"));
        assert_eq!(history.current().map(|entry| entry.route).as_deref(), Some("list"));

        let empty = RouteHistory::default();
        nav_back(&empty, None);
        assert_eq!(empty.current().map(|entry| entry.route).as_deref(), Some("home"));
        assert_eq!(empty.depth(), 1);
    }
}
