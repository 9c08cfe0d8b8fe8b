use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use tracing::debug;
use url::form_urlencoded;

use super::Navigator;
use crate::codes::ADMIN_REQUIRED_MESSAGE;
use crate::notify::{ModalStore, Notifier};
use crate::session::SessionState;

pub const HOME_PATH: &str = "/";
pub const ERROR_PATH: &str = "/error";

/// A path plus its decoded query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn parse(target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        let path = if path.is_empty() { HOME_PATH } else { path };
        Self {
            path: path.to_string(),
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn with_query(path: &str, query: &[(&str, &str)]) -> Self {
        Self {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            return f.write_str(&self.path);
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        write!(f, "{}?{}", self.path, query)
    }
}

struct History {
    entries: Vec<Location>,
    index: usize,
    previous_page: Option<String>,
}

/// An in-memory router with browser-like history.
pub struct Router {
    history: Mutex<History>,
}

impl Router {
    pub fn new(initial: &str) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![Location::parse(initial)],
                index: 0,
                previous_page: None,
            }),
        }
    }

    pub fn current(&self) -> Location {
        let history = self.history.lock().expect("router mutex poisoned");
        history.entries[history.index].clone()
    }

    /// The last page left for another one, ignoring the error page.
    pub fn previous_page(&self) -> Option<String> {
        self.history
            .lock()
            .expect("router mutex poisoned")
            .previous_page
            .clone()
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.current().query.get(key).cloned()
    }

    fn record_previous(history: &mut History, to: &Location) {
        let from = &history.entries[history.index];
        if from.path != ERROR_PATH && from.path != to.path {
            history.previous_page = Some(from.path.clone());
        }
    }

    pub fn push_location(&self, to: Location) {
        let mut history = self.history.lock().expect("router mutex poisoned");
        Self::record_previous(&mut history, &to);
        debug!("Navigating to {}", to);
        let keep = history.index + 1;
        history.entries.truncate(keep);
        history.entries.push(to);
        history.index += 1;
    }

    pub fn push(&self, target: &str) {
        self.push_location(Location::parse(target));
    }

    pub fn replace(&self, target: &str) {
        let to = Location::parse(target);
        let mut history = self.history.lock().expect("router mutex poisoned");
        Self::record_previous(&mut history, &to);
        let index = history.index;
        history.entries[index] = to;
    }

    /// Go back `steps` entries; with not enough history, go home instead.
    pub fn back(&self, steps: usize) {
        let mut history = self.history.lock().expect("router mutex poisoned");
        if steps <= history.index {
            let to = history.entries[history.index - steps].clone();
            Self::record_previous(&mut history, &to);
            history.index -= steps;
            return;
        }
        drop(history);
        self.push(HOME_PATH);
    }

    pub fn can_go_back(&self) -> bool {
        self.history.lock().expect("router mutex poisoned").index > 0
    }

    /// Ask first, then navigate. Returns whether the user agreed; a confirm
    /// replaced by another modal counts as a refusal.
    pub async fn go_page_with_confirm(
        &self,
        modal: &ModalStore,
        message: &str,
        target: &str,
    ) -> bool {
        let answer = modal.show_confirm(message, None);
        if !answer.await.unwrap_or(false) {
            debug!("Navigation to {} declined", target);
            return false;
        }
        self.push(target);
        true
    }

    fn login_redirect(&self, login_path: &str, path: &str) {
        self.push_location(Location::with_query(login_path, &[("redirect", path)]));
    }

    /// Navigate to a page that needs a signed-in user. Unauthenticated users
    /// are sent to the login view with a `redirect` back to `path`.
    pub fn go_auth_page(&self, path: &str, login_path: &str, session: &SessionState) -> bool {
        if !session.is_authenticated() {
            self.login_redirect(login_path, path);
            return false;
        }
        self.push(path);
        true
    }

    /// Navigate to an admin page. Non-admins stay where they are and are told why.
    pub fn go_admin_page(
        &self,
        path: &str,
        login_path: &str,
        session: &SessionState,
        notifier: &dyn Notifier,
    ) -> bool {
        if !session.is_authenticated() {
            self.login_redirect(login_path, path);
            return false;
        }
        if !session.is_admin() {
            notifier.error(ADMIN_REQUIRED_MESSAGE);
            return false;
        }
        self.push(path);
        true
    }

    pub fn go_error_page(&self, code: &str, message: Option<&str>) {
        let mut query = vec![("code", code)];
        if let Some(message) = message {
            query.push(("message", message));
        }
        self.push_location(Location::with_query(ERROR_PATH, &query));
    }
}

impl Navigator for Router {
    fn current_path(&self) -> String {
        self.current().path
    }

    fn navigate(&self, target: &str) {
        self.push(target);
    }
}

/// Fill `:name` segments of a route pattern, e.g. `/orders/:id` -> `/orders/7`.
pub fn resolve_params(pattern: &str, params: &[(&str, &str)]) -> String {
    pattern
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| segment.to_string()),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
