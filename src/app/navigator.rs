use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    Landing,
    App,
}

impl AppRoute {
    pub const fn path(&self) -> &'static str {
        match self {
            AppRoute::Landing => "/landing",
            AppRoute::App => "/app",
        }
    }

    /// Maps a location path to a screen. An installed app skips the landing
    /// page; unknown paths fall back to it.
    pub fn resolve(path: &str, standalone: bool) -> Self {
        match path {
            "/" | "/landing" if standalone => AppRoute::App,
            "/app" => AppRoute::App,
            path if path.starts_with("/app/") => AppRoute::App,
            _ => AppRoute::Landing,
        }
    }
}

/// Navigation between the landing page and the app screen. Views subscribe
/// to the current route instead of reaching for a global navigate hook.
#[derive(Debug)]
pub struct Navigator {
    sender: watch::Sender<AppRoute>,
}

impl Navigator {
    pub fn new(initial: AppRoute) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn resolve_initial(path: &str, standalone: bool) -> Self {
        Self::new(AppRoute::resolve(path, standalone))
    }

    pub fn current(&self) -> AppRoute {
        *self.sender.borrow()
    }

    pub fn navigate(&self, route: AppRoute) {
        debug!("Navigating to {}", route.path());
        self.sender.send_replace(route);
    }

    /// Like [`Navigator::navigate`] but parses a path, as links do.
    pub fn navigate_to(&self, path: &str) {
        self.navigate(AppRoute::resolve(path, false));
    }

    pub fn subscribe(&self) -> watch::Receiver<AppRoute> {
        self.sender.subscribe()
    }
}

#[test]
fn standalone_skips_landing() {
    assert_eq!(AppRoute::resolve("/", true), AppRoute::App);
    assert_eq!(AppRoute::resolve("/landing", true), AppRoute::App);
    assert_eq!(AppRoute::resolve("/", false), AppRoute::Landing);
    assert_eq!(AppRoute::resolve("/app/buildings", false), AppRoute::App);
    assert_eq!(AppRoute::resolve("/nowhere", true), AppRoute::Landing);
    assert_eq!(AppRoute::resolve("/application", false), AppRoute::Landing);
}

#[tokio::test]
async fn subscribers_see_navigation() {
    let navigator = Navigator::resolve_initial("/", false);
    let mut receiver = navigator.subscribe();
    navigator.navigate_to("/app");
    receiver.changed().await.unwrap();
    assert_eq!(*receiver.borrow_and_update(), AppRoute::App);
    assert_eq!(navigator.current(), AppRoute::App);
}
