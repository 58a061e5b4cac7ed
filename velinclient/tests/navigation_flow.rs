//! End-to-end navigation scenarios combining the navigator, the route
//! gates and the real auth store.

use std::sync::Arc;
use tempfile::TempDir;
use velinclient::{resolve, Navigator, NetworkMonitor, Page, RouteOutcome, ShareLinkResolver};
use velinconfig::Config;
use velinstore::AuthStore;

fn test_config() -> (Arc<Config>, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    (Arc::new(config), dir)
}

#[test]
fn unauthenticated_visit_lands_on_auth_then_recovers() {
    let (config, _dir) = test_config();
    let auth = AuthStore::new(config);
    let network = NetworkMonitor::new();
    let nav = Navigator::new();

    nav.navigate("/podcast/dQw4w9WgXcQ");

    // Guard bounces to /auth
    match resolve(&nav.location(), auth.is_authenticated(), network.is_online()) {
        RouteOutcome::Redirect(target) => nav.navigate(&target),
        other => panic!("expected redirect, got {:?}", other),
    }
    assert_eq!(nav.location(), "/auth");

    // The auth page itself resolves without looping
    assert_eq!(
        resolve(&nav.location(), auth.is_authenticated(), network.is_online()),
        RouteOutcome::Page(Page::Auth)
    );

    // After signing in, the episode page is reachable
    auth.login("alice", "token").unwrap();
    nav.navigate("/podcast/dQw4w9WgXcQ");
    assert_eq!(
        resolve(&nav.location(), auth.is_authenticated(), network.is_online()),
        RouteOutcome::Page(Page::PodcastDetail {
            id: "dQw4w9WgXcQ".to_string()
        })
    );
}

#[test]
fn offline_gates_every_page() {
    let (config, _dir) = test_config();
    let auth = AuthStore::new(config);
    auth.login("alice", "token").unwrap();

    let network = NetworkMonitor::new();
    network.set_online(false);

    for path in ["/", "/auth", "/create", "/search/jazz"] {
        assert_eq!(
            resolve(path, auth.is_authenticated(), network.is_online()),
            RouteOutcome::Offline
        );
    }
}

#[test]
fn share_launch_resolves_into_episode_page() {
    let (config, _dir) = test_config();
    let auth = AuthStore::new(config);
    auth.login("alice", "token").unwrap();

    let nav = Navigator::new();
    let resolver = ShareLinkResolver::new(nav.bridge());

    resolver.resolve("https://velin.example/?share=dQw4w9WgXcQ");

    assert_eq!(
        resolve(&nav.location(), auth.is_authenticated(), true),
        RouteOutcome::Page(Page::PodcastDetail {
            id: "dQw4w9WgXcQ".to_string()
        })
    );
}
