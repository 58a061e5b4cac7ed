//! Route table and access resolution
//!
//! Maps location paths onto pages and applies the two gates every
//! navigation passes through: connectivity and authentication. Routes are
//! declared in one table so adding a page means adding a line.

use urlencoding::decode;

/// A resolved page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    SearchResults { query: String },
    PodcastDetail { id: String },
    ChannelView { id: String },
    Create,
    Auth,
    NotFound,
}

/// Outcome of resolving a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Render this page
    Page(Page),
    /// Navigate somewhere else instead
    Redirect(String),
    /// No connectivity, render the offline surface
    Offline,
}

// One row per route: literal segments match exactly, ":name" segments
// capture. Order matters, first match wins.
const ROUTES: &[(&str, fn(&[String]) -> Page)] = &[
    ("/", |_| Page::Home),
    ("/search/:query", |p| Page::SearchResults {
        query: p[0].clone(),
    }),
    ("/podcast/:id", |p| Page::PodcastDetail { id: p[0].clone() }),
    ("/channel/:id", |p| Page::ChannelView { id: p[0].clone() }),
    ("/create", |_| Page::Create),
    ("/auth", |_| Page::Auth),
];

/// Paths reachable without authentication
const PUBLIC_PATHS: &[&str] = &["/auth"];

/// Normalize a path: ensure a leading slash, strip a trailing one
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Match a path against the route table
pub fn match_route(path: &str) -> Page {
    let path = normalize_path(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    'routes: for (pattern, build) in ROUTES {
        let pattern_segments: Vec<&str> =
            pattern.split('/').filter(|s| !s.is_empty()).collect();

        if pattern_segments.len() != segments.len() {
            continue;
        }

        let mut params = Vec::new();
        for (pat, seg) in pattern_segments.iter().zip(&segments) {
            if let Some(_name) = pat.strip_prefix(':') {
                // Captured segments arrive percent-encoded from the URL
                let value = decode(seg)
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| seg.to_string());
                params.push(value);
            } else if pat != seg {
                continue 'routes;
            }
        }

        return build(&params);
    }

    Page::NotFound
}

/// Whether a path is reachable without authentication
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&normalize_path(path).as_str())
}

/// Resolve a location against the connectivity and auth gates
///
/// Offline wins over everything; an unauthenticated visit to a private
/// path redirects to `/auth` (the auth page itself never redirects, so the
/// guard cannot loop).
pub fn resolve(path: &str, authenticated: bool, online: bool) -> RouteOutcome {
    if !online {
        return RouteOutcome::Offline;
    }

    if !authenticated && !is_public(path) {
        return RouteOutcome::Redirect("/auth".to_string());
    }

    RouteOutcome::Page(match_route(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table() {
        assert_eq!(match_route("/"), Page::Home);
        assert_eq!(match_route("/create"), Page::Create);
        assert_eq!(match_route("/auth"), Page::Auth);
        assert_eq!(
            match_route("/podcast/dQw4w9WgXcQ"),
            Page::PodcastDetail {
                id: "dQw4w9WgXcQ".to_string()
            }
        );
        assert_eq!(
            match_route("/channel/UC123"),
            Page::ChannelView {
                id: "UC123".to_string()
            }
        );
    }

    #[test]
    fn test_search_query_is_decoded() {
        assert_eq!(
            match_route("/search/deep%20sea"),
            Page::SearchResults {
                query: "deep sea".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(match_route("/nope"), Page::NotFound);
        assert_eq!(match_route("/podcast"), Page::NotFound);
        assert_eq!(match_route("/podcast/a/b"), Page::NotFound);
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        assert_eq!(match_route("/create/"), Page::Create);
        assert_eq!(normalize_path("auth"), "/auth");
    }

    #[test]
    fn test_offline_wins_over_auth() {
        assert_eq!(resolve("/", false, false), RouteOutcome::Offline);
        assert_eq!(resolve("/auth", true, false), RouteOutcome::Offline);
    }

    #[test]
    fn test_private_paths_redirect_unauthenticated() {
        assert_eq!(
            resolve("/", false, true),
            RouteOutcome::Redirect("/auth".to_string())
        );
        assert_eq!(
            resolve("/podcast/dQw4w9WgXcQ", false, true),
            RouteOutcome::Redirect("/auth".to_string())
        );
    }

    #[test]
    fn test_auth_page_never_redirects() {
        assert_eq!(resolve("/auth", false, true), RouteOutcome::Page(Page::Auth));
    }

    #[test]
    fn test_authenticated_resolution() {
        assert_eq!(resolve("/", true, true), RouteOutcome::Page(Page::Home));
        assert_eq!(
            resolve("/unknown", true, true),
            RouteOutcome::Page(Page::NotFound)
        );
    }
}
