//! URL-to-screen routing.
//!
//! Routes are a closed enum resolved by exhaustive matching -- there is no
//! runtime component lookup. The matcher is total: anything it does not
//! recognize maps to [`Route::NotFound`] so callers never handle a routing
//! error.

/// Every screen kind the shell can mount, with its extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search,
    Notifications,
    Settings,
    Profile { handle: String },
    ProfileFollowers { handle: String },
    ProfileFollows { handle: String },
    PostThread { handle: String, rkey: String },
    NotFound,
}

/// Icon shown in the location bar / bottom bar for a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenIcon {
    Home,
    MagnifyingGlass,
    Bell,
    User,
    Comment,
    Gear,
    Question,
}

impl ScreenIcon {
    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            ScreenIcon::Home => "⌂",
            ScreenIcon::MagnifyingGlass => "⌕",
            ScreenIcon::Bell => "◎",
            ScreenIcon::User => "@",
            ScreenIcon::Comment => "✎",
            ScreenIcon::Gear => "⚙",
            ScreenIcon::Question => "?",
        }
    }
}

/// Result of matching a URL: the screen to mount plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub route: Route,
    pub icon: ScreenIcon,
    pub title: String,
}

/// Match a URL path against the known screens.
pub fn match_route(url: &str) -> MatchResult {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let (route, icon, title) = match segments.as_slice() {
        [] => (Route::Home, ScreenIcon::Home, "Home".to_string()),
        ["search"] => (
            Route::Search,
            ScreenIcon::MagnifyingGlass,
            "Search".to_string(),
        ),
        ["notifications"] => (
            Route::Notifications,
            ScreenIcon::Bell,
            "Notifications".to_string(),
        ),
        ["settings"] => (Route::Settings, ScreenIcon::Gear, "Settings".to_string()),
        ["profile", handle] => (
            Route::Profile {
                handle: (*handle).to_string(),
            },
            ScreenIcon::User,
            format!("@{}", handle),
        ),
        ["profile", handle, "followers"] => (
            Route::ProfileFollowers {
                handle: (*handle).to_string(),
            },
            ScreenIcon::User,
            format!("Followers of @{}", handle),
        ),
        ["profile", handle, "follows"] => (
            Route::ProfileFollows {
                handle: (*handle).to_string(),
            },
            ScreenIcon::User,
            format!("Followed by @{}", handle),
        ),
        ["profile", handle, "post", rkey] => (
            Route::PostThread {
                handle: (*handle).to_string(),
                rkey: (*rkey).to_string(),
            },
            ScreenIcon::Comment,
            format!("Post by @{}", handle),
        ),
        _ => (
            Route::NotFound,
            ScreenIcon::Question,
            "Not found".to_string(),
        ),
    };

    MatchResult { route, icon, title }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_matches_home() {
        let m = match_route("/");
        assert_eq!(m.route, Route::Home);
        assert_eq!(m.icon, ScreenIcon::Home);
        assert_eq!(m.title, "Home");
    }

    #[test]
    fn fixed_screens_match() {
        assert_eq!(match_route("/search").route, Route::Search);
        assert_eq!(match_route("/notifications").route, Route::Notifications);
        assert_eq!(match_route("/settings").route, Route::Settings);
        assert_eq!(match_route("/notifications").icon, ScreenIcon::Bell);
    }

    #[test]
    fn profile_extracts_handle() {
        let m = match_route("/profile/alice.test");
        assert_eq!(
            m.route,
            Route::Profile {
                handle: "alice.test".to_string()
            }
        );
        assert_eq!(m.title, "@alice.test");
    }

    #[test]
    fn profile_followers_and_follows() {
        assert_eq!(
            match_route("/profile/alice.test/followers").route,
            Route::ProfileFollowers {
                handle: "alice.test".to_string()
            }
        );
        assert_eq!(
            match_route("/profile/alice.test/follows").route,
            Route::ProfileFollows {
                handle: "alice.test".to_string()
            }
        );
    }

    #[test]
    fn post_thread_extracts_handle_and_rkey() {
        let m = match_route("/profile/bob.test/post/3jx7");
        assert_eq!(
            m.route,
            Route::PostThread {
                handle: "bob.test".to_string(),
                rkey: "3jx7".to_string()
            }
        );
        assert_eq!(m.icon, ScreenIcon::Comment);
    }

    #[test]
    fn unknown_paths_are_not_found_not_errors() {
        assert_eq!(match_route("/no/such/screen").route, Route::NotFound);
        assert_eq!(match_route("/profile").route, Route::NotFound);
        assert_eq!(match_route("///").route, Route::Home); // empty segments collapse
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(match_route("/search?q=rust").route, Route::Search);
        assert_eq!(
            match_route("/profile/alice.test#posts").route,
            Route::Profile {
                handle: "alice.test".to_string()
            }
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(match_route("/settings/").route, Route::Settings);
    }
}
