//! URL fragment routing.
//!
//! Page routes look like `#/projects`; in-page anchors look like `#about`. Anything
//! unrecognized lands on the combined home layout.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content::MenuItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Projects,
    Education,
    Certificates,
    Skills,
    Experience,
    Activities,
    Events,
    Blog,
}

/// Anchor of the admin entry points on the home layout.
pub const ADMIN_ANCHOR: &str = "admin";

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Projects,
        Page::Education,
        Page::Certificates,
        Page::Skills,
        Page::Experience,
        Page::Activities,
        Page::Events,
        Page::Blog,
    ];

    /// Route segment after `#/`; empty for home.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "",
            Page::Projects => "projects",
            Page::Education => "education",
            Page::Certificates => "certificates",
            Page::Skills => "skills",
            Page::Experience => "experience",
            Page::Activities => "activities",
            Page::Events => "events",
            Page::Blog => "blog",
        }
    }

    pub fn fragment(self) -> String {
        format!("#/{}", self.slug())
    }

    /// Server path serving this page.
    pub fn path(self) -> String {
        format!("/{}", self.slug())
    }

    fn from_slug(slug: &str) -> Page {
        Page::ALL
            .into_iter()
            .find(|page| *page != Page::Home && page.slug() == slug)
            .unwrap_or(Page::Home)
    }

    /// Exact match on the route table; every other fragment is home.
    pub fn from_fragment(fragment: &str) -> Page {
        match fragment.strip_prefix("#/") {
            Some(slug) => Page::from_slug(slug),
            None => Page::Home,
        }
    }

    /// Same table keyed by request path (`/projects`).
    pub fn from_path(path: &str) -> Page {
        match path.strip_prefix('/') {
            Some(slug) => Page::from_slug(slug),
            None => Page::Home,
        }
    }
}

/// What following a menu link does from the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Navigation {
    /// Switch to another layout and reset scroll to the top.
    Navigate { page: Page },
    /// Already on home: scroll to the anchor.
    ScrollTo { anchor: String },
    /// Go home first, then scroll to the anchor.
    NavigateThenScroll { page: Page, anchor: String },
}

/// Resolve a menu entry from `current`. The entry's own `is_route` flag decides
/// between page routes and anchors; nothing is inferred from the link text.
pub fn resolve_nav(item: &MenuItem, current: Page) -> Navigation {
    if item.is_route {
        return Navigation::Navigate {
            page: Page::from_fragment(&item.link),
        };
    }
    let anchor = item.link.trim_start_matches('#').to_string();
    if current == Page::Home {
        Navigation::ScrollTo { anchor }
    } else {
        Navigation::NavigateThenScroll {
            page: Page::Home,
            anchor,
        }
    }
}

/// Server-side href for a menu entry: routes become paths, anchors hang off `/`.
pub fn menu_href(item: &MenuItem) -> String {
    if item.is_route {
        Page::from_fragment(&item.link).path()
    } else if item.link.starts_with('#') {
        format!("/{}", item.link)
    } else {
        item.link.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str, is_route: bool) -> MenuItem {
        MenuItem {
            id: "x".to_string(),
            label: "X".to_string(),
            link: link.to_string(),
            is_route,
            order: 0,
        }
    }

    #[test]
    fn routes_known_fragments() {
        assert_eq!(Page::from_fragment("#/projects"), Page::Projects);
        assert_eq!(Page::from_fragment("#/blog"), Page::Blog);
        assert_eq!(Page::from_fragment("#/events"), Page::Events);
        for page in Page::ALL {
            assert_eq!(Page::from_fragment(&page.fragment()), page);
            assert_eq!(Page::from_path(&page.path()), page);
        }
    }

    #[test]
    fn unknown_fragments_fall_back_to_home() {
        for fragment in ["", "#", "#/", "#admin", "#about", "#/nope", "#/Blog", "#/blog/", "projects"] {
            assert_eq!(Page::from_fragment(fragment), Page::Home, "{fragment:?}");
        }
        assert_eq!(Page::from_path("/missing"), Page::Home);
        assert_eq!(Page::from_path(""), Page::Home);
    }

    #[test]
    fn route_items_navigate() {
        assert_eq!(
            resolve_nav(&item("#/skills", true), Page::Blog),
            Navigation::Navigate { page: Page::Skills }
        );
    }

    #[test]
    fn anchors_scroll_in_place_only_on_home() {
        assert_eq!(
            resolve_nav(&item("#contact", false), Page::Home),
            Navigation::ScrollTo {
                anchor: "contact".to_string()
            }
        );
        assert_eq!(
            resolve_nav(&item("#admin", false), Page::Events),
            Navigation::NavigateThenScroll {
                page: Page::Home,
                anchor: ADMIN_ANCHOR.to_string()
            }
        );
    }

    #[test]
    fn hrefs_for_server_rendering() {
        assert_eq!(menu_href(&item("#/", true)), "/");
        assert_eq!(menu_href(&item("#/blog", true)), "/blog");
        assert_eq!(menu_href(&item("#about", false)), "/#about");
        assert_eq!(menu_href(&item("https://example.com", false)), "https://example.com");
    }
}
