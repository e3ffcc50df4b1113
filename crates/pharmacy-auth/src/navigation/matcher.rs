//! Active-entry selection by longest route-prefix match.

use super::menu::MenuNode;

/// Strip the query, fragment and trailing slash from a location.
///
/// An empty result becomes `/`.
pub fn normalize_location(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = location[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}

/// Whether `prefix` covers `location` on a path-segment boundary.
///
/// `/admin/products` covers `/admin/products` and `/admin/products/42`
/// but not `/admin/products-archive`. `/` covers everything.
pub fn prefix_matches(prefix: &str, location: &str) -> bool {
    let prefix = normalize_location(prefix);
    let location = normalize_location(location);

    if prefix == "/" {
        return true;
    }

    match location.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Keys from the outermost group to the entry best matching `location`.
///
/// The entry with the longest matching prefix wins; on equal length the
/// deeper entry wins. Empty when nothing matches.
pub fn active_trail(menu: &[MenuNode], location: &str) -> Vec<String> {
    let mut best: Option<(usize, usize, Vec<String>)> = None;
    let mut trail = Vec::new();
    walk(menu, location, 0, &mut trail, &mut best);
    best.map(|(_, _, keys)| keys).unwrap_or_default()
}

fn walk(
    nodes: &[MenuNode],
    location: &str,
    depth: usize,
    trail: &mut Vec<String>,
    best: &mut Option<(usize, usize, Vec<String>)>,
) {
    for node in nodes {
        trail.push(node.key.clone());

        if prefix_matches(&node.route_prefix, location) {
            let len = normalize_location(&node.route_prefix).len();
            let better = match best {
                Some((best_len, best_depth, _)) => {
                    len > *best_len || (len == *best_len && depth > *best_depth)
                }
                None => true,
            };
            if better {
                *best = Some((len, depth, trail.clone()));
            }
        }

        walk(node.child_nodes(), location, depth + 1, trail, best);
        trail.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<MenuNode> {
        vec![
            MenuNode::item("dashboard", "Dashboard", "/admin"),
            MenuNode::group(
                "catalog",
                "Catalog",
                "/admin/catalog",
                vec![
                    MenuNode::item("products", "Products", "/admin/catalog/products"),
                    MenuNode::item("overview", "Overview", "/admin/catalog"),
                ],
            ),
        ]
    }

    #[test]
    fn test_prefix_matches_on_segment_boundary() {
        assert!(prefix_matches("/admin/products", "/admin/products"));
        assert!(prefix_matches("/admin/products", "/admin/products/42"));
        assert!(prefix_matches("/admin/products/", "/admin/products?page=2"));
        assert!(!prefix_matches("/admin/products", "/admin/products-archive"));
        assert!(!prefix_matches("/admin/products", "/admin"));
        assert!(prefix_matches("/", "/anything"));
    }

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(
            active_trail(&menu(), "/admin/catalog/products/17/edit"),
            ["catalog", "products"]
        );
        assert_eq!(active_trail(&menu(), "/admin/orders"), ["dashboard"]);
    }

    #[test]
    fn test_tie_goes_to_deeper_entry() {
        assert_eq!(active_trail(&menu(), "/admin/catalog"), ["catalog", "overview"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(active_trail(&menu(), "/shop/cart").is_empty());
    }

    #[test]
    fn test_selection_changes_with_location() {
        let menu = menu();
        let first = active_trail(&menu, "/admin/catalog/products");
        let second = active_trail(&menu, "/admin");
        assert_ne!(first, second);
        assert_eq!(second, ["dashboard"]);
    }

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location("/admin/?tab=1"), "/admin");
        assert_eq!(normalize_location(""), "/");
        assert_eq!(normalize_location("/#top"), "/");
    }
}
