//! Read-only queries over a resolved navigation tree and scanned slug sets.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{BreadcrumbItem, NavEntry, NavGroup, NavItem, Slug};

/// Every leaf of `tree` in depth-first, pre-order display order.
#[must_use]
pub fn flatten(tree: &[NavGroup]) -> Vec<&NavItem> {
    fn walk<'a>(entries: &'a [NavEntry], out: &mut Vec<&'a NavItem>) {
        for entry in entries {
            match entry {
                NavEntry::Page(item) => out.push(item),
                NavEntry::Group(group) => walk(&group.pages, out),
            }
        }
    }

    let mut items = Vec::new();
    for group in tree {
        walk(&group.pages, &mut items);
    }
    items
}

/// Neighbours of a page in flattened order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrevNext<'a> {
    /// Page shown before, if any.
    pub prev: Option<&'a NavItem>,
    /// Page shown after, if any.
    pub next: Option<&'a NavItem>,
}

/// Previous and next pages around `slug`.
///
/// Only the first occurrence of `slug` counts when it is referenced more
/// than once. An absent slug has no neighbours.
#[must_use]
pub fn prev_next<'a>(slug: &str, tree: &'a [NavGroup]) -> PrevNext<'a> {
    let items = flatten(tree);
    let Some(index) = items.iter().position(|item| item.path == slug) else {
        return PrevNext::default();
    };

    PrevNext {
        prev: index.checked_sub(1).map(|i| items[i]),
        next: items.get(index + 1).copied(),
    }
}

/// Trail from `root` down to the page `slug`.
///
/// Group crumbs carry no link; the final crumb is the page title. When `slug`
/// is not in the tree the trail is `root` followed by the bare slug, so the
/// result always has at least two entries.
#[must_use]
pub fn breadcrumbs(slug: &str, tree: &[NavGroup], root: BreadcrumbItem) -> Vec<BreadcrumbItem> {
    fn search<'a>(slug: &str, group: &'a NavGroup, trail: &mut Vec<&'a str>) -> Option<&'a NavItem> {
        trail.push(&group.group);
        for entry in &group.pages {
            let found = match entry {
                NavEntry::Page(item) if item.path == slug => Some(item),
                NavEntry::Page(_) => None,
                NavEntry::Group(nested) => search(slug, nested, trail),
            };
            if found.is_some() {
                return found;
            }
        }
        trail.pop();
        None
    }

    let mut trail = Vec::new();
    let found = tree.iter().find_map(|group| search(slug, group, &mut trail));

    let mut crumbs = vec![root];
    match found {
        Some(item) => {
            crumbs.extend(trail.into_iter().map(BreadcrumbItem::label));
            crumbs.push(BreadcrumbItem::label(item.title.as_str()));
        }
        None => crumbs.push(BreadcrumbItem::label(slug)),
    }
    crumbs
}

/// Slugs of the default locale with no counterpart in `target`.
#[must_use]
pub fn missing_translations<'a>(
    default: &'a BTreeSet<Slug>,
    target: &BTreeSet<Slug>,
) -> Vec<&'a Slug> {
    default.iter().filter(|slug| !target.contains(*slug)).collect()
}

/// Scanned slugs that the descriptor never references.
#[must_use]
pub fn unreferenced<'a>(referenced: &[&str], scanned: &'a BTreeSet<Slug>) -> Vec<&'a Slug> {
    let referenced: BTreeSet<&str> = referenced.iter().copied().collect();
    scanned
        .iter()
        .filter(|slug| !referenced.contains(slug.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_tree() -> Vec<NavGroup> {
        vec![
            NavGroup::new(
                "Start",
                vec![
                    NavItem::new("A", "a").into(),
                    NavGroup::new(
                        "Nested",
                        vec![
                            NavItem::new("B", "b").into(),
                            NavGroup::new("Deeper", vec![NavItem::new("C", "c").into()]).into(),
                        ],
                    )
                    .into(),
                    NavItem::new("D", "d").into(),
                ],
            ),
            NavGroup::new("Empty", vec![]),
            NavGroup::new("Reference", vec![NavItem::new("E", "e").into()]),
        ]
    }

    fn root() -> BreadcrumbItem {
        BreadcrumbItem::link("Docs", "/docs/en")
    }

    fn set(slugs: &[&str]) -> BTreeSet<Slug> {
        slugs.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_flatten_pre_order() {
        let tree = sample_tree();

        let paths: Vec<&str> = flatten(&tree).iter().map(|i| i.path.as_str()).collect();

        assert_eq!(paths, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&[]).is_empty());
        assert!(flatten(&[NavGroup::new("Only", vec![])]).is_empty());
    }

    #[test]
    fn test_prev_next_boundaries() {
        let tree = vec![NavGroup::new(
            "G",
            vec![
                NavItem::new("A", "a").into(),
                NavItem::new("B", "b").into(),
                NavItem::new("C", "c").into(),
            ],
        )];
        let a = NavItem::new("A", "a");
        let b = NavItem::new("B", "b");
        let c = NavItem::new("C", "c");

        assert_eq!(
            prev_next("a", &tree),
            PrevNext {
                prev: None,
                next: Some(&b)
            }
        );
        assert_eq!(
            prev_next("b", &tree),
            PrevNext {
                prev: Some(&a),
                next: Some(&c)
            }
        );
        assert_eq!(
            prev_next("c", &tree),
            PrevNext {
                prev: Some(&b),
                next: None
            }
        );
        assert_eq!(prev_next("z", &tree), PrevNext::default());
    }

    #[test]
    fn test_prev_next_crosses_groups() {
        let tree = sample_tree();

        let nav = prev_next("d", &tree);

        assert_eq!(nav.prev.map(|i| i.path.as_str()), Some("c"));
        assert_eq!(nav.next.map(|i| i.path.as_str()), Some("e"));
    }

    #[test]
    fn test_prev_next_uses_first_occurrence() {
        let tree = vec![NavGroup::new(
            "G",
            vec![
                NavItem::new("Intro", "intro").into(),
                NavItem::new("Setup", "setup").into(),
                NavItem::new("Intro again", "intro").into(),
                NavItem::new("End", "end").into(),
            ],
        )];

        let nav = prev_next("intro", &tree);

        assert!(nav.prev.is_none());
        assert_eq!(nav.next.map(|i| i.path.as_str()), Some("setup"));
    }

    #[test]
    fn test_breadcrumbs_nested() {
        let tree = sample_tree();

        assert_eq!(
            breadcrumbs("c", &tree, root()),
            vec![
                root(),
                BreadcrumbItem::label("Start"),
                BreadcrumbItem::label("Nested"),
                BreadcrumbItem::label("Deeper"),
                BreadcrumbItem::label("C"),
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_backtracks_out_of_groups() {
        let tree = sample_tree();

        assert_eq!(
            breadcrumbs("d", &tree, root()),
            vec![root(), BreadcrumbItem::label("Start"), BreadcrumbItem::label("D")]
        );
        assert_eq!(
            breadcrumbs("e", &tree, root()),
            vec![root(), BreadcrumbItem::label("Reference"), BreadcrumbItem::label("E")]
        );
    }

    #[test]
    fn test_breadcrumbs_not_found() {
        let tree = sample_tree();

        assert_eq!(
            breadcrumbs("nowhere/page", &tree, root()),
            vec![root(), BreadcrumbItem::label("nowhere/page")]
        );
        assert_eq!(
            breadcrumbs("x", &[], root()),
            vec![root(), BreadcrumbItem::label("x")]
        );
    }

    #[test]
    fn test_missing_translations() {
        let default = set(&["a", "b", "c"]);
        let target = set(&["a", "c", "extra"]);

        assert_eq!(missing_translations(&default, &target), vec!["b"]);
        assert!(missing_translations(&default, &default).is_empty());
    }

    #[test]
    fn test_missing_translations_outlive_target() {
        let default = set(&["a", "b"]);

        let missing = {
            let target = set(&["a"]);
            missing_translations(&default, &target)
        };

        assert_eq!(missing, vec!["b"]);
    }

    #[test]
    fn test_unreferenced() {
        let scanned = set(&["guide/setup", "intro", "orphan"]);

        let orphans = unreferenced(&["intro", "guide/setup", "missing"], &scanned);

        assert_eq!(orphans, vec!["orphan"]);
    }
}
