//! Navigation synthesized from the directory layout.
//!
//! Used when a locale has no descriptor. Every scanned document becomes
//! navigable: slugs are sorted, then grouped by their containing directory.
//! Top-level documents share one group with a configurable label. Deeper
//! structure is not rebuilt, so `a/b/c` lands in a group labelled `a/b`.

use ezdoc_storage::{Storage, StorageError};

use crate::frontmatter::FrontMatterReader;
use crate::model::{NavGroup, NavItem, NavigationTree};
use crate::scanner::scan;

/// Containing directory of a slug, or `None` for top-level slugs.
fn parent_dir(slug: &str) -> Option<&str> {
    slug.rsplit_once('/').map(|(dir, _)| dir)
}

/// Build a navigation tree for `root` from its files alone.
///
/// Group order follows the first slug of each group in sorted order; pages
/// within a group keep sorted order. Titles come from front-matter.
///
/// # Errors
///
/// Returns [`StorageError`] if listing `root` or reading a document fails.
pub fn build_from_directory(
    storage: &dyn Storage,
    root: &str,
    top_level_label: &str,
) -> Result<NavigationTree, StorageError> {
    let slugs = scan(storage, root)?;
    let reader = FrontMatterReader::new(storage, root);

    let mut tree: NavigationTree = Vec::new();
    // Group labels, parallel to `tree`.
    let mut labels: Vec<&str> = Vec::new();

    for slug in &slugs {
        let label = parent_dir(slug).unwrap_or(top_level_label);
        let item = NavItem::new(reader.title(slug)?, slug.as_str());

        match labels.iter().position(|l| *l == label) {
            Some(index) => tree[index].pages.push(item.into()),
            None => {
                labels.push(label);
                tree.push(NavGroup::new(label, vec![item.into()]));
            }
        }
    }

    tracing::debug!(root, groups = tree.len(), pages = slugs.len(), "Built navigation from directory");
    Ok(tree)
}
