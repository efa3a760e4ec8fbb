//! Builds the 3-level chart-of-accounts tree from a flat account list.
//!
//! Parentage is implicit in the codes: sorting by code puts every prefix
//! before its extensions, so a single pass can attach each node to its
//! already-placed parent.

use crate::models::gl_account::{parent_code, GlAccount};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize)]
pub struct AccountNode {
    #[serde(flatten)]
    pub account: GlAccount,
    pub children: Vec<AccountNode>,
}

/// Group accounts into a tree by code prefix. An account whose parent
/// prefix is not in the chart becomes a root, so orphans stay visible.
pub fn build_tree(mut accounts: Vec<GlAccount>) -> Vec<AccountNode> {
    accounts.sort_by(|a, b| a.code.cmp(&b.code));

    let codes: HashSet<String> = accounts.iter().map(|a| a.code.clone()).collect();

    let mut roots: Vec<AccountNode> = Vec::new();
    // Path of child indices from the root list to each placed node.
    let mut paths: HashMap<String, Vec<usize>> = HashMap::new();

    for account in accounts {
        let code = account.code.clone();
        let parent = parent_code(&code).filter(|p| codes.contains(*p));
        let node = AccountNode {
            account,
            children: Vec::new(),
        };

        match parent.and_then(|p| paths.get(p)).cloned() {
            Some(parent_path) => {
                let parent_node = node_at(&mut roots, &parent_path);
                let mut path = parent_path;
                path.push(parent_node.children.len());
                parent_node.children.push(node);
                paths.insert(code, path);
            }
            None => {
                paths.insert(code, vec![roots.len()]);
                roots.push(node);
            }
        }
    }

    roots
}

fn node_at<'a>(roots: &'a mut [AccountNode], path: &[usize]) -> &'a mut AccountNode {
    let (&first, rest) = path.split_first().expect("path is never empty");
    let mut node = &mut roots[first];
    for &i in rest {
        node = &mut node.children[i];
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gl_account::AccountKind;

    fn account(id: i64, code: &str, name: &str) -> GlAccount {
        GlAccount {
            id,
            organization_id: 1,
            code: code.into(),
            name: name.into(),
            kind: AccountKind::Expense,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_chart_yields_empty_tree() {
        assert!(build_tree(Vec::new()).is_empty());
    }

    #[test]
    fn three_levels_nest_by_prefix() {
        let tree = build_tree(vec![
            account(3, "4000", "Salaries"),
            account(1, "4", "Operating expenses"),
            account(2, "40", "Personnel"),
            account(4, "4010", "Social charges"),
        ]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].account.code, "4");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].account.code, "40");
        let lines: Vec<&str> = tree[0].children[0]
            .children
            .iter()
            .map(|n| n.account.code.as_str())
            .collect();
        assert_eq!(lines, vec!["4000", "4010"]);
    }

    #[test]
    fn siblings_sorted_by_code() {
        let tree = build_tree(vec![
            account(1, "8", "Revenue"),
            account(2, "4", "Expenses"),
        ]);
        let codes: Vec<&str> = tree.iter().map(|n| n.account.code.as_str()).collect();
        assert_eq!(codes, vec!["4", "8"]);
    }

    #[test]
    fn orphan_line_item_becomes_root() {
        // Subgroup 40 is missing, so 4000 cannot attach anywhere.
        let tree = build_tree(vec![
            account(1, "4", "Operating expenses"),
            account(2, "4000", "Salaries"),
        ]);
        let codes: Vec<&str> = tree.iter().map(|n| n.account.code.as_str()).collect();
        assert_eq!(codes, vec!["4", "4000"]);
    }

    #[test]
    fn unrelated_prefix_is_not_a_parent() {
        // 50 must not land under 4.
        let tree = build_tree(vec![account(1, "4", "Expenses"), account(2, "50", "Fleet")]);
        assert_eq!(tree.len(), 2);
        assert!(tree.iter().all(|n| n.children.is_empty()));
    }
}
