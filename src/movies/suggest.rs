//! Prefix autocomplete over movie titles.

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    /// Original-case title ending at this node.
    title: Option<String>,
}

/// Case-insensitive title trie.
///
/// Suggestions come back in lexicographic (depth-first) order of their
/// lower-cased form.
///
/// ```
/// use movie_chain::movies::Suggester;
///
/// let suggester = Suggester::new(["Heat", "Heathers", "Her"]);
/// assert_eq!(suggester.suggest("hea", 5), vec!["Heat", "Heathers"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Suggester {
    root: TrieNode,
    len: usize,
}

impl Suggester {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suggester = Self::default();
        for title in titles {
            suggester.insert(title.as_ref());
        }
        suggester
    }

    /// Add a title. A title differing only in case replaces the earlier one.
    pub fn insert(&mut self, title: &str) {
        let mut node = &mut self.root;
        for c in title.to_lowercase().chars() {
            node = node.children.entry(c).or_default();
        }
        if node.title.replace(title.to_string()).is_none() {
            self.len += 1;
        }
    }

    /// Number of distinct titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Up to `limit` titles starting with `prefix`, ignoring case.
    #[must_use]
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let mut out = Vec::new();
        if prefix.is_empty() || limit == 0 {
            return out;
        }
        if let Some(node) = self.find(&prefix.to_lowercase()) {
            collect(node, limit, &mut out);
        }
        out
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

fn collect<'a>(node: &'a TrieNode, limit: usize, out: &mut Vec<&'a str>) {
    if out.len() >= limit {
        return;
    }
    if let Some(title) = &node.title {
        out.push(title);
    }
    for child in node.children.values() {
        collect(child, limit, out);
    }
}
