use crate::error::Result;
use crate::git::CommitInfo;
use std::collections::HashSet;

/// Traversal order for ancestor walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Depth-first, first parent before merged-in parents
    MainLine,
    /// Depth-first, last (merged-in) parent before the first parent
    CurrentPosition,
}

/// Depth-first walk over commit ancestry
///
/// Each ancestor is yielded exactly once. A failed lookup is yielded as an
/// error and ends the walk.
pub struct AncestorWalk<F> {
    stack: Vec<String>,
    seen: HashSet<String>,
    order: WalkOrder,
    load: F,
}

impl<F> AncestorWalk<F>
where
    F: FnMut(&str) -> Result<CommitInfo>,
{
    pub fn new(start: impl Into<String>, order: WalkOrder, load: F) -> Self {
        AncestorWalk {
            stack: vec![start.into()],
            seen: HashSet::new(),
            order,
            load,
        }
    }
}

impl<F> Iterator for AncestorWalk<F>
where
    F: FnMut(&str) -> Result<CommitInfo>,
{
    type Item = Result<CommitInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let hash = self.stack.pop()?;
            if !self.seen.insert(hash.clone()) {
                continue;
            }

            let commit = match (self.load)(&hash) {
                Ok(commit) => commit,
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            };

            // The stack pops from the back, so push the parent to visit first last.
            match self.order {
                WalkOrder::MainLine => self.stack.extend(commit.parents.iter().rev().cloned()),
                WalkOrder::CurrentPosition => self.stack.extend(commit.parents.iter().cloned()),
            }
            return Some(Ok(commit));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GhSemverError;
    use std::collections::HashMap;

    // a <- b <- d (merge of b and c), a <- c
    fn diamond() -> HashMap<String, Vec<String>> {
        let mut graph = HashMap::new();
        graph.insert("a".to_string(), vec![]);
        graph.insert("b".to_string(), vec!["a".to_string()]);
        graph.insert("c".to_string(), vec!["a".to_string()]);
        graph.insert("d".to_string(), vec!["b".to_string(), "c".to_string()]);
        graph
    }

    fn walk_hashes(order: WalkOrder) -> Vec<String> {
        let graph = diamond();
        AncestorWalk::new("d", order, |hash: &str| {
            Ok(CommitInfo {
                hash: hash.to_string(),
                message: String::new(),
                parents: graph[hash].clone(),
            })
        })
        .map(|c| c.unwrap().hash)
        .collect()
    }

    #[test]
    fn test_main_line_follows_first_parent() {
        assert_eq!(walk_hashes(WalkOrder::MainLine), ["d", "b", "a", "c"]);
    }

    #[test]
    fn test_current_position_follows_merged_parent() {
        assert_eq!(walk_hashes(WalkOrder::CurrentPosition), ["d", "c", "a", "b"]);
    }

    #[test]
    fn test_error_ends_walk() {
        let mut walk = AncestorWalk::new("x", WalkOrder::MainLine, |hash: &str| {
            Err(GhSemverError::traversal(format!("missing {}", hash)))
        });
        assert!(walk.next().unwrap().is_err());
        assert!(walk.next().is_none());
    }
}
