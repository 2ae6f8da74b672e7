//! Flattening of nested blocks into one statement list.
//!
//! Lowering leaves blocks nested inside blocks. Gotos address labels by
//! their position in a single list per body, so nested blocks are inlined
//! into their parent in order. The walk uses an explicit stack.

use crate::bound::{BoundBlockStatement, BoundLabel, BoundStatement};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Flatten one statement into a block that contains no blocks.
pub fn flatten(statement: &BoundStatement) -> BoundBlockStatement {
    BoundBlockStatement {
        syntax: statement.syntax(),
        statements: flatten_all(std::slice::from_ref(statement)),
    }
}

/// Flatten a sequence of statements, keeping their order.
pub fn flatten_all(statements: &[BoundStatement]) -> Vec<BoundStatement> {
    let mut result = Vec::with_capacity(statements.len());
    let mut stack: Vec<&BoundStatement> = statements.iter().rev().collect();

    while let Some(current) = stack.pop() {
        match current {
            BoundStatement::Block(block) => stack.extend(block.statements.iter().rev()),
            other => result.push(other.clone()),
        }
    }

    result
}

// ============================================================================
// Label positions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label '{0}' is not defined in this body")]
    UnknownLabel(BoundLabel),
}

/// The position of every label in a flattened statement list.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    positions: FxHashMap<BoundLabel, usize>,
}

impl LabelMap {
    pub fn new(statements: &[BoundStatement]) -> Self {
        let positions = statements
            .iter()
            .enumerate()
            .filter_map(|(index, statement)| match statement {
                BoundStatement::Label(node) => Some((node.label.clone(), index)),
                _ => None,
            })
            .collect();
        Self { positions }
    }

    /// Index of the label statement for `label`.
    pub fn position(&self, label: &BoundLabel) -> Result<usize, LabelError> {
        self.positions
            .get(label)
            .copied()
            .ok_or_else(|| LabelError::UnknownLabel(label.clone()))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::{SyntaxRef, TreeId};
    use mew_core::text::TextSpan;
    use mew_syntax::NodeId;

    fn syntax(id: u32) -> SyntaxRef {
        SyntaxRef::new(TreeId(0), NodeId(id), TextSpan::new(id, 1))
    }

    fn label(id: u32, name: &str) -> BoundStatement {
        BoundStatement::label(syntax(id), BoundLabel::new(name))
    }

    fn names(statements: &[BoundStatement]) -> Vec<String> {
        statements
            .iter()
            .map(|s| match s {
                BoundStatement::Label(n) => n.label.to_string(),
                other => other.kind_name().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_nested_blocks_are_inlined_in_order() {
        let tree = BoundStatement::block(
            syntax(0),
            vec![
                label(1, "a"),
                BoundStatement::block(
                    syntax(2),
                    vec![label(3, "b"), BoundStatement::block(syntax(4), vec![label(5, "c")])],
                ),
                label(6, "d"),
            ],
        );
        let flat = flatten(&tree);
        assert_eq!(names(&flat.statements), vec!["a", "b", "c", "d"]);
        assert_eq!(flat.syntax, syntax(0));
    }

    #[test]
    fn test_empty_blocks_disappear() {
        let statements = vec![
            BoundStatement::block(syntax(0), Vec::new()),
            label(1, "a"),
            BoundStatement::block(syntax(2), vec![BoundStatement::block(syntax(3), Vec::new())]),
        ];
        assert_eq!(names(&flatten_all(&statements)), vec!["a"]);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let mut tree = label(0, "inner");
        for id in 1..1_000 {
            tree = BoundStatement::block(syntax(id), vec![tree]);
        }
        assert_eq!(names(&flatten(&tree).statements), vec!["inner"]);
    }

    #[test]
    fn test_label_positions() {
        let statements = vec![
            label(0, "Label1"),
            BoundStatement::goto(syntax(1), BoundLabel::new("Label2")),
            label(2, "Label2"),
        ];
        let labels = LabelMap::new(&statements);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.position(&BoundLabel::new("Label2")), Ok(2));
        assert_eq!(
            labels.position(&BoundLabel::new("break1")),
            Err(LabelError::UnknownLabel(BoundLabel::new("break1")))
        );
    }
}
