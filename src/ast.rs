/*
 * ==========================================================================
 * LUNA - Scripting Language Front End
 * ==========================================================================
 * 
 * License:
 * This file is part of the LUNA scripting language project.
 * 
 * LUNA is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

//! Statement trees.
//!
//! A statement is a flat array of node ids. Element 0 is the root; every
//! other node is reached through child slots, which are indices into that
//! same array. Slots mean nothing outside the statement that created them.

use std::collections::VecDeque;

use crate::error::{NodeError, ParseError, ParseErrorKind};
use crate::id::Id;
use crate::lexer::token::Token;
use crate::span::Span;
use crate::tables::{NodeTable, TokenTable};

/// Prefix repeated once per tree depth in statement dumps.
pub const TREE_INDENT: &str = "---";

/// One vertex of a statement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: Id,

    /// The token this node labels. Referenced, not owned.
    token: Id,

    /// Slot of the parent node, `None` for the root.
    parent: Option<usize>,

    /// Ordered slots of the child nodes.
    children: Vec<usize>,
}

impl Node {
    pub fn new(token: Id, parent: Option<usize>) -> Self {
        Self {
            id: Id::NIL,
            token,
            parent,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    pub fn token(&self) -> Id {
        self.token
    }

    pub fn set_token(&mut self, token: Id) {
        self.token = token;
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn invalid_position(&self, position: usize) -> NodeError {
        NodeError::InvalidPosition {
            position,
            len: self.children.len(),
        }
    }

    /// The slot held at child `position`.
    pub fn child(&self, position: usize) -> Result<usize, NodeError> {
        self.children
            .get(position)
            .copied()
            .ok_or_else(|| self.invalid_position(position))
    }

    pub fn add_child(&mut self, slot: usize) {
        self.children.push(slot);
    }

    /// Inserts `slot` before child `position`; `position == child_count()`
    /// appends.
    pub fn insert_child(&mut self, position: usize, slot: usize) -> Result<(), NodeError> {
        if position > self.children.len() {
            return Err(self.invalid_position(position));
        }
        self.children.insert(position, slot);
        Ok(())
    }

    /// Removes child `position`, returning the slot it held.
    pub fn remove_child(&mut self, position: usize) -> Result<usize, NodeError> {
        if position >= self.children.len() {
            return Err(self.invalid_position(position));
        }
        Ok(self.children.remove(position))
    }

    pub fn set_child(&mut self, position: usize, slot: usize) -> Result<(), NodeError> {
        let len = self.children.len();
        let entry = self
            .children
            .get_mut(position)
            .ok_or(NodeError::InvalidPosition { position, len })?;
        *entry = slot;
        Ok(())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();
        if verbose {
            out.push_str(&format!("{} ", self.id));
        }

        out.push_str(&format!("Token: {}, Parent: ", self.token));
        match self.parent {
            Some(parent) => out.push_str(&parent.to_string()),
            None => out.push_str("NONE"),
        }
        out.push_str(&format!(", Children[{}]", self.children.len()));

        if verbose && !self.children.is_empty() {
            let slots: Vec<String> = self.children.iter().map(|slot| slot.to_string()).collect();
            out.push_str(&format!(" {{{}}}", slots.join(", ")));
        }

        match (self.is_root(), self.is_leaf()) {
            (true, true) => out.push_str(" (ROOT, LEAF)"),
            (true, false) => out.push_str(" (ROOT)"),
            (false, true) => out.push_str(" (LEAF)"),
            (false, false) => {}
        }
        out
    }
}

/// One parsed top-level construct, stored as a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statement {
    nodes: Vec<Id>,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node id, if the statement has any nodes.
    pub fn root(&self) -> Option<Id> {
        self.nodes.first().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node id held at `slot`.
    pub fn node(&self, slot: usize) -> Option<Id> {
        self.nodes.get(slot).copied()
    }

    pub fn nodes(&self) -> &[Id] {
        &self.nodes
    }

    /// Appends a node id and returns the slot it landed in.
    pub(crate) fn push(&mut self, id: Id) -> usize {
        self.nodes.push(id);
        self.nodes.len() - 1
    }

    /// Renders the tree breadth-first, one node per line, prefixing each
    /// line with [`TREE_INDENT`] once per depth.
    ///
    /// # Output Example
    /// ```text
    /// [STATEMENT] [2] (ROOT)
    /// --- [IDENTIFIER] "x" [0] (LEAF)
    /// --- [ASSIGNMENT] [1]
    /// ------ [EXPRESSION] [1]
    /// ```
    pub fn render_tree(
        &self,
        nodes: &NodeTable,
        tokens: &TokenTable,
        verbose: bool,
    ) -> Result<String, ParseError> {
        let mut out = String::new();
        let Some(root) = self.root() else {
            return Ok(out);
        };

        let mut queue = VecDeque::from([(root, 0usize)]);
        while let Some((id, depth)) = queue.pop_front() {
            if depth > 0 {
                out.push('\n');
                out.push_str(&TREE_INDENT.repeat(depth));
                out.push(' ');
            }

            let node = nodes.get(id)?;
            let token = tokens.get(node.token())?;
            out.push_str(&format!("{} [{}]", token.render(verbose), node.child_count()));

            match (node.is_root(), node.is_leaf()) {
                (true, true) => out.push_str(" (ROOT, LEAF)"),
                (true, false) => out.push_str(" (ROOT)"),
                (false, true) => out.push_str(" (LEAF)"),
                (false, false) => {}
            }

            for &slot in node.children() {
                let child = self.node(slot).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::InvalidChildStatementPosition,
                        format!("{}/{}", slot, self.len().saturating_sub(1)),
                        token.span,
                    )
                })?;
                queue.push_back((child, depth + 1));
            }
        }
        Ok(out)
    }
}

/// Read access to one statement's nodes and tokens.
///
/// This is what an evaluator sees: slots resolve to nodes, nodes resolve to
/// tokens, and children are enumerated in parse order.
#[derive(Debug)]
pub struct StatementView<'a> {
    statement: &'a Statement,
    nodes: &'a NodeTable,
    tokens: &'a TokenTable,
}

impl<'a> StatementView<'a> {
    pub fn new(statement: &'a Statement, nodes: &'a NodeTable, tokens: &'a TokenTable) -> Self {
        Self {
            statement,
            nodes,
            tokens,
        }
    }

    pub fn statement(&self) -> &Statement {
        self.statement
    }

    pub fn node(&self, slot: usize) -> Result<Node, NodeError> {
        let id = self.statement.node(slot).ok_or(NodeError::InvalidPosition {
            position: slot,
            len: self.statement.len(),
        })?;
        self.nodes.get(id)
    }

    /// The token labelling the node at `slot`.
    pub fn token(&self, slot: usize) -> Result<Token, ParseError> {
        let node = self.node(slot)?;
        Ok(self.tokens.get(node.token())?)
    }

    /// Slots of the children of the node at `slot`.
    pub fn children(&self, slot: usize) -> Result<Vec<usize>, NodeError> {
        Ok(self.node(slot)?.children().to_vec())
    }

    /// The source location of the root token, for diagnostics.
    pub fn span(&self) -> Span {
        self.token(0).map(|token| token.span).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_slot_editing() {
        let mut node = Node::new(Id::NIL, None);
        node.add_child(1);
        node.add_child(3);
        node.insert_child(1, 2).unwrap();
        assert_eq!(node.children(), &[1, 2, 3]);

        node.set_child(0, 7).unwrap();
        assert_eq!(node.remove_child(2), Ok(3));
        assert_eq!(node.children(), &[7, 2]);
        assert_eq!(node.child(1), Ok(2));
    }

    #[test]
    fn out_of_range_positions_fail() {
        let mut node = Node::new(Id::NIL, Some(0));
        assert_eq!(
            node.child(0),
            Err(NodeError::InvalidPosition { position: 0, len: 0 })
        );
        assert!(node.insert_child(1, 4).is_err());
        assert!(node.remove_child(0).is_err());
        assert!(node.set_child(0, 1).is_err());
    }

    #[test]
    fn root_and_leaf_flags() {
        let mut root = Node::new(Id::NIL, None);
        assert!(root.is_root() && root.is_leaf());
        assert!(root.render(false).ends_with("Parent: NONE, Children[0] (ROOT, LEAF)"));

        root.add_child(1);
        assert!(!root.is_leaf());
        assert!(root.render(true).ends_with("Children[1] {1} (ROOT)"));

        let child = Node::new(Id::NIL, Some(0));
        assert!(child.render(false).ends_with("Parent: 0, Children[0] (LEAF)"));
    }

    #[test]
    fn statement_slots() {
        let mut statement = Statement::new();
        assert_eq!(statement.root(), None);

        let a = Id::from_parts(1, 1);
        let b = Id::from_parts(2, 2);
        assert_eq!(statement.push(a), 0);
        assert_eq!(statement.push(b), 1);
        assert_eq!(statement.root(), Some(a));
        assert_eq!(statement.node(1), Some(b));
        assert_eq!(statement.node(2), None);
    }
}
