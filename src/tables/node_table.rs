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

use crate::ast::Node;
use crate::error::NodeError;
use crate::id::Id;
use crate::tables::{Entity, Table, TableFault};

/// Owns every AST node built by parsers.
pub type NodeTable = Table<Node>;

impl From<TableFault> for NodeError {
    fn from(fault: TableFault) -> Self {
        match fault {
            TableFault::Uninitialized => Self::Uninitialized,
            TableFault::AlreadyExists(id) => Self::AlreadyExists(id),
            TableFault::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl Entity for Node {
    type Error = NodeError;

    const LABEL: &'static str = "nodes";

    fn assign_id(&mut self, id: Id) {
        self.set_id(id);
    }

    fn render(&self, verbose: bool) -> String {
        Node::render(self, verbose)
    }
}

impl Table<Node> {
    /// Mints and stores a childless node labelled by `token`.
    pub fn generate(&self, token: Id, parent: Option<usize>) -> Result<Id, NodeError> {
        self.create(Node::new(token, parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdRegistry;
    use std::sync::Arc;

    #[test]
    fn generate_and_edit_children() {
        let ids = Arc::new(IdRegistry::with_seed(5));
        let table = NodeTable::new(ids);
        table.initialize();

        let token = Id::from_parts(3, 4);
        let root = table.generate(token, None).unwrap();
        table
            .with_mut(root, |node| {
                node.add_child(1);
                Ok(())
            })
            .unwrap();

        let node = table.get(root).unwrap();
        assert_eq!(node.id(), root);
        assert_eq!(node.token(), token);
        assert_eq!(node.children(), &[1]);
        assert!(node.is_root());
    }

    #[test]
    fn missing_nodes_and_bad_positions() {
        let ids = Arc::new(IdRegistry::with_seed(5));
        let table = NodeTable::new(ids);
        table.initialize();

        let missing = Id::from_parts(8, 8);
        assert_eq!(table.get(missing), Err(NodeError::NotFound(missing)));

        let id = table.generate(Id::NIL, Some(0)).unwrap();
        let err = table.with(id, |node| node.child(2)).unwrap_err();
        assert_eq!(err, NodeError::InvalidPosition { position: 2, len: 0 });
    }

    #[test]
    fn destroy_returns_to_uninitialized() {
        let ids = Arc::new(IdRegistry::with_seed(5));
        let table = NodeTable::new(ids.clone());
        table.initialize();
        table.generate(Id::NIL, None).unwrap();

        table.destroy();
        assert!(!table.is_initialized());
        assert_eq!(table.len(), Err(NodeError::Uninitialized));
        assert_eq!(ids.len(), Ok(0));
    }
}
