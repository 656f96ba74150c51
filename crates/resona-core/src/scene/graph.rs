// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

use super::node::{NodeId, SceneNode};
use crate::math::Transform;

/// Errors raised while editing the scene hierarchy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a live node.
    #[error("unknown scene node {0}")]
    UnknownNode(NodeId),
    /// The node is already owned by another parent.
    #[error("scene node {child} is already owned by {parent}")]
    AlreadyParented {
        /// The node that was being attached.
        child: NodeId,
        /// Its current owner.
        parent: NodeId,
    },
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle {
        /// The node that was being attached.
        child: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
    /// The root cannot be owned by another node.
    #[error("the root node {0} cannot become a child")]
    RootCannotBeChild(NodeId),
    /// A root was already designated.
    #[error("the scene already has a root ({0})")]
    RootAlreadySet(NodeId),
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// An arena-backed tree of [`SceneNode`]s with a single root.
///
/// Ownership is exclusive: every node except the root has exactly one
/// parent, and [`SceneGraph::remove`] destroys a node's whole subtree.
#[derive(Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: Option<NodeId>,
    live: usize,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a detached node and returns its id.
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Designates a detached node as the root of the tree.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), SceneError> {
        if let Some(root) = self.root {
            return Err(SceneError::RootAlreadySet(root));
        }
        let node = self.node(id)?;
        if let Some(parent) = node.parent {
            return Err(SceneError::AlreadyParented { child: id, parent });
        }
        self.root = Some(id);
        Ok(())
    }

    /// Stores `node` and makes it the root.
    pub fn insert_root(&mut self, node: SceneNode) -> Result<NodeId, SceneError> {
        let id = self.insert(node);
        match self.set_root(id) {
            Ok(()) => Ok(id),
            Err(e) => {
                self.release(id);
                Err(e)
            }
        }
    }

    /// The root node, if one was designated.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Appends `child` to the ordered child list of `parent`, transferring
    /// ownership to `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(parent)?;
        let child_node = self.node(child)?;
        if self.root == Some(child) {
            return Err(SceneError::RootCannotBeChild(child));
        }
        if let Some(owner) = child_node.parent {
            return Err(SceneError::AlreadyParented {
                child,
                parent: owner,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::WouldCycle { child, parent });
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Stores `node` and attaches it under `parent` in one step.
    pub fn spawn_child(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let id = self.insert(node);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Destroys `id` and its whole subtree. Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = 0;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.release(current) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Borrows a node.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Mutably borrows a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Mutable access to a node's local transform.
    pub fn local_transform_mut(&mut self, id: NodeId) -> Result<&mut Transform, SceneError> {
        Ok(self.node_mut(id)?.local_transform_mut())
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Walks the tree depth-first from the root, visiting parents before
    /// their children and children in insertion order.
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal {
            graph: self,
            stack: self.root.map(|r| (r, 0)).into_iter().collect(),
        }
    }

    fn node(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.get(id).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut of: NodeId) -> bool {
        loop {
            if candidate == of {
                return true;
            }
            match self.get(of).and_then(|n| n.parent) {
                Some(parent) => of = parent,
                None => return false,
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<SceneNode> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }
}

/// Depth-first, parent-before-children iterator over a [`SceneGraph`].
///
/// Yields each node together with its depth (the root is at depth 0).
pub struct Traversal<'a> {
    graph: &'a SceneGraph,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (NodeId, &'a SceneNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, depth)) = self.stack.pop() {
            let Some(node) = self.graph.get(id) else {
                continue;
            };
            self.stack
                .extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
            return Some((id, node, depth));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MeshData;
    use crate::scene::Drawable;

    fn leaf(name: &str) -> SceneNode {
        SceneNode::new(Drawable::new(name, MeshData::default()))
    }

    fn names(graph: &SceneGraph) -> Vec<(String, usize)> {
        graph
            .traverse()
            .map(|(_, n, depth)| (n.drawable().name.clone(), depth))
            .collect()
    }

    #[test]
    fn traversal_is_depth_first_parent_first() {
        let mut graph = SceneGraph::new();
        let root = graph.insert_root(leaf("terrain")).unwrap();
        let a = graph.spawn_child(root, leaf("a")).unwrap();
        graph.spawn_child(a, leaf("a1")).unwrap();
        graph.spawn_child(root, leaf("b")).unwrap();

        assert_eq!(
            names(&graph),
            vec![
                ("terrain".to_string(), 0),
                ("a".to_string(), 1),
                ("a1".to_string(), 2),
                ("b".to_string(), 1),
            ]
        );
    }

    #[test]
    fn child_cannot_have_two_owners() {
        let mut graph = SceneGraph::new();
        let root = graph.insert_root(leaf("root")).unwrap();
        let other = graph.spawn_child(root, leaf("other")).unwrap();
        let child = graph.spawn_child(root, leaf("child")).unwrap();

        assert_eq!(
            graph.add_child(other, child),
            Err(SceneError::AlreadyParented {
                child,
                parent: root
            })
        );
        assert_eq!(graph.get(other).unwrap().children().len(), 0);
    }

    #[test]
    fn cycles_and_root_reparenting_are_rejected() {
        let mut graph = SceneGraph::new();
        let root = graph.insert_root(leaf("root")).unwrap();
        let child = graph.spawn_child(root, leaf("child")).unwrap();
        let detached = graph.insert(leaf("detached"));

        assert_eq!(
            graph.add_child(child, root),
            Err(SceneError::RootCannotBeChild(root))
        );
        assert_eq!(
            graph.add_child(detached, detached),
            Err(SceneError::WouldCycle {
                child: detached,
                parent: detached
            })
        );
    }

    #[test]
    fn removing_a_node_destroys_its_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.insert_root(leaf("root")).unwrap();
        let a = graph.spawn_child(root, leaf("a")).unwrap();
        let a1 = graph.spawn_child(a, leaf("a1")).unwrap();
        graph.spawn_child(root, leaf("b")).unwrap();

        assert_eq!(graph.remove(a), Ok(2));
        assert!(graph.get(a).is_none());
        assert!(graph.get(a1).is_none());
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get(root).unwrap().children().len(), 1);
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let mut graph = SceneGraph::new();
        let root = graph.insert_root(leaf("root")).unwrap();
        let old = graph.spawn_child(root, leaf("old")).unwrap();
        graph.remove(old).unwrap();
        let new = graph.spawn_child(root, leaf("new")).unwrap();

        assert_eq!(old.index, new.index);
        assert!(graph.get(old).is_none());
        assert_eq!(
            graph.local_transform_mut(old).err(),
            Some(SceneError::UnknownNode(old))
        );
    }

    #[test]
    fn removed_root_does_not_alias_its_replacement() {
        let mut graph = SceneGraph::new();
        let old_root = graph.insert_root(leaf("old")).unwrap();
        let old_child = graph.spawn_child(old_root, leaf("old child")).unwrap();
        assert_eq!(graph.remove(old_root).unwrap(), 2);
        assert!(graph.is_empty());

        let new_root = graph.insert_root(leaf("new")).unwrap();
        assert!(graph.get(old_root).is_none());
        assert!(graph.get(old_child).is_none());
        assert_eq!(graph.root(), Some(new_root));
        assert_eq!(names(&graph), vec![("new".to_string(), 0)]);
    }

    #[test]
    fn only_one_root() {
        let mut graph = SceneGraph::new();
        let root = graph.insert_root(leaf("root")).unwrap();
        assert_eq!(
            graph.insert_root(leaf("second")).err(),
            Some(SceneError::RootAlreadySet(root))
        );
        assert_eq!(graph.len(), 1);
    }
}
