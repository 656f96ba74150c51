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

use std::collections::{HashMap, VecDeque};

use resona_core::{
    math::Mat4,
    scene::{NodeId, SceneGraph},
};

/// The world matrix of every node reachable from the root, for one frame.
#[derive(Debug, Clone, Default)]
pub struct WorldTransforms {
    matrices: HashMap<NodeId, Mat4>,
}

impl WorldTransforms {
    /// The world matrix of `id`, if it is attached to the tree.
    pub fn get(&self, id: NodeId) -> Option<Mat4> {
        self.matrices.get(&id).copied()
    }

    /// Number of nodes with a computed world matrix.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Returns `true` if nothing was reachable.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// Accumulates world transforms top-down: `world(child) = world(parent) *
/// local(child)`, with the root's world equal to its local transform.
///
/// The graph is traversed breadth-first from the root, so every parent is
/// resolved before its children in a single pass. Detached nodes are skipped.
pub fn propagate_world_transforms(graph: &SceneGraph) -> WorldTransforms {
    let mut matrices = HashMap::with_capacity(graph.len());
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    if let Some(root) = graph.root() {
        if let Some(node) = graph.get(root) {
            matrices.insert(root, *node.local_transform().matrix());
            queue.push_back(root);
        }
    }

    while let Some(parent_id) = queue.pop_front() {
        let (Some(parent), Some(&parent_world)) = (graph.get(parent_id), matrices.get(&parent_id))
        else {
            continue;
        };
        for &child_id in parent.children() {
            if let Some(child) = graph.get(child_id) {
                matrices.insert(child_id, parent_world * *child.local_transform().matrix());
                queue.push_back(child_id);
            }
        }
    }

    WorldTransforms { matrices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_core::{
        asset::MeshData,
        math::{Vec3, EPSILON},
        scene::{Drawable, SceneNode},
    };

    /// A helper function to compare two `Mat4` matrices for approximate equality.
    fn assert_matrix_approx_eq(a: Mat4, b: Mat4) {
        for (c, (ca, cb)) in a.cols.iter().zip(b.cols.iter()).enumerate() {
            for r in 0..4 {
                assert!(
                    (ca.get(r) - cb.get(r)).abs() < EPSILON,
                    "Matrix mismatch at column {}, row {}: {} != {}",
                    c,
                    r,
                    ca.get(r),
                    cb.get(r)
                );
            }
        }
    }

    fn node(name: &str) -> SceneNode {
        SceneNode::new(Drawable::new(name, MeshData::default()))
    }

    #[test]
    fn child_inherits_parent_translation() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert_root(node("parent")).unwrap();
        let child = graph.spawn_child(parent, node("child")).unwrap();
        graph.local_transform_mut(parent).unwrap().translate(10.0, 0.0, 0.0);
        graph.local_transform_mut(child).unwrap().translate(0.0, 2.0, 0.0);

        let world = propagate_world_transforms(&graph);

        assert_eq!(world.len(), 2);
        assert_matrix_approx_eq(
            world.get(child).unwrap(),
            Mat4::from_translation(Vec3::new(10.0, 2.0, 0.0)),
        );
    }

    #[test]
    fn parent_rotation_moves_child() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert_root(node("parent")).unwrap();
        let child = graph.spawn_child(parent, node("child")).unwrap();
        graph
            .local_transform_mut(parent)
            .unwrap()
            .rotate(std::f32::consts::FRAC_PI_2, 0.0, 1.0, 0.0);
        graph.local_transform_mut(child).unwrap().translate(1.0, 0.0, 0.0);

        let origin = world_origin(&propagate_world_transforms(&graph), child);
        // +X rotated a quarter turn about +Y lands on -Z.
        assert!((origin.x).abs() < EPSILON);
        assert!((origin.z + 1.0).abs() < EPSILON);
    }

    #[test]
    fn three_levels_compose_in_order() {
        let mut graph = SceneGraph::new();
        let a = graph.insert_root(node("a")).unwrap();
        let b = graph.spawn_child(a, node("b")).unwrap();
        let c = graph.spawn_child(b, node("c")).unwrap();
        graph.local_transform_mut(a).unwrap().scale(2.0, 2.0, 2.0);
        graph.local_transform_mut(b).unwrap().translate(1.0, 0.0, 0.0);
        graph.local_transform_mut(c).unwrap().translate(0.0, 0.0, 3.0);

        let origin = world_origin(&propagate_world_transforms(&graph), c);
        assert!((origin.x - 2.0).abs() < EPSILON);
        assert!((origin.z - 6.0).abs() < EPSILON);
    }

    #[test]
    fn detached_nodes_are_skipped() {
        let mut graph = SceneGraph::new();
        graph.insert_root(node("root")).unwrap();
        let loose = graph.insert(node("loose"));
        let world = propagate_world_transforms(&graph);
        assert_eq!(world.len(), 1);
        assert!(world.get(loose).is_none());
        assert!(propagate_world_transforms(&SceneGraph::new()).is_empty());
    }

    fn world_origin(world: &WorldTransforms, id: NodeId) -> Vec3 {
        world.get(id).unwrap().transform_point3(Vec3::ZERO)
    }
}
