use fnv::FnvHashMap;
use glam::{DMat4, DQuat, DVec3};
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub scale: DVec3,
    pub rotation_z: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            scale: DVec3::ONE,
            rotation_z: 0.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            self.scale,
            DQuat::from_rotation_z(self.rotation_z),
            self.position,
        )
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub group: GroupId,
    pub transform: Transform,
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
struct Group {
    position: DVec3,
    meshes: SmallVec<[MeshId; 16]>,
}

/// Flat scene graph: groups own meshes, a mesh is drawn relative to its group.
#[derive(Debug, Default)]
pub struct SceneGraph {
    next_id: u32,
    groups: FnvHashMap<GroupId, Group>,
    meshes: FnvHashMap<MeshId, Mesh>,
}

/// One mesh ready for drawing: world matrix and tint.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem {
    pub model: DMat4,
    pub color: [f32; 4],
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn create_group(&mut self) -> GroupId {
        let id = GroupId(self.next());
        self.groups.insert(id, Group::default());
        id
    }

    /// Remove a group and every mesh it owns; returns how many meshes went.
    pub fn remove_group(&mut self, group: GroupId) -> usize {
        let Some(g) = self.groups.remove(&group) else {
            return 0;
        };
        for mesh in &g.meshes {
            self.meshes.remove(mesh);
        }
        g.meshes.len()
    }

    pub fn set_group_position(&mut self, group: GroupId, position: DVec3) {
        if let Some(g) = self.groups.get_mut(&group) {
            g.position = position;
        }
    }

    pub fn group_position(&self, group: GroupId) -> Option<DVec3> {
        self.groups.get(&group).map(|g| g.position)
    }

    /// `None` when the group no longer exists.
    pub fn create_mesh(&mut self, group: GroupId, color: [f32; 4]) -> Option<MeshId> {
        if !self.groups.contains_key(&group) {
            return None;
        }
        let id = MeshId(self.next());
        self.meshes.insert(
            id,
            Mesh {
                group,
                transform: Transform::default(),
                color,
            },
        );
        if let Some(g) = self.groups.get_mut(&group) {
            g.meshes.push(id);
        }
        Some(id)
    }

    pub fn set_transform(&mut self, mesh: MeshId, transform: Transform) {
        if let Some(m) = self.meshes.get_mut(&mesh) {
            m.transform = transform;
        }
    }

    pub fn transform(&self, mesh: MeshId) -> Option<&Transform> {
        self.meshes.get(&mesh).map(|m| &m.transform)
    }

    pub fn contains(&self, mesh: MeshId) -> bool {
        self.meshes.contains_key(&mesh)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Meshes in creation order with their group offset applied.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut ids: Vec<&MeshId> = self.meshes.keys().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.meshes.get(id))
            .map(|mesh| {
                let offset = self
                    .groups
                    .get(&mesh.group)
                    .map(|g| g.position)
                    .unwrap_or(DVec3::ZERO);
                DrawItem {
                    model: DMat4::from_translation(offset) * mesh.transform.matrix(),
                    color: mesh.color,
                }
            })
            .collect()
    }
}
