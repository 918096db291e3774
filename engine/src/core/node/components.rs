//! Components attached to live nodes

use crate::io::property::PropertyValue;
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registered type name a live node was instantiated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKind(pub String);

/// Parent component establishing a parent-child relationship
///
/// The parent owns the child through its [`Children`] map; this is only a
/// back-reference used for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub hecs::Entity);

/// Named children of a live node, sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub BTreeMap<String, hecs::Entity>);

/// Current property values of a live node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeProperties(pub BTreeMap<String, PropertyValue>);

impl NodeProperties {
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }
}

/// Transform component representing position, rotation, and scale in local space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// Position in local space
    pub position: Vec3,
    /// Rotation in local space as a quaternion
    pub rotation: Quat,
    /// Scale in local space
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Derive a transform from `position`, `rotation` (euler degrees) and `scale`
    ///
    /// Returns `None` for nodes that declare none of the three.
    pub fn from_properties(properties: &NodeProperties) -> Option<Self> {
        let position = properties.get("position").and_then(PropertyValue::as_vec3);
        let rotation = properties.get("rotation").and_then(PropertyValue::as_vec3);
        let scale = properties.get("scale").and_then(PropertyValue::as_vec3);

        if position.is_none() && rotation.is_none() && scale.is_none() {
            return None;
        }

        let rotation = rotation
            .map(|degrees| {
                Quat::from_euler(
                    EulerRot::YXZ,
                    degrees.y.to_radians(),
                    degrees.x.to_radians(),
                    degrees.z.to_radians(),
                )
            })
            .unwrap_or(Quat::IDENTITY);

        Some(Self {
            position: position.unwrap_or(Vec3::ZERO),
            rotation,
            scale: scale.unwrap_or(Vec3::ONE),
        })
    }

    /// Convert this transform to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Global transform component representing the world-space transformation matrix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GlobalTransform {
    /// World-space transformation matrix
    pub matrix: Mat4,
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }
}

impl GlobalTransform {
    /// Create a new global transform from a matrix
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Get the world position from the transformation matrix
    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }
}
