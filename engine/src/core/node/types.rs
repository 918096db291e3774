//! Built-in node types

use crate::io::node_registry::{NodeType, NodeTypeInfo};
use crate::io::property::{PropertyField, PropertyType, PropertyValue};

/// Plain grouping node without properties
pub struct Node;

/// Node with a transform in 3D space
pub struct Spatial;

/// Perspective camera
pub struct Camera;

/// Point light
pub struct Light;

/// Textured 2D quad
pub struct Sprite;

fn with_spatial_fields(info: NodeTypeInfo) -> NodeTypeInfo {
    info.with_field(
        PropertyField::new("position", PropertyType::Vector3).with_range(
            f32::NEG_INFINITY,
            f32::INFINITY,
            0.01,
        ),
        PropertyValue::Vector3([0.0; 3]),
    )
    .with_field(
        PropertyField::new("rotation", PropertyType::Vector3)
            .with_range(-360.0, 360.0, 0.5)
            .in_degrees(),
        PropertyValue::Vector3([0.0; 3]),
    )
    .with_field(
        PropertyField::new("scale", PropertyType::Vector3),
        PropertyValue::Vector3([1.0; 3]),
    )
    .with_field(
        PropertyField::new("visible", PropertyType::Boolean),
        PropertyValue::Boolean(true),
    )
}

impl NodeType for Node {
    fn type_name() -> &'static str {
        "Node"
    }

    fn describe() -> NodeTypeInfo {
        NodeTypeInfo::new(Self::type_name())
    }
}

impl NodeType for Spatial {
    fn type_name() -> &'static str {
        "Spatial"
    }

    fn describe() -> NodeTypeInfo {
        with_spatial_fields(NodeTypeInfo::new(Self::type_name()))
    }
}

impl NodeType for Camera {
    fn type_name() -> &'static str {
        "Camera"
    }

    fn describe() -> NodeTypeInfo {
        with_spatial_fields(NodeTypeInfo::new(Self::type_name()))
            .with_field(
                PropertyField::new("fov", PropertyType::Float)
                    .with_label("Field of view")
                    .with_slider(1.0, 179.0),
                PropertyValue::Float(60.0),
            )
            .with_field(
                PropertyField::new("near", PropertyType::Float).with_range(0.001, 10.0, 0.001),
                PropertyValue::Float(0.1),
            )
            .with_field(
                PropertyField::new("far", PropertyType::Float).with_range(1.0, 100_000.0, 1.0),
                PropertyValue::Float(1000.0),
            )
            .with_field(
                PropertyField::new("current", PropertyType::Boolean),
                PropertyValue::Boolean(false),
            )
    }
}

impl NodeType for Light {
    fn type_name() -> &'static str {
        "Light"
    }

    fn describe() -> NodeTypeInfo {
        with_spatial_fields(NodeTypeInfo::new(Self::type_name()))
            .with_field(
                PropertyField::new("color", PropertyType::Color3),
                PropertyValue::Color3([1.0; 3]),
            )
            .with_field(
                PropertyField::new("energy", PropertyType::Float).with_range(0.0, 16.0, 0.01),
                PropertyValue::Float(1.0),
            )
    }
}

impl NodeType for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }

    fn describe() -> NodeTypeInfo {
        NodeTypeInfo::new(Self::type_name())
            .with_field(
                PropertyField::new("texture", PropertyType::Resource),
                PropertyValue::Resource(String::new()),
            )
            .with_field(
                PropertyField::new("offset", PropertyType::Vector2),
                PropertyValue::Vector2([0.0; 2]),
            )
            .with_field(
                PropertyField::new("modulate", PropertyType::Color4),
                PropertyValue::Color4([1.0; 4]),
            )
            .with_field(
                PropertyField::new("frame", PropertyType::Integer).with_slider(0.0, 63.0),
                PropertyValue::Integer(0),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_matching_default() {
        for info in [
            Node::describe(),
            Spatial::describe(),
            Camera::describe(),
            Light::describe(),
            Sprite::describe(),
        ] {
            assert_eq!(info.fields.len(), info.defaults.len(), "{}", info.name);
            for field in &info.fields {
                let default = info.defaults.get(&field.name).unwrap();
                assert!(field.accepts(default), "{}.{}", info.name, field.name);
            }
        }
    }
}
