//! Property value definitions for node resources
//!
//! Properties are stored on resource nodes as typed values and mirrored on the
//! live node they were instantiated into. The editor uses the declared
//! [`PropertyField`]s of a node type to pick a widget for each value.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed property value that can be edited in the inspector and saved in a resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    /// Floating point number
    Float(f32),
    /// Integer number
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// 2D vector (x, y)
    Vector2([f32; 2]),
    /// 3D vector (x, y, z)
    Vector3([f32; 3]),
    /// 4D vector (x, y, z, w)
    Vector4([f32; 4]),
    /// RGB color in range 0.0-1.0
    Color3([f32; 3]),
    /// RGBA color in range 0.0-1.0
    Color4([f32; 4]),
    /// Path of another resource, relative to the resources folder
    Resource(String),
}

impl PropertyValue {
    /// The type tag of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Vector2(_) => PropertyType::Vector2,
            PropertyValue::Vector3(_) => PropertyType::Vector3,
            PropertyValue::Vector4(_) => PropertyType::Vector4,
            PropertyValue::Color3(_) => PropertyType::Color3,
            PropertyValue::Color4(_) => PropertyType::Color4,
            PropertyValue::Resource(_) => PropertyType::Resource,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Integer(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            PropertyValue::Vector2(v) => Some(Vec2::from_array(*v)),
            _ => None,
        }
    }

    /// Read a 3-component value, accepting both vectors and RGB colors
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            PropertyValue::Vector3(v) | PropertyValue::Color3(v) => Some(Vec3::from_array(*v)),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<Vec4> {
        match self {
            PropertyValue::Vector4(v) | PropertyValue::Color4(v) => Some(Vec4::from_array(*v)),
            _ => None,
        }
    }
}

impl From<Vec3> for PropertyValue {
    fn from(value: Vec3) -> Self {
        PropertyValue::Vector3(value.to_array())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Integer(v) => write!(f, "{v}"),
            PropertyValue::Boolean(v) => write!(f, "{v}"),
            PropertyValue::String(v) => write!(f, "\"{v}\""),
            PropertyValue::Vector2(v) => write!(f, "({}, {})", v[0], v[1]),
            PropertyValue::Vector3(v) => write!(f, "({}, {}, {})", v[0], v[1], v[2]),
            PropertyValue::Vector4(v) => write!(f, "({}, {}, {}, {})", v[0], v[1], v[2], v[3]),
            PropertyValue::Color3(v) => write!(f, "rgb({}, {}, {})", v[0], v[1], v[2]),
            PropertyValue::Color4(v) => write!(f, "rgba({}, {}, {}, {})", v[0], v[1], v[2], v[3]),
            PropertyValue::Resource(path) => write!(f, "res://{path}"),
        }
    }
}

/// The type of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Float,
    Integer,
    Boolean,
    String,
    Vector2,
    Vector3,
    Vector4,
    Color3,
    Color4,
    Resource,
}

impl PropertyType {
    /// Parse a type name as written in node definitions
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "float" | "f32" | "real" => Some(PropertyType::Float),
            "int" | "i64" | "integer" => Some(PropertyType::Integer),
            "bool" | "boolean" => Some(PropertyType::Boolean),
            "string" | "str" | "text" => Some(PropertyType::String),
            "vec2" | "vector2" => Some(PropertyType::Vector2),
            "vec3" | "vector3" => Some(PropertyType::Vector3),
            "vec4" | "vector4" => Some(PropertyType::Vector4),
            "color3" | "rgb" => Some(PropertyType::Color3),
            "color" | "color4" | "rgba" => Some(PropertyType::Color4),
            "resource" | "path" => Some(PropertyType::Resource),
            _ => None,
        }
    }
}

/// Editor hints for a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericHint {
    /// Plain input box
    Input,
    /// Drag widget clamped to a range
    Range { min: f32, max: f32, step: f32 },
    /// Slider between two bounds
    Slider { min: f32, max: f32 },
}

/// A property declared by a node type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyField {
    /// Property name as stored in the resource
    pub name: String,
    /// Display label (defaults to the name)
    pub label: Option<String>,
    /// Declared value type
    pub property_type: PropertyType,
    /// How numeric values should be edited
    pub hint: NumericHint,
    /// Angles stored in degrees and shown as such
    pub degrees: bool,
}

impl PropertyField {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            label: None,
            property_type,
            hint: NumericHint::Input,
            degrees: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_range(mut self, min: f32, max: f32, step: f32) -> Self {
        self.hint = NumericHint::Range { min, max, step };
        self
    }

    pub fn with_slider(mut self, min: f32, max: f32) -> Self {
        self.hint = NumericHint::Slider { min, max };
        self
    }

    pub fn in_degrees(mut self) -> Self {
        self.degrees = true;
        self
    }

    /// Label shown next to the widget
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Whether a value can be stored in this field
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        value.property_type() == self.property_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_parsing() {
        assert_eq!(PropertyType::parse("float"), Some(PropertyType::Float));
        assert_eq!(PropertyType::parse("Vec3"), Some(PropertyType::Vector3));
        assert_eq!(PropertyType::parse("rgba"), Some(PropertyType::Color4));
        assert_eq!(PropertyType::parse("unknown"), None);
    }

    #[test]
    fn test_property_value_serialization_is_tagged() {
        let value = PropertyValue::Vector3([1.0, 2.0, 3.0]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "Vector3");
        assert_eq!(json["value"][2], 3.0);

        let decoded: PropertyValue = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_vector_accessors() {
        assert_eq!(
            PropertyValue::Color3([0.5, 0.25, 1.0]).as_vec3(),
            Some(Vec3::new(0.5, 0.25, 1.0))
        );
        assert_eq!(PropertyValue::Integer(3).as_float(), Some(3.0));
        assert_eq!(PropertyValue::Boolean(true).as_vec3(), None);
    }

    #[test]
    fn test_field_accepts_only_declared_type() {
        let field = PropertyField::new("fov", PropertyType::Float).with_slider(1.0, 179.0);
        assert!(field.accepts(&PropertyValue::Float(60.0)));
        assert!(!field.accepts(&PropertyValue::Integer(60)));
        assert_eq!(field.display_label(), "fov");
        assert_eq!(field.with_label("Field of view").display_label(), "Field of view");
    }
}
