//! Widget selection and drawing for node properties
//!
//! Each declared property type maps to a [`WidgetStrategy`]; the field's
//! numeric hint refines it (drag with range, slider). The inspector asks the
//! [`WidgetRegistry`] for a strategy and draws the value with it.

use engine::io::{NumericHint, PropertyField, PropertyType, PropertyValue};
use imgui::{Drag, Ui};
use std::collections::HashMap;

/// How a property value is edited
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetStrategy {
    Checkbox,
    InputFloat,
    DragFloat { min: f32, max: f32, speed: f32 },
    SliderFloat { min: f32, max: f32 },
    DragInt { min: i64, max: i64 },
    SliderInt { min: i64, max: i64 },
    Text,
    /// Two to four components edited side by side
    Vector { speed: f32, min: f32, max: f32 },
    Color3,
    Color4,
    ResourcePath,
}

type StrategyBuilder = fn(&PropertyField) -> WidgetStrategy;

/// Maps declared property types to editing strategies
pub struct WidgetRegistry {
    builders: HashMap<PropertyType, StrategyBuilder>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        let mut registry = Self {
            builders: HashMap::new(),
        };
        registry.register(PropertyType::Boolean, |_| WidgetStrategy::Checkbox);
        registry.register(PropertyType::Float, float_strategy);
        registry.register(PropertyType::Integer, integer_strategy);
        registry.register(PropertyType::String, |_| WidgetStrategy::Text);
        registry.register(PropertyType::Vector2, vector_strategy);
        registry.register(PropertyType::Vector3, vector_strategy);
        registry.register(PropertyType::Vector4, vector_strategy);
        registry.register(PropertyType::Color3, |_| WidgetStrategy::Color3);
        registry.register(PropertyType::Color4, |_| WidgetStrategy::Color4);
        registry.register(PropertyType::Resource, |_| WidgetStrategy::ResourcePath);
        registry
    }
}

fn float_strategy(field: &PropertyField) -> WidgetStrategy {
    match field.hint {
        NumericHint::Input => WidgetStrategy::InputFloat,
        NumericHint::Range { min, max, step } => WidgetStrategy::DragFloat {
            min,
            max,
            speed: step,
        },
        NumericHint::Slider { min, max } => WidgetStrategy::SliderFloat { min, max },
    }
}

fn integer_strategy(field: &PropertyField) -> WidgetStrategy {
    match field.hint {
        NumericHint::Slider { min, max } => WidgetStrategy::SliderInt {
            min: min as i64,
            max: max as i64,
        },
        NumericHint::Range { min, max, .. } => WidgetStrategy::DragInt {
            min: min as i64,
            max: max as i64,
        },
        NumericHint::Input => WidgetStrategy::DragInt {
            min: i64::MIN,
            max: i64::MAX,
        },
    }
}

fn vector_strategy(field: &PropertyField) -> WidgetStrategy {
    match field.hint {
        NumericHint::Range { min, max, step } => WidgetStrategy::Vector {
            speed: step,
            min,
            max,
        },
        NumericHint::Slider { min, max } => WidgetStrategy::Vector {
            speed: (max - min) / 100.0,
            min,
            max,
        },
        NumericHint::Input => WidgetStrategy::Vector {
            speed: 0.01,
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
        },
    }
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `builder` for every field of `property_type`
    pub fn register(&mut self, property_type: PropertyType, builder: StrategyBuilder) {
        self.builders.insert(property_type, builder);
    }

    pub fn strategy(&self, field: &PropertyField) -> Option<WidgetStrategy> {
        self.builders
            .get(&field.property_type)
            .map(|builder| builder(field))
    }

    /// Draw an editor for `value`, returning the edited value when it changed
    pub fn draw(&self, ui: &Ui, field: &PropertyField, value: &PropertyValue) -> Option<PropertyValue> {
        let strategy = self.strategy(field)?;
        let label = if field.degrees {
            format!("{} (deg)##{}", field.display_label(), field.name)
        } else {
            format!("{}##{}", field.display_label(), field.name)
        };
        draw_widget(ui, &label, &strategy, value)
    }
}

fn draw_widget(
    ui: &Ui,
    label: &str,
    strategy: &WidgetStrategy,
    value: &PropertyValue,
) -> Option<PropertyValue> {
    let mut value = value.clone();
    let changed = match (strategy, &mut value) {
        (WidgetStrategy::Checkbox, PropertyValue::Boolean(b)) => ui.checkbox(label, b),
        (WidgetStrategy::InputFloat, PropertyValue::Float(f)) => ui.input_float(label, f).build(),
        (WidgetStrategy::DragFloat { min, max, speed }, PropertyValue::Float(f)) => Drag::new(label)
            .range(*min, *max)
            .speed(*speed)
            .display_format("%.3f")
            .build(ui, f),
        (WidgetStrategy::SliderFloat { min, max }, PropertyValue::Float(f)) => {
            ui.slider(label, *min, *max, f)
        }
        (WidgetStrategy::DragInt { min, max }, PropertyValue::Integer(i)) => Drag::new(label)
            .range(*min, *max)
            .speed(1.0)
            .build(ui, i),
        (WidgetStrategy::SliderInt { min, max }, PropertyValue::Integer(i)) => {
            ui.slider(label, *min, *max, i)
        }
        (WidgetStrategy::Text, PropertyValue::String(s))
        | (WidgetStrategy::ResourcePath, PropertyValue::Resource(s)) => {
            ui.input_text(label, s).enter_returns_true(true).build()
        }
        (WidgetStrategy::Vector { speed, min, max }, PropertyValue::Vector2(v)) => {
            drag_components(ui, label, *speed, *min, *max, v)
        }
        (WidgetStrategy::Vector { speed, min, max }, PropertyValue::Vector3(v)) => {
            drag_components(ui, label, *speed, *min, *max, v)
        }
        (WidgetStrategy::Vector { speed, min, max }, PropertyValue::Vector4(v)) => {
            drag_components(ui, label, *speed, *min, *max, v)
        }
        (WidgetStrategy::Color3, PropertyValue::Color3(c)) => ui.color_edit3(label, c),
        (WidgetStrategy::Color4, PropertyValue::Color4(c)) => ui.color_edit4(label, c),
        (_, other) => {
            ui.text_disabled(format!("{label}: {other}"));
            false
        }
    };
    changed.then_some(value)
}

fn drag_components(ui: &Ui, label: &str, speed: f32, min: f32, max: f32, values: &mut [f32]) -> bool {
    Drag::new(label)
        .range(min, max)
        .speed(speed)
        .display_format("%.3f")
        .build_array(ui, values)
}
