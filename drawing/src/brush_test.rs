use serde_json::json;

use super::*;

#[test]
fn default_brush_is_small_black_circle() {
    let brush = Brush::default();
    assert_eq!(brush.brush_shape, BrushShape::Circle);
    assert_eq!(brush.color.as_str(), "#000");
    assert!(brush.has_valid_width());
    assert!(!brush.erase);
}

#[test]
fn shape_client_form_has_no_payload_for_builtin_tips() {
    assert_eq!(serde_json::to_value(BrushShape::Circle).unwrap(), json!({"shape": "circle"}));
    assert_eq!(serde_json::to_value(BrushShape::Square).unwrap(), json!({"shape": "square"}));
}

#[test]
fn shape_client_form_carries_custom_polygons() {
    let shape = BrushShape::Custom {
        polygons: vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]],
    };
    let value = serde_json::to_value(&shape).unwrap();
    assert_eq!(value["shape"], "custom");
    assert_eq!(value["customShape"][0][1], json!({"x": 1.0, "y": 0.0}));

    let back: BrushShape = serde_json::from_value(value).unwrap();
    assert_eq!(back, shape);
}

#[test]
fn custom_shape_without_points_is_rejected() {
    assert!(serde_json::from_value::<BrushShape>(json!({"shape": "custom"})).is_err());
}

#[test]
fn brush_client_form_uses_camel_case() {
    let value = serde_json::to_value(Brush::default()).unwrap();
    assert_eq!(value["brushShape"], json!({"shape": "circle"}));
    assert_eq!(value["color"], "#000");
}

#[test]
fn zero_or_nan_width_is_not_valid() {
    let mut brush = Brush { width: 0.0, ..Brush::default() };
    assert!(!brush.has_valid_width());
    brush.width = f32::NAN;
    assert!(!brush.has_valid_width());
}
