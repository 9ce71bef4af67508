use drawing::{
    Brush, BrushShape, Drawing, HexColor, ImageInsertion, Instruction, InstructionBox, Motion,
    Point, Stroke,
};
use serde_json::json;

use super::*;

fn stroke_box(uuid: &str, brush: Brush) -> InstructionBox {
    InstructionBox::with_uuid(
        Instruction::Stroke(Stroke {
            points: vec![Point::new(1.0, 2.0), Point::new(3.5, 4.25)],
            brush,
        }),
        uuid,
    )
}

fn round_trip(message: &Message) -> Message {
    let text = encode_message(message).expect("encode");
    decode_message(&text).expect("decode")
}

fn as_json(message: &Message) -> Value {
    serde_json::from_str(&encode_message(message).expect("encode")).expect("json")
}

// =============================================================================
// Envelope
// =============================================================================

#[test]
fn request_init_is_a_bare_string() {
    assert_eq!(encode_message(&Message::RequestInit).expect("encode"), "\"RequestInit\"");
    assert_eq!(decode_message("\"RequestInit\"").expect("decode"), Message::RequestInit);
}

#[test]
fn layer_commands_are_single_key_objects() {
    assert_eq!(as_json(&Message::Undo("bg".to_owned())), json!({"Undo": "bg"}));
    assert_eq!(
        as_json(&Message::ToggleLayerVisibility("ink".to_owned())),
        json!({"ToggleLayerVisibility": "ink"})
    );
    assert_eq!(
        decode_message(r#"{"LayerDown":"ink"}"#).expect("decode"),
        Message::LayerDown("ink".to_owned())
    );
}

#[test]
fn cursor_in_without_cursor_encodes_null() {
    assert_eq!(as_json(&Message::CursorIn(None)), json!({"CursorIn": null}));
}

#[test]
fn join_decodes_username() {
    assert_eq!(
        decode_message(r#"{"Join":"ada"}"#).expect("decode"),
        Message::Join("ada".to_owned())
    );
}

// =============================================================================
// Payload conversion
// =============================================================================

#[test]
fn shorthand_colors_expand_on_the_wire() {
    let cases = [
        ("#f00", (255, 0, 0, 255)),
        ("#f00c", (255, 0, 0, 204)),
        ("#12abEF", (0x12, 0xab, 0xef, 255)),
        ("#12345678", (0x12, 0x34, 0x56, 0x78)),
    ];
    for (hex, (r, g, b, a)) in cases {
        let color = HexColor::parse(hex).expect("color");
        let wire = convert::color_to_wire(&color);
        assert_eq!(wire, wire::WireColor { r, g, b, a }, "{hex}");
        assert_eq!(convert::color_from_wire(wire), color, "{hex}");
    }
}

#[test]
fn stroke_uses_server_field_names() {
    let message = Message::Instruction(LayerInstruction {
        layer: "bg".to_owned(),
        instruction: stroke_box("u1", Brush::default()),
    });
    assert_eq!(
        as_json(&message),
        json!({"Instruction": {
            "layer": "bg",
            "instruction": {
                "instruction": {"Stroke": {
                    "points": [{"x": 1.0, "y": 2.0}, {"x": 3.5, "y": 4.25}],
                    "brush": {
                        "brush_shape": "Circle",
                        "color": {"r": 0, "g": 0, "b": 0, "a": 255},
                        "width": 10.0,
                        "diffusion": 0,
                        "erase": false
                    }
                }},
                "uuid": "u1"
            }
        }})
    );
}

#[test]
fn custom_brush_shape_is_wrapped() {
    let brush = Brush {
        brush_shape: BrushShape::Custom {
            polygons: vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]],
        },
        ..Brush::default()
    };
    let message = Message::CursorIn(Some(Cursor { point: Point::new(5.0, 5.0), brush }));
    let value = as_json(&message);
    assert_eq!(
        value["CursorIn"]["brush"]["brush_shape"],
        json!({"Custom": {"points": [[{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 0.0}, {"x": 0.0, "y": 1.0}]]}})
    );
    assert_eq!(round_trip(&message), message);
}

#[test]
fn every_instruction_variant_round_trips() {
    let square = Brush {
        brush_shape: BrushShape::Square,
        color: HexColor::parse("#0f08").expect("color"),
        width: 2.5,
        diffusion: 7,
        erase: true,
    };
    let instructions = [
        stroke_box("s", square),
        InstructionBox::with_uuid(
            Instruction::Motion(Motion {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, -4.0),
                selection: (Point::new(1.0, 1.0), Point::new(9.0, 9.0)),
            }),
            "m",
        ),
        InstructionBox::with_uuid(
            Instruction::ImageInsertion(ImageInsertion {
                base64: "aGVsbG8=".to_owned(),
                position: Some(Point::new(12.0, 34.0)),
            }),
            "i",
        ),
    ];
    for instruction in instructions {
        let message =
            Message::Instruction(LayerInstruction { layer: "bg".to_owned(), instruction });
        assert_eq!(round_trip(&message), message);
    }
}

#[test]
fn temp_draw_and_cursor_out_round_trip() {
    let temp = Message::TempDraw(TempDraw {
        brush: Brush::default(),
        uuid: "live".to_owned(),
        start: Point::new(1.0, 1.0),
        end: Point::new(2.0, 2.0),
        layer: "bg".to_owned(),
    });
    assert_eq!(round_trip(&temp), temp);

    let out = Message::CursorOut(CursorOut {
        cursor: Some(Cursor { point: Point::new(3.0, 4.0), brush: Brush::default() }),
        username: "ada".to_owned(),
    });
    assert_eq!(round_trip(&out), out);
}

#[test]
fn init_hydrates_a_single_background_layer() {
    let text = r#"{"Init":{"drawing":{"width":1920,"height":1080,
        "layers":{"bg":{"history":[],"history_index":0,"visible":true}},
        "layer_order":["bg"]},"users":["ada"]}}"#;
    let Message::Init(init) = decode_message(text).expect("decode") else {
        panic!("expected Init");
    };
    let bg = init.drawing.layer("bg").expect("bg layer");
    assert!(bg.is_visible());
    assert!(bg.history().is_empty());
    assert_eq!(bg.history_index(), 0);
    assert_eq!(init.drawing.layer_order(), ["bg"]);
    assert_eq!(init.users, ["ada"]);
}

#[test]
fn init_keeps_wire_layer_key_order() {
    let text = r#"{"Init":{"drawing":{"width":10,"height":10,
        "layers":{
            "zeta":{"history":[],"history_index":0,"visible":true},
            "alpha":{"history":[],"history_index":0,"visible":false}
        },
        "layer_order":["alpha","zeta"]},"users":[]}}"#;
    let Message::Init(init) = decode_message(text).expect("decode") else {
        panic!("expected Init");
    };
    let keys: Vec<&str> = init.drawing.layers().keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha"]);
}

#[test]
fn init_with_history_round_trips() {
    let mut drawing = Drawing::new(640, 480);
    drawing.add_layer("bg").expect("add");
    drawing.add_layer("ink").expect("add");
    drawing.append_instruction("ink", stroke_box("a", Brush::default())).expect("append");
    drawing.append_instruction("ink", stroke_box("b", Brush::default())).expect("append");
    drawing.undo("ink").expect("undo");
    drawing.layer_down("ink").expect("down");

    let message = Message::Init(Init { drawing, users: vec!["ada".to_owned(), "bob".to_owned()] });
    assert_eq!(round_trip(&message), message);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn malformed_envelopes_are_rejected() {
    assert!(matches!(decode_message("{not json"), Err(CodecError::Json(_))));
    assert!(matches!(decode_message("42"), Err(CodecError::NotSingleKey)));
    assert!(matches!(decode_message("{}"), Err(CodecError::NotSingleKey)));
    assert!(matches!(
        decode_message(r#"{"Undo":"a","Redo":"b"}"#),
        Err(CodecError::NotSingleKey)
    ));
    assert!(matches!(
        decode_message(r#"{"Erase":"bg"}"#),
        Err(CodecError::UnknownKind(kind)) if kind == "Erase"
    ));
}

#[test]
fn payload_errors_name_the_claimed_kind() {
    assert!(matches!(
        decode_message("\"Undo\""),
        Err(CodecError::Payload { kind: MessageKind::Undo, .. })
    ));
    assert!(matches!(
        decode_message(r#"{"AddLayer":5}"#),
        Err(CodecError::Payload { kind: MessageKind::AddLayer, .. })
    ));
    assert!(matches!(
        decode_message(r#"{"Instruction":{"layer":"bg"}}"#),
        Err(CodecError::Payload { kind: MessageKind::Instruction, .. })
    ));
}

#[test]
fn empty_stroke_is_rejected_both_ways() {
    let text = r#"{"Instruction":{"layer":"bg","instruction":{"uuid":"e","instruction":
        {"Stroke":{"points":[],"brush":{"brush_shape":"Circle",
        "color":{"r":0,"g":0,"b":0,"a":255},"width":1.0,"diffusion":0,"erase":false}}}}}}"#;
    assert!(matches!(decode_message(text), Err(CodecError::EmptyStroke)));

    let empty = Message::Instruction(LayerInstruction {
        layer: "bg".to_owned(),
        instruction: InstructionBox::with_uuid(
            Instruction::Stroke(Stroke { points: vec![], brush: Brush::default() }),
            "e",
        ),
    });
    assert!(matches!(encode_message(&empty), Err(CodecError::EmptyStroke)));
}

#[test]
fn non_positive_brush_width_is_rejected() {
    let text = r#"{"CursorIn":{"point":{"x":0,"y":0},"brush":{"brush_shape":"Square",
        "color":{"r":1,"g":2,"b":3,"a":4},"width":0.0,"diffusion":0,"erase":false}}}"#;
    assert!(matches!(decode_message(text), Err(CodecError::InvalidBrushWidth(_))));

    let brush = Brush { width: -1.0, ..Brush::default() };
    let message = Message::CursorIn(Some(Cursor { point: Point::default(), brush }));
    assert!(matches!(encode_message(&message), Err(CodecError::InvalidBrushWidth(_))));
}

#[test]
fn image_without_position_is_rejected_both_ways() {
    let text = r#"{"Instruction":{"layer":"bg","instruction":{"uuid":"i",
        "instruction":{"ImageInsertion":{"base64":"eA=="}}}}}"#;
    assert!(matches!(decode_message(text), Err(CodecError::MissingImagePosition)));

    let floating = Message::Instruction(LayerInstruction {
        layer: "bg".to_owned(),
        instruction: InstructionBox::with_uuid(
            Instruction::ImageInsertion(ImageInsertion { base64: "eA==".to_owned(), position: None }),
            "i",
        ),
    });
    assert!(matches!(encode_message(&floating), Err(CodecError::MissingImagePosition)));
}

#[test]
fn inconsistent_snapshots_are_rejected() {
    let cursor_past_end = r#"{"Init":{"drawing":{"width":1,"height":1,
        "layers":{"bg":{"history":[],"history_index":3,"visible":true}},
        "layer_order":["bg"]},"users":[]}}"#;
    assert!(matches!(
        decode_message(cursor_past_end),
        Err(CodecError::InconsistentDrawing(_))
    ));

    let order_mismatch = r#"{"Init":{"drawing":{"width":1,"height":1,
        "layers":{"bg":{"history":[],"history_index":0,"visible":true}},
        "layer_order":["bg","ghost"]},"users":[]}}"#;
    assert!(matches!(
        decode_message(order_mismatch),
        Err(CodecError::InconsistentDrawing(_))
    ));
}

#[test]
fn a_bad_frame_does_not_poison_the_next() {
    assert!(decode_message(r#"{"Nope":1}"#).is_err());
    assert_eq!(
        decode_message(r#"{"Redo":"bg"}"#).expect("decode"),
        Message::Redo("bg".to_owned())
    );
}
