use super::*;

fn sample_event() -> Event {
    Event::data(VideoFrame::new("frame-1", vec![0xFF, 0xD8, 0xFF, 0xE0], 640, 480))
}

#[test]
fn data_constructor_uses_data_event_name() {
    let event = sample_event();
    assert_eq!(event.event, "data");
    assert!(event.is_data());
}

#[test]
fn other_event_names_are_not_data() {
    let mut event = sample_event();
    event.event = "chat".to_owned();
    assert!(!event.is_data());
}

#[test]
fn protobuf_round_trip_preserves_event() {
    let event = sample_event();
    let bytes = encode_event(&event);
    assert!(!bytes.is_empty());
    let decoded = decode_event(&bytes).expect("decode should succeed");
    assert_eq!(decoded, event);
}

#[test]
fn decode_rejects_garbage_bytes() {
    let err = decode_event(&[0xFF, 0xFF, 0xFF]).expect_err("garbage should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_without_frame_reports_missing_frame() {
    let wire = WireEvent { event: "data".to_owned(), frame: None };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode into vec");
    let err = decode_event(&bytes).expect_err("frame is required");
    assert!(matches!(err, CodecError::MissingFrame(name) if name == "data"));
}

#[test]
fn json_uses_browser_field_names() {
    let text = encode_event_json(&sample_event()).expect("encode json");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["event"], "data");
    assert_eq!(value["data"]["frame_id"], "frame-1");
    assert_eq!(value["data"]["frame"], "/9j/4A==");
    assert_eq!(value["data"]["frame_width"], 640);
    assert_eq!(value["data"]["frame_height"], 480);
}

#[test]
fn json_and_protobuf_decode_to_same_frame() {
    let event = sample_event();
    let from_json = decode_event_json(&encode_event_json(&event).expect("encode json")).expect("decode json");
    let from_proto = decode_event(&encode_event(&event)).expect("decode proto");
    assert_eq!(from_json, from_proto);
}

#[test]
fn json_without_dimensions_defaults_to_zero() {
    let text = r#"{"event":"data","data":{"frame_id":"abc","frame":"/9j/"}}"#;
    let event = decode_event_json(text).expect("dimensions are optional");
    assert_eq!(event.frame.image, vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(event.frame.width, 0);
    assert_eq!(event.frame.height, 0);
    assert!(!event.frame.has_dimensions());
}

#[test]
fn json_with_invalid_base64_is_rejected() {
    let text = r#"{"event":"data","data":{"frame_id":"abc","frame":"not base64!"}}"#;
    let err = decode_event_json(text).expect_err("invalid base64");
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn json_missing_frame_id_is_rejected() {
    let text = r#"{"event":"data","data":{"frame":"/9j/"}}"#;
    assert!(decode_event_json(text).is_err());
}

#[test]
fn has_dimensions_requires_both_sides() {
    assert!(VideoFrame::new("a", Vec::new(), 1, 1).has_dimensions());
    assert!(!VideoFrame::new("a", Vec::new(), 0, 1).has_dimensions());
    assert!(!VideoFrame::new("a", Vec::new(), 1, 0).has_dimensions());
}
