use super::*;

#[test]
fn empty_object_gives_defaults() {
    let opts = EditorOpts::from_json_str("{}").unwrap();
    assert_eq!(opts, EditorOpts::default());
    assert_eq!(opts.layout.window_w, 1366);
    assert_eq!(opts.layout.frame_h, 432);
    assert_eq!(opts.boundary, BoundaryPolicy::Clip);
    assert_eq!(opts.record.fps, 30);
    assert_eq!(opts.filter_catalog().len(), 11);
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let opts = EditorOpts::from_json_str(
        r#"{
            "layout": {"frame_w": 400, "frame_h": 200},
            "catalog": "extended",
            "filter_count": 5,
            "boundary": "skip",
            "record": {"codec": "mpeg4"}
        }"#,
    )
    .unwrap();
    assert_eq!(opts.layout.frame_w, 400);
    assert_eq!(opts.layout.sticker_bar_h, 100);
    assert_eq!(opts.boundary, BoundaryPolicy::Skip);
    assert_eq!(opts.record.codec, VideoCodec::Mpeg4);
    assert_eq!(opts.record.fps, 30);
    let catalog = opts.filter_catalog();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.name(4), Some("Clarendon"));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(EditorOpts::from_json_str(r#"{"filter_count": 0}"#).is_err());
    assert!(EditorOpts::from_json_str(r#"{"record": {"fps": 0}}"#).is_err());
    assert!(EditorOpts::from_json_str(r#"{"layout": {"frame_w": 0}}"#).is_err());
    assert!(EditorOpts::from_json_str(r#"{"boundary": "wrap"}"#).is_err());
    assert!(EditorOpts::from_json_str(r#"{"history_limit": 1}"#).is_err());
    assert!(EditorOpts::from_json_str(r#"{"history_limit": 2}"#).is_ok());
}

#[test]
fn missing_file_is_error() {
    assert!(EditorOpts::from_json_file(Path::new("/nonexistent/booth.json")).is_err());
}
