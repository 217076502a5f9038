use super::*;

#[test]
fn empty_source_map_has_version_one() {
    let map = SourceMapFile::new("main.zig");
    assert_eq!(map.version, 1);
    assert!(map.is_empty());
}

#[test]
fn push_adds_mapping_and_round_trips_through_json() {
    let mut map = SourceMapFile::new("build.zig");
    map.push(SourceMapping {
        gen_line: 3,
        gen_col: 10,
        src_file: "build.vn".to_string(),
        src_line: 3,
        src_col: 10,
        src_line_text: Some("import(\"build.vn\")".to_string()),
    });

    let json = map.to_json().expect("serializes");
    let parsed: SourceMapFile = serde_json::from_str(&json).expect("round-trips");
    assert_eq!(parsed.mappings.len(), 1);
    assert_eq!(parsed.mappings[0].src_file, "build.vn");
}

#[test]
fn src_line_text_omitted_when_absent() {
    let mut map = SourceMapFile::new("a.zig");
    map.push(SourceMapping {
        gen_line: 0,
        gen_col: 0,
        src_file: "a.vn".to_string(),
        src_line: 0,
        src_col: 0,
        src_line_text: None,
    });
    let json = map.to_json().expect("serializes");
    assert!(!json.contains("src_line_text"));
}
