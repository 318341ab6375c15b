use super::*;

#[test]
fn geometry_parses_server_payload() {
    let geometry: WindowGeometry =
        serde_json::from_str(r#"{"title":"hist","width":1200,"height":800}"#).expect("parse");
    assert_eq!(geometry, WindowGeometry { title: "hist".to_owned(), width: 1200, height: 800 });
    assert_eq!(geometry.page_title(), "hist");
}

#[test]
fn blank_title_falls_back_to_default() {
    let geometry = WindowGeometry { title: "  ".to_owned(), width: 10, height: 10 };
    assert_eq!(geometry.page_title(), DEFAULT_TITLE);
}

#[test]
fn geometry_rejects_missing_size() {
    assert!(serde_json::from_str::<WindowGeometry>(r#"{"title":"x"}"#).is_err());
}

#[cfg(not(feature = "csr"))]
#[test]
fn fetch_outside_browser_is_none() {
    assert_eq!(futures::executor::block_on(fetch_window_geometry()), None);
}
