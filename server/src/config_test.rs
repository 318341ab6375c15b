use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_unset() {
    let config = Config::from_lookup(lookup(&[])).expect("config");
    assert_eq!(config.port, 3000);
    assert_eq!(config.site_dir, PathBuf::from("site"));
    assert_eq!(config.update_interval, Duration::from_millis(2000));
    assert_eq!(
        config.window,
        WindowGeometry { title: "webwindow".to_owned(), width: 1200, height: 800 }
    );
}

#[test]
fn values_override_defaults() {
    let config = Config::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("SITE_DIR", "/srv/page"),
        ("UPDATE_INTERVAL_MS", " 250 "),
        ("WINDOW_WIDTH", "640"),
        ("WINDOW_HEIGHT", "480"),
        ("WINDOW_TITLE", "adc"),
    ]))
    .expect("config");
    assert_eq!(config.port, 8080);
    assert_eq!(config.site_dir, PathBuf::from("/srv/page"));
    assert_eq!(config.update_interval, Duration::from_millis(250));
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 480);
    assert_eq!(config.window.title, "adc");
}

#[test]
fn malformed_value_is_an_error() {
    let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).expect_err("port should be invalid");
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".to_owned() });
}

#[test]
fn zero_update_interval_is_rejected() {
    let err = Config::from_lookup(lookup(&[("UPDATE_INTERVAL_MS", "0")])).expect_err("interval should be invalid");
    assert!(matches!(err, ConfigError::Invalid { key: "UPDATE_INTERVAL_MS", .. }));
}
