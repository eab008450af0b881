use iciba_launcher::plugins::iciba::IcibaSettings;
use iciba_launcher::settings::Settings;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert!(!s.debug_logging);
    assert!(s.log_file.is_none());
    assert!(s.plugin_enabled("iciba"));
}

#[test]
fn save_and_load_roundtrip_keeps_plugin_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();

    let mut s = Settings::default();
    s.debug_logging = true;
    s.plugin_settings.insert(
        "iciba".into(),
        serde_json::to_value(IcibaSettings {
            debounce_ms: 250,
            ..Default::default()
        })
        .unwrap(),
    );
    s.save(path).unwrap();

    let loaded = Settings::load(path).unwrap();
    assert!(loaded.debug_logging);
    let iciba: IcibaSettings =
        serde_json::from_value(loaded.plugin_settings["iciba"].clone()).unwrap();
    assert_eq!(iciba.debounce_ms, 250);
    assert_eq!(iciba.prefix, "iciba");
}

#[test]
fn partial_plugin_settings_fill_defaults() {
    let iciba: IcibaSettings =
        serde_json::from_value(serde_json::json!({ "report_missing": true })).unwrap();
    assert!(iciba.report_missing);
    assert_eq!(iciba, IcibaSettings { report_missing: true, ..Default::default() });
    assert_eq!(
        iciba.api_url,
        "http://www.iciba.com/index.php?a=getWordMean&c=search&list=1"
    );
    assert_eq!(iciba.private_browser_cmd.as_deref(), Some("firefox --private-window"));
}

#[test]
fn invalid_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}
