use house_price_maps::{AppConfig, Color, NameKey, Source};
use std::io::Write;

#[test]
fn toml_overrides_only_what_it_names() {
    let cfg = AppConfig::from_toml_str(
        r##"
[prices]
source = "https://example.org/prices.csv"
name_column = "Region"

[london]
year = "2018"
name_key = ["NAME", "name"]

[england]
domain = [100000.0, 200000.0]
colors = ["#ffffff", "#888888", "#000000"]
"##,
    )
    .unwrap();

    assert_eq!(cfg.prices.source, Source::Url("https://example.org/prices.csv".into()));
    assert_eq!(cfg.prices.name_column, "Region");
    assert_eq!(cfg.london.year, "2018");
    assert_eq!(cfg.london.name_key, NameKey::first_of(["NAME", "name"]));
    assert_eq!(cfg.london.domain.len(), 11);
    assert_eq!(cfg.england.year, "2023");
    let scale = cfg.england.scale().unwrap();
    assert_eq!(scale.color_for(150000.0), "#888888".parse::<Color>().unwrap());
}

#[test]
fn invalid_configs_are_rejected() {
    // palette one color short
    let err = AppConfig::from_toml_str(
        r##"
[england]
domain = [1.0, 2.0]
colors = ["#ffffff", "#000000"]
"##,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("expected 3 colors"));

    assert!(AppConfig::from_toml_str("[england]\nzoom = 3\n").is_err());
    assert!(AppConfig::from_toml_str("[england]\ncolors = [\"blue\"]\n").is_err());
}

#[test]
fn load_from_file_reports_the_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[london]\nyear = \"2019\"").unwrap();
    let cfg = AppConfig::load_from_file(file.path()).unwrap();
    assert_eq!(cfg.london.year, "2019");

    let missing = std::env::temp_dir().join("hpmap_no_such_config.toml");
    let err = AppConfig::load_from_file(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("hpmap_no_such_config.toml"));
}
