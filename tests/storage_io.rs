use house_price_maps::{JoinedRow, storage};
use std::fs;
use std::path::PathBuf;

fn sample() -> Vec<JoinedRow> {
    vec![
        JoinedRow {
            name: "Hackney".into(),
            price: Some(550000.0),
            color: "#9ecae1".into(),
        },
        JoinedRow {
            name: "+SUM(A1:A9)".into(),
            price: None,
            color: "#cccccc".into(),
        },
    ]
}

#[test]
fn save_csv_and_json() {
    let rows = sample();
    let tmp = std::env::temp_dir();

    let csv_path: PathBuf = tmp.join("hpmap_rs_test.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("name,price,color"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.contains("'+SUM(A1:A9),,#cccccc"));
    fs::remove_file(&csv_path).ok();

    let json_path: PathBuf = tmp.join("hpmap_rs_test.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
    // JSON keeps the name verbatim
    assert_eq!(v[1]["name"], "+SUM(A1:A9)");
    assert!(v[1]["price"].is_null());
    fs::remove_file(&json_path).ok();
}
