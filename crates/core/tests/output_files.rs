//! End-to-end checks: control text -> ensemble -> file on disk

use parcel_init_core::{
    generate, output::BINARY_MAGIC, write_atm, AtmFormat, ControlFile, ParcelEnsemble, SweepSpec,
};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("parcel_init_{name}_{}", std::process::id()))
}

fn build(text: &str) -> (ParcelEnsemble, AtmFormat) {
    let ctl = ControlFile::parse(text).unwrap();
    let spec = SweepSpec::from_control(&ctl).unwrap();
    (generate(&spec).unwrap(), AtmFormat::from_control(&ctl).unwrap())
}

#[test]
fn test_ascii_file_rows_follow_sweep_order() {
    let (ensemble, format) = build(
        "INIT_T0 = 0\nINIT_T1 = 60\nINIT_DT = 60\n\
         INIT_LAT0 = 10\nINIT_LAT1 = 20\nINIT_DLAT = 10\nINIT_REP = 2\n",
    );
    assert_eq!(format, AtmFormat::Ascii);

    let path = temp_path("ascii.tab");
    write_atm(&path, &ensemble, format).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    let rows: Vec<Vec<&str>> = text
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(rows.len(), 8);

    let expected_lat = ["10", "10", "20", "20", "10", "10", "20", "20"];
    for (row, lat) in rows.iter().zip(expected_lat) {
        assert_eq!(row.len(), 4);
        assert_eq!(row[3], lat);
    }
    assert_eq!(rows[0][0], "0.00");
    assert_eq!(rows[7][0], "60.00");

    // One blank line after the header and one at the time change
    assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 2);
}

#[test]
fn test_binary_file_with_mass() {
    let (ensemble, format) = build(
        "ATM_TYPE = 1\nINIT_REP = 5\nINIT_MASS = 50\nNQ = 1\nQNT_NAME[0] = m\n",
    );
    assert_eq!(format, AtmFormat::Binary);

    let path = temp_path("binary.bin");
    write_atm(&path, &ensemble, format).unwrap();
    let bytes = fs::read(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(&bytes[..4], BINARY_MAGIC);
    assert_eq!(bytes.len(), 20 + 5 * 5 * 8);
    let last = f64::from_le_bytes(bytes[bytes.len() - 8..].try_into().unwrap());
    assert_eq!(last, 10.0);
}

#[test]
fn test_json_file_reloads() {
    let (ensemble, format) = build("ATM_TYPE = 2\nINIT_ULAT = 30\nINIT_REP = 10\nINIT_SEED = 4\n");
    assert_eq!(format, AtmFormat::Json);

    let path = temp_path("ensemble.json");
    write_atm(&path, &ensemble, format).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    let reloaded: ParcelEnsemble = serde_json::from_str(&text).unwrap();
    assert_eq!(reloaded, ensemble);
}
