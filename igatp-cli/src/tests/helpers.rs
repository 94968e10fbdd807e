//! Test helpers for writing dataset bundles into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use igatp_core::{Epsg, IndexRow, Resolution, TopicRow, test_support::square_layer};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn index_row(name: &str, group: &str, x: f64, y: f64, value: f64) -> IndexRow {
    IndexRow {
        name: name.to_owned(),
        category: "Attraction".to_owned(),
        thematic_group: group.to_owned(),
        cluster_id: Some(2),
        rating: Some(value),
        popularity: Some(value),
        sentiment: Some(value),
        latitude: Some(y),
        longitude: Some(x),
        ..IndexRow::default()
    }
}

/// Two municipalities side by side, one parish each, and three locations:
/// two in the western square and one in the eastern square.
pub(super) fn bundle_json() -> Value {
    json!({
        "datum": Epsg::WGS84,
        "index_rows": [
            index_row("Sé", "Culture", 0.5, 0.5, 0.8),
            index_row("Ribeira", "Leisure", 0.2, 0.7, 0.4),
            index_row("Foz", "Culture", 1.5, 0.5, 0.6),
            IndexRow { name: "Nowhere".to_owned(), ..IndexRow::default() },
        ],
        "topic_rows": [
            TopicRow { name: "Sé".to_owned(), category: "Attraction".to_owned(), dominant_topic: Some(1) },
        ],
        "municipalities": square_layer(
            Resolution::Municipality,
            &[("Porto", 0.0, 0.0, 1.0), ("Matosinhos", 1.0, 0.0, 1.0)],
        ),
        "parishes": square_layer(
            Resolution::Parish,
            &[("131201", 0.0, 0.0, 1.0), ("130801", 1.0, 0.0, 1.0)],
        ),
        "sentiment": [
            { "date": "2023-01-05", "polarity": 0.5 },
            { "date": "2023-01-20 10:00:00", "polarity": -0.1 },
            { "date": "not a date", "polarity": 0.9 },
        ],
    })
}

pub(super) fn write_bundle(root: &Utf8Path, bundle: &Value) -> Utf8PathBuf {
    let path = root.join("bundle.json");
    let payload = serde_json::to_string_pretty(bundle).expect("serialise bundle");
    write_utf8(&path, payload.as_bytes());
    path
}
