use chrono::NaiveDate;
use cronograma::io::{self, file::SNAPSHOT_VERSION};
use cronograma::{run, Error, PipelineOptions};

const CSV: &str = "ID;Nome da tarefa;% Complete;Finish;Baseline Finish\n\
                   0;Parada;40%;2025-01-11;2025-01-11\n\
                   1;    Refratário do forno;80%;2025-01-05;2025-01-06\n\
                   2;    Trilho de rolamento;0%;2025-01-09;2025-01-09\n";

fn schedule() -> cronograma::Schedule {
    let options = PipelineOptions::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    run(CSV, &options).unwrap().with_source("parada.csv")
}

#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cronograma.json");
    let original = schedule();

    assert!(!io::snapshot_exists(&path));
    io::save_snapshot(&original, &path).unwrap();
    assert!(io::snapshot_exists(&path));

    let loaded = io::load_snapshot(&path).unwrap();
    assert_eq!(loaded.categories, original.categories);
    assert_eq!(loaded.summary, original.summary);
    assert_eq!(loaded.forest, original.forest);
    assert_eq!(loaded.source_file.as_deref(), Some("parada.csv"));

    let info = io::snapshot_info(&path).unwrap();
    assert_eq!(info.version, SNAPSHOT_VERSION);
    assert_eq!(info.source_file.as_deref(), Some("parada.csv"));
    assert_eq!(info.imported_at, original.imported_at);
}

#[test]
fn other_versions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cronograma.json");
    io::save_snapshot(&schedule(), &path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let bumped = json.replacen(
        &format!("\"version\": \"{SNAPSHOT_VERSION}\""),
        "\"version\": \"0.9\"",
        1,
    );
    std::fs::write(&path, bumped).unwrap();

    assert!(matches!(
        io::load_snapshot(&path),
        Err(Error::SnapshotVersion { .. })
    ));
    assert!(!io::snapshot_exists(&path));
}

#[test]
fn missing_snapshot_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(io::load_snapshot(&path), Err(Error::NoSnapshot(_))));
    assert!(matches!(io::snapshot_info(&path), Err(Error::NoSnapshot(_))));
    // Clearing nothing is fine.
    io::clear_snapshot(&path).unwrap();

    io::save_snapshot(&schedule(), &path).unwrap();
    io::clear_snapshot(&path).unwrap();
    assert!(!path.exists());
}
