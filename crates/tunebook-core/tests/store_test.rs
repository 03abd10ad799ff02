//! On-disk behaviour of the tune store.

use tempfile::TempDir;
use tunebook_core::{Database, NewTune, TuneId};

fn tune(book: i64, reference: &str, title: &str) -> NewTune {
    let mut tune = NewTune::new(book, "book.abc", reference);
    tune.title = Some(title.to_string());
    tune.body = format!("X:{reference}\nT:{title}");
    tune
}

#[test]
fn test_open_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("dir").join("tunes.db");

    let db = Database::open(&db_path).expect("Failed to open database");
    assert!(db_path.exists());
    assert_eq!(db.count_tunes().unwrap(), 0);
}

#[test]
fn test_rows_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("tunes.db");

    {
        let mut db = Database::open(&db_path).unwrap();
        db.insert_many(&[tune(1, "1", "Kesh"), tune(1, "2", "Butterfly")])
            .unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    let tunes = db.load_all().unwrap();
    assert_eq!(tunes.len(), 2);
    assert_eq!(tunes[0].title.as_deref(), Some("Kesh"));
    assert_eq!(tunes[1].id, TuneId::new(2));
}

#[test]
fn test_reset_on_disk_discards_previous_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("tunes.db");

    let mut db = Database::open(&db_path).unwrap();
    db.insert_many(&[tune(2, "9", "Morrison's")]).unwrap();
    db.initialize(true).unwrap();
    drop(db);

    let db = Database::open(&db_path).unwrap();
    assert!(db.load_all().unwrap().is_empty());
}

#[test]
fn test_round_trip_preserves_content() {
    let mut db = Database::open_in_memory().unwrap();
    let mut parsed = vec![tune(3, "1", "The Blackbird"), tune(3, "2", "Another")];
    parsed[0].rhythm = Some("Jig".to_string());
    parsed[0].key = Some("D".to_string());
    parsed[1].meter = Some("6/8".to_string());

    db.insert_many(&parsed).unwrap();
    let loaded = db.load_all().unwrap();

    assert_eq!(loaded.len(), parsed.len());
    for (stored, original) in loaded.iter().zip(&parsed) {
        assert_eq!(stored.title, original.title);
        assert_eq!(stored.rhythm, original.rhythm);
        assert_eq!(stored.meter, original.meter);
        assert_eq!(stored.key, original.key);
        assert_eq!(stored.body, original.body);
        assert_eq!(stored.book, original.book);
    }
}
