//! DB tests: schema, upsert modes, lookup, duplicate grouping and ordering.

use dupes::engine::{
    duplicates, load_record, lookup_exists, open_db, open_db_in_memory, record_count, upsert,
};
use dupes::{FileRecord, SortOrder, UpsertMode};

fn record(path: &str, digest: &str, size: u64, mtime: &str) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        digest_hex: digest.to_string(),
        size,
        last_modified: mtime.to_string(),
    }
}

const T0: &str = "2024-01-01 00:00:00";
const T1: &str = "2024-01-02 00:00:00";

#[test]
fn test_record_count_empty() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(record_count(&conn).unwrap(), 0);
}

#[test]
fn test_schema_columns_exact() {
    let conn = open_db_in_memory().unwrap();
    let mut stmt = conn.prepare("PRAGMA table_info(dupes)").unwrap();
    let cols: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        cols,
        vec![
            ("id".to_string(), "INTEGER".to_string()),
            ("path".to_string(), "TEXT".to_string()),
            ("digest".to_string(), "TEXT".to_string()),
            ("size".to_string(), "UNSIGNED INTEGER".to_string()),
            ("last_modified".to_string(), "TEXT".to_string()),
        ]
    );
}

#[test]
fn test_lookup_exists_after_upsert() {
    let conn = open_db_in_memory().unwrap();
    assert!(!lookup_exists(&conn, "/a").unwrap());
    assert!(upsert(&conn, &record("/a", "aa", 1, T0), UpsertMode::Ignore).unwrap());
    assert!(lookup_exists(&conn, "/a").unwrap());
    assert!(!lookup_exists(&conn, "/b").unwrap());
}

#[test]
fn test_upsert_ignore_first_write_wins() {
    let conn = open_db_in_memory().unwrap();
    assert!(upsert(&conn, &record("/a", "aa", 1, T0), UpsertMode::Ignore).unwrap());
    assert!(!upsert(&conn, &record("/a", "bb", 2, T1), UpsertMode::Ignore).unwrap());
    assert_eq!(
        load_record(&conn, "/a").unwrap(),
        Some(record("/a", "aa", 1, T0))
    );
    assert_eq!(record_count(&conn).unwrap(), 1);
}

#[test]
fn test_upsert_replace_overwrites() {
    let conn = open_db_in_memory().unwrap();
    upsert(&conn, &record("/a", "aa", 1, T0), UpsertMode::Ignore).unwrap();
    assert!(upsert(&conn, &record("/a", "bb", 2, T1), UpsertMode::Replace).unwrap());
    assert_eq!(
        load_record(&conn, "/a").unwrap(),
        Some(record("/a", "bb", 2, T1))
    );
    assert_eq!(record_count(&conn).unwrap(), 1);
}

#[test]
fn test_load_record_missing() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(load_record(&conn, "/nope").unwrap(), None);
}

#[test]
fn test_duplicates_empty_index() {
    let conn = open_db_in_memory().unwrap();
    assert!(duplicates(&conn, SortOrder::Size).unwrap().is_empty());
    assert!(duplicates(&conn, SortOrder::Count).unwrap().is_empty());
}

#[test]
fn test_duplicates_unique_digests_only() {
    let conn = open_db_in_memory().unwrap();
    upsert(&conn, &record("/a", "aa", 1, T0), UpsertMode::Ignore).unwrap();
    upsert(&conn, &record("/b", "bb", 1, T0), UpsertMode::Ignore).unwrap();
    assert!(duplicates(&conn, SortOrder::Size).unwrap().is_empty());
}

#[test]
fn test_duplicates_one_group_per_shared_digest() {
    let conn = open_db_in_memory().unwrap();
    for r in [
        record("/x1", "xx", 8, T0),
        record("/x2", "xx", 8, T0),
        record("/y1", "yy", 3, T0),
        record("/y2", "yy", 3, T0),
        record("/y3", "yy", 3, T0),
        record("/z", "zz", 100, T0),
    ] {
        upsert(&conn, &r, UpsertMode::Ignore).unwrap();
    }
    let groups = duplicates(&conn, SortOrder::Count).unwrap();
    assert_eq!(groups.len(), 2);

    let y = &groups[0];
    assert_eq!(y.digest_hex, "yy");
    assert_eq!(y.member_count, 3);
    assert_eq!(y.total_size, 9);
    let paths: Vec<&str> = y.members.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, ["/y1", "/y2", "/y3"]);

    let x = &groups[1];
    assert_eq!(x.digest_hex, "xx");
    assert_eq!(x.member_count, 2);
    assert_eq!(x.members.len(), 2);

    assert!(
        groups
            .iter()
            .flat_map(|g| &g.members)
            .all(|m| m.path != "/z")
    );
}

#[test]
fn test_duplicates_sort_by_size_vs_count() {
    let conn = open_db_in_memory().unwrap();
    // "big": 2 x 100 bytes = 200; "many": 3 x 10 bytes = 30
    for r in [
        record("/big1", "big", 100, T0),
        record("/big2", "big", 100, T0),
        record("/many1", "many", 10, T0),
        record("/many2", "many", 10, T0),
        record("/many3", "many", 10, T0),
    ] {
        upsert(&conn, &r, UpsertMode::Ignore).unwrap();
    }
    let by_size = duplicates(&conn, SortOrder::Size).unwrap();
    let by_count = duplicates(&conn, SortOrder::Count).unwrap();
    assert_eq!(by_size[0].digest_hex, "big");
    assert_eq!(by_size[0].total_size, 200);
    assert_eq!(by_count[0].digest_hex, "many");
    assert_eq!(by_count[0].member_count, 3);
}

#[test]
fn test_duplicates_ties_ordered_by_digest_then_mtime_then_path() {
    let conn = open_db_in_memory().unwrap();
    for r in [
        record("/b", "bbbb", 5, T0),
        record("/a", "bbbb", 5, T0),
        record("/newer", "aaaa", 5, T1),
        record("/zolder", "aaaa", 5, T0),
    ] {
        upsert(&conn, &r, UpsertMode::Ignore).unwrap();
    }
    let groups = duplicates(&conn, SortOrder::Size).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].digest_hex, "aaaa");
    assert_eq!(groups[0].members[0].path, "/zolder");
    assert_eq!(groups[0].members[1].path, "/newer");
    assert_eq!(groups[1].digest_hex, "bbbb");
    assert_eq!(groups[1].members[0].path, "/a");
    assert_eq!(groups[1].members[1].path, "/b");
}

#[test]
fn test_duplicates_order_is_repeatable() {
    let conn = open_db_in_memory().unwrap();
    for i in 0..20 {
        let digest = format!("d{}", i % 4);
        let path = format!("/f{:02}", (i * 7) % 20);
        upsert(&conn, &record(&path, &digest, i as u64, T0), UpsertMode::Ignore).unwrap();
    }
    for sort in [SortOrder::Size, SortOrder::Count] {
        let first = duplicates(&conn, sort).unwrap();
        let second = duplicates(&conn, sort).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_open_db_file_persists_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("dupes.db");
    {
        let conn = open_db(&db_path).unwrap();
        upsert(&conn, &record("/a", "aa", 1, T0), UpsertMode::Ignore).unwrap();
    }
    let conn = open_db(&db_path).unwrap();
    assert_eq!(record_count(&conn).unwrap(), 1);
    assert!(lookup_exists(&conn, "/a").unwrap());
}

#[test]
fn test_open_db_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("no").join("such").join("dupes.db");
    assert!(open_db(&db_path).is_err());
}
