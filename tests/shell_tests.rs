use chrono::{NaiveDate, NaiveDateTime};
use product_inventory::store::{self, count_products, find_by_name};
use product_inventory::{upsert, NewProduct, Shell, UpsertMode};
use rusqlite::Connection;
use std::io::Cursor;
use tempfile::TempDir;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 5, 17)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap()
}

fn seeded_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    store::init_schema(&conn).unwrap();
    let when = NaiveDate::from_ymd_opt(2018, 1, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    upsert(
        &conn,
        &NewProduct::new("Raisins - Golden", 43.0, 474, when),
        UpsertMode::Silent,
    )
    .unwrap();
    conn
}

/// Runs a scripted session and returns the connection plus everything printed.
fn run_session(conn: Connection, script: &str, backup: &std::path::Path) -> (Connection, String) {
    let mut shell = Shell::new(conn, Cursor::new(script.to_string()), Vec::new(), backup)
        .with_clock(fixed_now);
    shell.run().unwrap();
    let (conn, output) = shell.into_parts();
    (conn, String::from_utf8(output).unwrap())
}

#[test]
fn test_quit_prints_farewell() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_session(seeded_conn(), "q\n", &dir.path().join("backup.csv"));
    assert!(out.contains("What would you like to do?"));
    assert!(out.contains("Thank you for using the database program!"));
}

#[test]
fn test_unknown_option_shows_hint_and_menu_again() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_session(seeded_conn(), "x\nQ\n", &dir.path().join("backup.csv"));
    assert!(out.contains("Please enter V, A, B or Q."));
    assert_eq!(out.matches("What would you like to do?").count(), 2);
}

#[test]
fn test_end_of_input_leaves_menu() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_session(seeded_conn(), "", &dir.path().join("backup.csv"));
    assert!(!out.contains("Thank you"));
}

#[test]
fn test_view_reprompts_until_valid() {
    let dir = TempDir::new().unwrap();
    let (_, out) = run_session(
        seeded_conn(),
        "v\nabc\n5\n0\n-1\nq\n",
        &dir.path().join("backup.csv"),
    );
    assert!(out.contains("Please type a whole number."));
    assert!(out.contains("ID number too high."));
    assert!(out.contains("ID numbers start at 1."));
    assert!(out.contains("Item ID 1:\nRaisins - Golden\nIn stock:\t\t43\nPrice:\t\t\t$4.74"));
    assert!(out.contains("Record last updated:\t01/20/2018"));
}

#[test]
fn test_add_new_product_reports_position() {
    let dir = TempDir::new().unwrap();
    let (conn, out) = run_session(
        seeded_conn(),
        "a\nbaby spinach\n2.5\n-199\nq\n",
        &dir.path().join("backup.csv"),
    );

    assert!(out.contains("Product stored with ID number 2"));
    let spinach = find_by_name(&conn, "Baby Spinach").unwrap().unwrap();
    assert_eq!(spinach.quantity, 2.5);
    assert_eq!(spinach.price_cents, 199);
    assert_eq!(spinach.updated_at, fixed_now());
}

#[test]
fn test_add_invalid_entries_are_rejected() {
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("backup.csv");

    for script in ["a\n\nq\n", "a\nTea\nplenty\nq\n", "a\nTea\n1\n$1.23\nq\n"] {
        let (conn, out) = run_session(seeded_conn(), script, &backup);
        assert!(out.contains("Invalid entry."), "script {script:?} should be rejected");
        assert_eq!(count_products(&conn).unwrap(), 1);
    }
}

#[test]
fn test_add_existing_name_overwrites_on_yes() {
    let dir = TempDir::new().unwrap();
    let (conn, out) = run_session(
        seeded_conn(),
        "a\nraisins - golden\n10\n500\ny\nq\n",
        &dir.path().join("backup.csv"),
    );

    assert!(out.contains("Record already exists. Overwrite existing record? (ID: 1)"));
    assert!(out.contains("Record overwritten."));
    let raisins = find_by_name(&conn, "Raisins - Golden").unwrap().unwrap();
    assert_eq!(raisins.id, 1);
    assert_eq!(raisins.quantity, 10.0);
    assert_eq!(raisins.price_cents, 500);
}

#[test]
fn test_add_existing_name_blank_answer_counts_as_yes() {
    let dir = TempDir::new().unwrap();
    let (conn, _) = run_session(
        seeded_conn(),
        "a\nRaisins - Golden\n10\n500\n\nq\n",
        &dir.path().join("backup.csv"),
    );
    assert_eq!(
        find_by_name(&conn, "Raisins - Golden")
            .unwrap()
            .unwrap()
            .price_cents,
        500
    );
}

#[test]
fn test_add_existing_name_kept_on_no() {
    let dir = TempDir::new().unwrap();
    let (conn, out) = run_session(
        seeded_conn(),
        "a\nRaisins - Golden\n10\n500\n N \nq\n",
        &dir.path().join("backup.csv"),
    );

    assert!(!out.contains("Record overwritten."));
    let raisins = find_by_name(&conn, "Raisins - Golden").unwrap().unwrap();
    assert_eq!(raisins.price_cents, 474);
    assert_eq!(count_products(&conn).unwrap(), 1);
}

#[test]
fn test_backup_writes_file() {
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("backup.csv");
    let (_, out) = run_session(seeded_conn(), "b\nq\n", &backup);

    assert!(out.contains("Backup successful. File name:"));
    let content = std::fs::read_to_string(&backup).unwrap();
    assert!(content.starts_with("product_id,product_name,product_quantity,product_price,date_updated"));
    assert!(content.contains("Raisins - Golden"));
}

#[test]
fn test_backup_failure_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("missing_dir").join("backup.csv");
    let (_, out) = run_session(seeded_conn(), "b\nq\n", &backup);

    assert!(out.contains("Backup failed:"));
    assert!(out.contains("Thank you"));
}
