mod common;

use bbs_loader::catalog::default_overrides;
use bbs_loader::load::{load_fifty_stops, load_meta_csv_file, load_meta_text_file};
use bbs_loader::schema::Overrides;
use common::TestWorkspace;
use rusqlite::Connection;

fn connection() -> Connection {
    Connection::open_in_memory().expect("open in-memory db")
}

#[test]
fn meta_text_file_loads_every_table_it_holds() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "RouteInf.txt",
        "Seq AOU\n\
         --- -----\n\
         6   01770\n\
         7   01760\n\
         \n\
         Code Label\n\
         ---- ------\n\
         1    Random\n",
    );

    let mut conn = connection();
    let loaded = load_meta_text_file(&mut conn, &path, &Overrides::new()).expect("load");
    assert_eq!(loaded, 2);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"RouteInf\"", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 2);

    let label: String = conn
        .query_row(
            "SELECT \"Label\" FROM \"RouteInf01\" WHERE \"Code\" = 1",
            [],
            |row| row.get(0),
        )
        .expect("select");
    assert_eq!(label, "Random");
}

#[test]
fn reloading_a_meta_text_file_is_tolerated() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("BCR.txt", "Code Name\n---- ------\n5    Shield\n");

    let mut conn = connection();
    load_meta_text_file(&mut conn, &path, &Overrides::new()).expect("first load");
    // Second pass re-adds every column; duplicates are warned and skipped,
    // rows append.
    load_meta_text_file(&mut conn, &path, &Overrides::new()).expect("second load");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"BCR\"", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 2);
}

#[test]
fn a_bad_table_aborts_the_whole_file() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "Broken.txt",
        "Good Table\n\
         ---- -----\n\
         1    2\n\
         \n\
         A-B A_B\n\
         --- ---\n\
         1   2\n",
    );

    let mut conn = connection();
    let err = load_meta_text_file(&mut conn, &path, &Overrides::new()).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate header"));

    // Nothing from the file was committed.
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 0);
}

#[test]
fn fifty_stop_files_fill_spread_and_gather_tables() {
    let workspace = TestWorkspace::new();
    let dir = workspace.path().join("fifty_stops");
    std::fs::create_dir(&dir).expect("create dir");

    let mut header = vec![
        "RouteDataID",
        "countrynum",
        "statenum",
        "Route",
        "RPID",
        "year",
        "AOU",
    ]
    .into_iter()
    .map(str::to_string)
    .collect::<Vec<_>>();
    header.extend((1..=50).map(|i| format!("Stop{i}")));
    let mut text = header.join(",");
    text.push('\n');
    let mut cells = vec!["1001", "840", "46", "102", "101", "1997", "2881"]
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    cells.extend((1..=50).map(|i| i.to_string()));
    text.push_str(&cells.join(","));
    text.push('\n');
    std::fs::write(dir.join("fifty1.csv"), text).expect("write csv");

    let mut conn = connection();
    load_fifty_stops(&mut conn, &dir).expect("load");

    let spread: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"fifty_stops\"", [], |row| row.get(0))
        .expect("count");
    assert_eq!(spread, 1);

    let gather: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"fifty_stops_gather\"", [], |row| {
            row.get(0)
        })
        .expect("count");
    assert_eq!(gather, 50);

    let count: i64 = conn
        .query_row(
            "SELECT \"Count\" FROM \"fifty_stops_gather\" WHERE \"Stop\" = 17",
            [],
            |row| row.get(0),
        )
        .expect("select");
    assert_eq!(count, 17);
}

#[test]
fn meta_csv_file_loads_with_overrides() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "Weather.csv",
        "RouteDataID,StartTime,EndTime\n1001,0605,1002\n",
    );

    let mut conn = connection();
    load_meta_csv_file(&mut conn, &path, &default_overrides()).expect("load");

    let start: String = conn
        .query_row("SELECT \"StartTime\" FROM \"Weather\"", [], |row| row.get(0))
        .expect("select");
    assert_eq!(start, "0605");
}
