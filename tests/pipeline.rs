//! End-to-end runs against a mock results endpoint
//!
//! Each test starts a wiremock server, runs a [`Collector`] over a handful of
//! roll numbers, and inspects the spreadsheet, error log, and encrypted bundle.

mod common;

use common::{
    EMPTY_RECORD_BODY, TEST_PASSWORD, decrypt_entry, mount_record, mount_status, student_body,
    test_config, with_bom, xlsx_part,
};
use rollno_dl::error::{ArchiveError, Error};
use rollno_dl::identifiers::parse_list;
use rollno_dl::logging::{error_log_layer, open_error_log};
use rollno_dl::{Collector, Event, IdentifierSource};
use tracing_subscriber::layer::SubscriberExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a mixed set of responses for roll numbers 1001..=1005
async fn mixed_server() -> MockServer {
    let server = MockServer::start().await;
    mount_record(&server, "1001", student_body("1001", "Asha", 8.4)).await;
    mount_record(&server, "1002", EMPTY_RECORD_BODY).await;
    mount_status(&server, "1003", 503).await;
    mount_record(
        &server,
        "1004",
        r#"{"HTML":{"sgpa":7.1,"name":"Ravi","rollNo":"1004","remarks":"late fee"}}"#,
    )
    .await;
    mount_record(&server, "1005", with_bom(&student_body("1005", "Meera", 9.2))).await;
    server
}

#[tokio::test]
async fn test_full_run_produces_table_and_bundle() {
    let server = mixed_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, &dir, IdentifierSource::Range { lo: 1001, hi: 1005 });
    let output = config.output.clone();

    let summary = Collector::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.absent, 2);
    assert_eq!(summary.table_path, output.table_path);
    assert_eq!(summary.archive_path, output.archive_path);
    assert!(output.table_path.exists());
    assert!(output.error_log_path.exists());

    let mut names = common::entry_names(&output.archive_path);
    names.sort();
    assert_eq!(names, vec!["error_log.txt", "student_data.xlsx"]);

    let bundled_table = decrypt_entry(&output.archive_path, "student_data.xlsx", TEST_PASSWORD);
    assert_eq!(bundled_table, std::fs::read(&output.table_path).unwrap());
}

#[tokio::test]
async fn test_header_follows_first_record_and_drops_extras() {
    let server = mixed_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, &dir, IdentifierSource::Range { lo: 1001, hi: 1005 });
    let table_path = config.output.table_path.clone();

    Collector::new(config).unwrap().run().await.unwrap();

    let strings = xlsx_part(&table_path, "xl/sharedStrings.xml");
    for expected in ["rollNo", "name", "branch", "sgpa", "Asha", "Ravi", "Meera"] {
        assert!(strings.contains(expected), "missing {expected}");
    }
    // 1004 carries a field the first record did not have
    assert!(!strings.contains("remarks"));
    assert!(!strings.contains("late fee"));

    let workbook = xlsx_part(&table_path, "xl/workbook.xml");
    assert!(workbook.contains("Student Data"));
}

#[tokio::test]
async fn test_failed_lookups_go_to_error_log() {
    let server = mixed_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, &dir, IdentifierSource::Range { lo: 1001, hi: 1005 });
    let output = config.output.clone();

    let log_file = open_error_log(&output.error_log_path).unwrap();
    let subscriber = tracing_subscriber::registry().with(error_log_layer(log_file));
    let _guard = tracing::subscriber::set_default(subscriber);

    Collector::new(config).unwrap().run().await.unwrap();

    let log = std::fs::read_to_string(&output.error_log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected log: {log}");

    let warning = lines.iter().find(|l| l.contains(" - WARN - ")).unwrap();
    assert!(warning.contains("1002"));
    let error = lines.iter().find(|l| l.contains(" - ERROR - ")).unwrap();
    assert!(error.contains("1003"));

    let bundled_log = decrypt_entry(&output.archive_path, "error_log.txt", TEST_PASSWORD);
    assert_eq!(String::from_utf8(bundled_log).unwrap(), log);
}

#[tokio::test]
async fn test_events_are_broadcast() {
    let server = mixed_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, &dir, IdentifierSource::Range { lo: 1001, hi: 1005 });

    let collector = Collector::new(config).unwrap();
    let mut events = collector.subscribe();
    collector.run().await.unwrap();

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }

    assert_eq!(received.first(), Some(&Event::FetchStarted { total: 5 }));
    let progress = received
        .iter()
        .filter(|e| matches!(e, Event::Progress { .. }))
        .count();
    assert_eq!(progress, 5);
    assert!(received.contains(&Event::FetchComplete {
        succeeded: 3,
        absent: 2
    }));
    assert!(
        received
            .iter()
            .any(|e| matches!(e, Event::TableWritten { rows: 3, .. }))
    );
    assert!(matches!(received.last(), Some(Event::Archived { .. })));
}

#[tokio::test]
async fn test_explicit_list_run() {
    let server = MockServer::start().await;
    mount_record(&server, "2100290100", student_body("2100290100", "Asha", 8.0)).await;
    mount_record(&server, "2100290107", student_body("2100290107", "Kabir", 6.5)).await;

    let dir = tempfile::tempdir().unwrap();
    let ids = parse_list("2100290100\n2100290107\n2100290999").unwrap();
    let config = test_config(&server, &dir, IdentifierSource::List(ids));

    let summary = Collector::new(config).unwrap().run().await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
}

#[tokio::test]
async fn test_no_successes_still_bundles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_RECORD_BODY))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, &dir, IdentifierSource::Range { lo: 1, hi: 4 });
    let output = config.output.clone();

    let summary = Collector::new(config).unwrap().run().await.unwrap();
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.absent, 4);
    assert!(output.archive_path.exists());
}

#[tokio::test]
async fn test_empty_password_fails_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&server, &dir, IdentifierSource::Range { lo: 1, hi: 3 });
    config.archive_password = String::new();
    let archive_path = config.output.archive_path.clone();

    let err = Collector::new(config).unwrap().run().await.unwrap_err();
    assert!(matches!(err, Error::Archive(ArchiveError::EmptyPassword)));
    assert!(!archive_path.exists());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut config = test_config(&server, &dir, IdentifierSource::Range { lo: 1, hi: 3 });
    config.max_in_flight = 0;
    assert!(matches!(Collector::new(config), Err(Error::Config { .. })));

    let config = test_config(&server, &dir, IdentifierSource::Range { lo: 3, hi: 1 });
    let err = Collector::new(config).unwrap().run().await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
