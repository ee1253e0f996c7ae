use std::io::Write;

use basket_widget::cli::{CliApp, Commands};
use basket_widget::models::ProductId;
use basket_widget::page::CatalogError;
use basket_widget::utils::Config;
use tempfile::NamedTempFile;

fn setup_app() -> (CliApp, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(
        br#"{"cards": [
            {"id": "1", "name": "Tea", "price": "2.5"},
            {"id": "2", "name": "Coffee", "price": "3.0"}
        ]}"#,
    )
    .expect("Failed to write catalog");

    let config = Config::default().with_catalog_path(file.path());
    let app = CliApp::new(config).expect("Failed to build app");
    (app, file)
}

#[test]
fn test_add_command_dispatches_clicks() {
    let (mut app, _file) = setup_app();
    app.run(Commands::Add {
        cards: vec![0, 0, 1],
        html: false,
    })
    .unwrap();

    let panel = app.widget().view();
    assert_eq!(panel.count_text(), "3");
    assert_eq!(panel.total_text(), "8.00");
    assert_eq!(panel.rows().len(), 2);
}

#[test]
fn test_add_command_rejects_unknown_card() {
    let (mut app, _file) = setup_app();
    let err = app
        .run(Commands::Add {
            cards: vec![0, 99],
            html: false,
        })
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::CardOutOfRange { index: 99, len: 2 })
    ));
    assert!(format!("{:#}", err).contains("Cannot add card #99"));
    assert!(app.widget().basket().is_empty());
    assert_eq!(app.widget().view().count_text(), "0");
}

#[test]
fn test_click_command_rejects_unparsable_target() {
    let (mut app, _file) = setup_app();
    let err = app
        .run(Commands::Click {
            targets: vec!["add,card:x".to_string()],
            html: false,
        })
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Cannot parse click target 'add,card:x'"));
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::InvalidTarget(_))
    ));
}

#[test]
fn test_click_command_keeps_raw_paths_lenient() {
    let (mut app, _file) = setup_app();
    app.run(Commands::Click {
        targets: vec![
            "plain,card:0".to_string(),
            "plain,add,card:1".to_string(),
            "add,card:7".to_string(),
        ],
        html: true,
    })
    .unwrap();

    let basket = app.widget().basket();
    assert_eq!(basket.len(), 2);
    assert!(basket.contains(&ProductId::from(2)));
    assert!(basket.contains(&ProductId::new(f64::NAN)));
    assert_eq!(app.widget().view().total_text(), "NaN");
}

#[test]
fn test_missing_catalog_fails_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_catalog_path(dir.path().join("missing.json"));
    let result = CliApp::new(config);
    assert!(result.is_err());
}
