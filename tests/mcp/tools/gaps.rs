use i18nboard::mcp::{
    I18nBoardMcpServer,
    types::{ListTranslationsParams, ScanGapsParams},
};
use insta::assert_json_snapshot;
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_two_languages};

// ============================================================================
// scan_gaps tests
// ============================================================================

#[tokio::test]
async fn test_scan_gaps_reports_both_maps() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .scan_gaps(Parameters(ScanGapsParams {
            project_root_path: fixture.root(),
            language: None,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_json_snapshot!(json_result, @r#"
    {
      "summary": {
        "missingTranslationCount": 1,
        "missingFieldCount": 1,
        "emptyFieldCount": 1,
        "affectedLanguages": [
          "es"
        ]
      },
      "missingTranslations": {
        "en": [],
        "es": [
          "auth"
        ]
      },
      "missingFields": {
        "en": {
          "common": {
            "missing": [],
            "empty": []
          }
        },
        "es": {
          "common": {
            "missing": [
              "body"
            ],
            "empty": [
              "nav.home"
            ]
          }
        }
      }
    }
    "#);
}

#[tokio::test]
async fn test_scan_gaps_filtered_by_language() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .scan_gaps(Parameters(ScanGapsParams {
            project_root_path: fixture.root(),
            language: Some("en".to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["summary"]["missingTranslationCount"], 0);
    assert!(json_result["missingTranslations"].get("es").is_none());
    assert_eq!(json_result["missingFields"]["en"]["common"]["missing"], json!([]));
}

#[tokio::test]
async fn test_scan_gaps_unknown_language() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let err = server
        .scan_gaps(Parameters(ScanGapsParams {
            project_root_path: fixture.root(),
            language: Some("fr".to_string()),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
}

#[tokio::test]
async fn test_scan_gaps_malformed_file() {
    let fixture = McpTestFixture::with_translations(vec![(
        "en",
        "common",
        json!({"title": "Hi", "nav": {"home": "Home"}}),
    )])
    .unwrap();
    fixture.write_raw("es", "common", "{not json").unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .scan_gaps(Parameters(ScanGapsParams {
            project_root_path: fixture.root(),
            language: None,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["missingFields"]["es"]["common"]["missing"],
        json!(["title", "nav.home"])
    );
    assert_eq!(json_result["missingFields"]["en"]["common"]["missing"], json!([]));
}

#[tokio::test]
async fn test_scan_gaps_empty_store() {
    let fixture = McpTestFixture::new().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .scan_gaps(Parameters(ScanGapsParams {
            project_root_path: fixture.root(),
            language: None,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["summary"]["affectedLanguages"], json!([]));
    assert_eq!(json_result["missingTranslations"], json!({}));
}

// ============================================================================
// list_translations tests
// ============================================================================

#[tokio::test]
async fn test_list_translations() {
    let fixture = fixture_two_languages().unwrap();
    fixture.write_raw("es", "broken", "{oops").unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .list_translations(Parameters(ListTranslationsParams {
            project_root_path: fixture.root(),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let languages = json_result["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 2);

    let en = &languages[0];
    assert_eq!(en["language"], "en");
    assert_eq!(en["files"][0]["name"], "auth");
    assert_eq!(en["files"][1]["name"], "common");
    assert_eq!(en["files"][1]["keyCount"], 3);
    assert_eq!(en["missingTranslations"], json!(["broken"]));

    let es = &languages[1];
    assert_eq!(es["missingTranslations"], json!(["auth"]));
    let broken = &es["files"][0];
    assert_eq!(broken["name"], "broken");
    assert_eq!(broken["validJson"], false);
    assert_eq!(broken["keyCount"], 0);
    let common = &es["files"][1];
    assert_eq!(common["missingFieldCount"], 1);
    assert_eq!(common["emptyFieldCount"], 1);
}
