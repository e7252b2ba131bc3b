use std::collections::BTreeMap;

use i18nboard::mcp::{
    I18nBoardMcpServer,
    types::{
        AddFieldParams, CreateTranslationParams, GenerateTranslationParams,
        RenameTranslationParams, TranslationParams, UpdateTranslationsParams,
    },
};
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json, fixture_two_languages};

fn target(fixture: &McpTestFixture, language: &str, name: &str) -> Parameters<TranslationParams> {
    Parameters(TranslationParams {
        project_root_path: fixture.root(),
        language: language.to_string(),
        name: name.to_string(),
    })
}

// ============================================================================
// get_translation tests
// ============================================================================

#[tokio::test]
async fn test_get_translation() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .get_translation(target(&fixture, "en", "auth"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["language"], "en");
    assert_eq!(json_result["name"], "auth");
    assert_eq!(json_result["content"], "{\n  \"login\": \"Log in\"\n}");
}

#[tokio::test]
async fn test_get_translation_not_found() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let err = server
        .get_translation(target(&fixture, "es", "auth"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
}

// ============================================================================
// create / delete / rename tests
// ============================================================================

#[tokio::test]
async fn test_create_translation() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .create_translation(Parameters(CreateTranslationParams {
            project_root_path: fixture.root(),
            language: "es".to_string(),
            name: "auth".to_string(),
            content: Some(r#"{"login":"Entrar"}"#.to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["content"], "{\n  \"login\": \"Entrar\"\n}");
    assert_eq!(
        fixture.read_translation("es", "auth").unwrap(),
        json!({"login": "Entrar"})
    );
}

#[tokio::test]
async fn test_create_translation_defaults_to_empty_object() {
    let fixture = McpTestFixture::new().unwrap();
    let server = I18nBoardMcpServer::new();

    server
        .create_translation(Parameters(CreateTranslationParams {
            project_root_path: fixture.root(),
            language: "fr".to_string(),
            name: "home".to_string(),
            content: None,
        }))
        .await
        .unwrap();

    assert_eq!(fixture.read_translation("fr", "home").unwrap(), json!({}));
}

#[tokio::test]
async fn test_create_translation_collision() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let err = server
        .create_translation(Parameters(CreateTranslationParams {
            project_root_path: fixture.root(),
            language: "en".to_string(),
            name: "common".to_string(),
            content: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(
        fixture.read_translation("en", "common").unwrap()["title"],
        "Hi"
    );
}

#[tokio::test]
async fn test_create_translation_rejects_path_segments() {
    let fixture = McpTestFixture::new().unwrap();
    let server = I18nBoardMcpServer::new();

    let err = server
        .create_translation(Parameters(CreateTranslationParams {
            project_root_path: fixture.root(),
            language: "en".to_string(),
            name: "../escape".to_string(),
            content: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn test_delete_translation() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .delete_translation(target(&fixture, "en", "auth"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["keys"], json!([{"language": "en", "name": "auth"}]));
    assert!(!fixture.translation_exists("en", "auth"));
}

#[tokio::test]
async fn test_delete_missing_translation_succeeds() {
    let fixture = McpTestFixture::new().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .delete_translation(target(&fixture, "en", "nothing"))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&result)["success"], true);
}

#[tokio::test]
async fn test_rename_translation() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    server
        .rename_translation(Parameters(RenameTranslationParams {
            project_root_path: fixture.root(),
            language: "en".to_string(),
            from: "auth".to_string(),
            to: "login".to_string(),
        }))
        .await
        .unwrap();

    assert!(!fixture.translation_exists("en", "auth"));
    assert_eq!(
        fixture.read_translation("en", "login").unwrap(),
        json!({"login": "Log in"})
    );
}

#[tokio::test]
async fn test_rename_translation_errors() {
    let fixture = fixture_two_languages().unwrap();
    fixture
        .write_translation("en", "taken", &json!({}))
        .unwrap();
    let server = I18nBoardMcpServer::new();

    let rename = |from: &str, to: &str| {
        Parameters(RenameTranslationParams {
            project_root_path: fixture.root(),
            language: "en".to_string(),
            from: from.to_string(),
            to: to.to_string(),
        })
    };

    let err = server
        .rename_translation(rename("missing", "other"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);

    let err = server
        .rename_translation(rename("auth", "taken"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(fixture.translation_exists("en", "auth"));
}

// ============================================================================
// update_translations tests
// ============================================================================

#[tokio::test]
async fn test_update_translations() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let mut translations = BTreeMap::new();
    translations.insert(
        "es".to_string(),
        BTreeMap::from([
            ("auth".to_string(), r#"{"login":"Entrar"}"#.to_string()),
            (
                "common".to_string(),
                r#"{"title":"Hola","body":"Texto","nav":{"home":"Inicio"}}"#.to_string(),
            ),
        ]),
    );

    let result = server
        .update_translations(Parameters(UpdateTranslationsParams {
            project_root_path: fixture.root(),
            translations,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["keys"].as_array().unwrap().len(), 2);
    assert_eq!(
        fixture.read_translation("es", "common").unwrap()["nav"]["home"],
        "Inicio"
    );
    assert_eq!(
        fixture.read_translation("es", "auth").unwrap(),
        json!({"login": "Entrar"})
    );
}

// ============================================================================
// add_field tests
// ============================================================================

#[tokio::test]
async fn test_add_field() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .add_field(Parameters(AddFieldParams {
            project_root_path: fixture.root(),
            language: "es".to_string(),
            name: "common".to_string(),
            field: "body".to_string(),
            value: Some(json!("Texto")),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["action"], "added");

    let stored = fixture.read_translation("es", "common").unwrap();
    assert_eq!(stored["body"], "Texto");
    assert_eq!(stored["title"], "Hola");
}

#[tokio::test]
async fn test_add_field_existing_is_kept() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let result = server
        .add_field(Parameters(AddFieldParams {
            project_root_path: fixture.root(),
            language: "es".to_string(),
            name: "common".to_string(),
            field: "title".to_string(),
            value: None,
        }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&result)["action"], "alreadyPresent");
    assert_eq!(
        fixture.read_translation("es", "common").unwrap()["title"],
        "Hola"
    );
}

#[tokio::test]
async fn test_add_field_conflict() {
    let fixture = fixture_two_languages().unwrap();
    let server = I18nBoardMcpServer::new();

    let err = server
        .add_field(Parameters(AddFieldParams {
            project_root_path: fixture.root(),
            language: "es".to_string(),
            name: "common".to_string(),
            field: "title.short".to_string(),
            value: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

// ============================================================================
// generate_translation tests
// ============================================================================

#[tokio::test]
async fn test_generate_rejects_existing_target() {
    let fixture = fixture_two_languages().unwrap();
    fixture
        .write_config(&json!({ "storeRoot": "translations", "ai": { "apiKey": "sk-test" } }))
        .unwrap();
    let server = I18nBoardMcpServer::new();

    let err = server
        .generate_translation(Parameters(GenerateTranslationParams {
            project_root_path: fixture.root(),
            source_language: "en".to_string(),
            name: "common".to_string(),
            target_language: "es".to_string(),
            context: None,
            translate_keys: None,
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}
