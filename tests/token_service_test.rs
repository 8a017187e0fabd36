//! Integration tests for card tokenization

use serde_json::json;
use veritrans_gateway::payments::config::TokenConfig;
use veritrans_gateway::payments::{ClientCardInfo, GatewayError, GatewayHttpClient, TokenService};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_service(server: &MockServer) -> TokenService {
    TokenService::new(
        TokenConfig {
            api_url: format!("{}/4gtoken", server.uri()),
            api_token: "cd76ca65-7f54-4dec-8ba3-11c12e36a548".to_string(),
        },
        GatewayHttpClient::new().unwrap(),
    )
}

fn visa() -> ClientCardInfo {
    ClientCardInfo {
        card_number: "4111111111111111".to_string(),
        card_expire: "12/30".to_string(),
        security_code: "123".to_string(),
        card_holder_name: "TARO YAMADA".to_string(),
    }
}

#[tokio::test]
async fn test_card_token_is_issued() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/4gtoken"))
        .and(header("Content-Type", "application/json; charset=utf-8"))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({
            "card_number": "4111111111111111",
            "card_expire": "12/30",
            "security_code": "123",
            "cardholder_name": "TARO YAMADA",
            "token_api_key": "cd76ca65-7f54-4dec-8ba3-11c12e36a548",
            "lang": "ja"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "0a812412-682e-4c1b-a1c5-8a1a0ab3d4a5",
            "token_expire_date": "20261019153000",
            "req_card_number": "411111********11",
            "status": "success",
            "code": "success",
            "message": "Token generated successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = token_service(&server).get_card_token(&visa()).await.unwrap();
    assert_eq!(token, "0a812412-682e-4c1b-a1c5-8a1a0ab3d4a5");
}

#[tokio::test]
async fn test_rejected_card_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "failure",
            "code": "invalid_card_number",
            "message": "カード番号が不正です。"
        })))
        .mount(&server)
        .await;

    let err = token_service(&server)
        .get_card_token(&visa())
        .await
        .unwrap_err();

    match err {
        GatewayError::Rejected { message } => assert_eq!(message, "カード番号が不正です。"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_card_is_refused_without_calling_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = token_service(&server)
        .get_card_token(&ClientCardInfo::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Validation { .. }));
    assert_eq!(err.http_status_code(), 400);
}
