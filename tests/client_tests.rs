use std::collections::HashMap;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

use return_notification_service::{
    clients::{
        directory::{Directory, DirectoryClient},
        localization::{LocalizationClient, Localizer},
        messaging::{DispatchContext, MessagingGateway, MessagingGatewayClient},
        sms::{SmsManager, SmsManagerClient},
    },
    config::Config,
    models::{entities::ContractorKind, message::OutboundMessage, template::TemplateData},
};

fn config_for(uri: &str) -> Config {
    Config {
        directory_service_url: uri.to_string(),
        localization_service_url: uri.to_string(),
        messaging_gateway_url: uri.to_string(),
        sms_gateway_url: uri.to_string(),
        server_port: 0,
    }
}

fn template() -> TemplateData {
    TemplateData {
        complaint_id: 301,
        complaint_number: "RK/2026/301".to_string(),
        creator_id: 11,
        creator_name: "Anna Kowalska".to_string(),
        expert_id: 12,
        expert_name: "Piotr Wisniewski".to_string(),
        client_id: 21,
        client_name: "Jan Nowak".to_string(),
        consumption_id: 44,
        consumption_number: "ZU/2026/44".to_string(),
        agreement_number: "UM/2026/9".to_string(),
        date: "2026-08-27".to_string(),
        differences: "status changed".to_string(),
    }
}

/// Test: a known contractor is fetched and parsed from the directory
#[tokio::test]
async fn test_directory_finds_contractor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/contractors/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21,
            "type": "customer",
            "sellerId": 7,
            "name": "ACME",
            "firstName": "Jan",
            "lastName": "Nowak",
            "email": "jan@acme.example",
            "mobile": null
        })))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&config_for(&server.uri())).unwrap();
    let contractor = client.find_contractor_by_id(21).await.unwrap().unwrap();

    assert_eq!(contractor.kind, ContractorKind::Customer);
    assert_eq!(contractor.seller_id, 7);
    assert_eq!(contractor.email.as_deref(), Some("jan@acme.example"));
    assert_eq!(contractor.mobile, None);
    assert_eq!(contractor.full_name(), "Jan Nowak");
}

/// Test: a 404 from the directory maps to an absent entity
#[tokio::test]
async fn test_directory_maps_404_to_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sellers/8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&config_for(&server.uri())).unwrap();
    assert!(client.find_seller_by_id(8).await.unwrap().is_none());
}

/// Test: a directory server error is an error, not an absence
#[tokio::test]
async fn test_directory_propagates_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/employees/11"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&config_for(&server.uri())).unwrap();
    assert!(client.find_employee_by_id(11).await.is_err());
}

/// Test: translation posts the key, params and reseller id
#[tokio::test]
async fn test_localization_translate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/translations"))
        .and(body_partial_json(json!({
            "templateKey": "return.employee.subject",
            "resellerId": 7
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "text": "Complaint RK/2026/301" })),
        )
        .mount(&server)
        .await;

    let client = LocalizationClient::new(&config_for(&server.uri())).unwrap();
    let mut params = HashMap::new();
    params.insert("COMPLAINT_NUMBER".to_string(), json!("RK/2026/301"));

    let text = client
        .translate("return.employee.subject", &params, 7)
        .await
        .unwrap();
    assert_eq!(text, "Complaint RK/2026/301");
}

/// Test: status names are fetched per code
#[tokio::test]
async fn test_localization_status_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/return-statuses/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "resolved" })))
        .mount(&server)
        .await;

    let client = LocalizationClient::new(&config_for(&server.uri())).unwrap();
    assert_eq!(client.status_name_for(3).await.unwrap(), "resolved");
}

/// Test: an unconfigured from-address comes back empty instead of failing
#[tokio::test]
async fn test_gateway_missing_from_address_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/resellers/7/from-address"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = MessagingGatewayClient::new(&config_for(&server.uri())).unwrap();
    assert_eq!(client.reseller_from_address(7).await.unwrap(), "");
}

/// Test: the permitted list is scoped by the event query parameter
#[tokio::test]
async fn test_gateway_permitted_emails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/resellers/7/permitted-emails"))
        .and(query_param("event", "goods-return"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "emails": ["anna@reseller.example", "piotr@reseller.example"]
        })))
        .mount(&server)
        .await;

    let client = MessagingGatewayClient::new(&config_for(&server.uri())).unwrap();
    let emails = client.permitted_employee_emails(7, "goods-return").await.unwrap();
    assert_eq!(emails.len(), 2);
}

/// Test: dispatch posts the messages with their event kind and context
#[tokio::test]
async fn test_gateway_dispatch_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/dispatch"))
        .and(body_partial_json(json!({
            "resellerId": 7,
            "eventKind": "change-return-status",
            "context": { "clientId": 21, "statusCode": 3 }
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = MessagingGatewayClient::new(&config_for(&server.uri())).unwrap();
    let message = OutboundMessage::new(
        "jan@acme.example".to_string(),
        "complaints@reseller.example".to_string(),
        "subject".to_string(),
        "body".to_string(),
    );
    let context = DispatchContext {
        client_id: 21,
        status_code: 3,
    };

    client
        .dispatch_messages(&[message], 7, "change-return-status", Some(context))
        .await
        .unwrap();
}

/// Test: a rejected dispatch surfaces as an error
#[tokio::test]
async fn test_gateway_dispatch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/messages/dispatch"))
        .respond_with(ResponseTemplate::new(502).set_body_string("relay down"))
        .mount(&server)
        .await;

    let client = MessagingGatewayClient::new(&config_for(&server.uri())).unwrap();
    let message = OutboundMessage::new(
        "anna@reseller.example".to_string(),
        "complaints@reseller.example".to_string(),
        "subject".to_string(),
        "body".to_string(),
    );

    let error = client
        .dispatch_messages(&[message], 7, "change-return-status", None)
        .await
        .unwrap_err();
    assert!(error.to_string().contains("relay down"));
}

/// Test: the SMS manager's in-band outcome is parsed as-is
#[tokio::test]
async fn test_sms_manager_reports_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notifications/client"))
        .and(body_partial_json(json!({
            "resellerId": 7,
            "clientId": 21,
            "eventKind": "change-return-status",
            "statusCode": 3,
            "template": { "COMPLAINT_NUMBER": "RK/2026/301" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sent": false,
            "error": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let client = SmsManagerClient::new(&config_for(&server.uri())).unwrap();
    let dispatch = client
        .send_client_notification(7, 21, "change-return-status", 3, &template())
        .await
        .unwrap();

    assert!(!dispatch.sent);
    assert_eq!(dispatch.error.as_deref(), Some("quota exceeded"));
}

/// Test: a missing error field parses as no error
#[tokio::test]
async fn test_sms_manager_error_field_optional() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/notifications/client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sent": true })))
        .mount(&server)
        .await;

    let client = SmsManagerClient::new(&config_for(&server.uri())).unwrap();
    let dispatch = client
        .send_client_notification(7, 21, "change-return-status", 3, &template())
        .await
        .unwrap();

    assert!(dispatch.sent);
    assert_eq!(dispatch.error, None);
}
