use httpmock::prelude::*;
use rentcast::{ApiKey, RentcastClient, RentcastTools, SERVER_NAME};
use rmcp::model::{CallToolRequestParams, ErrorCode};
use rmcp::{ServiceError, ServiceExt};
use serde_json::{Map, Value, json};

const KEY: &str = "0123456789abcdef0123456789abcdef";

fn tools_for(server: &MockServer) -> RentcastTools {
    let key = ApiKey::parse(KEY).unwrap();
    let client = RentcastClient::builder(key)
        .base_url(server.url("/v1"))
        .build()
        .unwrap();
    RentcastTools::new(client)
}

fn params(name: &'static str, arguments: Value) -> CallToolRequestParams {
    let arguments = match arguments {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    CallToolRequestParams {
        name: name.into(),
        arguments: Some(arguments),
        meta: None,
        task: None,
    }
}

#[tokio::test]
async fn serves_catalog_and_tool_calls_over_a_transport() {
    let vendor = MockServer::start_async().await;
    let mock = vendor
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/market-statistics")
                .query_param("zipCode", "78244");
            then.status(200).json_body(json!({"averageRent": 1650}));
        })
        .await;

    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    let tools = tools_for(&vendor);
    let server = tokio::spawn(async move {
        let running = tools.serve(server_io).await.unwrap();
        running.waiting().await.unwrap();
    });

    let client = ().serve(client_io).await.unwrap();
    let info = client.peer_info().expect("initialize result");
    assert_eq!(info.server_info.name, SERVER_NAME);
    assert!(info.capabilities.tools.is_some());

    let listed = client.list_tools(Default::default()).await.unwrap();
    assert_eq!(listed.tools.len(), rentcast::catalog::all().len());

    let result = client
        .call_tool(params("get_market_statistics", json!({"zip_code": "78244"})))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(result.is_error, Some(false));
    let text = &result.content[0].as_text().expect("text content").text;
    assert_eq!(
        serde_json::from_str::<Value>(text).unwrap(),
        json!({"averageRent": 1650})
    );

    client.cancel().await.unwrap();
    server.await.unwrap();
}

#[tokio::test]
async fn rejected_calls_leave_the_session_usable() {
    let vendor = MockServer::start_async().await;
    let mock = vendor
        .mock_async(|when, then| {
            when.method(GET).path("/v1/properties/p1");
            then.status(200).json_body(json!({"id": "p1"}));
        })
        .await;

    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    let tools = tools_for(&vendor);
    let server = tokio::spawn(async move {
        let running = tools.serve(server_io).await.unwrap();
        running.waiting().await.unwrap();
    });
    let client = ().serve(client_io).await.unwrap();

    // A message well over a megabyte still reaches the tool layer.
    let padding = "x".repeat(1024 * 1024 + 1);
    let err = client
        .call_tool(params("get_weather", json!({"note": padding})))
        .await
        .unwrap_err();
    match err {
        ServiceError::McpError(e) => assert_eq!(e.code, ErrorCode::INVALID_PARAMS),
        other => panic!("expected a protocol error, got {other:?}"),
    }

    let err = client
        .call_tool(params("get_property_data", json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::McpError(ref e) if e.message.contains("property_id")));
    assert_eq!(mock.hits_async().await, 0);

    let result = client
        .call_tool(params("get_property_data", json!({"property_id": "p1"})))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(false));
    mock.assert_async().await;

    client.cancel().await.unwrap();
    server.await.unwrap();
}
