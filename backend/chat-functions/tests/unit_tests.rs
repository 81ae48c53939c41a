//! Unit tests for request/response models
//!
//! Covers the lenient uid coercion, the soft-failure wire shapes and the
//! camelCase field mapping of the callable payloads.

use chat_functions::models::*;
use serde_json::json;

#[test]
fn test_coerce_uid_accepts_numbers_and_numeric_strings() {
    assert_eq!(coerce_uid(&json!(7)), 7);
    assert_eq!(coerce_uid(&json!("42")), 42);
    assert_eq!(coerce_uid(&json!(" 13 ")), 13);
}

#[test]
fn test_coerce_uid_falls_back_to_zero() {
    assert_eq!(coerce_uid(&json!(null)), 0);
    assert_eq!(coerce_uid(&json!("abc")), 0);
    assert_eq!(coerce_uid(&json!(-5)), 0);
    assert_eq!(coerce_uid(&json!(1.5)), 0);
    assert_eq!(coerce_uid(&json!(u64::MAX)), 0);
    assert_eq!(coerce_uid(&json!({ "uid": 7 })), 0);
}

#[test]
fn test_token_request_defaults() {
    let req: TokenRequest = serde_json::from_value(json!({ "channelName": "room-1" })).unwrap();
    assert_eq!(req.channel_name.as_deref(), Some("room-1"));
    assert_eq!(req.uid, 0);

    let req: TokenRequest =
        serde_json::from_value(json!({ "channelName": "room-1", "uid": "9" })).unwrap();
    assert_eq!(req.uid, 9);
}

#[test]
fn test_call_request_camel_case_mapping() {
    let req: CallPushRequest = serde_json::from_value(json!({
        "targetUid": "u2",
        "callerName": "Sam",
        "channelName": "room-7",
        "callType": "video"
    }))
    .unwrap();

    assert_eq!(req.target_uid.as_deref(), Some("u2"));
    assert_eq!(req.caller_name.as_deref(), Some("Sam"));
    assert_eq!(req.channel_name.as_deref(), Some("room-7"));
    assert_eq!(req.call_type.as_deref(), Some("video"));
}

#[test]
fn test_push_response_success_shape() {
    let response = PushResponse::from(DeliveryOutcome::Sent { sent: 3 });
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["sent"], 3);
    assert!(value.get("reason").is_none());
}

#[test]
fn test_push_response_soft_failure_shapes() {
    let no_devices = serde_json::to_value(PushResponse::from(DeliveryOutcome::NoDevices)).unwrap();
    assert_eq!(no_devices["success"], false);
    assert_eq!(no_devices["reason"], "no devices");
    assert!(no_devices.get("sent").is_none());

    let no_tokens = serde_json::to_value(PushResponse::from(DeliveryOutcome::NoTokens)).unwrap();
    assert_eq!(no_tokens["success"], false);
    assert_eq!(no_tokens["reason"], "no tokens");
    assert!(no_tokens.get("sent").is_none());
}

#[test]
fn test_registered_device_serializes_camel_case() {
    let device = RegisteredDevice {
        device_id: "d1".to_string(),
        platform: "android".to_string(),
        registered_at: chrono::Utc::now(),
    };

    let value = serde_json::to_value(&device).unwrap();
    assert!(value.get("deviceId").is_some());
    assert!(value.get("registeredAt").is_some());
    assert!(value.get("device_id").is_none());
}

#[test]
fn test_chat_request_payload_optional() {
    let req: ChatPushRequest =
        serde_json::from_value(json!({ "uid": "u1", "title": "Hi", "body": "there" })).unwrap();
    assert!(req.payload.is_none());

    let req: ChatPushRequest = serde_json::from_value(json!({
        "uid": "u1",
        "payload": { "chatId": "c-9" }
    }))
    .unwrap();
    assert_eq!(
        req.payload.unwrap().get("chatId").map(String::as_str),
        Some("c-9")
    );
}
