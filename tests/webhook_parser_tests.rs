use base64::{Engine as _, engine::general_purpose};
use rastreio::messaging::webhook::{
    InboundRequest, WebhookMessage, decode_base64_body, decode_url_component, parse_webhook_form,
};
use serde_json::json;

const TWILIO_FORM: &str = "SmsMessageSid=SM123&NumMedia=0&\
                           From=whatsapp%3A%2B5511999999999&Body=SS123456789BR&\
                           To=whatsapp%3A%2B14155238886&AccountSid=AC123";

#[test]
fn test_decode_url_component() {
    assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
    assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
    // An encoded plus must survive as a plus.
    assert_eq!(decode_url_component("%2B55").unwrap(), "+55");
}

#[test]
fn test_parse_webhook_form() {
    let message = parse_webhook_form(TWILIO_FORM).unwrap();
    assert_eq!(
        message,
        WebhookMessage {
            from: "whatsapp:+5511999999999".to_string(),
            body: "SS123456789BR".to_string(),
            to: "whatsapp:+14155238886".to_string(),
        }
    );
}

#[test]
fn test_parse_webhook_form_missing_fields() {
    let message = parse_webhook_form("Body=abc").unwrap();
    assert_eq!(message.body, "abc");
    assert_eq!(message.from, "");
    assert_eq!(message.to, "");
}

#[test]
fn test_decode_base64_body() {
    let encoded = general_purpose::STANDARD.encode(TWILIO_FORM);
    assert_eq!(decode_base64_body(&encoded).unwrap(), TWILIO_FORM);
    assert!(decode_base64_body("not base64!!").is_err());
}

#[test]
fn test_classify_direct_payload() {
    let request = InboundRequest::from_payload(&json!({ "tracking_code": "SS123456789BR" })).unwrap();
    assert_eq!(
        request,
        InboundRequest::Direct {
            tracking_code: Some("SS123456789BR".to_string())
        }
    );

    let empty = InboundRequest::from_payload(&json!({})).unwrap();
    assert_eq!(empty, InboundRequest::Direct { tracking_code: None });
}

#[test]
fn test_classify_webhook_fields_payload() {
    let payload = json!({
        "From": "whatsapp:+5511999999999",
        "Body": "SS123456789BR",
        "To": "whatsapp:+14155238886"
    });

    match InboundRequest::from_payload(&payload).unwrap() {
        InboundRequest::WebhookFields(message) => {
            assert_eq!(message.from, "whatsapp:+5511999999999");
            assert_eq!(message.body, "SS123456789BR");
        }
        other => panic!("Unexpected request kind: {other:?}"),
    }
}

#[test]
fn test_classify_encoded_payload() {
    let payload = json!({
        "body": general_purpose::STANDARD.encode(TWILIO_FORM),
        "isBase64Encoded": true
    });

    match InboundRequest::from_payload(&payload).unwrap() {
        InboundRequest::WebhookEncoded(message) => {
            assert_eq!(message.to, "whatsapp:+14155238886");
            assert_eq!(message.body, "SS123456789BR");
        }
        other => panic!("Unexpected request kind: {other:?}"),
    }
}

#[test]
fn test_plain_form_body_is_not_base64_decoded() {
    let payload = json!({ "body": TWILIO_FORM, "isBase64Encoded": false });

    match InboundRequest::from_payload(&payload).unwrap() {
        InboundRequest::WebhookEncoded(message) => assert_eq!(message.body, "SS123456789BR"),
        other => panic!("Unexpected request kind: {other:?}"),
    }
}

#[test]
fn test_invalid_base64_body_is_a_parse_error() {
    let payload = json!({ "body": "%%%", "isBase64Encoded": true });
    let err = InboundRequest::from_payload(&payload).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse request:"));
}
