use docuchat::domain::{Message, MessageRole};

#[test]
fn given_role_names_when_parsing_then_returns_roles() {
    assert_eq!("user".parse::<MessageRole>(), Ok(MessageRole::User));
    assert_eq!("ai".parse::<MessageRole>(), Ok(MessageRole::Ai));
}

#[test]
fn given_unknown_role_when_parsing_then_returns_error() {
    assert!("assistant".parse::<MessageRole>().is_err());
}

#[test]
fn given_message_json_with_unknown_role_when_deserializing_then_fails() {
    let result = serde_json::from_str::<Message>(r#"{"role":"system","content":"hi"}"#);
    assert!(result.is_err());
}

#[test]
fn given_ai_message_when_serializing_then_role_is_lowercase() {
    let json = serde_json::to_value(Message::ai("Blue.")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "ai", "content": "Blue." }));
}
