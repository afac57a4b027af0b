use docuchat::domain::{ChatSession, MessageRole, SessionId};

#[test]
fn given_new_session_when_created_then_seeded_with_greeting() {
    let session = ChatSession::new(
        SessionId::from_millis(1),
        "notes.txt".to_string(),
        "The sky is blue.".to_string(),
    );

    assert_eq!(session.messages().len(), 1);
    let greeting = &session.messages()[0];
    assert_eq!(greeting.role, MessageRole::Ai);
    assert_eq!(
        greeting.content,
        "I've finished reading \"notes.txt\". Ask me anything!"
    );
}

#[test]
fn given_session_when_serializing_then_uses_persisted_field_names() {
    let session = ChatSession::new(
        SessionId::from_millis(1_700_000_000_000),
        "report.pdf".to_string(),
        "body".to_string(),
    );

    let json = serde_json::to_value(&session).unwrap();

    assert_eq!(json["id"], "1700000000000");
    assert_eq!(json["fileName"], "report.pdf");
    assert_eq!(json["documentText"], "body");
    assert_eq!(json["messages"][0]["role"], "ai");
}

#[test]
fn given_persisted_history_when_deserializing_then_restores_sessions() {
    let raw = r#"[
        {
            "id": "1700000000000",
            "fileName": "a.txt",
            "documentText": "x",
            "messages": [
                {"role": "ai", "content": "hello"},
                {"role": "user", "content": "hi"}
            ]
        }
    ]"#;

    let sessions: Vec<ChatSession> = serde_json::from_str(raw).unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id(), SessionId::from_millis(1_700_000_000_000));
    assert_eq!(sessions[0].file_name(), "a.txt");
    assert_eq!(sessions[0].messages()[1].role, MessageRole::User);
    assert_eq!(sessions[0].last_message().unwrap().content, "hi");
}
