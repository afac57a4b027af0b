mod chat_session_test;
mod message_role_test;
