use serde_derive::{Deserialize, Serialize};

/// The inner, meaningful unit of the protocol: a tagged request or response
/// body together with the request id used to correlate replies.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub constructor: i64,
    pub request_id: u64,
    pub message: Vec<u8>,
    pub header: Vec<KeyValue>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// The outer wire frame. `auth_id == 0` marks a plaintext frame whose
/// payload is a bare [`MessageEnvelope`]; any other value marks an encrypted
/// frame whose payload is a sealed [`ProtoEncryptedPayload`] authenticated
/// by `message_key`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProtoMessage {
    pub auth_id: i64,
    pub message_key: Vec<u8>,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProtoEncryptedPayload {
    pub server_salt: u64,
    pub message_id: u64,
    pub envelope: MessageEnvelope,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MessageContainer {
    pub envelopes: Vec<MessageEnvelope>,
}

/// The server's error envelope.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    pub code: String,
    pub items: String,
}
