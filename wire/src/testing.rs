//! Builders shared by the test suites of downstream crates.

use crate::envelope::MessageEnvelope;

pub fn envelope(constructor: i64, request_id: u64, message: &[u8]) -> MessageEnvelope {
    MessageEnvelope {
        constructor,
        request_id,
        message: message.to_vec(),
        header: Vec::new(),
    }
}
