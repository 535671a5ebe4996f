//! Framing of envelopes into wire frames.
//!
//! A handful of constructors must stay readable before any key exists, and
//! an unauthenticated connection can only speak plaintext; everything else
//! rides the encrypted path.

use wire::constructors;

use crate::error::Error;
use crate::River;

const PLAINTEXT_CONSTRUCTORS: [i64; 5] = [
    constructors::SYSTEM_GET_SERVER_TIME,
    constructors::SYSTEM_GET_INFO,
    constructors::SYSTEM_GET_SALTS,
    constructors::INIT_CONNECT,
    constructors::INIT_COMPLETE_AUTH,
];

fn is_plaintext(constructor: i64) -> bool {
    PLAINTEXT_CONSTRUCTORS.contains(&constructor)
}

impl River {
    /// Wraps an envelope into a `ProtoMessage` frame.
    ///
    /// Every encrypted frame consumes one message sequence slot; the
    /// message id combines the server-adjusted clock with that sequence
    /// number, so ids are unique and roughly time-ordered.
    pub fn encode(&mut self, envelope: &wire::MessageEnvelope) -> Result<Vec<u8>, Error> {
        let auth_id = self.conn.auth_id();

        if auth_id == 0 || is_plaintext(envelope.constructor) {
            let frame = wire::ProtoMessage {
                auth_id: 0,
                message_key: Vec::new(),
                payload: wire::encode(envelope)?,
            };
            return wire::encode(&frame).map_err(Error::from);
        }

        self.message_seq += 1;
        let payload = wire::ProtoEncryptedPayload {
            server_salt: self.server_salt,
            message_id: (self.conn.now() as u64) << 32 | (self.message_seq & 0xFFFF_FFFF),
            envelope: envelope.clone(),
        };

        let plain = wire::encode(&payload)?;
        let (message_key, sealed) = crypto::envelope::seal(self.conn.auth_key(), &plain)?;

        let frame = wire::ProtoMessage {
            auth_id,
            message_key: message_key.to_vec(),
            payload: sealed,
        };
        wire::encode(&frame).map_err(Error::from)
    }

    /// Unwraps a `ProtoMessage` frame back into its envelope.
    pub fn decode(&self, frame: &[u8]) -> Result<wire::MessageEnvelope, Error> {
        let frame: wire::ProtoMessage = wire::decode(frame)?;

        if frame.auth_id == 0 {
            return wire::decode(&frame.payload).map_err(Error::from);
        }

        let plain =
            crypto::envelope::open(self.conn.auth_key(), &frame.message_key, &frame.payload)?;
        let payload: wire::ProtoEncryptedPayload = wire::decode(&plain)?;
        Ok(payload.envelope)
    }
}

#[cfg(test)]
mod tests {
    use wire::constructors;
    use wire::testing::envelope;

    use crate::River;

    fn authenticated() -> River {
        let mut river = River::new();
        river
            .conn
            .set_auth(42, wire::AuthKey::from([0x11; wire::AuthKey::SIZE]));
        river
    }

    #[test]
    fn unauthenticated_connections_emit_plaintext() {
        let mut river = River::new();
        let env = envelope(777, 1, b"anything");

        let frame: wire::ProtoMessage = wire::decode(&river.encode(&env).unwrap()).unwrap();
        assert_eq!(frame.auth_id, 0);
        assert!(frame.message_key.is_empty());
        assert_eq!(wire::decode::<wire::MessageEnvelope>(&frame.payload).unwrap(), env);
    }

    #[test]
    fn plaintext_constructors_bypass_encryption() {
        let mut river = authenticated();
        let env = envelope(constructors::SYSTEM_GET_SERVER_TIME, 2, b"");

        let frame: wire::ProtoMessage = wire::decode(&river.encode(&env).unwrap()).unwrap();
        assert_eq!(frame.auth_id, 0);
        assert_eq!(wire::decode::<wire::MessageEnvelope>(&frame.payload).unwrap(), env);
    }

    #[test]
    fn plaintext_round_trip() {
        let mut river = River::new();
        let env = envelope(constructors::SYSTEM_GET_INFO, 3, b"ping");

        let bytes = river.encode(&env).unwrap();
        assert_eq!(river.decode(&bytes).unwrap(), env);
    }

    #[test]
    fn encrypted_round_trip() {
        let mut river = authenticated();
        let mut env = envelope(555_000, 9, b"secret body");
        env.header.push(wire::KeyValue {
            key: String::from("TeamID"),
            value: String::from("3"),
        });

        let bytes = river.encode(&env).unwrap();

        let frame: wire::ProtoMessage = wire::decode(&bytes).unwrap();
        assert_eq!(frame.auth_id, 42);
        assert_eq!(frame.message_key.len(), 32);
        assert_ne!(frame.payload, wire::encode(&env).unwrap());

        assert_eq!(river.decode(&bytes).unwrap(), env);
    }

    #[test]
    fn message_seq_strictly_increases() {
        let mut river = authenticated();
        let env = envelope(555_000, 1, b"x");

        river.encode(&env).unwrap();
        let after_first = river.message_seq;
        river.encode(&env).unwrap();
        let after_second = river.message_seq;

        assert_eq!(after_first, 1);
        assert_eq!(after_second, 2);
    }

    #[test]
    fn session_inc_reserves_a_slot() {
        let mut river = authenticated();
        river.session_inc();

        river.encode(&envelope(555_000, 1, b"x")).unwrap();
        assert_eq!(river.message_seq, 2);
    }

    #[test]
    fn decoding_with_the_wrong_key_fails() {
        let mut sender = authenticated();
        let bytes = sender.encode(&envelope(555_000, 4, b"body")).unwrap();

        let mut receiver = River::new();
        receiver
            .conn
            .set_auth(42, wire::AuthKey::from([0x22; wire::AuthKey::SIZE]));
        assert!(receiver.decode(&bytes).is_err());
    }
}
