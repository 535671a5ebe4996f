//! End-to-end handshake scenarios against a scripted server.
//!
//! The server side is played by the test itself over a tiny DH group
//! (p = 23, g = 5); the RSA step uses a production-sized pinned key, which
//! the scripted server never needs to unseal because the secret nonce is
//! read straight out of the session.

use byteorder::{ByteOrder, LittleEndian};
use num_bigint::BigUint;

use crate::error::Error;
use crate::handshake::{Outcome, StepEvents};
use crate::River;

pub(crate) const RSA_N: &str = "22081946531037833540524260580660774032207476521197121128740358761486364763467087828766873972338019078976854986531076484772771735399701424566177039926855356719497736439289455286277202113900509554266057302466528985253648318314129246825219640197356165626774276930672688973278712614800066037531599375044750753580126415613086372604312320014358994394131667022861767539879232149461579922316489532682165746762569651763794500923643656753278887871955676253526661694459370047843286685859688756429293184148202379356802488805862746046071921830921840273062124571073336369210703400985851431491295910187179045081526826572515473914151";

pub(crate) const DH_FINGERPRINT: i64 = 101;
pub(crate) const RSA_FINGERPRINT: i64 = 202;
pub(crate) const SERVER_NONCE: u64 = 0xBEEF_BEEF;
const SERVER_DH_PRIVATE: u32 = 7;

#[derive(Default)]
struct Recorder {
    progress: Vec<i64>,
    saves: Vec<wire::ConnectionInfo>,
}

impl StepEvents for Recorder {
    fn progress(&mut self, percent: i64) {
        self.progress.push(percent);
    }

    fn save(&mut self, info: &wire::ConnectionInfo) {
        self.saves.push(info.clone());
    }
}

fn river_with_keys() -> River {
    let mut river = River::new();
    river.keys = connection::ServerKeys::from(wire::ServerKeys {
        public_keys: vec![wire::PublicKey {
            fingerprint: RSA_FINGERPRINT,
            n: String::from(RSA_N),
            e: 65537,
        }],
        dh_groups: vec![wire::DhGroup {
            fingerprint: DH_FINGERPRINT,
            prime: String::from("17"),
            gen: 5,
        }],
    });
    river
}

/// Runs steps 1 and 2, returning the client's `InitCompleteAuth`.
fn run_through_step2(river: &mut River, events: &mut Recorder) -> wire::InitCompleteAuth {
    let step1 = river.auth_step1(events).unwrap();
    let connect: wire::InitConnect = wire::decode(&step1).unwrap();

    let response = wire::encode(&wire::InitResponse {
        client_nonce: connect.client_nonce,
        server_nonce: SERVER_NONCE,
        dh_group_fingerprint: DH_FINGERPRINT as u64,
        pq: 15,
        rsa_pub_key_fingerprint: RSA_FINGERPRINT as u64,
    })
    .unwrap();

    let step2 = river.auth_step2(&response, events).unwrap();
    wire::decode(&step2).unwrap()
}

/// Plays the server's side of the final step: derives the shared key from
/// the client's public value and computes the matching secret hash.
pub(crate) fn server_step3(river: &River, complete: &wire::InitCompleteAuth) -> (Vec<u8>, u64) {
    let p = BigUint::from(23u32);
    let server_public = BigUint::from(5u32).modpow(&BigUint::from(SERVER_DH_PRIVATE), &p);

    let client_public = BigUint::from_bytes_be(&complete.client_dh_pub_key);
    let shared = client_public.modpow(&BigUint::from(SERVER_DH_PRIVATE), &p);
    let auth_key = crypto::pad256(&shared).unwrap();
    let auth_key_hash = crypto::sha256(&[&auth_key]);

    let session = river.session.as_ref().expect("session must be live");
    let mut secret = Vec::new();
    secret.extend_from_slice(&session.secret_nonce);
    secret.push(wire::AuthCompletedStatus::Ok as u8);
    secret.extend_from_slice(&auth_key_hash[..8]);
    let secret_hash = LittleEndian::read_u64(&crypto::sha256(&[&secret])[24..32]);

    (server_public.to_bytes_be(), secret_hash)
}

#[test]
fn happy_path_persists_the_auth_key() {
    let mut river = river_with_keys();
    let mut events = Recorder::default();

    let complete = run_through_step2(&mut river, &mut events);
    assert_eq!((complete.p, complete.q), (3, 5));
    assert_eq!(complete.server_nonce, SERVER_NONCE);
    assert_eq!(complete.encrypted_payload.len(), 256);
    assert!(!complete.client_dh_pub_key.is_empty());

    let (server_public, secret_hash) = server_step3(&river, &complete);
    let completed = wire::encode(&wire::InitAuthCompleted {
        status: wire::AuthCompletedStatus::Ok,
        server_dh_pub_key: server_public,
        secret_hash,
    })
    .unwrap();

    let outcome = river.auth_step3(&completed, &mut events).unwrap();
    assert_eq!(outcome, Outcome::Done);

    // The auth id is the little-endian tail of the key hash.
    let expected_id =
        LittleEndian::read_u64(&crypto::sha256(&[river.conn.auth_key()])[24..32]) as i64;
    assert_eq!(river.auth_id(), expected_id);
    assert_ne!(river.auth_id(), 0);

    assert!(river.session.is_none());
    assert_eq!(events.saves.len(), 1);
    assert_eq!(events.saves[0].auth_id, expected_id);

    assert_eq!(
        events.progress,
        vec![0, 5, 12, 17, 30, 35, 45, 50, 55, 60, 70, 80, 90, 100],
    );
}

#[test]
fn wrong_secret_hash_leaves_state_untouched() {
    let mut river = river_with_keys();
    let mut events = Recorder::default();

    let complete = run_through_step2(&mut river, &mut events);
    let (server_public, secret_hash) = server_step3(&river, &complete);

    let completed = wire::encode(&wire::InitAuthCompleted {
        status: wire::AuthCompletedStatus::Ok,
        server_dh_pub_key: server_public,
        secret_hash: secret_hash.wrapping_add(1),
    })
    .unwrap();

    let result = river.auth_step3(&completed, &mut events);
    assert!(matches!(result, Err(Error::SecretNonceMismatch)));

    assert_eq!(river.auth_id(), 0);
    assert!(events.saves.is_empty());
    assert!(river.session.is_none());
}

#[test]
fn retry_preserves_the_session() {
    let mut river = river_with_keys();
    let mut events = Recorder::default();
    run_through_step2(&mut river, &mut events);

    let completed = wire::encode(&wire::InitAuthCompleted {
        status: wire::AuthCompletedStatus::Retry,
        server_dh_pub_key: Vec::new(),
        secret_hash: 0,
    })
    .unwrap();

    let outcome = river.auth_step3(&completed, &mut events).unwrap();
    assert_eq!(outcome, Outcome::Retry);
    assert!(river.session.is_some());
    assert_eq!(river.auth_id(), 0);
    assert!(events.saves.is_empty());
}

#[test]
fn server_failure_maps_to_auth_failed() {
    let mut river = river_with_keys();
    let mut events = Recorder::default();
    run_through_step2(&mut river, &mut events);

    let completed = wire::encode(&wire::InitAuthCompleted {
        status: wire::AuthCompletedStatus::Fail,
        server_dh_pub_key: Vec::new(),
        secret_hash: 0,
    })
    .unwrap();

    let result = river.auth_step3(&completed, &mut events);
    assert!(matches!(result, Err(Error::AuthFailed)));
    assert!(river.session.is_none());
}

#[test]
fn steps_out_of_order_are_refused() {
    let mut river = river_with_keys();
    let mut events = Recorder::default();

    let result = river.auth_step2(&[], &mut events);
    assert!(matches!(result, Err(Error::DoesNotExist)));

    let result = river.auth_step3(&[], &mut events);
    assert!(matches!(result, Err(Error::DoesNotExist)));
}

#[test]
fn unknown_fingerprints_abort_step2() {
    let mut river = river_with_keys();
    let mut events = Recorder::default();

    let step1 = river.auth_step1(&mut events).unwrap();
    let connect: wire::InitConnect = wire::decode(&step1).unwrap();

    let response = wire::encode(&wire::InitResponse {
        client_nonce: connect.client_nonce,
        server_nonce: SERVER_NONCE,
        dh_group_fingerprint: 999,
        pq: 15,
        rsa_pub_key_fingerprint: RSA_FINGERPRINT as u64,
    })
    .unwrap();

    let result = river.auth_step2(&response, &mut events);
    assert!(matches!(result, Err(Error::NotFound)));
    assert!(river.session.is_none());
}

#[test]
fn load_with_garbage_state_keeps_the_registry() {
    let keys_blob = base64::encode(
        wire::encode(&wire::ServerKeys {
            public_keys: Vec::new(),
            dh_groups: vec![wire::DhGroup {
                fingerprint: DH_FINGERPRINT,
                prime: String::from("17"),
                gen: 5,
            }],
        })
        .unwrap(),
    );

    let mut river = River::new();
    let result = river.load("definitely not base64 !!!", &keys_blob);
    assert!(matches!(result, Err(Error::NoAuthKey)));

    // The registry half of the load sticks.
    assert!(river.keys.get_dh_group(DH_FINGERPRINT).is_ok());
    assert_eq!(river.auth_id(), 0);
}

#[test]
fn load_round_trips_persisted_state() {
    let keys_blob = base64::encode(wire::encode(&wire::ServerKeys::default()).unwrap());

    let mut conn = connection::Connection::new();
    conn.set_auth(1234, wire::AuthKey::from([0x77; wire::AuthKey::SIZE]));
    let conn_blob = conn.to_base64().unwrap();

    let mut river = River::new();
    river.load(&conn_blob, &keys_blob).unwrap();
    assert_eq!(river.auth_id(), 1234);
}
