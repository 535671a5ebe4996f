//! The three-step exchange establishing the connection's auth key.
//!
//! Step 1 opens with a client nonce, step 2 answers the server's challenge
//! (DH public key, factored `pq`, RSA-sealed secret nonce) and step 3
//! verifies the server's proof before the derived key is accepted. Every
//! intermediate lives in a [`Session`] value handed from step to step, so
//! abandoning a handshake is dropping the session.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use rand::{thread_rng, Rng};

use crate::error::Error;

/// Receiver of the side effects a handshake step produces.
///
/// `progress` relays the numeric checkpoints the UI renders; they are part
/// of the protocol contract. `save` hands over the connection state exactly
/// once, after a successful final step. Implementations must not re-enter
/// the core.
pub trait StepEvents {
    fn progress(&mut self, percent: i64);
    fn save(&mut self, info: &wire::ConnectionInfo);
}

/// Handshake intermediates between step 2 and step 3.
pub struct Session {
    pub(crate) client_nonce: u64,
    pub(crate) server_nonce: u64,
    pub(crate) group: crypto::dh::Group,
    pub(crate) keypair: crypto::dh::KeyPair,
    pub(crate) secret_nonce: [u8; 16],
}

/// How a completed step 3 ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    /// The auth key is established and persisted.
    Done,
    /// The server asked for a fresh DH exchange; re-run step 2.
    Retry,
}

pub(crate) enum StepThree {
    Done,
    Retry(Session),
}

pub(crate) fn step1<E>(events: &mut E) -> Result<(Vec<u8>, u64), Error>
where
    E: StepEvents,
{
    events.progress(0);

    let client_nonce = thread_rng().gen();
    let bytes = wire::encode(&wire::InitConnect { client_nonce })?;

    events.progress(5);
    Ok((bytes, client_nonce))
}

pub(crate) fn step2<E>(
    keys: &connection::ServerKeys,
    input: &[u8],
    events: &mut E,
) -> Result<(Vec<u8>, Session), Error>
where
    E: StepEvents,
{
    events.progress(12);
    let response: wire::InitResponse = wire::decode(input)?;

    let group_info = keys.get_dh_group(response.dh_group_fingerprint as i64)?;
    events.progress(17);

    let group = crypto::dh::Group::from_wire(&group_info.prime, group_info.gen)?;
    events.progress(30);

    let keypair = group.generate_keypair();
    events.progress(35);

    let (p, q) = crypto::factor::factorize(response.pq);
    let (p, q) = if p < q { (p, q) } else { (q, p) };
    events.progress(45);

    let mut secret_nonce = [0; 16];
    thread_rng().fill(&mut secret_nonce[..]);
    events.progress(50);

    let server_key = keys.get_public_key(response.rsa_pub_key_fingerprint as i64)?;
    events.progress(55);

    let proof = wire::encode(&wire::InitCompleteAuthInternal {
        secret_nonce: secret_nonce.to_vec(),
    })?;
    let encrypted_payload = crypto::rsa::encrypt_pkcs1_v15(&server_key.n, server_key.e, &proof)?;
    events.progress(60);

    debug!(
        "handshake step 2: group fp {}, key fp {}, pq {} = {} * {}",
        response.dh_group_fingerprint, response.rsa_pub_key_fingerprint, response.pq, p, q,
    );

    let request = wire::InitCompleteAuth {
        client_nonce: response.client_nonce,
        server_nonce: response.server_nonce,
        client_dh_pub_key: keypair.public_bytes(),
        p,
        q,
        encrypted_payload,
    };

    let session = Session {
        client_nonce: response.client_nonce,
        server_nonce: response.server_nonce,
        group,
        keypair,
        secret_nonce,
    };
    Ok((wire::encode(&request)?, session))
}

pub(crate) fn step3<E>(
    session: Session,
    conn: &mut connection::Connection,
    input: &[u8],
    events: &mut E,
) -> Result<StepThree, Error>
where
    E: StepEvents,
{
    let completed: wire::InitAuthCompleted = wire::decode(input)?;

    match completed.status {
        wire::AuthCompletedStatus::Ok => {
            let shared = session
                .group
                .shared_secret(&session.keypair, &completed.server_dh_pub_key)?;
            events.progress(70);

            let auth_key = wire::AuthKey::from(shared);
            let auth_key_hash = crypto::sha256(&[auth_key.as_ref()]);
            let auth_id = LittleEndian::read_u64(&auth_key_hash[24..32]) as i64;
            events.progress(80);

            // The proof covers the secret nonce, the status byte and the
            // head of the key hash; the server echoes its tail as a u64.
            let mut secret = Vec::with_capacity(16 + 1 + 8);
            secret.extend_from_slice(&session.secret_nonce);
            secret.push(wire::AuthCompletedStatus::Ok as u8);
            secret.extend_from_slice(&auth_key_hash[..8]);
            let secret_hash = crypto::sha256(&[&secret]);

            if completed.secret_hash != LittleEndian::read_u64(&secret_hash[24..32]) {
                return Err(Error::SecretNonceMismatch);
            }
            events.progress(90);

            conn.set_auth(auth_id, auth_key);
            events.save(conn.info());
            events.progress(100);

            debug!("handshake complete, auth_id={}", auth_id);
            Ok(StepThree::Done)
        }
        wire::AuthCompletedStatus::Retry => {
            debug!("handshake step 3: server asked for a DH retry");
            Ok(StepThree::Retry(session))
        }
        wire::AuthCompletedStatus::Fail => Err(Error::AuthFailed),
    }
}
