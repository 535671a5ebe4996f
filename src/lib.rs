#![forbid(unsafe_code)]

//! Client-side cryptographic core of the River messaging protocol.
//!
//! The crate owns three jobs: the handshake that establishes a shared auth
//! key ([`handshake`]), the framing of messages into plaintext or encrypted
//! wire frames ([`River::encode`]/[`River::decode`]), and the SRP-6a
//! password proof ([`srp`]). The [`host`] module wraps all of it behind the
//! base64-and-callbacks surface the embedding expects.
//!
//! The core is synchronous and single-threaded; a concurrent embedding must
//! synchronize externally.

mod error;
mod frame;
pub mod handshake;
pub mod host;
pub mod srp;

#[cfg(test)]
mod test_auth;

pub use crate::error::Error;
pub use crate::handshake::{Outcome, StepEvents};
pub use crate::host::{Handler, Host};

use crate::handshake::{Session, StepThree};

/// Placeholder salt used until the host feeds a real one from the server's
/// salt list.
const DEFAULT_SERVER_SALT: u64 = 234_242;

/// The protocol core: connection state, pinned server keys and the
/// in-flight handshake session.
pub struct River {
    conn: connection::Connection,
    keys: connection::ServerKeys,
    session: Option<Session>,
    pending_nonce: Option<u64>,
    message_seq: u64,
    server_salt: u64,
}

impl Default for River {
    fn default() -> Self {
        River {
            conn: connection::Connection::new(),
            keys: connection::ServerKeys::default(),
            session: None,
            pending_nonce: None,
            message_seq: 0,
            server_salt: DEFAULT_SERVER_SALT,
        }
    }
}

impl River {
    pub fn new() -> River {
        River::default()
    }

    /// Loads the pinned server keys and the persisted connection state.
    ///
    /// The keys must parse; a missing or malformed connection blob leaves a
    /// fresh unauthenticated state behind and reports [`Error::NoAuthKey`]
    /// so the host knows a handshake is due. The registry stays loaded
    /// either way.
    pub fn load(&mut self, conn_blob: &str, server_keys: &str) -> Result<(), Error> {
        self.keys = connection::ServerKeys::from_base64(server_keys)?;
        self.conn = connection::Connection::from_base64(conn_blob).map_err(|_| Error::NoAuthKey)?;
        Ok(())
    }

    pub fn auth_id(&self) -> i64 {
        self.conn.auth_id()
    }

    /// Connection-adjusted unix time.
    pub fn now(&self) -> i64 {
        self.conn.now()
    }

    pub fn set_server_time(&mut self, timestamp: i64) {
        self.conn.set_server_time(timestamp);
    }

    pub fn set_server_salt(&mut self, salt: u64) {
        self.server_salt = salt;
    }

    /// Reserves a message sequence slot for the host.
    pub fn session_inc(&mut self) {
        self.message_seq += 1;
    }

    /// Handshake step 1: emit `InitConnect`. Discards any session left from
    /// an abandoned attempt.
    pub fn auth_step1<E>(&mut self, events: &mut E) -> Result<Vec<u8>, Error>
    where
        E: StepEvents,
    {
        self.session = None;
        let (bytes, client_nonce) = handshake::step1(events)?;
        self.pending_nonce = Some(client_nonce);
        Ok(bytes)
    }

    /// Handshake step 2: answer `InitResponse` with `InitCompleteAuth`.
    pub fn auth_step2<E>(&mut self, input: &[u8], events: &mut E) -> Result<Vec<u8>, Error>
    where
        E: StepEvents,
    {
        if self.pending_nonce.is_none() {
            return Err(Error::DoesNotExist);
        }

        let (bytes, session) = handshake::step2(&self.keys, input, events)?;
        self.session = Some(session);
        Ok(bytes)
    }

    /// Handshake step 3: verify `InitAuthCompleted` and adopt the key.
    ///
    /// On [`Outcome::Retry`] the session survives for the re-run of step 2;
    /// every other outcome, success or error, consumes it.
    pub fn auth_step3<E>(&mut self, input: &[u8], events: &mut E) -> Result<Outcome, Error>
    where
        E: StepEvents,
    {
        let session = self.session.take().ok_or(Error::DoesNotExist)?;

        match handshake::step3(session, &mut self.conn, input, events)? {
            StepThree::Done => {
                self.pending_nonce = None;
                Ok(Outcome::Done)
            }
            StepThree::Retry(session) => {
                self.session = Some(session);
                Ok(Outcome::Retry)
            }
        }
    }
}
