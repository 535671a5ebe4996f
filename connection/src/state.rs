use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::Error;

/// The connection's persisted identity: auth id, auth key and the offset of
/// the server clock against the local one.
///
/// Only two writers exist by contract: the handshake on a successful final
/// step, and [`set_server_time`](Connection::set_server_time).
#[derive(Debug, Clone, Default)]
pub struct Connection {
    info: wire::ConnectionInfo,
}

fn local_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

impl Connection {
    pub fn new() -> Connection {
        Connection::default()
    }

    /// Restores the state from its persisted blob.
    ///
    /// A blob with `auth_id == 0` is valid: the connection simply has not
    /// authenticated yet and frames stay plaintext. The clock offset is not
    /// trusted across restarts and resets to zero.
    pub fn from_base64(blob: &str) -> Result<Connection, Error> {
        let raw = base64::decode(blob)?;
        let mut info: wire::ConnectionInfo = wire::decode(&raw)?;
        info.diff_time = 0;

        debug!("connection state restored, auth_id={}", info.auth_id);
        Ok(Connection { info })
    }

    /// The persisted blob, handed back to the host for storage.
    pub fn to_base64(&self) -> Result<String, Error> {
        Ok(base64::encode(wire::encode(&self.info)?))
    }

    pub fn info(&self) -> &wire::ConnectionInfo {
        &self.info
    }

    pub fn auth_id(&self) -> i64 {
        self.info.auth_id
    }

    pub fn auth_key(&self) -> &[u8; wire::AuthKey::SIZE] {
        self.info.auth_key.as_bytes()
    }

    pub fn set_auth(&mut self, auth_id: i64, auth_key: wire::AuthKey) {
        self.info.auth_id = auth_id;
        self.info.auth_key = auth_key;
    }

    pub fn set_server_time(&mut self, timestamp: i64) {
        self.info.diff_time = timestamp - local_unix_seconds();
    }

    /// The current time as the server sees it.
    pub fn now(&self) -> i64 {
        local_unix_seconds() + self.info.diff_time
    }
}
