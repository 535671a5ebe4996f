use crate::Error;

/// The pinned RSA keys and DH groups the server may name during the
/// handshake. Immutable after loading; the sets are small, so lookups stay
/// linear.
#[derive(Debug, Clone, Default)]
pub struct ServerKeys {
    inner: wire::ServerKeys,
}

impl ServerKeys {
    pub fn from_base64(blob: &str) -> Result<ServerKeys, Error> {
        let raw = base64::decode(blob)?;
        Ok(ServerKeys {
            inner: wire::decode(&raw)?,
        })
    }

    pub fn get_public_key(&self, fingerprint: i64) -> Result<&wire::PublicKey, Error> {
        self.inner
            .public_keys
            .iter()
            .find(|key| key.fingerprint == fingerprint)
            .ok_or(Error::NotFound)
    }

    pub fn get_dh_group(&self, fingerprint: i64) -> Result<&wire::DhGroup, Error> {
        self.inner
            .dh_groups
            .iter()
            .find(|group| group.fingerprint == fingerprint)
            .ok_or(Error::NotFound)
    }
}

impl From<wire::ServerKeys> for ServerKeys {
    fn from(inner: wire::ServerKeys) -> Self {
        ServerKeys { inner }
    }
}
