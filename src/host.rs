//! The embedding surface: base64 in, callbacks out.
//!
//! The host hands every operation a base64 blob and receives results
//! through the [`Handler`] it installed. Callbacks fire synchronously from
//! inside the call; the handler must not re-enter the core.

use log::warn;

use wire::constructors;

use crate::error::Error;
use crate::handshake::{Outcome, StepEvents};
use crate::River;

/// Callbacks into the embedding.
///
/// `auth_retry` has a default empty body: hosts that never see a server
/// retry do not need to care.
pub trait Handler {
    /// A handshake step finished; `response` is the request body to send,
    /// empty for the final step.
    fn auth(&mut self, request_id: i64, step: i64, response: &str);

    /// Step 3 came back with a retry: re-run step 2 with a fresh response.
    fn auth_retry(&mut self, request_id: i64) {
        let _ = request_id;
    }

    /// A handshake checkpoint, in percent.
    fn auth_progress(&mut self, percent: i64);

    /// An envelope was framed for the wire.
    fn encode(&mut self, with_send: bool, request_id: u64, frame: &str);

    /// An inbound frame was unwrapped into an envelope.
    fn decode(&mut self, parsed: bool, request_id: u64, constructor: i64, message: &str);

    /// An update container arrived.
    fn update(&mut self, message: &str);

    fn gen_srp_hash(&mut self, id: i64, result: &str);

    fn gen_input_password(&mut self, id: i64, result: &str);

    /// The connection state changed and must be persisted.
    fn save(&mut self, connection: &str);
}

/// Builds the team header attached to envelopes sent on behalf of a team.
/// `"0"` on either side means no team context.
pub fn team_header(team_id: &str, team_access: &str) -> Option<Vec<wire::KeyValue>> {
    if team_id == "0" || team_access == "0" {
        return None;
    }

    Some(vec![
        wire::KeyValue {
            key: String::from("TeamID"),
            value: String::from(team_id),
        },
        wire::KeyValue {
            key: String::from("TeamAccess"),
            value: String::from(team_access),
        },
    ])
}

struct HandlerEvents<'a> {
    handler: &'a mut dyn Handler,
}

impl<'a> StepEvents for HandlerEvents<'a> {
    fn progress(&mut self, percent: i64) {
        self.handler.auth_progress(percent);
    }

    fn save(&mut self, info: &wire::ConnectionInfo) {
        match wire::encode(info) {
            Ok(bytes) => self.handler.save(&base64::encode(bytes)),
            Err(error) => warn!("connection state not persisted: {}", error),
        }
    }
}

/// The host-facing shim around a [`River`] core.
pub struct Host {
    river: River,
    handlers: Option<Box<dyn Handler>>,
}

impl Host {
    pub fn new(river: River) -> Host {
        Host {
            river,
            handlers: None,
        }
    }

    pub fn set_handlers(&mut self, handlers: Box<dyn Handler>) {
        self.handlers = Some(handlers);
    }

    pub fn river(&self) -> &River {
        &self.river
    }

    pub fn load(&mut self, conn_blob: &str, server_keys: &str) -> Result<(), Error> {
        self.river.load(conn_blob, server_keys)
    }

    pub fn set_server_time(&mut self, timestamp: i64) {
        self.river.set_server_time(timestamp);
    }

    pub fn set_server_salt(&mut self, salt: u64) {
        self.river.set_server_salt(salt);
    }

    pub fn session_inc(&mut self) {
        self.river.session_inc();
    }

    /// Runs one handshake step over base64 bodies. The step's checkpoints
    /// and result are relayed through the handler.
    pub fn auth(&mut self, request_id: i64, step: i64, input: &str) -> Result<(), Error> {
        let handler = self.handlers.as_mut().ok_or(Error::HandlersNotSet)?;
        let mut events = HandlerEvents {
            handler: handler.as_mut(),
        };

        match step {
            1 => {
                let bytes = self.river.auth_step1(&mut events)?;
                handler.auth(request_id, step, &base64::encode(bytes));
            }
            2 => {
                let input = base64::decode(input)?;
                let bytes = self.river.auth_step2(&input, &mut events)?;
                handler.auth(request_id, step, &base64::encode(bytes));
            }
            3 => {
                let input = base64::decode(input)?;
                match self.river.auth_step3(&input, &mut events)? {
                    Outcome::Done => handler.auth(request_id, step, ""),
                    Outcome::Retry => handler.auth_retry(request_id),
                }
            }
            _ => return Err(Error::DoesNotExist),
        }

        Ok(())
    }

    /// Frames a message for sending and relays it through the handler.
    pub fn encode(
        &mut self,
        with_send: bool,
        request_id: u64,
        constructor: i64,
        message: &str,
        team_id: &str,
        team_access: &str,
    ) -> Result<(), Error> {
        if self.handlers.is_none() {
            return Err(Error::HandlersNotSet);
        }

        let mut envelope = wire::MessageEnvelope {
            constructor,
            request_id,
            message: base64::decode(message)?,
            header: Vec::new(),
        };
        if let Some(header) = team_header(team_id, team_access) {
            envelope.header = header;
        }

        let frame = self.river.encode(&envelope)?;

        let handler = self.handlers.as_mut().ok_or(Error::HandlersNotSet)?;
        handler.encode(with_send, request_id, &base64::encode(frame));
        Ok(())
    }

    /// Unwraps an inbound frame and dispatches it.
    ///
    /// With `with_parse`, containers are opened: a `MessageContainer` is
    /// re-dispatched envelope by envelope and an `UpdateContainer` goes out
    /// through [`Handler::update`]. Without it, the envelope is relayed as
    /// is, optionally stamped with the host's request id.
    pub fn decode(
        &mut self,
        with_parse: bool,
        frame: &str,
        request_id_hint: u64,
    ) -> Result<(), Error> {
        if self.handlers.is_none() {
            return Err(Error::HandlersNotSet);
        }

        let frame = base64::decode(frame)?;
        let mut envelope = self.river.decode(&frame)?;

        let handler = self.handlers.as_mut().ok_or(Error::HandlersNotSet)?;
        if with_parse {
            parse_envelope(handler.as_mut(), &envelope);
        } else {
            if request_id_hint != 0 {
                envelope.request_id = request_id_hint;
            }
            handler.decode(
                false,
                envelope.request_id,
                envelope.constructor,
                &base64::encode(&envelope.message),
            );
        }
        Ok(())
    }

    pub fn gen_srp_hash(
        &mut self,
        id: i64,
        password: &str,
        algorithm: i64,
        algorithm_data: &str,
    ) -> Result<(), Error> {
        if self.handlers.is_none() {
            return Err(Error::HandlersNotSet);
        }

        let password = base64::decode(password)?;
        let algorithm_data = base64::decode(algorithm_data)?;
        let result = crate::srp::gen_srp_hash(&password, algorithm, &algorithm_data)?;

        let handler = self.handlers.as_mut().ok_or(Error::HandlersNotSet)?;
        handler.gen_srp_hash(id, &base64::encode(result));
        Ok(())
    }

    pub fn gen_input_password(
        &mut self,
        id: i64,
        password: &str,
        account_password: &str,
    ) -> Result<(), Error> {
        if self.handlers.is_none() {
            return Err(Error::HandlersNotSet);
        }

        let password = base64::decode(password)?;
        let account_password = base64::decode(account_password)?;
        let result = crate::srp::gen_input_password(&password, &account_password)?;

        let handler = self.handlers.as_mut().ok_or(Error::HandlersNotSet)?;
        handler.gen_input_password(id, &base64::encode(result));
        Ok(())
    }
}

fn parse_envelope(handler: &mut dyn Handler, envelope: &wire::MessageEnvelope) {
    match envelope.constructor {
        constructors::MESSAGE_CONTAINER => {
            match wire::decode::<wire::MessageContainer>(&envelope.message) {
                Ok(container) => {
                    for inner in &container.envelopes {
                        parse_envelope(handler, inner);
                    }
                }
                Err(error) => warn!("malformed message container dropped: {}", error),
            }
        }
        constructors::UPDATE_CONTAINER => {
            handler.update(&base64::encode(&envelope.message));
        }
        _ => handler.decode(
            true,
            envelope.request_id,
            envelope.constructor,
            &base64::encode(&envelope.message),
        ),
    }
}
