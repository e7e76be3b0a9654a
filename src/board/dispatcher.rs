//! The per-connection protocol state machine.
//!
//! One event per invocation, never concurrent for the same connection.
//! Events the board does not own are forwarded verbatim to the sibling
//! session extension, whose disposition is returned unchanged.

use std::rc::Rc;

use anyhow::bail;
use tracing::{debug, info, warn};

use crate::http::response::{self, StatusCode};
use crate::protocol::{Disposition, Event, HostActions, PaddedBuffer, SessionInfo, WriteKind};

use super::form::{FIELD_NAMES, FormAccumulator, FormField, MAX_FORM_BYTES};
use super::store::NewMessage;
use super::{BoardContext, ConnectionState};

/// Request path owned by the message board.
pub const FORM_PATH: &str = "/msg";

/// One-byte status token sent as the success response body.
const RESPONSE_BODY: &[u8] = b"1";

const RESPONSE_HEADROOM: usize = 256;

pub struct MessageBoard {
    ctx: Rc<BoardContext>,
}

impl MessageBoard {
    pub fn new(ctx: Rc<BoardContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Rc<BoardContext> {
        &self.ctx
    }

    /// Allocate state for a newly accepted connection. `peer` is the source
    /// address recorded into any message committed on this connection.
    pub fn open_connection(&self, peer: impl Into<String>) -> ConnectionState {
        ConnectionState {
            auth: SessionInfo::default(),
            peer: peer.into(),
            auth_session: self.ctx.auth().open_session(),
            accumulator: None,
            is_form_target: false,
        }
    }

    pub fn handle_event(
        &self,
        conn: &mut ConnectionState,
        event: &Event<'_>,
        actions: &mut dyn HostActions,
    ) -> Disposition {
        match event {
            Event::Established => self.on_established(conn),
            Event::HttpRequest { path } => {
                conn.reset_transaction();
                if *path == FORM_PATH {
                    debug!(path, "messageboard form request");
                    conn.is_form_target = true;
                    Disposition::Continue
                } else {
                    self.passthrough(conn, event, actions)
                }
            }
            Event::HttpBodyChunk { data } => {
                if !conn.is_form_target {
                    return self.passthrough(conn, event, actions);
                }
                self.on_body_chunk(conn, data)
            }
            Event::HttpBodyComplete => {
                if !conn.is_form_target {
                    return self.passthrough(conn, event, actions);
                }
                match self.commit(conn, actions) {
                    Ok(disposition) => disposition,
                    Err(e) => {
                        warn!(error = %e, "message commit failed");
                        Disposition::Close
                    }
                }
            }
            Event::ProtocolDrop => {
                conn.accumulator = None;
                self.passthrough(conn, event, actions)
            }
            Event::Other { .. } => self.passthrough(conn, event, actions),
        }
    }

    fn on_established(&self, conn: &mut ConnectionState) -> Disposition {
        conn.auth = self.ctx.auth().session_info(conn.auth_session.as_ref());
        info!(
            username = %conn.auth.username,
            email = %conn.auth.email,
            mask = conn.auth.mask,
            "messageboard live session"
        );
        if conn.auth.username.is_empty() {
            warn!("messageboard live session attempt with no session");
            return Disposition::Close;
        }
        Disposition::Continue
    }

    fn on_body_chunk(&self, conn: &mut ConnectionState, data: &[u8]) -> Disposition {
        let accumulator = conn
            .accumulator
            .get_or_insert_with(|| FormAccumulator::new(&FIELD_NAMES, MAX_FORM_BYTES));
        match accumulator.feed(data) {
            Ok(()) => Disposition::Continue,
            Err(e) => {
                warn!(error = %e, "form body rejected");
                conn.accumulator = None;
                Disposition::Close
            }
        }
    }

    /// Finalize the form, persist one message, answer 200 and signal the
    /// transaction complete. A failure at any step closes the connection
    /// and nothing half-done reaches the store.
    fn commit(
        &self,
        conn: &mut ConnectionState,
        actions: &mut dyn HostActions,
    ) -> anyhow::Result<Disposition> {
        let Some(accumulator) = conn.accumulator.take() else {
            bail!("form body completed without any body data");
        };
        let fields = accumulator.finalize();

        conn.auth = self.ctx.auth().session_info(conn.auth_session.as_ref());
        info!(
            submit = %String::from_utf8_lossy(fields.get(FormField::Submit.index())),
            username = %conn.auth.username,
            "messageboard submit"
        );

        let message = NewMessage {
            username: conn.auth.username.clone(),
            email: conn.auth.email.clone(),
            ip: conn.peer.clone(),
            content: fields.get(FormField::Msg.index()).to_vec(),
        };
        let id = self.ctx.store().insert(&message)?;
        debug!(id, "message stored");

        let mut headers = PaddedBuffer::new(RESPONSE_HEADROOM);
        response::add_status(&mut headers, StatusCode::Ok)?;
        response::add_header(&mut headers, "content-type", "text/plain")?;
        response::add_content_length(&mut headers, RESPONSE_BODY.len())?;
        response::finalize_headers(&mut headers)?;
        let header_len = headers.len();
        let n = actions.write(WriteKind::HttpHeaders, &mut headers)?;
        if n != header_len {
            bail!("header write returned {n} of {header_len}");
        }

        let mut body = PaddedBuffer::new(RESPONSE_BODY.len());
        body.append(RESPONSE_BODY)?;
        let n = actions.write(WriteKind::HttpBody, &mut body)?;
        if n != RESPONSE_BODY.len() {
            bail!("body write returned {n} of {}", RESPONSE_BODY.len());
        }

        if !actions.transaction_completed() {
            return Ok(Disposition::Close);
        }
        Ok(Disposition::Continue)
    }

    fn passthrough(
        &self,
        conn: &mut ConnectionState,
        event: &Event<'_>,
        actions: &mut dyn HostActions,
    ) -> Disposition {
        self.ctx
            .auth()
            .handle_event(conn.auth_session.as_mut(), event, actions)
    }
}
