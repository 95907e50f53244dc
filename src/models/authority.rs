//! Remote authority client.
//!
//! The authority owns the rules: it validates moves and reports check,
//! mate and draws. [`Authority`] is the seam the game model talks through;
//! [`HttpAuthority`] is the real HTTP implementation. Calls are blocking and
//! are meant to run on the link's worker thread, never on the thread that
//! owns the session.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::domain::protocol::{
    self, GameStatus, MOVE_PARAM, MOVE_PATH, MoveConfirmation, NEW_GAME_PATH, STATUS_PATH,
};
use crate::error::TransportError;

pub trait Authority {
    /// Tell the authority a new game begins
    fn start_new_game(&self) -> Result<(), TransportError>;

    /// Submit a move. `Ok(None)` means the authority rejected it.
    fn submit_move(&self, notation: &str) -> Result<Option<MoveConfirmation>, TransportError>;

    /// Status of the position after the last accepted move
    fn query_status(&self) -> Result<GameStatus, TransportError>;
}

pub struct HttpAuthority {
    client: Client,
    base: Url,
}

impl HttpAuthority {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base, client))
    }

    pub fn with_client(mut base: Url, client: Client) -> Self {
        // join() replaces the last segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base.join(path)?)
    }

    fn read_body(response: Response) -> Result<String, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }
        Ok(response.text()?)
    }
}

impl Authority for HttpAuthority {
    fn start_new_game(&self) -> Result<(), TransportError> {
        let url = self.endpoint(NEW_GAME_PATH)?;
        let body = Self::read_body(self.client.post(url).send()?)?;
        debug!("new game: {}", body);
        Ok(())
    }

    fn submit_move(&self, notation: &str) -> Result<Option<MoveConfirmation>, TransportError> {
        let mut url = self.endpoint(MOVE_PATH)?;
        url.query_pairs_mut().append_pair(MOVE_PARAM, notation);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(protocol::move_request_body(notation))
            .send()?;
        let body = Self::read_body(response)?;
        debug!("move {}: {}", notation, body);
        Ok(protocol::parse_move_response(&body)?)
    }

    fn query_status(&self) -> Result<GameStatus, TransportError> {
        let url = self.endpoint(STATUS_PATH)?;
        let body = Self::read_body(self.client.get(url).send()?)?;
        debug!("status: {}", body);
        Ok(protocol::parse_status_response(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_gets_trailing_slash() {
        let base = Url::parse("http://localhost:8080/api").unwrap();
        let authority = HttpAuthority::with_client(base, Client::new());
        assert_eq!(authority.base().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            authority.endpoint(MOVE_PATH).unwrap().as_str(),
            "http://localhost:8080/api/move"
        );
    }

    #[test]
    fn test_root_base() {
        let base = Url::parse("http://localhost:8080/").unwrap();
        let authority = HttpAuthority::with_client(base, Client::new());
        assert_eq!(
            authority.endpoint(STATUS_PATH).unwrap().as_str(),
            "http://localhost:8080/status"
        );
    }
}
