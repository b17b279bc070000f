use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use backlog_core::{
    Game, GamePayload, GameSeries, Movie, MovieSeries, NewSeries, Series, SeriesGamePayload,
    SeriesKind, SeriesRename,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::gateway::Gateway;
use crate::types::{Deleted, ErrorBody, GameChildAdded, HealthStatus};

/// Longest slice of a response body quoted in an error message.
const EXCERPT_CHARS: usize = 200;

/// HTTP gateway to the backlog service. All paths live under `<origin>/api`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    api_root: String,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_root: config.api_root(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.api_root, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    fn request_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    /// Send a request and decode a JSON body, mapping non-2xx statuses to
    /// `NotFound` / `Server`.
    async fn send<T: DeserializeOwned + Send>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let text = self.send_text(request).await?;
        serde_json::from_str(&text).map_err(|e| {
            ClientError::Parse(format!("{e}. Response: {}", excerpt(&text)))
        })
    }

    /// Send and return the raw body of a successful response.
    async fn send_text(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(error_message(&text)));
        }
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(text)
    }

    async fn send_series(
        &self,
        kind: SeriesKind,
        request: RequestBuilder,
    ) -> Result<Series, ClientError> {
        Ok(match kind {
            SeriesKind::Game => Series::Game(self.send::<GameSeries>(request).await?),
            SeriesKind::Movie => Series::Movie(self.send::<MovieSeries>(request).await?),
        })
    }
}

impl Gateway for HttpGateway {
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.request(Method::GET, "")).await
    }

    async fn list_games(&self, limit: usize, skip: usize) -> Result<Vec<Game>, ClientError> {
        let request = self
            .request(Method::GET, "games")
            .query(&[("limit", limit), ("skip", skip)]);
        self.send(request).await
    }

    async fn get_game(&self, id: &str) -> Result<Game, ClientError> {
        self.send(self.request(Method::GET, &format!("games/{id}")))
            .await
    }

    async fn create_game(&self, payload: &GamePayload) -> Result<Game, ClientError> {
        self.send(self.request_json(Method::POST, "games", payload))
            .await
    }

    async fn update_game(&self, id: &str, payload: &GamePayload) -> Result<Game, ClientError> {
        self.send(self.request_json(Method::PUT, &format!("games/{id}"), payload))
            .await
    }

    async fn delete_game(&self, id: &str) -> Result<Deleted, ClientError> {
        self.send(self.request(Method::DELETE, &format!("games/{id}")))
            .await
    }

    async fn list_game_series(&self) -> Result<Vec<GameSeries>, ClientError> {
        self.send(self.request(Method::GET, SeriesKind::Game.resource()))
            .await
    }

    async fn list_movie_series(&self) -> Result<Vec<MovieSeries>, ClientError> {
        self.send(self.request(Method::GET, SeriesKind::Movie.resource()))
            .await
    }

    async fn get_series(&self, kind: SeriesKind, id: &str) -> Result<Series, ClientError> {
        let request = self.request(Method::GET, &format!("{}/{id}", kind.resource()));
        self.send_series(kind, request).await
    }

    async fn create_series(
        &self,
        kind: SeriesKind,
        payload: &NewSeries,
    ) -> Result<Series, ClientError> {
        let request = self.request_json(Method::POST, kind.resource(), payload);
        self.send_series(kind, request).await
    }

    async fn update_series(
        &self,
        kind: SeriesKind,
        id: &str,
        payload: &SeriesRename,
    ) -> Result<Series, ClientError> {
        let request =
            self.request_json(Method::PUT, &format!("{}/{id}", kind.resource()), payload);
        self.send_series(kind, request).await
    }

    async fn delete_series(&self, kind: SeriesKind, id: &str) -> Result<Deleted, ClientError> {
        self.send(self.request(Method::DELETE, &format!("{}/{id}", kind.resource())))
            .await
    }

    async fn add_game_to_series(
        &self,
        series_id: &str,
        payload: &SeriesGamePayload,
    ) -> Result<GameChildAdded, ClientError> {
        let path = child_path(SeriesKind::Game, series_id);
        let text = self
            .send_text(self.request_json(Method::POST, &path, payload))
            .await?;
        Ok(decode_child_added(&text))
    }

    async fn add_movie_to_series(
        &self,
        series_id: &str,
        movie: &Movie,
    ) -> Result<MovieSeries, ClientError> {
        let path = child_path(SeriesKind::Movie, series_id);
        self.send(self.request_json(Method::POST, &path, movie))
            .await
    }
}

/// The write has already succeeded by the time the body is read, so a body
/// of any other shape is kept as raw JSON rather than turned into an error.
fn decode_child_added(body: &str) -> GameChildAdded {
    if body.trim().is_empty() {
        return GameChildAdded::Other(serde_json::Value::Null);
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        log::debug!("Unrecognised add-game response ({e}); keeping it as text");
        GameChildAdded::Other(serde_json::Value::String(excerpt(body)))
    })
}

fn child_path(kind: SeriesKind, series_id: &str) -> String {
    format!("{}/{series_id}/{}", kind.resource(), kind.child_resource())
}

/// Join the API root and a relative path. The empty path addresses the root
/// itself, which the service serves with a trailing slash.
fn join_url(api_root: &str, path: &str) -> String {
    format!("{}/{}", api_root.trim_end_matches('/'), path)
}

/// Human-readable message from an error body: the `detail` field when the
/// body has one, otherwise a truncated excerpt of the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => excerpt(&detail.to_string()),
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => excerpt(body),
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    }
}
