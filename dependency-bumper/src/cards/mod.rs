//! Review cards on the tracking board.
//!
//! Every processed project gets a card in a fixed board list so a human can
//! review the pushed branch, or find out why nothing was pushed.

mod error;
mod status;

pub use error::CardError;
pub use status::CardStatus;

use crate::config::Credentials;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, info_span, warn, Instrument};

/// Card as returned by the board API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedCard {
    /// Card id.
    #[serde(default)]
    pub id: Option<String>,

    /// Short link to the card.
    #[serde(rename = "shortUrl", default)]
    pub short_url: Option<String>,
}

/// Client for the board's card API.
#[derive(Clone)]
pub struct BoardClient {
    client: Client,
    cards_url: String,
    key: String,
    token: String,
    list_id: String,
}

impl BoardClient {
    /// Creates a client for the board API at `api_url`.
    pub fn new(client: Client, api_url: &str, credentials: &Credentials) -> Self {
        Self {
            client,
            cards_url: format!("{}/cards", api_url.trim_end_matches('/')),
            key: credentials.board_key.clone(),
            token: credentials.board_token.clone(),
            list_id: credentials.board_list_id.clone(),
        }
    }

    /// Creates a card in the configured list.
    ///
    /// Any 2xx reply counts as created. A body that does not decode leaves
    /// the returned card empty.
    ///
    /// # Errors
    ///
    /// Returns [`CardError`] if the request fails or the board rejects it.
    pub async fn create_card(&self, name: &str, description: &str) -> Result<CreatedCard, CardError> {
        debug!(name = %name, "Creating card");

        let response = self
            .client
            .post(&self.cards_url)
            .query(&[
                ("idList", self.list_id.as_str()),
                ("name", name),
                ("desc", description),
                ("key", self.key.as_str()),
                ("token", self.token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CardError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.unwrap_or_default();
        let card = serde_json::from_str::<CreatedCard>(&body).unwrap_or_else(|e| {
            warn!(error = %e, "Card created but the response body could not be decoded");
            CreatedCard::default()
        });
        Ok(card)
    }

    /// Files a card and reports the result as a status instead of an error.
    pub async fn file_card(&self, name: &str, description: &str) -> CardStatus {
        let span = info_span!("card", name = %name);

        async {
            info!("Creating review card");
            match self.create_card(name, description).await {
                Ok(card) => {
                    info!(card_id = ?card.id, "Card created");
                    CardStatus::Created {
                        id: card.id,
                        url: card.short_url,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to create card");
                    CardStatus::Failed {
                        error: e.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn credentials() -> Credentials {
        Credentials {
            github_token: "ghp".to_string(),
            board_key: "board-key".to_string(),
            board_token: "board-token".to_string(),
            board_list_id: "list-1".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_card_with_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cards")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("idList".into(), "list-1".into()),
                Matcher::UrlEncoded("name".into(), "api: update Pkg to 1.0.0".into()),
                Matcher::UrlEncoded("desc".into(), "Outcome: updated".into()),
                Matcher::UrlEncoded("key".into(), "board-key".into()),
                Matcher::UrlEncoded("token".into(), "board-token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "card-9", "shortUrl": "https://trello.com/c/abc"}"#)
            .create_async()
            .await;

        let client = BoardClient::new(Client::new(), &server.url(), &credentials());
        let card = client
            .create_card("api: update Pkg to 1.0.0", "Outcome: updated")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(card.id.as_deref(), Some("card-9"));
        assert_eq!(card.short_url.as_deref(), Some("https://trello.com/c/abc"));
    }

    #[tokio::test]
    async fn trailing_slash_in_api_url_is_ignored() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": "card-1"}"#)
            .create_async()
            .await;

        let api_url = format!("{}/", server.url());
        let client = BoardClient::new(Client::new(), &api_url, &credentials());
        let status = client.file_card("title", "desc").await;

        mock.assert_async().await;
        assert_eq!(
            status,
            CardStatus::Created {
                id: Some("card-1".to_string()),
                url: None
            }
        );
    }

    #[tokio::test]
    async fn rejected_card_is_reported_as_failed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cards")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("invalid token")
            .create_async()
            .await;

        let client = BoardClient::new(Client::new(), &server.url(), &credentials());
        let err = client.create_card("title", "desc").await.unwrap_err();

        mock.assert_async().await;
        match err {
            CardError::Rejected { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        let status = client.file_card("title", "desc").await;
        assert!(!status.is_created());
    }

    #[tokio::test]
    async fn undecodable_success_body_still_counts_as_created() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cards")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let client = BoardClient::new(Client::new(), &server.url(), &credentials());
        let status = client.file_card("title", "desc").await;

        mock.assert_async().await;
        assert_eq!(status, CardStatus::Created { id: None, url: None });
    }
}
