//! `/questions` endpoints.

use sv_core::entities::{Question, RecentSearches};
use sv_core::responses::{DataEnvelope, RecentSearchesResponse, SearchResponse};

use crate::{ApiClient, error::ClientError, http::check_response, http::decode};

/// Path and query string for a question search.
///
/// `user_id` is only sent when known, `rerank=true` only when requested.
#[must_use]
pub fn search_path(query: &str, user_id: Option<i64>, rerank: bool) -> String {
    let mut path = format!("/questions/search?q={}", urlencoding::encode(query));
    if let Some(user_id) = user_id {
        path.push_str(&format!("&user_id={user_id}"));
    }
    if rerank {
        path.push_str("&rerank=true");
    }
    path
}

/// Path for a single question, optionally asking for reranked answers.
#[must_use]
pub fn question_path(id: i64, rerank: bool) -> String {
    if rerank {
        format!("/questions/{id}?rerank=true")
    } else {
        format!("/questions/{id}")
    }
}

/// Path for a user's recent searches.
#[must_use]
pub fn recent_searches_path(user_id: i64) -> String {
    format!("/questions/recent-searches?user_id={user_id}")
}

impl ApiClient {
    /// Search questions.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn search(
        &self,
        query: &str,
        user_id: Option<i64>,
        rerank: bool,
    ) -> Result<SearchResponse, ClientError> {
        let url = self.url(&search_path(query, user_id, rerank));
        tracing::debug!(%url, rerank, "searching questions");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let response: SearchResponse = decode(resp).await?;
        if let Some(note) = &response.meta.note {
            tracing::info!(%note, "search returned a backend note");
        }
        Ok(response)
    }

    /// Fetch one question with its answers. With `rerank`, the backend
    /// attaches `reranked_answers`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search`].
    pub async fn get_question(&self, id: i64, rerank: bool) -> Result<Question, ClientError> {
        let url = self.url(&question_path(id, rerank));
        tracing::debug!(%url, rerank, "fetching question");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(decode::<DataEnvelope<Question>>(resp).await?.into_inner())
    }

    /// Fetch the cache and history search lists for a user.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search`].
    pub async fn recent_searches(&self, user_id: i64) -> Result<RecentSearches, ClientError> {
        let url = self.url(&recent_searches_path(user_id));
        tracing::debug!(%url, "fetching recent searches");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        Ok(decode::<RecentSearchesResponse>(resp).await?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_path_encodes_query() {
        assert_eq!(
            search_path("c++ move & copy", None, false),
            "/questions/search?q=c%2B%2B%20move%20%26%20copy"
        );
    }

    #[test]
    fn search_path_adds_user_and_rerank() {
        assert_eq!(
            search_path("tokio", Some(3), true),
            "/questions/search?q=tokio&user_id=3&rerank=true"
        );
    }

    #[test]
    fn search_path_omits_rerank_when_false() {
        assert_eq!(
            search_path("tokio", Some(3), false),
            "/questions/search?q=tokio&user_id=3"
        );
    }

    #[test]
    fn question_path_variants() {
        assert_eq!(question_path(11, false), "/questions/11");
        assert_eq!(question_path(11, true), "/questions/11?rerank=true");
    }

    #[test]
    fn recent_searches_path_has_user() {
        assert_eq!(
            recent_searches_path(9),
            "/questions/recent-searches?user_id=9"
        );
    }
}
