use std::future::Future;

use crate::api::ApiError;

/// Whether a view reads from the backend or from the fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataMode {
    #[default]
    Live,
    Mock,
}

impl DataMode {
    pub fn from_flag(use_mock: bool) -> Self {
        if use_mock {
            DataMode::Mock
        } else {
            DataMode::Live
        }
    }

    pub fn is_mock(&self) -> bool {
        *self == DataMode::Mock
    }
}

/// Where a read got its data from
#[derive(Debug)]
pub enum Fetched<T> {
    Live(T),
    /// Mock mode was already on
    Mock(T),
    /// The live read failed and the fixtures had an answer
    Fallback { data: T, cause: ApiError },
    /// Mock mode was on and the fixtures had no answer
    MissingFromMock,
    Failed(ApiError),
}

impl<T> Fetched<T> {
    /// Mode the caller should display after this read
    pub fn mode(&self, current: DataMode) -> DataMode {
        match self {
            Fetched::Live(_) => DataMode::Live,
            Fetched::Mock(_) | Fetched::Fallback { .. } => DataMode::Mock,
            Fetched::MissingFromMock | Fetched::Failed(_) => current,
        }
    }
}

/// Run a read against the backend, or against the fixtures when mock mode is
/// on or the backend call failed.
///
/// `mock` is only consulted when needed. An expired session never falls back.
pub async fn with_fallback<T, F, M>(mode: DataMode, live: F, mock: M) -> Fetched<T>
where
    F: Future<Output = Result<T, ApiError>>,
    M: FnOnce() -> Option<T>,
{
    match mode {
        DataMode::Mock => match mock() {
            Some(data) => Fetched::Mock(data),
            None => Fetched::MissingFromMock,
        },
        DataMode::Live => match live.await {
            Ok(data) => Fetched::Live(data),
            Err(cause) if cause.allows_fallback() => match mock() {
                Some(data) => {
                    tracing::warn!("Falling back to mock data: {}", cause);
                    Fetched::Fallback { data, cause }
                }
                None => Fetched::Failed(cause),
            },
            Err(cause) => Fetched::Failed(cause),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_live_success_skips_mock() {
        let fetched = with_fallback(DataMode::Live, async { Ok(1) }, || -> Option<i32> {
            panic!("mock consulted")
        })
        .await;

        assert_matches!(fetched, Fetched::Live(1));
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let fetched = with_fallback(
            DataMode::Live,
            async { Err(ApiError::Transport("connection refused".into())) },
            || Some(7),
        )
        .await;

        assert_eq!(fetched.mode(DataMode::Live), DataMode::Mock);
        assert_matches!(fetched, Fetched::Fallback { data: 7, cause: ApiError::Transport(_) });
    }

    #[tokio::test]
    async fn test_failure_without_fixture_is_reported() {
        let fetched: Fetched<i32> = with_fallback(
            DataMode::Live,
            async { Err(ApiError::NotFound("athlete".into())) },
            || None,
        )
        .await;

        assert_matches!(fetched, Fetched::Failed(ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_expired_session_never_falls_back() {
        let fetched = with_fallback(
            DataMode::Live,
            async { Err(ApiError::SessionExpired("401".into())) },
            || Some(7),
        )
        .await;

        assert_matches!(fetched, Fetched::Failed(ApiError::SessionExpired(_)));
    }

    #[tokio::test]
    async fn test_mock_mode_never_calls_live() {
        let fetched = with_fallback(
            DataMode::Mock,
            async { Err(ApiError::Unknown("live consulted".into())) },
            || Some("fixture"),
        )
        .await;
        assert_matches!(fetched, Fetched::Mock("fixture"));

        let missing: Fetched<&str> =
            with_fallback(DataMode::Mock, async { Ok("live") }, || None).await;
        assert_matches!(missing, Fetched::MissingFromMock);
    }
}
