use thiserror::Error;

/// Failures of the forecast pipeline: resolve → fetch → normalize.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No prefecture-level office matched the caller's input.
    #[error("都道府県名 '{input}' に該当する地域が見つかりませんでした")]
    AreaNotFound { input: String },

    /// Network, DNS, timeout or non-2xx failure talking to JMA.
    #[error("データの取得に失敗しました: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("予報データの形式が不正です: {0}")]
    Malformed(String),
}

impl ForecastError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ForecastError::AreaNotFound { .. })
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ForecastError::Malformed(e.to_string())
        } else {
            ForecastError::Transport(e.to_string())
        }
    }
}
