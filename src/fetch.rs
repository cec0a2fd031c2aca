use crate::core::{NavigationError, PageSource};
use gloo_net::http::Request;

/// Fetches page markup from the site itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpSource;

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, NavigationError> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| NavigationError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        if resp.status() != 200 {
            return Err(NavigationError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        resp.text().await.map_err(|e| NavigationError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
