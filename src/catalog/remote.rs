use super::model::SearchResponse;
use super::{into_recipes, CatalogError};
use crate::Recipe;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes/findByIngredients";
const DEFAULT_MAX_RESULTS: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the recipe search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    pub max_results: u32,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A search-by-ingredient request.
///
/// The request is plain data so hosts with their own HTTP stack (mobile
/// apps, for instance) can build the URL here, perform the GET themselves
/// and hand the body to [`decode_response`].
///
/// # Examples
///
/// ```
/// use recipe_planner::{RemoteConfig, RemoteQuery};
///
/// let config = RemoteConfig {
///     api_key: "secret".to_string(),
///     ..RemoteConfig::default()
/// };
/// let query = RemoteQuery::new(config, ["pollo", "arroz"]);
/// let url = query.request_url()?;
/// assert_eq!(url.query(), Some("apiKey=secret&ingredients=pollo%2Carroz&number=10"));
/// # Ok::<(), recipe_planner::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RemoteQuery {
    config: RemoteConfig,
    ingredients: Vec<String>,
}

impl RemoteQuery {
    pub fn new<I, S>(config: RemoteConfig, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RemoteQuery {
            config,
            ingredients: ingredients
                .into_iter()
                .map(Into::into)
                .map(|s: String| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Builds `<base>?apiKey=..&ingredients=a,b&number=..`.
    pub fn request_url(&self) -> Result<Url, CatalogError> {
        let url = Url::parse_with_params(
            &self.config.base_url,
            &[
                ("apiKey", self.config.api_key.clone()),
                ("ingredients", self.ingredients.join(",")),
                ("number", self.config.max_results.to_string()),
            ],
        )?;
        Ok(url)
    }
}

/// Decodes a search response body: a JSON array of recipe records or a
/// `{"recipes": [...]}` document.
pub fn decode_response(body: &str) -> Result<Vec<Recipe>, CatalogError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    into_recipes(response.into_records())
}

#[cfg(feature = "remote")]
mod transport {
    use super::{decode_response, RemoteQuery};
    use crate::catalog::{CatalogError, CatalogProvider};
    use crate::Recipe;
    use reqwest::blocking::Client;
    use reqwest::StatusCode;
    use std::time::Duration;
    use tracing::{debug, info};

    /// Fetches the catalog from the search service over blocking HTTP.
    pub struct RemoteCatalog {
        client: Client,
        query: RemoteQuery,
    }

    impl RemoteCatalog {
        pub fn new(query: RemoteQuery) -> Result<Self, CatalogError> {
            let client = Client::builder()
                .timeout(Duration::from_secs(query.config().timeout_secs))
                .build()
                .map_err(|e| CatalogError::Transport(format!("Failed to create HTTP client: {e}")))?;
            Ok(RemoteCatalog { client, query })
        }
    }

    impl CatalogProvider for RemoteCatalog {
        fn load(&self) -> Result<Vec<Recipe>, CatalogError> {
            let url = self.query.request_url()?;
            debug!(host = ?url.host_str(), "Requesting recipe search");

            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| CatalogError::Transport(e.to_string()))?;

            match response.status() {
                StatusCode::NOT_FOUND => {
                    return Err(CatalogError::NotFound(self.query.config().base_url.clone()))
                }
                status if !status.is_success() => {
                    return Err(CatalogError::Transport(format!("HTTP {status}")))
                }
                _ => {}
            }

            let body = response
                .text()
                .map_err(|e| CatalogError::Transport(e.to_string()))?;
            let recipes = decode_response(&body)?;
            info!(count = recipes.len(), "Fetched remote catalog");
            Ok(recipes)
        }

        fn describe(&self) -> String {
            format!("remote catalog at {}", self.query.config().base_url)
        }
    }
}

#[cfg(feature = "remote")]
pub use transport::RemoteCatalog;


#[cfg(all(test, feature = "remote"))]
mod transport_tests {
    use super::*;
    use crate::catalog::{CatalogProvider, FailureKind};
    use crate::{filter, PreferenceSet};
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Serves one canned response and hands back the request line.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request_head(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{addr}/recipes/findByIngredients"), handle)
    }

    fn read_request_head(stream: &mut TcpStream) -> String {
        let mut buf = [0_u8; 1024];
        let mut request = Vec::new();
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = stream.read(&mut buf).unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        String::from_utf8_lossy(&request).into_owned()
    }

    fn catalog_for(base_url: String) -> RemoteCatalog {
        let config = RemoteConfig {
            base_url,
            api_key: "k".to_string(),
            max_results: 2,
            timeout_secs: 5,
        };
        RemoteCatalog::new(RemoteQuery::new(config, ["chicken"])).unwrap()
    }

    #[test]
    fn test_load_decodes_search_results() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id": 7, "title": "Chicken Soup", "image": "https://img.test/7.jpg",
                "usedIngredients": [{"name": "chicken", "amount": 1, "unit": "lb"}],
                "missedIngredients": [{"name": "carrot", "amount": 2, "unit": ""}]}]"#,
        );

        let recipes = catalog_for(base).load().unwrap();
        let request_line = server.join().unwrap();
        assert!(request_line.starts_with(
            "GET /recipes/findByIngredients?apiKey=k&ingredients=chicken&number=2 "
        ));

        assert_eq!(recipes.len(), 1);
        let prefs = PreferenceSet::builder().include("chicken").build();
        assert_eq!(filter(&recipes, &prefs), recipes);
    }

    #[test]
    fn test_load_maps_not_found() {
        let (base, server) = serve_once("404 Not Found", "");
        let err = catalog_for(base).load().unwrap_err();
        server.join().unwrap();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[test]
    fn test_load_maps_server_error_to_transport() {
        let (base, server) = serve_once("500 Internal Server Error", "oops");
        let err = catalog_for(base).load().unwrap_err();
        server.join().unwrap();
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_load_maps_unreachable_host_to_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = catalog_for(format!("http://{addr}/search")).load().unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn test_load_rejects_malformed_body() {
        let (base, server) = serve_once("200 OK", "<html>rate limited</html>");
        let err = catalog_for(base).load().unwrap_err();
        server.join().unwrap();
        assert_eq!(err.kind(), FailureKind::Decode);
    }
}
