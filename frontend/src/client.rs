use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::TransportError;
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, GlooTransport, Transport};

/// Authenticated fetch wrapper shared by every endpoint.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<AppConfig>,
    session: Session,
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Session, transport: Rc<dyn Transport>) -> Self {
        ApiClient {
            config: Rc::new(config),
            session,
            transport,
        }
    }

    pub fn browser(config: AppConfig) -> Self {
        Self::new(config, Session::from_browser(), Rc::new(GlooTransport))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resolve_url(&self, url: &str) -> String {
        match &self.config.api_base_url {
            Some(base) if !url.starts_with("http") => format!("{}{}", base, url),
            _ => url.to_string(),
        }
    }

    /// Applies the base URL and, when a token is stored, the bearer header.
    /// The bearer header replaces any `Authorization` the caller supplied.
    pub fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        request.url = self.resolve_url(&request.url);
        if let Some(token) = self.session.current_token() {
            request
                .headers
                .retain(|(name, _)| !name.eq_ignore_ascii_case("Authorization"));
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        request
    }

    /// Sends the request and returns the response untouched. A non-2xx
    /// status is not an error here.
    pub async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let request = self.prepare(request);
        log::debug!("{:?} {}", request.method, request.url);
        self.transport.send(request).await
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && self.session == other.session
    }
}
