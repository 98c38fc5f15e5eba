//! Mapping an inbound console request onto the backend REST service.

use crate::auth::{
    AssertionIssuer, AuthProvider, AuthProviderKind, BasicAuthProvider, SamlBearerTokenProvider,
    SamlSettings,
};
use crate::error::{ProxyError, Result};
use crate::keys;
use crate::properties::Properties;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, TRANSFER_ENCODING};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// Whether the request body is forwarded for `method`.
pub fn method_carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// The parts of a browser request the proxy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub method: Method,
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Path below the proxy servlet mount, e.g. `/process/definitions`
    pub path_info: Option<String>,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl InboundRequest {
    pub fn new(method: Method, scheme: &str, host: &str, port: u16) -> Self {
        Self {
            method,
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
            path_info: None,
            query: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_path_info(mut self, path: impl Into<String>) -> Self {
        self.path_info = Some(path.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Append a header value, keeping earlier values of the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Append a header given as raw text, as read off the wire.
    pub fn try_with_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        Ok(self.with_header(name, value))
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// Outbound request for one proxied call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPlan {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// `None` for methods without a body
    pub body: Option<Vec<u8>>,
}

/// Proxy configuration taken from the application properties.
#[derive(Debug, Clone)]
pub struct ProxySettings {
    proxy_url: String,
    auth_provider: Option<AuthProviderKind>,
    params: Properties,
}

impl ProxySettings {
    /// Read the proxy URL template and provider choice.
    ///
    /// The full property set is kept so providers can read their own keys.
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let proxy_url = props.require(keys::PROXY_URL)?.to_string();
        let auth_provider = props
            .get(keys::AUTH_PROVIDER)
            .filter(|value| !value.trim().is_empty())
            .map(AuthProviderKind::parse)
            .transpose()?;
        tracing::debug!(
            proxy_url = %proxy_url,
            auth = auth_provider.map(AuthProviderKind::as_str).unwrap_or("none"),
            "Loaded REST proxy settings"
        );
        Ok(Self {
            proxy_url,
            auth_provider,
            params: props.clone(),
        })
    }

    /// The URL template, possibly containing `SCHEME`, `HOST` and `PORT`.
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    pub fn auth_provider_kind(&self) -> Option<AuthProviderKind> {
        self.auth_provider
    }

    /// Build the configured provider. SAML needs an assertion issuer.
    pub fn build_auth_provider(
        &self,
        issuer: Option<Arc<dyn AssertionIssuer>>,
    ) -> Result<Option<Box<dyn AuthProvider>>> {
        let provider: Box<dyn AuthProvider> = match self.auth_provider {
            None => return Ok(None),
            Some(AuthProviderKind::Basic) => {
                Box::new(BasicAuthProvider::from_properties(&self.params)?)
            }
            Some(AuthProviderKind::SamlBearerToken) => {
                let issuer = issuer.ok_or(ProxyError::MissingAssertionIssuer)?;
                let settings = SamlSettings::from_properties(&self.params)?;
                Box::new(SamlBearerTokenProvider::new(settings, issuer))
            }
        };
        Ok(Some(provider))
    }

    /// Backend URL for `req`: placeholders substituted, one trailing `/`
    /// dropped, then path info and query appended.
    pub fn target_url(&self, req: &InboundRequest) -> Result<Url> {
        let mut target = self
            .proxy_url
            .replace("SCHEME", &req.scheme)
            .replace("HOST", &req.host)
            .replace("PORT", &req.port.to_string());
        if target.ends_with('/') {
            target.pop();
        }
        if let Some(path) = &req.path_info {
            target.push_str(path);
        }
        if let Some(query) = &req.query {
            target.push('?');
            target.push_str(query);
        }
        Url::parse(&target).map_err(|source| ProxyError::InvalidUrl {
            url: target,
            source,
        })
    }

    /// Outbound request for `req`.
    ///
    /// Inbound headers are copied in order; the provider runs last so its
    /// credentials replace any the browser sent.
    pub fn plan(&self, req: &InboundRequest, auth: Option<&dyn AuthProvider>) -> Result<ProxyPlan> {
        let url = self.target_url(req)?;
        let mut headers = req.headers.clone();
        if let Some(provider) = auth {
            provider.provide_authentication(&mut headers)?;
        }
        let body = method_carries_body(&req.method).then(|| req.body.clone());
        tracing::info!(
            method = %req.method,
            url = %url,
            auth = auth.map(|p| p.name()).unwrap_or("none"),
            "Proxying request"
        );
        Ok(ProxyPlan {
            method: req.method.clone(),
            url,
            headers,
            body,
        })
    }
}

/// Response headers to pass back to the browser.
///
/// `Transfer-Encoding` is dropped because the server re-frames the body.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    filtered.remove(TRANSFER_ENCODING);
    filtered
}
