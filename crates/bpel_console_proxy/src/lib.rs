//! BPEL Console server side: application properties and the REST proxy.
//!
//! The browser cannot always carry credentials for the backend REST
//! services, so the console server proxies those calls and injects
//! authentication. This crate holds the pieces that decide *what* to send:
//!
//! - [`Properties`] / [`RefreshingProperties`]: `bpel-console.properties`,
//!   re-read when the file changes
//! - [`ProxySettings`]: proxy URL template and provider choice
//! - [`AuthProvider`]: basic and SAML bearer-token credentials
//! - [`ProxyPlan`]: the outbound request for one inbound call
//!
//! Moving bytes over the network is left to the embedding server.

pub mod auth;
pub mod error;
pub mod keys;
pub mod properties;
pub mod proxy;
pub mod refresh;

pub use auth::{
    basic_auth_header, AssertionIssuer, AuthProvider, AuthProviderKind, BasicAuthProvider,
    KeystoreSettings, SamlBearerTokenProvider, SamlSettings,
};
pub use error::{ProxyError, Result};
pub use properties::Properties;
pub use proxy::{
    filter_response_headers, method_carries_body, InboundRequest, ProxyPlan, ProxySettings,
};
pub use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
pub use reqwest::Method;
pub use refresh::{ConfigLocation, RefreshingProperties};
