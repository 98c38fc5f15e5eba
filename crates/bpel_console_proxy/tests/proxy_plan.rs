//! End-to-end planning of proxied requests from a properties file.

use bpel_console_proxy::{
    basic_auth_header, filter_response_headers, AssertionIssuer, AuthProviderKind, HeaderMap,
    HeaderValue, InboundRequest, KeystoreSettings, Method, Properties, ProxyError, ProxySettings,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, TRANSFER_ENCODING};
use std::sync::Arc;

const BASIC_PROPERTIES: &str = r#"
# Backend REST endpoint, resolved per request
bpel-console.rest-proxy.proxy-url=SCHEME://HOST:PORT/gwt-console-server/rs/
bpel-console.rest-proxy.authentication.provider=org.jboss.bpm.console.server.RestProxyBasicAuthProvider
bpel-console.rest-proxy.authentication.basic.user=admin
bpel-console.rest-proxy.authentication.basic.password=overlord
"#;

const SAML_PROPERTIES: &str = r#"
bpel-console.rest-proxy.proxy-url=http://localhost:8080/riftsaw-rest
bpel-console.rest-proxy.authentication.provider=saml
bpel-console.rest-proxy.authentication.saml.issuer=/bpel-console
bpel-console.rest-proxy.authentication.saml.service=/riftsaw-rest
bpel-console.rest-proxy.authentication.saml.sign-assertions=false
"#;

struct StaticIssuer;

impl AssertionIssuer for StaticIssuer {
    fn create_assertion(&self, issuer: &str, service: &str) -> bpel_console_proxy::Result<String> {
        Ok(format!("{}->{}", issuer, service))
    }

    fn sign_assertion(
        &self,
        _assertion: &str,
        _keystore: &KeystoreSettings,
    ) -> bpel_console_proxy::Result<String> {
        Err(ProxyError::assertion("signing not expected"))
    }
}

#[test]
fn test_post_with_basic_auth() -> anyhow::Result<()> {
    let props = Properties::parse(BASIC_PROPERTIES)?;
    let settings = ProxySettings::from_properties(&props)?;
    assert_eq!(settings.auth_provider_kind(), Some(AuthProviderKind::Basic));
    let provider = settings.build_auth_provider(None)?.expect("provider configured");

    let req = InboundRequest::new(Method::POST, "http", "console.local", 8080)
        .with_path_info("/process/definition/42/instances")
        .with_query("correlation=abc")
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .with_header(ACCEPT, HeaderValue::from_static("application/json"))
        .with_header(ACCEPT, HeaderValue::from_static("text/plain"))
        .try_with_header("Authorization", "Bearer from-browser")?
        .with_body(r#"{"start":true}"#);

    let plan = settings.plan(&req, Some(provider.as_ref()))?;
    assert_eq!(plan.method, Method::POST);
    assert_eq!(
        plan.url.as_str(),
        "http://console.local:8080/gwt-console-server/rs/process/definition/42/instances?correlation=abc"
    );
    let accept: Vec<_> = plan.headers.get_all(ACCEPT).iter().collect();
    assert_eq!(accept, vec!["application/json", "text/plain"]);
    let auth: Vec<_> = plan.headers.get_all(AUTHORIZATION).iter().collect();
    assert_eq!(auth, vec![basic_auth_header("admin", "overlord").as_str()]);
    assert_eq!(plan.body.as_deref(), Some(br#"{"start":true}"#.as_slice()));
    Ok(())
}

#[test]
fn test_get_keeps_method_and_drops_body() -> anyhow::Result<()> {
    let settings = ProxySettings::from_properties(&Properties::parse(BASIC_PROPERTIES)?)?;
    let req = InboundRequest::new(Method::GET, "https", "console.local", 443).with_body("ignored");

    let plan = settings.plan(&req, None)?;
    assert_eq!(plan.method, Method::GET);
    assert_eq!(plan.url.as_str(), "https://console.local/gwt-console-server/rs");
    assert!(plan.body.is_none());
    assert!(plan.headers.get(AUTHORIZATION).is_none());
    Ok(())
}

#[test]
fn test_saml_bearer_token() -> anyhow::Result<()> {
    let settings = ProxySettings::from_properties(&Properties::parse(SAML_PROPERTIES)?)?;
    let provider = settings
        .build_auth_provider(Some(Arc::new(StaticIssuer)))?
        .expect("provider configured");
    assert_eq!(provider.name(), "saml");

    let plan = settings.plan(&InboundRequest::new(Method::GET, "http", "h", 80), Some(provider.as_ref()))?;
    assert_eq!(
        plan.headers[AUTHORIZATION],
        basic_auth_header("SAML-BEARER-TOKEN", "/bpel-console->/riftsaw-rest")
    );
    Ok(())
}

#[test]
fn test_unknown_provider_rejected() {
    let text = BASIC_PROPERTIES.replace(
        "org.jboss.bpm.console.server.RestProxyBasicAuthProvider",
        "com.example.CustomProvider",
    );
    let props = Properties::parse(&text).unwrap();
    assert!(matches!(
        ProxySettings::from_properties(&props),
        Err(ProxyError::UnknownAuthProvider(_))
    ));
}

#[test]
fn test_response_headers_pass_through_without_transfer_encoding() {
    let mut response = HeaderMap::new();
    response.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
    let filtered = filter_response_headers(&response);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[CONTENT_TYPE], "application/json");
}
