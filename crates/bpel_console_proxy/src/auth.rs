//! Credentials injected into proxied requests.

use crate::error::{ProxyError, Result};
use crate::keys;
use crate::properties::Properties;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::fmt;
use std::sync::Arc;

const SAML_BEARER_USER: &str = "SAML-BEARER-TOKEN";

/// Adds credentials to an outbound request.
pub trait AuthProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn provide_authentication(&self, headers: &mut HeaderMap) -> Result<()>;
}

/// Replace every `Authorization` value with `credentials`.
fn set_authorization(headers: &mut HeaderMap, credentials: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(credentials)?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(())
}

/// `Basic base64(user:password)`.
pub fn basic_auth_header(user: &str, password: &str) -> String {
    let token = general_purpose::STANDARD.encode(format!("{}:{}", user, password));
    format!("Basic {}", token)
}

/// Which provider the properties select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthProviderKind {
    Basic,
    SamlBearerToken,
}

impl AuthProviderKind {
    /// Accepts `basic` / `saml` in any case, or a provider class name
    /// ending in `RestProxyBasicAuthProvider` /
    /// `RestProxySAMLBearerTokenAuthProvider`.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let short = trimmed.rsplit('.').next().unwrap_or(trimmed);
        if trimmed.eq_ignore_ascii_case("basic") || short == "RestProxyBasicAuthProvider" {
            Ok(Self::Basic)
        } else if trimmed.eq_ignore_ascii_case("saml")
            || short == "RestProxySAMLBearerTokenAuthProvider"
        {
            Ok(Self::SamlBearerToken)
        } else {
            Err(ProxyError::UnknownAuthProvider(value.to_string()))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::SamlBearerToken => "saml",
        }
    }
}

impl fmt::Display for AuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed user/password credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthProvider {
    user: String,
    password: String,
}

impl BasicAuthProvider {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn from_properties(props: &Properties) -> Result<Self> {
        Ok(Self::new(
            props.require(keys::BASIC_AUTH_USER)?,
            props.require(keys::BASIC_AUTH_PASS)?,
        ))
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

impl fmt::Debug for BasicAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthProvider")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthProvider for BasicAuthProvider {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn provide_authentication(&self, headers: &mut HeaderMap) -> Result<()> {
        set_authorization(headers, &basic_auth_header(&self.user, &self.password))
    }
}

/// Keystore holding the signing key for SAML assertions.
#[derive(Clone, PartialEq, Eq)]
pub struct KeystoreSettings {
    pub path: String,
    pub password: Option<String>,
    pub key_alias: String,
    pub key_password: Option<String>,
}

impl fmt::Debug for KeystoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystoreSettings")
            .field("path", &self.path)
            .field("key_alias", &self.key_alias)
            .finish_non_exhaustive()
    }
}

/// SAML bearer-token settings read from properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamlSettings {
    pub issuer: String,
    pub service: String,
    /// Present only when assertions must be signed.
    pub keystore: Option<KeystoreSettings>,
}

impl SamlSettings {
    /// Signing is on only when `sign-assertions` is exactly `"true"`; it then
    /// needs the keystore path and key alias.
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let sign = props.get(keys::SAML_AUTH_SIGN_ASSERTIONS) == Some("true");
        let keystore = if sign {
            Some(KeystoreSettings {
                path: props.require(keys::SAML_AUTH_KEYSTORE)?.to_string(),
                password: props.get(keys::SAML_AUTH_KEYSTORE_PASSWORD).map(str::to_string),
                key_alias: props.require(keys::SAML_AUTH_KEY_ALIAS)?.to_string(),
                key_password: props.get(keys::SAML_AUTH_KEY_PASSWORD).map(str::to_string),
            })
        } else {
            None
        };
        Ok(Self {
            issuer: props.require(keys::SAML_AUTH_ISSUER)?.to_string(),
            service: props.require(keys::SAML_AUTH_SERVICE)?.to_string(),
            keystore,
        })
    }

    pub fn sign_assertions(&self) -> bool {
        self.keystore.is_some()
    }
}

/// Creates and signs SAML assertions. Supplied by the embedding server.
pub trait AssertionIssuer: Send + Sync {
    fn create_assertion(&self, issuer: &str, service: &str) -> Result<String>;

    fn sign_assertion(&self, assertion: &str, keystore: &KeystoreSettings) -> Result<String>;
}

/// Sends a fresh SAML assertion as the password of the
/// `SAML-BEARER-TOKEN` basic-auth user.
pub struct SamlBearerTokenProvider {
    settings: SamlSettings,
    issuer: Arc<dyn AssertionIssuer>,
}

impl SamlBearerTokenProvider {
    pub fn new(settings: SamlSettings, issuer: Arc<dyn AssertionIssuer>) -> Self {
        Self { settings, issuer }
    }

    pub fn settings(&self) -> &SamlSettings {
        &self.settings
    }

    fn bearer_assertion(&self) -> Result<String> {
        let assertion = self
            .issuer
            .create_assertion(&self.settings.issuer, &self.settings.service)?;
        match &self.settings.keystore {
            Some(keystore) => self.issuer.sign_assertion(&assertion, keystore),
            None => Ok(assertion),
        }
    }
}

impl AuthProvider for SamlBearerTokenProvider {
    fn name(&self) -> &'static str {
        "saml"
    }

    fn provide_authentication(&self, headers: &mut HeaderMap) -> Result<()> {
        let assertion = self.bearer_assertion()?;
        set_authorization(headers, &basic_auth_header(SAML_BEARER_USER, &assertion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingIssuer {
        signed_with: Mutex<Option<String>>,
    }

    impl AssertionIssuer for RecordingIssuer {
        fn create_assertion(&self, issuer: &str, service: &str) -> Result<String> {
            Ok(format!("<Assertion issuer=\"{}\" audience=\"{}\"/>", issuer, service))
        }

        fn sign_assertion(&self, assertion: &str, keystore: &KeystoreSettings) -> Result<String> {
            *self.signed_with.lock().unwrap() = Some(keystore.key_alias.clone());
            Ok(format!("{}<Signature/>", assertion))
        }
    }

    fn saml_props(sign: &str) -> Properties {
        [
            (keys::SAML_AUTH_ISSUER, "/bpel-console"),
            (keys::SAML_AUTH_SERVICE, "riftsaw"),
            (keys::SAML_AUTH_SIGN_ASSERTIONS, sign),
            (keys::SAML_AUTH_KEYSTORE, "/etc/console/overlord.keystore"),
            (keys::SAML_AUTH_KEY_ALIAS, "overlord"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(basic_auth_header("admin", "secret"), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(AuthProviderKind::parse("basic").unwrap(), AuthProviderKind::Basic);
        assert_eq!(AuthProviderKind::parse("SAML").unwrap(), AuthProviderKind::SamlBearerToken);
        assert_eq!(
            AuthProviderKind::parse("org.jboss.bpm.console.server.RestProxyBasicAuthProvider")
                .unwrap(),
            AuthProviderKind::Basic
        );
        assert_eq!(
            AuthProviderKind::parse(
                "org.jboss.bpm.console.server.RestProxySAMLBearerTokenAuthProvider"
            )
            .unwrap(),
            AuthProviderKind::SamlBearerToken
        );
        assert!(matches!(
            AuthProviderKind::parse("kerberos"),
            Err(ProxyError::UnknownAuthProvider(_))
        ));
    }

    #[test]
    fn test_basic_provider_replaces_inbound_authorization() {
        let provider = BasicAuthProvider::new("admin", "secret");
        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, HeaderValue::from_static("Bearer browser-token"));
        headers.append(AUTHORIZATION, HeaderValue::from_static("Bearer second"));
        provider.provide_authentication(&mut headers).unwrap();

        let values: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Basic YWRtaW46c2VjcmV0"]);
        assert!(values[0].is_sensitive());
    }

    #[test]
    fn test_basic_provider_requires_user_and_password() {
        let props: Properties = [(keys::BASIC_AUTH_USER, "admin")].into_iter().collect();
        let err = BasicAuthProvider::from_properties(&props).unwrap_err();
        assert!(matches!(err, ProxyError::MissingProperty(ref k) if k == keys::BASIC_AUTH_PASS));
    }

    #[test]
    fn test_basic_provider_debug_hides_password() {
        let debug = format!("{:?}", BasicAuthProvider::new("admin", "secret"));
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_saml_signing_only_for_exact_true() {
        assert!(SamlSettings::from_properties(&saml_props("true")).unwrap().sign_assertions());
        assert!(!SamlSettings::from_properties(&saml_props("TRUE")).unwrap().sign_assertions());
        assert!(!SamlSettings::from_properties(&saml_props("yes")).unwrap().sign_assertions());
    }

    #[test]
    fn test_saml_signing_requires_keystore() {
        let props: Properties = saml_props("true")
            .iter()
            .filter(|(k, _)| *k != keys::SAML_AUTH_KEYSTORE)
            .collect();
        let err = SamlSettings::from_properties(&props).unwrap_err();
        assert!(matches!(err, ProxyError::MissingProperty(ref k) if k == keys::SAML_AUTH_KEYSTORE));
    }

    #[test]
    fn test_saml_provider_header() {
        let issuer = Arc::new(RecordingIssuer::default());
        let settings = SamlSettings::from_properties(&saml_props("true")).unwrap();
        let provider = SamlBearerTokenProvider::new(settings, issuer.clone());

        let mut headers = HeaderMap::new();
        provider.provide_authentication(&mut headers).unwrap();

        let expected_assertion =
            "<Assertion issuer=\"/bpel-console\" audience=\"riftsaw\"/><Signature/>";
        assert_eq!(
            headers[AUTHORIZATION],
            basic_auth_header("SAML-BEARER-TOKEN", expected_assertion)
        );
        assert_eq!(issuer.signed_with.lock().unwrap().as_deref(), Some("overlord"));
    }
}
