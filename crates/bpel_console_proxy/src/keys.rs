//! Property keys and environment variables read by the console server.

pub const PROXY_URL: &str = "bpel-console.rest-proxy.proxy-url";
pub const AUTH_PROVIDER: &str = "bpel-console.rest-proxy.authentication.provider";
pub const BASIC_AUTH_USER: &str = "bpel-console.rest-proxy.authentication.basic.user";
pub const BASIC_AUTH_PASS: &str = "bpel-console.rest-proxy.authentication.basic.password";

pub const SAML_AUTH_ISSUER: &str = "bpel-console.rest-proxy.authentication.saml.issuer";
pub const SAML_AUTH_SERVICE: &str = "bpel-console.rest-proxy.authentication.saml.service";
pub const SAML_AUTH_SIGN_ASSERTIONS: &str =
    "bpel-console.rest-proxy.authentication.saml.sign-assertions";
pub const SAML_AUTH_KEYSTORE: &str = "bpel-console.rest-proxy.authentication.saml.keystore";
pub const SAML_AUTH_KEYSTORE_PASSWORD: &str =
    "bpel-console.rest-proxy.authentication.saml.keystore-password";
pub const SAML_AUTH_KEY_ALIAS: &str = "bpel-console.rest-proxy.authentication.saml.key-alias";
pub const SAML_AUTH_KEY_PASSWORD: &str =
    "bpel-console.rest-proxy.authentication.saml.key-password";

/// Default properties file name inside the console home.
pub const DEFAULT_PROPERTIES_FILE: &str = "bpel-console.properties";

pub const CONFIG_FILE_ENV: &str = "BPEL_CONSOLE_CONFIG_FILE";
pub const CONFIG_REFRESH_ENV: &str = "BPEL_CONSOLE_CONFIG_REFRESH";
pub const DEFAULT_REFRESH_MILLIS: u64 = 5000;
