use anyhow::{Context, Result};
use bpel_console_config::{console_config, install_from_path, ConfigFormat, ConsoleConfig};
use bpel_console_proxy::{
    ConfigLocation, InboundRequest, Method, Properties, ProxySettings, RefreshingProperties,
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Print the active console record.
///
/// With `config`, that file is installed as the process-wide record first;
/// otherwise the built-in profile is shown.
pub fn show(config: Option<&Path>, format: ConfigFormat, out: &mut impl Write) -> Result<()> {
    let active = match config {
        Some(path) => install_from_path(path)
            .with_context(|| format!("Failed to load console config {}", path.display()))?,
        None => console_config(),
    };
    let rendered = active.render(format)?;
    write!(out, "{}", rendered)?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

/// Load and validate a record file, printing a one-line summary.
pub fn check(path: &Path, out: &mut impl Write) -> Result<()> {
    let config = ConsoleConfig::load(path)
        .with_context(|| format!("Invalid console config {}", path.display()))?;
    writeln!(
        out,
        "ok: {} ({}) served at {}, login {}",
        config.profile_name(),
        path.display(),
        config.server_web_context(),
        if config.requires_login() { "required" } else { "not required" }
    )?;
    Ok(())
}

/// Write the `console.config.js` form of a record file.
pub fn render(config: &Path, out_path: &Path) -> Result<()> {
    let record = ConsoleConfig::load(config)
        .with_context(|| format!("Failed to load console config {}", config.display()))?;
    std::fs::write(out_path, record.to_script())
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    tracing::info!(
        from = %config.display(),
        to = %out_path.display(),
        "Rendered console script"
    );
    Ok(())
}

/// Arguments of the `proxy-url` command.
#[derive(Debug, Clone)]
pub struct ProxyUrlArgs {
    /// Properties file; resolved from the environment when absent
    pub properties: Option<PathBuf>,
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: Option<String>,
    pub query: Option<String>,
}

/// Print the backend URL a request would be proxied to.
pub fn proxy_url(args: &ProxyUrlArgs, out: &mut impl Write) -> Result<()> {
    let props = load_properties(args.properties.as_deref())?;
    let settings = ProxySettings::from_properties(&props)?;

    let mut req = InboundRequest::new(Method::GET, &args.scheme, &args.host, args.port);
    req.path_info = args.path.clone();
    req.query = args.query.clone();

    let url = settings.target_url(&req)?;
    writeln!(out, "{}", url)?;
    Ok(())
}

fn load_properties(explicit: Option<&Path>) -> Result<Properties> {
    if let Some(path) = explicit {
        return Properties::load(path)
            .with_context(|| format!("Failed to read properties {}", path.display()));
    }
    let home = bpel_console_logging::console_home()?;
    let location = ConfigLocation::from_env(&home)?;
    let props = RefreshingProperties::open(location)
        .context("Failed to read console properties")?
        .snapshot();
    Ok(props.as_ref().clone())
}
