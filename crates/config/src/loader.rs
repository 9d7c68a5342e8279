use std::path::{Path, PathBuf};

use {
    anyhow::{Context, bail},
    secrecy::SecretString,
    tracing::{debug, info},
};

use crate::{prompts::PromptTemplates, schema::VerbaConfig};

/// Config file names probed in the working directory, in order.
const CONFIG_FILENAMES: &[&str] = &["verba.toml", "verba.yaml", "verba.yml", "verba.json"];

/// Parse config content, choosing the format from the file extension.
pub fn parse_config(content: &str, path: &Path) -> anyhow::Result<VerbaConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
    let config = match ext {
        "toml" => toml::from_str(content).context("invalid TOML config")?,
        "yaml" | "yml" => serde_yaml::from_str(content).context("invalid YAML config")?,
        "json" => serde_json::from_str(content).context("invalid JSON config")?,
        other => bail!("unsupported config format: .{other}"),
    };
    Ok(config)
}

/// Load a config file without applying environment overrides.
pub fn load_config(path: &Path) -> anyhow::Result<VerbaConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&content, path)
}

/// Locate a config file: the explicit path (`--config` / `VERBA_CONFIG`),
/// then the working directory, then the user config directory.
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.is_file() {
            return Some(p);
        }
    }

    let dirs = directories::ProjectDirs::from("org", "verba", "verba")?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dirs.config_dir().join(name))
        .find(|p| p.is_file())
}

/// Discover the config file (if any), apply environment overrides, resolve
/// prompt templates and validate.
pub fn discover_and_load(explicit: Option<&Path>) -> anyhow::Result<VerbaConfig> {
    let mut config = match find_config_file(explicit) {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            load_config(&path)?
        },
        None => {
            debug!("no config file found, using defaults");
            VerbaConfig::default()
        },
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    resolve_prompts(&mut config)?;
    Ok(config)
}

/// Apply the well-known environment variables on top of file config.
///
/// `lookup` is injected so tests do not touch the process environment.
pub fn apply_env_overrides(config: &mut VerbaConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("CANVA_CLIENT_ID") {
        config.oauth.client_id = Some(v);
    }
    if let Some(v) = non_empty("OPENAI_API_KEY") {
        config.provider.api_key = Some(SecretString::new(v));
    }
    if let Some(v) = non_empty("OPENAI_BASE_URL") {
        config.provider.base_url = v;
    }
    if let Some(v) = non_empty("CANVA_BACKEND_HOST") {
        config.server.public_url = Some(v);
    }
}

/// Replace inline templates with the prompts file when one is configured.
pub fn resolve_prompts(config: &mut VerbaConfig) -> anyhow::Result<()> {
    if let Some(path) = &config.prompts.file {
        config.prompts.templates = PromptTemplates::load_file(path)?;
        debug!(
            path = %path.display(),
            version = %config.prompts.templates.version,
            "loaded prompt templates"
        );
    }
    config.prompts.templates.validate()
}

#[cfg(test)]
mod tests {
    use {super::*, secrecy::ExposeSecret, std::collections::HashMap};

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = parse_config("", Path::new("verba.toml")).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.provider.model, "gpt-4");
        assert!((cfg.provider.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(cfg.oauth.redirect_uri, "http://127.0.0.1:3001/api/callback");
        assert_eq!(cfg.oauth.scopes, vec!["design:read", "design:write"]);
        assert!(cfg.oauth.client_id.is_none());
        assert!(!cfg.cors.allows_any_origin());
    }

    #[test]
    fn toml_sections_override_defaults() {
        let cfg = parse_config(
            r#"
[server]
port = 8080

[provider]
model = "gpt-4o"
temperature = 0.2
max_tokens = 512

[cors]
allowed_origins = ["*"]

[prompts]
version = "formal-v3"
"#,
            Path::new("verba.toml"),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.provider.model, "gpt-4o");
        assert_eq!(cfg.provider.max_tokens, Some(512));
        assert!(cfg.cors.allows_any_origin());
        assert_eq!(cfg.prompts.templates.version, "formal-v3");
        assert!(cfg.prompts.templates.translate.contains("{{texts}}"));
    }

    #[test]
    fn yaml_and_json_are_supported() {
        let yaml = parse_config("server:\n  port: 9000\n", Path::new("verba.yaml")).unwrap();
        assert_eq!(yaml.server.port, 9000);

        let json = parse_config(
            r#"{"oauth": {"client_id": "abc"}}"#,
            Path::new("verba.json"),
        )
        .unwrap();
        assert_eq!(json.oauth.client_id.as_deref(), Some("abc"));
    }

    #[test]
    fn unknown_extension_rejected() {
        assert!(parse_config("", Path::new("verba.ini")).is_err());
    }

    #[test]
    fn env_overrides_apply_and_ignore_blank_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CANVA_CLIENT_ID", "client-xyz"),
            ("OPENAI_API_KEY", "sk-test"),
            ("CANVA_BACKEND_HOST", "http://localhost:3001"),
            ("OPENAI_BASE_URL", "  "),
        ]);
        let mut cfg = VerbaConfig::default();
        apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.oauth.client_id.as_deref(), Some("client-xyz"));
        assert_eq!(
            cfg.provider.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sk-test")
        );
        assert_eq!(cfg.server.public_url.as_deref(), Some("http://localhost:3001"));
        assert_eq!(cfg.provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn explicit_path_wins_and_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "provider:\n  model: gpt-4o\n").unwrap();
        assert_eq!(find_config_file(Some(path.as_path())), Some(path.clone()));

        let cfg = discover_and_load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.provider.model, "gpt-4o");

        assert!(discover_and_load(Some(dir.path().join("missing.toml").as_path())).is_err());
    }

    #[test]
    fn load_config_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verba.toml");
        std::fs::write(&path, "[server]\nbind = \"0.0.0.0\"\n").unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0");
    }

    #[test]
    fn resolve_prompts_loads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let prompts = dir.path().join("prompts.toml");
        std::fs::write(
            &prompts,
            "version = \"file-v1\"\ndetect = \"Which language? {{texts}}\"\n",
        )
        .unwrap();

        let mut cfg = VerbaConfig::default();
        cfg.prompts.file = Some(prompts);
        resolve_prompts(&mut cfg).unwrap();
        assert_eq!(cfg.prompts.templates.version, "file-v1");
        assert_eq!(cfg.prompts.templates.detect, "Which language? {{texts}}");
    }

    #[test]
    fn resolve_prompts_rejects_invalid_inline_template() {
        let mut cfg = VerbaConfig::default();
        cfg.prompts.templates.detect = "no placeholder".into();
        assert!(resolve_prompts(&mut cfg).is_err());
    }
}
