//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnotes.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnotes.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnotes.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".relnotes.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnotes configuration
# repository and milestone may also come from --repository/--milestone
# or the GITHUB_REPOSITORY/RELNOTES_MILESTONE environment variables.

# repository: owner/name
# milestone: "1.0.0"

github:
  api_url: https://api.github.com
  token_env: GITHUB_TOKEN
  per_page: 100
  timeout_secs: 30

taxonomy:
  audience_label: lib
  type_prefix: "type/"
  categories:
    - title: Features
      suffix: enhancement
    - title: Fixes
      suffix: bug
  annotations:
    - label: experimental
      tag: experimental
    - label: breaking-change
      tag: breaking

output:
  file: changelog.md
  include_authors: true
  library:
    heading: Library
    summary: "Changes that only affect library usage..."
"#;
