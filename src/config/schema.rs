use serde::Deserialize;

/// TOML-deserializable config file. All fields are Option for layered merging.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: DefaultsFileConfig,
    #[serde(default)]
    pub targeting: TargetingFileConfig,
    #[serde(default)]
    pub java: JavaFileConfig,
    #[serde(default)]
    pub python: PythonFileConfig,
    #[serde(default)]
    pub calls: CallsFileConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultsFileConfig {
    pub format: Option<String>,
    pub quiet: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TargetingFileConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
    pub excluded_dirs: Option<Vec<String>>,
    pub respect_gitignore: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JavaFileConfig {
    pub endpoint_annotations: Option<Vec<String>>,
    pub entity_markers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PythonFileConfig {
    pub route_decorators: Option<Vec<String>>,
    pub model_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CallsFileConfig {
    pub verbs: Option<Vec<String>>,
}

impl FileConfig {
    /// Load from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
