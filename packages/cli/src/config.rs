use serde::{Deserialize, Serialize};
use specgen_printer::{Indent, IndentStyle, PrinterConfig};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "specgen.config.json";

/// specgen configuration file format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Indentation of generated code
    #[serde(default)]
    pub indent: IndentConfig,

    /// Output directory used instead of each spec's `outDir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyleName {
    #[default]
    Space,
    Tab,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentConfig {
    #[serde(default = "default_indent_size")]
    pub size: usize,

    #[serde(default)]
    pub style: IndentStyleName,

    /// Indent units covered by one filler string
    #[serde(default = "default_span")]
    pub span: usize,
}

fn default_indent_size() -> usize {
    4
}

fn default_span() -> usize {
    1
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            size: default_indent_size(),
            style: IndentStyleName::default(),
            span: default_span(),
        }
    }
}

impl IndentConfig {
    pub fn to_indent(&self) -> Indent {
        let style = match self.style {
            IndentStyleName::Space => IndentStyle::new(" ", self.span),
            IndentStyleName::Tab => IndentStyle::tab(self.span),
            IndentStyleName::None => IndentStyle::none(),
        };
        Indent::new(self.size, style)
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Printer configuration, with `indent_size` taking precedence over the file
    pub fn printer_config(&self, indent_size: Option<usize>) -> PrinterConfig {
        let mut indent = self.indent.clone();
        if let Some(size) = indent_size {
            indent.size = size;
        }
        PrinterConfig::new(indent.to_indent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "indent": { "size": 2, "style": "tab", "span": 2 },
            "outDir": "generated"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.indent.size, 2);
        assert_eq!(config.indent.style, IndentStyleName::Tab);
        assert_eq!(config.indent.span, 2);
        assert_eq!(config.out_dir, Some("generated".to_string()));
        assert_eq!(config.printer_config(None).indent().process(2), "\t\t");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "indent": { "size": 2 } }"#).unwrap();
        assert_eq!(config.indent.style, IndentStyleName::Space);
        assert_eq!(config.indent.span, 1);
        assert_eq!(config.out_dir, None);
        assert_eq!(config.printer_config(None).indent().process(1), "  ");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.indent, IndentConfig::default());
        assert_eq!(config.printer_config(None), PrinterConfig::default());
    }

    #[test]
    fn test_indent_size_override() {
        let config = Config::default();
        assert_eq!(config.printer_config(Some(2)).indent().process(1), "  ");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "outDir": "out" }"#).unwrap();

        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.out_dir.as_deref(), Some("out"));
    }
}
