use tabula_engine::config::{ConfigParser, EngineConfig};
use tabula_engine::error::EngineError;

/// HCL front end for [`EngineConfig`]. Sections are written as attribute
/// objects: `binding = { max_params = 16 }`.
pub struct HclParser;

impl ConfigParser for HclParser {
    fn extensions(&self) -> &[&str] {
        &["hcl"]
    }

    fn parse(&self, content: &str) -> Result<EngineConfig, EngineError> {
        hcl::from_str(content).map_err(|e| EngineError::Config(format!("hcl: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use tabula_engine::config::OutputFormat;

    use super::*;

    #[test]
    fn parses_attribute_objects() {
        let cfg = HclParser
            .parse(
                r#"
                binding = {
                  max_params = 16
                }
                output = {
                  format = "text"
                }
                "#,
            )
            .unwrap();
        assert_eq!(cfg.binding.max_params, 16);
        assert!(cfg.binding.strict_arity);
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn empty_body_uses_defaults() {
        let cfg = HclParser.parse("").unwrap();
        assert_eq!(cfg.binding.max_params, 65535);
    }

    #[test]
    fn load_picks_parser_by_extension() {
        let path = std::env::temp_dir().join(format!("tabula-hcl-{}.hcl", std::process::id()));
        std::fs::write(&path, "output = { format = \"text\" }\n").unwrap();
        let cfg = EngineConfig::load(&path, &[&HclParser]);
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.unwrap().output.format, OutputFormat::Text);
    }

    #[test]
    fn syntax_error_is_tagged_as_hcl() {
        let err = HclParser.parse("binding = {").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert!(err.to_string().starts_with("config error: hcl: "), "{err}");
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let err = HclParser.parse("binding = { max_params = \"many\" }").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
