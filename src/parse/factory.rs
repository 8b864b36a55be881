use crate::config::ResolvedConfig;
use crate::parse::java::JavaExtractor;
use crate::parse::python::PythonExtractor;
use crate::parse::DeclarationExtractor;
use crate::walk::Language;

/// Create a DeclarationExtractor for a given language and config.
pub fn create_extractor(lang: Language, config: &ResolvedConfig) -> Box<dyn DeclarationExtractor> {
    match lang {
        Language::Java => Box::new(JavaExtractor::with_rules(
            config.java.endpoint_annotations.clone(),
            config.java.entity_markers.clone(),
        )),
        Language::Python => Box::new(PythonExtractor::with_rules(
            config.python.route_decorators.clone(),
            config.python.model_base.clone(),
        )),
    }
}
