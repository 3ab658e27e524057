//! Startup wiring of the validation plugin

use crate::interceptor::{ValidationInterceptor, PROCESSOR_NAME};
use crate::messages;
use crate::provider::ValidatorProvider;
use crate::settings::ValidationSettings;
use argus_core::{ModulesBuilder, PluginModulesConfig};
use std::sync::Arc;

/// Registers the [`ValidationInterceptor`] with the host
///
/// Once prepared, every invocation the host dispatches passes through the
/// interceptor before its target runs.
#[derive(Default)]
pub struct ValidationPluginConfig {
    settings: ValidationSettings,
    provider: Option<Arc<dyn ValidatorProvider>>,
}

impl ValidationPluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: ValidationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Provider handed to the registered interceptor
    pub fn with_provider(mut self, provider: Arc<dyn ValidatorProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    fn interceptor(&self) -> ValidationInterceptor {
        let interceptor = ValidationInterceptor::with_settings(self.settings.clone());
        match &self.provider {
            Some(provider) => interceptor.with_provider(Arc::clone(provider)),
            None => interceptor,
        }
    }
}

impl PluginModulesConfig for ValidationPluginConfig {
    fn prepare(&self, builder: ModulesBuilder) -> ModulesBuilder {
        tracing::info!(
            code = messages::PLUGIN_REGISTERED,
            processor = PROCESSOR_NAME,
            "{}",
            messages::render(messages::PLUGIN_REGISTERED, &[&PROCESSOR_NAME])
        );
        builder.add_invocation_processor(Arc::new(self.interceptor()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DefaultValidatorFactory;

    #[test]
    fn test_prepare_registers_interceptor() {
        let builder = ValidationPluginConfig::new().prepare(ModulesBuilder::new());
        assert_eq!(builder.processor_names(), vec![PROCESSOR_NAME]);
    }

    #[test]
    fn test_interceptor_receives_provider_and_settings() {
        let settings = ValidationSettings {
            report_violation_count: false,
            ..ValidationSettings::default()
        };
        let config = ValidationPluginConfig::new()
            .with_settings(settings.clone())
            .with_provider(Arc::new(DefaultValidatorFactory));

        let interceptor = config.interceptor();
        assert!(interceptor.has_provider());
        assert_eq!(interceptor.settings(), &settings);
    }
}
