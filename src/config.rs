//! Configuración central de la aplicación.
//! Agrupa la configuración de cada crate; se lee una vez al arrancar y se
//! inyecta por valor en los constructores (no hay estado global).
use notary_adapters::SourceConfig;
use notary_chain::ChainConfig;
use notary_classifier::ClassifierConfig;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Modelo y umbrales de los clasificadores.
    pub classifier: ClassifierConfig,
    /// Nodo, contrato y credencial de firma.
    pub chain: ChainConfig,
    /// Rutas de las fuentes de datos.
    pub sources: SourceConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self { classifier: ClassifierConfig::from_env(),
               chain: ChainConfig::from_env(),
               sources: SourceConfig::from_env() }
    }
}
