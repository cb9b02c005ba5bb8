//! Manager configuration.

/// Default sort position of the entity render step in a host pipeline.
///
/// Hosts conventionally draw their own cells at 50 and overlays above 70, so
/// entities land between the two.
pub const DEFAULT_RENDER_STEP_ORDER: u32 = 60;

/// Settings for an [`EntityManager`](crate::EntityManager).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManagerConfig {
    /// Name used in log output.
    pub name: String,
    /// Skip existence lookups when adding and removing entities.
    ///
    /// Adding the same entity twice then produces two entries, and removing
    /// an entity that was never added is silently ignored. Off by default.
    pub skip_existence_checks: bool,
    /// Sort position of the render step registered on attach.
    pub render_step_order: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            name: "entity-manager".to_string(),
            skip_existence_checks: false,
            render_step_order: DEFAULT_RENDER_STEP_ORDER,
        }
    }
}

impl ManagerConfig {
    /// Create a new configuration with the given name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Builder for creating managers with custom configuration.
#[derive(Debug, Default)]
pub struct ManagerBuilder {
    config: ManagerConfig,
}

impl ManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name used in log output.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Opt into the duplicate-tolerant fast path.
    pub fn skip_existence_checks(mut self, skip: bool) -> Self {
        self.config.skip_existence_checks = skip;
        self
    }

    /// Set the render step's sort position.
    pub fn render_step_order(mut self, order: u32) -> Self {
        self.config.render_step_order = order;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Build the manager.
    pub fn build(self) -> crate::EntityManager {
        crate::EntityManager::with_config(self.config)
    }
}
