//! Environments and the variables bound to them.

use serde::{Deserialize, Serialize};

use super::entity::{EntityMeta, impl_entity, require};

/// Name of the environment variables fall into when none is given.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// A named set of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Environment name; variables refer to it.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Environment {
    /// Creates an environment with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            name: name.into(),
            description: String::new(),
        }
    }
}

fn validate_environment(environment: &Environment) -> std::result::Result<(), String> {
    require("name", &environment.name)
}

impl_entity!(Environment, validate_environment);

const fn default_enabled() -> bool {
    true
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

/// A variable belonging to exactly one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Identity and revision metadata.
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Variable name.
    #[serde(default)]
    pub name: String,
    /// Variable value.
    #[serde(default)]
    pub value: String,
    /// Whether the variable is applied.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Name of the owning environment.
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Variable {
    /// Creates an enabled variable in the default environment.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            meta: EntityMeta::default(),
            name: name.into(),
            value: value.into(),
            enabled: true,
            environment: default_environment(),
        }
    }

    /// Binds the variable to an environment.
    #[must_use]
    pub fn in_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }
}

fn validate_variable(variable: &Variable) -> std::result::Result<(), String> {
    require("name", &variable.name)
}

impl_entity!(Variable, validate_variable);
