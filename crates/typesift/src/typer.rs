//! Main Typer struct and public API.

use crate::inference::{
    ClassifyOptions, Classifiable, Profiler, ProfilerConfig, TypeDistribution, classify_with,
    convert_as_with, convert_with, incremental_threshold,
};
use crate::schema::{DataType, TypedValue};

/// Configuration shared by every Typer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyperConfig {
    /// Options applied before classifying each value.
    pub classify: ClassifyOptions,
    /// Known sizes below this are profiled eagerly.
    pub incremental_threshold: usize,
    /// Profile INTEGER and FLOAT together as FLOAT.
    pub widen_numeric: bool,
}

impl Default for TyperConfig {
    fn default() -> Self {
        Self {
            classify: ClassifyOptions::default(),
            incremental_threshold: incremental_threshold(),
            widen_numeric: false,
        }
    }
}

/// Classifies, converts and profiles values with one configuration.
#[derive(Debug, Clone)]
pub struct Typer {
    config: TyperConfig,
    profiler: Profiler,
}

impl Typer {
    /// Create a Typer with default configuration.
    pub fn new() -> Self {
        Self::with_config(TyperConfig::default())
    }

    /// Create a Typer with custom configuration.
    pub fn with_config(config: TyperConfig) -> Self {
        let profiler = Profiler::with_config(ProfilerConfig {
            incremental_threshold: config.incremental_threshold,
            classify: config.classify,
            widen_numeric: config.widen_numeric,
        });
        Self { config, profiler }
    }

    pub fn config(&self) -> &TyperConfig {
        &self.config
    }

    pub fn classify<'a>(&self, value: impl Into<Option<&'a str>>) -> DataType {
        classify_with(value, self.config.classify)
    }

    pub fn convert<'a>(&self, value: impl Into<Option<&'a str>>) -> TypedValue {
        convert_with(value, self.config.classify)
    }

    /// Forced conversion; see [`crate::convert_as`] for the fallbacks.
    pub fn convert_as<'a>(&self, value: impl Into<Option<&'a str>>, target: DataType) -> TypedValue {
        convert_as_with(value, target, self.config.classify)
    }

    pub fn can_classify_beyond_string<'a>(&self, value: impl Into<Option<&'a str>>) -> bool {
        self.classify(value) != DataType::String
    }

    /// Dominant type of a sequence.
    pub fn profile<I>(&self, values: I) -> DataType
    where
        I: IntoIterator,
        I::Item: Classifiable,
    {
        self.profiler.profile(values)
    }

    /// Per-type counts of a sequence.
    pub fn distribution<I>(&self, values: I) -> TypeDistribution
    where
        I: IntoIterator,
        I::Item: Classifiable,
    {
        self.profiler.distribution(values)
    }

    /// Threshold this Typer profiles with.
    pub fn incremental_threshold(&self) -> usize {
        self.config.incremental_threshold
    }
}

impl Default for Typer {
    fn default() -> Self {
        Self::new()
    }
}
