use crate::error::ConfigError;

pub const REGION_VAR: &str = "REGION";
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";
pub const CAST_TABLE_NAME_VAR: &str = "CAST_TABLE_NAME";

/// Process configuration, read once before the runtime loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieConfig {
    /// Region override for the DynamoDB client. The SDK default chain applies when unset.
    pub region: Option<String>,
    /// Table holding movie records, keyed by numeric `id`.
    pub table_name: String,
    /// Table holding cast records, partitioned by `movieId`. `None` disables the cast join.
    pub cast_table_name: Option<String>,
}

impl MovieConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let table_name = read(TABLE_NAME_VAR).ok_or(ConfigError::Missing(TABLE_NAME_VAR))?;

        Ok(Self {
            region: read(REGION_VAR),
            table_name,
            cast_table_name: read(CAST_TABLE_NAME_VAR),
        })
    }
}
