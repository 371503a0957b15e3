use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The ticket configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        /// Path of the configuration file
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The ticket configuration file is not valid YAML or is missing fields.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}
