//! Start-up load errors.

use thiserror::Error;

/// Result alias for start-up loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures while loading the dataset or configuration. All of them are fatal.
#[derive(Error, Debug)]
pub enum LoadError {
	/// A required header is missing from the dataset.
	#[error("Dataset is missing required column: {column}")]
	MissingColumn {
		/// Header name that was expected.
		column: String,
	},

	/// A filter was declared on a column the dataset does not carry.
	#[error("Filter declared on unavailable column: {0}")]
	UnavailableFilter(String),

	/// The CSV could not be read.
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// A configuration file is not valid JSON for its type.
	#[error("Config error: {0}")]
	Config(#[from] serde_json::Error),
}
