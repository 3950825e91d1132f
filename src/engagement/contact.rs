//! Contact rows and CSV ingestion.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::score::engagement_score;
use crate::error::{LoadError, Result};

/// Cell value that switches a signal on.
pub const FLAG_YES: &str = "Sim";

/// Columns a filter can be declared on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
	/// Company name.
	Company,
	/// Role or title.
	Role,
	/// Industry, present only in some dataset variants.
	Industry,
}

impl Column {
	/// Header text shown for this column.
	pub fn label(self, schema: &DatasetSchema) -> &str {
		match self {
			Self::Company => &schema.company,
			Self::Role => &schema.role,
			Self::Industry => &schema.industry,
		}
	}

	/// The contact's value in this column. A missing industry reads as empty.
	pub fn value(self, contact: &Contact) -> &str {
		match self {
			Self::Company => &contact.company,
			Self::Role => &contact.role,
			Self::Industry => contact.industry.as_deref().unwrap_or_default(),
		}
	}
}

impl fmt::Display for Column {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Company => "company",
			Self::Role => "role",
			Self::Industry => "industry",
		})
	}
}

/// Header names of the source spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSchema {
	/// First name.
	pub first_name: String,
	/// Last name.
	pub last_name: String,
	/// Company name.
	pub company: String,
	/// Optional industry column.
	pub industry: String,
	/// Role or title.
	pub role: String,
	/// "Invite sent" flag.
	pub invite_sent: String,
	/// "Enrichment sent" flag.
	pub enrichment_sent: String,
	/// "Already connected" flag.
	pub connected: String,
}

impl Default for DatasetSchema {
	fn default() -> Self {
		Self {
			first_name: "Nome".into(),
			last_name: "Sobrenome".into(),
			company: "Nome da empresa".into(),
			industry: "Setor".into(),
			role: "Cargo".into(),
			invite_sent: "Convite Linkedin Enviado".into(),
			enrichment_sent: "Snovio Enviado ?".into(),
			connected: "Já é Conexão Linkedin?".into(),
		}
	}
}

/// The three categorical signals behind the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signals {
	/// Connection invite was sent.
	pub invite_sent: bool,
	/// Contact was sent to the enrichment tool.
	pub enrichment_sent: bool,
	/// Already a first-degree connection.
	pub connected: bool,
}

/// One row of the dataset. The score is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
	/// First and last name joined by a space.
	pub full_name: String,
	/// Company name.
	pub company: String,
	/// Industry, when the dataset carries one.
	pub industry: Option<String>,
	/// Role or title.
	pub role: String,
	/// Categorical signals.
	pub signals: Signals,
	score: u32,
}

impl Contact {
	/// Build a contact and compute its score.
	pub fn new(
		full_name: impl Into<String>,
		company: impl Into<String>,
		industry: Option<String>,
		role: impl Into<String>,
		signals: Signals,
	) -> Self {
		let role = role.into();
		let score = engagement_score(&role, &signals);
		Self {
			full_name: full_name.into(),
			company: company.into(),
			industry,
			role,
			signals,
			score,
		}
	}

	/// Engagement score computed at load.
	pub fn score(&self) -> u32 {
		self.score
	}
}

/// All contacts loaded for the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
	contacts: Vec<Contact>,
	has_industry: bool,
}

struct HeaderIndex {
	first_name: usize,
	last_name: usize,
	company: usize,
	industry: Option<usize>,
	role: usize,
	invite_sent: usize,
	enrichment_sent: usize,
	connected: usize,
}

impl HeaderIndex {
	fn resolve(headers: &csv::StringRecord, schema: &DatasetSchema) -> Result<Self> {
		let find = |name: &str| headers.iter().position(|h| h == name);
		let require = |name: &str| {
			find(name).ok_or_else(|| LoadError::MissingColumn {
				column: name.to_string(),
			})
		};
		Ok(Self {
			first_name: require(&schema.first_name)?,
			last_name: require(&schema.last_name)?,
			company: require(&schema.company)?,
			industry: find(&schema.industry),
			role: require(&schema.role)?,
			invite_sent: require(&schema.invite_sent)?,
			enrichment_sent: require(&schema.enrichment_sent)?,
			connected: require(&schema.connected)?,
		})
	}
}

impl Dataset {
	/// Parse a CSV export. Missing required headers and rows whose cell
	/// count differs from the header are fatal.
	pub fn from_csv(text: &str, schema: &DatasetSchema) -> Result<Self> {
		let mut reader = csv::ReaderBuilder::new()
			.trim(csv::Trim::All)
			.from_reader(text.as_bytes());
		let headers = reader.headers()?.clone();
		let idx = HeaderIndex::resolve(&headers, schema)?;

		let mut contacts = Vec::new();
		for record in reader.records() {
			let record = record?;
			let cell = |i: usize| record.get(i).unwrap_or_default();
			let full_name = format!("{} {}", cell(idx.first_name), cell(idx.last_name))
				.trim()
				.to_string();
			let industry = idx
				.industry
				.map(cell)
				.filter(|s| !s.is_empty())
				.map(str::to_string);
			let signals = Signals {
				invite_sent: cell(idx.invite_sent) == FLAG_YES,
				enrichment_sent: cell(idx.enrichment_sent) == FLAG_YES,
				connected: cell(idx.connected) == FLAG_YES,
			};
			let contact = Contact::new(full_name, cell(idx.company), industry, cell(idx.role), signals);
			debug!("loaded {} (score={})", contact.full_name, contact.score());
			contacts.push(contact);
		}

		info!("Dataset loaded: {} contacts", contacts.len());
		Ok(Self {
			contacts,
			has_industry: idx.industry.is_some(),
		})
	}

	/// Rows in file order.
	pub fn contacts(&self) -> &[Contact] {
		&self.contacts
	}

	/// Whether `column` can be filtered on with this dataset.
	pub fn supports(&self, column: Column) -> bool {
		column != Column::Industry || self.has_industry
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.contacts.len()
	}

	/// True when there are no rows.
	pub fn is_empty(&self) -> bool {
		self.contacts.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	const CSV: &str = "\
Nome,Sobrenome,Nome da empresa,Cargo,Convite Linkedin Enviado,Snovio Enviado ?,Já é Conexão Linkedin?
Ana,Silva,Acme,CEO,Sim,Sim,Sim
Bruno,Costa,Acme,Analista,Não,,Sim
";

	#[test]
	fn parses_rows_and_scores() {
		let data = Dataset::from_csv(CSV, &DatasetSchema::default()).unwrap();
		assert_eq!(data.len(), 2);
		let ana = &data.contacts()[0];
		assert_eq!(ana.full_name, "Ana Silva");
		assert_eq!(ana.company, "Acme");
		assert_eq!(ana.industry, None);
		assert_eq!(ana.score(), 30);
		let bruno = &data.contacts()[1];
		assert_eq!(
			bruno.signals,
			Signals {
				invite_sent: false,
				enrichment_sent: false,
				connected: true,
			}
		);
		assert_eq!(bruno.score(), 8);
		assert!(!data.supports(Column::Industry));
	}

	#[test]
	fn missing_required_column_is_fatal() {
		let csv = "Nome,Sobrenome,Cargo\nAna,Silva,CEO\n";
		let err = Dataset::from_csv(csv, &DatasetSchema::default()).unwrap_err();
		assert!(matches!(
			err,
			LoadError::MissingColumn { ref column } if column == "Nome da empresa"
		));
	}

	#[test]
	fn optional_industry_column_is_read() {
		let csv = "\
Nome,Sobrenome,Nome da empresa,Setor,Cargo,Convite Linkedin Enviado,Snovio Enviado ?,Já é Conexão Linkedin?
Ana,Silva,Acme,Varejo,CEO,,,
Caio,Lima,Beta,,Owner,,,
";
		let data = Dataset::from_csv(csv, &DatasetSchema::default()).unwrap();
		assert!(data.supports(Column::Industry));
		assert_eq!(data.contacts()[0].industry.as_deref(), Some("Varejo"));
		assert_eq!(Column::Industry.value(&data.contacts()[1]), "");
		assert_eq!(data.contacts()[1].score(), 3);
	}

	#[test]
	fn truncated_row_is_fatal() {
		let csv = format!("{CSV}Caio,Lima\n");
		let err = Dataset::from_csv(&csv, &DatasetSchema::default()).unwrap_err();
		assert!(matches!(err, LoadError::Csv(_)), "{err}");
	}

	#[test]
	fn row_with_extra_cells_is_fatal() {
		let csv = format!("{CSV}Davi,Reis,Beta,CEO,Sim,Sim,Sim,x,y\n");
		let err = Dataset::from_csv(&csv, &DatasetSchema::default()).unwrap_err();
		assert!(matches!(err, LoadError::Csv(_)), "{err}");
	}

	#[test]
	fn header_only_file_is_empty() {
		let header = CSV.lines().next().unwrap();
		let data = Dataset::from_csv(header, &DatasetSchema::default()).unwrap();
		assert!(data.is_empty());
		assert_eq!(data.len(), 0);
	}
}
