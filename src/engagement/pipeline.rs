//! Applies the filter stack to the dataset.

use std::collections::BTreeSet;

use indexmap::IndexSet;

use super::contact::Contact;
use super::filters::{FieldId, FieldStatus, FilterSession};

/// One field's view of the data at its position in the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterStage {
	/// Field this stage belongs to.
	pub field: FieldId,
	/// Confirmed, active or untouched.
	pub status: FieldStatus,
	/// Distinct values left by the earlier stages, in first-seen order.
	pub options: Vec<String>,
	/// Values currently selected.
	pub selected: BTreeSet<String>,
}

impl FilterStage {
	/// Confirmed fields are read-only in the UI.
	pub fn is_locked(&self) -> bool {
		self.status == FieldStatus::Confirmed
	}
}

/// Visible rows plus the per-field stages that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
	/// Rows that pass every stage, in dataset order.
	pub visible: Vec<&'a Contact>,
	/// Stages in application order.
	pub stages: Vec<FilterStage>,
}

impl FilterOutcome<'_> {
	/// Stages in display order (by slot index).
	pub fn stages_by_slot(&self) -> Vec<&FilterStage> {
		let mut stages: Vec<_> = self.stages.iter().collect();
		stages.sort_by_key(|s| s.field.index);
		stages
	}
}

/// Restrict `contacts` by every field in stack order. An empty selection
/// passes everything through.
pub fn apply<'a>(contacts: &'a [Contact], session: &FilterSession) -> FilterOutcome<'a> {
	let mut visible: Vec<&Contact> = contacts.iter().collect();
	let mut stages = Vec::with_capacity(session.declared().len());

	for (field, status) in session.order.sequence(session.declared()) {
		let column = field.column;
		let options: IndexSet<&str> = visible.iter().map(|&c| column.value(c)).collect();
		let selected = session.selections.get(field);
		if !selected.is_empty() {
			visible.retain(|c| selected.contains(column.value(c)));
		}
		stages.push(FilterStage {
			field,
			status,
			options: options.into_iter().map(str::to_string).collect(),
			selected: selected.clone(),
		});
	}

	FilterOutcome { visible, stages }
}
