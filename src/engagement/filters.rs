//! Ordered filter stack.
//!
//! Independent multi-select fields behave as one stack: the field being
//! edited is *active*, moving to another field *confirms* (locks) it, and
//! clearing the active field reopens the most recently confirmed one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{debug, warn};

use super::contact::Column;

static NO_SELECTION: BTreeSet<String> = BTreeSet::new();

/// Identity of a filter field: display slot plus the column it filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
	/// Position among the declared filters.
	pub index: usize,
	/// Column the field restricts.
	pub column: Column,
}

impl FieldId {
	/// Field at display slot `index` filtering `column`.
	pub fn new(index: usize, column: Column) -> Self {
		Self { index, column }
	}
}

impl fmt::Display for FieldId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.column, self.index)
	}
}

/// Where a field sits in the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldStatus {
	/// Locked, applied before everything else in confirmation order.
	Confirmed,
	/// Currently being edited.
	Active,
	/// Not touched yet (or reopened and cleared).
	Untouched,
}

/// Result of feeding one edit into [`FilterOrderState::on_edit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	/// Nothing was active; the field became active.
	Activated,
	/// The active field was edited again and still has a selection.
	Kept,
	/// The active field was cleared; the last confirmed field (if any) is active again.
	Reopened(Option<FieldId>),
	/// The previously active field was confirmed and the edited one took its place.
	Switched {
		/// Field that was locked.
		confirmed: FieldId,
	},
	/// The field is confirmed and cannot be edited.
	Locked,
}

/// Confirmation order plus the single active field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOrderState {
	confirmed: Vec<FieldId>,
	active: Option<FieldId>,
}

impl FilterOrderState {
	/// Confirmed fields, oldest first.
	pub fn confirmed(&self) -> &[FieldId] {
		&self.confirmed
	}

	/// Field currently being edited.
	pub fn active(&self) -> Option<FieldId> {
		self.active
	}

	/// Stack position of `field`.
	pub fn status(&self, field: FieldId) -> FieldStatus {
		if self.active == Some(field) {
			FieldStatus::Active
		} else if self.confirmed.contains(&field) {
			FieldStatus::Confirmed
		} else {
			FieldStatus::Untouched
		}
	}

	/// Record that `field` changed. `selection_is_empty` is the field's value
	/// after the change.
	pub fn on_edit(&mut self, field: FieldId, selection_is_empty: bool) -> Transition {
		if self.confirmed.contains(&field) {
			return Transition::Locked;
		}
		let current = self.active;
		match current {
			None => {
				self.active = Some(field);
				Transition::Activated
			}
			Some(active) if active == field => self.undo(selection_is_empty),
			Some(active) => {
				self.confirmed.push(active);
				self.active = Some(field);
				Transition::Switched { confirmed: active }
			}
		}
	}

	/// Reopen the last confirmed field when the active one was cleared.
	pub fn undo(&mut self, selection_is_empty: bool) -> Transition {
		if !selection_is_empty {
			return Transition::Kept;
		}
		self.active = self.confirmed.pop();
		Transition::Reopened(self.active)
	}

	/// Fields in application order: confirmed, then active, then the
	/// untouched ones in declared order.
	pub fn sequence<'a>(
		&'a self,
		declared: &'a [FieldId],
	) -> impl Iterator<Item = (FieldId, FieldStatus)> + 'a {
		let confirmed = self.confirmed.iter().map(|&f| (f, FieldStatus::Confirmed));
		let active = self.active.map(|f| (f, FieldStatus::Active));
		let untouched = declared
			.iter()
			.copied()
			.filter(|&f| self.status(f) == FieldStatus::Untouched)
			.map(|f| (f, FieldStatus::Untouched));
		confirmed.chain(active).chain(untouched)
	}
}

/// Selected values per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections(BTreeMap<FieldId, BTreeSet<String>>);

impl Selections {
	/// Selection for `field`; empty when never set.
	pub fn get(&self, field: FieldId) -> &BTreeSet<String> {
		self.0.get(&field).unwrap_or(&NO_SELECTION)
	}

	/// Replace the selection; an empty set removes the entry.
	pub fn set(&mut self, field: FieldId, values: BTreeSet<String>) {
		if values.is_empty() {
			self.0.remove(&field);
		} else {
			self.0.insert(field, values);
		}
	}

	/// True when no field restricts anything.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Change events coming from the filter widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterEvent {
	/// A field's selection now equals `selection`.
	FieldEdited {
		/// Edited field.
		field: FieldId,
		/// Full selection after the edit.
		selection: BTreeSet<String>,
	},
}

/// Everything the filter stack needs for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSession {
	/// Stack order.
	pub order: FilterOrderState,
	/// Current values.
	pub selections: Selections,
	declared: Vec<FieldId>,
}

impl FilterSession {
	/// Fresh session with one field per column, indexed in the given order.
	pub fn new(columns: &[Column]) -> Self {
		Self {
			declared: columns
				.iter()
				.enumerate()
				.map(|(i, &c)| FieldId::new(i, c))
				.collect(),
			..Self::default()
		}
	}

	/// Fields in display order.
	pub fn declared(&self) -> &[FieldId] {
		&self.declared
	}
}

/// Apply one event. The new selection is stored before the stack reacts,
/// so a cleared field is seen as empty by the undo rule.
pub fn reduce(mut session: FilterSession, event: FilterEvent) -> FilterSession {
	match event {
		FilterEvent::FieldEdited { field, selection } => {
			if !session.declared.contains(&field) {
				warn!("Ignoring edit on undeclared filter {field}");
				return session;
			}
			if session.order.status(field) == FieldStatus::Confirmed {
				warn!("Ignoring edit on locked filter {field}");
				return session;
			}
			let is_empty = selection.is_empty();
			session.selections.set(field, selection);
			let transition = session.order.on_edit(field, is_empty);
			debug!(
				"{field}: {transition:?} -> confirmed={:?} active={:?}",
				session.order.confirmed(),
				session.order.active()
			);
		}
	}
	session
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	const COLUMNS: [Column; 3] = [Column::Company, Column::Role, Column::Industry];

	fn field(i: usize) -> FieldId {
		FieldId::new(i, COLUMNS[i])
	}

	fn edit(session: FilterSession, i: usize, values: &[&str]) -> FilterSession {
		reduce(
			session,
			FilterEvent::FieldEdited {
				field: field(i),
				selection: values.iter().map(|v| v.to_string()).collect(),
			},
		)
	}

	#[test]
	fn first_edit_activates() {
		let s = edit(FilterSession::new(&COLUMNS), 1, &["CEO"]);
		assert_eq!(s.order.active(), Some(field(1)));
		assert!(s.order.confirmed().is_empty());
	}

	#[test]
	fn reediting_active_field_only_changes_selection() {
		let s = edit(FilterSession::new(&COLUMNS), 0, &["Acme"]);
		let again = edit(s.clone(), 0, &["Acme", "Beta"]);
		assert_eq!(again.order, s.order);
		assert_eq!(again.selections.get(field(0)).len(), 2);
	}

	#[test]
	fn switching_confirms_in_temporal_order() {
		let mut s = FilterSession::new(&COLUMNS);
		s = edit(s, 2, &["Varejo"]);
		s = edit(s, 0, &["Acme"]);
		s = edit(s, 1, &["CEO"]);
		assert_eq!(s.order.confirmed(), &[field(2), field(0)]);
		assert_eq!(s.order.active(), Some(field(1)));
	}

	#[test]
	fn clearing_with_single_prior_reopens_it() {
		let mut s = FilterSession::new(&COLUMNS);
		s = edit(s, 0, &["Acme"]);
		s = edit(s, 1, &["CEO"]);
		s = edit(s, 1, &[]);
		assert_eq!(s.order.active(), Some(field(0)));
		assert!(s.order.confirmed().is_empty());
		assert_eq!(s.order.status(field(1)), FieldStatus::Untouched);
		assert!(s.selections.get(field(1)).is_empty());
	}

	#[test]
	fn clearing_reopens_most_recent_confirmation() {
		let mut s = FilterSession::new(&COLUMNS);
		s = edit(s, 0, &["Acme"]);
		s = edit(s, 2, &["Varejo"]);
		s = edit(s, 1, &["CEO"]);
		s = edit(s, 1, &[]);
		assert_eq!(s.order.active(), Some(field(2)));
		assert_eq!(s.order.confirmed(), &[field(0)]);
	}

	#[test]
	fn clearing_without_priors_leaves_nothing_active() {
		let mut s = FilterSession::new(&COLUMNS);
		s = edit(s, 0, &["Acme"]);
		s = edit(s, 0, &[]);
		assert_eq!(s.order, FilterOrderState::default());
		assert!(s.selections.is_empty());
	}

	#[test]
	fn locked_and_undeclared_fields_are_ignored() {
		let mut s = FilterSession::new(&COLUMNS[..2]);
		s = edit(s, 0, &["Acme"]);
		s = edit(s, 1, &["CEO"]);
		let before = s.clone();
		s = edit(s, 0, &[]);
		assert_eq!(s, before);
		s = edit(s, 2, &["Varejo"]);
		assert_eq!(s, before);
	}

	#[test]
	fn sequence_puts_untouched_last_in_declared_order() {
		let mut s = FilterSession::new(&COLUMNS);
		s = edit(s, 1, &["CEO"]);
		let order: Vec<_> = s.order.sequence(s.declared()).collect();
		assert_eq!(
			order,
			vec![
				(field(1), FieldStatus::Active),
				(field(0), FieldStatus::Untouched),
				(field(2), FieldStatus::Untouched),
			]
		);
	}

	proptest! {
		#[test]
		fn stack_invariants_hold_for_any_event_stream(
			events in proptest::collection::vec((0usize..3, any::<bool>()), 0..40),
		) {
			let mut s = FilterSession::new(&COLUMNS);
			for (i, empty) in events {
				let values: &[&str] = if empty { &[] } else { &["x"] };
				s = edit(s, i, values);

				let confirmed = s.order.confirmed();
				let unique: BTreeSet<_> = confirmed.iter().collect();
				prop_assert_eq!(unique.len(), confirmed.len());
				if let Some(active) = s.order.active() {
					prop_assert!(!confirmed.contains(&active));
				}
				prop_assert_eq!(s.order.sequence(s.declared()).count(), COLUMNS.len());
			}
		}
	}
}
