//! Filter widgets plus the score and mode controls.

use std::collections::BTreeSet;

use leptos::ev::{Event, MouseEvent};
use leptos::prelude::*;

use crate::config::GraphMode;
use crate::engagement::{DatasetSchema, FilterEvent, FilterStage};

/// `selected` with `value` flipped.
fn toggle(selected: &BTreeSet<String>, value: &str) -> BTreeSet<String> {
	let mut next = selected.clone();
	if !next.remove(value) {
		next.insert(value.to_string());
	}
	next
}

/// Options to show: the stage's candidates, then any selected value that
/// earlier stages have since filtered out, so it can still be unticked.
fn visible_options(stage: &FilterStage) -> Vec<String> {
	let mut options = stage.options.clone();
	options.extend(
		stage
			.selected
			.iter()
			.filter(|v| !stage.options.contains(v))
			.cloned(),
	);
	options
}

#[component]
fn FilterField(
	stage: FilterStage,
	label: String,
	on_edit: Callback<FilterEvent>,
) -> impl IntoView {
	let field = stage.field;
	let locked = stage.is_locked();
	let has_selection = !stage.selected.is_empty();
	let options = visible_options(&stage)
		.into_iter()
		.map(|value| {
			let checked = stage.selected.contains(&value);
			let selection = toggle(&stage.selected, &value);
			let on_change = move |_: Event| {
				on_edit.run(FilterEvent::FieldEdited {
					field,
					selection: selection.clone(),
				})
			};
			view! {
				<label class="filter-option">
					<input type="checkbox" prop:checked=checked on:change=on_change />
					{value}
				</label>
			}
		})
		.collect_view();

	let on_clear = move |_: MouseEvent| {
		on_edit.run(FilterEvent::FieldEdited {
			field,
			selection: BTreeSet::new(),
		})
	};

	view! {
		<fieldset class="filter-field" class:locked=locked disabled=locked>
			<legend>{label}</legend>
			<div class="filter-options">{options}</div>
			<button type="button" on:click=on_clear disabled={!has_selection || locked}>
				"Limpar"
			</button>
		</fieldset>
	}
}

/// One multi-select per declared field, in display order.
#[component]
pub fn FilterBar(
	#[prop(into)] stages: Signal<Vec<FilterStage>>,
	schema: DatasetSchema,
	on_edit: Callback<FilterEvent>,
	min_score: RwSignal<u32>,
	mode: RwSignal<GraphMode>,
) -> impl IntoView {
	let fields = move || {
		stages
			.get()
			.into_iter()
			.map(|stage| {
				let label = stage.field.column.label(&schema).to_string();
				view! { <FilterField stage=stage label=label on_edit=on_edit /> }
			})
			.collect_view()
	};

	let on_min_score = move |ev: Event| {
		if let Ok(value) = event_target_value(&ev).parse::<u32>() {
			min_score.set(value);
		}
	};
	let on_mode = move |ev: Event| {
		if let Some(selected) = GraphMode::from_label(&event_target_value(&ev)) {
			mode.set(selected);
		}
	};

	view! {
		<div class="filter-bar">
			{fields}
			<label class="control">
				"Tipo de grafo"
				<select on:change=on_mode>
					{GraphMode::ALL
						.into_iter()
						.map(|m| {
							view! {
								<option value=m.label() selected={move || mode.get() == m}>
									{m.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
			<label class="control">
				"Score mínimo"
				<input
					type="number"
					min="0"
					prop:value=move || min_score.get().to_string()
					on:input=on_min_score
				/>
			</label>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engagement::{Column, FieldId, FieldStatus};

	fn set(values: &[&str]) -> BTreeSet<String> {
		values.iter().map(|v| v.to_string()).collect()
	}

	#[test]
	fn toggle_adds_then_removes() {
		let once = toggle(&set(&["Acme"]), "Beta");
		assert_eq!(once, set(&["Acme", "Beta"]));
		assert_eq!(toggle(&once, "Acme"), set(&["Beta"]));
	}

	#[test]
	fn stale_selection_stays_visible() {
		let stage = FilterStage {
			field: FieldId::new(1, Column::Role),
			status: FieldStatus::Active,
			options: vec!["CEO".into()],
			selected: set(&["Owner"]),
		};
		assert_eq!(visible_options(&stage), vec!["CEO", "Owner"]);
	}
}
