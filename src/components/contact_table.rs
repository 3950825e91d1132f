use leptos::prelude::*;

use crate::engagement::{Contact, DatasetSchema, contact::FLAG_YES};

fn flag(on: bool) -> &'static str {
	if on { FLAG_YES } else { "Não" }
}

/// Filtered rows, one per contact.
#[component]
pub fn ContactTable(
	#[prop(into)] rows: Signal<Vec<Contact>>,
	schema: DatasetSchema,
	#[prop(default = false)] show_industry: bool,
) -> impl IntoView {
	let industry_header = show_industry.then(|| view! { <th>{schema.industry.clone()}</th> });
	let body = move || {
		rows.get()
			.into_iter()
			.map(|c| {
				let industry = show_industry
					.then(|| view! { <td>{c.industry.clone().unwrap_or_default()}</td> });
				view! {
					<tr>
						<td>{c.full_name.clone()}</td>
						<td>{c.company.clone()}</td>
						{industry}
						<td>{c.role.clone()}</td>
						<td>{flag(c.signals.invite_sent)}</td>
						<td>{flag(c.signals.enrichment_sent)}</td>
						<td>{flag(c.signals.connected)}</td>
						<td class="score">{c.score()}</td>
					</tr>
				}
			})
			.collect_view()
	};

	view! {
		<table class="contact-table">
			<thead>
				<tr>
					<th>"Nome completo"</th>
					<th>{schema.company}</th>
					{industry_header}
					<th>{schema.role}</th>
					<th>{schema.invite_sent}</th>
					<th>{schema.enrichment_sent}</th>
					<th>{schema.connected}</th>
					<th>"Score"</th>
				</tr>
			</thead>
			<tbody>{body}</tbody>
		</table>
	}
}
