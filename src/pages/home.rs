use leptos::prelude::*;
use log::{info, warn};

use crate::components::contact_table::ContactTable;
use crate::components::filter_bar::FilterBar;
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::config::{AppConfig, GraphProfiles};
use crate::engagement::{
	Column, Contact, Dataset, FilterEvent, FilterSession, FilterStage, GraphBuilder, apply, reduce,
};
use crate::error::Result;

const SAMPLE_CSV: &str = include_str!("../../data/contacts.csv");

/// Everything read once at start-up.
struct Loaded {
	config: AppConfig,
	profiles: GraphProfiles,
	dataset: Dataset,
}

fn load() -> Result<Loaded> {
	let config = AppConfig::embedded()?;
	let profiles = GraphProfiles::embedded()?;
	let dataset = Dataset::from_csv(SAMPLE_CSV, &config.schema)?;
	config.validate(&dataset)?;
	if dataset.is_empty() {
		warn!("Dataset has no rows; the graph will only show the root");
	}
	Ok(Loaded {
		config,
		profiles,
		dataset,
	})
}

/// Owned copy of the pipeline output, cheap enough to keep in a memo.
#[derive(Clone, Debug, PartialEq)]
struct Visible {
	rows: Vec<Contact>,
	stages: Vec<FilterStage>,
}

#[component]
fn Dashboard(loaded: Loaded) -> impl IntoView {
	let Loaded {
		config,
		profiles,
		dataset,
	} = loaded;
	let show_industry = dataset.supports(Column::Industry);
	let dataset = StoredValue::new(dataset);
	let session = RwSignal::new(FilterSession::new(&config.filters));
	let min_score = RwSignal::new(config.min_score);
	let mode = RwSignal::new(config.mode);
	let builder = GraphBuilder::new(config.person_grouping);
	info!("Session started with filters {:?}", config.filters);

	let visible = Memo::new(move |_| {
		session.with(|s| {
			dataset.with_value(|d| {
				let outcome = apply(d.contacts(), s);
				let stages = outcome.stages_by_slot().into_iter().cloned().collect();
				Visible {
					rows: outcome.visible.into_iter().cloned().collect(),
					stages,
				}
			})
		})
	});
	let graph = Memo::new(move |_| {
		let threshold = min_score.get();
		visible.with(|v| GraphData::from(&builder.build(&v.rows, threshold)))
	});
	let profile = Signal::derive(move || profiles.for_mode(mode.get()));
	let stages = Signal::derive(move || visible.with(|v| v.stages.clone()));
	let rows = Signal::derive(move || visible.with(|v| v.rows.clone()));

	let on_edit = Callback::new(move |event: FilterEvent| {
		session.update(|s| *s = reduce(std::mem::take(s), event));
	});

	view! {
		<div class="dashboard">
			<h2>"Grafo"</h2>
			<FilterBar
				stages=stages
				schema=config.schema.clone()
				on_edit=on_edit
				min_score=min_score
				mode=mode
			/>
			<div class="graph-panel">
				<ForceGraphCanvas data=graph profile=profile />
			</div>
			<h2>"Dados filtrados"</h2>
			<ContactTable rows=rows schema=config.schema show_industry=show_industry />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let session = load().map(|loaded| view! { <Dashboard loaded=loaded /> });

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>{session}</ErrorBoundary>
	}
}
