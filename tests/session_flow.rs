use std::collections::BTreeSet;

use engagement_graph::config::AppConfig;
use engagement_graph::engagement::{
	Column, Dataset, FieldId, FieldStatus, FilterEvent, FilterSession, GraphBuilder, NodeKey,
	apply, reduce,
};
use pretty_assertions::assert_eq;

const CSV: &str = "\
Nome,Sobrenome,Nome da empresa,Cargo,Convite Linkedin Enviado,Snovio Enviado ?,Já é Conexão Linkedin?
Ana,Silva,Acme,CEO,Sim,Sim,Sim
Bruno,Costa,Acme,Analista,Sim,Não,Não
Carla,Dias,Beta,Gerente,Não,Não,Sim
Davi,Reis,Beta,CEO,Não,Não,Não
Eva,Luz,Gama,Vendedora,Não,Não,Não
";

const COMPANY: FieldId = FieldId {
	index: 0,
	column: Column::Company,
};
const ROLE: FieldId = FieldId {
	index: 1,
	column: Column::Role,
};

fn edit(session: FilterSession, field: FieldId, values: &[&str]) -> FilterSession {
	let selection: BTreeSet<String> = values.iter().map(|v| v.to_string()).collect();
	reduce(session, FilterEvent::FieldEdited { field, selection })
}

fn names(dataset: &Dataset, session: &FilterSession) -> Vec<String> {
	apply(dataset.contacts(), session)
		.visible
		.iter()
		.map(|c| c.full_name.clone())
		.collect()
}

#[test]
fn filter_then_build_graph() {
	let config = AppConfig::default();
	let dataset = Dataset::from_csv(CSV, &config.schema).unwrap();
	config.validate(&dataset).unwrap();
	let builder = GraphBuilder::new(config.person_grouping);

	let mut session = FilterSession::new(&config.filters);
	assert_eq!(names(&dataset, &session).len(), 5);

	session = edit(session, ROLE, &["CEO"]);
	assert_eq!(names(&dataset, &session), vec!["Ana Silva", "Davi Reis"]);

	session = edit(session, COMPANY, &["Beta"]);
	assert_eq!(session.order.confirmed(), &[ROLE]);
	assert_eq!(names(&dataset, &session), vec!["Davi Reis"]);

	// company options only offer what the confirmed role filter left
	let outcome = apply(dataset.contacts(), &session);
	let company = outcome.stages.iter().find(|s| s.field == COMPANY).unwrap();
	assert_eq!(company.status, FieldStatus::Active);
	assert_eq!(company.options, vec!["Acme", "Beta"]);

	let graph = builder.build(outcome.visible.iter().copied(), 0);
	let keys: Vec<String> = graph.nodes.iter().map(|n| n.key.to_string()).collect();
	assert_eq!(keys, vec!["root", "Beta", "Beta@CEO", "Davi Reis"]);
	assert_eq!(graph.node(&NodeKey::Person("Davi Reis".into())).unwrap().size, 5);

	// clearing the active company filter reopens the role filter
	session = edit(session, COMPANY, &[]);
	assert_eq!(session.order.active(), Some(ROLE));
	assert!(session.order.confirmed().is_empty());
	assert_eq!(names(&dataset, &session), vec!["Ana Silva", "Davi Reis"]);

	// and clearing that leaves the full dataset
	session = edit(session, ROLE, &[]);
	assert_eq!(session.order.active(), None);
	assert_eq!(names(&dataset, &session).len(), 5);
}

#[test]
fn threshold_prunes_low_scores() {
	let dataset = Dataset::from_csv(CSV, &AppConfig::default().schema).unwrap();
	let graph = GraphBuilder::default().build(dataset.contacts(), 9);

	// Ana 30, Carla 12, Bruno 4, Davi 5, Eva 1
	assert!(graph.contains(&NodeKey::Company("Acme".into())));
	assert!(graph.contains(&NodeKey::Company("Beta".into())));
	assert!(!graph.contains(&NodeKey::Company("Gama".into())));
	assert!(!graph.contains(&NodeKey::Person("Bruno Costa".into())));
	assert!(graph.contains(&NodeKey::Person("Carla Dias".into())));
	assert!(!graph.contains(&NodeKey::Role {
		company: "Beta".into(),
		role: "CEO".into(),
	}));
}
