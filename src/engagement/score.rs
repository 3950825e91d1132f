//! Engagement score for a single contact.
//!
//! The score is a role multiplier applied to the whole signal sum:
//! ```text
//! score = multiplier × (1 + invite + enrichment + 3·connected)
//! ```
//! so it ranges from 1 (unmatched role, no signals) to 30 (executive, every signal).

use super::contact::Signals;

/// Role keyword tiers, checked in order. First tier with a substring hit wins.
const ROLE_TIERS: &[(u32, &[&str])] = &[
	(5, &["ceo", "cfo"]),
	(
		3,
		&[
			"diretor", "gerente", "director", "socio", "chief", "partner", "owner",
		],
	),
	// "coordenaor" is matched as written in the source dataset's vocabulary.
	(2, &["coordenaor", "analista", "assistente", "pleno"]),
];

const INVITE_POINTS: u32 = 1;
const ENRICHMENT_POINTS: u32 = 1;
const CONNECTED_POINTS: u32 = 3;

/// Multiplier for a role title; 1 when no keyword matches.
pub fn role_multiplier(role: &str) -> u32 {
	let role = role.to_lowercase();
	ROLE_TIERS
		.iter()
		.find(|(_, keywords)| keywords.iter().any(|kw| role.contains(kw)))
		.map_or(1, |&(multiplier, _)| multiplier)
}

/// Additive term: one point for being present plus the signal bonuses.
pub fn signal_points(signals: &Signals) -> u32 {
	let mut points = 1;
	if signals.invite_sent {
		points += INVITE_POINTS;
	}
	if signals.enrichment_sent {
		points += ENRICHMENT_POINTS;
	}
	if signals.connected {
		points += CONNECTED_POINTS;
	}
	points
}

/// Final score, always ≥ 1.
pub fn engagement_score(role: &str, signals: &Signals) -> u32 {
	role_multiplier(role) * signal_points(signals)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const ALL: Signals = Signals {
		invite_sent: true,
		enrichment_sent: true,
		connected: true,
	};

	#[test]
	fn executive_tier_wins_over_later_tiers() {
		assert_eq!(role_multiplier("CEO & Partner"), 5);
		assert_eq!(role_multiplier("Chief Financial Officer (CFO)"), 5);
		assert_eq!(role_multiplier("Gerente Comercial"), 3);
		assert_eq!(role_multiplier("Analista Pleno"), 2);
		assert_eq!(role_multiplier("Estagiário"), 1);
	}

	#[test]
	fn staff_tier_keeps_source_keyword() {
		assert_eq!(role_multiplier("Coordenaor de TI"), 2);
		// the correctly spelled title has no staff keyword in it
		assert_eq!(role_multiplier("Coordenador de TI"), 1);
	}

	#[test]
	fn signals_add_up() {
		assert_eq!(signal_points(&Signals::default()), 1);
		assert_eq!(signal_points(&ALL), 6);
		let connected = Signals {
			connected: true,
			..Signals::default()
		};
		assert_eq!(signal_points(&connected), 4);
	}

	#[test]
	fn multiplier_scales_whole_term() {
		assert_eq!(engagement_score("CEO", &ALL), 30);
		assert_eq!(engagement_score("Diretor", &Signals::default()), 3);
		assert_eq!(engagement_score("Vendedor", &ALL), 6);
	}

	proptest! {
		#[test]
		fn score_is_positive_and_ceo_is_always_five(
			role in "[A-Za-z ]{0,24}",
			invite in any::<bool>(),
			enrichment in any::<bool>(),
			connected in any::<bool>(),
		) {
			let signals = Signals { invite_sent: invite, enrichment_sent: enrichment, connected };
			prop_assert!(engagement_score(&role, &signals) >= 1);
			let ceo = format!("{role} cEo");
			prop_assert_eq!(role_multiplier(&ceo), 5);
		}
	}
}
