use std::f64::consts::PI;

use force_graph::Node;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};

const BACKGROUND: &str = "#1a1a2e";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Stroke for the link entering a node on `child_tier`, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeStyle {
	rgb: (u8, u8, u8),
	width: f64,
	/// Dash and gap; `None` draws a solid line.
	dash: Option<(f64, f64)>,
	/// Dashes march towards the child.
	flowing: bool,
	arrow: bool,
}

fn edge_style(child_tier: u8) -> EdgeStyle {
	match child_tier {
		// root -> company
		0 | 1 => EdgeStyle {
			rgb: (170, 170, 200),
			width: 2.5,
			dash: None,
			flowing: false,
			arrow: false,
		},
		// company -> role
		2 => EdgeStyle {
			rgb: (100, 180, 255),
			width: 1.5,
			dash: Some((8.0, 4.0)),
			flowing: true,
			arrow: true,
		},
		// role -> person
		_ => EdgeStyle {
			rgb: (120, 220, 160),
			width: 1.0,
			dash: Some((2.0, 4.0)),
			flowing: false,
			arrow: true,
		},
	}
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
	format!("rgba({r}, {g}, {b}, {alpha:.3})")
}

/// Companies are bold, people small; the root has no label.
fn label_font(tier: u8, k: f64) -> Option<String> {
	let px = |size: f64| size / k.max(0.5);
	match tier {
		0 => None,
		1 => Some(format!("bold {}px sans-serif", px(12.0))),
		2 => Some(format!("{}px sans-serif", px(11.0))),
		_ => Some(format!("{}px sans-serif", px(9.0))),
	}
}

/// Labels carry the score on a second line; canvas text has no line breaks.
fn draw_label(ctx: &CanvasRenderingContext2d, info: &NodeInfo, x: f64, y: f64, k: f64) {
	let (Some(label), Some(font)) = (&info.label, label_font(info.tier, k)) else {
		return;
	};
	ctx.set_font(&font);
	let line_height = 12.0 / k.max(0.5);
	for (line_no, line) in label.lines().enumerate() {
		let _ = ctx.fill_text(line, x, y + line_no as f64 * line_height);
	}
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>, k: f64) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on / k), &JsValue::from_f64(off / k)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let arrow_size = 7.0 / k;

	state.graph.visit_edges(|parent, child, _| {
		let (x1, y1, x2, y2) = (
			parent.x() as f64,
			parent.y() as f64,
			child.x() as f64,
			child.y() as f64,
		);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let style = edge_style(child.data.user_data.tier);
		let lit = state.is_highlighted(parent.index()) && state.is_highlighted(child.index());
		// Highlighted links brighten and thicken as t → 1, the rest fade out.
		let (alpha, width_scale) = if lit {
			(0.65 + 0.3 * t, 1.0 + 0.4 * t)
		} else {
			(0.65 - 0.5 * t, 1.0 - 0.3 * t)
		};

		ctx.set_stroke_style_str(&rgba(style.rgb, alpha));
		ctx.set_line_width(style.width * width_scale / k);
		set_dash(ctx, style.dash, k);
		if let (true, Some((on, off))) = (style.flowing, style.dash) {
			ctx.set_line_dash_offset(-(state.flow_time * 30.0) % ((on + off) / k));
		}

		let (r1, r2) = (parent.data.user_data.radius, child.data.user_data.radius);
		let (ux, uy) = (dx / dist, dy / dist);
		let end_gap = if style.arrow { r2 + arrow_size } else { r2 };
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * end_gap, y2 - uy * end_gap);
		ctx.stroke();

		if !style.arrow {
			return;
		}
		set_dash(ctx, None, k);
		ctx.set_fill_style_str(&rgba(style.rgb, alpha));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
	set_dash(ctx, None, k);
}

/// Appearance of one node for the current frame.
struct NodeLook {
	alpha: f64,
	radius: f64,
	glow: Option<(f64, f64)>,
	ring: bool,
}

fn node_look(state: &ForceGraphState, node: &Node<NodeInfo>, t: f64) -> NodeLook {
	let idx = node.index();
	let base = node.data.user_data.radius;
	if !state.has_active_highlight() {
		return NodeLook {
			alpha: 1.0,
			radius: base,
			glow: None,
			ring: false,
		};
	}
	if !state.is_highlighted(idx) {
		return NodeLook {
			alpha: 1.0 - 0.7 * t,
			radius: base * (1.0 - 0.15 * t),
			glow: None,
			ring: false,
		};
	}
	let hovered = state.is_hovered(idx);
	let neighbor = state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);
	let (grow, glow) = if hovered {
		(0.35, Some((base * (1.8 + 1.2 * t), 0.35 * t)))
	} else if neighbor {
		(0.2, Some((base * (1.4 + 0.6 * t), 0.2 * t)))
	} else {
		(0.0, None)
	};
	NodeLook {
		alpha: 1.0,
		radius: base * (1.0 + grow * t),
		glow: glow.filter(|_| t > 0.01),
		ring: hovered && t > 0.01,
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node<NodeInfo>, look: &NodeLook, k: f64) {
	let info = &node.data.user_data;
	let (x, y, r) = (node.x() as f64, node.y() as f64, look.radius);

	if let Some((glow_radius, glow_alpha)) = look.glow {
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, r * 0.3, x, y, glow_radius) {
			let _ = gradient.add_color_stop(0.0, &rgba((255, 255, 255), glow_alpha));
			let _ = gradient.add_color_stop(0.6, &rgba((200, 220, 255), glow_alpha * 0.3));
			let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	ctx.set_global_alpha(look.alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	match info.tier {
		// root: hollow ring
		0 => {
			ctx.set_stroke_style_str(&info.color);
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}
		// companies: filled with a light outline
		1 => {
			ctx.set_fill_style_str(&info.color);
			ctx.fill();
			ctx.set_stroke_style_str(&rgba((255, 255, 255), 0.6));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
		_ => {
			ctx.set_fill_style_str(&info.color);
			ctx.fill();
		}
	}
	ctx.set_global_alpha(1.0);

	if look.ring {
		ctx.begin_path();
		let _ = ctx.arc(x, y, r + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&rgba((255, 255, 255), 0.7));
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&rgba((255, 255, 255), look.alpha * 0.85));
	draw_label(ctx, info, x + r + 3.0, y + 3.0, k);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (t, k) = (ease_out_cubic(state.hover.highlight_t), state.transform.k);
	let highlighting = state.has_active_highlight();

	// Dimmed nodes first so the highlighted ones paint on top.
	for lit_pass in [false, true] {
		if lit_pass && !highlighting {
			break;
		}
		state.graph.visit_nodes(|node| {
			if highlighting && state.is_highlighted(node.index()) != lit_pass {
				return;
			}
			draw_node(ctx, node, &node_look(state, node, t), k);
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_style_thins_towards_people() {
		let (company, role, person) = (edge_style(1), edge_style(2), edge_style(3));
		assert!(company.width > role.width && role.width > person.width);
		assert_eq!(company.dash, None);
		assert!(!company.arrow);
		assert!(role.flowing);
		assert!(person.dash.is_some() && !person.flowing);
	}

	#[test]
	fn root_label_is_hidden() {
		assert_eq!(label_font(0, 1.0), None);
		assert_eq!(label_font(1, 1.0).as_deref(), Some("bold 12px sans-serif"));
		assert_eq!(label_font(3, 2.0).as_deref(), Some("4.5px sans-serif"));
	}

	#[test]
	fn rgba_rounds_alpha() {
		assert_eq!(rgba((1, 2, 3), 0.12345), "rgba(1, 2, 3, 0.123)");
	}
}
