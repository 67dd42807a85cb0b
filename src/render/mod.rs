// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render step from session state to panel text.
//!
//! Everything here is a pure function of [`SessionState`] and the [`NotificationLog`]. The
//! output is plain lines; the TUI only adds styling, borders, and scrolling.

use crate::model::{
    Notification, NotificationLog, RenderedGraph, RuleRegistry, RuleRow, SessionState,
};

mod text;

pub(crate) use text::{sanitize_line, text_len, truncate_with_ellipsis};

pub const NO_GRAPH_PLACEHOLDER: &str = "No EGraph loaded. Press c to create one.";
pub const NO_TERM_PLACEHOLDER: &str = "Nothing extracted yet.";
pub const NO_RULES_PLACEHOLDER: &str = "No rewrite rules.";

/// `[x] <id>  <lhs> => <rhs>`.
pub fn rule_row_label(row: &RuleRow) -> String {
    let mark = if row.checked { 'x' } else { ' ' };
    format!("[{mark}] {}  {}", row.rule.id(), row.rule.display())
}

/// One label per rule in server order.
pub fn rule_lines(rules: &RuleRegistry) -> Vec<String> {
    rules.rows().iter().map(rule_row_label).collect()
}

/// The newest `limit` entries, oldest first so the latest outcome sits at the bottom.
pub fn recent_notifications(log: &NotificationLog, limit: usize) -> &[Notification] {
    let entries = log.entries();
    &entries[entries.len().saturating_sub(limit)..]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPanel {
    /// Server description of the history position, when there is one.
    pub title_tail: Option<String>,
    pub lines: Vec<String>,
    pub is_placeholder: bool,
}

/// Graph description text shown verbatim, line by line.
pub fn graph_panel(graph: Option<&RenderedGraph>) -> GraphPanel {
    let Some(graph) = graph else {
        return GraphPanel {
            title_tail: None,
            lines: vec![NO_GRAPH_PLACEHOLDER.to_owned()],
            is_placeholder: true,
        };
    };

    let title_tail = graph
        .description
        .as_deref()
        .map(|text| sanitize_line(text.lines().next().unwrap_or_default().trim()))
        .filter(|text| !text.is_empty());
    let lines = graph.source.lines().map(sanitize_line).collect::<Vec<_>>();
    GraphPanel { title_tail, lines, is_placeholder: false }
}

pub fn term_lines(term: Option<&str>) -> Vec<String> {
    match term {
        Some(term) if !term.trim().is_empty() => term.lines().map(sanitize_line).collect(),
        _ => vec![NO_TERM_PLACEHOLDER.to_owned()],
    }
}

/// Footer status: active export format, debug-mode flag, and the last accepted move.
pub fn status_summary(state: &SessionState) -> String {
    let debug = if state.cursor().debug_mode() { "on" } else { "off" };
    let mut summary = format!("export {} · debug {debug}", state.export_format());
    if let Some(direction) = state.cursor().last_confirmed() {
        summary.push_str(" · moved ");
        summary.push_str(direction.as_str());
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{
        graph_panel, recent_notifications, rule_lines, status_summary, term_lines,
        NO_GRAPH_PLACEHOLDER, NO_TERM_PLACEHOLDER,
    };
    use crate::model::{
        Direction, ExportFormat, NotificationLog, RenderedGraph, RewriteRule, RuleId,
        RuleRegistry, SessionState, Severity,
    };

    fn registry() -> RuleRegistry {
        let mut rules = RuleRegistry::new();
        rules.render([
            RewriteRule::new(RuleId::new("0"), "a+b", "b+a"),
            RewriteRule::new(RuleId::new("12"), "a*1", "a"),
        ]);
        rules
    }

    #[test]
    fn rule_rows_show_checkbox_id_and_rule() {
        let mut rules = registry();
        rules.toggle("12");
        assert_eq!(rule_lines(&rules), vec!["[ ] 0  a+b => b+a", "[x] 12  a*1 => a"]);
    }

    #[test]
    fn notifications_keep_the_newest_at_the_bottom() {
        let mut log = NotificationLog::new();
        log.append(Severity::Info, "one");
        log.append(Severity::Warn, "two");
        log.append(Severity::Error, "three");
        let lines = |limit| {
            recent_notifications(&log, limit).iter().map(ToString::to_string).collect::<Vec<_>>()
        };
        assert_eq!(lines(2), vec!["[WARN] two", "[ERROR] three"]);
        assert_eq!(lines(10).len(), 3);
        assert!(lines(0).is_empty());
    }

    #[test]
    fn graph_panel_titles_with_first_description_line() {
        let graph = RenderedGraph {
            description: Some("Applied rule 0.\nmore".to_owned()),
            source: "digraph {\n\ta -> b\n}".to_owned(),
        };
        let panel = graph_panel(Some(&graph));
        assert_eq!(panel.title_tail.as_deref(), Some("Applied rule 0."));
        assert_eq!(panel.lines, vec!["digraph {", "    a -> b", "}"]);
        assert!(!panel.is_placeholder);
    }

    #[test]
    fn missing_graph_and_term_render_placeholders() {
        let panel = graph_panel(None);
        assert!(panel.is_placeholder);
        assert_eq!(panel.lines, vec![NO_GRAPH_PLACEHOLDER]);
        assert_eq!(term_lines(None), vec![NO_TERM_PLACEHOLDER]);
        assert_eq!(term_lines(Some("  ")), vec![NO_TERM_PLACEHOLDER]);
        assert_eq!(term_lines(Some("(<< x 1)")), vec!["(<< x 1)"]);
    }

    #[test]
    fn blank_description_leaves_title_bare() {
        let graph = RenderedGraph { description: Some(" ".to_owned()), source: String::new() };
        assert_eq!(graph_panel(Some(&graph)).title_tail, None);
    }

    #[test]
    fn status_summary_reflects_selectors() {
        let mut state = SessionState::new();
        assert_eq!(status_summary(&state), "export png · debug off");

        state.set_export_format(ExportFormat::Svg);
        state.cursor_mut().set_debug_mode(true);
        state.cursor_mut().confirm_move(Direction::FastBackward);
        assert_eq!(status_summary(&state), "export svg · debug on · moved fastbackward");
    }
}
