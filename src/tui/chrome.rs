// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
struct PanelAreas {
    create: Rect,
    rules: Rect,
    rule_lhs: Rect,
    rule_rhs: Rect,
    graph: Rect,
    term: Rect,
    notifications: Rect,
    footer: Rect,
}

fn panel_areas(area: Rect) -> PanelAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(NOTIFICATIONS_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(if area.width < 90 { Direction::Vertical } else { Direction::Horizontal })
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(TERM_HEIGHT)])
        .split(columns[1]);

    PanelAreas {
        create: left[0],
        rules: left[1],
        rule_lhs: left[2],
        rule_rhs: left[3],
        graph: right[0],
        term: right[1],
        notifications: rows[1],
        footer: rows[2],
    }
}

fn panel_title(label: &str, key: &str, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail.map(str::trim).filter(|tail| !tail.is_empty()) {
        title.push_str(" · ");
        title.push_str(tail);
    }
    title.push(' ');
    title
}

/// Title truncated so it never spills past the top border.
fn fitted_title(title: String, area: Rect) -> String {
    let room = usize::from(area.width.saturating_sub(2));
    truncate_with_ellipsis(&title, room)
}

fn panel_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default(),
        Severity::Warn => Style::default().fg(Color::Yellow),
        Severity::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = (area.width.saturating_mul(width_percent) / 100).max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Tail of `text` that fits in `width` cells with room for the cursor, plus the cursor column.
fn input_view(text: &str, width: u16) -> (String, u16) {
    let room = usize::from(width.saturating_sub(1));
    let len = text_len(text);
    let visible: String = text.chars().skip(len.saturating_sub(room)).collect();
    let cursor = u16::try_from(text_len(&visible)).unwrap_or(width);
    (visible, cursor)
}

fn footer_line(app_mode: Mode, status: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    match app_mode {
        Mode::Normal => {
            push_footer_entry(&mut spans, "CREATE", "c");
            push_footer_entry(&mut spans, "RULE", "a");
            push_footer_entry(&mut spans, "APPLY", "r/R");
            push_footer_entry(&mut spans, "MOVE", "[ ] { }");
            push_footer_entry(&mut spans, "EXTRACT", "x");
            push_footer_entry(&mut spans, "HELP", "?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
        Mode::Editing(InputTarget::CreateExpression) => {
            push_footer_entry(&mut spans, "CREATE", "Enter");
            push_footer_entry(&mut spans, "LEAVE", "Esc");
        }
        Mode::Editing(_) => {
            push_footer_entry(&mut spans, "ADD RULE", "Enter");
            push_footer_entry(&mut spans, "SIDE", "Tab");
            push_footer_entry(&mut spans, "LEAVE", "Esc");
        }
    }
    spans.push(Span::styled(
        format!("  {status}"),
        Style::default().fg(FOOTER_STATUS_COLOR),
    ));
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(value.to_owned(), Style::default().fg(FOOTER_KEY_COLOR)));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first.to_uppercase().chain(chars).collect()
}

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("c", "edit create expression, Enter creates the session"),
    ("L", "load session graph"),
    ("F5", "reload graph and rules"),
    ("a", "edit rewrite rule, Tab switches side, Enter adds it"),
    ("j/k", "move rule cursor"),
    ("Space", "toggle rule checkbox"),
    ("r / R", "apply selected rules / apply all rules"),
    ("x / y", "extract best term / copy term"),
    ("e / f", "export graph / cycle export format"),
    ("d", "toggle debug mode"),
    ("] [", "move forward / backward"),
    ("} {", "fast forward / fast backward"),
    ("u / U", "upload rules / session"),
    ("s / S", "download rules / session"),
    ("PgUp/PgDn", "scroll graph"),
    ("q", "quit"),
];

fn help_lines() -> Vec<Line<'static>> {
    HELP_ENTRIES
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:>10}  "), Style::default().fg(FOOTER_KEY_COLOR)),
                Span::raw((*action).to_owned()),
            ])
        })
        .collect()
}
