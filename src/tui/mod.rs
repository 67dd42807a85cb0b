// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive shell (ratatui + crossterm) around a [`SessionCoordinator`]. Key presses turn
//! into [`Action`]s that run as local tasks next to the event loop, so a pending confirmation
//! or file prompt never blocks drawing or other actions.

use std::{
    collections::VecDeque,
    error::Error,
    io,
    rc::Rc,
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::coordinator::{Action, SessionCoordinator};
use crate::model::{Direction as CursorDirection, InputFields, RuleId, Severity};
use crate::render::{
    graph_panel, recent_notifications, rule_lines, sanitize_line, status_summary, term_lines,
    text_len, truncate_with_ellipsis, NO_RULES_PLACEHOLDER,
};
use crate::transport::Transport;

mod platform;

pub(crate) use platform::{PendingPrompt, PromptQueue, TuiPlatform};

const FOCUS_COLOR: Color = Color::LightGreen;
const PLACEHOLDER_COLOR: Color = Color::DarkGray;
const CHECKED_COLOR: Color = Color::Cyan;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_STATUS_COLOR: Color = Color::White;
const NOTIFICATIONS_HEIGHT: u16 = 8;
const TERM_HEIGHT: u16 = 5;
const GRAPH_PAGE: u16 = 10;
const IDLE_TICK: Duration = Duration::from_millis(30);

/// Runs the interactive terminal UI against `transport` until the user quits.
///
/// Spawns actions with `spawn_local`, so it must be driven inside a `tokio::task::LocalSet`.
pub async fn run<T>(transport: T) -> Result<(), Box<dyn Error>>
where
    T: Transport + 'static,
{
    let prompts = PromptQueue::default();
    let platform = TuiPlatform::new(prompts.clone());
    let coordinator = Rc::new(SessionCoordinator::new(transport, platform));
    let mut app = App::new(coordinator, prompts);
    app.queue(Action::Reload);

    let mut terminal = TerminalSession::new()?;
    while !app.should_quit {
        // Dropping the handles detaches the tasks.
        let _running = app.spawn_queued();
        app.sync_view();
        terminal.draw(|frame| draw(frame, &mut app))?;

        let mut handled_input = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
            handled_input = true;
        }
        if handled_input {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(IDLE_TICK).await;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputTarget {
    CreateExpression,
    RuleLhs,
    RuleRhs,
}

impl InputTarget {
    fn field_mut(self, inputs: &mut InputFields) -> &mut String {
        match self {
            Self::CreateExpression => &mut inputs.create_expression,
            Self::RuleLhs => &mut inputs.rule_lhs,
            Self::RuleRhs => &mut inputs.rule_rhs,
        }
    }

    fn other_side(self) -> Self {
        match self {
            Self::CreateExpression => Self::CreateExpression,
            Self::RuleLhs => Self::RuleRhs,
            Self::RuleRhs => Self::RuleLhs,
        }
    }

    fn submit_action(self) -> Action {
        match self {
            Self::CreateExpression => Action::CreateSession,
            Self::RuleLhs | Self::RuleRhs => Action::CreateRuleFromInputs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Editing(InputTarget),
}

struct App<T> {
    coordinator: Rc<SessionCoordinator<T, TuiPlatform>>,
    prompts: PromptQueue,
    mode: Mode,
    rules_state: ListState,
    graph_scroll: u16,
    seen_graph_rev: u64,
    show_help: bool,
    queued: VecDeque<Action>,
    should_quit: bool,
}

impl<T: Transport + 'static> App<T> {
    fn new(coordinator: Rc<SessionCoordinator<T, TuiPlatform>>, prompts: PromptQueue) -> Self {
        Self {
            coordinator,
            prompts,
            mode: Mode::Normal,
            rules_state: ListState::default(),
            graph_scroll: 0,
            seen_graph_rev: 0,
            show_help: false,
            queued: VecDeque::new(),
            should_quit: false,
        }
    }

    fn queue(&mut self, action: Action) {
        debug!(?action, "queued action");
        self.queued.push_back(action);
    }

    fn spawn_queued(&mut self) -> Vec<JoinHandle<()>> {
        self.queued
            .drain(..)
            .map(|action| {
                let coordinator = Rc::clone(&self.coordinator);
                tokio::task::spawn_local(async move { coordinator.run(action).await })
            })
            .collect()
    }

    /// Keeps the rule cursor on a listed row and rewinds the graph scroll on a new graph.
    fn sync_view(&mut self) {
        let state = self.coordinator.state();
        let rule_count = state.rules().len();
        let graph_rev = state.graph_rev();
        drop(state);

        match self.rules_state.selected() {
            _ if rule_count == 0 => self.rules_state.select(None),
            Some(idx) if idx >= rule_count => self.rules_state.select(Some(rule_count - 1)),
            None => self.rules_state.select(Some(0)),
            Some(_) => {}
        }
        if graph_rev != self.seen_graph_rev {
            self.seen_graph_rev = graph_rev;
            self.graph_scroll = 0;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if !self.prompts.is_empty() {
            self.handle_prompt_key(code);
            return false;
        }

        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if let Mode::Editing(target) = self.mode {
            self.handle_edit_key(target, code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('c') => self.mode = Mode::Editing(InputTarget::CreateExpression),
            KeyCode::Char('a') => self.mode = Mode::Editing(InputTarget::RuleLhs),
            KeyCode::Char('L') => self.queue(Action::LoadSession),
            KeyCode::F(5) => self.queue(Action::Reload),
            KeyCode::Down | KeyCode::Char('j') => self.move_rule_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_rule_cursor(-1),
            KeyCode::Char(' ') => self.toggle_selected_rule(),
            KeyCode::Char('r') => self.queue(Action::ApplySelectedRules),
            KeyCode::Char('R') => self.queue(Action::ApplyAllRules),
            KeyCode::Char('x') => self.queue(Action::ExtractTerm),
            KeyCode::Char('y') => self.queue(Action::CopyTerm),
            KeyCode::Char('e') => self.queue(Action::Export),
            KeyCode::Char('f') => self.coordinator.edit_state(|state| {
                let next = state.export_format().next();
                state.set_export_format(next);
            }),
            KeyCode::Char('d') => {
                self.coordinator.edit_state(|state| state.cursor_mut().toggle_debug_mode());
            }
            KeyCode::Char(']') => self.queue(Action::Move(CursorDirection::Forward)),
            KeyCode::Char('[') => self.queue(Action::Move(CursorDirection::Backward)),
            KeyCode::Char('}') => self.queue(Action::Move(CursorDirection::FastForward)),
            KeyCode::Char('{') => self.queue(Action::Move(CursorDirection::FastBackward)),
            KeyCode::Char('u') => self.queue(Action::UploadRules),
            KeyCode::Char('U') => self.queue(Action::UploadSession),
            KeyCode::Char('s') => self.queue(Action::DownloadRules),
            KeyCode::Char('S') => self.queue(Action::DownloadSession),
            KeyCode::PageDown => self.graph_scroll = self.graph_scroll.saturating_add(GRAPH_PAGE),
            KeyCode::PageUp => self.graph_scroll = self.graph_scroll.saturating_sub(GRAPH_PAGE),
            KeyCode::Home => self.graph_scroll = 0,
            _ => {}
        }
        false
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let is_confirm = self
            .prompts
            .with_front(|prompt| matches!(prompt, PendingPrompt::Confirm { .. }))
            .unwrap_or(false);

        if is_confirm {
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.prompts.answer_confirm(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.prompts.answer_confirm(false);
                }
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Enter => {
                self.prompts.answer_paths(true);
            }
            KeyCode::Esc => {
                self.prompts.answer_paths(false);
            }
            KeyCode::Backspace => {
                self.prompts.with_front(|prompt| {
                    if let PendingPrompt::FilePaths { input, .. } = prompt {
                        input.pop();
                    }
                });
            }
            KeyCode::Char(ch) => {
                self.prompts.with_front(|prompt| {
                    if let PendingPrompt::FilePaths { input, .. } = prompt {
                        input.push(ch);
                    }
                });
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, target: InputTarget, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.queue(target.submit_action());
            }
            KeyCode::Tab | KeyCode::BackTab => self.mode = Mode::Editing(target.other_side()),
            KeyCode::Backspace => self.edit_input(target, |text| {
                text.pop();
            }),
            KeyCode::Char(ch) => self.edit_input(target, |text| text.push(ch)),
            _ => {}
        }
    }

    fn edit_input(&self, target: InputTarget, edit: impl FnOnce(&mut String)) {
        self.coordinator.edit_state(|state| edit(target.field_mut(state.inputs_mut())));
    }

    fn move_rule_cursor(&mut self, delta: isize) {
        let len = self.coordinator.state().rules().len();
        if len == 0 {
            self.rules_state.select(None);
            return;
        }
        let current = self.rules_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.rules_state.select(Some(next));
    }

    fn selected_rule_id(&self) -> Option<RuleId> {
        let idx = self.rules_state.selected()?;
        let state = self.coordinator.state();
        state.rules().rows().get(idx).map(|row| row.rule.id().clone())
    }

    fn toggle_selected_rule(&mut self) {
        let Some(id) = self.selected_rule_id() else {
            return;
        };
        self.coordinator.edit_state(|state| state.rules_mut().toggle(id.as_str()));
    }
}

fn draw<T: Transport + 'static>(frame: &mut Frame<'_>, app: &mut App<T>) {
    let areas = panel_areas(frame.area());
    let coordinator = Rc::clone(&app.coordinator);
    let state = coordinator.state();

    let editing = match app.mode {
        Mode::Editing(target) => Some(target),
        Mode::Normal => None,
    };
    draw_input(
        frame,
        areas.create,
        panel_title("Create expression", "c", None),
        &state.inputs().create_expression,
        editing == Some(InputTarget::CreateExpression),
    );
    draw_input(
        frame,
        areas.rule_lhs,
        panel_title("Rule left side", "a", None),
        &state.inputs().rule_lhs,
        editing == Some(InputTarget::RuleLhs),
    );
    draw_input(
        frame,
        areas.rule_rhs,
        panel_title("Rule right side", "Tab", None),
        &state.inputs().rule_rhs,
        editing == Some(InputTarget::RuleRhs),
    );

    let rules_block = Block::default()
        .borders(Borders::ALL)
        .title(fitted_title(panel_title("Rules", "Space", None), areas.rules));
    if state.rules().is_empty() {
        let placeholder = Paragraph::new(NO_RULES_PLACEHOLDER)
            .style(Style::default().fg(PLACEHOLDER_COLOR))
            .block(rules_block);
        frame.render_widget(placeholder, areas.rules);
    } else {
        let items = rule_lines(state.rules())
            .into_iter()
            .zip(state.rules().rows())
            .map(|(label, row)| {
                let style = if row.checked {
                    Style::default().fg(CHECKED_COLOR)
                } else {
                    Style::default()
                };
                ListItem::new(label).style(style)
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(rules_block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));
        frame.render_stateful_widget(list, areas.rules, &mut app.rules_state);
    }

    let graph = graph_panel(state.graph());
    let graph_title = panel_title("Graph", "L", graph.title_tail.as_deref());
    let graph_style = if graph.is_placeholder {
        Style::default().fg(PLACEHOLDER_COLOR)
    } else {
        Style::default()
    };
    let graph_text = graph.lines.into_iter().map(Line::from).collect::<Vec<_>>();
    let graph_widget = Paragraph::new(graph_text)
        .style(graph_style)
        .scroll((app.graph_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(fitted_title(graph_title, areas.graph)),
        );
    frame.render_widget(graph_widget, areas.graph);

    let term_text = term_lines(state.term()).into_iter().map(Line::from).collect::<Vec<_>>();
    let term = Paragraph::new(term_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(fitted_title(panel_title("Term", "x", None), areas.term)),
        );
    frame.render_widget(term, areas.term);

    let log = coordinator.notifications();
    let visible_rows = usize::from(areas.notifications.height.saturating_sub(2));
    let rows = recent_notifications(&log, visible_rows)
        .iter()
        .map(|entry| Line::styled(sanitize_line(&entry.to_string()), severity_style(entry.severity())))
        .collect::<Vec<_>>();
    let notifications = Paragraph::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(fitted_title(panel_title("Notifications", "log", None), areas.notifications)),
    );
    frame.render_widget(notifications, areas.notifications);

    let footer = footer_line(app.mode, &status_summary(&state));
    frame.render_widget(Paragraph::new(footer), areas.footer);

    drop(log);
    drop(state);

    if app.show_help {
        draw_help(frame);
    }
    draw_prompt(frame, &app.prompts);
}

fn draw_input(frame: &mut Frame<'_>, area: Rect, title: String, text: &str, focused: bool) {
    let inner_width = area.width.saturating_sub(2);
    let (visible, cursor) = input_view(text, inner_width);
    let widget = Paragraph::new(visible).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border_style(focused))
            .title(fitted_title(title, area)),
    );
    frame.render_widget(widget, area);
    if focused && area.height > 2 {
        frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
    }
}

fn draw_help(frame: &mut Frame<'_>) {
    let lines = help_lines();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(frame.area(), 70, height);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border_style(true))
            .title(" Keys (Esc closes) "),
    );
    frame.render_widget(help, area);
}

fn draw_prompt(frame: &mut Frame<'_>, prompts: &PromptQueue) {
    let Some((title, body, input)) = prompts.with_front(|prompt| match prompt {
        PendingPrompt::Confirm { message, .. } => {
            (" Confirm ".to_owned(), format!("{message}\n\n[y] yes   [n] no"), None)
        }
        PendingPrompt::FilePaths { purpose, input, .. } => (
            format!(" Upload {} ", purpose.label()),
            "File paths, comma separated. Enter uploads, Esc cancels.".to_owned(),
            Some(input.clone()),
        ),
    }) else {
        return;
    };

    let area = centered_rect(frame.area(), 60, 8);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(true))
        .title(fitted_title(title, area));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }).block(block), area);

    if let Some(input) = input {
        let (visible, cursor) = input_view(&input, inner.width);
        let input_area = Rect { y: inner.y + inner.height.saturating_sub(1), height: 1, ..inner };
        frame.render_widget(
            Paragraph::new(visible).style(Style::default().fg(FOCUS_COLOR)),
            input_area,
        );
        frame.set_cursor_position((input_area.x + cursor, input_area.y));
    }
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
