// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session coordinator.
//!
//! Turns user intents into protocol requests and reconciles the replies into the local
//! [`SessionState`] mirror and the [`NotificationLog`]. Every action has the same shape:
//! build a request, await the reply, branch on the decoded success flag, update exactly the
//! slice that action owns, and append the outcome to the log.
//!
//! The coordinator is meant for a single-threaded executor. Actions take `&self` so several
//! can be in flight at once (for example a pending confirmation while a reload completes);
//! state is kept in `RefCell`s and no borrow is ever held across an `.await`. Replies are
//! applied in arrival order and nothing is cancelled.

use std::cell::{Ref, RefCell};

use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{Direction, NotificationLog, SessionState, Severity};
use crate::protocol::{
    decode_graph, decode_rules, decode_status, decode_term, ProtocolError, Reply, Request,
};
use crate::transport::{Transport, TransportError};

pub mod platform;

#[cfg(test)]
pub(crate) mod testing;

pub use platform::{first_json_file, FilePurpose, PickedFile, Platform, JSON_MEDIA_TYPE};

pub const CONTACT_FAILURE_MSG: &str = "Failed to contact server.";
pub const UNPARSEABLE_REPLY_MSG: &str = "Server response could not be parsed.";
pub const UNPARSEABLE_FILE_MSG: &str = "File could not be parsed.";
pub const ABORTED_MSG: &str = "Action aborted.";
pub const REPLACE_SESSION_PROMPT: &str =
    "There is already an EGraph. Do you want to replace it and all data attached to it?";

/// User-initiated actions, one per coordinator entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateSession,
    LoadSession,
    Reload,
    Export,
    ExtractTerm,
    CreateRule { lhs: String, rhs: String },
    CreateRuleFromInputs,
    ApplySelectedRules,
    ApplyAllRules,
    UploadRules,
    DownloadRules,
    Move(Direction),
    UploadSession,
    DownloadSession,
    CopyTerm,
}

pub struct SessionCoordinator<T, P> {
    transport: T,
    platform: P,
    state: RefCell<SessionState>,
    log: RefCell<NotificationLog>,
}

impl<T: Transport, P: Platform> SessionCoordinator<T, P> {
    pub fn new(transport: T, platform: P) -> Self {
        Self {
            transport,
            platform,
            state: RefCell::new(SessionState::new()),
            log: RefCell::new(NotificationLog::new()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn state(&self) -> Ref<'_, SessionState> {
        self.state.borrow()
    }

    pub fn notifications(&self) -> Ref<'_, NotificationLog> {
        self.log.borrow()
    }

    /// Local, non-protocol edits: input fields, checkboxes, selectors, the debug-mode flag.
    pub fn edit_state<R>(&self, edit: impl FnOnce(&mut SessionState) -> R) -> R {
        edit(&mut *self.state.borrow_mut())
    }

    pub async fn run(&self, action: Action) {
        debug!(?action, "running action");
        match action {
            Action::CreateSession => self.create_session().await,
            Action::LoadSession => self.load_session().await,
            Action::Reload => self.reload().await,
            Action::Export => self.export_graph().await,
            Action::ExtractTerm => self.extract_term().await,
            Action::CreateRule { lhs, rhs } => self.create_rule(&lhs, &rhs).await,
            Action::CreateRuleFromInputs => self.create_rule_from_inputs().await,
            Action::ApplySelectedRules => self.apply_selected_rules().await,
            Action::ApplyAllRules => self.apply_all_rules().await,
            Action::UploadRules => self.upload(FilePurpose::Rules).await,
            Action::DownloadRules => self.download_rules().await,
            Action::Move(direction) => self.move_cursor(direction).await,
            Action::UploadSession => self.upload(FilePurpose::Session).await,
            Action::DownloadSession => self.download_session().await,
            Action::CopyTerm => self.copy_term(),
        }
    }

    /// Creates a session from the create-expression input.
    ///
    /// When a session already exists the user must confirm replacing it; declining sends
    /// nothing further and logs the abort. On success the input is cleared and the whole
    /// session view reloaded.
    pub async fn create_session(&self) {
        let expression = self.state.borrow().inputs().create_expression.clone();
        if expression.trim().is_empty() {
            return;
        }

        let Some(probe) =
            self.exchange(Request::load_egraph(), decode_status, UNPARSEABLE_REPLY_MSG).await
        else {
            return;
        };
        if probe.is_success() && !self.platform.confirm(REPLACE_SESSION_PROMPT).await {
            self.notify(Severity::Info, ABORTED_MSG);
            return;
        }

        let Some(reply) = self
            .exchange(Request::create_egraph(&expression), decode_status, UNPARSEABLE_REPLY_MSG)
            .await
        else {
            return;
        };
        self.report(&reply, Severity::Warn);
        if reply.is_success() {
            self.state.borrow_mut().clear_create_input();
            self.reload_replaced_session().await;
        }
    }

    /// Full reload: current graph, then the rule list. A failed graph exchange stops it.
    pub async fn reload(&self) {
        if self.load_graph().await {
            self.load_rules().await;
        }
    }

    /// Reload after the server replaced its session. Rules of the previous session are
    /// dropped up front, so a new session without rules lists none.
    async fn reload_replaced_session(&self) {
        self.state.borrow_mut().clear_rules();
        self.reload().await;
    }

    /// Renders whatever graph the server's cursor currently points at.
    pub async fn load_session(&self) {
        self.load_graph().await;
    }

    /// Returns `false` when the exchange itself failed.
    async fn load_graph(&self) -> bool {
        let Some(reply) =
            self.exchange(Request::load_egraph(), decode_graph, UNPARSEABLE_REPLY_MSG).await
        else {
            return false;
        };
        match reply {
            Reply::Success { msg, data } => {
                let description = data.description.clone().filter(|text| !text.is_empty());
                self.state.borrow_mut().apply_loaded_graph(data);
                self.notify(Severity::Info, msg);
                if let Some(description) = description {
                    self.notify(Severity::Info, description);
                }
            }
            // Nothing to show yet rather than an error.
            Reply::Failure { msg } => self.notify(Severity::Info, msg),
        }
        true
    }

    pub async fn load_rules(&self) {
        let Some(reply) =
            self.exchange(Request::get_rules(), decode_rules, UNPARSEABLE_REPLY_MSG).await
        else {
            return;
        };
        match reply {
            Reply::Success { msg, data } => {
                self.state.borrow_mut().apply_rule_listing(data);
                self.notify(Severity::Info, msg);
            }
            Reply::Failure { msg } => self.notify(Severity::Info, msg),
        }
    }

    pub async fn export_graph(&self) {
        let format = self.state.borrow().export_format();
        self.status_action(Request::export_egraph(format)).await;
    }

    /// A failed extraction keeps the previously displayed term.
    pub async fn extract_term(&self) {
        let Some(reply) =
            self.exchange(Request::extract_term(), decode_term, UNPARSEABLE_REPLY_MSG).await
        else {
            return;
        };
        match reply {
            Reply::Success { msg, data } => {
                self.state.borrow_mut().apply_extracted_term(data);
                self.notify(Severity::Info, msg);
            }
            Reply::Failure { msg } => self.notify(Severity::Warn, msg),
        }
    }

    /// Either side empty is a silent no-op. The rule list is reloaded from the server on
    /// success so displayed ids always match server assignment.
    pub async fn create_rule(&self, lhs: &str, rhs: &str) {
        if lhs.is_empty() || rhs.is_empty() {
            return;
        }

        let Some(reply) =
            self.exchange(Request::add_rule(lhs, rhs), decode_status, UNPARSEABLE_REPLY_MSG).await
        else {
            return;
        };
        self.report(&reply, Severity::Warn);
        if reply.is_success() {
            self.state.borrow_mut().clear_rule_inputs();
            self.load_rules().await;
        }
    }

    pub async fn create_rule_from_inputs(&self) {
        let (lhs, rhs) = {
            let state = self.state.borrow();
            (state.inputs().rule_lhs.clone(), state.inputs().rule_rhs.clone())
        };
        self.create_rule(&lhs, &rhs).await;
    }

    /// Sends every checked id in one request, including an empty selection.
    pub async fn apply_selected_rules(&self) {
        let ids = self.state.borrow().rules().selected_ids();
        self.status_action(Request::apply_rules(&ids)).await;
    }

    pub async fn apply_all_rules(&self) {
        self.status_action(Request::apply_all_rules()).await;
    }

    pub async fn upload_rules(&self) {
        self.upload(FilePurpose::Rules).await;
    }

    pub async fn upload_session(&self) {
        self.upload(FilePurpose::Session).await;
    }

    pub async fn download_rules(&self) {
        self.status_action(Request::download_rules()).await;
    }

    pub async fn download_session(&self) {
        self.status_action(Request::download_session()).await;
    }

    /// Asks the server to move its history cursor. The graph is reloaded only after the
    /// server accepted the move; a rejected move leaves the rendered graph untouched.
    pub async fn move_cursor(&self, direction: Direction) {
        let debug_mode = self.state.borrow().cursor().debug_mode();
        let Some(reply) = self
            .exchange(
                Request::move_cursor(direction, debug_mode),
                decode_status,
                UNPARSEABLE_REPLY_MSG,
            )
            .await
        else {
            return;
        };
        self.report(&reply, Severity::Warn);
        if reply.is_success() {
            self.state.borrow_mut().cursor_mut().confirm_move(direction);
            self.load_session().await;
        }
    }

    /// Copies the trimmed term. Empty terms are skipped; clipboard failures are only traced.
    pub fn copy_term(&self) {
        let term = self.state.borrow().term().map(str::trim).unwrap_or_default().to_owned();
        if term.is_empty() {
            return;
        }
        if let Err(err) = self.platform.write_clipboard(&term) {
            warn!(error = %err, "couldn't perform copy to clipboard");
        }
    }

    async fn upload(&self, purpose: FilePurpose) {
        let files = self.platform.pick_files(purpose).await;
        if files.is_empty() {
            debug!(purpose = purpose.label(), "upload cancelled");
            return;
        }
        let Some(file) = first_json_file(&files) else {
            debug!(purpose = purpose.label(), count = files.len(), "no JSON file selected");
            self.notify(Severity::Error, UNPARSEABLE_FILE_MSG);
            return;
        };

        let text = match self.platform.read_text(file).await {
            Ok(text) => text,
            Err(err) => {
                warn!(path = ?file.path, error = %err, "reading upload failed");
                self.notify(Severity::Error, UNPARSEABLE_FILE_MSG);
                return;
            }
        };
        let text = text.trim();
        if let Err(err) = serde_json::from_str::<Value>(text) {
            warn!(path = ?file.path, error = %err, "upload is not JSON");
            self.notify(Severity::Error, UNPARSEABLE_FILE_MSG);
            return;
        }

        let request = match purpose {
            FilePurpose::Rules => Request::upload_rules(text),
            FilePurpose::Session => Request::upload_session(text),
        };
        let Some(reply) = self.exchange(request, decode_status, UNPARSEABLE_FILE_MSG).await else {
            return;
        };
        self.report(&reply, Severity::Warn);
        if reply.is_success() {
            match purpose {
                FilePurpose::Rules => self.load_rules().await,
                FilePurpose::Session => self.reload_replaced_session().await,
            }
        }
    }

    async fn status_action(&self, request: Request) {
        if let Some(reply) = self.exchange(request, decode_status, UNPARSEABLE_REPLY_MSG).await {
            self.report(&reply, Severity::Warn);
        }
    }

    /// Sends one request and decodes its reply. Transport and decoding failures are logged
    /// here as the single `[ERROR]` of the action and yield `None`.
    async fn exchange<R>(
        &self,
        request: Request,
        decode: impl FnOnce(Value) -> Result<Reply<R>, ProtocolError>,
        unparseable_msg: &'static str,
    ) -> Option<Reply<R>> {
        let route = request.route();
        match self.transport.send(&request).await {
            Ok(value) => match decode(value) {
                Ok(reply) => {
                    debug!(%route, success = reply.is_success(), "reply decoded");
                    Some(reply)
                }
                Err(err) => {
                    warn!(%route, error = %err, "reply does not match route schema");
                    self.notify(Severity::Error, unparseable_msg);
                    None
                }
            },
            Err(TransportError::Unreachable(reason)) => {
                warn!(%route, %reason, "server unreachable");
                self.notify(Severity::Error, CONTACT_FAILURE_MSG);
                None
            }
            Err(err @ TransportError::InvalidJson(_)) => {
                warn!(%route, error = %err, "reply is not JSON");
                self.notify(Severity::Error, unparseable_msg);
                None
            }
        }
    }

    fn report<R>(&self, reply: &Reply<R>, failure: Severity) {
        match reply {
            Reply::Success { msg, .. } => self.notify(Severity::Info, msg.as_str()),
            Reply::Failure { msg } => self.notify(failure, msg.as_str()),
        }
    }

    fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.log.borrow_mut().append(severity, message);
    }
}
