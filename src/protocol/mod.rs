// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Request/response protocol spoken with the e-graph engine.
//!
//! Every route has a fixed HTTP method and body shape; replies are JSON objects whose
//! `response` field is the string `"False"` on failure. The sentinel is converted to a proper
//! flag in [`reply::Envelope`] and nowhere else.

use std::fmt;

use serde_json::{json, Value};

use crate::model::{Direction, ExportFormat, RuleId};

pub mod reply;

pub use reply::{
    decode_graph, decode_rules, decode_status, decode_term, Envelope, ProtocolError, Reply,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    LoadEGraph,
    CreateEGraph,
    ExportEGraph,
    ExtractTerm,
    AddRule,
    ApplyRule,
    ApplyAllRules,
    GetRules,
    UploadRules,
    DownloadRules,
    Move,
    UploadSession,
    DownloadSession,
}

impl Route {
    pub const ALL: [Route; 13] = [
        Self::LoadEGraph,
        Self::CreateEGraph,
        Self::ExportEGraph,
        Self::ExtractTerm,
        Self::AddRule,
        Self::ApplyRule,
        Self::ApplyAllRules,
        Self::GetRules,
        Self::UploadRules,
        Self::DownloadRules,
        Self::Move,
        Self::UploadSession,
        Self::DownloadSession,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::LoadEGraph => "/loadegraph",
            Self::CreateEGraph => "/createegraph",
            Self::ExportEGraph => "/exportegraph",
            Self::ExtractTerm => "/extractterm",
            Self::AddRule => "/addrule",
            Self::ApplyRule => "/applyrule",
            Self::ApplyAllRules => "/applyallrules",
            Self::GetRules => "/getrules",
            Self::UploadRules => "/uploadrules",
            Self::DownloadRules => "/downloadrules",
            Self::Move => "/move",
            Self::UploadSession => "/uploadsession",
            Self::DownloadSession => "/downloadsession",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::LoadEGraph | Self::GetRules => Method::Get,
            _ => Method::Post,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One request: a route plus its optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    route: Route,
    body: Option<Value>,
}

impl Request {
    fn bare(route: Route) -> Self {
        Self { route, body: None }
    }

    fn with_body(route: Route, body: Value) -> Self {
        Self { route, body: Some(body) }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn method(&self) -> Method {
        self.route.method()
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn load_egraph() -> Self {
        Self::bare(Route::LoadEGraph)
    }

    pub fn create_egraph(expression: &str) -> Self {
        Self::with_body(Route::CreateEGraph, json!({ "payload": expression }))
    }

    pub fn export_egraph(format: ExportFormat) -> Self {
        Self::with_body(Route::ExportEGraph, json!({ "payload": format.as_str() }))
    }

    pub fn extract_term() -> Self {
        Self::bare(Route::ExtractTerm)
    }

    pub fn add_rule(lhs: &str, rhs: &str) -> Self {
        Self::with_body(Route::AddRule, json!({ "payload": "rule", "lhs": lhs, "rhs": rhs }))
    }

    /// All ids go out in one request so the server applies them as a single step.
    pub fn apply_rules(ids: &[RuleId]) -> Self {
        let ids = ids.iter().map(RuleId::as_str).collect::<Vec<_>>();
        Self::with_body(Route::ApplyRule, json!({ "payload": ids }))
    }

    pub fn apply_all_rules() -> Self {
        Self::bare(Route::ApplyAllRules)
    }

    pub fn get_rules() -> Self {
        Self::bare(Route::GetRules)
    }

    pub fn upload_rules(text: &str) -> Self {
        Self::with_body(Route::UploadRules, json!({ "payload": text }))
    }

    pub fn download_rules() -> Self {
        Self::bare(Route::DownloadRules)
    }

    /// The debug flag travels as the string `"true"`/`"false"`.
    pub fn move_cursor(direction: Direction, debug_mode: bool) -> Self {
        let flag = if debug_mode { "true" } else { "false" };
        Self::with_body(
            Route::Move,
            json!({ "payload": direction.as_str(), "debugModeEnabled": flag }),
        )
    }

    pub fn upload_session(text: &str) -> Self {
        Self::with_body(Route::UploadSession, json!({ "payload": text }))
    }

    pub fn download_session() -> Self {
        Self::bare(Route::DownloadSession)
    }
}
