// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side mirror of the remote session.
//!
//! `SessionState` holds only what the server last reported (rule list, rendered graph,
//! extracted term) plus local input fields and selectors. Every mutation of a mirrored slice
//! goes through one of the `apply_*` methods, which take an already-decoded reply payload and
//! perform no I/O, so state transitions can be tested without a terminal or a network.

use std::fmt;

use crate::model::{DebugCursor, RewriteRule, RuleRegistry};

/// Graph state as last returned by `/loadegraph`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGraph {
    /// Server description of the current history position (`payload1`).
    pub description: Option<String>,
    /// Graph description language source (`payload2`).
    pub source: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Svg,
    #[default]
    Png,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// png -> svg -> pdf -> png.
    pub fn next(self) -> Self {
        match self {
            Self::Png => Self::Svg,
            Self::Svg => Self::Pdf,
            Self::Pdf => Self::Png,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub create_expression: String,
    pub rule_lhs: String,
    pub rule_rhs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    rules: RuleRegistry,
    graph: Option<RenderedGraph>,
    term: Option<String>,
    cursor: DebugCursor,
    export_format: ExportFormat,
    inputs: InputFields,
    graph_rev: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    pub fn graph(&self) -> Option<&RenderedGraph> {
        self.graph.as_ref()
    }

    /// Bumped every time a graph reply is applied, including identical ones.
    pub fn graph_rev(&self) -> u64 {
        self.graph_rev
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn cursor(&self) -> &DebugCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut DebugCursor {
        &mut self.cursor
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.export_format = format;
    }

    pub fn inputs(&self) -> &InputFields {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut InputFields {
        &mut self.inputs
    }

    pub fn apply_loaded_graph(&mut self, graph: RenderedGraph) {
        self.graph = Some(graph);
        self.graph_rev = self.graph_rev.wrapping_add(1);
    }

    pub fn apply_rule_listing(&mut self, rules: Vec<RewriteRule>) {
        self.rules.render(rules);
    }

    /// Replaces the displayed term wholesale.
    pub fn apply_extracted_term(&mut self, term: String) {
        self.term = Some(term);
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn clear_create_input(&mut self) {
        self.inputs.create_expression.clear();
    }

    pub fn clear_rule_inputs(&mut self) {
        self.inputs.rule_lhs.clear();
        self.inputs.rule_rhs.clear();
    }
}
