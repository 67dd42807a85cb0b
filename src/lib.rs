// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Egviz: terminal client for a remote e-graph rewriting engine.
//!
//! The engine owns the e-graph and everything derived from it. This crate mirrors
//! what the engine reports, turns user intents into protocol requests, and keeps a log of every
//! outcome.

pub mod config;
pub mod coordinator;
pub mod model;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod tui;
