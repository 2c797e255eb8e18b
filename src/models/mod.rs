// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor data model and state transitions.

pub mod frame;
pub mod pan;
pub mod session;
pub mod subtitles;
