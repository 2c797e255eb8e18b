// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Offscreen rendering of the edited image.

pub mod compositor;
pub mod error;
pub mod fonts;
