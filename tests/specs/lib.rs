// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! End-to-end CLI specs. The actual test files live under `cli/` and
//! are wired up as `[[test]]` targets of the `trk` package so they can
//! resolve the built binary.
