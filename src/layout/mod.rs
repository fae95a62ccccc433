// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for sequence diagrams.
//!
//! Computes actor slot geometry and resolves message directions before painting.

pub mod sequence;

pub use sequence::{
    compute_layout, LayoutConfig, LayoutError, LayoutOutcome, LayoutWarning, MonospaceMeasure,
    TextMeasure,
};
