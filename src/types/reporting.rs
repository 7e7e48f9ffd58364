// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Soft failure reporting: Warning, WarningLevel
//!
//! The pipeline never aborts on an unsatisfiable program; it records what it
//! could not honor and produces a complete output anyway.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Id;

/// Severity of a model consistency condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningLevel {
    SUCCESS,
    DANGER,
    WARNING,
    INFO,
}

impl Display for WarningLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use WarningLevel::*;
        let printable = match *self {
            SUCCESS => "SUCCESS",
            DANGER => "DANGER",
            WARNING => "WARNING",
            _ => "INFO",
        };
        write!(f, "{}", printable)
    }
}

impl Default for WarningLevel {
    fn default() -> Self {
        WarningLevel::WARNING
    }
}

/// Diagnostic record attached to a pipeline stage output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    /// Severity level
    pub level: WarningLevel,
    /// Id of the affected element, when there is one
    pub id: Option<Id>,
    /// Message
    pub msg: String,
}

impl Warning {
    pub fn new<T: Into<String>>(level: WarningLevel, id: Option<Id>, msg: T) -> Self {
        Warning {
            level,
            id,
            msg: msg.into(),
        }
    }
}
