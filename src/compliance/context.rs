// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Evaluation context of a compliance run

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Known jurisdiction identifiers
pub const JURISDICTIONS: [&str; 5] = ["irc-base", "colorado", "california", "texas", "florida"];

/// The base jurisdiction every rule applies under
pub const BASE_JURISDICTION: &str = "irc-base";

/// Site and project data a compliance run evaluates against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceContext {
    /// Jurisdiction identifier (`irc-base`, `colorado`, ...)
    pub jurisdiction: String,
    /// Building type
    pub building_type: String,
    /// Construction type (IRC Table R602, `VB` for light wood framing)
    pub construction_type: String,
    /// Design occupant load
    pub occupant_load: u32,
    /// Seismic design category (A..E), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seismic_design_category: Option<String>,
    /// Ultimate design wind speed (mph), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_mph: Option<f32>,
    /// Ground snow load (psf), when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_snow_load_psf: Option<f32>,
    /// Whether the site sits in a wildland-urban interface zone
    #[serde(default)]
    pub wui_zone: bool,
    /// Free-form jurisdictional parameters (assumed ceiling height,
    /// mechanical ventilation, altitude, flood zone, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

impl Default for ComplianceContext {
    fn default() -> Self {
        ComplianceContext {
            jurisdiction: BASE_JURISDICTION.to_string(),
            building_type: "single_family_dwelling".to_string(),
            construction_type: "VB".to_string(),
            occupant_load: 4,
            seismic_design_category: None,
            wind_speed_mph: None,
            ground_snow_load_psf: None,
            wui_zone: false,
            params: BTreeMap::new(),
        }
    }
}

impl ComplianceContext {
    /// Default context under the given jurisdiction
    pub fn for_jurisdiction<T: Into<String>>(jurisdiction: T) -> Self {
        ComplianceContext {
            jurisdiction: jurisdiction.into(),
            ..Default::default()
        }
    }

    /// Numeric parameter from the free-form bag
    pub fn param_f32(&self, key: &str) -> Option<f32> {
        self.params.get(key).and_then(|v| v.as_f64()).map(|v| v as f32)
    }

    /// Boolean parameter from the free-form bag
    pub fn param_bool(&self, key: &str) -> bool {
        self.params
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}
