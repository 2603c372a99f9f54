//! CSV responder loader.
//!
//! # CSV format
//!
//! One row per responder, in team order.  Every column after `start` may be
//! left blank to take the default.
//!
//! ```csv
//! id,start,walk_speed,stair_up_speed,stair_down_speed,check_rate,base_check_secs
//! A,E1,1.5,0.4,0.7,1.0,10
//! B,E2,,,,,
//! ```
//!
//! | Column             | Default |
//! |--------------------|---------|
//! | `walk_speed`       | 1.5 m/s |
//! | `stair_up_speed`   | 0.4 m/s |
//! | `stair_down_speed` | 0.7 m/s |
//! | `check_rate`       | 1.0 s/m² |
//! | `base_check_secs`  | 10 s    |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sweep_nav::Responder;

use crate::{ScenarioError, ScenarioResult};

// ── Record ────────────────────────────────────────────────────────────────────

/// Shared by the CSV loader and the `responders` array of a scenario file.
#[derive(Deserialize)]
pub(crate) struct ResponderRecord {
    id:               String,
    start:            String,
    #[serde(default)]
    walk_speed:       Option<f32>,
    #[serde(default)]
    stair_up_speed:   Option<f32>,
    #[serde(default)]
    stair_down_speed: Option<f32>,
    #[serde(default)]
    check_rate:       Option<f32>,
    #[serde(default)]
    base_check_secs:  Option<f32>,
}

impl ResponderRecord {
    pub(crate) fn into_responder(self) -> ScenarioResult<Responder> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ScenarioError::Parse("responder with empty id".into()));
        }
        let mut r = Responder::new(id, self.start.trim());
        if let Some(v) = self.walk_speed       { r.walk_speed = v; }
        if let Some(v) = self.stair_up_speed   { r.stair_up_speed = v; }
        if let Some(v) = self.stair_down_speed { r.stair_down_speed = v; }
        if let Some(v) = self.check_rate       { r.check_rate = v; }
        if let Some(v) = self.base_check_secs  { r.base_check_secs = v; }
        r.validate()?;
        Ok(r)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the responder team from a CSV file.
pub fn load_responders_csv(path: &Path) -> ScenarioResult<Vec<Responder>> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    load_responders_reader(file)
}

/// Like [`load_responders_csv`] but accepts any `Read` source.
pub fn load_responders_reader<R: Read>(reader: R) -> ScenarioResult<Vec<Responder>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut team = Vec::new();
    for result in csv_reader.deserialize::<ResponderRecord>() {
        team.push(result?.into_responder()?);
    }
    Ok(team)
}
