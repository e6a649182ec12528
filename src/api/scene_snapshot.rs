use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverTarget, MarkKey, TooltipContent, Visibility};

use super::ChartScene;

pub const SCENE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Bar and area state of one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdVisibility {
    pub bar: Visibility,
    pub area: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipSnapshot {
    pub content: TooltipContent,
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
}

/// Serializable deterministic scene state used by regression tests and the
/// CLI `--snapshot` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub viewport: Viewport,
    pub record_count: usize,
    pub bar_count: usize,
    pub unique_ids: Vec<String>,
    pub visibility: IndexMap<String, IdVisibility>,
    pub area_order: Vec<String>,
    pub time_domain: (DateTime<Utc>, DateTime<Utc>),
    pub bar_domain: (f64, f64),
    pub area_domain: (f64, f64),
    pub hover: Option<HoverTarget>,
    pub tooltip: Option<TooltipSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SceneSnapshot,
}

impl SceneSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = SceneSnapshotJsonContractV1 {
            schema_version: SCENE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and the versioned contract wrapper.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SceneSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SceneSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl ChartScene {
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        let registry = self.registry();
        let visibility = self
            .unique_ids()
            .iter()
            .map(|id| {
                let state = IdVisibility {
                    bar: registry
                        .visibility(&MarkKey::bar(id.as_str()))
                        .unwrap_or(Visibility::Dim),
                    area: registry
                        .visibility(&MarkKey::area(id.as_str()))
                        .unwrap_or(Visibility::Dim),
                };
                (id.clone(), state)
            })
            .collect();

        let tooltip = self.tooltip();
        let tooltip = tooltip
            .content()
            .filter(|_| tooltip.is_visible())
            .map(|content| {
                let (left, top) = tooltip.position();
                TooltipSnapshot {
                    content: content.clone(),
                    left,
                    top,
                    opacity: tooltip.target_opacity(),
                }
            });

        let scales = self.scales();
        SceneSnapshot {
            viewport: self.layout().viewport(),
            record_count: self.records().len(),
            bar_count: self.bars().len(),
            unique_ids: self.unique_ids().to_vec(),
            visibility,
            area_order: registry.area_order().to_vec(),
            time_domain: scales.time.domain(),
            bar_domain: scales.left.domain(),
            area_domain: scales.right.domain(),
            hover: self.hover().cloned(),
            tooltip,
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
