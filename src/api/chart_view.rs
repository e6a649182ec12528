use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::{Record, normalize_payload, unique_ids};
use crate::interaction::{ToggleTarget, Visibility};

use super::fetcher::DatasetSource;
use super::{ChartLayout, ChartScene};

/// Text shown in the control panel until ids are known.
pub const LOADING_PLACEHOLDER: &str = "loading...";
pub const ALL_BUTTON_LABEL: &str = "ALL";

/// Identifies one load started by [`ChartView::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records were stored; `chart_drawn` is false when the scene build failed.
    Applied {
        record_count: usize,
        chart_drawn: bool,
    },
    /// The payload could not be normalized; the view keeps its previous state.
    Failed,
    /// The ticket was superseded or the view was unmounted.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlButton {
    pub label: String,
    pub target: ToggleTarget,
}

/// Toggle controls rendered next to the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    pub placeholder: Option<&'static str>,
    pub buttons: Vec<ControlButton>,
}

/// Mounted chart component: owns the records, the scene and the load
/// lifecycle.
#[derive(Debug, Clone)]
pub struct ChartView {
    layout: ChartLayout,
    records: Vec<Record>,
    unique_ids: Vec<String>,
    scene: Option<ChartScene>,
    generation: u64,
    mounted: bool,
}

impl Default for ChartView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartView {
    #[must_use]
    pub fn new() -> Self {
        Self::with_layout(ChartLayout::default())
    }

    #[must_use]
    pub fn with_layout(layout: ChartLayout) -> Self {
        Self {
            layout,
            records: Vec::new(),
            unique_ids: Vec::new(),
            scene: None,
            generation: 0,
            mounted: true,
        }
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn unique_ids(&self) -> &[String] {
        &self.unique_ids
    }

    #[must_use]
    pub fn scene(&self) -> Option<&ChartScene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut ChartScene> {
        self.scene.as_mut()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Starts a load; any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Stops accepting results from outstanding loads.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        debug!(generation = self.generation, "chart view unmounted");
    }

    /// Normalizes `payload`, stores the records and builds the scene.
    pub fn apply_payload(&mut self, ticket: LoadTicket, payload: &Value) -> LoadOutcome {
        if !self.mounted || ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale dataset"
            );
            return LoadOutcome::Discarded;
        }

        let records = match normalize_payload(payload) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "dataset could not be normalized");
                return LoadOutcome::Failed;
            }
        };

        self.unique_ids = unique_ids(&records);
        self.records = records;
        self.scene = match ChartScene::build(self.records.clone(), self.layout) {
            Ok(scene) => Some(scene),
            Err(err) => {
                warn!(error = %err, "chart scene was not built");
                None
            }
        };

        let outcome = LoadOutcome::Applied {
            record_count: self.records.len(),
            chart_drawn: self.scene.is_some(),
        };
        info!(
            record_count = self.records.len(),
            id_count = self.unique_ids.len(),
            chart_drawn = self.scene.is_some(),
            "dataset applied"
        );
        outcome
    }

    /// Fetches once from `source` and applies the result.
    pub async fn mount<S: DatasetSource>(&mut self, source: &S) -> LoadOutcome {
        let ticket = self.begin_load();
        let payload = source.fetch_dataset().await;
        self.apply_payload(ticket, &payload)
    }

    /// Id buttons plus the ALL button; a placeholder replaces the id buttons
    /// until ids are known.
    #[must_use]
    pub fn controls(&self) -> ControlPanel {
        let placeholder = self.unique_ids.is_empty().then_some(LOADING_PLACEHOLDER);
        let mut buttons: Vec<ControlButton> = self
            .unique_ids
            .iter()
            .map(|id| ControlButton {
                label: id.clone(),
                target: ToggleTarget::Individual(id.clone()),
            })
            .collect();
        buttons.push(ControlButton {
            label: ALL_BUTTON_LABEL.to_owned(),
            target: ToggleTarget::All,
        });
        ControlPanel {
            placeholder,
            buttons,
        }
    }

    /// Applies a control press; no-op before a scene exists.
    pub fn press(&mut self, target: &ToggleTarget) -> Option<Visibility> {
        let scene = self.scene.as_mut()?;
        scene.toggle(target)
    }
}
