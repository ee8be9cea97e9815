//! Simulated electrode status panel.
//!
//! Eight electrodes with an Active/Inactive flag. There is no hardware, so
//! every visit to the panel rerolls each status with a fair coin.

use rand::Rng;

/// Number of simulated electrodes
pub const ELECTRODE_COUNT: usize = 8;

/// One electrode and its contact status
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElectrodeStatus {
    pub name: String,
    pub active: bool,
}

impl ElectrodeStatus {
    pub fn label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Status of every electrode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectrodePanel {
    electrodes: Vec<ElectrodeStatus>,
}

impl ElectrodePanel {
    /// Panel with the initial contact layout (3, 5 and 7 inactive)
    pub fn new() -> Self {
        let electrodes = (1..=ELECTRODE_COUNT)
            .map(|i| ElectrodeStatus {
                name: format!("Electrode {}", i),
                active: !matches!(i, 3 | 5 | 7),
            })
            .collect();
        Self { electrodes }
    }

    pub fn statuses(&self) -> &[ElectrodeStatus] {
        &self.electrodes
    }

    pub fn active_count(&self) -> usize {
        self.electrodes.iter().filter(|e| e.active).count()
    }

    /// Reroll every electrode independently
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for electrode in &mut self.electrodes {
            electrode.active = rng.gen_bool(0.5);
        }
    }
}

impl Default for ElectrodePanel {
    fn default() -> Self {
        Self::new()
    }
}
