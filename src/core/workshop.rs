//! Workshop catalog and progression controller
//!
//! The five ateliers of the EBIOS RM methodology form a strict linear
//! sequence: a workshop is accessible only once every step of the previous
//! workshop has been marked complete. Step completion is append-only for
//! the lifetime of a session.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of workshops in the fixed catalog
pub const WORKSHOP_COUNT: u8 = 5;

/// A workshop definition from the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workshop {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
}

/// The fixed five-workshop catalog (titles follow the methodology's
/// French vocabulary)
pub const WORKSHOPS: [Workshop; WORKSHOP_COUNT as usize] = [
    Workshop {
        id: 1,
        title: "Atelier 1: Socle de sécurité",
        description: "Cadrage et identification du socle de sécurité",
        steps: &[
            "Identification des valeurs métier et parties prenantes",
            "Définition des critères de sécurité",
            "Évaluation des besoins de sécurité",
            "Détermination du périmètre et des hypothèses",
            "Identification des biens supports essentiels",
        ],
    },
    Workshop {
        id: 2,
        title: "Atelier 2: Sources de risque",
        description: "Identification des sources de risque et objectifs visés",
        steps: &[
            "Identification des sources de risque pertinentes",
            "Caractérisation (motivation, ressources, etc.)",
            "Définition des objectifs visés",
            "Évaluation des couples sources-objectifs",
        ],
    },
    Workshop {
        id: 3,
        title: "Atelier 3: Scénarios stratégiques",
        description: "Élaboration des scénarios stratégiques",
        steps: &[
            "Construction des scénarios stratégiques",
            "Association aux sources de risque",
            "Évaluation de la gravité (impact métier)",
            "Évaluation et justification de la vraisemblance",
        ],
    },
    Workshop {
        id: 4,
        title: "Atelier 4: Scénarios opérationnels",
        description: "Construction des scénarios opérationnels",
        steps: &[
            "Décomposition des scénarios stratégiques",
            "Identification des mesures existantes",
            "Évaluation de la vraisemblance technique",
            "Synthèse et cartographie des risques",
        ],
    },
    Workshop {
        id: 5,
        title: "Atelier 5: Traitement du risque",
        description: "Définition de la stratégie de traitement",
        steps: &[
            "Choix des options de traitement",
            "Définition des mesures de sécurité",
            "Évaluation des risques résiduels",
            "Plan d'amélioration continue",
            "Cadre de suivi des risques",
        ],
    },
];

/// Look up a workshop definition by id (1-based)
pub fn workshop(id: u8) -> Option<&'static Workshop> {
    WORKSHOPS.iter().find(|w| w.id == id)
}

/// Tracks where the analyst is in the five-workshop sequence and which
/// steps have been finished
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkshopProgress {
    current: u8,
    completed: HashSet<(u8, usize)>,
}

impl Default for WorkshopProgress {
    fn default() -> Self {
        Self {
            current: 1,
            completed: HashSet::new(),
        }
    }
}

impl WorkshopProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active workshop id (always in [1, 5])
    pub fn current_workshop(&self) -> u8 {
        self.current
    }

    /// Mark a step complete. Idempotent; no validation is performed here,
    /// callers validate step data before invoking this.
    pub fn mark_step_complete(&mut self, workshop_id: u8, step_index: usize) {
        self.completed.insert((workshop_id, step_index));
    }

    /// Pure set-membership query
    pub fn is_step_complete(&self, workshop_id: u8, step_index: usize) -> bool {
        self.completed.contains(&(workshop_id, step_index))
    }

    /// A workshop is complete when every step in its catalog entry has been
    /// marked complete. Unknown workshop ids are never complete.
    pub fn is_workshop_complete(&self, workshop_id: u8) -> bool {
        match workshop(workshop_id) {
            Some(w) => (0..w.steps.len()).all(|i| self.is_step_complete(workshop_id, i)),
            None => false,
        }
    }

    /// Workshop 1 is always accessible; workshop N>1 only once workshop
    /// N-1 is complete. The gate is strictly linear.
    pub fn can_access_workshop(&self, workshop_id: u8) -> bool {
        if workshop_id == 1 {
            return true;
        }
        self.is_workshop_complete(workshop_id - 1)
    }

    /// Count of completed steps within a workshop
    pub fn completed_step_count(&self, workshop_id: u8) -> usize {
        match workshop(workshop_id) {
            Some(w) => (0..w.steps.len())
                .filter(|i| self.is_step_complete(workshop_id, *i))
                .count(),
            None => 0,
        }
    }

    /// Advance to the next workshop if the current one is complete.
    /// Silently ignored otherwise.
    pub fn next_workshop(&mut self) {
        if self.current < WORKSHOP_COUNT && self.is_workshop_complete(self.current) {
            self.current += 1;
        }
    }

    /// Step back to the previous workshop. No-op at workshop 1.
    pub fn previous_workshop(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_workshop(progress: &mut WorkshopProgress, workshop_id: u8) {
        let w = workshop(workshop_id).unwrap();
        for i in 0..w.steps.len() {
            progress.mark_step_complete(workshop_id, i);
        }
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(WORKSHOPS.len(), 5);
        let step_counts: Vec<usize> = WORKSHOPS.iter().map(|w| w.steps.len()).collect();
        assert_eq!(step_counts, vec![5, 4, 4, 4, 5]);
    }

    #[test]
    fn test_workshop_lookup() {
        assert_eq!(workshop(1).unwrap().id, 1);
        assert_eq!(workshop(5).unwrap().id, 5);
        assert!(workshop(0).is_none());
        assert!(workshop(6).is_none());
    }

    #[test]
    fn test_workshop_one_always_accessible() {
        let progress = WorkshopProgress::new();
        assert!(progress.can_access_workshop(1));

        let mut progress = WorkshopProgress::new();
        complete_workshop(&mut progress, 3);
        assert!(progress.can_access_workshop(1));
    }

    #[test]
    fn test_sequential_unlock() {
        let mut progress = WorkshopProgress::new();
        assert!(!progress.can_access_workshop(2));

        // Partial completion is not enough
        progress.mark_step_complete(1, 0);
        progress.mark_step_complete(1, 1);
        assert!(!progress.can_access_workshop(2));

        complete_workshop(&mut progress, 1);
        assert!(progress.can_access_workshop(2));
        // No skipping ahead
        assert!(!progress.can_access_workshop(3));
    }

    #[test]
    fn test_mark_step_idempotent() {
        let mut progress = WorkshopProgress::new();
        progress.mark_step_complete(1, 0);
        progress.mark_step_complete(1, 0);
        assert!(progress.is_step_complete(1, 0));
        assert_eq!(progress.completed_step_count(1), 1);
    }

    #[test]
    fn test_next_workshop_requires_completion() {
        let mut progress = WorkshopProgress::new();
        progress.next_workshop();
        assert_eq!(progress.current_workshop(), 1);

        complete_workshop(&mut progress, 1);
        progress.next_workshop();
        assert_eq!(progress.current_workshop(), 2);

        // Workshop 2 not complete yet
        progress.next_workshop();
        assert_eq!(progress.current_workshop(), 2);
    }

    #[test]
    fn test_next_workshop_stops_at_five() {
        let mut progress = WorkshopProgress::new();
        for id in 1..=5 {
            complete_workshop(&mut progress, id);
            progress.next_workshop();
        }
        assert_eq!(progress.current_workshop(), 5);
    }

    #[test]
    fn test_previous_workshop() {
        let mut progress = WorkshopProgress::new();
        progress.previous_workshop();
        assert_eq!(progress.current_workshop(), 1);

        complete_workshop(&mut progress, 1);
        progress.next_workshop();
        progress.previous_workshop();
        assert_eq!(progress.current_workshop(), 1);
    }

    #[test]
    fn test_unknown_workshop_never_complete() {
        let mut progress = WorkshopProgress::new();
        progress.mark_step_complete(9, 0);
        assert!(!progress.is_workshop_complete(9));
        assert!(!progress.is_workshop_complete(0));
    }

    #[test]
    fn test_completion_monotonic() {
        // No un-mark operation exists; once complete, access stays granted
        let mut progress = WorkshopProgress::new();
        complete_workshop(&mut progress, 1);
        assert!(progress.can_access_workshop(2));
        progress.mark_step_complete(1, 0);
        assert!(progress.can_access_workshop(2));
    }
}
