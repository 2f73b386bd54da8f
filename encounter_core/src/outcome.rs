//! Encounter Outcome Handler - folds a finished fight back into the world.
//!
//! Steps for a fight the yard started:
//! 1. **Flag**: the character has had their encounter today, win or lose
//! 2. **Narrate**: win or loss text naming the opponent
//! 3. **Navigate**: discard combat actions and rebuild the referrer's actions
//! 4. **Gate**: re-run the gate so the new status shows without another turn

use log::{debug, info, warn};
use scene_rules::{CharacterState, ConnectionGraph};

use crate::combat::{CombatHandle, CombatResult};
use crate::error::EncounterResult;
use crate::events::CombatConcluded;
use crate::resolver::ActionGraphResolver;
use crate::view::Viewpoint;
use crate::yard::{violation, TrainingYard};

pub const WIN_TITLE: &str = "You won!";
pub const LOSS_TITLE: &str = "You died!";

/// What happened to a combat-concluded event.
#[derive(Debug, Clone)]
pub enum Disposition {
    /// The fight was the yard's; here is the view to show.
    Resolved(Viewpoint),
    /// Somebody else's fight, handed back untouched.
    Unrelated(CombatConcluded),
}

/// Reconciles concluded fights with gate state and navigation.
pub struct EncounterOutcomeHandler<'y> {
    yard: &'y TrainingYard,
}

impl<'y> EncounterOutcomeHandler<'y> {
    pub fn new(yard: &'y TrainingYard) -> Self {
        Self { yard }
    }

    /// Event-driven entry point. Fights tagged for another context pass through.
    pub fn on_combat_concluded(
        &self,
        event: CombatConcluded,
        character: &mut CharacterState,
        graph: &ConnectionGraph,
    ) -> EncounterResult<Disposition> {
        if event.context != self.yard.config().battle_context {
            debug!("ignoring combat result for context {}", event.context);
            return Ok(Disposition::Unrelated(event));
        }
        let view = self.conclude(event.result, character, graph)?;
        Ok(Disposition::Resolved(view))
    }

    /// Continuation for a fight started through [`TrainingYard::start_encounter`].
    pub fn resolve(
        &self,
        handle: CombatHandle,
        result: CombatResult,
        character: &mut CharacterState,
        graph: &ConnectionGraph,
    ) -> EncounterResult<Viewpoint> {
        if handle.context != self.yard.config().battle_context {
            return Err(violation(format!(
                "handle for context {} resolved by the yard",
                handle.context
            )));
        }
        if handle.character != character.id {
            return Err(violation(format!(
                "handle for character {} resolved with state of {}",
                handle.character, character.id
            )));
        }
        if result.winner.id != handle.master.id && result.loser.id != handle.master.id {
            return Err(violation(format!(
                "result does not involve {}, the master that was challenged",
                handle.master.name
            )));
        }
        if handle.origin != result.referrer {
            warn!(
                "fight started at {} but reported back from {}",
                handle.origin, result.referrer
            );
        }
        self.conclude(result, character, graph)
    }

    fn conclude(
        &self,
        result: CombatResult,
        character: &mut CharacterState,
        graph: &ConnectionGraph,
    ) -> EncounterResult<Viewpoint> {
        let won = result.winner.id == character.id;
        if !won && result.loser.id != character.id {
            return Err(violation(format!(
                "{} fought neither side of {} vs {}",
                character.name, result.winner.display_name, result.loser.display_name
            )));
        }

        character.mark_encounter_engaged();

        let mut view = Viewpoint::default();
        if won {
            view.set_title(WIN_TITLE);
            view.set_description(format!(
                "You defeated {}. You gain no experience.",
                result.loser.display_name
            ));
        } else {
            view.set_title(LOSS_TITLE);
            view.set_description(format!(
                "You have been defeated by {}. They stand over your dead body, laughting..",
                result.winner.display_name
            ));
        }
        info!(
            "{} {} the master encounter",
            character.name,
            if won { "won" } else { "lost" }
        );

        // Combat actions are dropped wholesale.
        view.set_action_groups(ActionGraphResolver::new(graph).rebuild_actions(result.referrer)?);

        if result.referrer == self.yard.location() {
            self.yard.narrate_after_combat(graph, &mut view, character)?;
        } else {
            debug!("fight reported from {}, not the yard; gate not re-run", result.referrer);
        }

        Ok(view)
    }
}
