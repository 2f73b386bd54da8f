//! Training Yard - the scene hosting the daily master challenge.
//!
//! Every turn at the yard is answered from scratch:
//! 1. **Navigation**: rebuild the yard's actions from the connection graph
//! 2. **Gate**: evaluate the character and narrate the matching branch
//! 3. **Intent**: question the master, challenge the master, or just look around

use log::{error, info, warn};
use scene_rules::{CharacterState, ConnectionGraph, Location, LocationId, SceneResult};

use crate::action::{Action, ActionGroup, ActionIntent};
use crate::combat::{CombatEngine, CombatHandle, CombatRequest, Combatant};
use crate::config::EncounterConfig;
use crate::error::{EncounterError, EncounterResult};
use crate::events::PlayerTurn;
use crate::gate::{EncounterGate, GateState};
use crate::masters::{EncounterSelector, Master, MasterTable};
use crate::outcome::EncounterOutcomeHandler;
use crate::resolver::ActionGraphResolver;
use crate::view::Viewpoint;

pub const YARD_TITLE: &str = "Bluspring's Warrior Training";

const YARD_DESCRIPTION: &str = "You stroll into the battle grounds. Younger warriors huddle together and point as you pass by. You know this place well. Bluspring hails you, and you grasp her hand firmly. There is nothing left for you here but memories. You remain a moment longer, and look at the warriors in training before you turn to return to the village.";

const CONFLICT: &str = "The sound of conflict surrounds you. The clang of weapons in grisly battle inspires your warrior heart.";

const DEAD: &str = "You are dead. How are you going to challenge your master if you cannot even survive killing enemies? Come back tomorrow.";

const ALREADY_ENGAGED: &str =
    "You already challenged your master today. Is one embarassment per day not enough?";

pub const QUESTION_TITLE: &str = "Question Master";
pub const CHALLENGE_TITLE: &str = "Challenge Master";
pub const FIGHT_TITLE: &str = "A fight against your master!";

/// What a turn at the yard produced.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Show this view; nothing is pending.
    View(Viewpoint),
    /// A fight is underway; resolve the handle once the engine reports back.
    CombatStarted {
        view: Viewpoint,
        handle: CombatHandle,
    },
}

impl TurnOutcome {
    pub fn view(&self) -> &Viewpoint {
        match self {
            TurnOutcome::View(view) => view,
            TurnOutcome::CombatStarted { view, .. } => view,
        }
    }
}

/// Turn handler for the training yard.
pub struct TrainingYard {
    location: LocationId,
    config: EncounterConfig,
    gate: EncounterGate,
    selector: EncounterSelector,
}

impl TrainingYard {
    /// Build a yard at `location`. The master table must cover every level up
    /// to the configured ceiling.
    pub fn new(
        location: LocationId,
        config: EncounterConfig,
        masters: MasterTable,
    ) -> EncounterResult<Self> {
        masters.validate(config.level_ceiling)?;
        Ok(Self {
            location,
            gate: EncounterGate::new(config.level_ceiling),
            selector: EncounterSelector::new(masters),
            config,
        })
    }

    /// A yard with the default configuration and the classic roster.
    pub fn with_defaults(location: LocationId) -> EncounterResult<Self> {
        Self::new(location, EncounterConfig::default(), MasterTable::classic())
    }

    /// The yard's scene, with the connection groups its actions use.
    pub fn create_scene(config: &EncounterConfig) -> SceneResult<Location> {
        Location::new(YARD_TITLE, YARD_DESCRIPTION)
            .with_connection_group(config.yard_group.clone())?
            .with_connection_group(config.back_group.clone())
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn gate(&self) -> &EncounterGate {
        &self.gate
    }

    pub fn selector(&self) -> &EncounterSelector {
        &self.selector
    }

    /// Handler for fights this yard started.
    pub fn outcome_handler(&self) -> EncounterOutcomeHandler<'_> {
        EncounterOutcomeHandler::new(self)
    }

    /// Answer a player turn at the yard.
    ///
    /// Question and challenge intents are only offered while the gate is
    /// `Eligible`; receiving one otherwise means the wiring is broken and the
    /// turn is aborted.
    pub fn handle_turn(
        &self,
        graph: &ConnectionGraph,
        character: &CharacterState,
        turn: &PlayerTurn,
        engine: &mut dyn CombatEngine,
    ) -> EncounterResult<TurnOutcome> {
        if turn.destination != self.location {
            return Err(violation(format!(
                "turn for {} reached the yard at {}",
                turn.destination, self.location
            )));
        }
        if turn.character_id != character.id {
            return Err(violation(format!(
                "turn for character {} handled with state of {}",
                turn.character_id, character.id
            )));
        }

        let mut view = self.arrival_view(graph)?;

        match turn.intent {
            ActionIntent::Navigate => {
                self.narrate_main_yard(graph, &mut view, character)?;
                Ok(TurnOutcome::View(view))
            }
            ActionIntent::Question => {
                self.require_eligible(character, turn.intent)?;
                self.question(graph, &mut view, character)?;
                Ok(TurnOutcome::View(view))
            }
            ActionIntent::Challenge => {
                let handle = self.start_encounter(&mut view, character, engine)?;
                Ok(TurnOutcome::CombatStarted { view, handle })
            }
        }
    }

    /// Hand the character over to the combat engine.
    ///
    /// The gate must be `Eligible`; anything else is an invariant violation
    /// and leaves both the view and the engine untouched. The daily flag is
    /// left alone here; it is set when the fight concludes, so a fight that
    /// never starts does not count.
    pub fn start_encounter(
        &self,
        view: &mut Viewpoint,
        character: &CharacterState,
        engine: &mut dyn CombatEngine,
    ) -> EncounterResult<CombatHandle> {
        self.require_eligible(character, ActionIntent::Challenge)?;
        let master = self.selector.select(character.level())?.clone();

        view.set_title(FIGHT_TITLE);
        view.set_description(format!(
            "{} quickly spins around and taunts you to attack first, being sure that you'll never be victorious.",
            master.display_name()
        ));

        let request = CombatRequest {
            attacker: Combatant::from(character),
            defender: Combatant::from(&master),
            context: self.config.battle_context.clone(),
            origin: self.location,
        };

        let fight_actions = engine.start_combat(request).map_err(|err| {
            warn!("{} could not start a fight with {}: {}", character.name, master.name, err);
            err
        })?;
        view.set_action_groups(fight_actions);

        info!("{} challenges {}", character.name, master.name);
        Ok(CombatHandle {
            context: self.config.battle_context.clone(),
            character: character.id,
            master,
            origin: self.location,
        })
    }

    /// Narrate the gate state on arrival, replacing the scene description
    /// when the gate has something to say.
    pub fn narrate_main_yard(
        &self,
        graph: &ConnectionGraph,
        view: &mut Viewpoint,
        character: &CharacterState,
    ) -> EncounterResult<GateState> {
        let (state, paragraphs) = self.gate_narrative(graph, view, character)?;
        if !paragraphs.is_empty() {
            view.description.clear();
            for paragraph in paragraphs {
                view.add_description_paragraph(paragraph);
            }
        }
        Ok(state)
    }

    /// Narrate the gate state after a fight, keeping what is already in the view.
    pub fn narrate_after_combat(
        &self,
        graph: &ConnectionGraph,
        view: &mut Viewpoint,
        character: &CharacterState,
    ) -> EncounterResult<GateState> {
        let (state, paragraphs) = self.gate_narrative(graph, view, character)?;
        for paragraph in paragraphs {
            view.add_description_paragraph(paragraph);
        }
        Ok(state)
    }

    fn gate_narrative(
        &self,
        graph: &ConnectionGraph,
        view: &mut Viewpoint,
        character: &CharacterState,
    ) -> EncounterResult<(GateState, Vec<String>)> {
        let state = self.gate.evaluate(character);
        let paragraphs = match state {
            GateState::IneligibleDead => vec![DEAD.to_string()],
            // Nothing left to learn; the scene description stands.
            GateState::IneligibleTooExperienced => Vec::new(),
            GateState::IneligibleAlreadyEngaged => {
                vec![CONFLICT.to_string(), ALREADY_ENGAGED.to_string()]
            }
            GateState::Eligible => {
                let master = self.selector.select(character.level())?;
                self.add_yard_navigation(graph, view)?;
                vec![
                    CONFLICT.to_string(),
                    format!("{} stands ready to evaluate you.", master.display_name()),
                ]
            }
        };
        Ok((state, paragraphs))
    }

    fn question(
        &self,
        graph: &ConnectionGraph,
        view: &mut Viewpoint,
        character: &CharacterState,
    ) -> EncounterResult<()> {
        let master = self.selector.select(character.level())?;

        view.set_description(format!(
            "You approach {} timidly and inquire as to your standing in the class.",
            master.display_name()
        ));
        view.add_description_paragraph(standing_remark(master, character));

        self.add_yard_navigation(graph, view)
    }

    /// Add the question and challenge actions to the yard group.
    fn add_yard_navigation(&self, graph: &ConnectionGraph, view: &mut Viewpoint) -> EncounterResult<()> {
        let yard = graph.location(self.location)?;
        let group = &self.config.yard_group;
        let sort_key = yard
            .connection_group(&group.name)
            .map(|(index, _)| index as i32 + 1)
            .unwrap_or(0);

        let target = view.action_groups.get_or_insert_with(&group.name, || {
            ActionGroup::new(group.name.clone(), group.title.clone(), sort_key)
        });
        for (title, intent) in [
            (QUESTION_TITLE, ActionIntent::Question),
            (CHALLENGE_TITLE, ActionIntent::Challenge),
        ] {
            if !target.contains((self.location, intent)) {
                target.add_action(Action::new(self.location, title, intent));
            }
        }
        Ok(())
    }

    fn arrival_view(&self, graph: &ConnectionGraph) -> EncounterResult<Viewpoint> {
        let yard = graph.location(self.location)?;
        let mut view = Viewpoint::for_location(yard);
        view.set_action_groups(ActionGraphResolver::new(graph).rebuild_actions(self.location)?);
        Ok(view)
    }

    fn require_eligible(&self, character: &CharacterState, intent: ActionIntent) -> EncounterResult<()> {
        match self.gate.evaluate(character) {
            GateState::Eligible => Ok(()),
            state => Err(violation(format!(
                "{:?} requested by {} while gate is {:?}",
                intent, character.name, state
            ))),
        }
    }
}

/// What the master says about the character's experience. No state changes.
fn standing_remark(master: &Master, character: &CharacterState) -> String {
    if character.experience.has_needed(character.level()) {
        format!(
            "{} says, \"Gee, your muscles are getting bigger than mine...\"",
            master.display_name()
        )
    } else {
        format!(
            "{} states that you will need {} more experience before you are ready to challenge him in battle.",
            master.display_name(),
            character.experience.remaining(character.level())
        )
    }
}

pub(crate) fn violation(message: String) -> EncounterError {
    error!("{}", message);
    EncounterError::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionGroups, DEFAULT_GROUP};
    use crate::combat::{CombatEngineError, MockCombatEngine};
    use scene_rules::{Connection, ConnectionGroup, Experience};

    struct Fixture {
        graph: ConnectionGraph,
        yard: TrainingYard,
        village: LocationId,
    }

    fn fixture() -> Fixture {
        let config = EncounterConfig::default();
        let mut graph = ConnectionGraph::new();
        let village = graph.add_location(
            Location::new("Village", "")
                .with_connection_group(ConnectionGroup::new("outside", "Outside"))
                .unwrap(),
        );
        let yard_id = graph.add_location(TrainingYard::create_scene(&config).unwrap());
        graph
            .add_connection(
                Connection::new(village, yard_id)
                    .with_outgoing_group("outside")
                    .with_incoming_group("back"),
            )
            .unwrap();

        Fixture {
            graph,
            yard: TrainingYard::new(yard_id, config, MasterTable::classic()).unwrap(),
            village,
        }
    }

    fn turn(f: &Fixture, character: &CharacterState, intent: ActionIntent) -> PlayerTurn {
        PlayerTurn::new(character.id, f.yard.location(), intent)
    }

    fn idle_engine() -> MockCombatEngine {
        let mut engine = MockCombatEngine::new();
        engine.expect_start_combat().never();
        engine
    }

    #[test]
    fn test_eligible_arrival_offers_master_actions() {
        let f = fixture();
        let hero = CharacterState::new("Hero");
        let outcome = f
            .yard
            .handle_turn(&f.graph, &hero, &turn(&f, &hero, ActionIntent::Navigate), &mut idle_engine())
            .unwrap();

        let view = outcome.view();
        assert_eq!(view.title, YARD_TITLE);
        assert!(view.has_paragraph("Mieraband stands ready to evaluate you."));
        assert!(view.find_action("trainyard", QUESTION_TITLE).is_some());
        assert!(view.find_action("trainyard", CHALLENGE_TITLE).is_some());
        assert_eq!(view.action_groups.get("trainyard").unwrap().title, "The Yard");

        let back = view.find_action("back", "Village").unwrap();
        assert_eq!(back.destination, f.village);
    }

    #[test]
    fn test_dead_arrival() {
        let f = fixture();
        let dead = CharacterState::new("Ghost").with_health(0);
        let outcome = f
            .yard
            .handle_turn(&f.graph, &dead, &turn(&f, &dead, ActionIntent::Navigate), &mut idle_engine())
            .unwrap();

        let view = outcome.view();
        assert_eq!(view.description_text(), DEAD);
        assert!(view.find_action("trainyard", QUESTION_TITLE).is_none());
        assert!(view.find_action("trainyard", CHALLENGE_TITLE).is_none());
        assert!(view.find_action("back", "Village").is_some());
    }

    #[test]
    fn test_too_experienced_keeps_scene_description() {
        let f = fixture();
        let veteran = CharacterState::new("Veteran").with_level(16);
        let outcome = f
            .yard
            .handle_turn(&f.graph, &veteran, &turn(&f, &veteran, ActionIntent::Navigate), &mut idle_engine())
            .unwrap();

        let view = outcome.view();
        assert_eq!(view.description_text(), YARD_DESCRIPTION);
        assert!(view.action_groups.get("trainyard").is_none());
    }

    #[test]
    fn test_already_engaged_arrival() {
        let f = fixture();
        let eager = CharacterState::new("Eager").with_encounter_engaged(true);
        let outcome = f
            .yard
            .handle_turn(&f.graph, &eager, &turn(&f, &eager, ActionIntent::Navigate), &mut idle_engine())
            .unwrap();

        let view = outcome.view();
        assert!(view.has_paragraph(ALREADY_ENGAGED));
        assert!(view.find_action("trainyard", CHALLENGE_TITLE).is_none());
    }

    #[test]
    fn test_question_does_not_mutate() {
        let f = fixture();
        let hero = CharacterState::new("Hero").with_experience(Experience::new(40));
        let before = hero.clone();

        let outcome = f
            .yard
            .handle_turn(&f.graph, &hero, &turn(&f, &hero, ActionIntent::Question), &mut idle_engine())
            .unwrap();

        let view = outcome.view();
        assert!(view.has_paragraph(
            "You approach Mieraband timidly and inquire as to your standing in the class."
        ));
        assert!(view.has_paragraph(
            "Mieraband states that you will need 60 more experience before you are ready to challenge him in battle."
        ));
        assert!(view.find_action("trainyard", QUESTION_TITLE).is_some());
        assert_eq!(hero.has_engaged_encounter_today(), before.has_engaged_encounter_today());
    }

    #[test]
    fn test_challenge_starts_combat() {
        let f = fixture();
        let hero = CharacterState::new("Hero");
        let hero_id = hero.id;
        let yard_id = f.yard.location();

        let mut engine = MockCombatEngine::new();
        engine
            .expect_start_combat()
            .withf(move |req| {
                req.attacker.id == hero_id
                    && req.defender.display_name == "Mieraband"
                    && req.context.as_str() == "training/master-challenge"
                    && req.origin == yard_id
            })
            .times(1)
            .returning(|_| {
                let mut groups = ActionGroups::new();
                groups.insert(ActionGroup::new("fight", "Fight", 0));
                Ok(groups)
            });

        let outcome = f
            .yard
            .handle_turn(&f.graph, &hero, &turn(&f, &hero, ActionIntent::Challenge), &mut engine)
            .unwrap();

        let TurnOutcome::CombatStarted { view, handle } = outcome else {
            panic!("expected combat to start");
        };
        assert_eq!(view.title, FIGHT_TITLE);
        assert!(view.action_groups.contains_group("fight"));
        assert!(!view.action_groups.contains_group(DEFAULT_GROUP));
        assert_eq!(handle.master.name, "Mieraband");
        assert_eq!(handle.character, hero_id);
        assert!(!hero.has_engaged_encounter_today());
    }

    #[test]
    fn test_engine_failure_propagates() {
        let f = fixture();
        let hero = CharacterState::new("Hero");

        let mut engine = MockCombatEngine::new();
        engine
            .expect_start_combat()
            .times(1)
            .returning(|_| Err(CombatEngineError("arena closed".into())));

        let err = f
            .yard
            .handle_turn(&f.graph, &hero, &turn(&f, &hero, ActionIntent::Challenge), &mut engine)
            .unwrap_err();
        assert!(matches!(err, EncounterError::CombatEngine(_)));
        assert!(!hero.has_engaged_encounter_today());
    }

    #[test]
    fn test_ineligible_challenge_is_violation() {
        let f = fixture();
        let eager = CharacterState::new("Eager").with_encounter_engaged(true);

        for intent in [ActionIntent::Challenge, ActionIntent::Question] {
            let err = f
                .yard
                .handle_turn(&f.graph, &eager, &turn(&f, &eager, intent), &mut idle_engine())
                .unwrap_err();
            assert!(matches!(err, EncounterError::InvariantViolation(_)));
        }
    }

    #[test]
    fn test_start_encounter_checks_the_gate() {
        let f = fixture();
        let ineligible = [
            CharacterState::new("Ghost").with_health(0),
            CharacterState::new("Veteran").with_level(16),
            CharacterState::new("Eager").with_encounter_engaged(true),
        ];

        for character in &ineligible {
            let mut view = Viewpoint::for_location(f.graph.location(f.yard.location()).unwrap());
            let err = f
                .yard
                .start_encounter(&mut view, character, &mut idle_engine())
                .unwrap_err();

            assert!(matches!(err, EncounterError::InvariantViolation(_)), "{}", character.name);
            assert_eq!(view.title, YARD_TITLE);
            assert_eq!(view.description_text(), YARD_DESCRIPTION);
        }
    }

    #[test]
    fn test_turn_for_other_location_is_violation() {
        let f = fixture();
        let hero = CharacterState::new("Hero");
        let stray = PlayerTurn::new(hero.id, f.village, ActionIntent::Navigate);

        let err = f
            .yard
            .handle_turn(&f.graph, &hero, &stray, &mut idle_engine())
            .unwrap_err();
        assert!(matches!(err, EncounterError::InvariantViolation(_)));
    }

    #[test]
    fn test_short_master_table_rejected() {
        let err = TrainingYard::new(
            LocationId::new(),
            EncounterConfig::default().with_level_ceiling(20),
            MasterTable::classic(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, EncounterError::InvalidMasterTable(_)));
    }
}
