// The ward: owns every actor of a run and wires them together
//
// Actors never look each other up. The ward hands each one what it needs
// (the vampire's position, contact events, timers) and reacts to what they
// report back.

use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::ambient::AmbientAnimation;
use super::door::Door;
use super::hud::{Hud, WardPanel};
use super::hunter::Hunter;
use super::patient::Patient;
use super::sprites::{HunterSprites, PatientSprites, PropSprites, VampireSprites};
use super::tuning::WardConfig;
use super::vampire::{Vampire, VampireEvent};
use super::world::{Body, Contact, ContactTracker, Layer};
use super::{GameError, SceneRequest};
use crate::engine::entity::{EntityAllocator, EntityId};
use crate::engine::game_loop::Tick;
use crate::engine::input::{Action, PlayerInput};
use crate::engine::scheduler::{Scheduler, TimerHandle};

/// Work the ward defers to a later game time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    PassiveDamage,
    OpenDoorIfBedAvailable,
    ResumeHunter(EntityId),
    RemovePatient(EntityId),
}

#[derive(Debug)]
pub struct Ward {
    config: WardConfig,
    rng: StdRng,
    ids: EntityAllocator,
    scheduler: Scheduler<Deferred>,
    /// Repeating door check, stopped when the run ends
    door_timer: TimerHandle,
    patient_sprites: PatientSprites,

    vampire: Option<Vampire>,
    hunters: Vec<Hunter>,
    patients: Vec<Patient>,
    door: Door,
    fireplace: AmbientAnimation,

    bed_available: Vec<bool>,
    score: u32,
    hud: Hud,

    hunter_contacts: ContactTracker,
    door_contacts: ContactTracker,
}

impl Ward {
    /// Set up a fresh run
    pub fn new(config: WardConfig, seed: u64, tick: &Tick) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ids = EntityAllocator::new();
        let mut scheduler = Scheduler::new();
        let props = PropSprites::standard(config.title_animation_speed);

        let vampire = Vampire::new(
            ids.allocate(),
            config.vampire_spawn,
            config.vampire.clone(),
            VampireSprites::standard(),
            tick,
        );
        scheduler.every(
            tick.time,
            0.0,
            config.vampire.passive_damage_interval,
            Some(vampire.id()),
            Deferred::PassiveDamage,
        );
        let door_timer = scheduler.every(
            tick.time,
            config.first_spawn_delay,
            config.spawn_time,
            None,
            Deferred::OpenDoorIfBedAvailable,
        );

        let patrol: Arc<[Vec2]> = config.patrol_points.clone().into();
        let hunter_sprites = HunterSprites::standard();
        let hunters = config
            .hunters
            .iter()
            .map(|spawn| {
                Hunter::new(
                    ids.allocate(),
                    &spawn.name,
                    spawn.position,
                    spawn.corner,
                    patrol.clone(),
                    config.hunter.clone(),
                    hunter_sprites.clone(),
                    tick,
                    &mut rng,
                )
            })
            .collect();

        let door = Door::new(config.door, config.door_trigger_radius, props.door);
        let fireplace = AmbientAnimation::new("fireplace", config.fireplace, props.fireplace, tick);

        let mut hud = Hud::new();
        hud.set_health(vampire.health(), config.vampire.max_health);
        hud.set_bat_points(vampire.bat_points(), config.vampire.total_bat_points);

        log::info!(
            "Ward ready: {} beds, {} hunters, seed {}",
            config.beds.len(),
            config.hunters.len(),
            seed
        );

        Self {
            bed_available: vec![true; config.beds.len()],
            config,
            rng,
            ids,
            scheduler,
            door_timer,
            patient_sprites: PatientSprites::standard(),
            vampire: Some(vampire),
            hunters,
            patients: Vec::new(),
            door,
            fireplace,
            score: 0,
            hud,
            hunter_contacts: ContactTracker::new(),
            door_contacts: ContactTracker::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn vampire(&self) -> Option<&Vampire> {
        self.vampire.as_ref()
    }

    pub fn hunters(&self) -> &[Hunter] {
        &self.hunters
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn door(&self) -> &Door {
        &self.door
    }

    pub fn fireplace(&self) -> &AmbientAnimation {
        &self.fireplace
    }

    pub fn bed_available(&self) -> &[bool] {
        &self.bed_available
    }

    /// Physics step: movement, AI and contacts
    pub fn fixed_update(&mut self, tick: &Tick, input: &mut PlayerInput) {
        if let Some(vampire) = self.vampire.as_mut() {
            let events = vampire.fixed_update(tick, input);
            self.handle_vampire_events(events, tick);
        }

        let visible = self
            .vampire
            .as_ref()
            .filter(|v| v.layer() == Layer::Dracula)
            .map(|v| v.position());
        for hunter in &mut self.hunters {
            hunter.fixed_update(tick, visible, &mut self.rng);
        }
        for patient in &mut self.patients {
            patient.fixed_update(tick);
        }

        self.update_hunter_contacts(tick);
        self.update_door_contacts(tick);
    }

    /// Per-frame step: timers, animation, HUD and menu keys
    pub fn frame_update(&mut self, tick: &Tick, input: &PlayerInput) -> SceneRequest {
        for action in self.scheduler.poll(tick.time) {
            self.run_deferred(action, tick);
        }

        if let Some(vampire) = self.vampire.as_mut() {
            let events = vampire.frame_update(tick, input);
            self.handle_vampire_events(events, tick);
        }
        for hunter in &mut self.hunters {
            hunter.frame_update(tick);
        }
        for patient in &mut self.patients {
            patient.frame_update(tick);
        }
        self.door.update(tick);
        self.fireplace.update(tick);

        self.refresh_hud();
        self.requested_scene(input)
    }

    /// Runs after every frame update: spawns the patient the door let in
    pub fn late_update(&mut self, tick: &Tick) {
        if !self.door.take_spawn_request() {
            return;
        }
        match self.spawn_patient(tick) {
            Ok(id) => log::debug!("Patient {} walks in", id),
            Err(err) => log::warn!("Door opened for nobody: {}", err),
        }
    }

    /// Admit a patient to a random free bed
    pub fn spawn_patient(&mut self, tick: &Tick) -> Result<EntityId, GameError> {
        let free: Vec<usize> = self
            .bed_available
            .iter()
            .enumerate()
            .filter(|(_, available)| **available)
            .map(|(bed, _)| bed)
            .collect();
        let bed = *free.choose(&mut self.rng).ok_or(GameError::NoFreeBed)?;
        let bed_position = *self.config.beds.get(bed).ok_or(GameError::NoFreeBed)?;

        self.bed_available[bed] = false;
        let id = self.ids.allocate();
        let entrance = self.door.position() - Vec2::Y;
        self.patients.push(Patient::new(
            id,
            entrance,
            bed,
            bed_position,
            self.config.patient.clone(),
            self.patient_sprites.clone(),
            tick,
        ));
        Ok(id)
    }

    /// Take a patient out of the ward and free its bed
    pub fn remove_patient(&mut self, id: EntityId) -> Result<(), GameError> {
        let index = self
            .patients
            .iter()
            .position(|p| p.id() == id)
            .ok_or(GameError::UnknownEntity(id))?;
        let patient = self.patients.remove(index);
        if let Some(bed) = self.bed_available.get_mut(patient.bed()) {
            *bed = true;
        }
        self.scheduler.cancel_owner(id);
        self.door_contacts.forget(id);
        Ok(())
    }

    fn run_deferred(&mut self, action: Deferred, tick: &Tick) {
        match action {
            Deferred::PassiveDamage => {
                if let Some(vampire) = self.vampire.as_mut() {
                    vampire.passive_damage(tick);
                }
            }
            Deferred::OpenDoorIfBedAvailable => {
                if self.bed_available.iter().any(|available| *available) {
                    self.door.open_door(tick);
                }
            }
            Deferred::ResumeHunter(id) => {
                match self.hunters.iter_mut().find(|h| h.id() == id) {
                    Some(hunter) => hunter.resume_normal_movement(),
                    None => log::warn!("{}", GameError::UnknownEntity(id)),
                }
            }
            Deferred::RemovePatient(id) => {
                if let Err(err) = self.remove_patient(id) {
                    log::warn!("{}", err);
                }
            }
        }
    }

    fn handle_vampire_events(&mut self, events: Vec<VampireEvent>, tick: &Tick) {
        for event in events {
            match event {
                VampireEvent::WolvesSummoned => {
                    for hunter in &mut self.hunters {
                        let hide_for = hunter.run_to_corner(tick);
                        self.scheduler.after(
                            tick.time,
                            hide_for,
                            Some(hunter.id()),
                            Deferred::ResumeHunter(hunter.id()),
                        );
                    }
                }
                VampireEvent::Bite { origin, reach } => {
                    self.bite(origin, reach, tick);
                }
                VampireEvent::Died => self.vampire_died(),
            }
        }
    }

    /// Feed on the nearest patient straight below `origin`, if it lies in bed
    fn bite(&mut self, origin: Vec2, reach: f32, tick: &Tick) -> bool {
        let target = self
            .patients
            .iter_mut()
            .filter(|p| p.collider_enabled() && p.body().hit_by_downward_ray(origin, reach))
            .min_by(|a, b| {
                let da = origin.y - a.position().y;
                let db = origin.y - b.position().y;
                da.total_cmp(&db)
            });

        // Only a patient lying in bed counts
        let Some(patient) = target.filter(|p| !p.is_walking()) else {
            return false;
        };

        let remove_after = patient.bitten(tick);
        let id = patient.id();
        self.scheduler
            .after(tick.time, remove_after, Some(id), Deferred::RemovePatient(id));

        self.score += 1;
        self.hud.set_score(self.score);
        log::info!("Score: {}", self.score);

        if let Some(vampire) = self.vampire.as_mut() {
            vampire.feed(tick);
        }
        true
    }

    fn vampire_died(&mut self) {
        if let Some(vampire) = self.vampire.take() {
            self.scheduler.cancel_owner(vampire.id());
        }
        // No more patients once the run is over
        if !self.scheduler.cancel(self.door_timer) {
            log::debug!("Door timer already stopped");
        }
        self.hunter_contacts = ContactTracker::new();
        self.hud.set_health(0, self.config.vampire.max_health);
        self.hud.show_restart(self.score);
        log::info!("The vampire is dead. Final score {}", self.score);
    }

    fn update_hunter_contacts(&mut self, tick: &Tick) {
        let touching: Vec<EntityId> = match &self.vampire {
            Some(vampire) if vampire.layer() == Layer::Dracula => self
                .hunters
                .iter()
                .filter(|h| h.body().overlaps(vampire.body()))
                .map(|h| h.id())
                .collect(),
            _ => Vec::new(),
        };

        for (id, contact) in self.hunter_contacts.update(touching) {
            let Some(hunter) = self.hunters.iter_mut().find(|h| h.id() == id) else {
                continue;
            };
            let hiding = hunter.is_hiding();
            hunter.on_vampire_contact(contact, tick, &mut self.rng);
            if let Some(vampire) = self.vampire.as_mut() {
                vampire.on_hunter_contact(contact, hiding, tick);
            }
        }
    }

    fn update_door_contacts(&mut self, tick: &Tick) {
        let zone = Body::new(self.door.position(), self.door.trigger_radius());
        let inside: Vec<EntityId> = self
            .patients
            .iter()
            .filter(|p| p.collider_enabled() && p.body().overlaps(&zone))
            .map(|p| p.id())
            .collect();

        for (_, contact) in self.door_contacts.update(inside) {
            if contact == Contact::Exit {
                self.door.on_patient_exit(tick);
            }
        }
    }

    fn refresh_hud(&mut self) {
        if let Some(vampire) = &self.vampire {
            let stats = vampire.stats();
            self.hud.set_health(vampire.health(), stats.max_health);
            self.hud.set_bat_points(vampire.bat_points(), stats.total_bat_points);
            self.hud
                .set_wolf_cooldown(vampire.wolf_cooldown_timer(), stats.wolf_cooldown);
        }
    }

    fn requested_scene(&self, input: &PlayerInput) -> SceneRequest {
        if input.just_pressed(Action::Quit) {
            return SceneRequest::Quit;
        }
        if self.hud.panel == WardPanel::Restart {
            if input.just_pressed(Action::Restart) {
                return SceneRequest::Restart;
            }
            if input.just_pressed(Action::MainMenu) {
                return SceneRequest::MainMenu;
            }
        }
        SceneRequest::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fsm::Playback;
    use crate::game::hunter::HunterPose;

    const STEP: f32 = 1.0 / 60.0;

    /// A ward with the hunters parked far away
    fn quiet_ward() -> Ward {
        let mut config = WardConfig::default();
        config.hunters.clear();
        Ward::new(config, 7, &Tick::at(0.0))
    }

    /// Run fixed, frame and late updates at 60 Hz until `to` seconds
    fn run(ward: &mut Ward, from: f32, to: f32, input: &mut PlayerInput) -> Vec<SceneRequest> {
        let first = (from / STEP).round() as u32;
        let last = (to / STEP).round() as u32;
        let mut requests = Vec::new();
        for frame in first..=last {
            let tick = Tick::new(frame as f32 * STEP, STEP);
            ward.fixed_update(&tick, input);
            requests.push(ward.frame_update(&tick, input));
            ward.late_update(&tick);
        }
        requests
    }

    fn pressing(action: Action) -> PlayerInput {
        let mut input = PlayerInput::new();
        input.press(action);
        input
    }

    #[test]
    fn test_new_ward() {
        let ward = Ward::new(WardConfig::default(), 1, &Tick::at(0.0));
        assert!(ward.vampire().is_some());
        assert_eq!(ward.hunters().len(), 2);
        assert!(ward.patients().is_empty());
        assert!(ward.bed_available().iter().all(|free| *free));
        assert!(ward.door().is_idle());
        assert_eq!(ward.score(), 0);
        assert_eq!(ward.hunters()[1].name(), "Hunter_1");
    }

    #[test]
    fn test_door_lets_a_patient_in() {
        let mut ward = quiet_ward();
        run(&mut ward, 0.0, 2.0, &mut PlayerInput::new());

        assert_eq!(ward.patients().len(), 1);
        assert_eq!(ward.bed_available().iter().filter(|free| !**free).count(), 1);
        let patient = &ward.patients()[0];
        assert!(!ward.bed_available()[patient.bed()]);
    }

    #[test]
    fn test_door_closes_behind_patient() {
        let mut ward = quiet_ward();
        run(&mut ward, 0.0, 5.0, &mut PlayerInput::new());

        assert!(ward.door().is_idle());
        let first = PropSprites::standard(8.0).door.frame(0, Playback::Forward);
        assert_eq!(ward.door().sprite().sprite(), first);
    }

    #[test]
    fn test_spawn_fails_without_free_bed() {
        let mut ward = quiet_ward();
        let tick = Tick::at(0.0);
        for _ in 0..6 {
            ward.spawn_patient(&tick).unwrap();
        }
        assert_eq!(ward.spawn_patient(&tick), Err(GameError::NoFreeBed));
        assert_eq!(ward.patients().len(), 6);
    }

    #[test]
    fn test_remove_unknown_patient() {
        let mut ward = quiet_ward();
        let stranger = ward.ids.allocate();
        assert_eq!(
            ward.remove_patient(stranger),
            Err(GameError::UnknownEntity(stranger))
        );
    }

    #[test]
    fn test_bite_patient_in_bed() {
        let mut ward = quiet_ward();
        let tick = Tick::at(0.0);
        let id = ward.spawn_patient(&tick).unwrap();

        // Walk the patient into bed
        for i in 1..1200 {
            let t = Tick::at(i as f32 * STEP);
            for patient in &mut ward.patients {
                patient.fixed_update(&t);
            }
        }
        let patient = &ward.patients()[0];
        assert!(!patient.is_walking());
        let bed = patient.bed();
        let above = patient.position() + Vec2::new(0.0, 1.0);

        let health_before = 50;
        if let Some(vampire) = ward.vampire.as_mut() {
            vampire.set_health(health_before, &tick);
        }

        let now = Tick::at(30.0);
        assert!(ward.bite(above, 1.5, &now));
        assert_eq!(ward.score(), 1);
        assert_eq!(ward.hud().score_text, "1");
        assert!(ward.vampire().unwrap().health() > health_before);

        // A bitten patient cannot be bitten again
        assert!(!ward.bite(above, 1.5, &now));
        assert_eq!(ward.score(), 1);

        // Removed after remove_time, bed freed
        let remove_time = ward.config.patient.remove_time;
        for action in ward.scheduler.poll(30.0 + remove_time) {
            ward.run_deferred(action, &now);
        }
        assert!(ward.patients().iter().all(|p| p.id() != id));
        assert!(ward.bed_available()[bed]);
    }

    #[test]
    fn test_walking_patient_cannot_be_bitten() {
        let mut ward = quiet_ward();
        let tick = Tick::at(0.0);
        ward.spawn_patient(&tick).unwrap();
        let above = ward.patients()[0].position() + Vec2::new(0.0, 1.0);

        assert!(!ward.bite(above, 1.5, &tick));
        assert_eq!(ward.score(), 0);
        assert!(ward.patients()[0].collider_enabled());
    }

    #[test]
    fn test_wolves_send_hunters_to_corners() {
        let mut ward = Ward::new(WardConfig::default(), 3, &Tick::at(0.0));
        let tick = Tick::at(1.0);
        ward.handle_vampire_events(vec![VampireEvent::WolvesSummoned], &tick);
        assert!(ward.hunters().iter().all(|h| h.is_hiding()));

        let hide_time = ward.config.hunter.hide_time;
        for action in ward.scheduler.poll(1.0 + hide_time) {
            ward.run_deferred(action, &tick);
        }
        assert!(ward.hunters().iter().all(|h| !h.is_hiding()));
    }

    #[test]
    fn test_passive_damage_every_second() {
        let mut ward = quiet_ward();
        let max = ward.config.vampire.max_health;
        let damage = ward.config.vampire.continuous_damage;

        // Fires at 0, 1 and 2 seconds
        run(&mut ward, 0.0, 2.5, &mut PlayerInput::new());
        assert_eq!(ward.vampire().unwrap().health(), max - 3 * damage);
    }

    #[test]
    fn test_vampire_death_shows_restart_panel() {
        let mut ward = quiet_ward();
        ward.score = 4;
        if let Some(vampire) = ward.vampire.as_mut() {
            vampire.set_health(0, &Tick::at(0.0));
        }
        let requests = run(&mut ward, 0.0, 3.0, &mut PlayerInput::new());
        assert!(requests.iter().all(|r| *r == SceneRequest::Stay));

        assert!(ward.vampire().is_none());
        assert_eq!(ward.hud().panel, WardPanel::Restart);
        assert_eq!(ward.hud().restart_text, "Score 4");

        let requests = run(&mut ward, 3.1, 3.1, &mut pressing(Action::Restart));
        assert_eq!(requests, vec![SceneRequest::Restart]);
        let requests = run(&mut ward, 3.2, 3.2, &mut pressing(Action::MainMenu));
        assert_eq!(requests, vec![SceneRequest::MainMenu]);

        // The door stops letting patients in once the run is over
        let admitted = ward.patients().len();
        run(&mut ward, 3.3, 20.0, &mut PlayerInput::new());
        assert_eq!(ward.patients().len(), admitted);
    }

    #[test]
    fn test_restart_keys_ignored_while_alive() {
        let mut ward = quiet_ward();
        let requests = run(&mut ward, 0.0, 0.0, &mut pressing(Action::Restart));
        assert_eq!(requests, vec![SceneRequest::Stay]);
        let requests = run(&mut ward, 0.1, 0.1, &mut pressing(Action::Quit));
        assert_eq!(requests, vec![SceneRequest::Quit]);
    }

    #[test]
    fn test_hunter_contact_hurts_vampire() {
        let mut config = WardConfig::default();
        config.hunters.truncate(1);
        config.hunters[0].position = Vec2::new(0.5, 0.0);
        config.patrol_points = vec![Vec2::new(0.5, 0.0)];
        let mut ward = Ward::new(config, 9, &Tick::at(0.0));
        let max = ward.config.vampire.max_health;

        run(&mut ward, 0.0, 2.5, &mut PlayerInput::new());
        let health = ward.vampire().unwrap().health();
        // More than passive damage alone
        assert!(health < max - 3 * ward.config.vampire.continuous_damage);
        assert_eq!(ward.hunters()[0].pose(), HunterPose::Stake);
    }

    #[test]
    fn test_bat_is_invisible_to_hunters() {
        let mut config = WardConfig::default();
        config.hunters.truncate(1);
        config.hunters[0].position = Vec2::new(2.0, 0.0);
        config.patrol_points = vec![Vec2::new(6.0, -3.0)];
        let mut ward = Ward::new(config, 11, &Tick::at(0.0));

        ward.fixed_update(&Tick::at(0.0), &mut pressing(Action::Metamorphosis));
        assert!(ward.vampire().unwrap().is_bat());

        ward.fixed_update(&Tick::at(STEP), &mut PlayerInput::new());
        assert!(!ward.hunters()[0].is_chasing());
    }
}
