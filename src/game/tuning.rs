// Actor tuning and ward layout
//
// Gameplay numbers live here as base constants, the same set for every run.
// The ward layout is data so scenes can be rebuilt with a different seed.

use glam::Vec2;

/// Vampire (player) tuning
#[derive(Debug, Clone)]
pub struct VampireStats {
    // Movement
    /// Walking speed (units/second at the target frame rate)
    pub walking_velocity: f32,
    /// Flying speed while a bat
    pub flying_velocity: f32,
    /// Collision radius
    pub radius: f32,

    // Health
    /// Health ceiling
    pub max_health: i32,
    /// Health lost every passive damage interval
    pub continuous_damage: i32,
    /// Seconds between passive damage ticks
    pub passive_damage_interval: f32,
    /// Health lost per hunter hit
    pub damage_taken: i32,
    /// Minimum seconds between hunter hits
    pub damage_cooldown: f32,

    // Abilities
    /// How far below the vampire a bite reaches
    pub attack_distance: f32,
    /// Health gained per successful bite
    pub health_restored: i32,
    /// Bat points gained per second in human form
    pub bat_regen: i32,
    /// Bat points spent per second as a bat
    pub bat_deplete: i32,
    /// Bat point ceiling
    pub total_bat_points: i32,
    /// Seconds between wolf summons
    pub wolf_cooldown: f32,
}

/// The vampire's base tuning
pub const VAMPIRE_STATS: VampireStats = VampireStats {
    walking_velocity: 3.0,
    flying_velocity: 5.0,
    radius: 0.4,

    max_health: 100,
    continuous_damage: 1,
    passive_damage_interval: 1.0,
    damage_taken: 10,
    damage_cooldown: 1.0,

    attack_distance: 1.5,
    health_restored: 20,
    bat_regen: 5,
    bat_deplete: 10,
    total_bat_points: 100,
    wolf_cooldown: 15.0,
};

impl Default for VampireStats {
    fn default() -> Self {
        VAMPIRE_STATS
    }
}

/// Hunter (enemy) tuning
#[derive(Debug, Clone)]
pub struct HunterStats {
    /// Distance at which the vampire is spotted
    pub detection_range: f32,
    /// Seconds spent idling at a reached patrol point
    pub idle_time: f32,
    /// Seconds spent hiding after wolves are summoned
    pub hide_time: f32,
    /// Patrol speed (units/second)
    pub speed: f32,
    /// Extra speed while running to a corner
    pub hide_speed_bonus: f32,
    /// Seconds after resuming a patrol before idling is allowed again
    pub patrol_cooldown: f32,
    /// Collision radius
    pub radius: f32,
}

pub const HUNTER_STATS: HunterStats = HunterStats {
    detection_range: 4.0,
    idle_time: 2.0,
    hide_time: 5.0,
    speed: 2.0,
    hide_speed_bonus: 3.0,
    patrol_cooldown: 1.0,
    radius: 0.4,
};

impl Default for HunterStats {
    fn default() -> Self {
        HUNTER_STATS
    }
}

/// Patient tuning
#[derive(Debug, Clone)]
pub struct PatientStats {
    /// Walking speed (units/second)
    pub speed: f32,
    /// Seconds a bitten patient stays in bed
    pub remove_time: f32,
    /// Collision radius
    pub radius: f32,
}

pub const PATIENT_STATS: PatientStats = PatientStats {
    speed: 1.5,
    remove_time: 3.0,
    radius: 0.4,
};

impl Default for PatientStats {
    fn default() -> Self {
        PATIENT_STATS
    }
}

/// Where a hunter starts and where it hides
#[derive(Debug, Clone)]
pub struct HunterSpawn {
    pub name: String,
    pub position: Vec2,
    /// Index into the patrol points used as its hiding corner
    pub corner: usize,
}

/// Ward layout and pacing
#[derive(Debug, Clone)]
pub struct WardConfig {
    /// Seconds between door spawn checks
    pub spawn_time: f32,
    /// Seconds before the first spawn check
    pub first_spawn_delay: f32,
    /// Bed positions; beds past index 2 are on the right-hand wall
    pub beds: Vec<Vec2>,
    pub door: Vec2,
    /// Radius of the door's trigger zone
    pub door_trigger_radius: f32,
    pub fireplace: Vec2,
    pub vampire_spawn: Vec2,
    /// Patrol points shared by all hunters
    pub patrol_points: Vec<Vec2>,
    pub hunters: Vec<HunterSpawn>,
    /// Title screen animation frame rate
    pub title_animation_speed: f32,
    /// Seed for patrol and bed choices
    pub seed: u64,

    pub vampire: VampireStats,
    pub hunter: HunterStats,
    pub patient: PatientStats,
}

impl Default for WardConfig {
    fn default() -> Self {
        Self {
            spawn_time: 6.0,
            first_spawn_delay: 1.0,
            beds: vec![
                Vec2::new(-6.0, 2.0),
                Vec2::new(-6.0, 0.0),
                Vec2::new(-6.0, -2.0),
                Vec2::new(6.0, 2.0),
                Vec2::new(6.0, 0.0),
                Vec2::new(6.0, -2.0),
            ],
            door: Vec2::new(0.0, 4.5),
            door_trigger_radius: 1.5,
            fireplace: Vec2::new(4.0, 4.5),
            vampire_spawn: Vec2::new(0.0, 0.0),
            patrol_points: vec![
                Vec2::new(-7.5, 4.0),
                Vec2::new(-3.0, 3.0),
                Vec2::new(3.0, 3.0),
                Vec2::new(-3.0, -3.0),
                Vec2::new(3.0, -3.0),
                Vec2::new(7.5, -4.0),
            ],
            hunters: vec![
                HunterSpawn {
                    name: "Hunter".to_string(),
                    position: Vec2::new(-4.0, -3.5),
                    corner: 0,
                },
                HunterSpawn {
                    name: "Hunter_1".to_string(),
                    position: Vec2::new(4.0, -3.5),
                    corner: 5,
                },
            ],
            title_animation_speed: 8.0,
            seed: 0x5EED_0B10_0D,
            vampire: VAMPIRE_STATS,
            hunter: HUNTER_STATS,
            patient: PATIENT_STATS,
        }
    }
}
