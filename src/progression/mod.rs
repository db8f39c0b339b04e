pub mod experience;
pub mod moves;

pub use experience::{
    add_experience, calculate_exp_gain, calculate_exp_gain_with, get_exp_for_level,
    get_level_from_exp, ExperienceGain, MAX_LEVEL,
};
pub use moves::moves_learned_between;
