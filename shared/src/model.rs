use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::evasion::EvasiveTarget;
use crate::hearts::Hearts;
use crate::photo::PhotoRef;

/// Token handed to an in-flight message request. Only a resolution carrying
/// the current token may commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RequestToken(pub u64);

impl RequestToken {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// All mutable page state. Owned by the shell's core instance and only
/// touched from `App::update`.
#[derive(Debug)]
pub struct Model {
    pub accepted: bool,
    /// Saturates at `u32::MAX` instead of wrapping.
    pub pointer_miss_count: u32,
    pub evasive_target: EvasiveTarget,

    // Message
    pub message_loading: bool,
    pub message: Option<String>,
    pub message_token: RequestToken,

    // Photo
    pub photo: PhotoRef,
    pub photo_broken: bool,
    pub drag_active: bool,
    pub notice: Option<String>,
    /// Bumped per applied photo; tags the matching storage write.
    pub photo_write: RequestToken,

    pub hearts: Hearts,

    pub config: Config,
    pub rng: StdRng,
}

impl Model {
    pub fn new(config: Config, rng: StdRng) -> Self {
        Self {
            accepted: false,
            pointer_miss_count: 0,
            evasive_target: EvasiveTarget::default(),
            message_loading: false,
            message: None,
            message_token: RequestToken::default(),
            photo: PhotoRef::Default,
            photo_broken: false,
            drag_active: false,
            notice: None,
            photo_write: RequestToken::default(),
            hearts: Hearts::default(),
            config,
            rng,
        }
    }

    /// Deterministic model for tests and replays.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Size multiplier of the affirmative button.
    #[must_use]
    pub fn yes_scale(&self) -> f64 {
        1.0 + 0.1 * f64::from(self.pointer_miss_count)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Config::default(), StdRng::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_on_the_question() {
        let model = Model::with_seed(Config::static_messages(), 0);
        assert!(!model.accepted);
        assert_eq!(model.pointer_miss_count, 0);
        assert_eq!(model.photo, PhotoRef::Default);
        assert!(model.message.is_none());
        assert!((model.yes_scale() - 1.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn scale_grows_a_tenth_per_miss(misses in 0u32..100_000) {
            let mut model = Model::with_seed(Config::static_messages(), 0);
            model.pointer_miss_count = misses;
            let expected = 1.0 + 0.1 * f64::from(misses);
            prop_assert!((model.yes_scale() - expected).abs() < 1e-9);
        }
    }
}
