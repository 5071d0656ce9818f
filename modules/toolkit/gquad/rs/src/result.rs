use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use framekit_core_rs::anchor::Census;
use framekit_core_rs::num::Count;

use crate::profile::Profile;

#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct Prediction {
    profile: Profile,
    census: Census,
    // Motif occurrences that passed the frame filter, each counted once per anchor
    hits: Count,
}
