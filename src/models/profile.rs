//! Public profile of a user, as seen by the requester.

use super::user::{bio, image, username};
use crate::validation::{boolean, object, string, Schema, Validated};
use serde::{Deserialize, Serialize};

pub fn following() -> Schema {
    boolean()
}

pub fn profile() -> Schema {
    object()
        .field("username", string())
        .field("bio", bio())
        .field("image", image())
        .field("following", following())
        .into()
}

pub fn profile_param() -> Schema {
    object().field("username", username()).into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileParam {
    pub username: String,
}

impl Validated for ProfileParam {
    fn schema() -> Schema {
        profile_param()
    }
}
