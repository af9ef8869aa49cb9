use serde::{Deserialize, Serialize};

use crate::hearts::Heart;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    Question,
    Celebration,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub screen: Screen,
    pub yes_scale: f64,
    pub evasive_offset: Offset,
    pub photo_src: String,
    pub drag_active: bool,
    pub message_loading: bool,
    pub message: Option<String>,
    pub notice: Option<String>,
    pub hearts: Vec<Heart>,
}
