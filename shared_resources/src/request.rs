use super::call::Call;

pub type Floor = u8;

/// A floor paired with the direction the passenger wants to travel.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: Floor,
    pub call: Call,
}

impl Request {
    pub fn new(floor: Floor, call: Call) -> Self {
        Request { floor, call }
    }
}
