use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain acknowledgement body for operations that return no entity.
#[derive(Serialize, Debug)]
pub struct StatusBody {
    pub status: &'static str,
}
