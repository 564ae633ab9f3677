use serde::{Deserialize, Serialize};

/// Short reference to a master record, embedded into list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i32,
    pub kode: String,
    pub nama: String,
}

impl NamedRef {
    pub fn new(id: i32, kode: impl Into<String>, nama: impl Into<String>) -> Self {
        Self {
            id,
            kode: kode.into(),
            nama: nama.into(),
        }
    }
}
