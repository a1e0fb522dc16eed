use std::fmt;
use std::rc::Rc;

use crate::host::{EngineObject, ResourceKind};

/// Names of the objects that appeared between two history slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObjectsReport {
    pub kind: ResourceKind,
    pub slot: usize,
    pub entries: Vec<String>,
}

impl NewObjectsReport {
    pub fn from_objects(
        kind: ResourceKind,
        slot: usize,
        objects: &[Rc<dyn EngineObject>],
    ) -> Self {
        NewObjectsReport {
            kind,
            slot,
            entries: objects.iter().map(|o| describe(o.as_ref())).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for NewObjectsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "New {} names: {}", self.kind.noun(), self.entries.join(", "))
    }
}

/// `name`, or `name[detail]` when the object has a kind-specific detail.
pub fn describe(object: &dyn EngineObject) -> String {
    let name = if object.name().is_empty() {
        "-"
    } else {
        object.name()
    };
    match object.detail() {
        Some(detail) => format!("{name}[{detail}]"),
        None => name.to_string(),
    }
}
