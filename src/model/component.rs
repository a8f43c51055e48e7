use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::AxisIndex;
use crate::error::{PickerError, PickerResult};

/// One measured ground-motion direction, e.g. `u`, `n` or `e`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component(String);

impl Component {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Component {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Closed, ordered set of components for one run.
///
/// Axis `i` of every panel shows component `i` of this set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSet {
    components: SmallVec<[Component; 4]>,
}

impl ComponentSet {
    pub fn new<I, S>(labels: I) -> PickerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut components = SmallVec::<[Component; 4]>::new();
        for label in labels {
            let label = label.into();
            if label.trim().is_empty() {
                return Err(PickerError::InvalidConfig(
                    "component labels must not be empty".to_owned(),
                ));
            }
            if components.iter().any(|c: &Component| c.as_str() == label) {
                return Err(PickerError::InvalidConfig(format!(
                    "component `{label}` is listed twice"
                )));
            }
            components.push(Component(label));
        }
        if components.is_empty() {
            return Err(PickerError::InvalidConfig(
                "at least one component is required".to_owned(),
            ));
        }
        Ok(Self { components })
    }

    /// Vertical, north and east, the layout of a standard three-component station.
    #[must_use]
    pub fn three_component() -> Self {
        Self {
            components: ["u", "n", "e"].into_iter().map(Component::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    #[must_use]
    pub fn get(&self, axis: AxisIndex) -> Option<&Component> {
        self.components.get(axis)
    }

    #[must_use]
    pub fn axis_of(&self, component: &str) -> Option<AxisIndex> {
        self.components.iter().position(|c| c.as_str() == component)
    }

    #[must_use]
    pub fn contains(&self, component: &str) -> bool {
        self.axis_of(component).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }
}

impl Default for ComponentSet {
    fn default() -> Self {
        Self::three_component()
    }
}
