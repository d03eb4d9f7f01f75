//! Environment data model as served by the directory backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// One tenant workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// System-assigned identifier, immutable once created
    pub name: String,
    /// Human label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Legacy label field, consulted when `display_name` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "active_blueprints",
        deserialize_with = "deserialize_components"
    )]
    pub active_components: Vec<Component>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            environment_name: None,
            description: None,
            active_components: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_component(mut self, category: ComponentCategory) -> Self {
        self.active_components.push(Component::new(category));
        self
    }

    /// Effective label: `display_name`, then `environment_name`, then `name`.
    /// Empty strings fall through.
    pub fn label(&self) -> &str {
        [self.display_name.as_deref(), self.environment_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(self.name.as_str())
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Case-insensitive label comparison used for duplicate detection
    pub fn label_matches(&self, candidate: &str) -> bool {
        self.label().to_lowercase() == candidate.trim().to_lowercase()
    }

    /// Case-insensitive search over label and description. A blank query
    /// matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.label().to_lowercase().contains(&query)
            || self.description().to_lowercase().contains(&query)
    }

    /// Number of active components in the given category
    pub fn component_count(&self, category: &ComponentCategory) -> usize {
        self.active_components
            .iter()
            .filter(|component| component.category() == *category)
            .count()
    }
}

/// Keep environments matching `query`, in catalog order
pub fn filter_environments<'a>(environments: &'a [Environment], query: &str) -> Vec<&'a Environment> {
    environments
        .iter()
        .filter(|env| env.matches_query(query))
        .collect()
}

/// Category tag of an active component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Ui,
    Logic,
    Database,
    Integration,
    Agents,
    Other(String),
}

impl ComponentCategory {
    pub const DISPLAYED: [ComponentCategory; 5] = [
        ComponentCategory::Ui,
        ComponentCategory::Logic,
        ComponentCategory::Database,
        ComponentCategory::Integration,
        ComponentCategory::Agents,
    ];

    /// Tags are compared verbatim, as the backend emits them
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "UI" => ComponentCategory::Ui,
            "Logic" => ComponentCategory::Logic,
            "Database" => ComponentCategory::Database,
            "Integration" => ComponentCategory::Integration,
            "Agents" => ComponentCategory::Agents,
            other => ComponentCategory::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            ComponentCategory::Ui => "UI",
            ComponentCategory::Logic => "Logic",
            ComponentCategory::Database => "Database",
            ComponentCategory::Integration => "Integration",
            ComponentCategory::Agents => "Agents",
            ComponentCategory::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Typed sub-resource of an environment. The category tag arrives under
/// `type` or, on older backends, `blueprint_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint_type: Option<String>,
}

impl Component {
    pub fn new(category: ComponentCategory) -> Self {
        Self {
            kind: Some(category.as_tag().to_string()),
            blueprint_type: None,
        }
    }

    pub fn tag(&self) -> &str {
        [self.kind.as_deref(), self.blueprint_type.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn category(&self) -> ComponentCategory {
        ComponentCategory::from_tag(self.tag())
    }
}

/// Anything other than an array of objects counts as "no components".
fn deserialize_components<'de, D>(deserializer: D) -> Result<Vec<Component>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Component>(item) {
            Ok(component) => Some(component),
            Err(e) => {
                warn!("Skipping malformed component entry: {}", e);
                None
            }
        })
        .collect())
}
