//! Where ingested chunks are filed.
//!
//! The memory store groups records by conversation group and attributes each
//! one to a sender. Those identifiers travel with every chunk. They are
//! resolved once, from the environment or from explicit values, and passed
//! down as a plain value.

/// Environment variable for [`Destination::group_id`].
pub const GROUP_ID_VAR: &str = "EVERMEMOS_GROUP_ID";
/// Environment variable for [`Destination::group_name`].
pub const GROUP_NAME_VAR: &str = "EVERMEMOS_GROUP_NAME";
/// Environment variable for [`Destination::sender`].
pub const SENDER_VAR: &str = "EVERMEMOS_SENDER";
/// Environment variable for [`Destination::sender_name`].
pub const SENDER_NAME_VAR: &str = "EVERMEMOS_SENDER_NAME";

/// Identifiers attached to every submitted chunk.
///
/// ```rust
/// use cleave::Destination;
///
/// let dest = Destination::from_lookup(|key| {
///     (key == "EVERMEMOS_GROUP_ID").then(|| "novels".to_string())
/// });
/// assert_eq!(dest.group_id, "novels");
/// assert_eq!(dest.sender, "user_001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Group the memories belong to.
    pub group_id: String,
    /// Display name of the group.
    pub group_name: String,
    /// Sender id recorded on each memory.
    pub sender: String,
    /// Display name of the sender.
    pub sender_name: String,
}

impl Default for Destination {
    fn default() -> Self {
        Self {
            group_id: "group_123".to_string(),
            group_name: "Project Discussion Group".to_string(),
            sender: "user_001".to_string(),
            sender_name: "User".to_string(),
        }
    }
}

impl Destination {
    /// Resolve from the process environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through `lookup`, falling back to defaults for missing or blank values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str, fallback: String| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };
        Self {
            group_id: get(GROUP_ID_VAR, defaults.group_id),
            group_name: get(GROUP_NAME_VAR, defaults.group_name),
            sender: get(SENDER_VAR, defaults.sender),
            sender_name: get(SENDER_NAME_VAR, defaults.sender_name),
        }
    }
}
