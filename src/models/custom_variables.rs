use serde::Serialize;

use crate::error::{Result, TrackerError};

/// Number of custom variable slots the collector accepts.
pub const CUSTOM_VARIABLE_SLOTS: usize = 5;

/// Visit custom variables, indexed by slot id 1 to 5.
///
/// Serializes as a JSON array where index `i` holds slot `i + 1`. Empty slots
/// below the highest populated one become `null`, trailing empty slots are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomVariables {
    slots: [Option<(String, String)>; CUSTOM_VARIABLE_SLOTS],
}

impl CustomVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a slot. Slot ids outside 1..=5 are rejected without
    /// touching any slot.
    pub fn set(&mut self, slot_id: u8, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let index = Self::index(slot_id)?;
        self.slots[index] = Some((name.into(), value.into()));
        Ok(())
    }

    pub fn get(&self, slot_id: u8) -> Option<(&str, &str)> {
        let index = Self::index(slot_id).ok()?;
        self.slots[index]
            .as_ref()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// JSON text for the `_cvar` parameter, `None` when no slot is populated.
    pub fn to_json(&self) -> Result<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(self)?))
    }

    fn index(slot_id: u8) -> Result<usize> {
        match slot_id {
            1..=5 => Ok(usize::from(slot_id) - 1),
            other => Err(TrackerError::InvalidSlot(other)),
        }
    }
}

impl Serialize for CustomVariables {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let used = self
            .slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        serializer.collect_seq(&self.slots[..used])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_variables_produce_no_json() {
        assert_eq!(CustomVariables::new().to_json().unwrap(), None);
    }

    #[test]
    fn slots_map_to_array_positions() {
        let mut vars = CustomVariables::new();
        vars.set(2, "plan", "pro").unwrap();
        assert_eq!(vars.to_json().unwrap().unwrap(), r#"[null,["plan","pro"]]"#);

        vars.set(1, "lang", "en").unwrap();
        vars.set(5, "tier", "gold").unwrap();
        assert_eq!(
            vars.to_json().unwrap().unwrap(),
            r#"[["lang","en"],["plan","pro"],null,null,["tier","gold"]]"#
        );
    }

    #[test]
    fn out_of_range_slots_leave_variables_untouched() {
        let mut vars = CustomVariables::new();
        vars.set(3, "a", "b").unwrap();
        let before = vars.clone();

        assert!(matches!(vars.set(0, "x", "y"), Err(TrackerError::InvalidSlot(0))));
        assert!(matches!(vars.set(6, "x", "y"), Err(TrackerError::InvalidSlot(6))));
        assert_eq!(vars, before);
    }

    #[test]
    fn setting_a_slot_twice_overwrites() {
        let mut vars = CustomVariables::new();
        vars.set(1, "a", "first").unwrap();
        vars.set(1, "a", "second").unwrap();
        assert_eq!(vars.get(1), Some(("a", "second")));
        assert_eq!(vars.get(2), None);
        assert_eq!(vars.get(9), None);
    }
}
