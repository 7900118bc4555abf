use std::collections::hash_map::{self, HashMap};
use std::iter::FromIterator;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::ids::Id;

/// A collection of objects keyed by their [`Id`], which Discord sends as a JSON array.
///
/// Serializes back to an array; iteration order is unspecified. A `null` array decodes as an empty
/// map, and a later object with the same id replaces an earlier one.
#[derive(Debug, Clone)]
pub struct IdMap<T: Id>(HashMap<T::Id, T>);

#[allow(clippy::needless_pass_by_value)]
impl<T: Id> IdMap<T> {
    pub fn get<I: Id<Id=T::Id>>(&self, id: I) -> Option<&T> {
        self.0.get(&id.id())
    }

    pub fn contains<I: Id<Id=T::Id>>(&self, id: I) -> bool {
        self.0.contains_key(&id.id())
    }

    /// Add `value`, returning the object it replaced, if any.
    pub fn insert(&mut self, value: T) -> Option<T> {
        self.0.insert(value.id(), value)
    }

    pub fn remove<I: Id<Id=T::Id>>(&mut self, id: I) -> Option<T> {
        self.0.remove(&id.id())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Values<T::Id, T> {
        self.0.values()
    }
}

impl<T: Id> Default for IdMap<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T: Id> FromIterator<T> for IdMap<T> {
    fn from_iter<It: IntoIterator<Item=T>>(iter: It) -> Self {
        Self(iter.into_iter().map(|t| (t.id(), t)).collect())
    }
}

impl<T: Id> Extend<T> for IdMap<T> {
    fn extend<It: IntoIterator<Item=T>>(&mut self, iter: It) {
        self.0.extend(iter.into_iter().map(|t| (t.id(), t)));
    }
}

impl<T: Id> IntoIterator for IdMap<T> {
    type Item = T;
    type IntoIter = hash_map::IntoValues<T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a, T: Id> IntoIterator for &'a IdMap<T> {
    type Item = &'a T;
    type IntoIter = hash_map::Values<'a, T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Id + Serialize> Serialize for IdMap<T> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.iter())
    }
}

impl<'de, T: Id + Deserialize<'de>> Deserialize<'de> for IdMap<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let list = <Option<Vec<T>>>::deserialize(d)?;
        Ok(list.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::ids::RoleId;
    use crate::model::permissions::Role;

    use super::*;

    const ROLES: &str = r#"[
        {"id": "1", "name": "a", "color": 0, "hoist": false, "position": 0, "permissions": "0", "managed": false, "mentionable": false},
        {"id": "2", "name": "b", "color": 0, "hoist": false, "position": 1, "permissions": "8", "managed": false, "mentionable": false}
    ]"#;

    #[test]
    fn list_and_null() {
        let roles: IdMap<Role> = serde_json::from_str(ROLES).unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles.get(RoleId(2)).unwrap().name, "b");
        assert!(!roles.contains(RoleId(3)));

        let empty: IdMap<Role> = serde_json::from_str("null").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn serializes_as_list() {
        let mut roles: IdMap<Role> = serde_json::from_str(ROLES).unwrap();
        let removed = roles.remove(RoleId(1)).unwrap();
        assert_eq!(removed.name, "a");

        let json = serde_json::to_value(&roles).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["id"], "2");

        let mut renamed = roles.get(RoleId(2)).unwrap().clone();
        renamed.name = "c".into();
        assert_eq!(roles.insert(renamed).unwrap().name, "b");
        assert_eq!(roles.len(), 1);
    }
}
