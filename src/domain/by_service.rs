use serde::{Deserialize, Serialize};

/// Records partitioned by service name.
///
/// Services keep the order in which they were first seen, and records keep
/// insertion order within their service. Keys are compared exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ByService<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for ByService<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ByService<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to `service`, creating the partition if needed.
    /// Returns a reference to the stored item.
    pub fn push(&mut self, service: &str, item: T) -> &T {
        let index = match self.position(service) {
            Some(index) => index,
            None => {
                self.entries.push((service.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        let items = &mut self.entries[index].1;
        items.push(item);
        &items[items.len() - 1]
    }

    pub fn get(&self, service: &str) -> Option<&[T]> {
        let index = self.position(service)?;
        Some(self.entries[index].1.as_slice())
    }

    pub fn get_mut(&mut self, service: &str) -> Option<&mut Vec<T>> {
        let index = self.position(service)?;
        Some(&mut self.entries[index].1)
    }

    pub fn contains(&self, service: &str) -> bool {
        self.position(service).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries
            .iter()
            .map(|(service, items)| (service.as_str(), items.as_slice()))
    }

    /// Every record across all services, service by service.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().flat_map(|(_, items)| items.iter())
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(service, _)| service.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records across all services.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }

    /// Linear scan; a tracker holds a handful of services and the scan keeps
    /// first-seen order without a second index.
    fn position(&self, service: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_keep_first_seen_order() {
        let mut map = ByService::new();
        map.push("Газ", 1);
        map.push("Вода", 2);
        map.push("Газ", 3);
        map.push("Электричество", 4);

        let services: Vec<_> = map.services().collect();
        assert_eq!(services, vec!["Газ", "Вода", "Электричество"]);
        assert_eq!(map.get("Газ"), Some(&[1, 3][..]));
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 3, 2, 4]);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut map = ByService::new();
        map.push("water", 1);

        assert!(map.contains("water"));
        assert!(!map.contains("Water"));
        assert!(!map.contains("water "));
        assert_eq!(map.get("Water"), None);
    }

    #[test]
    fn test_empty() {
        let map: ByService<i32> = ByService::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.iter().count(), 0);
    }
}
