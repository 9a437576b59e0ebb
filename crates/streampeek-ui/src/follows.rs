// src/follows.rs
//
// The followed-channel list shown in the sidebar rail. Persisted through the
// same best-effort KvStore contract as the settings — a failed write keeps
// the in-memory list intact.

use streampeek_core::{ChannelId, KvStore};

const KEY_FOLLOWED: &str = "followed_channels";

pub struct FollowList {
    channels: Vec<ChannelId>,
    store: Box<dyn KvStore>,
}

impl FollowList {
    pub fn load(store: Box<dyn KvStore>) -> Self {
        let channels = store
            .get(KEY_FOLLOWED)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default()
            .iter()
            // Anything that no longer validates is silently dropped.
            .filter_map(|name| ChannelId::new(name))
            .collect();
        Self { channels, store }
    }

    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Append `channel` unless it's already followed (case-insensitive).
    pub fn follow(&mut self, channel: ChannelId) {
        let exists = self
            .channels
            .iter()
            .any(|c| c.as_str().eq_ignore_ascii_case(channel.as_str()));
        if !exists {
            self.channels.push(channel);
            self.persist();
        }
    }

    pub fn unfollow(&mut self, channel: &ChannelId) {
        let before = self.channels.len();
        self.channels
            .retain(|c| !c.as_str().eq_ignore_ascii_case(channel.as_str()));
        if self.channels.len() != before {
            self.persist();
        }
    }

    fn persist(&mut self) {
        let names: Vec<&str> = self.channels.iter().map(|c| c.as_str()).collect();
        if let Ok(json) = serde_json::to_string(&names) {
            self.store.set(KEY_FOLLOWED, &json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemStore {
        map: BTreeMap<String, String>,
    }

    impl KvStore for MemStore {
        fn get(&self, key: &str) -> Option<String> {
            self.map.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.map.insert(key.to_string(), value.to_string());
        }
    }

    fn chan(s: &str) -> ChannelId {
        ChannelId::new(s).unwrap()
    }

    #[test]
    fn follow_is_deduplicated_case_insensitively() {
        let mut list = FollowList::load(Box::new(MemStore::default()));
        list.follow(chan("SomeChannel"));
        list.follow(chan("somechannel"));
        assert_eq!(list.channels().len(), 1);
        assert_eq!(list.channels()[0].as_str(), "SomeChannel");
    }

    #[test]
    fn unfollow_removes_and_tolerates_unknown() {
        let mut list = FollowList::load(Box::new(MemStore::default()));
        list.follow(chan("one"));
        list.follow(chan("two"));
        list.unfollow(&chan("ONE"));
        assert_eq!(list.channels().len(), 1);
        list.unfollow(&chan("never_followed"));
        assert_eq!(list.channels().len(), 1);
    }

    #[test]
    fn list_survives_reload_and_drops_invalid_entries() {
        let mut mem = MemStore::default();
        mem.map.insert(
            KEY_FOLLOWED.into(),
            r#"["valid_one", "x", "also_valid", "has space"]"#.into(),
        );
        let list = FollowList::load(Box::new(mem));
        let names: Vec<&str> = list.channels().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["valid_one", "also_valid"]);
    }
}
