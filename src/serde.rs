//! `serde` support for the tree and its adaptors.
//!
//! Values are written in ascending order and read back through plain inserts. The tree never
//! rebalances, so sorted input rebuilds a chain: deserializing `n` elements costs O(n²)
//! comparisons and yields a tree of depth `n`.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Bst, BstMap, BstSet};

/// Serializes as a sequence in ascending order, duplicates included.
impl<T: Serialize> Serialize for Bst<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<T: Serialize> Serialize for BstSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<K: Serialize, V: Serialize> Serialize for BstMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Preallocation taken from an untrusted length hint is capped.
fn cautious(hint: Option<usize>) -> usize {
    hint.unwrap_or(0).min(4096)
}

struct BstVisitor<T> {
    marker: PhantomData<fn() -> Bst<T>>,
}

impl<'de, T> Visitor<'de> for BstVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = Bst<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut tree = Bst::with_capacity(cautious(access.size_hint()));
        while let Some(value) = access.next_element()? {
            tree.insert(value, false);
        }
        Ok(tree)
    }
}

impl<'de, T> Deserialize<'de> for Bst<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(BstVisitor { marker: PhantomData })
    }
}

struct BstSetVisitor<T> {
    marker: PhantomData<fn() -> BstSet<T>>,
}

impl<'de, T> Visitor<'de> for BstSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = BstSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = BstSet::with_capacity(cautious(access.size_hint()));
        while let Some(value) = access.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for BstSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(BstSetVisitor { marker: PhantomData })
    }
}

struct BstMapVisitor<K, V> {
    marker: PhantomData<fn() -> BstMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for BstMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = BstMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = BstMap::with_capacity(cautious(access.size_hint()));
        while let Some((k, v)) = access.next_entry()? {
            map.insert(k, v);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for BstMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BstMapVisitor { marker: PhantomData })
    }
}
