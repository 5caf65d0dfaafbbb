use std::mem;
use std::slice;

use log::kv::{self, Key, Source, Value, VisitSource};
use serde::ser::{Serialize, SerializeMap, Serializer};

/**
An ordered map of string properties attached to log records.

This map is optimised for handles that carry no properties or a single one.
Inserting a key that's already present replaces its value without moving it.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Properties {
    Empty,
    Single(String, String),
    Many(Vec<(String, String)>),
}

pub(crate) enum PropertiesIter<'a> {
    Empty,
    Single(&'a str, &'a str),
    Many(slice::Iter<'a, (String, String)>),
}

impl<'a> Iterator for PropertiesIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            PropertiesIter::Empty => None,
            PropertiesIter::Single(k, v) => {
                *self = PropertiesIter::Empty;

                Some((k, v))
            }
            PropertiesIter::Many(ref mut m) => m.next().map(|(k, v)| (k.as_str(), v.as_str())),
        }
    }
}

impl Default for Properties {
    fn default() -> Self {
        Properties::Empty
    }
}

impl Properties {
    pub fn insert(&mut self, k: String, v: String) {
        if let Some(existing) = self.get_mut(&k) {
            *existing = v;
            return;
        }

        *self = match mem::replace(self, Properties::Empty) {
            Properties::Empty => Properties::Single(k, v),
            Properties::Single(pk, pv) => Properties::Many(vec![(pk, pv), (k, v)]),
            Properties::Many(mut m) => {
                m.push((k, v));
                Properties::Many(m)
            }
        };
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        match *self {
            Properties::Empty => None,
            Properties::Single(ref k, ref mut v) if k == key => Some(v),
            Properties::Single(_, _) => None,
            Properties::Many(ref mut m) => m.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }

    pub fn iter(&self) -> PropertiesIter<'_> {
        self.into_iter()
    }

    pub fn len(&self) -> usize {
        match *self {
            Properties::Empty => 0,
            Properties::Single(_, _) => 1,
            Properties::Many(ref m) => m.len(),
        }
    }
}

impl Extend<(String, String)> for Properties {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (String, String)>,
    {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a> IntoIterator for &'a Properties {
    type IntoIter = PropertiesIter<'a>;
    type Item = (&'a str, &'a str);

    fn into_iter(self) -> Self::IntoIter {
        match *self {
            Properties::Empty => PropertiesIter::Empty,
            Properties::Single(ref k, ref v) => PropertiesIter::Single(k, v),
            Properties::Many(ref m) => PropertiesIter::Many(m.iter()),
        }
    }
}

impl Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;

        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }

        map.end()
    }
}

impl Source for Properties {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for (k, v) in self.iter() {
            visitor.visit_pair(Key::from_str(k), Value::from(v))?;
        }

        Ok(())
    }
}

/**
Two key-value sources visited one after the other.
*/
pub(crate) struct Chained<'a> {
    first: &'a dyn Source,
    second: &'a dyn Source,
}

impl<'a> Chained<'a> {
    pub(crate) fn new(first: &'a dyn Source, second: &'a dyn Source) -> Self {
        Chained { first, second }
    }
}

impl<'a> Source for Chained<'a> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        self.first.visit(visitor)?;
        self.second.visit(visitor)
    }
}
