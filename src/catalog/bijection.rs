use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Case-insensitive name -> id map paired with an exact id -> name map.
///
/// Names are looked up lower-cased; the reverse direction returns the name as
/// it was registered. Aliases only exist in the forward direction.
#[derive(Debug, Clone)]
pub struct Bijection<I> {
    kind: &'static str,
    by_name: HashMap<String, I>,
    by_id: HashMap<I, String>,
    entries: Vec<(String, I)>,
}

impl<I> Bijection<I>
where
    I: Copy + Eq + Hash + Display,
{
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            by_name: HashMap::new(),
            by_id: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn from_pairs<S: Into<String>>(
        kind: &'static str,
        pairs: impl IntoIterator<Item = (S, I)>,
    ) -> Result<Self> {
        let mut bijection = Self::new(kind);
        for (name, id) in pairs {
            bijection.insert(name, id)?;
        }
        Ok(bijection)
    }

    /// Registers the canonical name of `id`.
    pub fn insert<S: Into<String>>(&mut self, name: S, id: I) -> Result<()> {
        let name = name.into();
        if let Some(existing) = self.by_id.get(&id) {
            if existing != &name {
                return Err(Error::Catalog(format!(
                    "{} id {} is named both '{}' and '{}'",
                    self.kind, id, existing, name
                )));
            }
            return Ok(());
        }
        self.insert_forward(&name, id)?;
        self.by_id.insert(id, name.clone());
        self.entries.push((name, id));
        Ok(())
    }

    /// Registers an additional lookup name for an id that is already known.
    pub fn insert_alias(&mut self, alias: &str, id: I) -> Result<()> {
        if !self.by_id.contains_key(&id) {
            return Err(Error::Catalog(format!(
                "alias '{}' refers to unknown {} id {}",
                alias, self.kind, id
            )));
        }
        self.insert_forward(alias, id)
    }

    fn insert_forward(&mut self, name: &str, id: I) -> Result<()> {
        let key = name.to_lowercase();
        match self.by_name.get(&key) {
            Some(other) if *other != id => Err(Error::Catalog(format!(
                "{} name '{}' maps to both {} and {}",
                self.kind, name, other, id
            ))),
            _ => {
                self.by_name.insert(key, id);
                Ok(())
            }
        }
    }

    pub fn id(&self, name: &str) -> Option<I> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    pub fn name(&self, id: I) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Canonical names in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, I)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
