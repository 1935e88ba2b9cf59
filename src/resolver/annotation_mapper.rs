use std::collections::{HashMap, HashSet};

use ontolius::TermId;

use crate::catalog::{CatalogService, OntologyId};
use crate::error::Result;
use crate::parser::Diagnostics;

/// Maps `~` ontology term references to internal ontology ids.
pub struct AnnotationMapper<'a, C: ?Sized> {
    service: &'a C,
    cache: HashMap<TermId, OntologyId>,
    unknown: HashSet<TermId>,
}

impl<'a, C> AnnotationMapper<'a, C>
where
    C: CatalogService + ?Sized,
{
    pub fn new(service: &'a C) -> Self {
        Self {
            service,
            cache: HashMap::new(),
            unknown: HashSet::new(),
        }
    }

    /// Ontology ids of the given references in input order, without repeats.
    /// References that are malformed or unknown only produce warnings.
    pub fn map_annotations(
        &mut self,
        annotations: &[String],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<OntologyId>> {
        let mut terms: Vec<(&str, TermId)> = Vec::new();
        for annotation in annotations {
            match annotation.parse::<TermId>() {
                Ok(term) => terms.push((annotation, term)),
                Err(_) => diagnostics.warn(format!("{} is not a valid ontology term id", annotation)),
            }
        }

        let mut missing: Vec<TermId> = Vec::new();
        for (_, term) in &terms {
            if !self.cache.contains_key(term)
                && !self.unknown.contains(term)
                && !missing.contains(term)
            {
                missing.push(term.clone());
            }
        }
        if !missing.is_empty() {
            let found = self.service.ontology_ids(&missing)?;
            for term in missing {
                match found.get(&term) {
                    Some(id) => {
                        self.cache.insert(term, *id);
                    }
                    None => {
                        self.unknown.insert(term);
                    }
                }
            }
        }

        let mut ids = Vec::new();
        for (annotation, term) in terms {
            match self.cache.get(&term) {
                Some(id) if !ids.contains(id) => ids.push(*id),
                Some(_) => {}
                None => diagnostics.warn(format!(
                    "The ontology term {} is missing from the catalog",
                    annotation
                )),
            }
        }
        Ok(ids)
    }
}
