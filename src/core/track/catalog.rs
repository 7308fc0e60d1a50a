//=========================================================================
// Segment Catalog
//=========================================================================
//
// Immutable set of placeable segment templates.
//
// Each template carries the offset from its own origin to where the next
// segment in the chain should begin.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use glam::Vec3;
use rand::Rng;
use serde::Deserialize;

//=== SegmentTemplate =====================================================

/// A placeable chunk of track or obstacle geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentTemplate {
    pub id: String,
    /// Where the next segment begins, relative to this one's origin.
    pub next_offset: Vec3,
}

impl SegmentTemplate {
    pub fn new(id: impl Into<String>, next_offset: Vec3) -> Self {
        Self {
            id: id.into(),
            next_offset,
        }
    }
}

//=== SegmentCatalog ======================================================

/// Shared, read-only list of templates for one stream window.
#[derive(Debug, Clone, Default)]
pub struct SegmentCatalog {
    templates: Vec<Arc<SegmentTemplate>>,
}

impl SegmentCatalog {
    pub fn new(templates: impl IntoIterator<Item = SegmentTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<SegmentTemplate>> {
        self.templates.get(index)
    }

    /// Picks a template uniformly at random; `None` for an empty catalog.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<SegmentTemplate>> {
        if self.templates.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.templates.len());
        Some(Arc::clone(&self.templates[index]))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_catalog_chooses_nothing() {
        let catalog = SegmentCatalog::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(catalog.is_empty());
        assert!(catalog.choose(&mut rng).is_none());
    }

    #[test]
    fn choose_covers_every_template() {
        let catalog = SegmentCatalog::new([
            SegmentTemplate::new("a", Vec3::Z),
            SegmentTemplate::new("b", Vec3::Z * 2.0),
            SegmentTemplate::new("c", Vec3::Z * 3.0),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];

        for _ in 0..200 {
            let template = catalog.choose(&mut rng).unwrap();
            let index = ["a", "b", "c"].iter().position(|id| *id == template.id).unwrap();
            seen[index] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }
}
