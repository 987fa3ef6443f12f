use std::collections::HashMap;

use crate::model::{SectionKind, StructuralSection};

/// Collapse near-duplicate detections from adjacent page scans into one
/// canonical section per identity key (kind, number, title).
///
/// Output preserves first-occurrence order; within a key, a strictly longer
/// content replaces the kept candidate and ties keep the first seen. The key
/// compares titles verbatim, so the same article number captured with a
/// line-wrapped title variant survives as a separate entry; switching to
/// number+kind keys or normalized titles would merge those and is a
/// deliberate behavioral change, not a cleanup.
pub fn deduplicate_sections(sections: Vec<StructuralSection>) -> Vec<StructuralSection> {
    let mut canonical = Vec::<StructuralSection>::new();
    let mut index_by_key = HashMap::<(SectionKind, Option<String>, Option<String>), usize>::new();

    for section in sections {
        let key = {
            let (kind, number, title) = section.identity_key();
            (kind, number.map(str::to_string), title.map(str::to_string))
        };

        match index_by_key.get(&key) {
            Some(&existing) => {
                if section.content.len() > canonical[existing].content.len() {
                    canonical[existing] = section;
                }
            }
            None => {
                index_by_key.insert(key, canonical.len());
                canonical.push(section);
            }
        }
    }

    canonical
}
