//! The controlled lab vocabulary and how it is built.
//!
//! Every entry maps a display label to the identifiers it stands for. Raw
//! items carry their own identifier; curated panels, abbreviation splits and
//! "Total X" variants are label-only entries pointing at raw identifiers.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use regex::Regex;
use serde::Serialize;

use crate::curated::{
    ADDITIONAL_LAB_TEST_MAPPING, ADDITIONAL_LAB_TEST_MAPPING_SYNONYMS, LAB_TEST_MAPPING_ALTERATIONS,
    LAB_TEST_MAPPING_SYNONYMS, additional_mapping,
};
use crate::error::VocabError;
use crate::source::LabItemTable;
use crate::text::extract_short_and_long_name;

/// One lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabEntry {
    /// Set for rows that describe a raw item, `None` for label-only rows.
    pub itemid: Option<u32>,
    pub label: String,
    pub fluid: Option<String>,
    /// Identifiers this label resolves to.
    pub ids: Vec<u32>,
}

impl VocabEntry {
    fn label_only(label: impl Into<String>, ids: Vec<u32>, fluid: Option<String>) -> Self {
        Self {
            itemid: None,
            label: label.into(),
            fluid,
            ids,
        }
    }
}

#[derive(Debug, Clone)]
struct ItemInfo {
    label: String,
    fluid: Option<String>,
    category: Option<String>,
}

/// Built vocabulary. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
    items: HashMap<u32, ItemInfo>,
    label_patterns: Vec<Regex>,
}

impl Vocabulary {
    /// Build from the sample table compiled into the crate.
    pub fn bundled() -> Result<Self, VocabError> {
        VocabularyBuilder::new(LabItemTable::bundled()?).build()
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    /// Labels of every entry in lookup order. Duplicates are kept.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Identifiers of the first entry carrying exactly `label`.
    pub fn ids_for_label(&self, label: &str) -> Option<&[u32]> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.ids.as_slice())
    }

    /// Display label of a raw identifier.
    pub fn label_of(&self, itemid: u32) -> Option<&str> {
        self.items.get(&itemid).map(|i| i.label.as_str())
    }

    /// Fluid tag of a raw identifier. `None` for microbiology tests and
    /// unknown identifiers alike.
    pub fn fluid_of(&self, itemid: u32) -> Option<&str> {
        self.items.get(&itemid).and_then(|i| i.fluid.as_deref())
    }

    /// Category tag of a raw identifier, e.g. "Chemistry". Microbiology
    /// tests carry none.
    pub fn category_of(&self, itemid: u32) -> Option<&str> {
        self.items.get(&itemid).and_then(|i| i.category.as_deref())
    }

    pub fn contains(&self, itemid: u32) -> bool {
        self.items.contains_key(&itemid)
    }

    /// Equivalence class of every raw identifier.
    pub fn classes(&self) -> BTreeMap<u32, Vec<u32>> {
        self.entries
            .iter()
            .filter_map(|e| e.itemid.map(|id| (id, e.ids.clone())))
            .collect()
    }

    /// How many times any known label longer than one character occurs as a
    /// whole word in `text`. Each distinct label is counted once per
    /// occurrence.
    pub fn count_label_mentions(&self, text: &str) -> usize {
        self.label_patterns
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum()
    }
}

/// Turns a raw [`LabItemTable`] plus the curated tables into a
/// [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    table: LabItemTable,
}

impl VocabularyBuilder {
    pub fn new(table: LabItemTable) -> Self {
        Self { table }
    }

    pub fn build(self) -> Result<Vocabulary, VocabError> {
        if self.table.items.is_empty() {
            return Err(VocabError::EmptyTable);
        }

        let mut entries = group_by_label(&self.table);
        apply_alterations(&mut entries);
        merge_synonym_pairs(&mut entries);
        entries.extend(curated_entries()?);
        let abbreviations = abbreviation_entries(&entries);
        entries.extend(abbreviations);
        let totals = total_entries(&entries);
        entries.extend(totals);
        close_identifier_rows(&mut entries);
        dedupe(&mut entries);
        entries.extend(microbiology_entries(&self.table));

        let mut items = HashMap::new();
        for entry in &entries {
            if let Some(id) = entry.itemid {
                items.entry(id).or_insert_with(|| ItemInfo {
                    label: entry.label.clone(),
                    fluid: entry.fluid.clone(),
                    category: None,
                });
            }
        }
        for item in &self.table.items {
            if let Some(info) = items.get_mut(&item.itemid) {
                info.category.clone_from(&item.category);
            }
        }

        let mut seen = HashSet::new();
        let mut label_patterns = Vec::new();
        for entry in &entries {
            if entry.label.chars().count() > 1 && seen.insert(entry.label.as_str()) {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&entry.label));
                label_patterns.push(Regex::new(&pattern)?);
            }
        }

        tracing::info!(
            entries = entries.len(),
            items = items.len(),
            labels = label_patterns.len(),
            "built lab vocabulary"
        );

        Ok(Vocabulary {
            entries,
            items,
            label_patterns,
        })
    }
}

fn group_by_label(table: &LabItemTable) -> Vec<VocabEntry> {
    let mut by_label: HashMap<&str, Vec<u32>> = HashMap::new();
    for item in &table.items {
        by_label.entry(&item.label).or_default().push(item.itemid);
    }
    table
        .items
        .iter()
        .map(|item| VocabEntry {
            itemid: Some(item.itemid),
            label: item.label.clone(),
            fluid: item.fluid.clone(),
            ids: by_label.get(item.label.as_str()).cloned().unwrap_or_default(),
        })
        .collect()
}

fn apply_alterations(entries: &mut [VocabEntry]) {
    for entry in entries.iter_mut() {
        if let Some((_, altered)) = LAB_TEST_MAPPING_ALTERATIONS
            .iter()
            .find(|(raw, _)| *raw == entry.label)
        {
            entry.label = (*altered).to_string();
        }
    }
}

fn merge_synonym_pairs(entries: &mut [VocabEntry]) {
    for &(a, b) in LAB_TEST_MAPPING_SYNONYMS {
        let ids_of = |id: u32| {
            entries
                .iter()
                .find(|e| e.itemid == Some(id))
                .map(|e| e.ids.clone())
        };
        let (Some(ids_a), Some(ids_b)) = (ids_of(a), ids_of(b)) else {
            tracing::warn!(a, b, "skipping synonym pair with unknown identifier");
            continue;
        };
        let merged: Vec<u32> = ids_a
            .into_iter()
            .chain(ids_b)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for entry in entries.iter_mut() {
            if entry.itemid == Some(a) || entry.itemid == Some(b) {
                entry.ids = merged.clone();
            }
        }
    }
}

fn curated_entries() -> Result<Vec<VocabEntry>, VocabError> {
    let mut rows: Vec<VocabEntry> = ADDITIONAL_LAB_TEST_MAPPING
        .iter()
        .map(|(label, ids)| VocabEntry::label_only(*label, ids.to_vec(), None))
        .collect();
    for &(synonym, canonical) in ADDITIONAL_LAB_TEST_MAPPING_SYNONYMS {
        let ids = additional_mapping(canonical).ok_or_else(|| VocabError::UnknownCuratedLabel {
            synonym: synonym.to_string(),
            label: canonical.to_string(),
        })?;
        rows.push(VocabEntry::label_only(synonym, ids.to_vec(), None));
    }
    Ok(rows)
}

/// "Long Name (SHORT)" also answers to "SHORT" and to "Long Name". All short
/// forms come before all long forms.
fn abbreviation_entries(entries: &[VocabEntry]) -> Vec<VocabEntry> {
    let split: Vec<(String, String, &VocabEntry)> = entries
        .iter()
        .filter_map(|e| {
            let (short, long) = extract_short_and_long_name(&e.label);
            (short != long).then_some((short, long, e))
        })
        .collect();

    let shorts = split
        .iter()
        .map(|(short, _, e)| VocabEntry::label_only(short.clone(), e.ids.clone(), e.fluid.clone()));
    let longs = split
        .iter()
        .map(|(_, long, e)| VocabEntry::label_only(long.clone(), e.ids.clone(), e.fluid.clone()));
    shorts.chain(longs).collect()
}

/// "Bilirubin, Total" also answers to "Total Bilirubin".
fn total_entries(entries: &[VocabEntry]) -> Vec<VocabEntry> {
    entries
        .iter()
        .filter_map(|e| {
            let id = e.itemid?;
            if !e.label.contains("Total") || e.label.starts_with("Total") {
                return None;
            }
            let base = e.label.replace(", Total", "").replace(" Total", "");
            Some(VocabEntry::label_only(format!("Total {base}"), vec![id], None))
        })
        .collect()
}

/// Close identifier synonymy into connected components.
///
/// Each key's set is read as undirected edges from the key to its members.
/// The result maps every node (keys and members alike) to its full
/// component, itself included. Applying it to its own output changes
/// nothing.
pub fn close_equivalence_classes(
    classes: &BTreeMap<u32, BTreeSet<u32>>,
) -> BTreeMap<u32, BTreeSet<u32>> {
    let mut adjacency: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    for (&node, members) in classes {
        adjacency.entry(node).or_default();
        for &member in members {
            adjacency.entry(node).or_default().insert(member);
            adjacency.entry(member).or_default().insert(node);
        }
    }

    let mut closed: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    for &start in adjacency.keys() {
        if closed.contains_key(&start) {
            continue;
        }
        let mut component = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for &next in adjacency.get(&current).into_iter().flatten() {
                if component.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        for &member in &component {
            closed.insert(member, component.clone());
        }
    }
    closed
}

fn close_identifier_rows(entries: &mut [VocabEntry]) {
    let classes: BTreeMap<u32, BTreeSet<u32>> = entries
        .iter()
        .filter_map(|e| e.itemid.map(|id| (id, e.ids.iter().copied().collect())))
        .collect();
    let closed = close_equivalence_classes(&classes);
    for entry in entries.iter_mut() {
        if let Some(class) = entry.itemid.and_then(|id| closed.get(&id)) {
            entry.ids = class.iter().copied().collect();
        }
    }
}

fn dedupe(entries: &mut Vec<VocabEntry>) {
    let mut seen: HashSet<(Option<u32>, String, Option<String>)> = HashSet::new();
    entries.retain(|e| seen.insert((e.itemid, e.label.clone(), e.fluid.clone())));
}

fn microbiology_entries(table: &LabItemTable) -> Vec<VocabEntry> {
    let mut by_label: HashMap<&str, Vec<u32>> = HashMap::new();
    for test in &table.microbiology {
        by_label.entry(&test.label).or_default().push(test.itemid);
    }
    table
        .microbiology
        .iter()
        .map(|test| VocabEntry {
            itemid: Some(test.itemid),
            label: test.label.clone(),
            fluid: None,
            ids: by_label.get(test.label.as_str()).cloned().unwrap_or_default(),
        })
        .collect()
}
