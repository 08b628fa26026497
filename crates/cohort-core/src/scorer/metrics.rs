//! Shared per-constraint measurements.
//!
//! The penalty model and the satisfaction checker apply different thresholds
//! to the same underlying quantities, so both are built on the censuses in
//! this module. Everything here is pure and never fails: group members that
//! resolve to no element, and elements carrying no value, simply drop out.

use std::collections::HashMap;

use crate::model::{Attribute, Element, Group};

pub fn find_attribute<'a>(attributes: &'a [Attribute], id: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.id == id)
}

fn element_index(elements: &[Element]) -> HashMap<&str, &Element> {
    elements.iter().map(|e| (e.id.as_str(), e)).collect()
}

/// Distinct grouping keys in first-seen element order.
pub(crate) fn observed_values(elements: &[Element], attribute_id: &str) -> Vec<String> {
    let mut values = Vec::new();
    for element in elements {
        if let Some(key) = element.grouping_key(attribute_id) {
            if !values.contains(&key) {
                values.push(key);
            }
        }
    }
    values
}

pub(crate) fn carrier_count(elements: &[Element], attribute_id: &str) -> usize {
    elements
        .iter()
        .filter(|e| e.grouping_key(attribute_id).is_some())
        .count()
}

/// Grouping keys of one group's members, in member order.
fn group_keys(group: &Group, index: &HashMap<&str, &Element>, attribute_id: &str) -> Vec<String> {
    group
        .members
        .iter()
        .filter_map(|id| {
            index
                .get(id.as_str())
                .and_then(|e| e.grouping_key(attribute_id))
        })
        .collect()
}

fn distinct_in_order(keys: &[String]) -> Vec<String> {
    let mut distinct = Vec::new();
    for key in keys {
        if !distinct.contains(key) {
            distinct.push(key.clone());
        }
    }
    distinct
}

/// Most frequent key; ties break to the earliest first occurrence.
fn majority_value(keys: &[String]) -> Option<String> {
    let mut best: Option<String> = None;
    let mut best_count = 0;
    for value in distinct_in_order(keys) {
        let count = keys.iter().filter(|k| **k == value).count();
        if count > best_count {
            best_count = count;
            best = Some(value);
        }
    }
    best
}

#[derive(Debug, Clone)]
pub struct ValueDivergence {
    pub value: String,
    pub actual: f64,
}

/// Per-value spread of an enum attribute across groups: maximum deviation
/// from the mean per-group count, normalized by that mean. Values whose
/// mean count is zero are skipped.
pub fn enum_count_divergences(
    groups: &[Group],
    elements: &[Element],
    attribute_id: &str,
) -> Vec<ValueDivergence> {
    let mut out = Vec::new();
    if groups.is_empty() {
        return out;
    }
    let index = element_index(elements);
    for value in observed_values(elements, attribute_id) {
        let counts: Vec<f64> = groups
            .iter()
            .map(|g| {
                group_keys(g, &index, attribute_id)
                    .iter()
                    .filter(|k| **k == value)
                    .count() as f64
            })
            .collect();
        let mean = counts.iter().sum::<f64>() / groups.len() as f64;
        if mean == 0.0 {
            continue;
        }
        let max_deviation = counts.iter().map(|c| (c - mean).abs()).fold(0.0, f64::max);
        out.push(ValueDivergence {
            value,
            actual: max_deviation / mean,
        });
    }
    out
}

#[derive(Debug, Clone)]
pub struct MixedGroup {
    pub group_index: usize,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExcludeCensus {
    /// Elements anywhere carrying the attribute.
    pub carrier_count: usize,
    /// Minority-value members of mixed groups.
    pub intruder_count: usize,
    pub mixed_groups: Vec<MixedGroup>,
}

/// Census for exclude-mode constraints. An intruder is a member whose value
/// differs from its group's majority value, counted only in groups that mix
/// at least two distinct values.
pub fn exclude_census(groups: &[Group], elements: &[Element], attribute_id: &str) -> ExcludeCensus {
    let index = element_index(elements);
    let mut census = ExcludeCensus {
        carrier_count: carrier_count(elements, attribute_id),
        ..Default::default()
    };
    for (group_index, group) in groups.iter().enumerate() {
        let keys = group_keys(group, &index, attribute_id);
        let distinct = distinct_in_order(&keys);
        if distinct.len() < 2 {
            continue;
        }
        if let Some(majority) = majority_value(&keys) {
            census.intruder_count += keys.iter().filter(|k| **k != majority).count();
        }
        census.mixed_groups.push(MixedGroup {
            group_index,
            values: distinct,
        });
    }
    census
}

#[derive(Debug, Clone)]
pub struct SplitValue {
    pub value: String,
    /// Groups holding the value.
    pub span: usize,
    /// Carriers outside the best-represented group.
    pub intruders: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SpreadCensus {
    pub carrier_count: usize,
    pub intruder_count: usize,
    pub split_values: Vec<SplitValue>,
}

/// Census for attractive constraints: values whose carriers span more than
/// one group.
pub fn spread_census(groups: &[Group], elements: &[Element], attribute_id: &str) -> SpreadCensus {
    let index = element_index(elements);
    let mut census = SpreadCensus {
        carrier_count: carrier_count(elements, attribute_id),
        ..Default::default()
    };
    for value in observed_values(elements, attribute_id) {
        let counts: Vec<usize> = groups
            .iter()
            .map(|g| {
                group_keys(g, &index, attribute_id)
                    .iter()
                    .filter(|k| **k == value)
                    .count()
            })
            .collect();
        let span = counts.iter().filter(|&&c| c > 0).count();
        if span < 2 {
            continue;
        }
        let placed: usize = counts.iter().sum();
        let majority = counts.iter().copied().max().unwrap_or(0);
        let intruders = placed - majority;
        census.intruder_count += intruders;
        census.split_values.push(SplitValue {
            value,
            span,
            intruders,
        });
    }
    census
}

#[derive(Debug, Clone)]
pub struct Clash {
    pub group_index: usize,
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DuplicateCensus {
    pub carrier_count: usize,
    pub intruder_count: usize,
    pub clashes: Vec<Clash>,
}

/// Census for repulsive constraints: every repeat of a value inside one
/// group beyond the first is an intruder.
pub fn duplicate_census(
    groups: &[Group],
    elements: &[Element],
    attribute_id: &str,
) -> DuplicateCensus {
    let index = element_index(elements);
    let mut census = DuplicateCensus {
        carrier_count: carrier_count(elements, attribute_id),
        ..Default::default()
    };
    for (group_index, group) in groups.iter().enumerate() {
        let keys = group_keys(group, &index, attribute_id);
        for value in distinct_in_order(&keys) {
            let count = keys.iter().filter(|k| **k == value).count();
            if count > 1 {
                census.intruder_count += count - 1;
                census.clashes.push(Clash {
                    group_index,
                    value,
                    count,
                });
            }
        }
    }
    census
}

/// Divergence of per-group averages from their common mean. `None` when
/// there is no signal: no groups, or a zero overall mean.
pub fn average_divergence(
    groups: &[Group],
    elements: &[Element],
    attribute_id: &str,
) -> Option<f64> {
    if groups.is_empty() {
        return None;
    }
    let index = element_index(elements);
    let means: Vec<f64> = groups
        .iter()
        .map(|group| {
            let values: Vec<f64> = group
                .members
                .iter()
                .filter_map(|id| index.get(id.as_str()).and_then(|e| e.number(attribute_id)))
                .collect();
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        })
        .collect();
    let overall = means.iter().sum::<f64>() / means.len() as f64;
    if overall == 0.0 {
        return None;
    }
    let max_deviation = means.iter().map(|m| (m - overall).abs()).fold(0.0, f64::max);
    Some(max_deviation / overall.abs())
}

/// Spread of group sizes around the ideal even split.
pub fn size_divergence(groups: &[Group], element_count: usize) -> Option<f64> {
    if groups.is_empty() || element_count == 0 {
        return None;
    }
    let ideal = element_count as f64 / groups.len() as f64;
    let max_deviation = groups
        .iter()
        .map(|g| (g.members.len() as f64 - ideal).abs())
        .fold(0.0, f64::max);
    Some(max_deviation / ideal)
}
