//! Immutable question registry.
//!
//! Built once at startup from the full question catalog, then shared
//! read-only into every evaluation call. All group lookups the detectors
//! need are pre-indexed here; nothing mutates after `build`.

use crate::errors::RegistryError;
use crate::types::collections::FxHashMap;
use crate::types::{GateProbe, QuestionDefinition, Role};

/// Read-only lookup tables over the question catalog.
#[derive(Debug)]
pub struct QuestionRegistry {
    questions: Vec<QuestionDefinition>,
    by_id: FxHashMap<String, usize>,
    by_role: FxHashMap<Role, Vec<usize>>,
    reverse_pairs: FxHashMap<String, Vec<usize>>,
    triad_groups: FxHashMap<String, Vec<usize>>,
    contradiction_groups: FxHashMap<String, Vec<usize>>,
    confidence_pairs: FxHashMap<String, Vec<usize>>,
    ownership_groups: FxHashMap<String, Vec<usize>>,
    trade_off_groups: FxHashMap<String, Vec<usize>>,
    time_pairs: FxHashMap<String, Vec<usize>>,
    gate_probes: FxHashMap<GateProbe, Vec<usize>>,
}

impl QuestionRegistry {
    /// Build the registry, indexing every group tag.
    ///
    /// Rejects duplicate ids and part tags without their group tag
    /// (e.g. `triad_part` without `triad_group`) — both are catalog
    /// authoring mistakes that would silently disable detectors.
    pub fn build(questions: Vec<QuestionDefinition>) -> Result<Self, RegistryError> {
        let mut by_id = FxHashMap::default();
        let mut by_role: FxHashMap<Role, Vec<usize>> = FxHashMap::default();
        let mut reverse_pairs: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut triad_groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut contradiction_groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut confidence_pairs: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut ownership_groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut trade_off_groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut time_pairs: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut gate_probes: FxHashMap<GateProbe, Vec<usize>> = FxHashMap::default();

        for (idx, q) in questions.iter().enumerate() {
            if by_id.insert(q.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateQuestionId(q.id.clone()));
            }
            by_role.entry(q.role).or_default().push(idx);

            if q.triad_part.is_some() && q.triad_group.is_none() {
                return Err(RegistryError::DanglingGroupTag {
                    id: q.id.clone(),
                    part: "triad_part",
                    group: "triad_group",
                });
            }
            if q.confidence_part.is_some() && q.confidence_pair_id.is_none() {
                return Err(RegistryError::DanglingGroupTag {
                    id: q.id.clone(),
                    part: "confidence_part",
                    group: "confidence_pair_id",
                });
            }
            if q.trade_off_side.is_some() && q.trade_off_group.is_none() {
                return Err(RegistryError::DanglingGroupTag {
                    id: q.id.clone(),
                    part: "trade_off_side",
                    group: "trade_off_group",
                });
            }
            if q.time_phase.is_some() && q.time_pair_id.is_none() {
                return Err(RegistryError::DanglingGroupTag {
                    id: q.id.clone(),
                    part: "time_phase",
                    group: "time_pair_id",
                });
            }

            if let Some(key) = &q.reverse_pair_id {
                reverse_pairs.entry(key.clone()).or_default().push(idx);
            }
            if let Some(key) = &q.triad_group {
                triad_groups.entry(key.clone()).or_default().push(idx);
            }
            if let Some(key) = &q.contradiction_group {
                contradiction_groups.entry(key.clone()).or_default().push(idx);
            }
            if let Some(key) = &q.confidence_pair_id {
                confidence_pairs.entry(key.clone()).or_default().push(idx);
            }
            if let Some(key) = &q.ownership_group {
                ownership_groups.entry(key.clone()).or_default().push(idx);
            }
            if let Some(key) = &q.trade_off_group {
                trade_off_groups.entry(key.clone()).or_default().push(idx);
            }
            if let Some(key) = &q.time_pair_id {
                time_pairs.entry(key.clone()).or_default().push(idx);
            }
            if let Some(probe) = q.gate_probe {
                gate_probes.entry(probe).or_default().push(idx);
            }
        }

        tracing::debug!(questions = questions.len(), "question registry built");
        Ok(Self {
            questions,
            by_id,
            by_role,
            reverse_pairs,
            triad_groups,
            contradiction_groups,
            confidence_pairs,
            ownership_groups,
            trade_off_groups,
            time_pairs,
            gate_probes,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&QuestionDefinition> {
        self.by_id.get(id).map(|&idx| &self.questions[idx])
    }

    pub fn all(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn for_role(&self, role: Role) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.by_role.get(&role))
    }

    /// Group keys in sorted order, so callers iterate deterministically.
    fn sorted_keys(map: &FxHashMap<String, Vec<usize>>) -> Vec<&str> {
        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn reverse_pair_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.reverse_pairs)
    }

    pub fn reverse_pair(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.reverse_pairs.get(key))
    }

    pub fn triad_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.triad_groups)
    }

    pub fn triad(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.triad_groups.get(key))
    }

    pub fn contradiction_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.contradiction_groups)
    }

    pub fn contradiction_group(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.contradiction_groups.get(key))
    }

    pub fn confidence_pair_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.confidence_pairs)
    }

    pub fn confidence_pair(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.confidence_pairs.get(key))
    }

    pub fn ownership_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.ownership_groups)
    }

    pub fn ownership_group(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.ownership_groups.get(key))
    }

    pub fn trade_off_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.trade_off_groups)
    }

    pub fn trade_off_group(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.trade_off_groups.get(key))
    }

    pub fn time_pair_keys(&self) -> Vec<&str> {
        Self::sorted_keys(&self.time_pairs)
    }

    pub fn time_pair(&self, key: &str) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.time_pairs.get(key))
    }

    pub fn gate_probes(&self, probe: GateProbe) -> impl Iterator<Item = &QuestionDefinition> {
        self.indexed(self.gate_probes.get(&probe))
    }

    fn indexed<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a QuestionDefinition> {
        indices
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.questions[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimension, TriadPart};

    #[test]
    fn duplicate_id_is_rejected() {
        let questions = vec![
            QuestionDefinition::likert("q1", Role::Executive, Dimension::Risk),
            QuestionDefinition::likert("q1", Role::Finance, Dimension::Risk),
        ];
        let err = QuestionRegistry::build(questions).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateQuestionId(_)));
    }

    #[test]
    fn dangling_part_tag_is_rejected() {
        let question = QuestionDefinition {
            triad_part: Some(TriadPart::Claim),
            ..QuestionDefinition::likert("q1", Role::Executive, Dimension::Risk)
        };
        let err = QuestionRegistry::build(vec![question]).unwrap_err();
        assert!(matches!(err, RegistryError::DanglingGroupTag { .. }));
    }

    #[test]
    fn group_lookups_return_members() {
        let mut claim = QuestionDefinition::likert("q1", Role::Executive, Dimension::Risk);
        claim.triad_group = Some("t1".to_string());
        claim.triad_part = Some(TriadPart::Claim);
        let plain = QuestionDefinition::likert("q2", Role::Finance, Dimension::Risk);

        let registry = QuestionRegistry::build(vec![claim, plain]).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.triad_keys(), vec!["t1"]);
        assert_eq!(registry.triad("t1").count(), 1);
        assert_eq!(registry.triad("missing").count(), 0);
        assert!(registry.get("q2").is_some());
    }
}
