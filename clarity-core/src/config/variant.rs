//! Assessment variants — active roles, weights, and scope of computation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::ConfigError;
use crate::types::{Dimension, Role};

use super::thresholds::ScoringThresholds;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One named assessment configuration.
///
/// Weight maps use `BTreeMap` so serialization order is stable and weighted
/// sums iterate in a fixed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    /// Roles whose answers participate in scoring.
    pub active_roles: Vec<Role>,
    /// Per-role weights over `active_roles`. Must sum to 1.0.
    pub role_weights: BTreeMap<String, f64>,
    /// Whether the clarity index is computed. `false` = gate-only mode.
    #[serde(default = "default_true")]
    pub computes_index: bool,
    /// Whether the gate-only process dimension is scored and G2 evaluated.
    #[serde(default)]
    pub process_dimension_active: bool,
    /// Index weights over the five index dimensions. Must sum to 1.0.
    /// The gate-only dimension never appears here.
    #[serde(default = "default_index_weights")]
    pub index_weights: BTreeMap<String, f64>,
}

fn default_true() -> bool {
    true
}

/// The compiled default index weights.
fn default_index_weights() -> BTreeMap<String, f64> {
    let mut weights = BTreeMap::new();
    weights.insert(Dimension::StrategicIntent.name().to_string(), 0.20);
    weights.insert(Dimension::ValueEconomics.name().to_string(), 0.25);
    weights.insert(Dimension::Readiness.name().to_string(), 0.20);
    weights.insert(Dimension::Risk.name().to_string(), 0.20);
    weights.insert(Dimension::Governance.name().to_string(), 0.15);
    weights
}

impl VariantConfig {
    /// Full five-role diagnostic: index plus process dimension.
    pub fn full_diagnostic() -> Self {
        let mut role_weights = BTreeMap::new();
        role_weights.insert(Role::Executive.name().to_string(), 0.25);
        role_weights.insert(Role::Finance.name().to_string(), 0.20);
        role_weights.insert(Role::Operations.name().to_string(), 0.25);
        role_weights.insert(Role::Technology.name().to_string(), 0.20);
        role_weights.insert(Role::EndUser.name().to_string(), 0.10);
        Self {
            name: "full_diagnostic".to_string(),
            active_roles: Role::ALL.to_vec(),
            role_weights,
            computes_index: true,
            process_dimension_active: true,
            index_weights: default_index_weights(),
        }
    }

    /// Three-role leadership assessment: index only, no process dimension.
    pub fn executive_alignment() -> Self {
        let mut role_weights = BTreeMap::new();
        role_weights.insert(Role::Executive.name().to_string(), 0.40);
        role_weights.insert(Role::Finance.name().to_string(), 0.30);
        role_weights.insert(Role::Operations.name().to_string(), 0.30);
        Self {
            name: "executive_alignment".to_string(),
            active_roles: vec![Role::Executive, Role::Finance, Role::Operations],
            role_weights,
            computes_index: true,
            process_dimension_active: false,
            index_weights: default_index_weights(),
        }
    }

    /// Gate-only process baseline: no index, recommendation not applicable.
    pub fn process_baseline() -> Self {
        let mut role_weights = BTreeMap::new();
        role_weights.insert(Role::Operations.name().to_string(), 0.60);
        role_weights.insert(Role::Technology.name().to_string(), 0.40);
        Self {
            name: "process_baseline".to_string(),
            active_roles: vec![Role::Operations, Role::Technology],
            role_weights,
            computes_index: false,
            process_dimension_active: true,
            index_weights: default_index_weights(),
        }
    }

    /// The weight for a role, or 0.0 when the role carries no weight.
    pub fn role_weight(&self, role: Role) -> f64 {
        self.role_weights.get(role.name()).copied().unwrap_or(0.0)
    }

    /// The index weight for a dimension. Gate-only dimension is always 0.
    pub fn index_weight(&self, dimension: Dimension) -> f64 {
        if !dimension.in_index() {
            return 0.0;
        }
        self.index_weights
            .get(dimension.name())
            .copied()
            .unwrap_or(0.0)
    }

    /// Validate weight sums and dimension scope. Fatal on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let active_names: Vec<&str> = self.active_roles.iter().map(|r| r.name()).collect();

        for key in self.role_weights.keys() {
            if !active_names.contains(&key.as_str()) {
                return Err(ConfigError::WeightForInactiveRole {
                    variant: self.name.clone(),
                    role: key.clone(),
                });
            }
        }

        let role_sum: f64 = self.role_weights.values().sum();
        if (role_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::RoleWeightSum {
                variant: self.name.clone(),
                sum: role_sum,
            });
        }

        if let Some(weight) = self.index_weights.get(Dimension::ProcessReadiness.name()) {
            if *weight != 0.0 {
                return Err(ConfigError::GateOnlyDimensionWeighted {
                    variant: self.name.clone(),
                    weight: *weight,
                });
            }
        }

        let index_sum: f64 = Dimension::INDEX
            .iter()
            .map(|d| self.index_weight(*d))
            .sum();
        if (index_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::IndexWeightSum {
                variant: self.name.clone(),
                sum: index_sum,
            });
        }

        // A gate-only variant has nothing to assess without the process axis.
        if !self.computes_index && !self.process_dimension_active {
            return Err(ConfigError::ProcessGateWithoutDimension {
                variant: self.name.clone(),
            });
        }

        Ok(())
    }
}

/// Top-level engine configuration: thresholds plus the variant catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: ScoringThresholds,
    pub variants: Vec<VariantConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: ScoringThresholds::default(),
            variants: vec![
                VariantConfig::full_diagnostic(),
                VariantConfig::executive_alignment(),
                VariantConfig::process_baseline(),
            ],
        }
    }
}

impl EngineConfig {
    /// Load from a TOML string and validate. Any error is fatal.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate thresholds and every variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        for variant in &self.variants {
            variant.validate()?;
        }
        Ok(())
    }

    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Option<&VariantConfig> {
        self.variants.iter().find(|v| v.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_variants_validate() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn index_weights_sum_to_one_for_every_builtin_variant() {
        for variant in EngineConfig::default().variants {
            let sum: f64 = Dimension::INDEX.iter().map(|d| variant.index_weight(*d)).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{}: {}", variant.name, sum);
        }
    }

    #[test]
    fn gate_only_dimension_has_zero_index_weight() {
        for variant in EngineConfig::default().variants {
            assert_eq!(variant.index_weight(Dimension::ProcessReadiness), 0.0);
        }
    }

    #[test]
    fn bad_role_weight_sum_is_rejected() {
        let mut variant = VariantConfig::executive_alignment();
        variant
            .role_weights
            .insert(Role::Executive.name().to_string(), 0.90);
        let err = variant.validate().unwrap_err();
        assert!(matches!(err, ConfigError::RoleWeightSum { .. }));
    }

    #[test]
    fn weight_for_inactive_role_is_rejected() {
        let mut variant = VariantConfig::executive_alignment();
        variant
            .role_weights
            .insert(Role::EndUser.name().to_string(), 0.0);
        let err = variant.validate().unwrap_err();
        assert!(matches!(err, ConfigError::WeightForInactiveRole { .. }));
    }

    #[test]
    fn weighted_gate_only_dimension_is_rejected() {
        let mut variant = VariantConfig::full_diagnostic();
        variant
            .index_weights
            .insert(Dimension::ProcessReadiness.name().to_string(), 0.10);
        let err = variant.validate().unwrap_err();
        assert!(matches!(err, ConfigError::GateOnlyDimensionWeighted { .. }));
    }

    #[test]
    fn gate_only_variant_without_process_dimension_is_rejected() {
        let mut variant = VariantConfig::process_baseline();
        variant.process_dimension_active = false;
        let err = variant.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ProcessGateWithoutDimension { .. }));
    }

    #[test]
    fn toml_round_trip_validates() {
        let toml_str = toml::to_string(&EngineConfig::default()).unwrap();
        let config = EngineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config.variants.len(), 3);
        assert!(config.variant("full_diagnostic").is_some());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml("thresholds = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
