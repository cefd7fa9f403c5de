use super::bundle::{SignalState, SignalStates};
use super::domain::FitLevel;
use super::inputs::AxisInputs;
use super::thresholds::{
    DonorFitThresholds, EvidenceThresholds, FinancialHealthThresholds, RiskThresholds,
    ThresholdGroups,
};

pub fn classify_evidence(ratio: f64, thresholds: &EvidenceThresholds) -> SignalState {
    if ratio >= thresholds.strong_ratio {
        SignalState::Strong
    } else if ratio >= thresholds.moderate_ratio_min {
        SignalState::Moderate
    } else {
        SignalState::Limited
    }
}

/// Both ratios must clear `strong_min` for Strong; either one under `moderate_min` is Limited.
pub fn classify_financial_health(
    financial_ratio: f64,
    program_ratio: f64,
    thresholds: &FinancialHealthThresholds,
) -> SignalState {
    if financial_ratio >= thresholds.strong_min && program_ratio >= thresholds.strong_min {
        SignalState::Strong
    } else if financial_ratio < thresholds.moderate_min || program_ratio < thresholds.moderate_min
    {
        SignalState::Limited
    } else {
        SignalState::Moderate
    }
}

pub fn classify_donor_fit(
    level: FitLevel,
    alignment_score: f64,
    thresholds: &DonorFitThresholds,
) -> SignalState {
    if level == FitLevel::High && alignment_score >= thresholds.strong_alignment_min {
        SignalState::Strong
    } else if level == FitLevel::Moderate || alignment_score >= thresholds.moderate_alignment_min
    {
        SignalState::Moderate
    } else {
        SignalState::Limited
    }
}

/// `deduction` is the magnitude of points removed for risk; larger is worse.
pub fn classify_risk(deduction: f64, governance_ratio: f64, thresholds: &RiskThresholds) -> SignalState {
    if deduction == 0.0 && governance_ratio >= thresholds.governance_strong_min {
        SignalState::Strong
    } else if deduction >= thresholds.deduction_limited_min
        || governance_ratio < thresholds.governance_moderate_min
    {
        SignalState::Limited
    } else {
        SignalState::Moderate
    }
}

pub fn classify_signal_states(inputs: &AxisInputs, thresholds: &ThresholdGroups) -> SignalStates {
    SignalStates {
        evidence: classify_evidence(inputs.evidence_ratio, &thresholds.evidence),
        financial_health: classify_financial_health(
            inputs.financial_ratio,
            inputs.program_ratio,
            &thresholds.financial_health,
        ),
        donor_fit: classify_donor_fit(
            inputs.donor_fit_level,
            inputs.alignment_score,
            &thresholds.donor_fit,
        ),
        risk: classify_risk(
            inputs.risk_deduction,
            inputs.governance_ratio,
            &thresholds.risk,
        ),
    }
}
