//! Fitness-for-work check of a permit team.
//!
//! Every team member's readings are compared against the threshold table. A
//! member is fit when blood pressure, pulse, respiration rate, oxygen
//! saturation and temperature are all present and inside their ranges.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::aggregate::VitalsThreshold;
use crate::domain::a004_karyawan::aggregate::KaryawanId;
use crate::domain::a006_pengajuan::aggregate::AnggotaTim;
use crate::domain::common::lenient::parse_leading_number;

const NUMBER_WORDS: [&str; 12] = [
    "nol", "satu", "dua", "tiga", "empat", "lima", "enam", "tujuh", "delapan", "sembilan",
    "sepuluh", "sebelas",
];

/// Vital sign with a threshold row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalSign {
    Sistole,
    Diastole,
    Nadi,
    Rr,
    Spo2,
    Suhu,
}

impl VitalSign {
    pub const ALL: [VitalSign; 6] = [
        VitalSign::Sistole,
        VitalSign::Diastole,
        VitalSign::Nadi,
        VitalSign::Rr,
        VitalSign::Spo2,
        VitalSign::Suhu,
    ];

    /// Key of the threshold row
    pub fn key(&self) -> &'static str {
        match self {
            VitalSign::Sistole => "sistole",
            VitalSign::Diastole => "diastole",
            VitalSign::Nadi => "nadi",
            VitalSign::Rr => "rr",
            VitalSign::Spo2 => "spo2",
            VitalSign::Suhu => "suhu",
        }
    }

    /// Threshold key lookup; `sao2` (the name of the form column) is
    /// accepted for oxygen saturation.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        if key == "sao2" {
            return Some(VitalSign::Spo2);
        }
        Self::ALL.into_iter().find(|v| v.key() == key)
    }
}

/// Ranges by vital sign; a vital without a row is unbounded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdTable {
    ranges: HashMap<VitalSign, (f64, f64)>,
}

impl ThresholdTable {
    /// Rows with unknown keys are ignored; the first row of a key wins.
    pub fn from_thresholds(rows: &[VitalsThreshold]) -> Self {
        let mut ranges = HashMap::new();
        for row in rows {
            if let Some(vital) = VitalSign::from_key(&row.key) {
                ranges.entry(vital).or_insert((row.min, row.max));
            }
        }
        Self { ranges }
    }

    pub fn range(&self, vital: VitalSign) -> Option<(f64, f64)> {
        self.ranges.get(&vital).copied()
    }

    fn out_of_range(&self, vital: VitalSign, value: f64) -> Option<VitalIssue> {
        let (min, max) = self.range(vital)?;
        if value >= min && value <= max {
            None
        } else {
            Some(VitalIssue::OutOfRange { value, min, max })
        }
    }
}

/// Why a reading fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VitalIssue {
    /// Nothing was entered
    Missing,
    /// Blood pressure without the `/` separator
    Malformed,
    /// No number could be read
    Unparsable { raw: String },
    OutOfRange { value: f64, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalFinding {
    pub vital: VitalSign,
    pub issue: VitalIssue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEvaluation {
    pub karyawan_id: Option<KaryawanId>,
    pub nama: String,
    pub fit: bool,
    /// Failing vitals; empty when fit
    pub findings: Vec<VitalFinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEvaluation {
    pub members: Vec<MemberEvaluation>,
    pub fit_count: usize,
    pub total: usize,
    /// "Fit bekerja ..." summary; absent when nobody is fit
    pub statement: Option<String>,
}

pub fn evaluate_member(row: &AnggotaTim, table: &ThresholdTable) -> MemberEvaluation {
    let mut findings = Vec::new();

    check_blood_pressure(&row.td, table, &mut findings);
    check_reading(VitalSign::Nadi, &row.nadi, table, &mut findings);
    check_reading(VitalSign::Rr, &row.rr, table, &mut findings);
    check_reading(VitalSign::Spo2, &row.sao2, table, &mut findings);
    check_reading(VitalSign::Suhu, &row.suhu, table, &mut findings);

    MemberEvaluation {
        karyawan_id: row.karyawan_id,
        nama: row.nama.clone(),
        fit: findings.is_empty(),
        findings,
    }
}

pub fn evaluate_team(rows: &[AnggotaTim], table: &ThresholdTable) -> TeamEvaluation {
    let members: Vec<_> = rows.iter().map(|r| evaluate_member(r, table)).collect();
    let fit_count = members.iter().filter(|m| m.fit).count();
    TeamEvaluation {
        total: members.len(),
        fit_count,
        statement: fitness_statement(fit_count),
        members,
    }
}

/// Both halves of "systole/diastole" must be numbers, bounded or not.
fn check_blood_pressure(td: &str, table: &ThresholdTable, findings: &mut Vec<VitalFinding>) {
    let td = td.trim();
    if td.is_empty() {
        findings.push(finding(VitalSign::Sistole, VitalIssue::Missing));
        return;
    }
    let Some((sistole, diastole)) = td.split_once('/') else {
        findings.push(finding(VitalSign::Sistole, VitalIssue::Malformed));
        return;
    };
    for (vital, raw) in [(VitalSign::Sistole, sistole), (VitalSign::Diastole, diastole)] {
        match parse_leading_number(raw) {
            None => findings.push(finding(
                vital,
                VitalIssue::Unparsable {
                    raw: raw.trim().to_string(),
                },
            )),
            Some(value) => {
                if let Some(issue) = table.out_of_range(vital, value) {
                    findings.push(finding(vital, issue));
                }
            }
        }
    }
}

/// The reading must be present; it is only parsed when the vital is bounded.
fn check_reading(
    vital: VitalSign,
    raw: &str,
    table: &ThresholdTable,
    findings: &mut Vec<VitalFinding>,
) {
    let raw = raw.trim();
    if raw.is_empty() {
        findings.push(finding(vital, VitalIssue::Missing));
        return;
    }
    if table.range(vital).is_none() {
        return;
    }
    match parse_leading_number(raw) {
        None => findings.push(finding(
            vital,
            VitalIssue::Unparsable {
                raw: raw.to_string(),
            },
        )),
        Some(value) => {
            if let Some(issue) = table.out_of_range(vital, value) {
                findings.push(finding(vital, issue));
            }
        }
    }
}

fn finding(vital: VitalSign, issue: VitalIssue) -> VitalFinding {
    VitalFinding { vital, issue }
}

/// Indonesian word for 0..=11, digits above
pub fn number_to_word(n: usize) -> String {
    NUMBER_WORDS
        .get(n)
        .map(|w| w.to_string())
        .unwrap_or_else(|| n.to_string())
}

/// "Fit bekerja dua (2) karyawan"; `None` when nobody is fit
pub fn fitness_statement(fit_count: usize) -> Option<String> {
    if fit_count == 0 {
        return None;
    }
    Some(format!(
        "Fit bekerja {} ({}) karyawan",
        number_to_word(fit_count),
        fit_count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a007_vitals_threshold::aggregate::default_thresholds;

    fn table() -> ThresholdTable {
        ThresholdTable::from_thresholds(&default_thresholds())
    }

    fn row(td: &str, nadi: &str, rr: &str, sao2: &str, suhu: &str) -> AnggotaTim {
        AnggotaTim {
            nama: "Budi".into(),
            td: td.into(),
            nadi: nadi.into(),
            rr: rr.into(),
            sao2: sao2.into(),
            suhu: suhu.into(),
            ..Default::default()
        }
    }

    fn healthy() -> AnggotaTim {
        row("110/70", "72", "16", "98", "36.6")
    }

    fn failing(row: &AnggotaTim, table: &ThresholdTable) -> Vec<VitalSign> {
        evaluate_member(row, table)
            .findings
            .into_iter()
            .map(|f| f.vital)
            .collect()
    }

    #[test]
    fn healthy_member_is_fit() {
        let eval = evaluate_member(&healthy(), &table());
        assert!(eval.fit);
        assert!(eval.findings.is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let edge = row("120/80", "100", "12", "95", "37.2");
        assert!(evaluate_member(&edge, &table()).fit);
        let low_edge = row("90/60", "60", "20", "100", "36.1");
        assert!(evaluate_member(&low_edge, &table()).fit);
    }

    #[test]
    fn each_vital_out_of_range_makes_member_unfit() {
        let t = table();
        let cases = [
            (row("130/70", "72", "16", "98", "36.6"), VitalSign::Sistole),
            (row("110/90", "72", "16", "98", "36.6"), VitalSign::Diastole),
            (row("110/70", "120", "16", "98", "36.6"), VitalSign::Nadi),
            (row("110/70", "72", "25", "98", "36.6"), VitalSign::Rr),
            (row("110/70", "72", "16", "90", "36.6"), VitalSign::Spo2),
            (row("110/70", "72", "16", "98", "38.5"), VitalSign::Suhu),
        ];
        for (member, vital) in cases {
            assert_eq!(failing(&member, &t), vec![vital]);
        }
    }

    #[test]
    fn out_of_range_reports_value_and_bounds() {
        let eval = evaluate_member(&row("110/70", "120", "16", "98", "36.6"), &table());
        assert_eq!(
            eval.findings[0].issue,
            VitalIssue::OutOfRange {
                value: 120.0,
                min: 60.0,
                max: 100.0
            }
        );
    }

    #[test]
    fn empty_readings_are_missing() {
        let eval = evaluate_member(&row("", "", "", "", ""), &table());
        assert!(!eval.fit);
        assert_eq!(eval.findings.len(), 5);
        assert!(eval.findings.iter().all(|f| f.issue == VitalIssue::Missing));
    }

    #[test]
    fn blood_pressure_needs_both_halves() {
        let t = table();
        let no_slash = evaluate_member(&row("120", "72", "16", "98", "36.6"), &t);
        assert_eq!(no_slash.findings[0].issue, VitalIssue::Malformed);

        let no_diastole = evaluate_member(&row("110/", "72", "16", "98", "36.6"), &t);
        assert_eq!(no_diastole.findings[0].vital, VitalSign::Diastole);
        assert!(matches!(no_diastole.findings[0].issue, VitalIssue::Unparsable { .. }));

        let extra_part = evaluate_member(&row("110/70/65", "72", "16", "98", "36.6"), &t);
        assert!(extra_part.fit);
    }

    #[test]
    fn readings_are_parsed_leniently() {
        let sloppy = row(" 110 / 70 ", "72 bpm", "16x", "98%", "36.6 C");
        assert!(evaluate_member(&sloppy, &table()).fit);
    }

    #[test]
    fn decimal_comma_ends_the_reading() {
        assert!(evaluate_member(&row("110/70", "72", "16", "98", "37,5"), &table()).fit);

        let eval = evaluate_member(&row("110/70", "72", "16", "98", "36,6"), &table());
        assert_eq!(
            eval.findings,
            vec![VitalFinding {
                vital: VitalSign::Suhu,
                issue: VitalIssue::OutOfRange {
                    value: 36.0,
                    min: 36.1,
                    max: 37.2
                }
            }]
        );
    }

    #[test]
    fn unparsable_bounded_reading_is_unfit() {
        let eval = evaluate_member(&row("110/70", "abc", "16", "98", "36.6"), &table());
        assert_eq!(
            eval.findings,
            vec![VitalFinding {
                vital: VitalSign::Nadi,
                issue: VitalIssue::Unparsable { raw: "abc".into() }
            }]
        );
    }

    #[test]
    fn vital_without_threshold_only_needs_a_value() {
        let without_nadi: Vec<_> = default_thresholds()
            .into_iter()
            .filter(|t| t.key != "nadi")
            .collect();
        let t = ThresholdTable::from_thresholds(&without_nadi);
        assert!(evaluate_member(&row("110/70", "999", "16", "98", "36.6"), &t).fit);
        assert!(evaluate_member(&row("110/70", "n/a", "16", "98", "36.6"), &t).fit);
        assert!(!evaluate_member(&row("110/70", "", "16", "98", "36.6"), &t).fit);
    }

    #[test]
    fn blood_pressure_must_parse_even_without_threshold() {
        let t = ThresholdTable::default();
        assert!(evaluate_member(&row("250/10", "1", "1", "1", "1"), &t).fit);
        assert!(!evaluate_member(&row("x/y", "1", "1", "1", "1"), &t).fit);
    }

    #[test]
    fn sao2_key_is_accepted_for_oxygen_saturation() {
        assert_eq!(VitalSign::from_key("sao2"), Some(VitalSign::Spo2));
        assert_eq!(VitalSign::from_key(" SpO2 "), Some(VitalSign::Spo2));
        assert_eq!(VitalSign::from_key("gula"), None);
    }

    #[test]
    fn team_statement_counts_fit_members() {
        let t = table();
        let team = vec![healthy(), healthy(), row("150/100", "72", "16", "98", "36.6")];
        let eval = evaluate_team(&team, &t);
        assert_eq!(eval.total, 3);
        assert_eq!(eval.fit_count, 2);
        assert_eq!(eval.statement.as_deref(), Some("Fit bekerja dua (2) karyawan"));
        assert!(!eval.members[2].fit);
    }

    #[test]
    fn nobody_fit_means_no_statement() {
        let eval = evaluate_team(&[row("", "", "", "", "")], &table());
        assert_eq!(eval.fit_count, 0);
        assert_eq!(eval.statement, None);
        assert_eq!(evaluate_team(&[], &table()).statement, None);
    }

    #[test]
    fn counts_are_spelled_up_to_eleven() {
        assert_eq!(number_to_word(0), "nol");
        assert_eq!(number_to_word(1), "satu");
        assert_eq!(number_to_word(11), "sebelas");
        assert_eq!(number_to_word(12), "12");
        assert_eq!(
            fitness_statement(12).as_deref(),
            Some("Fit bekerja 12 (12) karyawan")
        );
    }

    #[test]
    fn evaluation_serializes_for_clients() {
        let eval = evaluate_team(&[row("110/70", "", "16", "98", "36.6")], &table());
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["fitCount"], 0);
        assert_eq!(json["members"][0]["findings"][0]["vital"], "nadi");
        assert_eq!(json["members"][0]["findings"][0]["issue"]["kind"], "missing");
    }
}
