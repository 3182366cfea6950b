//! Document checklist completion tracking.
//!
//! Every enrollment carries the same fixed checklist of 11 paperwork flags.
//! Seven are mandatory for the enrollment to be considered complete; four are
//! optional (disability certificate, psychological report, utility bill,
//! health record). The progress bar communicates overall paperwork
//! completion, so `total` is always 11 regardless of which flags are
//! required.

use serde::{Deserialize, Serialize};

/// Number of flags in the checklist. Fixed by the paper form.
pub const CHECKLIST_TOTAL: u32 = 11;

/// The fixed 11-item set of boolean enrollment-paperwork flags.
///
/// Fields hold `bool`, never raw wire values: the boundary normalizer coerces
/// every flag before a checklist is constructed, so completion counts cannot
/// undercount on `null`/`"1"`-style encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChecklist {
    #[serde(default)]
    pub birth_certificate: bool,
    #[serde(default)]
    pub student_id_document: bool,
    #[serde(default)]
    pub guardian_id_document: bool,
    #[serde(default)]
    pub vaccination_record: bool,
    #[serde(default)]
    pub disability_certificate: bool,
    #[serde(default)]
    pub utility_bill: bool,
    #[serde(default)]
    pub psychological_report: bool,
    #[serde(default)]
    pub student_photo: bool,
    #[serde(default)]
    pub health_record: bool,
    #[serde(default)]
    pub signed_enrollment_form: bool,
    #[serde(default)]
    pub id_verification: bool,
}

/// Completion summary over the full checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentProgress {
    pub completed: u32,
    pub total: u32,
    /// round(completed / total * 100), half-up.
    pub percentage: u32,
}

impl DocumentChecklist {
    fn flags(&self) -> [bool; CHECKLIST_TOTAL as usize] {
        [
            self.birth_certificate,
            self.student_id_document,
            self.guardian_id_document,
            self.vaccination_record,
            self.disability_certificate,
            self.utility_bill,
            self.psychological_report,
            self.student_photo,
            self.health_record,
            self.signed_enrollment_form,
            self.id_verification,
        ]
    }

    /// Count of flags currently set.
    pub fn completed(&self) -> u32 {
        self.flags().iter().filter(|&&f| f).count() as u32
    }

    /// Completion summary over all 11 flags.
    pub fn progress(&self) -> DocumentProgress {
        let completed = self.completed();
        let percentage =
            (f64::from(completed) / f64::from(CHECKLIST_TOTAL) * 100.0).round() as u32;
        DocumentProgress {
            completed,
            total: CHECKLIST_TOTAL,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist_with(n: usize) -> DocumentChecklist {
        let mut c = DocumentChecklist::default();
        let mut flags = [false; CHECKLIST_TOTAL as usize];
        for f in flags.iter_mut().take(n) {
            *f = true;
        }
        c.birth_certificate = flags[0];
        c.student_id_document = flags[1];
        c.guardian_id_document = flags[2];
        c.vaccination_record = flags[3];
        c.disability_certificate = flags[4];
        c.utility_bill = flags[5];
        c.psychological_report = flags[6];
        c.student_photo = flags[7];
        c.health_record = flags[8];
        c.signed_enrollment_form = flags[9];
        c.id_verification = flags[10];
        c
    }

    #[test]
    fn empty_checklist_is_zero_percent() {
        let progress = DocumentChecklist::default().progress();
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.total, 11);
        assert_eq!(progress.percentage, 0);
    }

    #[test]
    fn seven_of_eleven_rounds_to_sixty_four() {
        let progress = checklist_with(7).progress();
        assert_eq!(progress.completed, 7);
        assert_eq!(progress.total, 11);
        // round(7 / 11 * 100) = round(63.63..) = 64
        assert_eq!(progress.percentage, 64);
    }

    #[test]
    fn full_checklist_is_one_hundred_percent() {
        let progress = checklist_with(11).progress();
        assert_eq!(progress.completed, 11);
        assert_eq!(progress.percentage, 100);
    }

    #[test]
    fn one_of_eleven_rounds_to_nine() {
        // round(1 / 11 * 100) = round(9.09) = 9
        assert_eq!(checklist_with(1).progress().percentage, 9);
    }

    #[test]
    fn six_of_eleven_rounds_half_up() {
        // round(6 / 11 * 100) = round(54.54..) = 55
        assert_eq!(checklist_with(6).progress().percentage, 55);
    }

    #[test]
    fn checklist_uses_camel_case_wire_names() {
        let c = DocumentChecklist {
            birth_certificate: true,
            ..Default::default()
        };
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["birthCertificate"], serde_json::json!(true));
        assert_eq!(json["signedEnrollmentForm"], serde_json::json!(false));
    }
}
