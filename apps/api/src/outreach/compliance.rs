use serde::Serialize;

use crate::models::candidate::Candidate;
use crate::models::job::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Identity,
    Qualifications,
    Registration,
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceDocument {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: DocumentCategory,
}

const fn doc(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: DocumentCategory,
) -> ComplianceDocument {
    ComplianceDocument {
        id,
        name,
        description,
        category,
    }
}

const BASE_DOCUMENTS: [ComplianceDocument; 5] = [
    doc("dbs", "DBS Check", "Disclosure and Barring Service check", DocumentCategory::Background),
    doc("right_to_work", "Right to Work", "Proof of right to work in the UK", DocumentCategory::Identity),
    doc(
        "gmc_registration",
        "GMC Registration",
        "General Medical Council registration",
        DocumentCategory::Registration,
    ),
    doc("cv", "Updated CV", "Current curriculum vitae", DocumentCategory::Qualifications),
    doc(
        "references",
        "Professional References",
        "Two professional references",
        DocumentCategory::Qualifications,
    ),
];

const ACLS: ComplianceDocument = doc(
    "acls",
    "ACLS Certification",
    "Advanced Cardiovascular Life Support certification",
    DocumentCategory::Qualifications,
);

const MRCP: ComplianceDocument = doc(
    "mrcp",
    "MRCP Certificate",
    "Membership of the Royal Colleges of Physicians",
    DocumentCategory::Qualifications,
);

/// Base documents, plus ACLS/MRCP when the job lists them as requirements.
pub fn required_documents(job: Option<&Job>) -> Vec<ComplianceDocument> {
    let mut docs = BASE_DOCUMENTS.to_vec();
    if let Some(job) = job {
        let requires = |tag: &str| job.requirements.iter().any(|r| r.trim() == tag);
        if requires("ACLS") {
            docs.push(ACLS);
        }
        if requires("MRCP") {
            docs.push(MRCP);
        }
    }
    docs
}

/// DBS, right to work and GMC follow the candidate's flags; every other
/// document is untracked and therefore outstanding.
pub fn missing_documents(candidate: &Candidate, required: &[ComplianceDocument]) -> Vec<ComplianceDocument> {
    required
        .iter()
        .filter(|d| match d.id {
            "dbs" => !candidate.compliance.dbs,
            "right_to_work" => !candidate.compliance.right_to_work,
            "gmc_registration" => !candidate.compliance.registration,
            _ => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::Urgency;
    use crate::test_support::{candidate, job};

    fn ids(docs: &[ComplianceDocument]) -> Vec<&'static str> {
        docs.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_job_requirements_add_certificates() {
        let mut j = job("Emergency Medicine Registrar", "Emergency Medicine", Urgency::High, None);
        j.requirements = vec!["MRCP".into(), "Emergency Medicine experience".into(), "ACLS".into()];
        assert_eq!(
            ids(&required_documents(Some(&j))),
            vec!["dbs", "right_to_work", "gmc_registration", "cv", "references", "acls", "mrcp"]
        );
        assert_eq!(required_documents(None).len(), 5);
    }

    #[test]
    fn test_compliant_candidate_still_owes_untracked_documents() {
        let c = candidate(None);
        let missing = missing_documents(&c, &required_documents(None));
        assert_eq!(ids(&missing), vec!["cv", "references"]);
    }

    #[test]
    fn test_missing_flags_are_reported() {
        let mut c = candidate(None);
        c.compliance.registration = false;
        c.compliance.dbs = false;
        let missing = missing_documents(&c, &required_documents(None));
        assert_eq!(ids(&missing), vec!["dbs", "gmc_registration", "cv", "references"]);
    }
}
