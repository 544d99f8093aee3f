use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::models::email::EmailJob;

/// Source of inbound job emails.
#[async_trait]
pub trait Mailbox: Send + Sync {
    async fn fetch_new_emails(&self) -> anyhow::Result<Vec<EmailJob>>;
}

/// True when the sender address contains one of `domains` (case-insensitive).
pub fn is_nhs_email(address: &str, domains: &[String]) -> bool {
    let address = address.to_lowercase();
    domains.iter().any(|d| address.contains(d.as_str()))
}

const AGENCY_INBOX: &str = "jobs@your-agency.com";

const CARDIOLOGY_BODY: &str = "Dear Recruitment Partner,

We have an urgent requirement for a Consultant Cardiologist at Royal London Hospital.

Position Details:
- Title: Consultant Cardiologist
- Grade: Consultant
- Speciality: Cardiology
- Location: London, UK
- Start Date: ASAP
- Duration: 6 months initially
- Rate: £80-120 per hour
- Requirements: GMC registration, CCT in Cardiology, 5+ years experience

The successful candidate will join our busy cardiology department and provide comprehensive cardiac care including interventional procedures.

Please submit suitable candidates urgently.

Best regards,
NHS Recruitment Team";

const EMERGENCY_BODY: &str = "Hello,

We need an Emergency Medicine Registrar for immediate start.

Details:
- Position: Emergency Medicine Registrar
- Grade: ST4-ST6
- Location: Manchester, UK
- Speciality: Emergency Medicine
- Rate: £45-55/hour
- Duration: 3 months
- Requirements: MRCP, Emergency Medicine experience, ACLS

Urgent requirement due to staff shortage.

Thanks,
Manchester Royal Infirmary";

/// Stand-in for an IMAP inbox: two fixed NHS requests plus any injected
/// messages, filtered to NHS senders.
pub struct SimulatedMailbox {
    nhs_domains: Vec<String>,
    extra: Vec<EmailJob>,
}

impl SimulatedMailbox {
    pub fn new(nhs_domains: Vec<String>) -> Self {
        Self {
            nhs_domains,
            extra: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_messages(mut self, messages: Vec<EmailJob>) -> Self {
        self.extra.extend(messages);
        self
    }

    fn fixtures() -> Vec<EmailJob> {
        let cardiology = EmailJob::new(
            "Urgent: Consultant Cardiologist Required - Royal London Hospital",
            "recruitment@royallondon.nhs.uk",
            AGENCY_INBOX,
            CARDIOLOGY_BODY,
        );
        let mut emergency = EmailJob::new(
            "Emergency Medicine Registrar - Manchester Royal Infirmary",
            "hr@manchester.nhs.uk",
            AGENCY_INBOX,
            EMERGENCY_BODY,
        );
        emergency.received_date = Utc::now() - Duration::hours(1);
        vec![cardiology, emergency]
    }
}

#[async_trait]
impl Mailbox for SimulatedMailbox {
    async fn fetch_new_emails(&self) -> anyhow::Result<Vec<EmailJob>> {
        Ok(Self::fixtures()
            .into_iter()
            .chain(self.extra.iter().cloned())
            .filter(|e| is_nhs_email(&e.from_email, &self.nhs_domains))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_nhs_domains;

    #[test]
    fn test_is_nhs_email() {
        let domains = default_nhs_domains();
        assert!(is_nhs_email("HR@Manchester.NHS.uk", &domains));
        assert!(is_nhs_email("someone@nhs.net", &domains));
        assert!(is_nhs_email("team@belfast.hscni.net", &domains));
        assert!(!is_nhs_email("jobs@locum-agency.co.uk", &domains));
    }

    #[tokio::test]
    async fn test_simulated_mailbox_filters_non_nhs_senders() {
        let mailbox = SimulatedMailbox::new(default_nhs_domains()).with_messages(vec![
            EmailJob::new("Spam", "offers@cheap-locums.com", AGENCY_INBOX, "Buy now"),
            EmailJob::new("FY2 cover", "rota@leeds.nhs.uk", AGENCY_INBOX, "FY2 needed"),
        ]);

        let emails = mailbox.fetch_new_emails().await.unwrap();
        let senders: Vec<&str> = emails.iter().map(|e| e.from_email.as_str()).collect();
        assert_eq!(
            senders,
            vec![
                "recruitment@royallondon.nhs.uk",
                "hr@manchester.nhs.uk",
                "rota@leeds.nhs.uk"
            ]
        );
        assert!(emails.iter().all(|e| !e.processed));
    }

    #[tokio::test]
    async fn test_custom_domain_list_applies_to_fixtures() {
        let mailbox = SimulatedMailbox::new(vec!["manchester.nhs.uk".to_string()]);
        let emails = mailbox.fetch_new_emails().await.unwrap();
        assert_eq!(emails.len(), 1);
        assert!(emails[0].received_date < Utc::now());
    }
}
