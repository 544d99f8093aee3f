use crate::candidates::csv_io::{finish, quoted_writer};
use crate::models::job::Job;

pub const JOB_HEADERS: [&str; 10] = [
    "ID",
    "Title",
    "Client",
    "Location",
    "Type",
    "Specialization",
    "Salary",
    "Status",
    "Urgency",
    "Posted Date",
];

pub fn export_jobs(jobs: &[Job]) -> anyhow::Result<String> {
    let mut writer = quoted_writer();
    writer.write_record(JOB_HEADERS)?;

    for job in jobs {
        writer.write_record(&[
            job.id.to_string(),
            job.title.clone(),
            job.client.clone(),
            job.location.clone(),
            job.job_type.as_str().to_string(),
            job.specialization.clone(),
            job.salary.clone(),
            job.status.as_str().to_string(),
            job.urgency.as_str().to_string(),
            job.posted_date.to_rfc3339(),
        ])?;
    }

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::Urgency;
    use crate::test_support::job;

    #[test]
    fn test_export_jobs() {
        let mut j = job("Consultant \"Interventional\" Cardiologist", "Cardiology", Urgency::High, None);
        j.salary = "£80,000 - £120,000".to_string();
        let csv = export_jobs(&[j.clone()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#""ID","Title","Client","Location","Type","Specialization","Salary","Status","Urgency","Posted Date""#
        );
        // Embedded quotes are doubled; commas stay inside the quoted cell.
        assert!(lines[1].contains(r#""Consultant ""Interventional"" Cardiologist""#));
        assert!(lines[1].contains(r#""locum","Cardiology","£80,000 - £120,000","open","high""#));
    }
}
